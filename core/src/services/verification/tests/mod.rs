
mod coordinator_tests;
