//! HTTP adapter for the mall verification services
//!
//! Thin actix-web layer over `VerificationCoordinator`: each route
//! validates its input, makes one coordinator call and renders the
//! `{code, errmsg}` envelope.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod i18n;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState, Coordinator};
