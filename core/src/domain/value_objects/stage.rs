//! Progress of one verification flow.

use serde::{Deserialize, Serialize};

/// Where a client stands in the image code → SMS code flow.
///
/// No state machine object is persisted. The stage is read back from the
/// store: live entries mean "issued", and consumption deletes them, so the
/// two `*Validated` stages are only ever reported by the call that
/// performed the validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStage {
    NoChallenge,
    ImageIssued,
    ImageValidated,
    SmsIssued,
    SmsValidated,
}

impl VerificationStage {
    /// Stages only move forward
    pub fn can_advance_to(&self, next: VerificationStage) -> bool {
        next > *self
    }

    /// Stage a caller returns to after a failed validation at this stage
    pub fn on_failure(&self) -> VerificationStage {
        match self {
            VerificationStage::ImageIssued | VerificationStage::ImageValidated => {
                VerificationStage::NoChallenge
            }
            VerificationStage::SmsIssued | VerificationStage::SmsValidated => {
                VerificationStage::ImageValidated
            }
            VerificationStage::NoChallenge => VerificationStage::NoChallenge,
        }
    }
}
