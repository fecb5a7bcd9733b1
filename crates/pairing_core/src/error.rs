//! Error types shared by every engine component

use thiserror::Error;

use crate::types::RoundId;

/// Validation failures raised by the engine.
///
/// Every variant is detected before any state is touched, so a caller that
/// receives one of these can surface it as a form error and keep its data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PairingError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid result: {0}")]
    InvalidResult(String),

    #[error("round {round_id} is finalized and must be unlocked before editing")]
    RoundLocked { round_id: RoundId },

    #[error("unlock reason is required")]
    UnlockRejected,
}

pub type Result<T> = std::result::Result<T, PairingError>;

impl PairingError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        PairingError::InvalidConfiguration(message.into())
    }

    pub fn invalid_result(message: impl Into<String>) -> Self {
        PairingError::InvalidResult(message.into())
    }
}
