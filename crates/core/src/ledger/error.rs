//! Ledger error types for submission.
//!
//! Structural and balance problems are collected in [`ValidationErrors`];
//! this enum wraps them together with the state and persistence failures a
//! submit attempt can run into. None of them is fatal: the draft is kept and
//! the user may edit and retry.

use lancamento_shared::AppError;
use thiserror::Error;

use super::validation::ValidationErrors;

/// Errors that can occur while submitting an entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// The draft failed validation; every problem is included.
    #[error("Entry has {} validation error(s)", .0.len())]
    Invalid(ValidationErrors),

    // ========== Session State Errors ==========
    /// A persistence call for this draft is still outstanding.
    #[error("A submission for this entry is already in progress")]
    SubmitInFlight,

    /// The draft was already saved and can no longer change.
    #[error("Entry has already been submitted")]
    AlreadySubmitted,

    /// A submit result arrived without a submission in flight.
    #[error("No submission is in progress")]
    NotSubmitting,

    // ========== Persistence Errors ==========
    /// The persistence collaborator reported a failure.
    #[error("Saving the entry failed: {0}")]
    Persistence(#[from] AppError),
}

impl LedgerError {
    /// Returns the error code for display and logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "INVALID_ENTRY",
            Self::SubmitInFlight => "SUBMIT_IN_FLIGHT",
            Self::AlreadySubmitted => "ALREADY_SUBMITTED",
            Self::NotSubmitting => "NOT_SUBMITTING",
            Self::Persistence(_) => "PERSISTENCE_FAILED",
        }
    }

    /// Returns true if submitting again unchanged may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Persistence(err) => err.is_transient(),
            Self::SubmitInFlight => true,
            Self::Invalid(_) | Self::AlreadySubmitted | Self::NotSubmitting => false,
        }
    }
}
