//! Submission lifecycle of one entry draft.
//!
//! The valid transitions are:
//! - Editing → Validating (submit attempt)
//! - Validating → Invalid → Editing (problems found)
//! - Validating → Valid → Submitting (persistence call issued)
//! - Submitting → Submitted (saved)
//! - Submitting → SubmitFailed → Editing (persistence failed, draft kept)
//!
//! Only one persistence call may be outstanding per draft; while
//! `Submitting`, the draft cannot be edited and a second submit is refused.

use std::fmt;

use lancamento_shared::types::{DraftId, EntryId};
use lancamento_shared::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::draft::EntryDraft;
use super::error::LedgerError;
use super::ports::EntryStore;
use super::types::{EntryPayload, PersistedEntry};
use super::validation::ValidationErrors;

/// Lifecycle state of an entry draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// The user is editing the draft.
    Editing,
    /// A submit attempt is being validated.
    Validating,
    /// Validation found problems.
    Invalid,
    /// Validation passed.
    Valid,
    /// The persistence call is in flight.
    Submitting,
    /// The entry was saved (terminal).
    Submitted,
    /// The persistence call failed.
    SubmitFailed,
}

impl SessionState {
    /// Returns the string representation of the state.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Editing => "editing",
            Self::Validating => "validating",
            Self::Invalid => "invalid",
            Self::Valid => "valid",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
            Self::SubmitFailed => "submit_failed",
        }
    }

    /// Returns true if moving from `self` to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Editing, Self::Validating)
                | (Self::Validating, Self::Invalid | Self::Valid)
                | (Self::Invalid | Self::SubmitFailed, Self::Editing)
                | (Self::Valid, Self::Submitting)
                | (Self::Submitting, Self::Submitted | Self::SubmitFailed)
        )
    }

    /// Returns true if the draft may be changed in this state.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Editing)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One editing session: a draft plus its submission state.
#[derive(Debug, Clone)]
pub struct EntrySession {
    id: DraftId,
    draft: EntryDraft,
    state: SessionState,
    editing: Option<EntryId>,
    last_errors: ValidationErrors,
    last_failure: Option<AppError>,
    saved: Option<EntryId>,
}

impl EntrySession {
    /// Starts a session around `draft` for a new entry.
    #[must_use]
    pub fn new(draft: EntryDraft) -> Self {
        Self {
            id: DraftId::new(),
            draft,
            state: SessionState::Editing,
            editing: None,
            last_errors: ValidationErrors::default(),
            last_failure: None,
            saved: None,
        }
    }

    /// Starts a session for a fresh entry dated today.
    #[must_use]
    pub fn create() -> Self {
        Self::new(EntryDraft::new())
    }

    /// Starts a session editing an existing entry.
    ///
    /// Saving updates the entry in place when it carries an ID.
    #[must_use]
    pub fn edit(entry: &PersistedEntry) -> Self {
        let mut session = Self::new(EntryDraft::from_persisted(entry));
        session.editing = entry.id;
        session
    }

    /// Session identifier used in logs.
    #[must_use]
    pub fn id(&self) -> DraftId {
        self.id
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The draft being edited.
    #[must_use]
    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    /// Mutable access to the draft.
    ///
    /// Refused while a submission is in flight or after the entry was saved.
    pub fn draft_mut(&mut self) -> Result<&mut EntryDraft, LedgerError> {
        match self.state {
            SessionState::Submitting => Err(LedgerError::SubmitInFlight),
            SessionState::Submitted => Err(LedgerError::AlreadySubmitted),
            _ => Ok(&mut self.draft),
        }
    }

    /// Whether the submit control should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.state.is_editable()
    }

    /// Problems found by the last submit attempt.
    #[must_use]
    pub fn last_errors(&self) -> &ValidationErrors {
        &self.last_errors
    }

    /// Failure reported by the last persistence call.
    #[must_use]
    pub fn last_failure(&self) -> Option<&AppError> {
        self.last_failure.as_ref()
    }

    /// The saved entry's ID once submitted.
    #[must_use]
    pub fn saved_id(&self) -> Option<EntryId> {
        self.saved
    }

    /// The entry being edited, if this session was opened in edit mode.
    #[must_use]
    pub fn editing_id(&self) -> Option<EntryId> {
        self.editing
    }

    /// Validates the draft and, if clean, enters `Submitting`.
    ///
    /// Returns the payload to hand to persistence. Validation always runs
    /// from scratch.
    pub fn begin_submit(&mut self) -> Result<EntryPayload, LedgerError> {
        match self.state {
            SessionState::Submitting => return Err(LedgerError::SubmitInFlight),
            SessionState::Submitted => return Err(LedgerError::AlreadySubmitted),
            _ => {}
        }

        self.transition(SessionState::Validating);
        match self.draft.to_payload() {
            Ok(payload) => {
                self.last_errors = ValidationErrors::default();
                self.last_failure = None;
                self.transition(SessionState::Valid);
                self.transition(SessionState::Submitting);
                Ok(payload)
            }
            Err(errors) => {
                info!(
                    draft_id = %self.id,
                    errors = errors.len(),
                    fields = ?errors.keys(),
                    "Entry failed validation"
                );
                self.last_errors = errors.clone();
                self.transition(SessionState::Invalid);
                self.transition(SessionState::Editing);
                Err(LedgerError::Invalid(errors))
            }
        }
    }

    /// Records the outcome of the persistence call.
    ///
    /// On failure the draft is left untouched and editing resumes.
    pub fn finish_submit(&mut self, result: AppResult<EntryId>) -> Result<EntryId, LedgerError> {
        if self.state != SessionState::Submitting {
            return Err(LedgerError::NotSubmitting);
        }

        match result {
            Ok(entry_id) => {
                info!(draft_id = %self.id, entry_id = %entry_id, "Entry saved");
                self.saved = Some(entry_id);
                self.transition(SessionState::Submitted);
                Ok(entry_id)
            }
            Err(err) => {
                warn!(
                    draft_id = %self.id,
                    code = err.error_code(),
                    error = %err,
                    "Saving entry failed"
                );
                self.last_failure = Some(err.clone());
                self.transition(SessionState::SubmitFailed);
                self.transition(SessionState::Editing);
                Err(LedgerError::Persistence(err))
            }
        }
    }

    /// Validates, saves through `store`, and records the outcome.
    ///
    /// Creates a new entry, or updates the one being edited. Never retries.
    pub async fn submit(&mut self, store: &dyn EntryStore) -> Result<EntryId, LedgerError> {
        let payload = self.begin_submit()?;
        let result = match self.editing {
            Some(id) => store.update(id, &payload).await,
            None => store.save(&payload).await,
        };
        self.finish_submit(result)
    }

    fn transition(&mut self, next: SessionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid transition {} -> {next}",
            self.state
        );
        debug!(draft_id = %self.id, from = %self.state, to = %next, "Entry state transition");
        self.state = next;
    }
}
