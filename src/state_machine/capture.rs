//! Lead-capture dialog: name, then phone, then issue
//!
//! Input is stored verbatim; there is no format validation. Callers never
//! pass blank text here (the controller drops it first).

use super::state::{DialogState, LeadDraft, LeadRecord, Session};
use crate::responses;
use thiserror::Error;

/// Result of advancing the capture flow by one user turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub prompt: String,
    /// The finished lead, present only on the final step. The session has
    /// already been reset when this is `Some`.
    pub completed: Option<LeadRecord>,
}

impl StepOutcome {
    fn prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            completed: None,
        }
    }

    #[allow(dead_code)] // API completeness
    pub fn is_completed(&self) -> bool {
        self.completed.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("no capture flow is active")]
    NotCapturing,
}

/// Begin a capture flow, discarding any earlier draft. Returns the name prompt.
pub fn start(session: &mut Session) -> &'static str {
    session.dialog = DialogState::AskingName;
    session.lead = LeadDraft::default();
    responses::ASK_NAME
}

/// Advance the flow with one user answer.
pub fn step(session: &mut Session, text: &str, source: &str) -> Result<StepOutcome, CaptureError> {
    match session.dialog {
        DialogState::Idle => Err(CaptureError::NotCapturing),
        DialogState::AskingName => {
            session.lead.name = text.to_string();
            session.dialog = DialogState::AskingPhone;
            Ok(StepOutcome::prompt(responses::ask_phone(text)))
        }
        DialogState::AskingPhone => {
            session.lead.phone = text.to_string();
            session.dialog = DialogState::AskingIssue;
            Ok(StepOutcome::prompt(responses::ASK_ISSUE))
        }
        DialogState::AskingIssue => {
            session.lead.issue = text.to_string();
            let draft = std::mem::take(&mut session.lead);
            session.reset_capture();
            debug_assert!(draft.is_complete(), "capture finished with a missing field");
            Ok(StepOutcome {
                prompt: responses::SUBMITTING.to_string(),
                completed: Some(LeadRecord {
                    name: draft.name,
                    phone: draft.phone,
                    issue: draft.issue,
                    source: source.to_string(),
                }),
            })
        }
    }
}

/// Drop an in-progress flow without submitting anything.
///
/// Returns whether a flow was actually running.
pub fn abandon(session: &mut Session) -> bool {
    let was_capturing = session.dialog.is_capturing();
    session.reset_capture();
    was_capturing
}
