//! Events that can occur in a chat session

use crate::submitter::SubmissionOutcome;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // Widget events
    UserMessage { text: String },
    WindowOpened,
    WindowClosed,

    // Scheduled events
    /// A delayed reply is ready to be shown
    ReplyDue { text: String },
    /// The submission task for a completed lead has finished
    LeadSubmitted { outcome: SubmissionOutcome },
}

impl Event {
    #[allow(dead_code)] // Constructor for API completeness
    pub fn user_message(text: impl Into<String>) -> Self {
        Event::UserMessage { text: text.into() }
    }
}
