//! Chat session state types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Position in the lead-capture dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogState {
    /// No capture flow is active; messages go to the classifier
    #[default]
    Idle,
    AskingName,
    AskingPhone,
    AskingIssue,
}

impl DialogState {
    pub fn is_capturing(self) -> bool {
        !matches!(self, DialogState::Idle)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DialogState::Idle => "idle",
            DialogState::AskingName => "asking_name",
            DialogState::AskingPhone => "asking_phone",
            DialogState::AskingIssue => "asking_issue",
        }
    }
}

/// Contact fields accumulated while a capture flow is running
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeadDraft {
    pub name: String,
    pub phone: String,
    pub issue: String,
}

impl LeadDraft {
    #[allow(dead_code)] // Used by invariant checks
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.phone.is_empty() && self.issue.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.phone.is_empty() && !self.issue.is_empty()
    }
}

/// Snapshot of a finished capture, as sent to the lead endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub name: String,
    pub phone: String,
    pub issue: String,
    pub source: String,
}

/// The mutable conversational context of one widget instance.
///
/// Owned by exactly one session actor; nothing else mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub dialog: DialogState,
    pub lead: LeadDraft,
    /// Whether the welcome message has been shown
    pub greeted: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any capture in progress and return to `Idle`
    pub fn reset_capture(&mut self) {
        self.dialog = DialogState::Idle;
        self.lead = LeadDraft::default();
    }
}

/// Immutable per-session settings consulted by transitions
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
    /// Artificial latency before ordinary (non-capture) replies
    pub reply_delay: Duration,
    /// Constant label stamped on every submitted lead
    pub lead_source: String,
}

impl SessionContext {
    pub fn new(
        session_id: impl Into<String>,
        reply_delay: Duration,
        lead_source: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            reply_delay,
            lead_source: lead_source.into(),
        }
    }
}

/// Who a chat bubble belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Bot,
}

/// A rendered chat message handed to the message sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    #[allow(dead_code)] // Constructor for API completeness
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Role::Bot, text)
    }
}
