//! Effects produced by state transitions

use super::state::{LeadRecord, Role};
use std::time::Duration;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show a message in the widget right away
    Display { role: Role, text: String },

    /// Show a bot reply after `delay` (simulated typing latency)
    ScheduleReply { delay: Duration, text: String },

    /// Send a completed lead to the remote endpoint (spawns as background task)
    SubmitLead { record: LeadRecord },
}

impl Effect {
    pub fn show_user(text: impl Into<String>) -> Self {
        Effect::Display {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn show_bot(text: impl Into<String>) -> Self {
        Effect::Display {
            role: Role::Bot,
            text: text.into(),
        }
    }

    pub fn schedule_reply(delay: Duration, text: impl Into<String>) -> Self {
        Effect::ScheduleReply {
            delay,
            text: text.into(),
        }
    }
}
