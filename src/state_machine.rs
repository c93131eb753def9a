//! Chat session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

pub mod capture;
mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{ChatMessage, DialogState, LeadRecord, Role, Session, SessionContext};
pub use transition::transition;
