//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use super::SseEvent;
use crate::state_machine::{ChatMessage, LeadRecord};
use crate::submitter::{LeadSubmitter, SubmissionOutcome};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;

/// Presentation layer that renders chat bubbles.
///
/// Displaying is synchronous and cannot fail.
pub trait MessageSink: Send + Sync {
    fn display(&self, message: ChatMessage);
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

impl<T: MessageSink + ?Sized> MessageSink for Arc<T> {
    fn display(&self, message: ChatMessage) {
        (**self).display(message);
    }
}

#[async_trait]
impl<T: LeadSubmitter + ?Sized> LeadSubmitter for Arc<T> {
    async fn submit(&self, lead: &LeadRecord) -> SubmissionOutcome {
        (**self).submit(lead).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Sink that keeps the session transcript in memory and fans each message
/// out to SSE subscribers.
pub struct BroadcastSink {
    transcript: Mutex<Vec<ChatMessage>>,
    broadcast_tx: broadcast::Sender<SseEvent>,
}

impl BroadcastSink {
    pub fn new(broadcast_tx: broadcast::Sender<SseEvent>) -> Self {
        Self {
            transcript: Mutex::new(Vec::new()),
            broadcast_tx,
        }
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Snapshot the transcript and subscribe under the same lock, so no
    /// message falls between the two.
    pub fn subscribe(&self) -> (Vec<ChatMessage>, broadcast::Receiver<SseEvent>) {
        let transcript = self
            .transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        (transcript.clone(), self.broadcast_tx.subscribe())
    }

    /// Number of live SSE receivers
    pub fn subscriber_count(&self) -> usize {
        self.broadcast_tx.receiver_count()
    }
}

impl MessageSink for BroadcastSink {
    fn display(&self, message: ChatMessage) {
        let mut transcript = self
            .transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        transcript.push(message.clone());
        // No subscribers is fine; the transcript still has it
        let _ = self.broadcast_tx.send(SseEvent::Message { message });
    }
}
