//! Runtime for executing chat sessions
//!
//! One actor per open widget instance. Sessions are isolated from each
//! other; two tabs get two sessions.

mod executor;
pub mod traits;


pub use executor::SessionRuntime;
pub use traits::*;

use crate::config::ChatConfig;
use crate::state_machine::{ChatMessage, DialogState, Event, SessionContext};
use crate::submitter::LeadSubmitter;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch, RwLock};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Type alias for production runtime with concrete implementations
pub type ProductionRuntime = SessionRuntime<BroadcastSink, dyn LeadSubmitter>;

const EVENT_CHANNEL_CAPACITY: usize = 32;
const BROADCAST_CAPACITY: usize = 128;
/// Upper bound on how often idle sessions are swept
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Events sent to SSE clients
#[derive(Debug, Clone)]
pub enum SseEvent {
    Init {
        session_id: String,
        dialog_state: DialogState,
        messages: Vec<ChatMessage>,
    },
    Message {
        message: ChatMessage,
    },
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),
    #[error("Session {0} is no longer running")]
    SessionClosed(String),
}

/// Handle to interact with a running session
pub struct SessionHandle {
    pub event_tx: mpsc::Sender<Event>,
    pub sink: Arc<BroadcastSink>,
    pub state_rx: watch::Receiver<DialogState>,
    cancel: CancellationToken,
    last_event: Mutex<Instant>,
}

impl SessionHandle {
    fn touch(&self) {
        *self.last_event.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(
            *self.last_event.lock().unwrap_or_else(PoisonError::into_inner),
        )
    }
}

/// Point-in-time view of a session
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub dialog_state: DialogState,
    pub messages: Vec<ChatMessage>,
}

/// Manager for all session runtimes
pub struct RuntimeManager {
    reply_delay: Duration,
    lead_source: String,
    session_ttl: Duration,
    submitter: Arc<dyn LeadSubmitter>,
    sessions: RwLock<HashMap<String, SessionHandle>>,
    /// Parent of every session's cancellation token
    shutdown: CancellationToken,
}

impl RuntimeManager {
    pub fn new(
        config: &ChatConfig,
        submitter: Arc<dyn LeadSubmitter>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            reply_delay: config.reply_delay,
            lead_source: config.lead_source.clone(),
            session_ttl: config.session_ttl,
            submitter,
            sessions: RwLock::new(HashMap::new()),
            shutdown,
        }
    }

    /// Spawn a session for a widget that was just opened and greet it.
    pub async fn create_session(&self) -> Result<String, RuntimeError> {
        let session_id = uuid::Uuid::new_v4().to_string();
        let context = SessionContext::new(&session_id, self.reply_delay, &self.lead_source);

        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (broadcast_tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        let (state_tx, state_rx) = watch::channel(DialogState::Idle);
        let sink = Arc::new(BroadcastSink::new(broadcast_tx));
        let cancel = self.shutdown.child_token();

        let runtime: ProductionRuntime = SessionRuntime::new(
            context,
            Arc::clone(&sink),
            Arc::clone(&self.submitter),
            event_rx,
            event_tx.clone(),
            state_tx,
            cancel.clone(),
        );
        tokio::spawn(runtime.run());

        self.sessions.write().await.insert(
            session_id.clone(),
            SessionHandle {
                event_tx,
                sink,
                state_rx,
                cancel,
                last_event: Mutex::new(Instant::now()),
            },
        );

        self.send_event(&session_id, Event::WindowOpened).await?;
        Ok(session_id)
    }

    /// Deliver an event to a session's actor.
    pub async fn send_event(&self, session_id: &str, event: Event) -> Result<(), RuntimeError> {
        let event_tx = {
            let sessions = self.sessions.read().await;
            let handle = sessions
                .get(session_id)
                .ok_or_else(|| RuntimeError::SessionNotFound(session_id.to_string()))?;
            handle.touch();
            handle.event_tx.clone()
        };

        event_tx
            .send(event)
            .await
            .map_err(|_| RuntimeError::SessionClosed(session_id.to_string()))
    }

    pub async fn snapshot(&self, session_id: &str) -> Result<SessionSnapshot, RuntimeError> {
        let sessions = self.sessions.read().await;
        let handle = sessions
            .get(session_id)
            .ok_or_else(|| RuntimeError::SessionNotFound(session_id.to_string()))?;

        let dialog_state = *handle.state_rx.borrow();
        Ok(SessionSnapshot {
            session_id: session_id.to_string(),
            dialog_state,
            messages: handle.sink.transcript(),
        })
    }

    /// Transcript so far plus a receiver for everything after it
    pub async fn subscribe(
        &self,
        session_id: &str,
    ) -> Result<(SseEvent, broadcast::Receiver<SseEvent>), RuntimeError> {
        let sessions = self.sessions.read().await;
        let handle = sessions
            .get(session_id)
            .ok_or_else(|| RuntimeError::SessionNotFound(session_id.to_string()))?;

        handle.touch();
        let (messages, rx) = handle.sink.subscribe();
        let init = SseEvent::Init {
            session_id: session_id.to_string(),
            dialog_state: *handle.state_rx.borrow(),
            messages,
        };
        Ok((init, rx))
    }

    /// Stop a session's actor and forget it. Any in-progress capture is
    /// dropped unsubmitted.
    pub async fn end_session(&self, session_id: &str) -> Result<(), RuntimeError> {
        let handle = self
            .sessions
            .write()
            .await
            .remove(session_id)
            .ok_or_else(|| RuntimeError::SessionNotFound(session_id.to_string()))?;
        handle.cancel.cancel();
        tracing::info!(session_id = %session_id, "Session ended");
        Ok(())
    }

    /// Drop sessions nobody is using: no event for `session_ttl` and no SSE
    /// subscriber, or an actor that has already stopped. Returns how many
    /// were removed.
    pub async fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|session_id, handle| {
            let stopped = handle.event_tx.is_closed();
            let idle = handle.sink.subscriber_count() == 0
                && handle.idle_for(now) >= self.session_ttl;
            if stopped || idle {
                handle.cancel.cancel();
                tracing::info!(session_id = %session_id, stopped, "Session reclaimed");
                return false;
            }
            true
        });

        before - sessions.len()
    }

    /// Periodically reclaim idle sessions until shutdown or until the
    /// manager is dropped.
    pub fn spawn_reaper(self: &Arc<Self>) {
        let manager = Arc::downgrade(self);
        let shutdown = self.shutdown.clone();
        let interval = self
            .session_ttl
            .min(SWEEP_INTERVAL)
            .max(Duration::from_secs(1));

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = shutdown.cancelled() => break,
                    () = tokio::time::sleep(interval) => {}
                }

                let Some(manager) = manager.upgrade() else {
                    tracing::debug!("RuntimeManager dropped, reaper exiting");
                    break;
                };
                let evicted = manager.evict_idle().await;
                if evicted > 0 {
                    let remaining = manager.session_count().await;
                    tracing::info!(evicted, remaining, "Swept idle sessions");
                }
            }
        });
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Token cancelled when the process shuts down
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }
}
