//! Chat session runtime executor

use super::traits::MessageSink;
use crate::state_machine::{
    transition, ChatMessage, DialogState, Effect, Event, Session, SessionContext,
};
use crate::submitter::LeadSubmitter;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

/// Actor owning one chat session.
///
/// Events are processed strictly one at a time, so the session has a single
/// writer. Delayed replies and lead submission run as spawned tasks that
/// report back through the event channel.
pub struct SessionRuntime<K, L>
where
    K: MessageSink + 'static,
    L: LeadSubmitter + ?Sized + 'static,
{
    context: SessionContext,
    session: Session,
    sink: Arc<K>,
    submitter: Arc<L>,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    /// Publishes the dialog state for snapshots
    state_tx: watch::Sender<DialogState>,
    cancel: CancellationToken,
}

impl<K, L> SessionRuntime<K, L>
where
    K: MessageSink + 'static,
    L: LeadSubmitter + ?Sized + 'static,
{
    pub fn new(
        context: SessionContext,
        sink: Arc<K>,
        submitter: Arc<L>,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::Sender<Event>,
        state_tx: watch::Sender<DialogState>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            context,
            session: Session::new(),
            sink,
            submitter,
            event_rx,
            event_tx,
            state_tx,
            cancel,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(session_id = %self.context.session_id, "Starting chat session runtime");

        loop {
            tokio::select! {
                () = self.cancel.cancelled() => break,
                event = self.event_rx.recv() => match event {
                    Some(event) => self.process_event(event),
                    None => break,
                },
            }
        }

        tracing::info!(session_id = %self.context.session_id, "Chat session runtime stopped");
    }

    fn process_event(&mut self, event: Event) {
        let result = transition(&self.session, &self.context, event);
        let old = std::mem::replace(&mut self.session, result.new_session);

        if old.dialog != self.session.dialog {
            tracing::debug!(
                session_id = %self.context.session_id,
                from = old.dialog.as_str(),
                to = self.session.dialog.as_str(),
                "Dialog state changed"
            );
            self.state_tx.send_replace(self.session.dialog);
        }

        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::Display { role, text } => {
                self.sink.display(ChatMessage::new(role, text));
            }

            // Not cancellable and not coalesced: every scheduled reply lands
            Effect::ScheduleReply { delay, text } => {
                let event_tx = self.event_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = event_tx.send(Event::ReplyDue { text }).await;
                });
            }

            // The session is already back to Idle; no timeout is applied
            Effect::SubmitLead { record } => {
                tracing::info!(session_id = %self.context.session_id, "Submitting captured lead");
                let submitter = Arc::clone(&self.submitter);
                let event_tx = self.event_tx.clone();
                let session_id = self.context.session_id.clone();
                tokio::spawn(async move {
                    let outcome = submitter.submit(&record).await;
                    tracing::info!(
                        session_id = %session_id,
                        sent = outcome.is_sent(),
                        "Lead submission finished"
                    );
                    let _ = event_tx.send(Event::LeadSubmitted { outcome }).await;
                });
            }
        }
    }
}
