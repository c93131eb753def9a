//! Pure state transition function
//!
//! Routes each event either into the capture flow or to ordinary Q&A and
//! describes the resulting output as effects. No I/O happens here.

use super::capture::{self, CaptureError};
use super::{Effect, Event, Session, SessionContext};
use crate::intent::{classify, ClassificationResult, PestKind};
use crate::responses;
use crate::submitter::SubmissionOutcome;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_session: Session,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(session: Session) -> Self {
        Self {
            new_session: session,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Pure transition function
///
/// Given the same session, context and event it always produces the same
/// result. Every event is accepted in every state; nothing here can fail.
pub fn transition(session: &Session, context: &SessionContext, event: Event) -> TransitionResult {
    let mut next = session.clone();

    match event {
        Event::UserMessage { text } => {
            let effects = handle_user_message(&mut next, context, &text);
            TransitionResult::new(next).with_effects(effects)
        }

        // Greet once per session, however often the window is reopened
        Event::WindowOpened if !next.greeted => {
            next.greeted = true;
            TransitionResult::new(next).with_effect(Effect::show_bot(responses::WELCOME))
        }
        Event::WindowOpened => TransitionResult::new(next),

        // Closing mid-flow discards the draft; nothing is submitted
        Event::WindowClosed => {
            capture::abandon(&mut next);
            TransitionResult::new(next)
        }

        Event::ReplyDue { text } => TransitionResult::new(next).with_effect(Effect::show_bot(text)),

        // The session was reset before submission began, so only report
        Event::LeadSubmitted { outcome } => {
            let text = match outcome {
                SubmissionOutcome::Sent => responses::SUBMISSION_SENT,
                SubmissionOutcome::Failed(_) => responses::SUBMISSION_FAILED,
            };
            TransitionResult::new(next).with_effect(Effect::show_bot(text))
        }
    }
}

fn handle_user_message(session: &mut Session, context: &SessionContext, raw: &str) -> Vec<Effect> {
    let text = raw.trim();
    if text.is_empty() {
        return vec![];
    }

    let mut effects = vec![Effect::show_user(text)];

    match capture::step(session, text, &context.lead_source) {
        Ok(outcome) => {
            effects.push(Effect::show_bot(outcome.prompt));
            if let Some(record) = outcome.completed {
                effects.push(Effect::SubmitLead { record });
            }
        }
        Err(CaptureError::NotCapturing) => match classify(text) {
            ClassificationResult::ContactIntent => {
                effects.push(Effect::show_bot(capture::start(session)));
            }
            ClassificationResult::PestTopic(kind) => {
                effects.push(Effect::schedule_reply(
                    context.reply_delay,
                    responses::generate(kind),
                ));
            }
            ClassificationResult::Unknown => {
                effects.push(Effect::schedule_reply(
                    context.reply_delay,
                    responses::generate(PestKind::None),
                ));
            }
        },
    }

    effects
}
