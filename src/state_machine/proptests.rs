//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::capture;
use super::state::*;
use super::*;
use crate::intent::{classify, ClassificationResult, CONTACT_KEYWORDS, PEST_KEYWORD_GROUPS};
use crate::submitter::SubmissionOutcome;
use proptest::prelude::*;
use std::time::Duration;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> SessionContext {
    SessionContext::new("test-session", Duration::from_millis(800), "test-source")
}

fn is_submit(effect: &Effect) -> bool {
    matches!(effect, Effect::SubmitLead { .. })
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_dialog_state() -> impl Strategy<Value = DialogState> {
    prop_oneof![
        Just(DialogState::Idle),
        Just(DialogState::AskingName),
        Just(DialogState::AskingPhone),
        Just(DialogState::AskingIssue),
    ]
}

/// Sessions in reachable configurations: each asking state holds exactly
/// the answers collected before it.
fn arb_session() -> impl Strategy<Value = Session> {
    (
        arb_dialog_state(),
        "[a-zA-Z]{1,6}( [a-zA-Z]{1,6})?",
        "[0-9]{3}-[0-9]{4}",
        any::<bool>(),
    )
        .prop_map(|(dialog, name, phone, greeted)| {
            let lead = match dialog {
                DialogState::Idle | DialogState::AskingName => LeadDraft::default(),
                DialogState::AskingPhone => LeadDraft {
                    name,
                    ..LeadDraft::default()
                },
                DialogState::AskingIssue => LeadDraft {
                    name,
                    phone,
                    issue: String::new(),
                },
            };
            Session {
                dialog,
                lead,
                greeted,
            }
        })
}

/// Text with at least one non-whitespace character
fn arb_non_blank_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,10}[a-zA-Z0-9][a-zA-Z0-9 ,.'-]{0,20}"
}

fn arb_blank_text() -> impl Strategy<Value = String> {
    "[ \t\n]{0,6}"
}

fn arb_contact_keyword() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(CONTACT_KEYWORDS)
}

fn arb_pest_keyword() -> impl Strategy<Value = &'static str> {
    let all: Vec<&'static str> = PEST_KEYWORD_GROUPS
        .iter()
        .flat_map(|group| group.keywords.iter().copied())
        .collect();
    proptest::sample::select(all)
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        4 => arb_non_blank_text().prop_map(Event::user_message),
        1 => arb_blank_text().prop_map(Event::user_message),
        1 => Just(Event::WindowOpened),
        1 => Just(Event::WindowClosed),
        1 => Just(Event::LeadSubmitted { outcome: SubmissionOutcome::Sent }),
        1 => "[a-z]{1,10}".prop_map(|text| Event::ReplyDue { text }),
    ]
}

// ============================================================================
// Classifier Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_classify_is_deterministic(text in ".{0,60}") {
        prop_assert_eq!(classify(&text), classify(&text));
    }

    #[test]
    fn prop_classify_ignores_case(text in "[a-zA-Z ]{0,40}") {
        prop_assert_eq!(classify(&text.to_uppercase()), classify(&text.to_lowercase()));
    }

    #[test]
    fn prop_contact_beats_pest_topic(
        prefix in "[a-z ]{0,10}",
        contact in arb_contact_keyword(),
        pest in arb_pest_keyword(),
        contact_first in any::<bool>(),
    ) {
        let text = if contact_first {
            format!("{prefix} {contact} {pest}")
        } else {
            format!("{prefix} {pest} {contact}")
        };
        prop_assert_eq!(classify(&text), ClassificationResult::ContactIntent);
    }
}

// ============================================================================
// Capture Flow Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_completion_requires_all_fields(
        answers in proptest::collection::vec(arb_non_blank_text(), 1..12)
    ) {
        let mut session = Session::new();
        capture::start(&mut session);

        for answer in &answers {
            if !session.dialog.is_capturing() {
                capture::start(&mut session);
            }
            let outcome = capture::step(&mut session, answer, "src").unwrap();
            if let Some(record) = outcome.completed {
                prop_assert!(!record.name.is_empty());
                prop_assert!(!record.phone.is_empty());
                prop_assert!(!record.issue.is_empty());
                prop_assert_eq!(session.dialog, DialogState::Idle);
                prop_assert!(session.lead.is_empty());
            }
        }
    }

    #[test]
    fn prop_three_answers_always_complete(
        name in arb_non_blank_text(),
        phone in arb_non_blank_text(),
        issue in arb_non_blank_text(),
    ) {
        let mut session = Session::new();
        capture::start(&mut session);

        prop_assert!(!capture::step(&mut session, &name, "src").unwrap().is_completed());
        prop_assert!(!capture::step(&mut session, &phone, "src").unwrap().is_completed());
        let last = capture::step(&mut session, &issue, "src").unwrap();

        let record = last.completed.unwrap();
        prop_assert_eq!(record.name, name);
        prop_assert_eq!(record.phone, phone);
        prop_assert_eq!(record.issue, issue);
    }
}

// ============================================================================
// Transition Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_blank_input_is_a_no_op(session in arb_session(), blank in arb_blank_text()) {
        let result = transition(&session, &test_context(), Event::user_message(blank));
        prop_assert_eq!(result.new_session, session);
        prop_assert!(result.effects.is_empty());
    }

    #[test]
    fn prop_window_closed_resets_without_submitting(session in arb_session()) {
        let result = transition(&session, &test_context(), Event::WindowClosed);
        prop_assert_eq!(result.new_session.dialog, DialogState::Idle);
        prop_assert!(result.new_session.lead.is_empty());
        prop_assert!(!result.effects.iter().any(is_submit));
    }

    #[test]
    fn prop_non_blank_message_is_echoed_first(session in arb_session(), text in arb_non_blank_text()) {
        let result = transition(&session, &test_context(), Event::user_message(text.clone()));
        prop_assert_eq!(result.effects.first(), Some(&Effect::show_user(text.trim())));
    }

    #[test]
    fn prop_submit_only_with_complete_lead_and_idle_session(
        session in arb_session(),
        events in proptest::collection::vec(arb_event(), 0..25),
    ) {
        let context = test_context();
        let mut current = session;

        for event in events {
            let result = transition(&current, &context, event);
            for effect in &result.effects {
                if let Effect::SubmitLead { record } = effect {
                    prop_assert!(!record.name.is_empty());
                    prop_assert!(!record.phone.is_empty());
                    prop_assert!(!record.issue.is_empty());
                    prop_assert_eq!(result.new_session.dialog, DialogState::Idle);
                    prop_assert!(result.new_session.lead.is_empty());
                }
            }
            prop_assert!(result.effects.iter().filter(|e| is_submit(e)).count() <= 1);
            current = result.new_session;
        }
    }

    #[test]
    fn prop_idle_sessions_hold_no_draft(
        events in proptest::collection::vec(arb_event(), 0..25),
    ) {
        let context = test_context();
        let mut current = Session::new();

        for event in events {
            current = transition(&current, &context, event).new_session;
            if !current.dialog.is_capturing() {
                prop_assert!(current.lead.is_empty());
            }
        }
    }
}
