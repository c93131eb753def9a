//! Service configuration from the environment

use crate::submitter::DEFAULT_LEAD_ENDPOINT;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(800);
pub const DEFAULT_LEAD_SOURCE: &str = "Website Chatbot Lead - Jelco Pest Solutions";
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// Runtime settings for the chat service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub port: u16,
    /// Where completed leads are posted
    pub lead_endpoint: String,
    /// Simulated typing latency for ordinary replies
    pub reply_delay: Duration,
    /// Label stamped on every lead
    pub lead_source: String,
    /// How long a session may sit without events or subscribers before it
    /// is reclaimed
    pub session_ttl: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            lead_endpoint: DEFAULT_LEAD_ENDPOINT.to_string(),
            reply_delay: DEFAULT_REPLY_DELAY,
            lead_source: DEFAULT_LEAD_SOURCE.to_string(),
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            port: parse_or(&lookup, "PEST_CHAT_PORT", defaults.port),
            lead_endpoint: lookup("PEST_CHAT_LEAD_ENDPOINT")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.lead_endpoint),
            reply_delay: Duration::from_millis(parse_or(
                &lookup,
                "PEST_CHAT_REPLY_DELAY_MS",
                u64::try_from(defaults.reply_delay.as_millis()).unwrap_or(u64::MAX),
            )),
            lead_source: lookup("PEST_CHAT_LEAD_SOURCE")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.lead_source),
            session_ttl: Duration::from_secs(parse_or(
                &lookup,
                "PEST_CHAT_SESSION_TTL_SECS",
                defaults.session_ttl.as_secs(),
            )),
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring unparseable setting");
            default
        }),
    }
}
