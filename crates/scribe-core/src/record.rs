use serde::{Deserialize, Serialize};

/// Current format version for new transcripts.
pub const TRANSCRIPT_FORMAT_VERSION: u32 = 1;

/// Message ID format: `msg_<ulid>`
pub type MessageId = String;

/// Fixed role for records produced by this subsystem.
pub const ROLE_ASSISTANT: &str = "assistant";

/// Fixed stop reason for injected messages.
pub const STOP_REASON_STOP: &str = "stop";

/// Provenance tags marking a record as gateway-injected rather than
/// produced by a live model call. Downstream usage accounting filters
/// on these.
pub mod provenance {
    pub const API: &str = "synthetic";
    pub const PROVIDER: &str = "gateway";
    pub const MODEL: &str = "gateway-injected";
}

/// One content block inside a message record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: String,
}

impl TextBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            block_type: "text".to_string(),
            text: text.into(),
        }
    }
}

/// Token counters for one message. Injected messages consume no model
/// tokens, so every counter is written as an explicit zero, not omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub input: u64,
    pub output: u64,
    pub cache_read: u64,
    pub cache_write: u64,
    pub total_tokens: u64,
    pub cost: UsageCost,
}

/// Dollar-cost counters nested under `usage.cost`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsageCost {
    pub input: f64,
    pub output: f64,
    pub cache_read: f64,
    pub cache_write: f64,
    pub total: f64,
}

/// One appended transcript entry (one JSONL line after the header).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub role: String,
    pub content: Vec<TextBlock>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub stop_reason: String,
    pub usage: Usage,
    pub api: String,
    pub provider: String,
    pub model: String,
}

pub fn new_message_id() -> MessageId {
    format!("msg_{}", ulid::Ulid::new().to_string().to_lowercase())
}

fn now_unix_millis() -> i64 {
    (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Build a fully-populated injected assistant message.
///
/// When `label` is supplied the content text is the label rendered as a
/// bracketed prefix line, a blank line, then the message; otherwise the
/// message verbatim.
pub fn injected_assistant_message(message: &str, label: Option<&str>) -> MessageRecord {
    let text = match label {
        Some(label) => format!("[{label}]\n\n{message}"),
        None => message.to_string(),
    };
    MessageRecord {
        role: ROLE_ASSISTANT.to_string(),
        content: vec![TextBlock::text(text)],
        timestamp: now_unix_millis(),
        stop_reason: STOP_REASON_STOP.to_string(),
        usage: Usage::default(),
        api: provenance::API.to_string(),
        provider: provenance::PROVIDER.to_string(),
        model: provenance::MODEL.to_string(),
    }
}
