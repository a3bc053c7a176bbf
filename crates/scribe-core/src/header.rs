use serde::{Deserialize, Serialize};

use crate::record::TRANSCRIPT_FORMAT_VERSION;

/// The first line of a transcript file. Written exactly once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionHeader {
    #[serde(rename = "type")]
    pub record_type: String,
    pub version: u32,
    pub id: String,
    /// RFC3339 UTC creation timestamp.
    pub timestamp: String,
    /// Working directory at creation time.
    pub cwd: String,
}

impl SessionHeader {
    /// Build a header for a new transcript at the current format version.
    pub fn new(session_id: &str, cwd: &str) -> Self {
        Self {
            record_type: "session".to_string(),
            version: TRANSCRIPT_FORMAT_VERSION,
            id: session_id.to_string(),
            timestamp: now_rfc3339(),
            cwd: cwd.to_string(),
        }
    }

    /// Whether a parsed header is one this code can append after.
    /// The session id is not checked: a pre-existing transcript with a
    /// different id is still a compatible target.
    pub fn is_compatible(&self) -> bool {
        self.record_type == "session" && self.version <= TRANSCRIPT_FORMAT_VERSION
    }
}

fn now_rfc3339() -> String {
    let now = time::OffsetDateTime::now_utc();
    now.format(&time::format_description::well_known::Rfc3339)
        .expect("RFC3339 formatting should not fail")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_header_fields() {
        let header = SessionHeader::new("sess-1", "/repo");
        assert_eq!(header.record_type, "session");
        assert_eq!(header.version, TRANSCRIPT_FORMAT_VERSION);
        assert_eq!(header.id, "sess-1");
        assert_eq!(header.cwd, "/repo");
        assert!(header.timestamp.contains('T'));
    }

    #[test]
    fn serializes_with_type_tag_first_class() {
        let header = SessionHeader::new("sess-1", "/repo");
        let json = serde_json::to_value(&header).unwrap();
        assert_eq!(json["type"], "session");
        assert_eq!(json["version"], TRANSCRIPT_FORMAT_VERSION);
        assert_eq!(json["id"], "sess-1");
    }

    #[test]
    fn current_version_is_compatible() {
        let header = SessionHeader::new("s", "/");
        assert!(header.is_compatible());
    }

    #[test]
    fn older_version_is_compatible() {
        let json = r#"{"type":"session","version":0,"id":"other","timestamp":"2026-01-01T00:00:00Z","cwd":"/"}"#;
        let header: SessionHeader = serde_json::from_str(json).unwrap();
        assert!(header.is_compatible());
    }

    #[test]
    fn newer_version_is_incompatible() {
        let json = r#"{"type":"session","version":99,"id":"s","timestamp":"2026-01-01T00:00:00Z","cwd":"/"}"#;
        let header: SessionHeader = serde_json::from_str(json).unwrap();
        assert!(!header.is_compatible());
    }

    #[test]
    fn non_session_record_is_incompatible() {
        let json = r#"{"type":"message","version":1,"id":"s","timestamp":"2026-01-01T00:00:00Z","cwd":"/"}"#;
        let header: SessionHeader = serde_json::from_str(json).unwrap();
        assert!(!header.is_compatible());
    }
}
