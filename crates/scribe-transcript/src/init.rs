use anyhow::Context;
use scribe_core::SessionHeader;
use std::path::Path;

/// Guarantee a transcript file exists at `path` with a valid session
/// header as its sole first line.
///
/// Idempotent: an existing file is left untouched, byte for byte. A new
/// file is produced with one atomic write (temp file + rename), so a
/// concurrent reader never observes a partially created transcript.
pub fn ensure_transcript(path: &Path, session_id: &str) -> anyhow::Result<()> {
    if path.exists() {
        return Ok(());
    }
    let cwd = std::env::current_dir()
        .context("failed to resolve current directory")?
        .to_string_lossy()
        .to_string();
    let header = SessionHeader::new(session_id, &cwd);
    let line = serde_json::to_string(&header).context("failed to encode session header")?;
    scribe_store::write_atomic(path, format!("{line}\n").as_bytes())
        .with_context(|| format!("failed to create transcript {}", path.display()))?;
    tracing::debug!(path = %path.display(), session_id, "initialized transcript");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::TRANSCRIPT_FORMAT_VERSION;

    #[test]
    fn creates_file_with_single_header_line() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sessions").join("sess-1.jsonl");
        ensure_transcript(&path, "sess-1").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1);

        let header: SessionHeader = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(header.record_type, "session");
        assert_eq!(header.version, TRANSCRIPT_FORMAT_VERSION);
        assert_eq!(header.id, "sess-1");
        assert!(!header.cwd.is_empty());
    }

    #[test]
    fn second_call_leaves_header_byte_identical() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sess-1.jsonl");
        ensure_transcript(&path, "sess-1").unwrap();
        let first = std::fs::read_to_string(&path).unwrap();

        ensure_transcript(&path, "sess-1").unwrap();
        let second = std::fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.lines().count(), 1);
    }

    #[test]
    fn existing_file_is_untouched_even_with_other_content() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sess-1.jsonl");
        std::fs::write(&path, "not a header\n").unwrap();
        ensure_transcript(&path, "sess-1").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not a header\n");
    }

    #[test]
    fn create_fails_when_parent_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("sessions");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("sess-1.jsonl");
        assert!(ensure_transcript(&path, "sess-1").is_err());
    }
}
