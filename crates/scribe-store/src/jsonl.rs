use crate::lock_file;
use crate::session::{SessionHandle, SessionStore};
use anyhow::{bail, Context};
use scribe_core::{new_message_id, MessageRecord, SessionHeader, TRANSCRIPT_FORMAT_VERSION};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// One non-header transcript line: the assigned id plus the record fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    #[serde(rename = "type")]
    pub record_type: String,
    pub id: String,
    #[serde(flatten)]
    pub message: MessageRecord,
}

/// Line-delimited JSONL session store backing one transcript per file.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonlSessionStore;

impl SessionStore for JsonlSessionStore {
    fn open(&self, path: &Path) -> anyhow::Result<Box<dyn SessionHandle>> {
        Ok(Box::new(JsonlSessionHandle::open(path)?))
    }
}

/// Open handle to one JSONL transcript. Holds no file descriptor between
/// appends; each append opens, locks, writes one line, and releases.
#[derive(Debug)]
pub struct JsonlSessionHandle {
    path: PathBuf,
}

impl JsonlSessionHandle {
    /// Open an existing transcript, validating its header line.
    ///
    /// A header carrying a different session id is accepted; only the
    /// record type and format version are checked.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            bail!("session file {} not found", path.display());
        }
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open session file {}", path.display()))?;
        let mut reader = BufReader::new(file);
        let mut first_line = String::new();
        reader
            .read_line(&mut first_line)
            .with_context(|| format!("failed to read header from {}", path.display()))?;
        if first_line.trim().is_empty() {
            bail!("session file {} has no header line", path.display());
        }
        let header: SessionHeader = serde_json::from_str(first_line.trim())
            .with_context(|| format!("failed to parse session header in {}", path.display()))?;
        if !header.is_compatible() {
            bail!(
                "unsupported session header in {} (type {}, version {}, supported up to {})",
                path.display(),
                header.record_type,
                header.version,
                TRANSCRIPT_FORMAT_VERSION
            );
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl SessionHandle for JsonlSessionHandle {
    fn append_message(&mut self, record: &MessageRecord) -> anyhow::Result<String> {
        let id = new_message_id();
        let stored = StoredMessage {
            record_type: "message".to_string(),
            id: id.clone(),
            message: record.clone(),
        };
        let line = serde_json::to_string(&stored).context("failed to encode message record")?;

        // Advisory lock scoped to this one append; the lock file sits
        // next to the transcript so separate processes contend on it.
        let _lock = lock_file(&append_lock_path(&self.path))?;
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open session file {}", self.path.display()))?;
        writeln!(file, "{line}")
            .with_context(|| format!("failed to append to {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), id = %id, "appended message record");
        Ok(id)
    }
}

fn append_lock_path(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.lock", path.display()))
}

/// Read back all message records from a transcript, in append order.
/// The header line is skipped; lines with an unknown record type are
/// tolerated and skipped rather than failing the read.
pub fn iter_messages(path: &Path) -> anyhow::Result<Vec<StoredMessage>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open session file {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut messages = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!("failed to read line {} from {}", index + 1, path.display())
        })?;
        if index == 0 || line.trim().is_empty() {
            continue;
        }
        let value: serde_json::Value = serde_json::from_str(&line).with_context(|| {
            format!("failed to parse line {} in {}", index + 1, path.display())
        })?;
        if value.get("type").and_then(|v| v.as_str()) != Some("message") {
            continue;
        }
        let stored: StoredMessage = serde_json::from_value(value).with_context(|| {
            format!("failed to decode message at line {} in {}", index + 1, path.display())
        })?;
        messages.push(stored);
    }
    Ok(messages)
}
