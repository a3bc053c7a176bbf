use crate::init::ensure_transcript;
use crate::resolve::resolve_transcript_path;
use scribe_core::{injected_assistant_message, MessageRecord};
use scribe_store::SessionStore;
use std::path::PathBuf;
use thiserror::Error;

/// In-process configuration for one append call. There is no CLI surface;
/// gateway handlers construct this directly.
#[derive(Debug, Clone, Default)]
pub struct AppendRequest {
    pub session_id: String,
    pub message: String,
    pub label: Option<String>,
    pub store_root: Option<PathBuf>,
    pub transcript_file: Option<PathBuf>,
    pub create_if_missing: bool,
}

/// A completed append: the id assigned by the store and the record as
/// constructed. The record is owned by the store once written; this copy
/// is for the caller's response payload.
#[derive(Debug, Clone)]
pub struct Appended {
    pub message_id: String,
    pub message: MessageRecord,
}

/// Why an append did not happen. Injection is best-effort: callers log
/// the error and continue their primary flow.
#[derive(Debug, Error)]
pub enum AppendError {
    /// Neither a store root nor an explicit transcript file was usable.
    #[error("transcript path not resolved")]
    PathNotResolved,
    /// The transcript is absent and creation was not requested.
    #[error("transcript file not found")]
    TranscriptNotFound,
    /// Directory or file creation failed; message propagated verbatim.
    #[error("{0}")]
    Init(String),
    /// The session store rejected or failed the write.
    #[error("{0}")]
    Store(String),
}

/// Append an injected assistant message to a session's transcript.
///
/// Resolves the transcript location, initializes the file when absent and
/// `create_if_missing` is set (fails closed otherwise), builds the record,
/// and performs exactly one append through the session store. No retries;
/// a failed append is surfaced and the caller decides whether to retry.
pub fn append_assistant_message(
    store: &dyn SessionStore,
    request: &AppendRequest,
) -> Result<Appended, AppendError> {
    let path = resolve_transcript_path(
        &request.session_id,
        request.store_root.as_deref(),
        request.transcript_file.as_deref(),
    )
    .ok_or(AppendError::PathNotResolved)?;

    if !path.exists() {
        if !request.create_if_missing {
            return Err(AppendError::TranscriptNotFound);
        }
        ensure_transcript(&path, &request.session_id)
            .map_err(|err| AppendError::Init(format!("{err:#}")))?;
    }

    let record = injected_assistant_message(&request.message, request.label.as_deref());

    let mut handle = store
        .open(&path)
        .map_err(|err| AppendError::Store(format!("{err:#}")))?;
    let message_id = handle
        .append_message(&record)
        .map_err(|err| AppendError::Store(format!("{err:#}")))?;

    tracing::debug!(
        session_id = %request.session_id,
        message_id = %message_id,
        path = %path.display(),
        "injected assistant message"
    );
    Ok(Appended {
        message_id,
        message: record,
    })
}
