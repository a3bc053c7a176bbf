use std::path::{Path, PathBuf};

/// Compute the canonical transcript path for a session.
///
/// Returns `None` when neither a store root nor an explicit transcript
/// file is configured (the caller did not enable persistence, which is
/// not an error), and on any malformed input. Pure path computation; recomputed
/// on every append because configuration may vary per call.
pub fn resolve_transcript_path(
    session_id: &str,
    store_root: Option<&Path>,
    transcript_file: Option<&Path>,
) -> Option<PathBuf> {
    if store_root.is_none() && transcript_file.is_none() {
        tracing::debug!(session_id, "no transcript location configured, skipping");
        return None;
    }
    if !is_valid_session_id(session_id) {
        tracing::debug!(session_id, "malformed session id, cannot resolve transcript");
        return None;
    }

    // An explicit file takes precedence but still goes through the same
    // canonicalization as store-root paths.
    if let Some(file) = transcript_file {
        return absolutize(file);
    }
    let sessions_dir = store_root?.join("sessions");
    absolutize(&sessions_dir.join(format!("{session_id}.jsonl")))
}

/// Session ids are opaque, but ids that would escape the sessions
/// directory are rejected.
fn is_valid_session_id(id: &str) -> bool {
    !id.is_empty() && !id.contains('/') && !id.contains('\\') && id != "." && id != ".."
}

fn absolutize(path: &Path) -> Option<PathBuf> {
    if path.is_absolute() {
        Some(path.to_path_buf())
    } else {
        let cwd = std::env::current_dir().ok()?;
        Some(cwd.join(path))
    }
}
