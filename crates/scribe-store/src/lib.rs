pub mod jsonl;
pub mod session;

pub use jsonl::{iter_messages, JsonlSessionHandle, JsonlSessionStore, StoredMessage};
pub use session::{SessionHandle, SessionStore};

use fs2::FileExt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Return the per-user store root: `<platform data dir>/scribe/`,
/// falling back to `~/.scribe/`. Callers pass this (or their own root)
/// into an append request; nothing resolves it implicitly.
pub fn store_root() -> PathBuf {
    if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("scribe")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".scribe")
    } else {
        PathBuf::from(".scribe")
    }
}

/// Atomic write: write to a temp file in the same dir, then rename.
pub fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("no parent dir for {}", path.display()))?;
    fs::create_dir_all(parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

/// File-based exclusive lock guard. Released on drop.
pub struct LockGuard {
    _file: fs::File,
}

/// Acquire an exclusive advisory lock. Creates the lock file if needed.
pub fn lock_file(path: &Path) -> anyhow::Result<LockGuard> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)?;
    file.lock_exclusive()?;
    Ok(LockGuard { _file: file })
}
