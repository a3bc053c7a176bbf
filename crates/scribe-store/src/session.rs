use scribe_core::MessageRecord;
use std::path::Path;

/// Storage engine owning durable append semantics for transcripts.
///
/// `open` must fail when the file is missing or its header is unreadable
/// or incompatible; it never creates files. Implementations are the sole
/// arbiter of write safety for a given transcript path.
pub trait SessionStore {
    fn open(&self, path: &Path) -> anyhow::Result<Box<dyn SessionHandle>>;
}

/// Handle to one opened transcript.
pub trait SessionHandle {
    /// Append one record, returning the assigned message id.
    /// Must fail on I/O or format error; callers trap and convert.
    fn append_message(&mut self, record: &MessageRecord) -> anyhow::Result<String>;
}
