mod append;
mod init;
mod resolve;

pub use append::{append_assistant_message, AppendError, AppendRequest, Appended};
pub use init::ensure_transcript;
pub use resolve::resolve_transcript_path;
