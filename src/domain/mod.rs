pub mod entry;
pub mod identifier;
pub mod tinylog;

pub use entry::Entry;
pub use identifier::Identifier;
pub use tinylog::TinyLog;
