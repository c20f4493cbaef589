//! Command handlers for the ragassist CLI.

pub mod ask;
pub mod index;
pub mod ingest;
pub mod serve;

pub use ask::{AskCommand, ChatCommand};
pub use index::{BuildIndexCommand, CleanCommand, StatsCommand};
pub use ingest::IngestCommand;
pub use serve::ServeCommand;
