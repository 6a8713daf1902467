//! Command implementations for the Forelese CLI.

mod ask;
mod init;
mod list;
mod serve;
mod transcribe;

pub use ask::run_ask;
pub use init::run_init;
pub use list::run_list;
pub use serve::run_serve;
pub use transcribe::run_transcribe;
