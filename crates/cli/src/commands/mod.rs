//! Command handler for the docsift CLI.

pub mod process;

pub use process::ProcessCommand;
