//! CLI command implementations

pub mod format;
pub mod init;
