//! CLI command implementations.

pub mod add;
pub mod init;
pub mod rm;
pub mod status;
