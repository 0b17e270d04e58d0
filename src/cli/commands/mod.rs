//! CLI command implementations.

pub mod agents;
pub mod doctor;
pub mod hook;
pub mod init;
pub mod run;
