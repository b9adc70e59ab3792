//! CLI subcommands

pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod reset;
pub mod serve;
