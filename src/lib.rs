//! Named Git identity profiles kept in git's own config file.
//!
//! Profiles live in `[profile "<name>"]` sections of the global config and
//! are activated by copying their fields into `user.*`. All reads and writes
//! go through the `git config` command, see [`store::ProfileStore`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod menu;
pub mod profile;
pub mod storage;
pub mod store;
pub mod validation;

#[cfg(test)]
pub mod test_utils;

pub use config::StoreConfig;
pub use error::AppError;
pub use git::Scope;
pub use profile::Profile;
pub use store::ProfileStore;
