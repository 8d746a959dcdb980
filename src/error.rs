use std::{path::PathBuf, time::Duration};

use thiserror::Error;

/// Exit code used when git does not finish within the command timeout
pub const TIMEOUT_EXIT_CODE: i32 = -1;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Error during file I/O operations
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Error during JSON serialization
    #[error("json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    /// Error when user input fails.
    #[error("inquire error: {0}")]
    Inquire(#[from] inquire::InquireError),
    /// Error during UTF-8 conversion of git output.
    #[error("UTF-8 error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
    /// Git executable could not be started
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// Git did not exit before the timeout elapsed
    #[error("'{command}' timed out after {}s", .timeout.as_secs())]
    ProcessTimeout { command: String, timeout: Duration },
    /// Git exited with a non-zero status
    #[error("'{command}' failed with exit code {code}")]
    ProcessFailed { command: String, code: i32 },
    /// The git config file does not exist
    #[error("no git config file found at '{}'", .0.display())]
    StoreNotFound(PathBuf),
    /// Error during input validation.
    #[error("validation error: {0}")]
    Validation(String),
    /// Profile name is already taken
    #[error("profile already exists: '{0}'")]
    ProfileExists(String),
    /// Specific profile is not stored
    #[error("profile not found: '{0}'")]
    ProfileNotFound(String),
}

impl AppError {
    /// Process exit code for this error.
    ///
    /// Git failures propagate git's own exit code, timeouts use
    /// [`TIMEOUT_EXIT_CODE`], everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::ProcessFailed { code, .. } => *code,
            AppError::ProcessTimeout { .. } => TIMEOUT_EXIT_CODE,
            _ => 1,
        }
    }
}
