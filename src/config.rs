use std::path::PathBuf;

/// Default git executable
pub const DEFAULT_GIT_PROGRAM: &str = "git";

/// Settings a [`ProfileStore`](crate::store::ProfileStore) is built from
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Git config file to use instead of `~/.gitconfig`
    pub config_path: Option<PathBuf>,
    /// Suppress diagnostics
    pub quiet: bool,
    /// Git executable to invoke
    pub git_program: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            quiet: false,
            git_program: PathBuf::from(DEFAULT_GIT_PROGRAM),
        }
    }
}

impl StoreConfig {
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_git_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.git_program = program.into();
        self
    }
}
