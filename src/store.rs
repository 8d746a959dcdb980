use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{
    config::StoreConfig,
    error::AppError,
    git::{CommandRunner, GitRunner, Scope},
    profile::Profile,
    storage::{is_config_file, load_profile_sections, resolve_config_path},
};

/// Key prefix of the active git identity
pub const DEFAULT_PROFILE_KEY: &str = "user";
/// Key recording which profile was activated in a scope
pub const CURRENT_PROFILE_KEY: &str = "current-profile.name";
/// Section namespace profiles are stored under
const PROFILE_NAMESPACE: &str = "profile";
/// `git config` exit status for a key that is not set
const KEY_NOT_FOUND_EXIT_CODE: i32 = 1;
/// Exit code reported when git was killed by a signal
const SIGNAL_EXIT_CODE: i32 = 1;

/// Key prefix (and section name) a stored profile lives under: `profile.<name>`
pub fn profile_section(name: &str) -> String {
    format!("{}.{}", PROFILE_NAMESPACE, name)
}

fn strip_line_ending(mut value: String) -> String {
    if value.ends_with('\n') {
        value.pop();
        if value.ends_with('\r') {
            value.pop();
        }
    }
    value
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Invocation {
    /// Lookups, where an unset key is an empty answer
    Read,
    Write,
}

/// Profile operations on top of git's config store
pub struct ProfileStore<R: CommandRunner = GitRunner> {
    runner: R,
    config: StoreConfig,
    config_path: PathBuf,
}

impl ProfileStore<GitRunner> {
    /// Creates a store backed by the git executable named in `config`
    pub fn new(config: StoreConfig) -> Self {
        let runner = GitRunner::new(config.git_program.clone(), config.config_path.clone());
        Self::with_runner(runner, config)
    }
}

impl<R: CommandRunner> ProfileStore<R> {
    /// Creates a store that runs git through `runner`
    pub fn with_runner(runner: R, config: StoreConfig) -> Self {
        let config_path: PathBuf = resolve_config_path(config.config_path.as_deref());
        debug!(path = %config_path.display(), "resolved git config file");
        Self {
            runner,
            config,
            config_path,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Backing file used by [`ProfileStore::list_profiles`]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Checks that the backing config file exists
    pub fn has_valid_store(&self) -> bool {
        let valid = is_config_file(&self.config_path);
        if !valid && !self.config.quiet {
            warn!(path = %self.config_path.display(), "git config file not found");
        }
        valid
    }

    /// Checks if a profile with this name is present in the config listing
    ///
    /// # Arguments
    /// * `name` - Profile name, matched as the literal text `profile.<name>`
    pub fn check_profile_exists(&self, name: &str) -> Result<bool, AppError> {
        let properties: String = self.invoke(
            vec!["config".to_string(), "--list".to_string()],
            Invocation::Read,
        )?;
        if properties.is_empty() {
            return Ok(false);
        }
        Ok(properties.contains(&profile_section(name)))
    }

    /// Reads `<name>.name`, `<name>.email` and `<name>.signingkey` from the global config
    ///
    /// Unset keys become empty fields.
    ///
    /// # Arguments
    /// * `name` - Key prefix, `user` for the active identity
    pub fn get_profile(&self, name: &str) -> Result<Profile, AppError> {
        let user_name: String = self.read_key(Scope::Global, &format!("{}.name", name))?;
        let email: String = self.read_key(Scope::Global, &format!("{}.email", name))?;
        let signing_key: String = self.read_key(Scope::Global, &format!("{}.signingkey", name))?;

        Ok(Profile::new(name, user_name, email, Some(signing_key)))
    }

    /// Reads the identity git currently commits with
    pub fn active_identity(&self) -> Result<Profile, AppError> {
        self.get_profile(DEFAULT_PROFILE_KEY)
    }

    /// Makes `profile` the active identity in `scope` and records its name
    pub fn set_profile(&self, profile: &Profile, scope: Scope) -> Result<(), AppError> {
        self.write_key(scope, "user.name", profile.user_name())?;
        self.write_key(scope, "user.email", profile.email())?;
        if let Some(key) = profile.signing_key() {
            self.write_key(scope, "user.signingkey", key)?;
        }
        self.write_key(scope, CURRENT_PROFILE_KEY, profile.name())?;

        info!(profile = profile.name(), ?scope, "activated profile");
        Ok(())
    }

    /// Writes the profile fields under `profile.<name>` in the global config
    ///
    /// Does not check for an existing profile of the same name.
    pub fn add_profile(&self, profile: &Profile) -> Result<(), AppError> {
        let section: String = profile_section(profile.name());
        self.write_key(Scope::Global, &format!("{}.name", section), profile.user_name())?;
        self.write_key(Scope::Global, &format!("{}.email", section), profile.email())?;
        if let Some(key) = profile.signing_key() {
            self.write_key(Scope::Global, &format!("{}.signingkey", section), key)?;
        }

        info!(profile = profile.name(), "stored profile");
        Ok(())
    }

    /// Removes the `[profile "<name>"]` section from the global config
    pub fn delete_profile(&self, name: &str) -> Result<(), AppError> {
        let section: String = profile_section(name);
        self.invoke(
            Scope::Global.args(&["--remove-section", &section]),
            Invocation::Write,
        )?;

        info!(profile = name, "deleted profile");
        Ok(())
    }

    /// Removes a single key from `scope`
    pub fn unset_key(&self, scope: Scope, key: &str) -> Result<(), AppError> {
        self.invoke(scope.args(&["--unset", key]), Invocation::Write)?;
        Ok(())
    }

    /// Lists profile names in the order their sections appear in the config file
    pub fn list_profiles(&self) -> Result<Vec<String>, AppError> {
        load_profile_sections(&self.config_path)
    }

    /// Name of the profile activated in `scope`, empty if none
    pub fn get_current(&self, scope: Scope) -> Result<String, AppError> {
        let current: String = self.invoke(scope.args(&[CURRENT_PROFILE_KEY]), Invocation::Read)?;
        Ok(current.trim().to_string())
    }

    fn read_key(&self, scope: Scope, key: &str) -> Result<String, AppError> {
        let value: String = self.invoke(scope.args(&[key]), Invocation::Read)?;
        Ok(strip_line_ending(value))
    }

    fn write_key(&self, scope: Scope, key: &str, value: &str) -> Result<(), AppError> {
        self.invoke(scope.args(&[key, value]), Invocation::Write)?;
        Ok(())
    }

    /// Runs git and turns its exit status into a result
    fn invoke(&self, args: Vec<String>, invocation: Invocation) -> Result<String, AppError> {
        let output = self.runner.run(&args)?;
        match output.status {
            Some(0) => Ok(output.stdout),
            Some(KEY_NOT_FOUND_EXIT_CODE)
                if invocation == Invocation::Read && output.stdout.is_empty() =>
            {
                debug!(command = %self.runner.describe(&args), "key not set");
                Ok(String::new())
            }
            status => {
                let code: i32 = status.unwrap_or(SIGNAL_EXIT_CODE);
                warn!(command = %self.runner.describe(&args), code, "git failed");
                Err(AppError::ProcessFailed {
                    command: self.runner.describe(&args),
                    code,
                })
            }
        }
    }
}
