//! Test utilities shared across test modules
//!
//! [`MemoryGit`] stands in for the git executable: it understands the
//! `git config` shapes the store issues, keeps global and local values in
//! memory and records every argument vector it receives.

use std::{
    cell::RefCell,
    fs, io,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use tempfile::TempDir;

use crate::{
    config::StoreConfig,
    error::AppError,
    git::{CommandOutput, CommandRunner},
    store::ProfileStore,
};

/// Exit status git uses for an unset key
const MISSING_KEY: i32 = 1;
/// Exit status git uses when a key to unset does not exist
const MISSING_UNSET_KEY: i32 = 5;
/// Exit status git uses when a section to remove does not exist
const MISSING_SECTION: i32 = 128;

#[derive(Default)]
pub struct MemoryGit {
    global: RefCell<Vec<(String, String)>>,
    local: RefCell<Vec<(String, String)>>,
    calls: RefCell<Vec<Vec<String>>>,
    failure: RefCell<Option<(String, i32)>>,
    backing_file: RefCell<Option<PathBuf>>,
}

impl MemoryGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every argument vector received so far
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    /// Global value of `key`
    pub fn get(&self, key: &str) -> Option<String> {
        lookup(&self.global.borrow(), key)
    }

    pub fn set_global(&self, key: &str, value: &str) {
        upsert(&mut self.global.borrow_mut(), key, value);
        self.render();
    }

    /// Makes any call containing `arg` exit with `code`
    pub fn fail_on(&self, arg: &str, code: i32) {
        *self.failure.borrow_mut() = Some((arg.to_string(), code));
    }

    /// Mirrors the global values into `path` in git's file format
    pub fn attach_file(&self, path: PathBuf) {
        *self.backing_file.borrow_mut() = Some(path);
        self.render();
    }

    fn render(&self) {
        let Some(path) = self.backing_file.borrow().clone() else {
            return;
        };
        let mut text = String::new();
        let mut current_section: Option<String> = None;
        for (key, value) in self.global.borrow().iter() {
            let (section, variable) = key.rsplit_once('.').unwrap_or((key.as_str(), ""));
            if current_section.as_deref() != Some(section) {
                match section.split_once('.') {
                    Some((head, sub)) => text.push_str(&format!("[{} \"{}\"]\n", head, sub)),
                    None => text.push_str(&format!("[{}]\n", section)),
                }
                current_section = Some(section.to_string());
            }
            text.push_str(&format!("\t{} = {}\n", variable, value));
        }
        fs::write(path, text).unwrap();
    }

    fn listing(&self) -> String {
        self.global
            .borrow()
            .iter()
            .chain(self.local.borrow().iter())
            .map(|(key, value)| format!("{}={}\n", key, value))
            .collect()
    }
}

fn lookup(entries: &[(String, String)], key: &str) -> Option<String> {
    entries
        .iter()
        .find(|(existing, _)| existing == key)
        .map(|(_, value)| value.clone())
}

/// Replaces the value in place so sections keep their first position
fn upsert(entries: &mut Vec<(String, String)>, key: &str, value: &str) {
    match entries.iter_mut().find(|(existing, _)| existing == key) {
        Some(entry) => entry.1 = value.to_string(),
        None => entries.push((key.to_string(), value.to_string())),
    }
}

impl CommandRunner for MemoryGit {
    fn run(&self, args: &[String]) -> Result<CommandOutput, AppError> {
        self.calls.borrow_mut().push(args.to_vec());

        if let Some((arg, code)) = self.failure.borrow().as_ref() {
            if args.iter().any(|a| a == arg) {
                return Ok(CommandOutput::failure(*code));
            }
        }

        assert_eq!(args.first().map(String::as_str), Some("config"));
        let global = args.get(1).map(String::as_str) == Some("--global");
        let rest: Vec<&str> = args[if global { 2 } else { 1 }..]
            .iter()
            .map(String::as_str)
            .collect();

        let output = match rest.as_slice() {
            ["--list"] => CommandOutput::success(self.listing()),
            ["--remove-section", section] => {
                let prefix = format!("{}.", section);
                let mut entries = self.global.borrow_mut();
                let before = entries.len();
                entries.retain(|(key, _)| !key.starts_with(&prefix));
                if entries.len() == before {
                    CommandOutput::failure(MISSING_SECTION)
                } else {
                    CommandOutput::success("")
                }
            }
            ["--unset", key] => {
                let target = if global { &self.global } else { &self.local };
                let mut entries = target.borrow_mut();
                let before = entries.len();
                entries.retain(|(existing, _)| existing != key);
                if entries.len() == before {
                    CommandOutput::failure(MISSING_UNSET_KEY)
                } else {
                    CommandOutput::success("")
                }
            }
            [key] => {
                let value = if global {
                    self.get(key)
                } else {
                    lookup(&self.local.borrow(), key).or_else(|| self.get(key))
                };
                match value {
                    Some(value) => CommandOutput::success(format!("{}\n", value)),
                    None => CommandOutput::failure(MISSING_KEY),
                }
            }
            [key, value] => {
                let target = if global { &self.global } else { &self.local };
                upsert(&mut target.borrow_mut(), key, value);
                CommandOutput::success("")
            }
            other => panic!("unexpected git invocation: {:?}", other),
        };

        self.render();
        Ok(output)
    }
}

/// Builds a store over `git` whose config file lives in a fresh temp directory
///
/// The file is rewritten from the global values after every git call.
pub fn memory_store(git: MemoryGit) -> (ProfileStore<MemoryGit>, TempDir) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".gitconfig");
    git.attach_file(path.clone());
    let config = StoreConfig::default().with_config_path(path).with_quiet(true);
    let store = ProfileStore::with_runner(git, config);
    (store, dir)
}

/// In-memory sink for formatted log lines
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with every tracing event captured, returning its result and the log text
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();
    let value = tracing::subscriber::with_default(subscriber, f);
    (value, buffer.contents())
}
