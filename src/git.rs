use std::{
    ffi::OsStr,
    io::Read,
    path::PathBuf,
    process::{Child, Command, Stdio},
    thread,
    time::{Duration, Instant},
};

use tracing::{debug, warn};

use crate::error::AppError;

/// How long a single git invocation may run
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);
/// Interval between exit-status polls
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Which git config file a read or write targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// User-wide config (`--global`)
    Global,
    /// Repository config
    Local,
}

impl Scope {
    pub fn from_global(global: bool) -> Self {
        if global { Scope::Global } else { Scope::Local }
    }

    /// `git config` prefix for this scope
    pub fn config_args(self) -> &'static [&'static str] {
        match self {
            Scope::Global => &["config", "--global"],
            Scope::Local => &["config"],
        }
    }

    /// Builds a full argument vector for this scope
    ///
    /// # Arguments
    /// * `rest` - Arguments following the `config` prefix
    pub fn args(self, rest: &[&str]) -> Vec<String> {
        let mut args: Vec<String> = self.config_args().iter().map(|arg| arg.to_string()).collect();
        args.extend(rest.iter().map(|arg| arg.to_string()));
        args
    }
}

/// Exit status and decoded stdout of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
        }
    }

    pub fn failure(code: i32) -> Self {
        Self {
            status: Some(code),
            stdout: String::new(),
        }
    }
}

/// Runs git with the given arguments
pub trait CommandRunner {
    fn run(&self, args: &[String]) -> Result<CommandOutput, AppError>;

    /// Human readable command line, used in logs and errors
    fn describe(&self, args: &[String]) -> String {
        format!("git {}", args.join(" "))
    }
}

/// Runs the real git executable as a child process
#[derive(Debug, Clone)]
pub struct GitRunner {
    program: PathBuf,
    global_config: Option<PathBuf>,
    timeout: Duration,
}

impl GitRunner {
    /// # Arguments
    /// * `program` - Git executable
    /// * `global_config` - File exported as `GIT_CONFIG_GLOBAL` to every child
    pub fn new(program: impl Into<PathBuf>, global_config: Option<PathBuf>) -> Self {
        Self {
            program: program.into(),
            global_config,
            timeout: COMMAND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn spawn(&self, args: &[String]) -> Result<Child, AppError> {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        if let Some(path) = &self.global_config {
            command.env("GIT_CONFIG_GLOBAL", path);
        }
        command.spawn().map_err(|source| AppError::Spawn {
            program: self.program.display().to_string(),
            source,
        })
    }
}

impl CommandRunner for GitRunner {
    fn run(&self, args: &[String]) -> Result<CommandOutput, AppError> {
        debug!(command = %self.describe(args), "running git");
        let start = Instant::now();
        let mut child = self.spawn(args)?;

        // Drain stdout on its own thread so a large listing cannot fill the pipe
        let mut stdout_pipe = child.stdout.take();
        let reader = thread::spawn(move || -> std::io::Result<Vec<u8>> {
            let mut buffer: Vec<u8> = Vec::new();
            if let Some(pipe) = stdout_pipe.as_mut() {
                pipe.read_to_end(&mut buffer)?;
            }
            Ok(buffer)
        });

        let status = loop {
            match child.try_wait()? {
                Some(status) => break status,
                None if start.elapsed() > self.timeout => {
                    warn!(command = %self.describe(args), "git timed out, terminating");
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = reader.join();
                    return Err(AppError::ProcessTimeout {
                        command: self.describe(args),
                        timeout: self.timeout,
                    });
                }
                None => thread::sleep(POLL_INTERVAL),
            }
        };

        let bytes = reader
            .join()
            .map_err(|_| std::io::Error::other("stdout reader panicked"))??;
        let stdout = String::from_utf8(bytes)?;
        debug!(
            status = ?status.code(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "git finished"
        );

        Ok(CommandOutput {
            status: status.code(),
            stdout,
        })
    }

    fn describe(&self, args: &[String]) -> String {
        let program: &OsStr = self.program.as_os_str();
        format!("{} {}", program.to_string_lossy(), args.join(" "))
    }
}
