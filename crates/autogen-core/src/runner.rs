//! External command execution.
//!
//! Every call autogen makes to another tool (conan, premake, make, openssl,
//! dpkg-deb, action scripts, itself) is expressed as an [`Invocation`] and
//! handed to a [`CommandRunner`]. [`SystemRunner`] executes for real and
//! blocks until the child exits; [`RecordingRunner`] only records, which is
//! what `--dry-run` and the tests use.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Mutex;

use crate::error::{AutogenError, Result};

/// One external command: program, arguments and optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{arg}'")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Runs invocations to completion and reports their exit code.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32>;
}

/// Run `invocation` and turn a non-zero exit into [`AutogenError::StepFailed`].
pub fn run_step(runner: &dyn CommandRunner, invocation: &Invocation) -> Result<()> {
    tracing::info!(command = %invocation, "running");
    let code = runner.run(invocation)?;
    if code != 0 {
        tracing::warn!(command = %invocation, code, "step failed");
        return Err(AutogenError::StepFailed {
            program: invocation.program.clone(),
            code,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// SystemRunner
// ---------------------------------------------------------------------------

/// Spawns real child processes with inherited stdio.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32> {
        let program = resolve_program(&invocation.program, invocation.cwd.as_deref())?;

        let mut cmd = Command::new(&program);
        cmd.args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &invocation.cwd {
            cmd.current_dir(dir);
        }

        let status = cmd.status().map_err(|e| AutogenError::Spawn {
            program: invocation.program.clone(),
            reason: e.to_string(),
        })?;
        Ok(exit_code(status))
    }
}

/// Bare names go through PATH lookup; anything with a separator is a path,
/// taken relative to the invocation's working directory.
fn resolve_program(program: &str, cwd: Option<&Path>) -> Result<PathBuf> {
    let path = Path::new(program);
    if path.components().count() > 1 || path.is_absolute() {
        return Ok(match cwd {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        });
    }
    which::which(program).map_err(|_| AutogenError::ToolNotFound(program.to_string()))
}

#[cfg(unix)]
fn exit_code(status: std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

// ---------------------------------------------------------------------------
// RecordingRunner
// ---------------------------------------------------------------------------

/// Records invocations instead of executing them.
///
/// Every invocation succeeds unless an exit code was scripted for its
/// program with [`RecordingRunner::fail`]. When echoing, each invocation is
/// printed to stdout prefixed with `+ `.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    echo: bool,
    calls: Mutex<Vec<Invocation>>,
    exit_codes: HashMap<String, i32>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner that prints each invocation; backs `--dry-run`.
    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    /// Make every invocation of `program` exit with `code`.
    pub fn fail(mut self, program: impl Into<String>, code: i32) -> Self {
        self.exit_codes.insert(program.into(), code);
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn calls_to(&self, program: &str) -> Vec<Invocation> {
        self.calls()
            .into_iter()
            .filter(|c| c.program == program)
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32> {
        if self.echo {
            println!("+ {invocation}");
        }
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(invocation.clone());
        }
        Ok(self
            .exit_codes
            .get(&invocation.program)
            .copied()
            .unwrap_or(0))
    }
}
