//! Process runner for the external `chirpc` flashing utility.
//!
//! chirpc does NOT follow POSIX exit conventions: it exits with `1` after a
//! successful transfer, `2` on error, and never exits with `0`. Do not
//! "fix" the success check below to compare against zero.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::{Error, Result};

/// Exit code chirpc uses to report a completed transfer.
pub const CHIRPC_SUCCESS_CODE: i32 = 1;

/// Verdict for a process that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Success,
    /// Any code other than [`CHIRPC_SUCCESS_CODE`], including `0`.
    /// `None` means the process was killed by a signal.
    Failure(Option<i32>),
}

/// Maps a raw exit code onto chirpc's inverted convention.
pub fn interpret_exit(code: Option<i32>) -> ExitOutcome {
    match code {
        Some(CHIRPC_SUCCESS_CODE) => ExitOutcome::Success,
        other => ExitOutcome::Failure(other),
    }
}

/// Something that can execute one flashing invocation and report whether it
/// succeeded.
pub trait Flasher {
    fn run(&mut self, args: &[String]) -> Result<()>;
}

/// Runs the real flashing executable with the terminal attached.
#[derive(Debug, Clone)]
pub struct ChirpRunner {
    program: PathBuf,
}

impl ChirpRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Command line as echoed to the operator before launch.
    pub fn command_line(&self, args: &[String]) -> String {
        let mut line = self.program.display().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl Flasher for ChirpRunner {
    fn run(&mut self, args: &[String]) -> Result<()> {
        println!("Executing command: {}", self.command_line(args));
        debug!(program = %self.program.display(), ?args, "spawning flasher");

        // Inherited stdio so chirpc's progress output reaches the operator live.
        let status = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| Error::Launch {
                program: self.program.clone(),
                source,
            })?;

        debug!(code = ?status.code(), "flasher exited");

        match interpret_exit(status.code()) {
            ExitOutcome::Success => {
                info!("transfer finished");
                Ok(())
            }
            ExitOutcome::Failure(code) => Err(Error::TransferFailure { code }),
        }
    }
}
