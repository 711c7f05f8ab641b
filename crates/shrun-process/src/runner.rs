//! Shell-command execution: spawn, wait, report.

use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::Command;

use nix::sys::signal::{signal, SigHandler};
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::Pid;
use serde::{Deserialize, Serialize};
use shrun_common::{ProcessError, ProcessResult};
use tracing::{debug, error, warn};

use crate::outcome::{composite_status, ChildOutcome, STATUS_NO_COMMAND};
use crate::signal_guard::{SignalGuard, GUARDED_SIGNALS};

/// Configuration for [`ShellRunner`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Shell executable used to interpret command lines.
    pub shell_path: PathBuf,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            shell_path: PathBuf::from("/bin/bash"),
        }
    }
}

/// Runs one shell command synchronously and reports its composite status.
///
/// Exactly one child exists per call, and the call blocks until that child
/// is reaped. There is no timeout and no cancellation.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    config: ShellConfig,
}

impl ShellRunner {
    /// Create a runner with the default shell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner with an explicit configuration.
    pub fn with_config(config: ShellConfig) -> Self {
        Self { config }
    }

    /// Execute `command` through the shell and return its composite status.
    ///
    /// `SIGINT` and `SIGQUIT` are ignored in the calling process while the
    /// child runs and restored to their default disposition on return, on
    /// every path. The child gets the default disposition back before the
    /// shell image is executed, so the command itself stays killable.
    ///
    /// # Returns
    ///
    /// * [`STATUS_NO_COMMAND`] when `command` is `None` (nothing is spawned)
    /// * otherwise the [`composite_status`] of the child's outcome
    ///
    /// Every failure maps to an integer; this function does not panic and
    /// does not return an error type.
    pub fn run(&self, command: Option<&str>) -> i32 {
        let _guard = match SignalGuard::acquire() {
            Ok(guard) => Some(guard),
            Err(e) => {
                warn!("Proceeding without signal guard: {}", e);
                None
            }
        };

        let Some(command) = command else {
            debug!("No command given, nothing spawned");
            return STATUS_NO_COMMAND;
        };

        match self.spawn_and_wait(command) {
            Ok(outcome) => composite_status(outcome),
            Err(e) => {
                error!("{}", e);
                0
            }
        }
    }

    /// Spawn `<shell> -c <command>` and block until the child is reaped.
    ///
    /// A spawn failure is an outcome, not an error; only a failed wait
    /// produces `Err`.
    fn spawn_and_wait(&self, command: &str) -> ProcessResult<ChildOutcome> {
        let mut cmd = Command::new(&self.config.shell_path);
        cmd.arg("-c").arg(command);
        unsafe {
            cmd.pre_exec(|| {
                for sig in GUARDED_SIGNALS {
                    signal(sig, SigHandler::SigDfl).map_err(std::io::Error::from)?;
                }
                Ok(())
            });
        }

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(
                    "Failed to spawn {} for {:?}: {}",
                    self.config.shell_path.display(),
                    command,
                    e
                );
                return Ok(ChildOutcome::SpawnFailed);
            }
        };

        let pid = Pid::from_raw(child.id() as i32);
        match waitpid(pid, None) {
            Ok(WaitStatus::Exited(_, code)) => {
                debug!("Child {} exited with code {}", pid, code);
                Ok(ChildOutcome::Exited(code))
            }
            Ok(WaitStatus::Signaled(_, sig, core_dumped)) => {
                debug!(
                    "Child {} terminated by {} (core dumped: {})",
                    pid, sig, core_dumped
                );
                Ok(ChildOutcome::Signaled(sig))
            }
            Ok(WaitStatus::Stopped(_, sig)) => {
                debug!("Child {} stopped by {}", pid, sig);
                Ok(ChildOutcome::Stopped(sig))
            }
            Ok(other) => Err(ProcessError::wait_failed(format!(
                "unexpected wait status for child {}: {:?}",
                pid, other
            ))),
            Err(errno) => Err(ProcessError::wait_failed(format!(
                "waitpid on child {}: {}",
                pid, errno
            ))),
        }
    }
}

/// Execute `command` with the default shell configuration.
pub fn run_shell(command: Option<&str>) -> i32 {
    ShellRunner::new().run(command)
}
