//! Equivalence checking against the platform's `system(3)`.
//!
//! The reference call is the oracle: for every scenario, the runner's
//! composite status must equal the integer `system(3)` returns for the same
//! command line. The raw libc call is used directly so the oracle shares no
//! code with the runner under test.

use std::ffi::CString;

use shrun_process::ShellRunner;
use shrun_resource_limits::{rlim_t, LimitGuard, Resource};
use tracing::{error, info, warn};

/// Canned scenarios covering every status-table row the reference call can
/// also reach. The absent command comes last.
pub(crate) const SCENARIOS: &[Option<&str>] = &[
    Some(""),
    Some("true"),
    Some("false"),
    Some("ls / > /dev/null"),
    Some("exec 2>/dev/null; plop"),
    Some("kill -HUP $$"),
    Some("kill -INT $$"),
    Some("kill -QUIT $$"),
    Some("kill -INT $PPID"),
    Some("kill -QUIT $PPID"),
    None,
];

/// Composite status reported by the platform's `system(3)`.
///
/// A null pointer asks whether a shell is available, mirroring the absent
/// command on the runner side.
fn reference_status(command: Option<&str>) -> i32 {
    match command {
        None => unsafe { libc::system(std::ptr::null()) },
        Some(cmd) => match CString::new(cmd) {
            Ok(cmd) => unsafe { libc::system(cmd.as_ptr()) },
            Err(_) => {
                warn!("Command contains an interior NUL byte; reference call skipped");
                -1
            }
        },
    }
}

/// Compare the runner against the reference call for one command.
///
/// Logs one `OK`/`FAIL` line carrying both statuses; returns whether they
/// were equal.
pub fn verify(runner: &ShellRunner, command: Option<&str>) -> bool {
    let reference = reference_status(command);
    let actual = runner.run(command);
    let label = command.unwrap_or("(none)");

    if reference == actual {
        info!("OK   {:?} ({}, {})", label, reference, actual);
        true
    } else {
        error!("FAIL {:?} ({}, {})", label, reference, actual);
        false
    }
}

/// Run [`verify`] with a soft resource limit lowered for the duration.
///
/// A failure to install the limit is logged and the scenario skipped; the
/// driver keeps going either way.
pub fn verify_with_limit(
    runner: &ShellRunner,
    resource: Resource,
    value: rlim_t,
    command: &str,
) -> bool {
    let _guard = match LimitGuard::lower(resource, value) {
        Ok(guard) => guard,
        Err(e) => {
            warn!("Skipping {:?} scenario: {}", resource, e);
            return true;
        }
    };

    verify(runner, Some(command))
}

/// Run the built-in scenario table, then force a spawn failure and an exec
/// failure through resource limits. Returns the number of mismatches.
pub fn run_builtin_scenarios(runner: &ShellRunner) -> usize {
    let mut mismatches = 0;

    for scenario in SCENARIOS {
        if !verify(runner, *scenario) {
            mismatches += 1;
        }
    }

    if !verify_with_limit(runner, Resource::RLIMIT_NPROC, 0, ": failed fork") {
        mismatches += 1;
    }
    if !verify_with_limit(runner, Resource::RLIMIT_AS, 0, ": failed exec") {
        mismatches += 1;
    }

    mismatches
}
