//! Scoped suppression of keyboard-generated signals.
//!
//! While a foreground child runs, interrupt and quit keystrokes are aimed at
//! the whole process group; the caller must stay alive long enough to reap
//! the child and report its status.

use nix::sys::signal::{signal, SigHandler, Signal};
use shrun_common::{ProcessError, ProcessResult};
use tracing::warn;

/// Signals ignored for the duration of a run.
pub(crate) const GUARDED_SIGNALS: [Signal; 2] = [Signal::SIGINT, Signal::SIGQUIT];

/// RAII guard that ignores `SIGINT` and `SIGQUIT` process-wide.
///
/// Dropping the guard restores the default disposition for both signals.
/// Restoration runs on every exit path of the caller, including early
/// returns, which is the point of making this a guard rather than a pair of
/// calls.
pub struct SignalGuard {
    _private: (),
}

impl SignalGuard {
    /// Ignore `SIGINT` and `SIGQUIT` until the returned guard is dropped.
    pub fn acquire() -> ProcessResult<Self> {
        let guard = Self { _private: () };
        for sig in GUARDED_SIGNALS {
            unsafe { signal(sig, SigHandler::SigIgn) }.map_err(|errno| {
                ProcessError::signal_disposition(sig.to_string(), errno.to_string())
            })?;
        }
        Ok(guard)
    }
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        for sig in GUARDED_SIGNALS {
            if let Err(errno) = unsafe { signal(sig, SigHandler::SigDfl) } {
                warn!("Failed to restore {} disposition: {}", sig, errno);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_guard_ignores_then_restores() {
        let guard = SignalGuard::acquire().unwrap();

        // Re-installing the same handler returns the one the guard set.
        for sig in GUARDED_SIGNALS {
            let previous = unsafe { signal(sig, SigHandler::SigIgn) }.unwrap();
            assert_eq!(previous, SigHandler::SigIgn);
        }

        drop(guard);

        for sig in GUARDED_SIGNALS {
            let previous = unsafe { signal(sig, SigHandler::SigDfl) }.unwrap();
            assert_eq!(previous, SigHandler::SigDfl);
        }
    }

    #[test]
    #[serial]
    fn test_nested_guards_leave_defaults() {
        let outer = SignalGuard::acquire().unwrap();
        let inner = SignalGuard::acquire().unwrap();
        drop(inner);
        drop(outer);

        for sig in GUARDED_SIGNALS {
            let previous = unsafe { signal(sig, SigHandler::SigDfl) }.unwrap();
            assert_eq!(previous, SigHandler::SigDfl);
        }
    }
}
