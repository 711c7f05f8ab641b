//! Error types for the shrun workspace.

use thiserror::Error;

/// Result type alias for process operations.
pub type ProcessResult<T> = std::result::Result<T, ProcessError>;

/// Errors produced while running and reaping a shell command.
///
/// Spawn failure is deliberately *not* an error variant: the runner models
/// it as a child outcome, because the composite-status contract assigns it
/// an integer just like any other way a command can end.
#[derive(Error, Debug, Clone)]
pub enum ProcessError {
    /// Waiting on the child failed.
    #[error("Wait failed: {reason}")]
    WaitFailed { reason: String },

    /// Installing or restoring a signal disposition failed.
    #[error("Signal disposition update failed: {signal} - {reason}")]
    SignalDisposition { signal: String, reason: String },

    /// Reading a resource limit failed.
    #[error("Resource limit query failed: {resource} - {reason}")]
    LimitQuery { resource: String, reason: String },

    /// Writing a resource limit failed.
    #[error("Resource limit update failed: {resource} - {reason}")]
    LimitUpdate { resource: String, reason: String },
}

impl ProcessError {
    /// Creates a WaitFailed error.
    pub fn wait_failed(reason: impl Into<String>) -> Self {
        Self::WaitFailed {
            reason: reason.into(),
        }
    }

    /// Creates a SignalDisposition error.
    pub fn signal_disposition(signal: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SignalDisposition {
            signal: signal.into(),
            reason: reason.into(),
        }
    }

    /// Creates a LimitQuery error.
    pub fn limit_query(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LimitQuery {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Creates a LimitUpdate error.
    pub fn limit_update(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LimitUpdate {
            resource: resource.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProcessError::wait_failed("no child processes");
        assert_eq!(err.to_string(), "Wait failed: no child processes");

        let err = ProcessError::signal_disposition("SIGINT", "invalid signal");
        assert_eq!(
            err.to_string(),
            "Signal disposition update failed: SIGINT - invalid signal"
        );
    }

    #[test]
    fn test_errors_are_cloneable() {
        let err = ProcessError::limit_update("RLIMIT_NPROC", "permission denied");
        let copy = err.clone();
        assert_eq!(err.to_string(), copy.to_string());
    }
}
