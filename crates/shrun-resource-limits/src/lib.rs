//! # shrun-resource-limits
//!
//! Scoped manipulation of process resource limits.
//!
//! This crate provides:
//! - [`LimitGuard`]: lower a soft limit for the lifetime of a scope
//! - [`suppress_core_dumps`]: disable core files for this process
//!
//! Limits apply to the calling process and its descendants, which is what
//! makes them useful for forcing spawn or exec failures in a child without
//! touching the child's code.

pub use nix::sys::resource::{rlim_t, Resource};

use nix::sys::resource::{getrlimit, setrlimit};
use shrun_common::{ProcessError, ProcessResult};
use tracing::{debug, warn};

/// RAII guard holding a temporarily lowered soft resource limit.
///
/// Dropping the guard restores the soft/hard pair that was in effect when
/// it was created. A failed restoration is logged, not propagated.
pub struct LimitGuard {
    resource: Resource,
    saved_soft: rlim_t,
    saved_hard: rlim_t,
}

impl LimitGuard {
    /// Lower the soft limit for `resource` to `value` until the returned
    /// guard is dropped. The hard limit is left unchanged.
    pub fn lower(resource: Resource, value: rlim_t) -> ProcessResult<Self> {
        let (saved_soft, saved_hard) = getrlimit(resource).map_err(|errno| {
            ProcessError::limit_query(format!("{:?}", resource), errno.to_string())
        })?;

        setrlimit(resource, value, saved_hard).map_err(|errno| {
            ProcessError::limit_update(format!("{:?}", resource), errno.to_string())
        })?;

        debug!(
            "Lowered soft {:?} from {} to {}",
            resource, saved_soft, value
        );

        Ok(Self {
            resource,
            saved_soft,
            saved_hard,
        })
    }
}

impl Drop for LimitGuard {
    fn drop(&mut self) {
        if let Err(errno) = setrlimit(self.resource, self.saved_soft, self.saved_hard) {
            warn!("Failed to restore {:?} limit: {}", self.resource, errno);
        }
    }
}

/// `RLIMIT_CORE` value that suppresses dumps under every `core_pattern`.
///
/// A limit of zero only stops dumps written to files; when `core_pattern`
/// is a pipe the kernel ignores the limit, except for the special value 1,
/// its recursive-crash guard. One byte is also below the minimum dump size
/// for regular files, so either way no core is produced and the wait status
/// never carries the core-dump flag.
const CORE_LIMIT_SUPPRESSED: rlim_t = 1;

/// Disable core dump files for this process and its children.
///
/// Signal deaths still report the terminating signal; they just stop
/// littering the filesystem with core files, and the wait status stays free
/// of the core-dump flag.
pub fn suppress_core_dumps() -> ProcessResult<()> {
    setrlimit(
        Resource::RLIMIT_CORE,
        CORE_LIMIT_SUPPRESSED,
        CORE_LIMIT_SUPPRESSED,
    )
    .map_err(|errno| ProcessError::limit_update("RLIMIT_CORE", errno.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_lower_and_restore() {
        let before = getrlimit(Resource::RLIMIT_CORE).unwrap();

        {
            let _guard = LimitGuard::lower(Resource::RLIMIT_CORE, 0).unwrap();
            let (soft, hard) = getrlimit(Resource::RLIMIT_CORE).unwrap();
            assert_eq!(soft, 0);
            assert_eq!(hard, before.1);
        }

        assert_eq!(getrlimit(Resource::RLIMIT_CORE).unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_lower_to_current_value_is_a_no_op() {
        let (soft, _) = getrlimit(Resource::RLIMIT_NOFILE).unwrap();

        {
            let _guard = LimitGuard::lower(Resource::RLIMIT_NOFILE, soft).unwrap();
            assert_eq!(getrlimit(Resource::RLIMIT_NOFILE).unwrap().0, soft);
        }

        assert_eq!(getrlimit(Resource::RLIMIT_NOFILE).unwrap().0, soft);
    }

    #[test]
    #[serial]
    fn test_suppress_core_dumps() {
        suppress_core_dumps().unwrap();
        assert_eq!(
            getrlimit(Resource::RLIMIT_CORE).unwrap(),
            (CORE_LIMIT_SUPPRESSED, CORE_LIMIT_SUPPRESSED)
        );
    }
}
