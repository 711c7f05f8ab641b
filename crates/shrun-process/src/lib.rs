//! # shrun-process
//!
//! Synchronous shell-command execution for the shrun workspace.
//!
//! This crate provides:
//! - A tagged [`ChildOutcome`] describing how a child ended
//! - A pure [`composite_status`] mapping from outcome to integer status
//! - A scoped [`SignalGuard`] that ignores keyboard signals while a
//!   foreground child runs
//! - [`ShellRunner`], which ties the above together: spawn a shell, block
//!   until it ends, report the composite status
//!
//! One child at a time, one blocking wait, no cancellation. Unix only.

pub mod outcome;
pub mod runner;
pub mod signal_guard;

pub use outcome::{composite_status, ChildOutcome, STATUS_EXEC_FAILED, STATUS_NO_COMMAND};
pub use runner::{run_shell, ShellConfig, ShellRunner};
pub use signal_guard::SignalGuard;
