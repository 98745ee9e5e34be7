//! Server lifecycle flags and the exit-code rule.
//!
//! The service moves through `Uninitialized → Initialized → ShuttingDown →
//! Exited`. `shutdown` only records intent; the server loop stops once
//! `exit` has been handled, and reports a clean exit only if `shutdown`
//! came first.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

const LIFECYCLE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::lifecycle");

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Only `initialize` is callable.
    Uninitialized,
    /// The full method set is bound.
    Initialized,
    /// `shutdown` has been received.
    ShuttingDown,
    /// `exit` has been received; no further frames are processed.
    Exited,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::ShuttingDown => "shutting_down",
            Self::Exited => "exited",
        })
    }
}

/// How the process should terminate after `exit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// `exit` followed `shutdown`.
    Clean,
    /// `exit` arrived without a prior `shutdown`.
    WithoutShutdown,
}

impl ExitStatus {
    /// Process exit code for this status.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Clean => 0,
            Self::WithoutShutdown => 1,
        }
    }
}

/// Lifecycle flags shared by the server loop and the built-in methods.
#[derive(Debug, Default)]
pub struct Lifecycle {
    initialized: AtomicBool,
    is_shutdown: AtomicBool,
    should_exit: AtomicBool,
}

impl Lifecycle {
    /// Creates the controller with every flag cleared.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `initialize` ran.
    pub fn mark_initialized(&self) {
        if !self.initialized.swap(true, Ordering::SeqCst) {
            info!(target: LIFECYCLE_TARGET, "service initialized");
        }
    }

    /// Records a `shutdown` request.
    pub fn request_shutdown(&self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
        info!(target: LIFECYCLE_TARGET, "shutdown requested");
    }

    /// Records an `exit` request.
    pub fn request_exit(&self) {
        self.should_exit.store(true, Ordering::SeqCst);
        info!(
            target: LIFECYCLE_TARGET,
            after_shutdown = self.is_shutdown(),
            "exit requested"
        );
    }

    /// Whether `shutdown` has been received.
    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        self.is_shutdown.load(Ordering::SeqCst)
    }

    /// Whether `exit` has been received.
    #[must_use]
    pub fn should_exit(&self) -> bool {
        self.should_exit.load(Ordering::SeqCst)
    }

    /// Current state, derived from the flags.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        if self.should_exit() {
            LifecycleState::Exited
        } else if self.is_shutdown() {
            LifecycleState::ShuttingDown
        } else if self.initialized.load(Ordering::SeqCst) {
            LifecycleState::Initialized
        } else {
            LifecycleState::Uninitialized
        }
    }

    /// The exit status once `exit` has been received.
    #[must_use]
    pub fn exit_status(&self) -> Option<ExitStatus> {
        if !self.should_exit() {
            return None;
        }
        Some(if self.is_shutdown() {
            ExitStatus::Clean
        } else {
            ExitStatus::WithoutShutdown
        })
    }
}
