//! Shared record of which storage backend is serving requests.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Storage backend currently in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    /// The primary database.
    Primary,
    /// The in-memory fallback store.
    Fallback,
}

impl BackendMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-way switch from primary to fallback storage.
///
/// Every repository pair shares one status so the credential and course
/// stores flip together. Once in fallback mode the status never returns to
/// primary for the lifetime of the process.
///
/// # Examples
/// ```
/// use backend::domain::{BackendMode, BackendStatus};
///
/// let status = BackendStatus::new(BackendMode::Primary);
/// assert!(status.switch_to_fallback());
/// assert!(!status.switch_to_fallback());
/// assert_eq!(status.mode(), BackendMode::Fallback);
/// ```
#[derive(Debug)]
pub struct BackendStatus {
    fallback: AtomicBool,
}

impl BackendStatus {
    pub fn new(mode: BackendMode) -> Self {
        Self {
            fallback: AtomicBool::new(mode == BackendMode::Fallback),
        }
    }

    pub fn mode(&self) -> BackendMode {
        if self.fallback.load(Ordering::Acquire) {
            BackendMode::Fallback
        } else {
            BackendMode::Primary
        }
    }

    /// Flip to fallback mode. Returns `true` only for the call that flipped.
    pub fn switch_to_fallback(&self) -> bool {
        !self.fallback.swap(true, Ordering::AcqRel)
    }
}
