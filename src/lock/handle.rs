use std::path::Path;

use super::strategy::LockStrategy;
use super::{AcquireMode, NativeLock};

/// Scoped-ownership wrapper around a platform lock strategy.
///
/// A handle records whether its acquisition attempt succeeded and, if it did,
/// guarantees exactly one matching release: explicitly via [`unlock`], or
/// implicitly on drop. Because the strategy is owned (never shared), plain
/// Rust moves give transfer-of-ownership semantics: assigning a new handle
/// over a held one drops and thereby releases the previous lock, and the
/// moved-from side cannot be used again.
///
/// Handles are single-use per acquisition: construct, lock, unlock, discard.
///
/// [`unlock`]: FileLock::unlock
#[derive(Debug)]
pub struct FileLock {
    strategy: Option<NativeLock>,
    acquired: bool,
}

impl FileLock {
    /// Take an unopened strategy and immediately attempt acquisition in the
    /// given mode, recording the outcome (see [`FileLock::is_acquired`]).
    pub fn acquire(mut strategy: NativeLock, mode: AcquireMode) -> Self {
        let acquired = match mode {
            AcquireMode::Wait => strategy.lock(),
            AcquireMode::NoWait => strategy.try_lock(),
            AcquireMode::Timeout(timeout) => strategy.try_lock_for(timeout),
        };

        FileLock {
            strategy: Some(strategy),
            acquired,
        }
    }

    /// Wrap a strategy that already holds its lock, taking over the release
    /// obligation.
    pub fn from_locked(strategy: NativeLock) -> Self {
        debug_assert!(strategy.held());
        FileLock {
            strategy: Some(strategy),
            acquired: true,
        }
    }

    /// Whether the acquisition attempt this handle records succeeded. A
    /// snapshot, not a live poll of OS state.
    pub fn is_acquired(&self) -> bool {
        self.acquired
    }

    /// The path the lock is keyed on, while a strategy is owned.
    pub fn path(&self) -> Option<&Path> {
        self.strategy.as_ref().map(|s| s.path())
    }

    /// Release the lock now instead of at drop. Safe to call repeatedly; the
    /// handle owns nothing afterwards.
    pub fn unlock(&mut self) {
        if let Some(mut strategy) = self.strategy.take() {
            if self.acquired {
                strategy.unlock();
            }
        }
        self.acquired = false;
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        self.unlock();
    }
}
