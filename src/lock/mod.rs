mod handle;
mod strategy;

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;
#[cfg(not(any(unix, windows)))]
mod unsupported;

pub use handle::FileLock;
pub use strategy::{LockStrategy, POLL_INTERVAL};

#[cfg(unix)]
pub use unix::UnixFileLock;
#[cfg(windows)]
pub use windows::WindowsFileLock;

/// The lock implementation for the target platform, selected at compile
/// time. Runtime code never probes for a platform.
#[cfg(unix)]
pub type NativeLock = unix::UnixFileLock;
#[cfg(windows)]
pub type NativeLock = windows::WindowsFileLock;
#[cfg(not(any(unix, windows)))]
pub type NativeLock = unsupported::UnsupportedFileLock;

use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// How an acquisition should wait for a contended lock.
#[derive(Debug, Clone)]
pub enum AcquireMode {
    /// Block until the lock is obtained.
    Wait,
    /// Fail immediately if another holder exists.
    NoWait,
    /// Poll for up to the given duration, then give up.
    Timeout(Duration),
}

/// Acquire an exclusive lock on `path`, creating the file if missing.
///
/// Returns a populated [`FileLock`] while the lock is held, or `None` when it
/// was not obtainable (busy, timed out, the open/lock call failed, or the
/// platform has no lock implementation). The file's content is never read or
/// written, and the file is never deleted.
pub fn acquire(path: &Path, mode: AcquireMode) -> Option<FileLock> {
    debug!("Acquiring lock: {} (mode: {:?})", path.display(), mode);

    let mut strategy = NativeLock::new(path);
    let acquired = match mode {
        AcquireMode::Wait => strategy.lock(),
        AcquireMode::NoWait => strategy.try_lock(),
        AcquireMode::Timeout(timeout) => strategy.try_lock_for(timeout),
    };

    acquired.then(|| FileLock::from_locked(strategy))
}
