use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use super::strategy::LockStrategy;

/// Stand-in for targets without a native lock implementation: every
/// acquisition reports failure, so the factory yields `None`.
#[derive(Debug)]
pub struct UnsupportedFileLock {
    path: PathBuf,
}

impl UnsupportedFileLock {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        UnsupportedFileLock { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LockStrategy for UnsupportedFileLock {
    fn lock(&mut self) -> bool {
        warn!(
            "File locking is not supported on this platform: {}",
            self.path.display()
        );
        false
    }

    fn try_lock(&mut self) -> bool {
        self.lock()
    }

    fn try_lock_for(&mut self, _timeout: Duration) -> bool {
        self.lock()
    }

    fn unlock(&mut self) {}

    fn held(&self) -> bool {
        false
    }
}
