use std::fs::{File, OpenOptions};
use std::io;
use std::os::windows::fs::OpenOptionsExt;
use std::os::windows::io::AsRawHandle;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};
use windows_sys::Win32::Foundation::{ERROR_LOCK_VIOLATION, HANDLE};
use windows_sys::Win32::Storage::FileSystem::{
    LockFileEx, UnlockFileEx, FILE_SHARE_DELETE, FILE_SHARE_READ, FILE_SHARE_WRITE,
    LOCKFILE_EXCLUSIVE_LOCK, LOCKFILE_FAIL_IMMEDIATELY,
};
use windows_sys::Win32::System::IO::OVERLAPPED;

use super::strategy::{poll_deadline, Attempt, LockStrategy};

/// Exclusive lock backed by Win32 byte-range locking (`LockFileEx`).
///
/// The range spans the maximal representable extent (`u32::MAX` low and high
/// dwords), which covers the whole file in practice. The file is opened with
/// full share flags: the lock, not the open, is what excludes.
#[derive(Debug)]
pub struct WindowsFileLock {
    path: PathBuf,
    file: Option<File>,
    held: bool,
}

impl WindowsFileLock {
    /// Create a strategy for `path`. The file is not opened until the first
    /// acquisition call.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        WindowsFileLock {
            path: path.into(),
            file: None,
            held: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_open(&mut self) -> bool {
        if self.file.is_some() {
            return true;
        }

        let open = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .share_mode(FILE_SHARE_READ | FILE_SHARE_WRITE | FILE_SHARE_DELETE)
            .open(&self.path);

        match open {
            Ok(file) => {
                self.file = Some(file);
                true
            }
            Err(e) => {
                warn!("Failed to open lock file {}: {}", self.path.display(), e);
                false
            }
        }
    }

    fn lock_call(&mut self, flags: u32) -> io::Result<()> {
        let handle = match self.file.as_ref() {
            Some(file) => file.as_raw_handle() as HANDLE,
            None => return Err(io::Error::from(io::ErrorKind::NotFound)),
        };

        let mut overlapped: OVERLAPPED = unsafe { std::mem::zeroed() };
        let ok = unsafe { LockFileEx(handle, flags, 0, u32::MAX, u32::MAX, &mut overlapped) };
        if ok == 0 {
            return Err(io::Error::last_os_error());
        }

        self.held = true;
        debug!("Lock acquired: {}", self.path.display());
        Ok(())
    }

    /// One fail-immediately `LockFileEx` probe. Assumes the file is open.
    fn probe(&mut self) -> Attempt {
        match self.lock_call(LOCKFILE_EXCLUSIVE_LOCK | LOCKFILE_FAIL_IMMEDIATELY) {
            Ok(()) => Attempt::Acquired,
            Err(e) if e.raw_os_error() == Some(ERROR_LOCK_VIOLATION as i32) => Attempt::Contended,
            Err(e) => {
                warn!("LockFileEx failed on {}: {}", self.path.display(), e);
                Attempt::Fault
            }
        }
    }
}

impl LockStrategy for WindowsFileLock {
    fn lock(&mut self) -> bool {
        if self.held {
            return true;
        }
        if !self.ensure_open() {
            return false;
        }

        match self.lock_call(LOCKFILE_EXCLUSIVE_LOCK) {
            Ok(()) => true,
            Err(e) => {
                warn!("LockFileEx failed on {}: {}", self.path.display(), e);
                false
            }
        }
    }

    fn try_lock(&mut self) -> bool {
        if self.held {
            return true;
        }
        if !self.ensure_open() {
            return false;
        }
        self.probe() == Attempt::Acquired
    }

    fn try_lock_for(&mut self, timeout: Duration) -> bool {
        if self.held {
            return true;
        }
        if !self.ensure_open() {
            return false;
        }
        poll_deadline(timeout, || self.probe())
    }

    fn unlock(&mut self) {
        let Some(file) = self.file.take() else {
            return;
        };

        if self.held {
            let handle = file.as_raw_handle() as HANDLE;
            let mut overlapped: OVERLAPPED = unsafe { std::mem::zeroed() };
            let ok = unsafe { UnlockFileEx(handle, 0, u32::MAX, u32::MAX, &mut overlapped) };
            if ok == 0 {
                warn!(
                    "Failed to release lock on {} (non-fatal): {}",
                    self.path.display(),
                    io::Error::last_os_error()
                );
            } else {
                debug!("Lock released: {}", self.path.display());
            }
        }
        self.held = false;
        // handle closes here
        drop(file);
    }

    fn held(&self) -> bool {
        self.held
    }
}

impl Drop for WindowsFileLock {
    fn drop(&mut self) {
        self.unlock();
    }
}
