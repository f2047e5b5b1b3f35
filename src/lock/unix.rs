use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use super::strategy::{poll_deadline, Attempt, LockStrategy};

/// Exclusive lock backed by POSIX advisory record locking (`fcntl`).
///
/// The record covers the whole file: `l_start = 0` with the `l_len = 0`
/// to-EOF sentinel. Record locks are per-process: two descriptors opened by
/// the same process do not exclude each other.
#[derive(Debug)]
pub struct UnixFileLock {
    path: PathBuf,
    file: Option<File>,
    held: bool,
}

impl UnixFileLock {
    /// Create a strategy for `path`. The file is not opened until the first
    /// acquisition call.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        UnixFileLock {
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

        let mut opts = OpenOptions::new();
        opts.read(true).write(true).create(true).mode(0o666);
        // O_NOFOLLOW rejects symlinked lock paths at the OS level
        opts.custom_flags(libc::O_NOFOLLOW);

        match opts.open(&self.path) {
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

    fn whole_file(l_type: libc::c_short) -> libc::flock {
        let mut fl: libc::flock = unsafe { std::mem::zeroed() };
        fl.l_type = l_type;
        fl.l_whence = libc::SEEK_SET as libc::c_short;
        fl.l_start = 0;
        fl.l_len = 0;
        fl
    }

    /// One non-blocking `F_SETLK` probe. Assumes the file is open.
    fn probe(&mut self) -> Attempt {
        let fd = match self.file.as_ref() {
            Some(file) => file.as_raw_fd(),
            None => return Attempt::Fault,
        };

        let fl = Self::whole_file(libc::F_WRLCK as libc::c_short);
        if unsafe { libc::fcntl(fd, libc::F_SETLK, &fl) } == 0 {
            self.held = true;
            debug!("Lock acquired: {}", self.path.display());
            return Attempt::Acquired;
        }

        let err = io::Error::last_os_error();
        let errno = err.raw_os_error();
        // SUSv4 allows EACCES in place of EAGAIN for a held record lock
        if errno == Some(libc::EAGAIN)
            || errno == Some(libc::EWOULDBLOCK)
            || errno == Some(libc::EACCES)
        {
            Attempt::Contended
        } else {
            warn!("fcntl(F_SETLK) failed on {}: {}", self.path.display(), err);
            Attempt::Fault
        }
    }
}

impl LockStrategy for UnixFileLock {
    fn lock(&mut self) -> bool {
        if self.held {
            return true;
        }
        if !self.ensure_open() {
            return false;
        }
        let Some(file) = self.file.as_ref() else {
            return false;
        };

        let fl = Self::whole_file(libc::F_WRLCK as libc::c_short);
        if unsafe { libc::fcntl(file.as_raw_fd(), libc::F_SETLKW, &fl) } == 0 {
            self.held = true;
            debug!("Lock acquired: {}", self.path.display());
            true
        } else {
            warn!(
                "fcntl(F_SETLKW) failed on {}: {}",
                self.path.display(),
                io::Error::last_os_error()
            );
            false
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
            // Releasing never has to wait, so the non-blocking form is enough
            let fl = Self::whole_file(libc::F_UNLCK as libc::c_short);
            if unsafe { libc::fcntl(file.as_raw_fd(), libc::F_SETLK, &fl) } != 0 {
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
        // descriptor closes here
        drop(file);
    }

    fn held(&self) -> bool {
        self.held
    }
}

impl Drop for UnixFileLock {
    fn drop(&mut self) {
        self.unlock();
    }
}
