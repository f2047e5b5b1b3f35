use std::time::{Duration, Instant};

/// How long to sleep between polls in [`LockStrategy::try_lock_for`].
///
/// Neither `fcntl` record locks nor `LockFileEx` offer a native timed wait,
/// so the timed mode is a poll loop over the non-blocking call. The quantum
/// is clamped to the remaining budget on the final iteration.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Outcome of a single non-blocking acquisition probe.
///
/// `Contended` means another holder exists and retrying can help; `Fault` is
/// any other failure (open error, bad descriptor, I/O error), where retrying
/// cannot change the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Attempt {
    Acquired,
    Contended,
    Fault,
}

/// Exclusive whole-file lock, one implementation per target OS.
///
/// All acquisition methods lazily open (and create if missing) the backing
/// file on first use and report their outcome as a plain boolean: lock-busy
/// is the expected result of contention, not an error. Calling an acquisition
/// method on an instance that already holds the lock succeeds trivially
/// without touching the OS; `unlock` is idempotent.
pub trait LockStrategy {
    /// Block the calling thread until the exclusive lock is held, or the OS
    /// call fails. No internal retry beyond what the OS call itself does.
    fn lock(&mut self) -> bool;

    /// Attempt the lock without blocking. `false` means busy or failed.
    fn try_lock(&mut self) -> bool;

    /// Poll [`Self::try_lock`]-equivalent probes until the lock is held or
    /// `timeout` elapses. A non-transient failure aborts the wait early.
    fn try_lock_for(&mut self, timeout: Duration) -> bool;

    /// Release the lock and close the backing file. No-op when not open.
    fn unlock(&mut self);

    /// Whether this instance currently holds the lock.
    fn held(&self) -> bool;
}

/// Drive `probe` until it acquires, faults, or `timeout` elapses.
///
/// The first probe runs before any sleep, so a zero timeout still gets one
/// attempt and an uncontended lock is acquired without waiting.
pub(crate) fn poll_deadline<F>(timeout: Duration, mut probe: F) -> bool
where
    F: FnMut() -> Attempt,
{
    let start = Instant::now();
    loop {
        match probe() {
            Attempt::Acquired => return true,
            Attempt::Fault => return false,
            Attempt::Contended => {}
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return false;
        }
        std::thread::sleep(POLL_INTERVAL.min(timeout - elapsed));
    }
}
