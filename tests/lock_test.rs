use exlock::{acquire, AcquireMode, FileLock, LockStrategy, NativeLock};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_acquire_and_release() {
    let temp = TempDir::new().unwrap();
    let lock_path = temp.path().join("test.lock");

    let lock = acquire(&lock_path, AcquireMode::Wait).expect("free lock should be acquired");
    assert!(lock.is_acquired());
    assert_eq!(lock.path(), Some(lock_path.as_path()));
    assert!(lock_path.exists(), "lock file should be created");

    drop(lock);
    // Only the lock is released; the file is never deleted
    assert!(lock_path.exists());
}

#[test]
fn test_acquire_fails_without_parent_dir() {
    let temp = TempDir::new().unwrap();
    let lock_path = temp.path().join("missing").join("test.lock");

    assert!(acquire(&lock_path, AcquireMode::NoWait).is_none());
    assert!(acquire(&lock_path, AcquireMode::Wait).is_none());
}

#[test]
fn test_hard_failure_aborts_timed_wait_early() {
    let temp = TempDir::new().unwrap();
    let lock_path = temp.path().join("missing").join("test.lock");

    // An unopenable path is not contention; the timed mode must not wait
    // out the full budget
    let start = std::time::Instant::now();
    let result = acquire(&lock_path, AcquireMode::Timeout(Duration::from_secs(5)));
    assert!(result.is_none());
    assert!(start.elapsed() < Duration::from_millis(500));
}

#[test]
fn test_reacquire_while_held_is_trivial() {
    let temp = TempDir::new().unwrap();
    let mut strategy = NativeLock::new(temp.path().join("held.lock"));

    assert!(strategy.lock());
    assert!(strategy.held());

    // All acquisition modes succeed trivially on a holding instance
    assert!(strategy.try_lock());
    assert!(strategy.try_lock());
    assert!(strategy.lock());
    assert!(strategy.try_lock_for(Duration::from_millis(50)));
    assert!(strategy.held());

    strategy.unlock();
    assert!(!strategy.held());
}

#[test]
fn test_strategy_double_unlock_is_noop() {
    let temp = TempDir::new().unwrap();
    let mut strategy = NativeLock::new(temp.path().join("twice.lock"));

    assert!(strategy.try_lock());
    strategy.unlock();
    strategy.unlock();
    assert!(!strategy.held());
}

#[test]
fn test_unlock_before_lock_is_noop() {
    let temp = TempDir::new().unwrap();
    let mut strategy = NativeLock::new(temp.path().join("fresh.lock"));

    strategy.unlock();
    assert!(!strategy.held());
    // Still usable afterwards
    assert!(strategy.lock());
}

#[test]
fn test_handle_unlock_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let lock_path = temp.path().join("handle.lock");

    let mut lock = acquire(&lock_path, AcquireMode::Wait).unwrap();
    assert!(lock.is_acquired());

    lock.unlock();
    assert!(!lock.is_acquired());
    assert_eq!(lock.path(), None);

    lock.unlock();
    assert!(!lock.is_acquired());
}

#[test]
fn test_handle_acquire_records_outcome() {
    let temp = TempDir::new().unwrap();
    let lock_path = temp.path().join("direct.lock");

    let lock = FileLock::acquire(NativeLock::new(&lock_path), AcquireMode::NoWait);
    assert!(lock.is_acquired());
}

#[test]
fn test_handle_acquire_records_failure() {
    let temp = TempDir::new().unwrap();
    let lock_path = temp.path().join("missing").join("direct.lock");

    let lock = FileLock::acquire(NativeLock::new(&lock_path), AcquireMode::NoWait);
    assert!(!lock.is_acquired());
    // Dropping an unacquired handle must not attempt a release
    drop(lock);
}

#[test]
fn test_overwriting_handle_releases_previous() {
    let temp = TempDir::new().unwrap();
    let path_a = temp.path().join("a.lock");
    let path_b = temp.path().join("b.lock");

    let mut lock = acquire(&path_a, AcquireMode::Wait).unwrap();
    assert!(lock.is_acquired());

    // Assignment drops the previous handle, releasing its lock
    lock = acquire(&path_b, AcquireMode::Wait).unwrap();
    assert!(lock.is_acquired());
    assert_eq!(lock.path(), Some(path_b.as_path()));
}

#[cfg(target_os = "linux")]
#[test]
fn test_no_fd_leak_across_cycles() {
    fn open_fds() -> usize {
        std::fs::read_dir("/proc/self/fd").unwrap().count()
    }

    let temp = TempDir::new().unwrap();
    let lock_path = temp.path().join("cycles.lock");

    // Warm up once so the lock file exists before counting
    drop(acquire(&lock_path, AcquireMode::Wait));

    let before = open_fds();
    for _ in 0..100 {
        let lock = acquire(&lock_path, AcquireMode::Wait).unwrap();
        drop(lock);
    }
    let after = open_fds();

    assert_eq!(before, after, "acquire/release cycles leaked descriptors");
}
