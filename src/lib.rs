//! Cross-platform exclusive file locks with blocking, non-blocking, and
//! timed acquisition.
//!
//! The lock is advisory: it excludes other cooperating lockers across
//! processes, keyed on a filesystem path. Whether two handles opened by the
//! *same* process exclude each other is platform-defined (POSIX record locks
//! do not) and out of contract; coordinate in-process callers with an
//! ordinary mutex.

pub mod error;
pub mod lock;
pub mod utils;

pub use error::{ExlockError, Result};
pub use lock::{acquire, AcquireMode, FileLock, LockStrategy, NativeLock};
