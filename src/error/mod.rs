mod types;

pub use types::{ExlockError, Result};
