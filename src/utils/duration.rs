use crate::error::{ExlockError, Result};
use std::time::Duration;

/// Parse a duration string like "250ms", "30s", "5m", "2h", "7d"
/// Defaults to seconds if no unit specified
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    if s.is_empty() {
        return Err(ExlockError::InvalidDuration {
            input: s.to_string(),
            message: "empty string".to_string(),
        });
    }

    // "ms" must be checked before the bare 's' and 'm' suffixes
    if let Some(stripped) = s.strip_suffix("ms") {
        let value: u64 = stripped.parse().map_err(|_| ExlockError::InvalidDuration {
            input: s.to_string(),
            message: "expected format: NUMBER[ms|s|m|h|d] (e.g., '250ms', '30s', '5m')"
                .to_string(),
        })?;
        return Ok(Duration::from_millis(value));
    }

    let (num_str, unit) = if let Some(stripped) = s.strip_suffix('s') {
        (stripped, 's')
    } else if let Some(stripped) = s.strip_suffix('m') {
        (stripped, 'm')
    } else if let Some(stripped) = s.strip_suffix('h') {
        (stripped, 'h')
    } else if let Some(stripped) = s.strip_suffix('d') {
        (stripped, 'd')
    } else {
        // No unit, assume seconds
        (s, 's')
    };

    let value: u64 = num_str.parse().map_err(|_| ExlockError::InvalidDuration {
        input: s.to_string(),
        message: "expected format: NUMBER[ms|s|m|h|d] (e.g., '250ms', '30s', '5m', '2h', '7d')"
            .to_string(),
    })?;

    let seconds = match unit {
        's' => value,
        'm' => value * 60,
        'h' => value * 60 * 60,
        'd' => value * 60 * 60 * 24,
        _ => unreachable!(),
    };

    Ok(Duration::from_secs(seconds))
}
