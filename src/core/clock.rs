//! Timestamps for rows and concurrency tokens.
//!
//! Stored timestamps are truncated to microseconds so a value read back from the
//! database compares equal to the value that was written.

use chrono::{DateTime, Duration, SubsecRound, Utc};

/// Current time at microsecond precision.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Next `updated_at` value for a row whose current token is `previous`.
///
/// Always strictly later than `previous`, even if the wall clock has not advanced
/// or has stepped backwards.
#[must_use]
pub fn next_version(previous: DateTime<Utc>) -> DateTime<Utc> {
    let current = now();
    if current > previous {
        current
    } else {
        previous + Duration::microseconds(1)
    }
}
