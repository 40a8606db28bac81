//!
//! Clock skew validation
//!
//! Compares the request's `Date` header against the verifier's clock.
//! The current time is passed in explicitly, this module never reads a clock itself.
//!

use crate::Error;
use std::time::{Duration, SystemTime};

/// 5 minutes
pub const DEFAULT_TOLERANCE_SECONDS: u64 = 5 * 60;

/// Validate the `Date` header value against `now`
///
/// - Fails with [`Error::DateUnparsable`] if the date is missing or not a valid HTTP date, independent of the tolerance
/// - Fails with [`Error::SkewExceeded`] if the absolute difference is at or above the tolerance
///
/// A tolerance of `0` disables the comparison. This removes any protection against replayed requests and is only
/// meant for tests against fixed fixtures.
#[inline]
pub fn validate(now: SystemTime, date: Option<&str>, tolerance_seconds: u64) -> Result<(), Error> {
    let date = date.ok_or(Error::DateUnparsable(None))?;
    let date = httpdate::parse_http_date(date).map_err(|err| Error::DateUnparsable(Some(err)))?;

    if tolerance_seconds == 0 {
        return Ok(());
    }

    let diff = now
        .duration_since(date)
        .unwrap_or_else(|err| err.duration());

    if diff >= Duration::from_secs(tolerance_seconds) {
        return Err(Error::SkewExceeded {
            diff_seconds: diff.as_secs(),
            tolerance_seconds,
        });
    }

    Ok(())
}
