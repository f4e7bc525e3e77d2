//! Conversion boundary between wire timestamps and stored date-times.
//!
//! Valid wire instants span 0001-01-01T00:00:00Z up to, but excluding,
//! 10000-01-01T00:00:00Z, with `nanos` in `0..1_000_000_000`. Stores may keep
//! less than nanosecond precision, so a round trip is only exact to the second.

use chrono::{DateTime, Utc};
use common::api::v1::Timestamp;

use crate::errors::MemoError;

/// Seconds of 0001-01-01T00:00:00Z.
pub const MIN_VALID_SECONDS: i64 = -62_135_596_800;
/// Seconds of 10000-01-01T00:00:00Z (exclusive).
pub const MAX_VALID_SECONDS: i64 = 253_402_300_800;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

fn validate(ts: &Timestamp) -> Result<(), String> {
    if ts.seconds < MIN_VALID_SECONDS {
        return Err(format!("timestamp: {ts:?} before 0001-01-01"));
    }
    if ts.seconds >= MAX_VALID_SECONDS {
        return Err(format!("timestamp: {ts:?} after 10000-01-01"));
    }
    if ts.nanos < 0 || i64::from(ts.nanos) >= NANOS_PER_SECOND {
        return Err(format!("timestamp: {ts:?} has out-of-range nanos"));
    }
    Ok(())
}

/// Wire → storage. A missing or malformed timestamp is an `InvalidArgument`.
pub fn to_storage(ts: Option<&Timestamp>) -> Result<DateTime<Utc>, MemoError> {
    const CONTEXT: &str = "reminder field has invalid format";
    let ts = ts.ok_or_else(|| MemoError::invalid_argument(CONTEXT, "timestamp: nil Timestamp"))?;
    validate(ts).map_err(|e| MemoError::invalid_argument(CONTEXT, e))?;
    DateTime::from_timestamp(ts.seconds, ts.nanos as u32)
        .ok_or_else(|| MemoError::invalid_argument(CONTEXT, format!("timestamp: {ts:?} is not representable")))
}

/// Storage → wire. An instant the wire cannot carry is an `Unknown` failure.
pub fn to_wire(dt: &DateTime<Utc>) -> Result<Timestamp, MemoError> {
    const CONTEXT: &str = "Invalid reminder value from selected Memo";
    let nanos = i32::try_from(dt.timestamp_subsec_nanos())
        .map_err(|e| MemoError::unknown(CONTEXT, e))?;
    let ts = Timestamp::new(dt.timestamp(), nanos);
    validate(&ts).map_err(|e| MemoError::unknown(CONTEXT, e))?;
    Ok(ts)
}
