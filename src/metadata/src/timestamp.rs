//! Timestamps are always written with millisecond precision
//! (`2023-11-14T22:13:20.000Z`), the shape produced by JavaScript's
//! `Date.toISOString()`.

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use serde::Serializer;

pub fn format(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(&format(dt))
}

pub fn serialize_opt<S: Serializer>(
    dt: &Option<DateTime<Utc>>,
    ser: S,
) -> Result<S::Ok, S::Error> {
    match dt {
        None => ser.serialize_none(),
        Some(dt) => ser.serialize_str(&format(dt)),
    }
}
