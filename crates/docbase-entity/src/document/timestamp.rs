//! Fixed-width RFC 3339 timestamps.
//!
//! Sorting happens on the stored JSON strings, so every timestamp is
//! written with microsecond precision and a `Z` suffix to keep string
//! order equal to time order.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Format a timestamp the way it is stored.
pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Serialize an optional timestamp.
pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(value) => serializer.serialize_str(&format(value)),
        None => serializer.serialize_none(),
    }
}

/// Deserialize an optional timestamp in any RFC 3339 form.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<DateTime<Utc>>::deserialize(deserializer)
}
