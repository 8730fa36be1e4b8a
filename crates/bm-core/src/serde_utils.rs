//! Shared serialization/deserialization helpers
//!
//! The daemon's JSON is loosely typed: timestamps may be numbers or strings,
//! flags may be booleans or 0/1, and free-text fields are base64. These
//! helpers normalise those fields while deserializing records. Records
//! serialize in their decoded form.

/// Deserialize a base64 string field into decoded text
///
/// ```ignore
/// #[derive(Deserialize)]
/// struct Record {
///     #[serde(deserialize_with = "bm_core::serde_utils::base64_text::deserialize")]
///     subject: String,
/// }
/// ```
pub mod base64_text {
    use serde::{Deserialize, Deserializer};

    use crate::encoding::from_base64;

    /// Deserialize and decode a base64 string
    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        from_base64(&encoded).map_err(serde::de::Error::custom)
    }
}

/// Deserialize Unix seconds, as a number or a decimal string, into a UTC date
pub mod unix_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    use crate::time::{from_unix, from_unix_secs};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Int(i64),
        Text(String),
    }

    /// Deserialize a Unix timestamp
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let converted = match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Int(secs) => from_unix_secs(secs),
            RawTimestamp::Text(text) => from_unix(&text),
        };
        converted.map_err(serde::de::Error::custom)
    }
}

/// Deserialize a flag given as a boolean or as a 0/1 integer
pub mod int_bool {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Int(i64),
    }

    /// Deserialize a flag
    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawFlag::deserialize(deserializer)? {
            RawFlag::Bool(flag) => flag,
            RawFlag::Int(value) => value != 0,
        })
    }
}

/// Helper module for optional Duration serialization as seconds
///
/// Serializes `Option<std::time::Duration>` as a u64 number of seconds, which
/// is more readable in TOML. Pair it with
/// `skip_serializing_if = "Option::is_none"` since TOML has no null.
pub mod optional_duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    /// Serialize an optional Duration as seconds (u64)
    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(duration) => serializer.serialize_some(&duration.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional Duration from seconds (u64)
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
