//! Lenient field deserializers for caller-submitted definitions.
//!
//! A field holding a value of the wrong JSON type reads as absent, so the
//! validators report their own rule message instead of a decoding failure.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Valid(T),
    Other(IgnoredAny),
}

/// Deserializes `T`, or `None` when the value is null or of another shape.
pub(crate) fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(
        Option::<Lenient<T>>::deserialize(deserializer)?.and_then(|value| match value {
            Lenient::Valid(value) => Some(value),
            Lenient::Other(IgnoredAny) => None,
        }),
    )
}

/// Deserializes a flag that only counts when it is literally `true`.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional::<D, bool>(deserializer)?.unwrap_or(false))
}
