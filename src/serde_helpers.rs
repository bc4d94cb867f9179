//! Common serde helpers for patch-style request bodies.

use serde::{Deserialize, Deserializer};

/// Deserialize a field so that an absent key stays `None` while an explicit
/// JSON null becomes `Some(None)`. Pair with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
