//! Deserialization helpers for server payloads.

use serde::{Deserialize, Deserializer};

/// Read `null` as the type's default value.
///
/// The server sends `null` for empty collections and unset strings.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
