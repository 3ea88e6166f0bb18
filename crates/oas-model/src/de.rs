use serde::{Deserialize, Deserializer};

/// Decode a present field as `Some`, including an explicit `null`.
///
/// Paired with `#[serde(default)]` so that an absent field stays `None`
/// and `example: null` survives a round trip as `Some(Value::Null)`.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
