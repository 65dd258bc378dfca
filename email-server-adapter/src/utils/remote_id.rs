//! Vendor identifiers arrive as JSON strings or numbers; both become `String`.

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        String(String),
        U64(u64),
        I64(i64),
    }

    match RawId::deserialize(deserializer)? {
        RawId::String(s) if s.trim().is_empty() => Err(Error::custom("empty identifier")),
        RawId::String(s) => Ok(s),
        RawId::U64(n) => Ok(n.to_string()),
        RawId::I64(n) => Ok(n.to_string()),
    }
}
