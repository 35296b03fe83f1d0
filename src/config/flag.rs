//! Boolean preference tokens
//!
//! Settings documents written by hand or posted by forms carry booleans as
//! strings. Only an enumerated token set is accepted.

use serde::{Deserialize, Deserializer};

pub const TRUTHY: [&str; 4] = ["1", "true", "yes", "on"];
pub const FALSY: [&str; 5] = ["0", "false", "no", "off", ""];

/// Parse a boolean token, case-insensitive. `None` for anything else.
pub fn parse_flag(token: &str) -> Option<bool> {
    let lower = token.trim().to_ascii_lowercase();
    if TRUTHY.contains(&lower.as_str()) {
        Some(true)
    } else if FALSY.contains(&lower.as_str()) {
        Some(false)
    } else {
        None
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl RawFlag {
    fn into_bool<E: serde::de::Error>(self) -> Result<bool, E> {
        match self {
            RawFlag::Bool(b) => Ok(b),
            RawFlag::Int(0) => Ok(false),
            RawFlag::Int(1) => Ok(true),
            RawFlag::Int(n) => Err(E::custom(format!("invalid boolean value {}", n))),
            RawFlag::Text(s) => parse_flag(&s).ok_or_else(|| {
                E::custom(format!(
                    "invalid boolean value \"{}\", expected one of {} or {}",
                    s,
                    TRUTHY.join("/"),
                    FALSY[..4].join("/")
                ))
            }),
        }
    }
}

pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    RawFlag::deserialize(deserializer)?.into_bool()
}

pub fn deserialize_opt_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawFlag>::deserialize(deserializer)? {
        Some(raw) => raw.into_bool().map(Some),
        None => Ok(None),
    }
}
