//! Serde helpers for ledger-encoded values.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};

/// Deserialize a `u64` sent either as a JSON number or as a decimal string.
///
/// Move `u64` fields arrive as strings over JSON-RPC; small values are
/// sometimes plain numbers.
pub fn u64_from_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<u64, D::Error> {
    struct U64Visitor;

    impl Visitor<'_> for U64Visitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an unsigned integer or a decimal string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::custom(format!("negative value {v}")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            v.trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid unsigned integer {v:?}")))
        }
    }

    deserializer.deserialize_any(U64Visitor)
}
