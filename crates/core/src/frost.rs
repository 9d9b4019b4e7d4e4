//! WAL amounts in their smallest unit (FROST) and fixed-point formatting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::de::u64_from_string_or_number;

/// Number of FROST in one WAL.
pub const FROST_PER_WAL: u64 = 1_000_000_000;

/// Decimal digits shown when formatting a WAL amount.
pub const DISPLAY_DECIMALS: usize = 4;

/// Width of the zero-padded FROST remainder (`FROST_PER_WAL` has 9 zeros).
const FROST_DECIMALS: usize = 9;

/// An amount of WAL expressed in FROST.
///
/// Serialized as a decimal string, the way the Sui RPC encodes `u64` balances,
/// so values above 2^53 survive JSON consumers without precision loss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", schema(value_type = String, example = "1234560000"))]
pub struct Frost(u64);

impl Frost {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(frost: u64) -> Self {
        Self(frost)
    }

    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Render as WAL with exactly four decimals (see [`format_wal`]).
    #[must_use]
    pub fn to_wal_string(self) -> String {
        format_wal(self)
    }
}

impl From<u64> for Frost {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Frost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} WAL", format_wal(*self))
    }
}

/// Error returned when a FROST amount cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid FROST amount: {0:?}")]
pub struct ParseFrostError(String);

impl FromStr for Frost {
    type Err = ParseFrostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ParseFrostError(s.to_owned()))
    }
}

impl Serialize for Frost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Frost {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64_from_string_or_number(deserializer).map(Self)
    }
}

/// Format a FROST amount as WAL with exactly four decimals.
///
/// Integer division and remainder only: the remainder is zero-padded to nine
/// digits and truncated, so `1_234_560_000` renders as `"1.2345"`.
#[must_use]
pub fn format_wal(frost: Frost) -> String {
    let whole = frost.0 / FROST_PER_WAL;
    let remainder = frost.0 % FROST_PER_WAL;
    let padded = format!("{remainder:0width$}", width = FROST_DECIMALS);
    format!("{whole}.{}", &padded[..DISPLAY_DECIMALS])
}
