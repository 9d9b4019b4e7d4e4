//! Encoded-size arithmetic for the RS2 erasure code.
//!
//! Walrus charges for the encoded size of a blob, not its raw size. Each blob
//! is split into primary and secondary slivers across `n_shards`, plus per-shard
//! metadata holding the sliver hashes and the blob id.

/// Size of one storage unit (1 MiB).
pub const BYTES_PER_UNIT_SIZE: u64 = 1024 * 1024;

/// Largest RS2 symbol size (symbols are a whole number of 2-byte elements).
pub const MAX_SYMBOL_SIZE: u64 = 65_534;

const DIGEST_LEN: u64 = 32;
const BLOB_ID_LEN: u64 = 32;

/// Number of source symbols per primary and secondary sliver.
fn source_symbols(n_shards: u64) -> (u64, u64) {
    let max_faulty = (n_shards - 1) / 3;
    (n_shards - 2 * max_faulty, n_shards - max_faulty)
}

/// Symbol size for a blob of `unencoded_length` bytes, or `None` when the blob
/// is too large for the encoding.
pub fn symbol_size(unencoded_length: u64, n_shards: u64) -> Option<u64> {
    if n_shards == 0 {
        return None;
    }
    let (primary, secondary) = source_symbols(n_shards);
    let symbols = primary.checked_mul(secondary)?;
    let size = unencoded_length.max(1).div_ceil(symbols);
    let size = size.checked_add(size % 2)?;
    (size <= MAX_SYMBOL_SIZE).then_some(size)
}

/// Metadata stored alongside the slivers on every shard.
fn metadata_length(n_shards: u64) -> Option<u64> {
    n_shards
        .checked_mul(DIGEST_LEN * 2)?
        .checked_add(BLOB_ID_LEN)?
        .checked_mul(n_shards)
}

/// Total encoded length across all shards, or `None` when the blob is too large.
pub fn encoded_blob_length(unencoded_length: u64, n_shards: u64) -> Option<u64> {
    let symbol = symbol_size(unencoded_length, n_shards)?;
    let (primary, secondary) = source_symbols(n_shards);
    let slivers = n_shards
        .checked_mul(primary + secondary)?
        .checked_mul(symbol)?;
    slivers.checked_add(metadata_length(n_shards)?)
}

/// Number of storage units needed for `encoded_length` bytes.
pub fn storage_units(encoded_length: u64) -> u64 {
    encoded_length.div_ceil(BYTES_PER_UNIT_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_symbols_for_testnet_committee() {
        assert_eq!(source_symbols(1000), (334, 667));
        assert_eq!(source_symbols(10), (4, 7));
        assert_eq!(source_symbols(1), (1, 1));
    }

    #[test]
    fn symbol_size_rounds_up_to_even() {
        // 100 / 28 = 3.57 -> 4
        assert_eq!(symbol_size(100, 10), Some(4));
        // 57 / 28 = 2.03 -> 3 -> 4
        assert_eq!(symbol_size(57, 10), Some(4));
        // empty blobs are encoded as one byte
        assert_eq!(symbol_size(0, 10), Some(2));
        assert_eq!(symbol_size(1, 1000), Some(2));
    }

    #[test]
    fn ten_mebibytes_on_a_thousand_shards() {
        let encoded = encoded_blob_length(10 * 1024 * 1024, 1000).unwrap();
        assert_eq!(encoded, 112_080_000);
        assert_eq!(storage_units(encoded), 107);
    }

    #[test]
    fn tiny_blob_is_dominated_by_metadata() {
        let encoded = encoded_blob_length(1, 1000).unwrap();
        assert_eq!(encoded, 66_034_000);
        assert_eq!(storage_units(encoded), 63);
        assert_eq!(encoded_blob_length(100, 10), Some(7160));
    }

    #[test]
    fn oversized_blob_is_rejected() {
        assert_eq!(encoded_blob_length(u64::MAX, 1000), None);
        assert_eq!(symbol_size(28 * (MAX_SYMBOL_SIZE + 2), 10), None);
        assert_eq!(encoded_blob_length(10, 0), None);
    }

    #[test]
    fn storage_units_round_up() {
        assert_eq!(storage_units(0), 0);
        assert_eq!(storage_units(1), 1);
        assert_eq!(storage_units(BYTES_PER_UNIT_SIZE), 1);
        assert_eq!(storage_units(BYTES_PER_UNIT_SIZE + 1), 2);
    }
}
