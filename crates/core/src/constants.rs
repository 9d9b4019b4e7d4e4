//! Well-known on-chain identifiers and defaults.

/// Storage duration requested when none is given.
pub const DEFAULT_EPOCHS: u32 = 5;

/// The shared `0x2::clock::Clock` object.
pub const CLOCK_OBJECT_ID: &str = "0x6";

/// Substring identifying the WAL coin type in a balance listing.
pub const WAL_COIN_TYPE_MARKER: &str = "::wal::WAL";

/// Move module holding the video entry points.
pub const VIDEO_MODULE: &str = "video";

/// Entry point creating a `Video` record.
pub const CREATE_VIDEO_FUNCTION: &str = "create_video";

/// Entry point destroying a `Video` record.
pub const DELETE_VIDEO_FUNCTION: &str = "delete_video";

/// Struct name of the on-chain video record.
pub const VIDEO_STRUCT: &str = "Video";

/// Package id used when none is configured.
pub const DEFAULT_PACKAGE_ID: &str = "0x0";

/// Walrus testnet publisher.
pub const DEFAULT_PUBLISHER_URL: &str = "https://publisher.walrus-testnet.walrus.space";

/// Walrus testnet aggregator.
pub const DEFAULT_AGGREGATOR_URL: &str = "https://aggregator.walrus-testnet.walrus.space";

/// Sui testnet full node.
pub const DEFAULT_SUI_RPC_URL: &str = "https://fullnode.testnet.sui.io:443";

/// Walrus system object on testnet.
pub const TESTNET_WALRUS_SYSTEM_OBJECT: &str =
    "0x6c2547cbbc38025cf3adac45f63cb0a8d12ecf777cdc75a4971612bf97fdf6af";
