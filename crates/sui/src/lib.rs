pub mod client;
pub mod config;
pub mod error;
pub mod rpc;
pub mod signer;
pub mod transaction;

#[cfg(test)]
pub(crate) mod mock_server;

pub use client::{LedgerReader, ObjectReader, SuiClient};
pub use config::{SignerConfig, SuiConfig};
pub use error::SuiError;
pub use rpc::{
    Balance, DynamicFieldName, ObjectData, ObjectDataOptions, ObjectFilter, ObjectQuery,
    ObjectResponse, OwnedObjectsPage, ParsedContent,
};
pub use signer::{ExecutionResponse, ExecutionStatus, RemoteSigner, WalletSigner};
pub use transaction::{CallArg, MoveCall, Transaction};
