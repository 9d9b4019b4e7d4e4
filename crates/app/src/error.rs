use dropit_core::Frost;
use dropit_sui::SuiError;
use dropit_walrus::WalrusError;
use thiserror::Error;

/// Errors surfaced to the user by the DropIt operations.
///
/// Messages from the blob store and the ledger are passed through unchanged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Connect your wallet to upload")]
    NotConnected,

    #[error("an upload is already in progress")]
    UploadInFlight,

    #[error("Insufficient WAL balance. You need {} more WAL.", .shortfall.to_wal_string())]
    InsufficientBalance { shortfall: Frost },

    #[error("Invalid video link")]
    InvalidLink,

    #[error(transparent)]
    Walrus(#[from] WalrusError),

    #[error(transparent)]
    Sui(#[from] SuiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_balance_formats_shortfall() {
        let err = AppError::InsufficientBalance {
            shortfall: Frost::new(1_500_000_000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient WAL balance. You need 1.5000 more WAL."
        );
    }

    #[test]
    fn wrapped_errors_are_transparent() {
        let err: AppError = WalrusError::MissingBlobId.into();
        assert_eq!(err.to_string(), "No blob ID returned from Walrus");
        let err: AppError = SuiError::Signer("User rejected the request".into()).into();
        assert_eq!(err.to_string(), "User rejected the request");
    }
}
