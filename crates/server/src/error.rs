use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dropit_app::AppError;
use dropit_sui::SuiError;
use dropit_walrus::WalrusError;
use thiserror::Error;

/// Errors that can occur when running the DropIt server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A DropIt operation failed; the message is shown to the user as is.
    #[error(transparent)]
    App(#[from] AppError),

    /// The request could not be understood.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A page template failed to render.
    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),
}

impl From<WalrusError> for ServerError {
    fn from(e: WalrusError) -> Self {
        Self::App(e.into())
    }
}

impl From<SuiError> for ServerError {
    fn from(e: SuiError) -> Self {
        Self::App(e.into())
    }
}

impl ServerError {
    /// HTTP status reported for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Config(_) | Self::Io(_) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::App(e) => match e {
                AppError::NotConnected => StatusCode::UNAUTHORIZED,
                AppError::UploadInFlight => StatusCode::CONFLICT,
                AppError::InsufficientBalance { .. } => StatusCode::PAYMENT_REQUIRED,
                AppError::InvalidLink => StatusCode::BAD_REQUEST,
                AppError::Walrus(WalrusError::BlobTooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
                AppError::Walrus(_) | AppError::Sui(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        }
        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
