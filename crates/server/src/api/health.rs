use axum::Json;
use axum::extract::State;

use super::AppState;
use super::schemas::HealthResponse;

/// `GET /health` -- service status and the connected wallet.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    summary = "Health check",
    description = "Returns service status and the address of the connected wallet, if any.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
        wallet: state.wallet_address().cloned(),
    })
}
