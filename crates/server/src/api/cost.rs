use axum::Json;
use axum::extract::State;
use tracing::instrument;

use super::AppState;
use super::schemas::{CostRequest, CostResponse, ErrorResponse};

/// `POST /v1/cost` -- quote storage for a file size and compare with the WAL balance.
///
/// A failed quote is reported in `error` with status 200; a failed balance
/// lookup leaves the balance absent.
#[utoipa::path(
    post,
    path = "/v1/cost",
    tag = "Cost",
    summary = "Estimate storage cost",
    description = "Quotes the Walrus storage cost for a file size and compares it with the owner's WAL balance.",
    request_body = CostRequest,
    responses(
        (status = 200, description = "Cost estimate", body = CostResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
    )
)]
#[instrument(skip_all, fields(size = request.size))]
pub async fn estimate_cost(
    State(state): State<AppState>,
    Json(request): Json<CostRequest>,
) -> Json<CostResponse> {
    let owner = state.owner_or_wallet(request.owner);
    let estimator = state.estimator(request.epochs);
    let snapshot = estimator.estimate(request.size, owner).await;
    Json(CostResponse::new(&snapshot, estimator.epochs()))
}
