use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use shadeworks_pricing::{PriceBreakdown, SelectionState};

use crate::middleware::RequestId;

use super::{map_pricing_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// A line as submitted at checkout: the buyer's selection and the price the
/// storefront showed them.
#[derive(Debug, Deserialize)]
pub(super) struct VerifyOrderRequest {
    pub product_id: String,
    pub selection: SelectionState,
    pub breakdown: PriceBreakdown,
}

/// Re-prices a submitted line on the server. The client total is never
/// trusted; a mismatch is rejected with `price_mismatch`.
pub(super) async fn verify_order(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<VerifyOrderRequest>,
) -> Result<Json<ApiResponse<PriceBreakdown>>, ApiError> {
    let verified = state
        .catalog
        .verify(&body.product_id, &body.selection, &body.breakdown)
        .map_err(|e| map_pricing_error(req_id.0.clone(), &e))?;

    tracing::info!(
        product_id = %verified.product_id,
        total = %verified.total,
        "order line verified"
    );

    Ok(Json(ApiResponse {
        data: verified,
        meta: ResponseMeta::new(req_id.0),
    }))
}
