use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use shadeworks_pricing::{PriceBreakdown, PricingError, SelectionState};

use crate::middleware::RequestId;

use super::{map_pricing_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct SelectionIssue {
    code: &'static str,
    field: Option<String>,
    message: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ValidationReport {
    valid: bool,
    issues: Vec<SelectionIssue>,
}

impl From<&PricingError> for SelectionIssue {
    fn from(err: &PricingError) -> Self {
        Self {
            code: err.code(),
            field: err.field(),
            message: err.to_string(),
        }
    }
}

/// Live price for a selection. Called on every configurator change.
pub(super) async fn quote_selection(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<String>,
    Json(selection): Json<SelectionState>,
) -> Result<Json<ApiResponse<PriceBreakdown>>, ApiError> {
    let breakdown = state
        .catalog
        .price(&product_id, &selection)
        .map_err(|e| map_pricing_error(req_id.0.clone(), &e))?;

    tracing::debug!(
        product_id = %product_id,
        total = %breakdown.total,
        "quoted selection"
    );

    Ok(Json(ApiResponse {
        data: breakdown,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Reports every problem with a selection at once so a form can flag all
/// offending fields. Catalog failures still surface as errors.
pub(super) async fn validate_selection(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<String>,
    Json(selection): Json<SelectionState>,
) -> Result<Json<ApiResponse<ValidationReport>>, ApiError> {
    let issues = state
        .catalog
        .selection_issues(&product_id, &selection)
        .map_err(|e| map_pricing_error(req_id.0.clone(), &e))?;

    if let Some(broken) = issues.iter().find(|e| !e.is_user_correctable()) {
        return Err(map_pricing_error(req_id.0, broken));
    }

    Ok(Json(ApiResponse {
        data: ValidationReport {
            valid: issues.is_empty(),
            issues: issues.iter().map(SelectionIssue::from).collect(),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
