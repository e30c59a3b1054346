mod orders;
mod products;
mod quotes;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shadeworks_pricing::{Catalog, PricingError};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

/// Shared handler state. The catalog is loaded and validated once at startup
/// and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    /// Selection field the error refers to (`"width"`, `"mount"`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    products: usize,
    currency_code: String,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
                field: None,
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: Option<String>) -> Self {
        self.error.field = field;
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "price_mismatch" => StatusCode::CONFLICT,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Translates a pricing failure into the API error envelope.
///
/// Buyer-correctable problems become `validation_error` with the offending
/// field. Catalog problems are logged and reported without internals.
pub(super) fn map_pricing_error(request_id: String, error: &PricingError) -> ApiError {
    match error {
        e if e.is_user_correctable() => {
            tracing::debug!(code = e.code(), error = %e, "selection rejected");
            ApiError::new(request_id, "validation_error", e.to_string()).with_field(e.field())
        }
        PricingError::NotFound { .. } => ApiError::new(request_id, "not_found", error.to_string()),
        PricingError::PriceMismatch { .. } => {
            tracing::warn!(error = %error, "submitted price does not match server price");
            ApiError::new(request_id, "price_mismatch", error.to_string())
        }
        _ => {
            tracing::error!(error = %error, "catalog integrity failure while pricing");
            ApiError::new(
                request_id,
                "catalog_integrity",
                "product pricing is misconfigured; checkout is unavailable for this product",
            )
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

fn pricing_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/products", get(products::list_products))
        .route(
            "/api/v1/products/{product_id}/customizations",
            get(products::list_customizations),
        )
        .route(
            "/api/v1/products/{product_id}/quote",
            post(quotes::quote_selection),
        )
        .route(
            "/api/v1/products/{product_id}/validate",
            post(quotes::validate_selection),
        )
        .route("/api/v1/orders/verify", post(orders::verify_order))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(pricing_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<HealthData>> {
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            products: state.catalog.products.len(),
            currency_code: state.catalog.currency_code.clone(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
