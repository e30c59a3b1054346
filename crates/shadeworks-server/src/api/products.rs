use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use shadeworks_core::ProductSummary;
use shadeworks_pricing::CustomizationCategory;

use crate::middleware::RequestId;

use super::{map_pricing_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ProductQuery {
    /// Product family, e.g. `roller`.
    pub category: Option<String>,
    /// Exact URL slug; narrows the list to at most one product.
    pub slug: Option<String>,
    pub motorizable: Option<bool>,
}

/// Everything a product page needs to render its configurator.
#[derive(Debug, Serialize)]
pub(super) struct ProductCustomizations {
    product: ProductSummary,
    categories: Vec<CustomizationCategory>,
}

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProductQuery>,
) -> Json<ApiResponse<Vec<ProductSummary>>> {
    let catalog = &state.catalog;
    let mut data = match query.slug.as_deref() {
        Some(slug) => shadeworks_core::find_by_slug(catalog, slug)
            .filter(|p| {
                query
                    .category
                    .as_deref()
                    .is_none_or(|f| p.category.eq_ignore_ascii_case(f))
            })
            .map(|p| ProductSummary::from_product(p, &catalog.currency_code))
            .into_iter()
            .collect(),
        None => shadeworks_core::list_products(catalog, query.category.as_deref()),
    };
    if let Some(motorizable) = query.motorizable {
        data.retain(|p: &ProductSummary| p.is_motorizable() == motorizable);
    }

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn list_customizations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<String>,
) -> Result<Json<ApiResponse<ProductCustomizations>>, ApiError> {
    let catalog = &state.catalog;
    let product = catalog
        .product(&product_id)
        .map_err(|e| map_pricing_error(req_id.0.clone(), &e))?;
    let categories = catalog
        .resolve_catalog(&product_id)
        .map_err(|e| map_pricing_error(req_id.0.clone(), &e))?
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ApiResponse {
        data: ProductCustomizations {
            product: ProductSummary::from_product(product, &catalog.currency_code),
            categories,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
