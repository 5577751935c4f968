use crate::dtos::{CreateProductRequest, ListProductsParams, ProductView};
use crate::services::{ProductFilter, DEFAULT_LIST_LIMIT};
use crate::startup::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

#[tracing::instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListProductsParams>,
) -> Result<Json<Vec<ProductView>>, AppError> {
    // An empty `category=` is treated as no filter.
    let filter = ProductFilter {
        category: params.category.filter(|c| !c.is_empty()),
    };
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);

    let products = state.catalog.list(&filter, limit).await?;
    Ok(Json(products))
}

#[tracing::instrument(skip(state, request))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductView>), AppError> {
    let product = state.catalog.create(request).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[tracing::instrument(skip(state))]
pub async fn seed_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductView>>, AppError> {
    let products = state.catalog.seed().await?;
    Ok(Json(products))
}
