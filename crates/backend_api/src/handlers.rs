use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use analytics_engine::summarize;
use csv_import::import_sales_from_csv;
use models::Sale;
use sales_store::SaleRepository;

use crate::{error::ApiError, export, Result};

pub type RepositoryState = Arc<dyn SaleRepository>;

/// Same invariants the import loop enforces per row
fn validate(sale: &Sale) -> Result<()> {
    if sale.customer_name.is_empty() || sale.cake.is_empty() {
        return Err(ApiError::BadRequest(
            "customerName and cake are required".to_string(),
        ));
    }
    if sale.quantity <= 0 || sale.price <= 0.0 {
        return Err(ApiError::BadRequest(
            "quantity and price must be positive".to_string(),
        ));
    }
    Ok(())
}

/// GET /api/sales
/// Returns the full sale collection, ordered by order date descending
pub async fn list_sales(State(repo): State<RepositoryState>) -> Result<impl IntoResponse> {
    let sales = repo.list().await?;
    Ok(Json(sales))
}

/// POST /api/sales
/// Persists a new sale; the store assigns the id and timestamps
pub async fn create_sale(
    State(repo): State<RepositoryState>,
    Json(sale): Json<Sale>,
) -> Result<impl IntoResponse> {
    validate(&sale)?;
    let id = repo.create(&sale).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "id": id })),
    ))
}

/// PUT /api/sales/:id
pub async fn update_sale(
    State(repo): State<RepositoryState>,
    Path(id): Path<String>,
    Json(sale): Json<Sale>,
) -> Result<impl IntoResponse> {
    validate(&sale)?;
    repo.update(&id, &sale).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// DELETE /api/sales/:id
pub async fn delete_sale(
    State(repo): State<RepositoryState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    repo.delete(&id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /api/sales/import
/// Accepts a raw CSV body and runs the import pipeline; per-row failures
/// land in the report, not in the response status
pub async fn import_sales(
    State(repo): State<RepositoryState>,
    body: String,
) -> Result<impl IntoResponse> {
    let report = import_sales_from_csv(repo.as_ref(), &body).await;
    tracing::info!(
        "CSV import finished: {} succeeded, {} failed",
        report.success,
        report.failed
    );
    Ok(Json(report))
}

/// GET /api/analytics
/// Recomputes the dashboard aggregates from the full collection
pub async fn get_analytics(State(repo): State<RepositoryState>) -> Result<impl IntoResponse> {
    let sales = repo.list().await?;
    Ok(Json(summarize(&sales)))
}

/// GET /api/sales/export
/// Returns the collection as a CSV attachment mirroring the import schema
pub async fn export_sales(State(repo): State<RepositoryState>) -> Result<impl IntoResponse> {
    let sales = repo.list().await?;
    let csv = export::sales_to_csv(&sales);

    let filename = format!("sales_export_{}.csv", Utc::now().format("%Y-%m-%d"));
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        "text/csv; charset=utf-8".parse().unwrap(),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{}\"", filename)
            .parse()
            .unwrap(),
    );

    Ok((StatusCode::OK, headers, csv))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "cake-sales-api"
    }))
}
