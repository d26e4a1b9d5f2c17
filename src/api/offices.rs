use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, AppState, OfficeDto};

/// GET /offices
pub async fn list_offices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OfficeDto>>, ApiError> {
    let offices = state.inventory_service.list_offices().await?;
    Ok(Json(offices.into_iter().map(OfficeDto::from).collect()))
}
