use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;

use super::auth::{AuthenticatedUser, actor};
use super::{ApiError, AppState, ItemDto, MessageResponse};
use crate::api::validation::validate_item_id;
use crate::services::ItemInput;

/// GET /items
pub async fn list_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ItemDto>>, ApiError> {
    let items = state.inventory_service.list_items().await?;
    Ok(Json(items.into_iter().map(ItemDto::from).collect()))
}

/// GET /items/{id}
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ItemDto>, ApiError> {
    let id = validate_item_id(&id)?;
    let item = state.inventory_service.get_item(id).await?;
    Ok(Json(item.into()))
}

/// POST /items
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    user: Option<Extension<AuthenticatedUser>>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(input) = payload?;

    let id = state.inventory_service.create_item(input).await?;
    info!(item_id = %id, user_id = %actor(user), "Inventory item created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_id("Item added successfully", id)),
    ))
}

/// PUT /items/{id}
///
/// Full replace: fields omitted from the body are cleared.
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    user: Option<Extension<AuthenticatedUser>>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = validate_item_id(&id)?;
    let Json(input) = payload?;

    state.inventory_service.update_item(id, input).await?;
    info!(item_id = %id, user_id = %actor(user), "Inventory item updated");

    Ok(Json(MessageResponse::new("Item updated successfully")))
}

/// DELETE /items/{id}
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = validate_item_id(&id)?;

    if state.inventory_service.delete_item(id).await? {
        info!(item_id = %id, user_id = %actor(user), "Inventory item deleted");
    }

    Ok(Json(MessageResponse::new("Item deleted successfully")))
}
