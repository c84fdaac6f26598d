use crate::error::AppError;
use crate::models::{
    AcquisitionInput, ConsumptionOutcome, FoodItem, ShoppingPriority, StorageType, UserProfile,
};
use crate::service::{InventoryService, ShoppingListService};
use axum::{
    extract::{Json, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Request body: free-text acquisition, optional storage override.
#[derive(Debug, Deserialize)]
pub struct RegisterTextRequest {
    pub text: String,
    pub storage: Option<StorageType>,
}

/// Request body: base64 photo acquisition.
#[derive(Debug, Deserialize)]
pub struct RegisterPhotoRequest {
    pub image_base64: String,
    pub mime_type: String,
    pub storage: Option<StorageType>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub items: Vec<FoodItem>,
}

#[derive(Debug, Deserialize)]
pub struct ConsumeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ConsumeResponse {
    pub success: bool,
    pub message: String,
    pub outcomes: Vec<ConsumptionOutcome>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ListInventoryParams {
    #[serde(default)]
    pub include_history: bool,
}

#[derive(Debug, Deserialize)]
pub struct ManualAddRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AdjustQuantityRequest {
    pub delta: i32,
}

#[derive(Debug, Deserialize)]
pub struct SetPriorityRequest {
    pub priority: ShoppingPriority,
}

/// Health probe.
pub async fn health_check() -> &'static str {
    "OK"
}

/// Register groceries described in free text.
pub async fn register_text(
    State(service): State<Arc<InventoryService>>,
    Json(req): Json<RegisterTextRequest>,
) -> Response {
    let input = AcquisitionInput::text(req.text, req.storage);
    match service.register_acquisition(input).await {
        Ok(items) => {
            let response = RegisterResponse {
                success: true,
                message: format!("Registered {} items", items.len()),
                items,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Register groceries from a photo.
pub async fn register_photo(
    State(service): State<Arc<InventoryService>>,
    Json(req): Json<RegisterPhotoRequest>,
) -> Response {
    let data = match STANDARD.decode(req.image_base64.as_bytes()) {
        Ok(data) => data,
        Err(e) => {
            return AppError::InvalidInput(format!("image payload is not valid base64: {e}"))
                .into_response()
        }
    };
    let input = AcquisitionInput::image(data, req.mime_type, req.storage);
    match service.register_acquisition(input).await {
        Ok(items) => {
            let response = RegisterResponse {
                success: true,
                message: format!("Registered {} items", items.len()),
                items,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Reconcile a consumption statement against the inventory.
pub async fn consume(
    State(service): State<Arc<InventoryService>>,
    Json(req): Json<ConsumeRequest>,
) -> Response {
    match service.consume(&req.text).await {
        Ok(outcomes) => {
            let response = ConsumeResponse {
                success: true,
                message: format!("Reconciled {} consumption records", outcomes.len()),
                outcomes,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Mark a batch as spoiled. Idempotent from the caller's point of view.
pub async fn mark_spoiled(
    State(service): State<Arc<InventoryService>>,
    Path(id): Path<Uuid>,
) -> Response {
    let marked = service.mark_spoiled(id).await;
    let response = StatusResponse {
        success: true,
        message: if marked {
            "Item marked as spoiled".to_string()
        } else {
            "Item not found, nothing to do".to_string()
        },
    };
    (StatusCode::OK, Json(response)).into_response()
}

pub async fn list_inventory(
    State(service): State<Arc<InventoryService>>,
    Query(params): Query<ListInventoryParams>,
) -> Response {
    let entries = service.list_inventory(params.include_history).await;
    (StatusCode::OK, Json(entries)).into_response()
}

pub async fn waste_stats(State(service): State<Arc<InventoryService>>) -> Response {
    let report = service.waste_report().await;
    (StatusCode::OK, Json(report)).into_response()
}

pub async fn get_profile(State(service): State<Arc<InventoryService>>) -> Response {
    (StatusCode::OK, Json(service.profile().await)).into_response()
}

pub async fn update_profile(
    State(service): State<Arc<InventoryService>>,
    Json(profile): Json<UserProfile>,
) -> Response {
    (StatusCode::OK, Json(service.update_profile(profile).await)).into_response()
}

pub async fn shopping_list(State(service): State<Arc<ShoppingListService>>) -> Response {
    (StatusCode::OK, Json(service.list().await)).into_response()
}

pub async fn manual_add(
    State(service): State<Arc<ShoppingListService>>,
    Json(req): Json<ManualAddRequest>,
) -> Response {
    match service.manual_add(&req.name).await {
        Some(entry) => (StatusCode::OK, Json(entry)).into_response(),
        None => {
            let response = StatusResponse {
                success: true,
                message: "Empty name ignored".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
    }
}

pub async fn adjust_quantity(
    State(service): State<Arc<ShoppingListService>>,
    Path(id): Path<Uuid>,
    Json(req): Json<AdjustQuantityRequest>,
) -> Response {
    match service.adjust_quantity(id, req.delta).await {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn set_priority(
    State(service): State<Arc<ShoppingListService>>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetPriorityRequest>,
) -> Response {
    match service.set_priority(id, req.priority).await {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn remove_shopping_item(
    State(service): State<Arc<ShoppingListService>>,
    Path(id): Path<Uuid>,
) -> Response {
    service.remove(id).await;
    let response = StatusResponse {
        success: true,
        message: "Entry removed".to_string(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

pub async fn clear_shopping_list(State(service): State<Arc<ShoppingListService>>) -> Response {
    let removed = service.clear().await;
    let response = StatusResponse {
        success: true,
        message: format!("Removed {removed} entries"),
    };
    (StatusCode::OK, Json(response)).into_response()
}

pub async fn export_shopping_list(State(service): State<Arc<ShoppingListService>>) -> Response {
    match service.export_csv().await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv")],
            bytes,
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
