use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::core::EntityId;
use crate::utils::error::{ErrorSeverity, PageError};
use crate::web::render::{error_page, not_found_page};
use crate::web::AppState;

/// Serves both `/:entity_id` and `/entities/:entity_id`.
pub async fn entity_page(
    State(state): State<AppState>,
    Path(entity_id): Path<String>,
) -> Result<Html<String>, PageError> {
    let id = EntityId::parse(entity_id)?;
    let page = state.loader.load(&id).await?;
    let html = state.renderer.render(&page)?;
    Ok(Html(html))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "entity-pages",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match &self {
            PageError::NotFound { id } => {
                (StatusCode::NOT_FOUND, Html(not_found_page(id))).into_response()
            }
            PageError::InvalidEntityId { .. } => {
                tracing::debug!("Rejected request: {}", self);
                (
                    StatusCode::BAD_REQUEST,
                    Html(error_page(400, &self.user_friendly_message())),
                )
                    .into_response()
            }
            _ => {
                if self.severity() >= ErrorSeverity::High {
                    tracing::error!(category = ?self.category(), "Request failed: {}", self);
                } else {
                    tracing::warn!(category = ?self.category(), "Request failed: {}", self);
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(error_page(500, "Something went wrong")),
                )
                    .into_response()
            }
        }
    }
}
