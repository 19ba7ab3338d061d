use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{IntentKind, IntentRequest};
use crate::services::whatsapp::{build_deep_link_for, Platform};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LinkRequest {
    #[serde(flatten)]
    pub intent: IntentRequest,
    #[serde(default)]
    pub platform: Platform,
}

#[derive(Serialize)]
pub struct LinkResponse {
    pub kind: IntentKind,
    pub message: String,
    pub url: String,
}

// POST /api/whatsapp/link
pub async fn create_link(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let intent = payload.intent.resolve(&state.catalog).map_err(|e| {
        tracing::warn!(kind = payload.intent.kind.as_str(), error = %e, "rejected booking intent");
        e
    })?;

    let message = state.composer.compose(&intent);
    let length = message.chars().count();
    if length > state.config.max_message_length {
        tracing::warn!(
            length,
            max = state.config.max_message_length,
            "composed message exceeds recommended length"
        );
    }

    let url = build_deep_link_for(&message, &state.config.whatsapp_number, payload.platform)?;

    tracing::info!(
        kind = intent.kind().as_str(),
        apartment = payload.intent.apartment_id.as_deref().unwrap_or("-"),
        platform = ?payload.platform,
        "built whatsapp link"
    );

    Ok(Json(LinkResponse {
        kind: intent.kind(),
        message,
        url,
    }))
}
