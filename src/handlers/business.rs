use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::models::{business_status, BusinessStatus};
use crate::state::AppState;

#[derive(Serialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    status: BusinessStatus,
    hours: String,
}

// GET /api/business/status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let now = state.local_now();
    Json(StatusResponse {
        status: business_status(&now, &state.config.business_hours),
        hours: state.config.business_hours.to_human_readable(),
    })
}
