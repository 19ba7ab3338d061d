pub mod business;
pub mod catalog;
pub mod health;
pub mod whatsapp;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/apartments", get(catalog::list_apartments))
        .route("/api/apartments/:id", get(catalog::get_apartment))
        .route("/api/apartments/:id/quote", get(catalog::get_quote))
        .route("/api/filters", get(catalog::get_filter_options))
        .route("/api/whatsapp/link", post(whatsapp::create_link))
        .route("/api/business/status", get(business::get_status))
        .with_state(state)
}
