use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{ApartmentListing, FilterOptions, FilterQuery, MAX_GUESTS, MAX_STAY_NIGHTS};
use crate::services::catalog::{derive_filter_options, filter_catalog, find_by_id, sort_listings};
use crate::services::pricing::{quote_stay, StayQuote};
use crate::state::AppState;

// GET /api/apartments
pub async fn list_apartments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Json<Vec<ApartmentListing>> {
    let order = query.sort_order();
    let criteria = query.into_criteria();

    let mut results = filter_catalog(&state.catalog, &criteria);
    sort_listings(&mut results, order);

    tracing::debug!(
        matched = results.len(),
        total = state.catalog.len(),
        sort = ?order,
        "filtered catalog"
    );

    Json(results.into_iter().cloned().collect())
}

// GET /api/apartments/:id
pub async fn get_apartment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApartmentListing>, AppError> {
    find_by_id(&state.catalog, &id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("apartment {id}")))
}

// GET /api/filters
pub async fn get_filter_options(State(state): State<Arc<AppState>>) -> Json<FilterOptions> {
    Json(derive_filter_options(&state.catalog))
}

#[derive(Deserialize)]
pub struct QuoteQuery {
    pub nights: u32,
    pub guests: Option<u32>,
}

// GET /api/apartments/:id/quote
pub async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<StayQuote>, AppError> {
    let listing = find_by_id(&state.catalog, &id)
        .ok_or_else(|| AppError::NotFound(format!("apartment {id}")))?;

    let guests = query.guests.unwrap_or(1);
    if !(1..=MAX_STAY_NIGHTS).contains(&query.nights) {
        return Err(AppError::InvalidRequest(format!(
            "nights must be between 1 and {MAX_STAY_NIGHTS}"
        )));
    }
    if !(1..=MAX_GUESTS).contains(&guests) {
        return Err(AppError::InvalidRequest(format!(
            "guests must be between 1 and {MAX_GUESTS}"
        )));
    }
    if listing.pricing.is_none() {
        return Err(AppError::NotFound(format!("pricing for apartment {id}")));
    }

    quote_stay(listing, query.nights, guests)
        .map(Json)
        .ok_or_else(|| AppError::InvalidRequest(format!("quote for apartment {id} overflows")))
}
