use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use douala_stays::config::AppConfig;
use douala_stays::handlers;
use douala_stays::services::catalog;
use douala_stays::services::whatsapp::decode_text_param;
use douala_stays::state::AppState;

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        whatsapp_number: "+237 656 46 70 51".to_string(),
        ..AppConfig::default()
    }
}

fn test_app() -> Router {
    let listings = catalog::builtin_catalog().unwrap();
    handlers::router(Arc::new(AppState::new(test_config(), listings)))
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let res = test_app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null))
}

async fn post_json(uri: &str, payload: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let res = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null))
}

fn ids(json: &serde_json::Value) -> Vec<String> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap().to_string())
        .collect()
}

// ── Catalog ──

#[tokio::test]
async fn test_health() {
    let (status, json) = get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_list_all_apartments_in_catalog_order() {
    let (status, json) = get_json("/api/apartments").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ids(&json),
        vec!["apt_001", "apt_002", "apt_003", "apt_004", "apt_005"]
    );
}

#[tokio::test]
async fn test_filter_by_price_window() {
    let (status, json) = get_json("/api/apartments?min_price=30000&max_price=50000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&json), vec!["apt_001", "apt_002"]);
}

#[tokio::test]
async fn test_filter_amenities_and_capacity() {
    let (_, json) = get_json("/api/apartments?amenities=view,concierge&capacity=6").await;
    assert_eq!(ids(&json), vec!["apt_003", "apt_004"]);
}

#[tokio::test]
async fn test_malformed_filter_values_are_ignored() {
    let (status, json) = get_json("/api/apartments?min_price=abc&type=castle&quarter=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&json).len(), 5);
}

#[tokio::test]
async fn test_filter_with_no_match_is_empty() {
    let (status, json) = get_json("/api/apartments?quarter=Yaounde").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_sorted_by_price_desc() {
    let (_, json) = get_json("/api/apartments?type=studio&sort=price_desc").await;
    assert_eq!(ids(&json), vec!["apt_001", "apt_005"]);
    let (_, json) = get_json("/api/apartments?type=studio&sort=price_asc").await;
    assert_eq!(ids(&json), vec!["apt_005", "apt_001"]);
}

#[tokio::test]
async fn test_get_apartment() {
    let (status, json) = get_json("/api/apartments/apt_003").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Villa Familiale Akwa");
    assert_eq!(json["type"], "t3");

    let (status, json) = get_json("/api/apartments/apt_999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("apt_999"));
}

#[tokio::test]
async fn test_filter_options() {
    let (status, json) = get_json("/api/filters").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["types"], serde_json::json!(["studio", "t2", "t3"]));
    assert_eq!(json["quarters"].as_array().unwrap().len(), 5);
    assert_eq!(json["amenities"][0], "ac");
    assert_eq!(json["price_range"]["min"], 28000);
    assert_eq!(json["price_range"]["max"], 75000);
}

#[tokio::test]
async fn test_quote() {
    let (status, json) = get_json("/api/apartments/apt_001/quote?nights=10&guests=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["base_price"], 315000);
    assert_eq!(json["total"], 330000);
    assert_eq!(json["savings"], 35000);
}

#[tokio::test]
async fn test_quote_rejects_out_of_range_values() {
    let (status, json) =
        get_json("/api/apartments/apt_001/quote?nights=4294967295&guests=4294967295").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"].as_str().unwrap().contains("nights"));

    let (status, _) = get_json("/api/apartments/apt_001/quote?nights=3&guests=4294967295").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = get_json("/api/apartments/apt_001/quote?nights=0").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

// ── WhatsApp links ──

#[tokio::test]
async fn test_reservation_link() {
    let (status, json) = post_json(
        "/api/whatsapp/link",
        serde_json::json!({
            "kind": "reservation",
            "apartment_id": "apt_002",
            "check_in": "2025-09-15",
            "check_out": "2025-09-18",
            "adults": 2
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["kind"], "reservation");

    let url = json["url"].as_str().unwrap();
    assert!(url.starts_with("https://wa.me/237656467051?text="));

    let message = json["message"].as_str().unwrap();
    assert_eq!(decode_text_param(url).as_deref(), Some(message));
    assert!(message.contains("Appartement Business Bonanjo"));
    assert!(message.contains("Durée: 3 nuit(s)"));
    // 3 x 45 000 + 20 000 cleaning
    assert!(message.contains("Prix estimé: 155 000 FCFA"));
}

#[tokio::test]
async fn test_reservation_without_apartment_is_rejected() {
    let (status, json) = post_json(
        "/api/whatsapp/link",
        serde_json::json!({
            "kind": "reservation",
            "check_in": "2025-09-15",
            "check_out": "2025-09-18",
            "adults": 2
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json.get("url").is_none());
    assert!(json["error"].as_str().unwrap().contains("apartment"));
}

#[tokio::test]
async fn test_reservation_reversed_dates_rejected() {
    let (status, _) = post_json(
        "/api/whatsapp/link",
        serde_json::json!({
            "kind": "reservation",
            "apartment_id": "apt_001",
            "check_in": "2025-09-18",
            "check_out": "2025-09-15",
            "adults": 1
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_reservation_with_huge_party_rejected() {
    let (status, json) = post_json(
        "/api/whatsapp/link",
        serde_json::json!({
            "kind": "reservation",
            "apartment_id": "apt_001",
            "check_in": "2025-09-15",
            "check_out": "2025-09-18",
            "adults": 4294967295u64,
            "children": 1
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json.get("url").is_none());
    assert!(json["error"].as_str().unwrap().contains("guests"));
}

#[tokio::test]
async fn test_general_inquiry_link_has_defaults() {
    let (status, json) = post_json(
        "/api/whatsapp/link",
        serde_json::json!({ "kind": "inquiry", "budget": null, "guests": null }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("Flexible"));
    assert!(message.contains("Demande générale"));
    assert!(!message.contains("undefined"));
    assert!(!message.contains("null"));
}

#[tokio::test]
async fn test_virtual_tour_mobile_link() {
    let (status, json) = post_json(
        "/api/whatsapp/link",
        serde_json::json!({
            "kind": "virtual_tour",
            "apartment_id": "apt_004",
            "preferred_date": "2025-09-20",
            "platform": "mobile_app"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let url = json["url"].as_str().unwrap();
    assert!(url.starts_with("whatsapp://send?phone=237656467051&text="));
    let message = decode_text_param(url).unwrap();
    assert!(message.contains("Résidence Executive Bonamoussadi"));
    assert!(message.contains("samedi 20 septembre 2025"));
}

#[tokio::test]
async fn test_support_link() {
    let (status, json) = post_json(
        "/api/whatsapp/link",
        serde_json::json!({
            "kind": "support",
            "description": "Plus d'eau chaude",
            "urgency": "high",
            "platform": "web_client"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["url"]
        .as_str()
        .unwrap()
        .starts_with("https://web.whatsapp.com/send?phone=237656467051"));
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("Urgence: Élevée"));
    assert!(message.contains("Appartement concerné: N/A"));
}

#[tokio::test]
async fn test_support_without_description_rejected() {
    let (status, _) = post_json("/api/whatsapp/link", serde_json::json!({ "kind": "support" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

// ── Business hours ──

#[tokio::test]
async fn test_business_status_shape() {
    let (status, json) = get_json("/api/business/status").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["open"].is_boolean());
    assert!(json["message"].is_string());
    assert!(json["response_time"].is_string());
    assert!(json["hours"]
        .as_str()
        .unwrap()
        .starts_with("Lundi: 08:00-20:00"));
}
