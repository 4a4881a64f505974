use axum::{body::Body, extract::Request, http::Method};

use crate::server::middleware::{
    api_key::extract_api_key, csrf::requires_token, return_to::is_return_target,
};

#[test]
fn api_key_prefers_query_over_header() {
    let request = Request::builder()
        .uri("/api/events/find?apikey=from-query")
        .header("apikey", "from-header")
        .body(Body::empty())
        .unwrap();

    assert_eq!(extract_api_key(&request).as_deref(), Some("from-query"));
}

#[test]
fn api_key_falls_back_to_header() {
    let request = Request::builder()
        .uri("/api/events/find")
        .header("apikey", "from-header")
        .body(Body::empty())
        .unwrap();

    assert_eq!(extract_api_key(&request).as_deref(), Some("from-header"));

    let bare = Request::builder()
        .uri("/api/events/find")
        .body(Body::empty())
        .unwrap();
    assert_eq!(extract_api_key(&bare), None);
}

#[test]
fn csrf_applies_to_form_posts_only() {
    assert!(requires_token(&Method::POST, "/login"));
    assert!(requires_token(&Method::POST, "/admin/event/delete"));
    assert!(!requires_token(&Method::GET, "/account"));
    assert!(!requires_token(&Method::POST, "/api/login"));
    assert!(requires_token(&Method::POST, "/apiary"));
}

#[test]
fn return_target_skips_auth_and_assets() {
    assert!(is_return_target("/account"));
    assert!(is_return_target("/api/foursquare"));
    assert!(!is_return_target("/login"));
    assert!(!is_return_target("/signup"));
    assert!(!is_return_target("/auth/google/callback"));
    assert!(!is_return_target("/uploads/photo.png"));
}
