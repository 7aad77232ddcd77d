use actix_web::{http::StatusCode, test, test::TestRequest, App};
use serde_json::json;

use super::helpers::*;
use crate::utils::auth::{TokenIssuer, TOKEN_AUDIENCE, TOKEN_ISSUER};

#[actix_web::test]
async fn login_with_admin_credentials() {
    let app = test::init_service(App::new().configure(configure_app(temp_store()))).await;
    let req = TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::OK, "was: {body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["tokenType"], "Bearer");
    assert_eq!(body["data"]["user"], json!({ "email": ADMIN_EMAIL, "role": "admin" }));

    let token = body["data"]["token"].as_str().unwrap();
    let claims = TokenIssuer::new(JWT_SECRET).verify(token).unwrap();
    assert_eq!(claims.sub, ADMIN_EMAIL);
    assert_eq!(claims.iss, TOKEN_ISSUER);
    assert_eq!(claims.aud, TOKEN_AUDIENCE);
}

#[actix_web::test]
async fn login_with_wrong_password() {
    let app = test::init_service(App::new().configure(configure_app(temp_store()))).await;
    let req = TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": ADMIN_EMAIL, "password": "guess" }))
        .to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "InvalidCredentials");
    assert!(body.get("data").is_none());
}

#[actix_web::test]
async fn login_with_missing_password() {
    let app = test::init_service(App::new().configure(configure_app(temp_store()))).await;
    let req = TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": ADMIN_EMAIL }))
        .to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "IncompleteCredentials");
}

#[actix_web::test]
async fn login_with_malformed_body() {
    let app = test::init_service(App::new().configure(configure_app(temp_store()))).await;
    let req = TestRequest::post()
        .uri("/auth/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidBody");
}

#[actix_web::test]
async fn verify_without_token() {
    let app = test::init_service(App::new().configure(configure_app(temp_store()))).await;
    let req = TestRequest::get().uri("/auth/verify").to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TokenRequired");
}

#[actix_web::test]
async fn verify_valid_token_echoes_expiry() {
    let app = test::init_service(App::new().configure(configure_app(temp_store()))).await;
    let token = valid_token();
    let req = TestRequest::get().uri("/auth/verify").insert_header(bearer(&token)).to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::OK, "was: {body}");
    assert_eq!(body["data"]["valid"], true);
    assert_eq!(body["data"]["user"]["email"], ADMIN_EMAIL);

    let exp = body["data"]["user"]["exp"].as_i64().unwrap();
    let expires_at = body["data"]["expiresAt"].as_str().unwrap();
    let expires_at = chrono::DateTime::parse_from_rfc3339(expires_at).unwrap();
    assert_eq!(expires_at.timestamp(), exp);
}

#[actix_web::test]
async fn verify_expired_token() {
    let app = test::init_service(App::new().configure(configure_app(temp_store()))).await;
    let req = TestRequest::get()
        .uri("/auth/verify")
        .insert_header(bearer(&expired_token()))
        .to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TokenExpired");
}

#[actix_web::test]
async fn verify_foreign_token_is_unauthorized() {
    let app = test::init_service(App::new().configure(configure_app(temp_store()))).await;
    let req = TestRequest::get()
        .uri("/auth/verify")
        .insert_header(bearer(&foreign_token()))
        .to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TokenInvalid");
}
