#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use rust_docvault::storage::Storage;
use serde_json::{Value, json};

use common::TestContext;

fn create_user_request(body: Value) -> test::TestRequest {
    test::TestRequest::post().uri("/users").set_json(body)
}

#[actix_web::test]
async fn test_create_user() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        create_user_request(json!({ "name": "A", "email": "a@x.com", "password": "p" })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User added successfully!");
    assert_eq!(body["user"]["name"], "A");
    assert_eq!(body["user"]["email"], "a@x.com");
    assert!(body["user"].get("password").is_none());

    // 密码按原样保存
    let stored = ctx
        .storage
        .get_user_by_email("a@x.com")
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(stored.password, "p");
}

#[actix_web::test]
async fn test_duplicate_email_is_rejected() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let first = test::call_service(
        &app,
        create_user_request(json!({ "name": "A", "email": "a@x.com", "password": "p" })).to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = test::call_service(
        &app,
        create_user_request(json!({ "name": "B", "email": "a@x.com", "password": "q" })).to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(second).await;
    assert_eq!(body["message"], "A user with this email already exists");

    // 第一条记录保持不变
    let stored = ctx
        .storage
        .get_user_by_email("a@x.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "A");
    assert_eq!(stored.password, "p");
}

#[actix_web::test]
async fn test_missing_field_is_validation_error() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        create_user_request(json!({ "name": "A", "email": "a@x.com" })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("password"));
}

#[actix_web::test]
async fn test_blank_field_is_validation_error() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        create_user_request(json!({ "name": "", "email": "a@x.com", "password": "p" })).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Missing required field(s): name");
    assert!(ctx.storage.get_user_by_email("a@x.com").await.unwrap().is_none());
}
