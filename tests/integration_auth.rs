#![cfg(feature = "integration")]

mod common;

use axum::http::StatusCode;
use common::{
    create_organization, create_user, generate_unique_email, get, json_body, request, test_state,
};
use serde_json::json;
use sqlx::PgPool;
use taskhub::router::init_router;
use taskhub_auth::Role;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_sign_up_returns_user_and_token(pool: PgPool) {
    let organization_id = create_organization(&pool, "Acme").await;
    let state = test_state(pool);
    let email = generate_unique_email();

    let response = init_router(state.clone())
        .oneshot(request(
            "POST",
            "/auth/sign-up",
            None,
            Some(json!({
                "name": "Jane Doe",
                "email": email,
                "password": "password123",
                "organization_id": organization_id,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["user"]["email"], email);
    assert_eq!(body["user"]["role"], "USER");
    assert!(body["user"].get("password").is_none());

    let identity = state.tokens.decode(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(identity.email, email);
    assert_eq!(identity.tenant_id, Some(organization_id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sign_up_duplicate_email(pool: PgPool) {
    let existing = create_user(&pool, Role::User, None).await;
    let app = init_router(test_state(pool));

    let response = app
        .oneshot(request(
            "POST",
            "/auth/sign-up",
            None,
            Some(json!({
                "name": "Someone Else",
                "email": existing.identity.email,
                "password": "password123",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sign_up_unknown_organization(pool: PgPool) {
    let app = init_router(test_state(pool));

    let response = app
        .oneshot(request(
            "POST",
            "/auth/sign-up",
            None,
            Some(json!({
                "name": "Jane Doe",
                "email": generate_unique_email(),
                "password": "password123",
                "organization_id": uuid::Uuid::new_v4(),
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sign_in_then_use_token(pool: PgPool) {
    let organization_id = create_organization(&pool, "Acme").await;
    let user = create_user(&pool, Role::Manager, Some(organization_id)).await;
    let app = init_router(test_state(pool));

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/auth/sign-in",
            None,
            Some(json!({ "email": user.identity.email, "password": user.password })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let token = body["token"].as_str().unwrap().to_string();

    let response = app.oneshot(get("/users", Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sign_in_wrong_password(pool: PgPool) {
    let user = create_user(&pool, Role::User, None).await;
    let app = init_router(test_state(pool));

    for (email, password) in [
        (user.identity.email.as_str(), "wrongpass"),
        ("nobody@example.com", "testpass123"),
    ] {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/auth/sign-in",
                None,
                Some(json!({ "email": email, "password": password })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Invalid email or password");
    }
}
