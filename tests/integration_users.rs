#![cfg(feature = "integration")]

mod common;

use axum::http::StatusCode;
use common::{create_organization, create_user, get, json_body, request, test_state, token_for};
use serde_json::json;
use sqlx::PgPool;
use taskhub::router::init_router;
use taskhub_auth::Role;
use tower::ServiceExt;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_update_own_account(pool: PgPool) {
    let organization_id = create_organization(&pool, "Acme").await;
    let user = create_user(&pool, Role::User, Some(organization_id)).await;
    let state = test_state(pool);
    let token = token_for(&state, &user.identity);
    let uri = format!("/users/{}", user.identity.subject_id);

    let response = init_router(state)
        .oneshot(request("PATCH", &uri, Some(&token), Some(json!({ "name": "New Name" }))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["name"], "New Name");
    assert_eq!(body["email"], user.identity.email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_other_account_forbidden(pool: PgPool) {
    let organization_id = create_organization(&pool, "Acme").await;
    let owner = create_user(&pool, Role::Owner, Some(organization_id)).await;
    let member = create_user(&pool, Role::User, Some(organization_id)).await;
    let state = test_state(pool.clone());
    let token = token_for(&state, &owner.identity);
    let uri = format!("/users/{}", member.identity.subject_id);

    let response = init_router(state)
        .oneshot(request("PATCH", &uri, Some(&token), Some(json!({ "name": "Hijacked" }))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let name: String = sqlx::query_scalar("SELECT name FROM users WHERE id = $1")
        .bind(member.identity.subject_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "Test User");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_rejects_role_change(pool: PgPool) {
    let organization_id = create_organization(&pool, "Acme").await;
    let user = create_user(&pool, Role::User, Some(organization_id)).await;
    let state = test_state(pool);
    let token = token_for(&state, &user.identity);
    let uri = format!("/users/{}", user.identity.subject_id);

    let response = init_router(state)
        .oneshot(request("PATCH", &uri, Some(&token), Some(json!({ "role": "OWNER" }))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_members_listed_per_organization(pool: PgPool) {
    let acme = create_organization(&pool, "Acme").await;
    let globex = create_organization(&pool, "Globex").await;
    let caller = create_user(&pool, Role::User, Some(acme)).await;
    create_user(&pool, Role::User, Some(acme)).await;
    let outsider = create_user(&pool, Role::User, Some(globex)).await;
    let state = test_state(pool);
    let token = token_for(&state, &caller.identity);
    let app = init_router(state);

    let response = app.clone().oneshot(get("/users", Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let uri = format!("/users/{}", outsider.identity.subject_id);
    let response = app.oneshot(get(&uri, Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_manager_creates_member_in_own_organization(pool: PgPool) {
    let organization_id = create_organization(&pool, "Acme").await;
    let manager = create_user(&pool, Role::Manager, Some(organization_id)).await;
    let state = test_state(pool);
    let token = token_for(&state, &manager.identity);

    let response = init_router(state)
        .oneshot(request(
            "POST",
            "/users",
            Some(&token),
            Some(json!({
                "name": "New Member",
                "email": common::generate_unique_email(),
                "password": "password123",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["organization_id"], organization_id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_manager_cannot_create_owner(pool: PgPool) {
    let organization_id = create_organization(&pool, "Acme").await;
    let manager = create_user(&pool, Role::Manager, Some(organization_id)).await;
    let state = test_state(pool.clone());
    let token = token_for(&state, &manager.identity);
    let email = common::generate_unique_email();

    let response = init_router(state)
        .oneshot(request(
            "POST",
            "/users",
            Some(&token),
            Some(json!({
                "name": "Would Be Owner",
                "email": email,
                "password": "password123",
                "role": "OWNER",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let stored: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&pool)
        .await
        .unwrap();
    assert!(stored.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_owner_creates_owner(pool: PgPool) {
    let organization_id = create_organization(&pool, "Acme").await;
    let owner = create_user(&pool, Role::Owner, Some(organization_id)).await;
    let state = test_state(pool);
    let token = token_for(&state, &owner.identity);

    let response = init_router(state)
        .oneshot(request(
            "POST",
            "/users",
            Some(&token),
            Some(json!({
                "name": "Co Owner",
                "email": common::generate_unique_email(),
                "password": "password123",
                "role": "OWNER",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await["role"], "OWNER");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_owner_deletes_member(pool: PgPool) {
    let organization_id = create_organization(&pool, "Acme").await;
    let owner = create_user(&pool, Role::Owner, Some(organization_id)).await;
    let member = create_user(&pool, Role::User, Some(organization_id)).await;
    let state = test_state(pool);
    let token = token_for(&state, &owner.identity);
    let uri = format!("/users/{}", member.identity.subject_id);
    let app = init_router(state);

    let response = app
        .clone()
        .oneshot(request("DELETE", &uri, Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get(&uri, Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
