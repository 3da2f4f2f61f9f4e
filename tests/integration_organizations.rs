#![cfg(feature = "integration")]

mod common;

use axum::http::StatusCode;
use common::{create_organization, create_project, create_user, get, json_body, request, test_state, token_for};
use serde_json::json;
use sqlx::PgPool;
use taskhub::router::init_router;
use taskhub_auth::Role;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_get_and_rename_current(pool: PgPool) {
    let organization_id = create_organization(&pool, "Acme").await;
    let owner = create_user(&pool, Role::Owner, Some(organization_id)).await;
    let state = test_state(pool);
    let token = token_for(&state, &owner.identity);
    let app = init_router(state);

    let response = app
        .clone()
        .oneshot(get("/organizations/current", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["name"], "Acme");

    let response = app
        .oneshot(request(
            "PATCH",
            "/organizations/current",
            Some(&token),
            Some(json!({ "name": "Acme Corp" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["name"], "Acme Corp");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_cascades(pool: PgPool) {
    let organization_id = create_organization(&pool, "Acme").await;
    let owner = create_user(&pool, Role::Owner, Some(organization_id)).await;
    create_project(&pool, organization_id, "Launch").await;
    let state = test_state(pool.clone());
    let token = token_for(&state, &owner.identity);

    let response = init_router(state)
        .oneshot(request("DELETE", "/organizations/current", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let projects: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
        .fetch_one(&pool)
        .await
        .unwrap();
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!((projects, users), (0, 0));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_project_crud_for_manager(pool: PgPool) {
    let organization_id = create_organization(&pool, "Acme").await;
    let manager = create_user(&pool, Role::Manager, Some(organization_id)).await;
    let state = test_state(pool);
    let token = token_for(&state, &manager.identity);
    let app = init_router(state);

    let response = app
        .clone()
        .oneshot(request("POST", "/projects", Some(&token), Some(json!({ "name": "Launch" }))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let project = json_body(response).await;
    let uri = format!("/projects/{}", project["id"].as_str().unwrap());

    let response = app
        .clone()
        .oneshot(request("PATCH", &uri, Some(&token), Some(json!({ "name": "Relaunch" }))))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["name"], "Relaunch");

    let response = app
        .clone()
        .oneshot(request("DELETE", &uri, Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get(&uri, Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
