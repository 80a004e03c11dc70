//! Inline-credential (HTTP Basic) mode end-to-end scenarios

mod common;

use axum::http::{
    header::{SET_COOKIE, WWW_AUTHENTICATE},
    StatusCode,
};
use common::*;
use pretty_assertions::assert_eq;
use taskgate::backend::server::AuthMode;

#[tokio::test]
async fn test_alice_inline_scenario() {
    let app = test_app(AuthMode::Inline).await;
    assert_eq!(register(&app, "alice", "wonderland").await.status, StatusCode::CREATED);

    let response = tasks_with_basic(&app, "alice", "wonderland").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice");
    assert_eq!(response.task_titles(), default_titles());

    let response = tasks_with_basic(&app, "alice", "wrong").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body.get("tasks").is_none());
    assert_eq!(
        response.headers[WWW_AUTHENTICATE].to_str().unwrap(),
        "Basic realm=\"tasks\""
    );
}

#[tokio::test]
async fn test_login_confirms_credentials_without_cookie() {
    let app = test_app(AuthMode::Inline).await;
    register(&app, "alice", "wonderland").await;

    let response = login(&app, "alice", "wonderland", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice");
    assert!(response.headers.get(SET_COOKIE).is_none());

    let response = login(&app, "alice", "nope", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_unknown_user_and_wrong_password_look_the_same() {
    let app = test_app(AuthMode::Inline).await;
    register(&app, "alice", "wonderland").await;

    let wrong_password = login(&app, "alice", "nope", None).await;
    let unknown_user = login(&app, "mallory", "nope", None).await;
    assert_eq!(wrong_password.status, unknown_user.status);
    assert_eq!(wrong_password.body, unknown_user.body);

    let wrong_password = tasks_with_basic(&app, "alice", "nope").await;
    let unknown_user = tasks_with_basic(&app, "mallory", "nope").await;
    assert_eq!(wrong_password.status, unknown_user.status);
    assert_eq!(wrong_password.body, unknown_user.body);
}

#[tokio::test]
async fn test_malformed_authorization_headers() {
    let app = test_app(AuthMode::Inline).await;
    register(&app, "alice", "wonderland").await;

    for value in [
        "Bearer abc.def.ghi",
        "Basic !!!not-base64!!!",
        "Basic YWxpY2U=", // "alice" with no colon
        "Basic",
    ] {
        let response = tasks_with_header(&app, "authorization", value).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "header: {}", value);
    }

    let response = tasks_anonymous(&app).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.headers.get(WWW_AUTHENTICATE).is_some());
}

#[tokio::test]
async fn test_password_containing_colon() {
    let app = test_app(AuthMode::Inline).await;
    register(&app, "carol", "a:b:c").await;

    let response = tasks_with_basic(&app, "carol", "a:b:c").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "carol");
}

#[tokio::test]
async fn test_logout_not_routed_in_inline_mode() {
    let app = test_app(AuthMode::Inline).await;

    let response = logout(&app, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["status"], 404);
}

#[tokio::test]
async fn test_users_only_see_their_own_tasks() {
    let (app, pool) = test_app_with_pool(AuthMode::Inline).await;
    register(&app, "alice", "wonderland").await;
    register(&app, "bob", "builder").await;
    insert_task(&pool, "bob", "Fix the roof").await;

    // bob's password does not open alice's list
    let response = tasks_with_basic(&app, "alice", "builder").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let alice_tasks = tasks_with_basic(&app, "alice", "wonderland").await;
    assert_eq!(alice_tasks.body["username"], "alice");
    assert_eq!(alice_tasks.task_titles(), default_titles());
    assert!(!alice_tasks.task_titles().iter().any(|t| t == "Fix the roof"));

    let bob_tasks = tasks_with_basic(&app, "bob", "builder").await;
    assert_eq!(bob_tasks.body["username"], "bob");
    assert!(bob_tasks.task_titles().iter().any(|t| t == "Fix the roof"));
}

#[tokio::test]
async fn test_username_with_colon_is_rejected_at_registration() {
    let app = test_app(AuthMode::Inline).await;

    let response = register(&app, "a:b", "wonderland").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Username must not contain ':'");

    // No account exists under either half of the name
    assert_eq!(
        tasks_with_basic(&app, "a", "b:wonderland").await.status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(register(&app, "a", "b").await.status, StatusCode::CREATED);
}
