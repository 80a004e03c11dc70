//! Request helpers
//!
//! Builds requests for the router and drives them through
//! `tower::ServiceExt::oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE},
        HeaderMap, Method, Request, StatusCode,
    },
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;
use tower::ServiceExt;

/// Response parts the tests care about
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// `name=value` pair from `Set-Cookie`, ready to send back as `Cookie`
    pub fn cookie_pair(&self) -> Option<String> {
        let set_cookie = self.headers.get(SET_COOKIE)?.to_str().ok()?;
        set_cookie.split(';').next().map(|pair| pair.trim().to_string())
    }

    /// Just the token part of `Set-Cookie`
    pub fn cookie_value(&self) -> Option<String> {
        let pair = self.cookie_pair()?;
        pair.split_once('=').map(|(_, value)| value.to_string())
    }

    pub fn task_titles(&self) -> Vec<String> {
        self.body["tasks"]
            .as_array()
            .map(|tasks| {
                tasks
                    .iter()
                    .filter_map(|t| t["title"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Send one request through the router
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router call failed");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn raw_request(method: Method, uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn credentials_body(username: &str, password: &str) -> Value {
    serde_json::json!({ "username": username, "password": password })
}

pub async fn register(app: &Router, username: &str, password: &str) -> TestResponse {
    send(
        app,
        json_request(Method::POST, "/register", &credentials_body(username, password)),
    )
    .await
}

/// Log in, optionally presenting an existing session cookie
pub async fn login(app: &Router, username: &str, password: &str, cookie: Option<&str>) -> TestResponse {
    let mut request = json_request(Method::POST, "/login", &credentials_body(username, password));
    if let Some(cookie) = cookie {
        request
            .headers_mut()
            .insert(COOKIE, cookie.parse().unwrap());
    }
    send(app, request).await
}

pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}

pub async fn tasks_with_basic(app: &Router, username: &str, password: &str) -> TestResponse {
    tasks_with_header(app, AUTHORIZATION.as_str(), &basic_auth(username, password)).await
}

pub async fn tasks_with_cookie(app: &Router, cookie: &str) -> TestResponse {
    tasks_with_header(app, COOKIE.as_str(), cookie).await
}

pub async fn tasks_with_header(app: &Router, name: &str, value: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/tasks")
        .header(name, value)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn tasks_anonymous(app: &Router) -> TestResponse {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/tasks")
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn logout(app: &Router, cookie: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(Method::POST).uri("/logout");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}
