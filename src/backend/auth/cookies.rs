//! Session cookie helpers.

use axum::http::{header::COOKIE, HeaderMap};
use std::time::Duration;

/// Name and lifetime of the session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieConfig {
    pub name: String,
    pub max_age: Option<Duration>,
}

impl CookieConfig {
    pub fn new(name: impl Into<String>, max_age: Option<Duration>) -> Self {
        Self {
            name: name.into(),
            max_age,
        }
    }

    /// `Set-Cookie` value carrying a freshly issued token
    pub fn issue(&self, token: &str) -> String {
        let mut cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", self.name, token);
        if let Some(max_age) = self.max_age {
            cookie.push_str(&format!("; Max-Age={}", max_age.as_secs()));
        }
        cookie
    }

    /// `Set-Cookie` value telling the client to drop the cookie
    pub fn clear(&self) -> String {
        format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", self.name)
    }

    /// Read this cookie from the request's `Cookie` headers
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        read_cookie(headers, &self.name)
    }
}

/// Find a cookie by name across all `Cookie` headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
}
