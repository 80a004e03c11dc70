/**
 * taskgate HTTP Client
 *
 * Blocking client for the taskgate API. The underlying `reqwest` client
 * keeps a cookie store, so a successful login in session mode authenticates
 * later `tasks_with_session` and `logout` calls on the same client.
 */

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::shared::{
    AppConfig, ConfigError, Credentials, ErrorBody, LoginResponse, LogoutResponse,
    RegisterResponse, TaskListResponse,
};

/// Client-side errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection failure or undecodable response
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a non-success status
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// HTTP status of a server-side rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// taskgate API client
pub struct TaskgateClient {
    config: AppConfig,
    http: Client,
}

impl TaskgateClient {
    pub fn new(config: AppConfig) -> Result<Self, ClientError> {
        let http = Client::builder().cookie_store(true).build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// GET / - service index
    pub fn index(&self) -> Result<Value, ClientError> {
        let response = self.http.get(self.config.api_url("/")).send()?;
        decode(response)
    }

    /// POST /register
    pub fn register(&self, credentials: &Credentials) -> Result<RegisterResponse, ClientError> {
        let response = self
            .http
            .post(self.config.api_url("/register"))
            .json(credentials)
            .send()?;
        decode(response)
    }

    /// POST /login
    ///
    /// In session mode the returned cookie is stored on this client.
    pub fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ClientError> {
        let response = self
            .http
            .post(self.config.api_url("/login"))
            .json(credentials)
            .send()?;
        decode(response)
    }

    /// POST /logout
    pub fn logout(&self) -> Result<LogoutResponse, ClientError> {
        let response = self.http.post(self.config.api_url("/logout")).send()?;
        decode(response)
    }

    /// GET /tasks with HTTP Basic credentials
    pub fn tasks_with_basic(&self, credentials: &Credentials) -> Result<TaskListResponse, ClientError> {
        let response = self
            .http
            .get(self.config.api_url("/tasks"))
            .basic_auth(&credentials.username, Some(&credentials.password))
            .send()?;
        decode(response)
    }

    /// GET /tasks with whatever session cookie this client holds
    pub fn tasks_with_session(&self) -> Result<TaskListResponse, ClientError> {
        let response = self.http.get(self.config.api_url("/tasks")).send()?;
        decode(response)
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json()?);
    }

    let text = response.text()?;
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) => text,
    };
    Err(ClientError::Server {
        status: status.as_u16(),
        message,
    })
}
