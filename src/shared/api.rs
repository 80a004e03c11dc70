/**
 * API Wire Types
 *
 * Request and response bodies for the register, login, logout and task
 * listing endpoints. The server serializes them and the demo client
 * deserializes them, so both sides agree on one definition.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Username and plaintext password submitted to `/register` and `/login`.
///
/// Older clients send the Spanish field names `usuario` and `contraseña`
/// (or `contrasena`). When a body carries several spellings, the first
/// non-empty one wins in the order `usuario`, `username` and `contraseña`,
/// `contrasena`, `password`. Missing fields deserialize to empty strings so
/// the handler can answer with a validation error instead of a generic JSON
/// rejection.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "CredentialFields")]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
struct CredentialFields {
    usuario: Option<String>,
    username: Option<String>,
    #[serde(rename = "contraseña")]
    contrasena_accented: Option<String>,
    contrasena: Option<String>,
    password: Option<String>,
}

impl From<CredentialFields> for Credentials {
    fn from(fields: CredentialFields) -> Self {
        Self {
            username: first_non_empty([fields.usuario, fields.username]),
            password: first_non_empty([
                fields.contrasena_accented,
                fields.contrasena,
                fields.password,
            ]),
        }
    }
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Never print the plaintext password, even in debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Returned by `POST /register` with status 201.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterResponse {
    pub message: String,
    pub username: String,
}

/// Returned by `POST /login`.
///
/// In session mode the session token travels in the `Set-Cookie` header,
/// never in the body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub message: String,
    pub username: String,
}

/// Returned by `POST /logout`. `revoked` is false when the caller had no
/// live session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogoutResponse {
    pub message: String,
    pub revoked: bool,
}

/// A single task as seen by its owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

/// Returned by `GET /tasks`: the resolved identity and its tasks in
/// insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskListResponse {
    pub username: String,
    pub tasks: Vec<Task>,
}

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub status: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_accept_spanish_aliases() {
        let creds: Credentials =
            serde_json::from_str(r#"{"usuario": "juan", "contraseña": "secreto"}"#).unwrap();
        assert_eq!(creds, Credentials::new("juan", "secreto"));

        let creds: Credentials =
            serde_json::from_str(r#"{"usuario": "juan", "contrasena": "secreto"}"#).unwrap();
        assert_eq!(creds.password, "secreto");
    }

    #[test]
    fn test_credentials_with_several_spellings() {
        let creds: Credentials = serde_json::from_str(
            r#"{"usuario": "juan", "username": "john", "password": "pw", "contraseña": "secreto"}"#,
        )
        .unwrap();
        assert_eq!(creds, Credentials::new("juan", "secreto"));

        // Empty and null values fall through to the next spelling
        let creds: Credentials = serde_json::from_str(
            r#"{"usuario": "", "username": "john", "contraseña": null, "contrasena": "", "password": "pw"}"#,
        )
        .unwrap();
        assert_eq!(creds, Credentials::new("john", "pw"));
    }

    #[test]
    fn test_credentials_missing_fields_default_to_empty() {
        let creds: Credentials = serde_json::from_str("{}").unwrap();
        assert!(creds.username.is_empty());
        assert!(creds.password.is_empty());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("alice", "wonderland");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("alice"));
        assert!(!printed.contains("wonderland"));
    }

    #[test]
    fn test_task_done_defaults_to_false() {
        let task: Task = serde_json::from_str(r#"{"title": "Buy milk"}"#).unwrap();
        assert!(!task.done);
    }
}
