/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * opens the SQLite database.
 *
 * # Configuration Sources
 *
 * 1. Built-in defaults
 * 2. An optional TOML file named by `TASKGATE_CONFIG`
 * 3. Environment variables (after `.env` has been loaded by the binary)
 *
 * Later sources override earlier ones.
 *
 * # Environment Variables
 *
 * - `DATABASE_URL` - SQLite URL (default `sqlite://taskgate.db?mode=rwc`)
 * - `SERVER_PORT` - listen port (default 5000)
 * - `AUTH_MODE` - `inline` or `session` (default `inline`)
 * - `BCRYPT_COST` - bcrypt work factor (default `bcrypt::DEFAULT_COST`)
 * - `SESSION_TTL_SECS` - session lifetime, `0` disables expiry (default 86400)
 * - `SESSION_COOKIE` - session cookie name (default `taskgate_session`)
 * - `SEED_DEMO_USER` - create `demo`/`demo` on an empty database (default true)
 *
 * # Error Handling
 *
 * Unlike a best-effort loader, a database that cannot be opened or migrated
 * fails startup: every endpoint depends on it.
 */

use serde::Deserialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::backend::auth::authenticator::DEFAULT_SEED_TASKS;
use crate::backend::auth::password::{MAX_COST, MIN_COST};
use crate::backend::error::BackendError;
use crate::shared::ConfigError;

/// Environment variable naming an optional TOML config file
pub const CONFIG_FILE_ENV: &str = "TASKGATE_CONFIG";

pub const DEFAULT_DATABASE_URL: &str = "sqlite://taskgate.db?mode=rwc";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;
pub const DEFAULT_SESSION_COOKIE: &str = "taskgate_session";

/// How protected requests prove who they are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Username and password in an `Authorization: Basic` header on every request
    #[default]
    Inline,
    /// Opaque token in an `HttpOnly` cookie issued by `/login`
    Session,
}

impl FromStr for AuthMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" | "basic" => Ok(Self::Inline),
            "session" | "cookie" => Ok(Self::Session),
            _ => Err(ConfigError::InvalidValue {
                key: "AUTH_MODE",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline => write!(f, "inline"),
            Self::Session => write!(f, "session"),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub auth_mode: AuthMode,
    pub bcrypt_cost: u32,
    /// `0` disables expiry
    pub session_ttl_secs: u64,
    pub session_cookie: String,
    pub seed_demo_user: bool,
    /// Titles every new account starts with
    pub seed_tasks: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            port: DEFAULT_PORT,
            auth_mode: AuthMode::default(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            seed_demo_user: true,
            seed_tasks: DEFAULT_SEED_TASKS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `TASKGATE_CONFIG` (if set) and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::default(),
        };
        let config = base.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Loaded configuration file {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Overlay environment variables read through `lookup`
    pub fn apply_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.port = parse_value("SERVER_PORT", &port)?;
        }
        if let Some(mode) = lookup("AUTH_MODE") {
            self.auth_mode = mode.parse()?;
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            self.bcrypt_cost = parse_value("BCRYPT_COST", &cost)?;
        }
        if let Some(ttl) = lookup("SESSION_TTL_SECS") {
            self.session_ttl_secs = parse_value("SESSION_TTL_SECS", &ttl)?;
        }
        if let Some(name) = lookup("SESSION_COOKIE") {
            self.session_cookie = name;
        }
        if let Some(seed) = lookup("SEED_DEMO_USER") {
            self.seed_demo_user = parse_bool("SEED_DEMO_USER", &seed)?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingValue("DATABASE_URL"));
        }
        if !(MIN_COST..=MAX_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        let cookie = self.session_cookie.trim();
        if cookie.is_empty() {
            return Err(ConfigError::MissingValue("SESSION_COOKIE"));
        }
        if cookie.contains(|c: char| c == ';' || c == '=' || c == ',' || c.is_whitespace()) {
            return Err(ConfigError::InvalidValue {
                key: "SESSION_COOKIE",
                value: self.session_cookie.clone(),
            });
        }
        if self.seed_tasks.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "seed_tasks",
                value: "empty list".to_string(),
            });
        }
        if self.seed_tasks.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: "seed_tasks",
                value: "blank title".to_string(),
            });
        }
        Ok(())
    }

    pub fn session_ttl(&self) -> Option<Duration> {
        match self.session_ttl_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}

/// Open the SQLite pool and run migrations
///
/// In-memory URLs get a single connection that is never recycled, since
/// every new connection to `:memory:` would see a fresh, empty database.
///
/// # Errors
///
/// - `StorageUnavailable` if the URL is invalid or the database cannot be opened
/// - `Migration` if the schema cannot be applied
pub async fn load_database(url: &str) -> Result<SqlitePool, BackendError> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let in_memory = url.contains(":memory:") || url.contains("mode=memory");

    let pool = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await?
    };
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
