/**
 * User Model and Credential Store
 *
 * Persists usernames and password hashes. Uniqueness is enforced by the
 * `UNIQUE` constraint on `users.username` through a single
 * insert-or-nothing statement, so two concurrent registrations of the same
 * name can never both succeed.
 *
 * The functions take any SQLite executor so they run equally on the pool
 * or inside the registration transaction.
 */

use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;

/// User row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique, case-sensitive, already trimmed
    pub username: String,
    /// bcrypt hash, never the plaintext
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of [`create_user`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    UsernameTaken,
}

/// Insert a user unless the username already exists
///
/// # Returns
/// `Created` when the row was written, `UsernameTaken` when an existing row
/// kept the username. An existing row is never modified.
pub async fn create_user<'e, E>(
    executor: E,
    username: &str,
    password_hash: &str,
) -> Result<CreateOutcome, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO users (username, password_hash, created_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(username) DO NOTHING
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(Utc::now())
    .execute(executor)
    .await?;

    if result.rows_affected() == 0 {
        Ok(CreateOutcome::UsernameTaken)
    } else {
        Ok(CreateOutcome::Created)
    }
}

/// Get user by username (exact, case-sensitive match)
pub async fn get_user_by_username<'e, E>(
    executor: E,
    username: &str,
) -> Result<Option<User>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT username, password_hash, created_at
        FROM users
        WHERE username = ?1
        "#,
    )
    .bind(username)
    .fetch_optional(executor)
    .await?;

    Ok(user)
}
