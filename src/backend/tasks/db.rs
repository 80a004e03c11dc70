/**
 * Task Repository
 *
 * Per-user task records. Reads are scoped by an [`Identity`], never by a
 * bare username, so the only way to list tasks is through a caller the
 * access gate already resolved.
 */

use sqlx::{SqliteConnection, SqlitePool};

use crate::backend::auth::authenticator::Identity;
use crate::shared::Task;

/// Task row
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TaskRecord {
    pub id: i64,
    pub owner: String,
    pub title: String,
    pub done: bool,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Task {
            title: record.title,
            done: record.done,
        }
    }
}

/// Insert the given titles for `owner`, not done, in order
///
/// Runs on a single connection so registration can call it inside its
/// transaction.
pub async fn seed_tasks(
    conn: &mut SqliteConnection,
    owner: &str,
    titles: &[String],
) -> Result<(), sqlx::Error> {
    for title in titles {
        sqlx::query("INSERT INTO tasks (owner, title, done) VALUES (?1, ?2, 0)")
            .bind(owner)
            .bind(title)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// All tasks owned by `identity`, in insertion order
pub async fn list_for(pool: &SqlitePool, identity: &Identity) -> Result<Vec<TaskRecord>, sqlx::Error> {
    sqlx::query_as::<_, TaskRecord>(
        r#"
        SELECT id, owner, title, done
        FROM tasks
        WHERE owner = ?1
        ORDER BY id ASC
        "#,
    )
    .bind(identity.username())
    .fetch_all(pool)
    .await
}

/// Total number of tasks across all owners
pub async fn count_all(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
