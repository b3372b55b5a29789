//! User management and authentication queries

use crate::error::{timestamp, Result, StorageError};
use cadence_core::{Role, User, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqlitePool};

fn user_from_row(row: &SqliteRow) -> Result<User> {
    let role: String = row.try_get("role")?;
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        role: Role::from_str(&role)
            .ok_or_else(|| StorageError::InvalidData(format!("unknown role: {role}")))?,
        created_at: timestamp(row.try_get("created_at")?)?,
    })
}

/// Create a user with an already-hashed password
///
/// # Errors
///
/// Returns `Duplicate` if the name is taken
pub async fn create(
    pool: &SqlitePool,
    name: &str,
    role: Role,
    password_hash: &str,
) -> Result<User> {
    let user = User::new(name, role);

    sqlx::query(
        "INSERT INTO users (id, name, role, password_hash, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&user.id)
    .bind(&user.name)
    .bind(user.role.as_str())
    .bind(password_hash)
    .bind(user.created_at.timestamp())
    .execute(pool)
    .await
    .map_err(|e| StorageError::from_insert(e, format!("user name '{name}'")))?;

    // Stored with second precision
    get_by_id(pool, &user.id)
        .await?
        .ok_or_else(|| StorageError::not_found("User", user.id.as_str()))
}

/// Get a user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, name, role, created_at FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Get a user by name
pub async fn get_by_name<'e, E>(executor: E, name: &str) -> Result<Option<User>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query("SELECT id, name, role, created_at FROM users WHERE name = ?")
        .bind(name)
        .fetch_optional(executor)
        .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Get a user together with their password hash, for login
///
/// Returns `None` if the user does not exist or has no credentials
pub async fn get_credentials(pool: &SqlitePool, name: &str) -> Result<Option<(User, String)>> {
    let row = sqlx::query(
        "SELECT id, name, role, created_at, password_hash FROM users
         WHERE name = ? AND password_hash IS NOT NULL",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let user = user_from_row(&row)?;
            let hash: String = row.try_get("password_hash")?;
            Ok(Some((user, hash)))
        }
        None => Ok(None),
    }
}

/// Replace a user's password hash
pub async fn set_password_hash(pool: &SqlitePool, id: &UserId, password_hash: &str) -> Result<()> {
    let result = sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("User", id.as_str()));
    }
    Ok(())
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, name, role, created_at FROM users ORDER BY name")
        .fetch_all(pool)
        .await?;

    rows.iter().map(user_from_row).collect()
}
