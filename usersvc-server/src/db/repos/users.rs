//! User repository
//!
//! Five operations against the `users` table:
//! - create: pre-check email, INSERT ... RETURNING, constraint is authoritative
//! - get: validated id, plain read
//! - update: merge supplied fields inside a transaction
//! - delete: hard delete, `false` when nothing matched
//! - list_all: every row, all-or-nothing

use sqlx::{Executor, Sqlite, SqlitePool, Transaction};

use crate::models::{NewUser, User, UserChanges, UserId, ValidationError};

const SELECT_USER: &str = "SELECT id, email, name, age FROM users WHERE id = ?";

/// Writes take the write lock up front. A deferred transaction that reads
/// first fails with SQLITE_BUSY on upgrade instead of waiting its turn.
const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Email already exists")]
    Conflict { field: &'static str, value: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a user, failing with `Conflict` if the email is taken.
    pub async fn create(&self, new_user: &NewUser) -> Result<User, DbError> {
        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;
        let result = insert_user(&mut tx, new_user).await;
        let user = finish(tx, result).await?;

        tracing::info!(user_id = user.id, "created user");
        Ok(user)
    }

    /// Get a user by id. `Ok(None)` when no row matches.
    pub async fn get(&self, id: i64) -> Result<Option<User>, DbError> {
        let id = UserId::new(id)?;
        let user = fetch_user(self.pool, id).await?;

        tracing::debug!(user_id = id.get(), found = user.is_some(), "fetched user");
        Ok(user)
    }

    /// Apply the supplied fields to an existing user.
    ///
    /// `Ok(None)` when the id does not resolve. Changing the email to one held
    /// by another user fails with `Conflict` and leaves the row untouched.
    pub async fn update(&self, id: i64, changes: &UserChanges) -> Result<Option<User>, DbError> {
        let id = UserId::new(id)?;
        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;
        let result = update_user(&mut tx, id, changes).await;
        let user = finish(tx, result).await?;

        if user.is_some() {
            tracing::info!(user_id = id.get(), "updated user");
        }
        Ok(user)
    }

    /// Delete a user. Returns `false` when no row matched.
    pub async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let id = UserId::new(id)?;
        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.get())
            .execute(&mut *tx)
            .await
            .map(|done| done.rows_affected() > 0)
            .map_err(DbError::from);
        let deleted = finish(tx, result).await?;

        if deleted {
            tracing::info!(user_id = id.get(), "deleted user");
        }
        Ok(deleted)
    }

    /// List every stored user.
    ///
    /// Ordered by id for stable output; callers must not depend on it.
    pub async fn list_all(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>("SELECT id, email, name, age FROM users ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        tracing::debug!(count = users.len(), "listed users");
        Ok(users)
    }

    /// Number of stored users.
    pub async fn count(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

async fn insert_user(tx: &mut Transaction<'_, Sqlite>, new_user: &NewUser) -> Result<User, DbError> {
    ensure_email_free(tx, new_user.email()).await?;

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, name, age) VALUES (?, ?, ?)
        RETURNING id, email, name, age
        "#,
    )
    .bind(new_user.email())
    .bind(new_user.name())
    .bind(new_user.age())
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| write_error(e, new_user.email()))
}

async fn update_user(
    tx: &mut Transaction<'_, Sqlite>,
    id: UserId,
    changes: &UserChanges,
) -> Result<Option<User>, DbError> {
    let Some(current) = fetch_user(&mut **tx, id).await? else {
        return Ok(None);
    };

    if changes.is_empty() {
        return Ok(Some(current));
    }

    if let Some(email) = changes.email() {
        if email != current.email {
            ensure_email_free(tx, email).await?;
        }
    }

    let merged = changes.apply_to(&current);
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET email = ?, name = ?, age = ?
        WHERE id = ?
        RETURNING id, email, name, age
        "#,
    )
    .bind(&merged.email)
    .bind(&merged.name)
    .bind(merged.age)
    .bind(id.get())
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| write_error(e, &merged.email))?;

    Ok(Some(user))
}

async fn fetch_user<'e, E>(executor: E, id: UserId) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, User>(SELECT_USER)
        .bind(id.get())
        .fetch_optional(executor)
        .await
}

/// Fast-path uniqueness check. The UNIQUE constraint still has the final word.
async fn ensure_email_free(tx: &mut Transaction<'_, Sqlite>, email: &str) -> Result<(), DbError> {
    let holder = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(&mut **tx)
        .await?;

    match holder {
        Some(_) => Err(conflict(email)),
        None => Ok(()),
    }
}

/// Commit on success, roll back before handing the error back on failure.
async fn finish<T>(tx: Transaction<'_, Sqlite>, result: Result<T, DbError>) -> Result<T, DbError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}

fn write_error(err: sqlx::Error, email: &str) -> DbError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return conflict(email);
        }
    }
    DbError::Sqlx(err)
}

fn conflict(email: &str) -> DbError {
    DbError::Conflict {
        field: "email",
        value: email.to_owned(),
    }
}
