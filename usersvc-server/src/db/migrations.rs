//! Schema bootstrap for the users table

use sqlx::SqlitePool;

/// Create the users table if it does not exist.
///
/// The UNIQUE constraint on email guarantees uniqueness and doubles as the
/// email lookup index. The repository's pre-check only produces a nicer
/// error earlier.
/// AUTOINCREMENT keeps ids from being reused after a delete.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::debug!("Running users migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            name  TEXT NOT NULL,
            age   INTEGER
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = create_memory_pool().await.unwrap();
        run(&pool).await.unwrap();
        run(&pool).await.unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn email_lookup_uses_unique_index() {
        let pool = create_memory_pool().await.unwrap();
        run(&pool).await.unwrap();

        let detail: Vec<(i64, i64, i64, String)> =
            sqlx::query_as("EXPLAIN QUERY PLAN SELECT id FROM users WHERE email = 'a@x.com'")
                .fetch_all(&pool)
                .await
                .unwrap();

        assert!(detail.iter().any(|(_, _, _, step)| step.contains("sqlite_autoindex_users")));
    }

    #[tokio::test]
    async fn email_is_unique_at_schema_level() {
        let pool = create_memory_pool().await.unwrap();
        run(&pool).await.unwrap();

        sqlx::query("INSERT INTO users (email, name) VALUES ('a@x.com', 'A')")
            .execute(&pool)
            .await
            .unwrap();
        let err = sqlx::query("INSERT INTO users (email, name) VALUES ('a@x.com', 'B')")
            .execute(&pool)
            .await
            .unwrap_err();

        match err {
            sqlx::Error::Database(db) => assert!(db.is_unique_violation()),
            other => panic!("expected unique violation, got {other:?}"),
        }
    }
}
