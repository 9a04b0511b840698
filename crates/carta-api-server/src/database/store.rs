//! Menu store port and its PostgreSQL adapter.

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, error};

use super::{DbPool, MenuRecord};

/// Append-only persistence for menu records. Inserts never update existing
/// rows; `find_latest` resolves the newest record for a bar id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuStore: Send + Sync {
    async fn insert(&self, bar_id: i32, menu_json: &str) -> Result<i64>;
    async fn find_latest(&self, bar_id: i32) -> Result<Option<MenuRecord>>;
}

pub struct PgMenuStore {
    pool: DbPool,
}

impl PgMenuStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create the menus table and its bar_id index if missing. Called once at
    /// startup; there is no migrations system.
    pub async fn ensure_schema(&self) -> Result<()> {
        let pool = self.pool.get_pool();

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS menus (
                id BIGSERIAL PRIMARY KEY,
                bar_id INTEGER NOT NULL,
                menu_json TEXT NOT NULL,
                created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
            )"#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_menus_bar_id ON menus(bar_id)")
            .execute(pool)
            .await?;

        debug!("Menus table ensured");
        Ok(())
    }
}

#[async_trait]
impl MenuStore for PgMenuStore {
    async fn insert(&self, bar_id: i32, menu_json: &str) -> Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO menus (bar_id, menu_json)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(bar_id)
        .bind(menu_json)
        .fetch_one(self.pool.get_pool())
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error inserting menu for bar {}: {}", bar_id, e);
            e
        })?;

        debug!("Inserted menu record {} for bar {}", id, bar_id);
        Ok(id)
    }

    async fn find_latest(&self, bar_id: i32) -> Result<Option<MenuRecord>> {
        // Ties on created_at break by insertion order via id
        let record = sqlx::query_as::<_, MenuRecord>(
            r#"
            SELECT id, bar_id, menu_json, created_at
            FROM menus
            WHERE bar_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(bar_id)
        .fetch_optional(self.pool.get_pool())
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding latest menu for bar {}: {}", bar_id, e);
            e
        })?;

        Ok(record)
    }
}
