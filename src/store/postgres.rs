use super::ItemStore;
use async_trait::async_trait;
use shared::{Item, ProblemView, Result};
use sqlx::PgPool;
use tracing::info;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS tweets (
        id     TEXT PRIMARY KEY,
        text   TEXT NOT NULL,
        hint   TEXT NOT NULL,
        answer TEXT NOT NULL
    )
"#;

/// PostgreSQL-backed [`ItemStore`].
#[derive(Debug, Clone)]
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `tweets` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        info!("✅ tweets table ready");
        Ok(())
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT id, text, hint, answer FROM tweets WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn list_all(&self) -> Result<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, text, hint, answer FROM tweets ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn list_page(&self, limit: i64, offset: i64) -> Result<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, text, hint, answer FROM tweets ORDER BY id ASC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn insert(&self, item: &Item) -> Result<()> {
        sqlx::query("INSERT INTO tweets (id, text, hint, answer) VALUES ($1, $2, $3, $4)")
            .bind(&item.id)
            .bind(&item.text)
            .bind(&item.hint)
            .bind(&item.answer)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update(&self, item: &Item) -> Result<u64> {
        let result = sqlx::query("UPDATE tweets SET text = $1, hint = $2, answer = $3 WHERE id = $4")
            .bind(&item.text)
            .bind(&item.hint)
            .bind(&item.answer)
            .bind(&item.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tweets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tweets")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn problem_at(&self, offset: i64) -> Result<Option<ProblemView>> {
        let problem = sqlx::query_as::<_, ProblemView>(
            "SELECT id, text FROM tweets ORDER BY id ASC LIMIT 1 OFFSET $1",
        )
        .bind(offset)
        .fetch_optional(&self.pool)
        .await?;
        Ok(problem)
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
