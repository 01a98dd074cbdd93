// ============================================================================
// ITEM STORE - durable source of truth for quiz items
// ============================================================================

pub mod memory;
pub mod postgres;

pub use memory::MemoryItemStore;
pub use postgres::PgItemStore;

use async_trait::async_trait;
use shared::{Item, ProblemView, Result};

/// Parameterized access to the single `tweets` relation.
///
/// Every listing is ordered by id ascending, the only total order the store guarantees.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Item>>;

    async fn list_all(&self) -> Result<Vec<Item>>;

    /// `ORDER BY id ASC LIMIT limit OFFSET offset`
    async fn list_page(&self, limit: i64, offset: i64) -> Result<Vec<Item>>;

    async fn insert(&self, item: &Item) -> Result<()>;

    /// Returns the number of rows changed.
    async fn update(&self, item: &Item) -> Result<u64>;

    /// Returns the number of rows removed.
    async fn delete(&self, id: &str) -> Result<u64>;

    async fn count(&self) -> Result<i64>;

    /// The single row at `offset` in id order, projected without hint and answer.
    async fn problem_at(&self, offset: i64) -> Result<Option<ProblemView>>;

    async fn health_check(&self) -> Result<()>;
}
