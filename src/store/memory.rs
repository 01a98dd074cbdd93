//! In-process [`ItemStore`] for local runs and tests.
//!
//! Rows are kept in a `BTreeMap` keyed by id, so iteration order matches the
//! `ORDER BY id ASC` of the Postgres store.

use super::ItemStore;
use async_trait::async_trait;
use shared::{AppError, Item, ProblemView, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MemoryItemStore {
    rows: Arc<RwLock<BTreeMap<String, Item>>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let store = Self::new();
        {
            let mut rows = store.rows.write().await;
            for item in items {
                rows.insert(item.id.clone(), item);
            }
        }
        store
    }
}

fn to_window(limit: i64, offset: i64) -> (usize, usize) {
    (
        usize::try_from(limit.max(0)).unwrap_or(usize::MAX),
        usize::try_from(offset.max(0)).unwrap_or(usize::MAX),
    )
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Item>> {
        Ok(self.rows.read().await.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Item>> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn list_page(&self, limit: i64, offset: i64) -> Result<Vec<Item>> {
        let (limit, offset) = to_window(limit, offset);
        Ok(self
            .rows
            .read()
            .await
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn insert(&self, item: &Item) -> Result<()> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&item.id) {
            return Err(AppError::store(format!(
                "duplicate key value violates unique constraint: id={}",
                item.id
            )));
        }
        rows.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn update(&self, item: &Item) -> Result<u64> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&item.id) {
            Some(row) => {
                *row = item.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        Ok(self.rows.write().await.remove(id).map_or(0, |_| 1))
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.rows.read().await.len() as i64)
    }

    async fn problem_at(&self, offset: i64) -> Result<Option<ProblemView>> {
        let (_, offset) = to_window(1, offset);
        Ok(self
            .rows
            .read()
            .await
            .values()
            .nth(offset)
            .map(Item::to_problem))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Item {
        Item {
            id: id.to_string(),
            text: format!("text {}", id),
            hint: format!("hint {}", id),
            answer: format!("answer {}", id),
        }
    }

    #[tokio::test]
    async fn test_listing_is_ordered_by_id() {
        let store = MemoryItemStore::with_items(vec![item("c"), item("a"), item("b")]).await;
        let ids: Vec<String> = store.list_all().await.unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let page = store.list_page(2, 1).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, "b");
        assert_eq!(page[1].id, "c");

        assert_eq!(store.problem_at(0).await.unwrap().unwrap().id, "a");
        assert!(store.problem_at(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_store_failure() {
        let store = MemoryItemStore::new();
        store.insert(&item("a")).await.unwrap();
        let err = store.insert(&item("a")).await.unwrap_err();
        assert!(matches!(err, AppError::Store { .. }));
    }

    #[tokio::test]
    async fn test_update_and_delete_report_rows() {
        let store = MemoryItemStore::with_items(vec![item("a")]).await;
        assert_eq!(store.update(&item("missing")).await.unwrap(), 0);
        assert_eq!(store.update(&item("a")).await.unwrap(), 1);
        assert_eq!(store.delete("a").await.unwrap(), 1);
        assert_eq!(store.delete("a").await.unwrap(), 0);
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
