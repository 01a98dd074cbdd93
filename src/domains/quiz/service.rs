use crate::domains::items::ItemRepository;
use rand::Rng;
use shared::{AppError, Item, ProblemView, Result};
use tracing::debug;

/// Gameplay operations over the item repository.
///
/// Hints and answers only leave this service through [`QuizService::hint`] and the
/// boolean verdict of [`QuizService::check_answer`]; everything else is projected
/// to [`ProblemView`].
#[derive(Clone)]
pub struct QuizService {
    items: ItemRepository,
}

impl QuizService {
    pub fn new(items: ItemRepository) -> Self {
        Self { items }
    }

    /// Uniformly random problem. Reads the count and the row straight from the store;
    /// an insert or delete between the two queries may yield a different row or
    /// `NoItemsAvailable`.
    pub async fn random_problem(&self) -> Result<ProblemView> {
        let store = self.items.store();
        let count = store.count().await?;
        if count <= 0 {
            return Err(AppError::NoItemsAvailable);
        }

        let offset = rand::thread_rng().gen_range(0..count);
        debug!("Drawing problem at offset {} of {}", offset, count);

        store
            .problem_at(offset)
            .await?
            .ok_or(AppError::NoItemsAvailable)
    }

    pub async fn problem_by_id(&self, id: &str) -> Result<ProblemView> {
        self.item(id).await.map(ProblemView::from)
    }

    pub async fn problems(&self) -> Result<Vec<ProblemView>> {
        let items = self.items.fetch_all().await?;
        Ok(items.into_iter().map(ProblemView::from).collect())
    }

    pub async fn problems_page(&self, page_number: i64, page_size: u32) -> Result<Vec<ProblemView>> {
        let items = self.items.fetch_page(page_number, page_size).await?;
        Ok(items.into_iter().map(ProblemView::from).collect())
    }

    pub async fn hint(&self, id: &str) -> Result<String> {
        self.item(id).await.map(|item| item.hint)
    }

    /// Exact, case-sensitive comparison. Guesses are not trimmed or folded.
    pub async fn check_answer(&self, id: &str, guess: &str) -> Result<bool> {
        let item = self.item(id).await?;
        Ok(item.answer == guess)
    }

    async fn item(&self, id: &str) -> Result<Item> {
        self.items
            .fetch_one(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("tweet {}", id)))
    }
}
