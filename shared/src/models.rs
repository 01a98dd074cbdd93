//! Item shapes shared by the store, the cache and the HTTP layer

use serde::{Deserialize, Serialize};

/// A stored quiz item. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: String,
    pub text: String,
    pub hint: String,
    pub answer: String,
}

/// Spoiler-free projection of an [`Item`]: never carries the hint or the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProblemView {
    pub id: String,
    pub text: String,
}

/// Create payload; the id is assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub text: String,
    pub hint: String,
    pub answer: String,
}

/// Update payload; the id comes from the request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemChanges {
    pub text: String,
    pub hint: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerAttempt {
    pub id: String,
    pub guess: String,
}

impl Item {
    pub fn to_problem(&self) -> ProblemView {
        ProblemView {
            id: self.id.clone(),
            text: self.text.clone(),
        }
    }
}

impl From<Item> for ProblemView {
    fn from(item: Item) -> Self {
        ProblemView {
            id: item.id,
            text: item.text,
        }
    }
}

impl NewItem {
    pub fn with_id(self, id: impl Into<String>) -> Item {
        Item {
            id: id.into(),
            text: self.text,
            hint: self.hint,
            answer: self.answer,
        }
    }
}

impl ItemChanges {
    pub fn for_id(self, id: impl Into<String>) -> Item {
        Item {
            id: id.into(),
            text: self.text,
            hint: self.hint,
            answer: self.answer,
        }
    }
}
