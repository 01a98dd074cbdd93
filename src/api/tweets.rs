// ============================================================================
// TWEETS API - full items, including hint and answer
// ============================================================================

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{AppError, Item, ItemChanges, NewItem, Result};
use std::sync::Arc;
use tracing::info;

use crate::api::parse_page_number;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct TweetListResponse {
    pub message: String,
    pub tweets: Vec<Item>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TweetResponse {
    pub message: String,
    pub tweet: Item,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /tweets
pub async fn list_tweets(State(state): State<Arc<AppState>>) -> Result<Json<TweetListResponse>> {
    let tweets = state.items.fetch_all().await?;
    Ok(Json(TweetListResponse {
        message: "Tweets retrieved successfully".to_string(),
        tweets,
    }))
}

/// GET /tweets/page/:pageNumber
pub async fn list_tweets_page(
    State(state): State<Arc<AppState>>,
    Path(page_number): Path<String>,
) -> Result<Json<TweetListResponse>> {
    let page_number = parse_page_number(&page_number)?;
    let tweets = state
        .items
        .fetch_page(page_number, state.list_per_page)
        .await?;
    Ok(Json(TweetListResponse {
        message: "Tweets retrieved successfully".to_string(),
        tweets,
    }))
}

/// POST /tweets/create
pub async fn create_tweet(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<NewItem>, JsonRejection>,
) -> Result<(StatusCode, Json<TweetResponse>)> {
    let Json(new_item) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;

    let id = state.items.create(new_item.clone()).await?;
    info!("📝 Tweet {} created", id);

    Ok((
        StatusCode::CREATED,
        Json(TweetResponse {
            message: "Tweet created successfully".to_string(),
            tweet: new_item.with_id(id),
        }),
    ))
}

/// GET /tweets/:id
pub async fn get_tweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TweetResponse>> {
    let tweet = state
        .items
        .fetch_one(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("tweet {}", id)))?;
    Ok(Json(TweetResponse {
        message: "Tweet retrieved successfully".to_string(),
        tweet,
    }))
}

/// PUT /tweets/:id. The path id wins over any id in the body.
pub async fn update_tweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ItemChanges>, JsonRejection>,
) -> Result<Json<TweetResponse>> {
    let Json(changes) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;
    let tweet = changes.for_id(id);

    state.items.update(&tweet).await?;
    Ok(Json(TweetResponse {
        message: "Tweet updated successfully".to_string(),
        tweet,
    }))
}

/// DELETE /tweets/:id
pub async fn delete_tweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.items.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Tweet deleted successfully".to_string(),
    }))
}
