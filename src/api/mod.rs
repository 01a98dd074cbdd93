pub mod problems;
pub mod tweets;

use axum::{
    routing::{get, post},
    Router,
};
use shared::{AppError, Result};
use std::sync::Arc;

use crate::state::AppState;

/// Every item and gameplay route.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Full items
        .route("/tweets", get(tweets::list_tweets))
        .route("/tweets/page/:pageNumber", get(tweets::list_tweets_page))
        .route("/tweets/create", post(tweets::create_tweet))
        .route(
            "/tweets/:id",
            get(tweets::get_tweet)
                .put(tweets::update_tweet)
                .delete(tweets::delete_tweet),
        )
        // Spoiler-free projection
        .route("/problems", get(problems::list_problems))
        .route("/problems/page/:pageNumber", get(problems::list_problems_page))
        .route("/problem/:id", get(problems::get_problem))
        // Gameplay
        .route("/problem/quiz", get(problems::random_problem))
        .route("/problem/answer", post(problems::answer_problem))
        .route("/problem/hint/:tweetId", get(problems::get_hint))
}

pub(crate) fn parse_page_number(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::bad_request("Invalid page number"))
}
