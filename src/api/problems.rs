// ============================================================================
// PROBLEMS API - spoiler-free reads and gameplay
// ============================================================================

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{AnswerAttempt, AppError, ProblemView, Result};
use std::sync::Arc;

use crate::api::parse_page_number;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ProblemListResponse {
    pub message: String,
    pub problems: Vec<ProblemView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProblemResponse {
    pub message: String,
    pub problem: ProblemView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub correct: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HintResponse {
    pub hint: String,
}

/// GET /problems
pub async fn list_problems(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProblemListResponse>> {
    let problems = state.quiz.problems().await?;
    Ok(Json(ProblemListResponse {
        message: "Problems retrieved successfully".to_string(),
        problems,
    }))
}

/// GET /problems/page/:pageNumber
pub async fn list_problems_page(
    State(state): State<Arc<AppState>>,
    Path(page_number): Path<String>,
) -> Result<Json<ProblemListResponse>> {
    let page_number = parse_page_number(&page_number)?;
    let problems = state
        .quiz
        .problems_page(page_number, state.list_per_page)
        .await?;
    Ok(Json(ProblemListResponse {
        message: "Problems retrieved successfully".to_string(),
        problems,
    }))
}

/// GET /problem/:id
pub async fn get_problem(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProblemResponse>> {
    let problem = state.quiz.problem_by_id(&id).await?;
    Ok(Json(ProblemResponse {
        message: "Problem retrieved successfully".to_string(),
        problem,
    }))
}

/// GET /problem/quiz
pub async fn random_problem(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProblemResponse>> {
    let problem = state.quiz.random_problem().await?;
    Ok(Json(ProblemResponse {
        message: "Problem retrieved successfully".to_string(),
        problem,
    }))
}

/// POST /problem/answer
pub async fn answer_problem(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<AnswerAttempt>, JsonRejection>,
) -> Result<Json<AnswerResponse>> {
    let Json(attempt) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;
    let correct = state.quiz.check_answer(&attempt.id, &attempt.guess).await?;
    Ok(Json(AnswerResponse { correct }))
}

/// GET /problem/hint/:tweetId
pub async fn get_hint(
    State(state): State<Arc<AppState>>,
    Path(tweet_id): Path<String>,
) -> Result<Json<HintResponse>> {
    let hint = state.quiz.hint(&tweet_id).await?;
    Ok(Json(HintResponse { hint }))
}
