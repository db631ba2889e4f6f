use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        NewQuestion, Question,
    },
    pagination::paginate,
    server::app::AppState,
    telemetry::{QUESTIONS_CREATED, QUESTIONS_DELETED},
};

use super::{format_categories, ApiError, ApiResponse, IdPath, JsonBody, PageQuery};

// the frontend posts category and difficulty straight from <select> values, so numbers may be strings
#[derive(Deserialize)]
struct CreateQuestion {
    question: String,
    answer: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    category: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: String,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

async fn questions_page(
    State(pool): State<SqlitePool>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let selection = questions::get_all_questions(&pool).await?;
    let total_questions = selection.len();
    let current = paginate(selection, page);
    if current.is_empty() {
        tracing::debug!("Page {} is empty", page.number());
        return Err(ApiError::NotFound);
    }
    let categories = categories::get_all_categories(&pool).await?;

    Ok(Json(QuestionsPage {
        success: true,
        questions: current,
        total_questions,
        categories: format_categories(categories),
        current_category: None,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    JsonBody(body): JsonBody<CreateQuestion>,
) -> ApiResponse<Json<Created>> {
    let new_question = NewQuestion {
        question: body.question,
        answer: body.answer,
        category: body.category,
        difficulty: body.difficulty,
    };
    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(ApiError::unprocessable)?;
    QUESTIONS_CREATED.inc();
    tracing::info!("Created question {id}");

    Ok(Json(Created {
        success: true,
        created: id,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    Query(PageQuery { page }): Query<PageQuery>,
    JsonBody(body): JsonBody<SearchBody>,
) -> ApiResponse<Json<SearchResults>> {
    let selection = questions::search_questions(&pool, &body.search_term)
        .await
        .map_err(ApiError::unprocessable)?;

    Ok(Json(SearchResults {
        success: true,
        total_questions: selection.len(),
        questions: paginate(selection, page),
        current_category: None,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    IdPath(id): IdPath<i64>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<Json<Deleted>> {
    questions::delete_question(&pool, id)
        .await
        .map_err(ApiError::unprocessable)?;
    QUESTIONS_DELETED.inc();
    tracing::info!("Deleted question {id}");

    // the row is gone at this point, a failed listing is a server error
    let remaining = questions::get_all_questions(&pool).await?;
    Ok(Json(Deleted {
        success: true,
        deleted: id,
        total_questions: remaining.len(),
        questions: paginate(remaining, page),
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(questions_page).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}/delete", delete(delete_question))
        .with_state(state)
}
