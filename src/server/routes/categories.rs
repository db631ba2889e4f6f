use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        Question,
    },
    pagination::paginate,
    server::app::AppState,
};

use super::{format_categories, ApiError, ApiResponse, IdPath, PageQuery};

#[derive(Serialize)]
struct CategoriesList {
    success: bool,
    categories: BTreeMap<i64, String>,
    total_categories: usize,
}

#[derive(Serialize)]
struct CategoryQuestions {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesList>> {
    let categories = categories::get_all_categories(&pool).await?;
    Ok(Json(CategoriesList {
        success: true,
        total_categories: categories.len(),
        categories: format_categories(categories),
    }))
}

async fn questions_for_category(
    State(pool): State<SqlitePool>,
    IdPath(id): IdPath<i64>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<Json<CategoryQuestions>> {
    let category = categories::get_category(&pool, id)
        .await
        .map_err(ApiError::unprocessable)?;
    let selection = questions::get_questions_for_category(&pool, id)
        .await
        .map_err(ApiError::unprocessable)?;

    Ok(Json(CategoryQuestions {
        success: true,
        total_questions: selection.len(),
        questions: paginate(selection, page),
        current_category: category.kind,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
        .with_state(state)
}
