use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::queries::questions,
    quiz::{pick_question, QuizQuestion, QuizScope},
    server::app::AppState,
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::{ApiError, ApiResponse, JsonBody};

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Deserialize)]
struct QuizRound {
    quiz_category: QuizCategory,
    previous_questions: Vec<i64>,
}

#[derive(Serialize)]
struct QuizResponse {
    question: QuizQuestion,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    JsonBody(round): JsonBody<QuizRound>,
) -> ApiResponse<Json<QuizResponse>> {
    let candidates = match QuizScope::from_category_id(round.quiz_category.id) {
        QuizScope::All => questions::get_all_questions(&pool).await,
        QuizScope::Category(id) => questions::get_questions_for_category(&pool, id).await,
    }
    .map_err(ApiError::unprocessable)?;

    let picked = pick_question(
        candidates,
        &round.previous_questions,
        &mut rand::thread_rng(),
    );
    match &picked {
        Some(question) => {
            let category = question.category.to_string();
            QUIZ_QUESTIONS_SERVED
                .with_label_values(&[category.as_str()])
                .inc();
        }
        None => tracing::debug!(
            "No questions left in category {} after {} shown",
            round.quiz_category.id,
            round.previous_questions.len()
        ),
    }

    Ok(Json(QuizResponse {
        question: QuizQuestion(picked),
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
