// src/handlers/lesson.rs

use axum::{Json, response::IntoResponse};
use serde_json::json;

use crate::lesson::content::{GUIDE_INTRO, LESSON_NAME, LESSON_TEXT, QUESTIONS};

/// Returns the lesson and its questions. Answers are never sent to the client.
pub async fn get_lesson() -> impl IntoResponse {
    Json(json!({
        "name": LESSON_NAME,
        "intro": GUIDE_INTRO,
        "text": LESSON_TEXT,
        "questions": QUESTIONS,
    }))
}
