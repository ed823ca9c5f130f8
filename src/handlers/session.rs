// src/handlers/session.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::session::{AnswerRequest, BeginRequest, LocationAck, LocationReport, LocationView},
    recorder::SessionRecorder,
    sessions::{LessonSession, SessionRegistry},
    utils::jwt::MaybeIdentity,
};

/// Looks up a session and settles its identity if the request carries one.
async fn load_session(
    registry: &SessionRegistry,
    id: Uuid,
    identity: MaybeIdentity,
) -> Result<Arc<LessonSession>, AppError> {
    let session = registry
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;

    if let MaybeIdentity(Some(identity)) = identity {
        if session.identity().settle(identity) {
            tracing::debug!(session = %id, "Session identity settled");
        }
    }

    Ok(session)
}

/// Opens a new session on the Start stage.
pub async fn create_session(
    State(registry): State<SessionRegistry>,
    identity: MaybeIdentity,
) -> Result<impl IntoResponse, AppError> {
    let session = registry.create().await;
    if let MaybeIdentity(Some(identity)) = identity {
        session.identity().settle(identity);
    }

    tracing::info!(session = %session.id(), "Lesson session started");

    Ok((StatusCode::CREATED, Json(session.view().await)))
}

pub async fn get_session(
    State(registry): State<SessionRegistry>,
    Path(id): Path<Uuid>,
    identity: MaybeIdentity,
) -> Result<impl IntoResponse, AppError> {
    let session = load_session(&registry, id, identity).await?;
    Ok(Json(session.view().await))
}

/// Records the outcome of the browser's one-shot geolocation request.
///
/// Only the first report is kept, success or failure.
pub async fn report_location(
    State(registry): State<SessionRegistry>,
    Path(id): Path<Uuid>,
    identity: MaybeIdentity,
    Json(report): Json<LocationReport>,
) -> Result<impl IntoResponse, AppError> {
    report.validate()?;

    let session = load_session(&registry, id, identity).await?;
    let accepted = session.location().settle(report.into_reading());
    if !accepted {
        tracing::debug!(session = %id, "Location already settled; report ignored");
    }

    Ok(Json(LocationAck {
        accepted,
        location: LocationView::from_reading(session.location().peek().as_ref()),
    }))
}

/// Start -> Lesson. Refused camera permission returns 403 with the notice to show.
pub async fn begin_lesson(
    State(registry): State<SessionRegistry>,
    Path(id): Path<Uuid>,
    identity: MaybeIdentity,
    Json(req): Json<BeginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = load_session(&registry, id, identity).await?;

    let view = session
        .apply(|flow| flow.begin(req.camera_granted).map(drop))
        .await
        .map_err(|e| {
            tracing::info!(session = %id, "Lesson not started: {}", e);
            AppError::from(e)
        })?;

    Ok(Json(view))
}

/// Lesson -> Quiz.
pub async fn proceed_to_quiz(
    State(registry): State<SessionRegistry>,
    Path(id): Path<Uuid>,
    identity: MaybeIdentity,
) -> Result<impl IntoResponse, AppError> {
    let session = load_session(&registry, id, identity).await?;
    let view = session.apply(|flow| flow.proceed().map(drop)).await?;
    Ok(Json(view))
}

pub async fn record_answer(
    State(registry): State<SessionRegistry>,
    Path(id): Path<Uuid>,
    identity: MaybeIdentity,
    Json(req): Json<AnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let session = load_session(&registry, id, identity).await?;
    let AnswerRequest { question, value } = req;
    let view = session
        .apply(|flow| flow.record_answer(question, value))
        .await?;

    Ok(Json(view))
}

/// Quiz -> Result.
///
/// * Scores the selections against the answer key.
/// * Hands the score to the recorder in the background, with the identity and
///   location settled so far.
/// * A second submission is rejected with 409 and writes nothing.
pub async fn submit_quiz(
    State(registry): State<SessionRegistry>,
    State(recorder): State<SessionRecorder>,
    Path(id): Path<Uuid>,
    identity: MaybeIdentity,
) -> Result<impl IntoResponse, AppError> {
    let session = load_session(&registry, id, identity).await?;
    // The progress write runs in the background; its outcome never reaches the learner.
    let submission = session.submit(&recorder).await?;

    tracing::info!(session = %id, score = submission.score.value(), "Quiz submitted");

    Ok(Json(json!({
        "score": submission.score,
        "session": submission.view,
    })))
}
