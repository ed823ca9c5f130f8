// src/models/session.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::lesson::{AnswerSelections, LessonFlow, LocationReading, Outcome, QuestionId, Stage};

/// DTO for the begin action: the outcome of the browser's camera prompt.
#[derive(Debug, Deserialize)]
pub struct BeginRequest {
    pub camera_granted: bool,
}

/// DTO for recording one answer.
#[derive(Debug, Deserialize, Validate)]
pub struct AnswerRequest {
    pub question: QuestionId,
    #[validate(length(max = 200, message = "Answer must be at most 200 characters."))]
    pub value: String,
}

/// DTO for the geolocation callback. Exactly one of the two shapes is sent.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LocationReport {
    Position(PositionReport),
    Failure(FailureReport),
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PositionReport {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct FailureReport {
    #[validate(length(min = 1, max = 500))]
    pub error: String,
}

impl LocationReport {
    pub fn validate(&self) -> Result<(), validator::ValidationErrors> {
        match self {
            LocationReport::Position(p) => p.validate(),
            LocationReport::Failure(f) => f.validate(),
        }
    }

    pub fn into_reading(self) -> LocationReading {
        match self {
            LocationReport::Position(p) => LocationReading::Position {
                lat: p.lat,
                lon: p.lon,
            },
            LocationReport::Failure(f) => LocationReading::Unavailable(f.error),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LocationView {
    pub display: Option<String>,
    pub error: Option<String>,
}

impl LocationView {
    pub fn from_reading(reading: Option<&LocationReading>) -> Self {
        Self {
            display: reading.and_then(LocationReading::display_text),
            error: reading.and_then(|r| r.error().map(str::to_owned)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OutcomeView {
    pub headline: &'static str,
    pub summary: String,
    pub badge: Option<&'static str>,
}

/// Snapshot of a session returned by every session endpoint.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub stage: Stage,
    /// Answer to the latest camera prompt; the client shows the preview only when `true`.
    pub camera_granted: Option<bool>,
    pub answers: AnswerSelections,
    pub score: Option<u8>,
    pub outcome: Option<OutcomeView>,
    pub location: LocationView,
}

impl SessionView {
    pub fn new(id: Uuid, flow: &LessonFlow, location: Option<&LocationReading>) -> Self {
        let outcome = flow.score().map(|score| {
            let outcome = Outcome::for_score(score);
            OutcomeView {
                headline: outcome.headline(),
                summary: Outcome::summary(score),
                badge: outcome.badge(),
            }
        });

        Self {
            id,
            stage: flow.stage(),
            camera_granted: flow.camera_granted(),
            answers: flow.selections().clone(),
            score: flow.score().map(|s| s.value()),
            outcome,
            location: LocationView::from_reading(location),
        }
    }
}

/// Response to a location report.
#[derive(Debug, Serialize)]
pub struct LocationAck {
    /// False when an earlier report already settled the location.
    pub accepted: bool,
    pub location: LocationView,
}
