// src/lesson/flow.rs

use std::fmt;

use serde::Serialize;

use super::content::CAMERA_REQUIRED_NOTICE;
use super::quiz::{self, AnswerSelections, Outcome, QuestionId, Score};

/// Phase of the learner's walk through the lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Start,
    Lesson,
    Quiz,
    Result,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Start => "start",
            Stage::Lesson => "lesson",
            Stage::Quiz => "quiz",
            Stage::Result => "result",
        };
        f.write_str(s)
    }
}

/// Rejected flow operations. A rejected operation leaves the flow unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// Camera permission was refused; the learner stays on Start.
    PermissionDenied,
    InvalidTransition { stage: Stage, action: &'static str },
    AlreadySubmitted,
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowError::PermissionDenied => f.write_str(CAMERA_REQUIRED_NOTICE),
            FlowError::InvalidTransition { stage, action } => {
                write!(f, "cannot {action} while in the {stage} stage")
            }
            FlowError::AlreadySubmitted => f.write_str("quiz has already been submitted"),
        }
    }
}

impl std::error::Error for FlowError {}

/// Start -> Lesson -> Quiz -> Result. There is no way back.
#[derive(Debug, Clone, Default)]
pub struct LessonFlow {
    stage: Stage,
    selections: AnswerSelections,
    score: Option<Score>,
    camera_granted: Option<bool>,
}

impl LessonFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn selections(&self) -> &AnswerSelections {
        &self.selections
    }

    pub fn score(&self) -> Option<Score> {
        self.score
    }

    /// Answer to the most recent camera prompt, if one was made.
    pub fn camera_granted(&self) -> Option<bool> {
        self.camera_granted
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.score.map(Outcome::for_score)
    }

    /// Start -> Lesson, gated on the camera permission prompt.
    pub fn begin(&mut self, camera_granted: bool) -> Result<Stage, FlowError> {
        self.expect_stage(Stage::Start, "begin the lesson")?;
        self.camera_granted = Some(camera_granted);
        if !camera_granted {
            return Err(FlowError::PermissionDenied);
        }
        self.stage = Stage::Lesson;
        Ok(self.stage)
    }

    /// Lesson -> Quiz.
    pub fn proceed(&mut self) -> Result<Stage, FlowError> {
        self.expect_stage(Stage::Lesson, "take the quiz")?;
        self.stage = Stage::Quiz;
        Ok(self.stage)
    }

    /// Upserts a selection. Any string is accepted.
    pub fn record_answer(
        &mut self,
        question: QuestionId,
        value: impl Into<String>,
    ) -> Result<(), FlowError> {
        self.expect_stage(Stage::Quiz, "answer")?;
        self.selections.record(question, value);
        Ok(())
    }

    /// Quiz -> Result. Scores once; a second call is rejected.
    pub fn submit(&mut self) -> Result<Score, FlowError> {
        if self.stage == Stage::Result {
            return Err(FlowError::AlreadySubmitted);
        }
        self.expect_stage(Stage::Quiz, "submit")?;
        let score = quiz::score(&self.selections);
        self.score = Some(score);
        self.stage = Stage::Result;
        Ok(score)
    }

    fn expect_stage(&self, expected: Stage, action: &'static str) -> Result<(), FlowError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(FlowError::InvalidTransition {
                stage: self.stage,
                action,
            })
        }
    }
}
