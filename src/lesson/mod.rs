// src/lesson/mod.rs

//! Lesson content, quiz scoring and the stage machine. No I/O lives here.

pub mod content;
pub mod flow;
pub mod location;
pub mod quiz;
pub mod settle;

pub use flow::{FlowError, LessonFlow, Stage};
pub use location::LocationReading;
pub use quiz::{AnswerSelections, Outcome, QuestionId, Score};
pub use settle::Settled;
