// src/lesson/content.rs

use serde::Serialize;

use super::quiz::QuestionId;

/// Lesson name stored with every progress record.
pub const LESSON_NAME: &str = "What’s New in Space Exploration";

/// Greeting shown on the Start stage.
pub const GUIDE_INTRO: &str =
    "Hi, I’m Nova, your guide to the stars! Ready to learn what’s new beyond Earth’s orbit?";

/// The static lesson shown on the Lesson stage.
pub const LESSON_TEXT: &str = "In 2024, space exploration is taking giant leaps. \
NASA is preparing the Artemis II mission to take humans around the Moon again. \
The Europa Clipper is set to explore Jupiter’s icy moon, Europa, to search for signs of life. \
Meanwhile, SpaceX is testing Starship, the most powerful rocket ever built, \
aiming to take us to Mars and beyond.";

/// Blocking notice surfaced when the camera prompt is refused.
pub const CAMERA_REQUIRED_NOTICE: &str = "Webcam permission is required to proceed.";

/// A quiz question as shown to the learner. Never carries the answer.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: &'static str,
    pub choices: [&'static str; 2],
}

pub const QUESTIONS: [Question; 3] = [
    Question {
        id: QuestionId::Q1,
        prompt: "What year is Artemis II expected to launch?",
        choices: ["2024", "2026"],
    },
    Question {
        id: QuestionId::Q2,
        prompt: "What is the name of the NASA mission to Jupiter’s moon?",
        choices: ["Europa Clipper", "Lunar Gateway"],
    },
    Question {
        id: QuestionId::Q3,
        prompt: "What rocket is SpaceX developing?",
        choices: ["Falcon 9", "SpaceX Starship"],
    },
];
