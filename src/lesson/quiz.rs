// src/lesson/quiz.rs

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of quiz questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionId {
    Q1,
    Q2,
    Q3,
}

impl QuestionId {
    pub const ALL: [QuestionId; 3] = [QuestionId::Q1, QuestionId::Q2, QuestionId::Q3];

    /// The answer key entry for this question.
    pub const fn correct_answer(self) -> &'static str {
        match self {
            QuestionId::Q1 => "2024",
            QuestionId::Q2 => "Europa Clipper",
            QuestionId::Q3 => "SpaceX Starship",
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuestionId::Q1 => "q1",
            QuestionId::Q2 => "q2",
            QuestionId::Q3 => "q3",
        };
        f.write_str(s)
    }
}

/// The learner's selections. Keys are only ever added or overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerSelections(BTreeMap<QuestionId, String>);

impl AnswerSelections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question: QuestionId, value: impl Into<String>) {
        self.0.insert(question, value.into());
    }

    pub fn get(&self, question: QuestionId) -> Option<&str> {
        self.0.get(&question).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Number of correct answers, `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const MAX: Score = Score(QuestionId::ALL.len() as u8);

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strict string matching against the answer key. Unanswered questions never count.
pub fn score(selections: &AnswerSelections) -> Score {
    let correct = QuestionId::ALL
        .iter()
        .filter(|q| selections.get(**q) == Some(q.correct_answer()))
        .count();
    Score(correct as u8)
}

pub const BADGE_TEXT: &str = "🏅 You’ve earned the Nova Explorer Badge!";

/// What the Result stage shows. Only a perfect score earns the badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Excellent,
    GoodTry,
}

impl Outcome {
    pub fn for_score(score: Score) -> Self {
        if score == Score::MAX {
            Outcome::Excellent
        } else {
            Outcome::GoodTry
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Outcome::Excellent => "🌟 Excellent!",
            Outcome::GoodTry => "👍 Good Try!",
        }
    }

    pub fn badge(self) -> Option<&'static str> {
        match self {
            Outcome::Excellent => Some(BADGE_TEXT),
            Outcome::GoodTry => None,
        }
    }

    pub fn summary(score: Score) -> String {
        format!("You scored {} out of {}.", score, Score::MAX)
    }
}
