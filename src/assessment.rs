//! Stress self-assessment
//!
//! Four multiple-choice questions, each answered with an option index from
//! 0 (least stressed) to 3 (most stressed). The answers produce a 0-100
//! score, a stress level, and a handful of suggested chat topics.

use crate::error::{Result, SoulCareError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest option index a question accepts
pub const MAX_ANSWER: u8 = 3;

const FREQUENCY: [&str; 4] = ["Rarely", "Sometimes", "Often", "Almost Always"];
const QUALITY: [&str; 4] = ["Excellent", "Good", "Fair", "Poor"];

const QUESTIONS: [(&str, [&str; 4]); 4] = [
    (
        "How often do you feel overwhelmed by your responsibilities?",
        FREQUENCY,
    ),
    ("How would you rate your sleep quality recently?", QUALITY),
    (
        "How often do you feel physically or emotionally exhausted?",
        FREQUENCY,
    ),
    ("Do you find it difficult to concentrate on tasks?", FREQUENCY),
];

/// One quiz question as sent to the analysis endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 1-based question number
    pub id: u32,
    /// Question text
    pub question: String,
    /// Answer labels, least to most stressed
    pub options: Vec<String>,
}

/// The full question list
pub fn questions() -> Vec<Question> {
    QUESTIONS
        .iter()
        .zip(1..)
        .map(|((text, options), id)| Question {
            id,
            question: (*text).to_string(),
            options: options.iter().map(|o| (*o).to_string()).collect(),
        })
        .collect()
}

/// Payload for the analysis endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    /// Questions that were asked
    pub questions: Vec<Question>,
    /// Chosen option index per question
    pub answers: Vec<u8>,
}

/// Stress level bucket for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressLevel {
    /// Score below 30
    Low,
    /// Score from 30 up to 60
    Moderate,
    /// Score of 60 or more
    High,
}

impl StressLevel {
    /// Classify a 0-100 score
    ///
    /// # Examples
    ///
    /// ```
    /// use soulcare::assessment::StressLevel;
    ///
    /// assert_eq!(StressLevel::from_score(25.0), StressLevel::Low);
    /// assert_eq!(StressLevel::from_score(30.0), StressLevel::Moderate);
    /// assert_eq!(StressLevel::from_score(60.0), StressLevel::High);
    /// ```
    pub fn from_score(score: f64) -> Self {
        if score < 30.0 {
            StressLevel::Low
        } else if score < 60.0 {
            StressLevel::Moderate
        } else {
            StressLevel::High
        }
    }

    /// Chat topics worth exploring at this level
    pub fn suggestions(&self) -> &'static [&'static str] {
        match self {
            StressLevel::Low => &[
                "Maintaining Mental Wellness",
                "Preventive Self-Care",
                "Personal Growth",
            ],
            StressLevel::Moderate => &[
                "Stress Management Techniques",
                "Work-Life Balance",
                "Sleep Quality Improvement",
            ],
            StressLevel::High => &[
                "Anxiety Management",
                "Stress Relief Techniques",
                "Mindfulness Practices",
            ],
        }
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StressLevel::Low => write!(f, "Low"),
            StressLevel::Moderate => write!(f, "Moderate"),
            StressLevel::High => write!(f, "High"),
        }
    }
}

/// Score answers on a 0-100 scale
///
/// The sum of the answers divided by the highest possible sum for the
/// full question list.
pub fn calculate_score(answers: &[u8]) -> f64 {
    let total: u32 = answers.iter().map(|&a| u32::from(a)).sum();
    let max = (QUESTIONS.len() as u32) * u32::from(MAX_ANSWER);
    f64::from(total) / f64::from(max) * 100.0
}

/// Outcome of a completed assessment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssessmentResult {
    /// Score from 0 to 100
    pub score: f64,
    /// Level derived from the score
    pub level: StressLevel,
}

/// An assessment in progress
#[derive(Debug, Clone, Default)]
pub struct Assessment {
    answers: Vec<u8>,
}

impl Assessment {
    /// Start an assessment with no answers
    pub fn new() -> Self {
        Self::default()
    }

    /// The next question to ask, or `None` when all are answered
    pub fn current_question(&self) -> Option<Question> {
        questions().into_iter().nth(self.answers.len())
    }

    /// Record the answer to the current question
    ///
    /// # Errors
    ///
    /// Returns `SoulCareError::Assessment` if every question is already
    /// answered or `answer` is not a valid option index.
    ///
    /// # Examples
    ///
    /// ```
    /// use soulcare::assessment::{Assessment, StressLevel};
    ///
    /// let mut assessment = Assessment::new();
    /// for answer in [3, 3, 2, 3] {
    ///     assessment.answer(answer).unwrap();
    /// }
    /// let result = assessment.result().unwrap();
    /// assert_eq!(result.level, StressLevel::High);
    /// ```
    pub fn answer(&mut self, answer: u8) -> Result<()> {
        if self.is_complete() {
            return Err(
                SoulCareError::Assessment("All questions are already answered".to_string()).into(),
            );
        }
        if answer > MAX_ANSWER {
            return Err(SoulCareError::Assessment(format!(
                "Answer {} is out of range 0-{}",
                answer, MAX_ANSWER
            ))
            .into());
        }

        self.answers.push(answer);
        Ok(())
    }

    /// Whether every question has an answer
    pub fn is_complete(&self) -> bool {
        self.answers.len() >= QUESTIONS.len()
    }

    /// Answers given so far
    pub fn answers(&self) -> &[u8] {
        &self.answers
    }

    /// Payload for the analysis endpoint
    pub fn request(&self) -> AssessmentRequest {
        AssessmentRequest {
            questions: questions(),
            answers: self.answers.clone(),
        }
    }

    /// Score and level, once every question is answered
    ///
    /// # Errors
    ///
    /// Returns `SoulCareError::Assessment` if questions remain unanswered.
    pub fn result(&self) -> Result<AssessmentResult> {
        if !self.is_complete() {
            return Err(SoulCareError::Assessment(format!(
                "{} of {} questions answered",
                self.answers.len(),
                QUESTIONS.len()
            ))
            .into());
        }

        let score = calculate_score(&self.answers);
        Ok(AssessmentResult {
            score,
            level: StressLevel::from_score(score),
        })
    }
}
