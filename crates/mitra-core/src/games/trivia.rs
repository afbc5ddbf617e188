//! Wellness trivia quiz.

use serde::Serialize;

use crate::error::{MitraError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: u32,
    pub question: &'static str,
    pub options: [&'static str; 4],
    pub correct: usize,
    pub explanation: &'static str,
    pub category: &'static str,
}

/// The fixed question set, asked in order.
pub static QUESTIONS: [Question; 5] = [
    Question {
        id: 1,
        question: "Which neurotransmitter is often called the 'happiness chemical'?",
        options: ["Dopamine", "Serotonin", "Adrenaline", "Cortisol"],
        correct: 1,
        explanation: "Serotonin is often called the happiness chemical because it contributes to wellbeing and happiness!",
        category: "Science",
    },
    Question {
        id: 2,
        question: "How many minutes of exercise per day can help improve mood?",
        options: ["5 minutes", "15 minutes", "30 minutes", "60 minutes"],
        correct: 1,
        explanation: "Just 15 minutes of moderate exercise can boost your mood by releasing endorphins!",
        category: "Wellness",
    },
    Question {
        id: 3,
        question: "What technique involves focusing on the present moment?",
        options: ["Daydreaming", "Mindfulness", "Multitasking", "Planning"],
        correct: 1,
        explanation: "Mindfulness is the practice of being fully present and engaged in the current moment.",
        category: "Mindfulness",
    },
    Question {
        id: 4,
        question: "Which of these is a proven way to reduce stress?",
        options: [
            "Deep breathing",
            "Holding your breath",
            "Rapid breathing",
            "Irregular breathing",
        ],
        correct: 0,
        explanation: "Deep breathing activates the body's relaxation response and helps reduce stress hormones.",
        category: "Wellness",
    },
    Question {
        id: 5,
        question: "How much sleep do most adults need for optimal mental health?",
        options: ["4-5 hours", "6-7 hours", "7-9 hours", "10+ hours"],
        correct: 2,
        explanation: "Most adults need 7-9 hours of quality sleep for optimal mental and physical health.",
        category: "Health",
    },
];

/// Feedback for an answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_option: &'static str,
    pub explanation: &'static str,
}

/// A read-only view of the quiz for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriviaView {
    Asking {
        number: usize,
        total: usize,
        question: &'static Question,
        selected: Option<usize>,
        score: u32,
    },
    Complete {
        score: u32,
        total: usize,
        message: &'static str,
    },
}

#[derive(Debug, Clone, Default)]
pub struct TriviaQuiz {
    current: usize,
    selected: Option<usize>,
    score: u32,
    complete: bool,
}

impl TriviaQuiz {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Whether the current question has been answered.
    pub fn showing_result(&self) -> bool {
        self.selected.is_some()
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        if self.complete {
            None
        } else {
            QUESTIONS.get(self.current)
        }
    }

    /// Answers the current question with option `index`.
    pub fn answer(&mut self, index: usize) -> Result<AnswerFeedback> {
        let question = self
            .current_question()
            .ok_or_else(|| MitraError::invalid_input("the quiz is complete; reset to play again"))?;
        if self.selected.is_some() {
            return Err(MitraError::invalid_input(
                "this question has already been answered",
            ));
        }
        if index >= question.options.len() {
            return Err(MitraError::invalid_input(format!(
                "option {} does not exist (choose 1-{})",
                index.saturating_add(1),
                question.options.len()
            )));
        }

        self.selected = Some(index);
        let correct = index == question.correct;
        if correct {
            self.score += 1;
        }
        Ok(AnswerFeedback {
            correct,
            correct_option: question.options[question.correct],
            explanation: question.explanation,
        })
    }

    /// Moves on to the next question, or finishes the quiz after the last.
    pub fn next(&mut self) {
        if self.complete {
            return;
        }
        if self.current + 1 < QUESTIONS.len() {
            self.current += 1;
            self.selected = None;
        } else {
            self.complete = true;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Closing message based on the share of correct answers.
    pub fn score_message(&self) -> &'static str {
        let percentage = self.score as f64 / QUESTIONS.len() as f64 * 100.0;
        if percentage >= 80.0 {
            "Excellent! You're a wellness expert!"
        } else if percentage >= 60.0 {
            "Great job! You know a lot about wellbeing!"
        } else if percentage >= 40.0 {
            "Good effort! Keep learning about mental health!"
        } else {
            "Every step in learning about mental health counts!"
        }
    }

    pub fn view(&self) -> TriviaView {
        match self.current_question() {
            Some(question) => TriviaView::Asking {
                number: self.current + 1,
                total: QUESTIONS.len(),
                question,
                selected: self.selected,
                score: self.score,
            },
            None => TriviaView::Complete {
                score: self.score,
                total: QUESTIONS.len(),
                message: self.score_message(),
            },
        }
    }
}
