use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "Multiple Choice")]
    MultipleChoice,
    #[serde(rename = "True/False")]
    TrueFalse,
    #[serde(rename = "Fill-in-Blank")]
    FillBlank,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub topic: String,
    pub difficulty: Difficulty,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    pub correct_answer: String,
    #[serde(default)]
    pub option1: String,
    #[serde(default)]
    pub option2: String,
    #[serde(default)]
    pub option3: String,
}

impl QuizQuestion {
    /// Incorrect options only; empty CSV cells are skipped, so a question
    /// carries anywhere from zero to three distractors.
    pub fn distractors(&self) -> Vec<String> {
        [&self.option1, &self.option2, &self.option3]
            .iter()
            .filter(|o| !o.is_empty())
            .map(|o| o.to_string())
            .collect()
    }
}

/// A question bound to the option ordering shown for its turn. The shuffle
/// is recorded at display time because letter answers ("A"/"B"/...) resolve
/// against exactly what the user saw.
#[derive(Debug, Clone)]
pub struct PresentedQuestion {
    pub question: QuizQuestion,
    shuffled: Option<Vec<String>>,
}

impl PresentedQuestion {
    pub fn new(question: QuizQuestion) -> Self {
        Self {
            question,
            shuffled: None,
        }
    }

    /// Binds the option ordering for this turn. Multiple-choice options are
    /// a uniform permutation of the correct answer and its distractors;
    /// True/False is always shown as A) True / B) False; fill-in-blank has
    /// no options.
    pub fn bind_shuffle(&mut self, rng: &mut StdRng) {
        match self.question.question_type {
            QuestionType::MultipleChoice => {
                let mut options: Vec<String> =
                    std::iter::once(self.question.correct_answer.clone())
                        .chain(self.question.distractors())
                        .collect();
                options.shuffle(rng);
                self.shuffled = Some(options);
            }
            QuestionType::TrueFalse => {
                self.shuffled = Some(vec!["True".to_string(), "False".to_string()]);
            }
            QuestionType::FillBlank => {}
        }
    }

    #[cfg(test)]
    pub fn set_options_for_test(&mut self, options: Vec<String>) {
        self.shuffled = Some(options);
    }

    /// The options in display order. If no shuffle was ever recorded for
    /// this question, falls back to the unshuffled ordering so answer
    /// checking still works.
    pub fn options(&self) -> Vec<String> {
        match &self.shuffled {
            Some(options) => options.clone(),
            None => std::iter::once(self.question.correct_answer.clone())
                .chain(self.question.distractors())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Bot,
    User,
}

/// One chat bubble. The transcript is append-only; `seq` increases
/// monotonically within a session and insertion order is display order.
#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub seq: u64,
    pub sent_at: DateTime<Utc>,
}
