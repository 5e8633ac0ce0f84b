//! The quiz session engine: a deterministic conversational state machine
//! driving a fixed-length quiz through an append-only chat transcript.
//!
//! The engine is pure. Transitions return [`Effect`] values; the caller
//! sends replies and schedules deferred deliveries. Deferred callbacks
//! carry the session generation captured at schedule time, and
//! [`QuizSession::deliver`] drops any callback whose generation no longer
//! matches, so a reset can never be trailed by a stale message.

pub mod answer;
pub mod script;

pub use answer::{check_answer, normalize};

use crate::bank::{select_questions, Filter};
use crate::types::{Difficulty, Message, PresentedQuestion, QuestionType, QuizQuestion, Role};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;
use std::time::Duration;

/// Pacing before the first question or a re-shown menu.
pub const MENU_DELAY: Duration = Duration::from_millis(500);
/// Pacing before a bonus fact or explanation.
pub const FACT_DELAY: Duration = Duration::from_millis(800);
/// Pacing before the next question or the completion summary.
pub const ADVANCE_DELAY: Duration = Duration::from_secs(2);

/// Where the session is in the conversation. Idle (no session at all) is
/// represented by the absence of a `QuizSession` rather than a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Top-level menu shown, no sub-mode chosen.
    MenuWait,
    TopicSelectWait,
    DifficultySelectWait,
    /// A question is displayed and an answer is awaited.
    InQuestion,
    /// An answer was just processed (or a quiz just started); the session
    /// is paused until the scheduled advance fires. Input arriving now is
    /// queued, not dropped.
    Grading,
    Complete,
}

/// A deferred delivery, executed later via [`QuizSession::deliver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    /// Append a paced bot message.
    Say(String),
    /// Show question zero with the kickoff preamble.
    FirstQuestion,
    /// Move past the grading pause: next question or completion summary.
    Advance,
}

/// What the caller must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A bot message, already appended to the transcript; render it.
    Reply(String),
    /// Schedule `deferred` after `delay`, tagged with the session
    /// generation current at schedule time.
    Schedule { delay: Duration, deferred: Deferred },
}

pub struct QuizSession {
    transcript: Vec<Message>,
    next_seq: u64,
    phase: Phase,
    questions: Vec<PresentedQuestion>,
    current_index: usize,
    score: u32,
    answered: u32,
    generation: u64,
    pending_input: VecDeque<String>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            transcript: Vec::new(),
            next_seq: 0,
            phase: Phase::MenuWait,
            questions: Vec::new(),
            current_index: 0,
            score: 0,
            answered: 0,
            generation: 0,
            pending_input: VecDeque::new(),
        }
    }

    /// Emits the greeting and the top-level menu.
    pub fn greet(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.reply(script::GREETING, &mut effects);
        self.reply(script::MAIN_MENU, &mut effects);
        effects
    }

    /// Full reset: bumps the generation (invalidating every outstanding
    /// deferred callback), clears the transcript and all quiz state, and
    /// greets again.
    pub fn reset(&mut self) -> Vec<Effect> {
        self.generation += 1;
        self.transcript.clear();
        self.next_seq = 0;
        self.questions.clear();
        self.current_index = 0;
        self.score = 0;
        self.answered = 0;
        self.pending_input.clear();
        self.phase = Phase::MenuWait;
        self.greet()
    }

    /// Processes one user message. The message is appended to the
    /// transcript unconditionally; what happens next depends on the phase.
    pub fn handle_input(
        &mut self,
        bank: &[QuizQuestion],
        rng: &mut StdRng,
        text: &str,
    ) -> Vec<Effect> {
        self.push(Role::User, text);
        self.dispatch(bank, rng, text)
    }

    /// Executes a deferred delivery. Callbacks scheduled before a reset
    /// carry a stale generation and are dropped here.
    pub fn deliver(
        &mut self,
        generation: u64,
        deferred: Deferred,
        bank: &[QuizQuestion],
        rng: &mut StdRng,
    ) -> Vec<Effect> {
        if generation != self.generation {
            log::debug!("dropping stale deferred callback (generation {})", generation);
            return Vec::new();
        }

        let mut effects = match deferred {
            Deferred::Say(text) => {
                self.push(Role::Bot, &text);
                vec![Effect::Reply(text)]
            }
            Deferred::FirstQuestion => {
                self.phase = Phase::InQuestion;
                let text = format!(
                    "Awesome! Let's dive in! 🚀\n\n{}",
                    self.question_message(0, rng)
                );
                self.push(Role::Bot, &text);
                vec![Effect::Reply(text)]
            }
            Deferred::Advance => {
                if (self.answered as usize) < self.questions.len() {
                    self.current_index = self.answered as usize;
                    self.phase = Phase::InQuestion;
                    let text = self.question_message(self.current_index, rng);
                    self.push(Role::Bot, &text);
                    vec![Effect::Reply(text)]
                } else {
                    self.current_index = self.questions.len();
                    self.phase = Phase::Complete;
                    let text = self.summary_text();
                    self.push(Role::Bot, &text);
                    vec![Effect::Reply(text)]
                }
            }
        };

        // Replay input that queued up during the grading pause, in order.
        // Stops again if a replayed answer re-enters Grading.
        while self.phase != Phase::Grading {
            match self.pending_input.pop_front() {
                Some(text) => effects.extend(self.dispatch(bank, rng, &text)),
                None => break,
            }
        }
        effects
    }

    fn dispatch(&mut self, bank: &[QuizQuestion], rng: &mut StdRng, text: &str) -> Vec<Effect> {
        match self.phase {
            Phase::InQuestion => self.grade(rng, text),
            Phase::Grading => {
                self.pending_input.push_back(text.to_string());
                Vec::new()
            }
            Phase::MenuWait => self.handle_menu(bank, rng, text),
            Phase::TopicSelectWait => self.handle_topic_select(bank, rng, text),
            Phase::DifficultySelectWait => self.handle_difficulty_select(bank, rng, text),
            Phase::Complete => self.handle_complete(text),
        }
    }

    fn handle_menu(&mut self, bank: &[QuizQuestion], rng: &mut StdRng, text: &str) -> Vec<Effect> {
        let lowered = text.trim().to_lowercase();
        let mut effects = Vec::new();

        if lowered == "a" || lowered.contains("random") || lowered.contains("mixed") {
            self.reply(
                "Perfect! Starting a random mixed difficulty quiz! 🎲",
                &mut effects,
            );
            effects.extend(self.start_quiz(bank, rng, None));
        } else if lowered == "b" || lowered.contains("topic") {
            self.phase = Phase::TopicSelectWait;
            self.reply(script::TOPIC_MENU, &mut effects);
        } else if lowered == "c" || lowered.contains("difficulty") {
            self.phase = Phase::DifficultySelectWait;
            self.reply(script::DIFFICULTY_MENU, &mut effects);
        } else {
            self.reply(script::CLARIFY_MENU, &mut effects);
        }
        effects
    }

    fn handle_topic_select(
        &mut self,
        bank: &[QuizQuestion],
        rng: &mut StdRng,
        text: &str,
    ) -> Vec<Effect> {
        let lowered = text.trim().to_lowercase();
        let topic = match lowered.as_str() {
            "a" => Some("Bitcoin"),
            "b" => Some("Ethereum"),
            "c" => Some("Comparison"),
            "d" => Some("General"),
            _ if lowered.contains("bitcoin") => Some("Bitcoin"),
            _ if lowered.contains("ethereum") => Some("Ethereum"),
            _ if lowered.contains("comparison") => Some("Comparison"),
            _ if lowered.contains("general") || lowered.contains("tech") => Some("General"),
            _ => None,
        };

        let mut effects = Vec::new();
        match topic {
            Some(topic) => {
                self.reply(format!("Great choice! Starting {} quiz! 📖", topic), &mut effects);
                effects.extend(self.start_quiz(bank, rng, Some(Filter::Topic(topic.to_string()))));
            }
            None => self.reply(script::CLARIFY_TOPIC, &mut effects),
        }
        effects
    }

    fn handle_difficulty_select(
        &mut self,
        bank: &[QuizQuestion],
        rng: &mut StdRng,
        text: &str,
    ) -> Vec<Effect> {
        let lowered = text.trim().to_lowercase();
        let difficulty = match lowered.as_str() {
            "a" => Some(Difficulty::Easy),
            "b" => Some(Difficulty::Medium),
            "c" => Some(Difficulty::Hard),
            _ if lowered.contains("easy") => Some(Difficulty::Easy),
            _ if lowered.contains("medium") => Some(Difficulty::Medium),
            _ if lowered.contains("hard") => Some(Difficulty::Hard),
            _ => None,
        };

        let mut effects = Vec::new();
        match difficulty {
            Some(difficulty) => {
                self.reply(
                    format!("Alright! Starting {} difficulty quiz! 💪", difficulty.as_str()),
                    &mut effects,
                );
                effects.extend(self.start_quiz(bank, rng, Some(Filter::Difficulty(difficulty))));
            }
            None => self.reply(script::CLARIFY_DIFFICULTY, &mut effects),
        }
        effects
    }

    fn handle_complete(&mut self, text: &str) -> Vec<Effect> {
        let lowered = text.trim().to_lowercase();
        let mut effects = Vec::new();

        if lowered.contains("restart") || lowered.contains("new") || lowered.contains("again") {
            self.phase = Phase::MenuWait;
            effects.push(Effect::Schedule {
                delay: MENU_DELAY,
                deferred: Deferred::Say(format!("Great! {}", script::MAIN_MENU)),
            });
        } else {
            self.reply(script::CLARIFY_COMPLETE, &mut effects);
        }
        effects
    }

    /// Selects the quiz questions and pauses the session until the first
    /// question (or, for an empty pool, the 0/0 summary) is delivered.
    fn start_quiz(
        &mut self,
        bank: &[QuizQuestion],
        rng: &mut StdRng,
        filter: Option<Filter>,
    ) -> Vec<Effect> {
        self.questions = select_questions(bank, filter.as_ref(), rng)
            .into_iter()
            .map(PresentedQuestion::new)
            .collect();
        self.current_index = 0;
        self.score = 0;
        self.answered = 0;

        if self.questions.is_empty() {
            // Nothing matched the filter. The session still completes,
            // scoring 0/0, instead of failing.
            self.phase = Phase::Complete;
            let summary = self.summary_text();
            vec![Effect::Schedule {
                delay: MENU_DELAY,
                deferred: Deferred::Say(summary),
            }]
        } else {
            self.phase = Phase::Grading;
            vec![Effect::Schedule {
                delay: MENU_DELAY,
                deferred: Deferred::FirstQuestion,
            }]
        }
    }

    /// Grades the answer to the current question and emits the verdict.
    /// Bonus content and the advance are paced, never blocking: input that
    /// arrives meanwhile queues as the next user message.
    fn grade(&mut self, rng: &mut StdRng, text: &str) -> Vec<Effect> {
        let presented = self.questions[self.current_index].clone();
        let is_correct = answer::check_answer(text, &presented);
        self.answered += 1;
        self.phase = Phase::Grading;

        let mut effects = Vec::new();
        if is_correct {
            self.score += 1;
            let encouragement = script::ENCOURAGEMENTS
                .choose(rng)
                .copied()
                .unwrap_or(script::ENCOURAGEMENTS[0]);
            self.reply(encouragement, &mut effects);

            if let Some(fact) = script::fun_fact(&presented.question.correct_answer) {
                effects.push(Effect::Schedule {
                    delay: FACT_DELAY,
                    deferred: Deferred::Say(fact.to_string()),
                });
            }
        } else {
            self.reply(
                format!(
                    "❌ Not quite! The correct answer is: **{}**",
                    presented.question.correct_answer
                ),
                &mut effects,
            );

            if let Some(explanation) = script::explanation(&presented.question.correct_answer) {
                effects.push(Effect::Schedule {
                    delay: FACT_DELAY,
                    deferred: Deferred::Say(format!("💡 {}", explanation)),
                });
            }
        }

        effects.push(Effect::Schedule {
            delay: ADVANCE_DELAY,
            deferred: Deferred::Advance,
        });
        effects
    }

    /// Binds the option shuffle for the question at `index` and renders
    /// its chat message.
    fn question_message(&mut self, index: usize, rng: &mut StdRng) -> String {
        let total = self.questions.len();
        let score = self.score;
        let answered = self.answered;

        let presented = &mut self.questions[index];
        presented.bind_shuffle(rng);

        let options_text = match presented.question.question_type {
            QuestionType::MultipleChoice => presented
                .options()
                .iter()
                .enumerate()
                .map(|(i, option)| format!("{}) {}", (b'A' + i as u8) as char, option))
                .collect::<Vec<_>>()
                .join("\n"),
            QuestionType::TrueFalse => "A) True\nB) False".to_string(),
            QuestionType::FillBlank => "Type your answer below:".to_string(),
        };

        format!(
            "**Question {} of {}** | Score: {}/{}\n\n{}\n\n{}\n\nWhat's your answer?",
            index + 1,
            total,
            score,
            answered,
            presented.question.question,
            options_text
        )
    }

    fn summary_text(&self) -> String {
        let total = self.questions.len();
        let percentage = if total == 0 {
            0.0
        } else {
            (self.score as f64 / total as f64) * 100.0
        };
        let (label, emoji) = script::performance_tier(percentage);

        format!(
            "🎊 Quiz Complete!\n\nFinal Score: {}/{} ({:.0}%)\n\n{} {}!\n\nWant to try again? Type 'restart' or 'new quiz'!",
            self.score, total, percentage, emoji, label
        )
    }

    fn reply(&mut self, text: impl Into<String>, effects: &mut Vec<Effect>) {
        let text = text.into();
        self.push(Role::Bot, &text);
        effects.push(Effect::Reply(text));
    }

    fn push(&mut self, role: Role, text: &str) {
        self.transcript.push(Message {
            role,
            text: text.to_string(),
            seq: self.next_seq,
            sent_at: Utc::now(),
        });
        self.next_seq += 1;
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn questions(&self) -> &[PresentedQuestion] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn answered(&self) -> u32 {
        self.answered
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while a quiz is running (a question shown or being graded).
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::InQuestion | Phase::Grading)
    }

    /// True only while the last bot message was a question and no answer
    /// has been processed yet.
    pub fn awaiting_answer(&self) -> bool {
        self.phase == Phase::InQuestion
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}
