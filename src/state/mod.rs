use crate::engine::QuizSession;
use crate::types::QuizQuestion;
use rand::rngs::StdRng;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Shared bot state: the loaded question bank plus one quiz session per
/// chat. Sessions are ephemeral and never persisted.
pub struct BotState {
    pub questions: Vec<QuizQuestion>,
    pub sessions: Mutex<HashMap<i64, QuizSession>>,
    pub rng: Mutex<StdRng>,
}

impl BotState {
    pub fn new(questions: Vec<QuizQuestion>, rng: StdRng) -> Self {
        Self {
            questions,
            sessions: Mutex::new(HashMap::new()),
            rng: Mutex::new(rng),
        }
    }
}
