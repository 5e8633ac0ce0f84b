use crate::engine::QuizSession;
use crate::handlers::dispatch_effects;
use crate::state::BotState;
use std::collections::hash_map::Entry;
use std::error::Error;
use std::sync::Arc;
use teloxide::prelude::*;

/// Plain-text messages drive the quiz conversation. A chat that has never
/// talked to the bot gets the greeting first; its message is then handled
/// against the fresh session.
pub async fn chat_handler(
    bot: Bot,
    msg: Message,
    state: Arc<BotState>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let text = match msg.text() {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => return Ok(()),
    };

    let (generation, effects) = {
        let mut sessions = state.sessions.lock().await;
        let mut rng = state.rng.lock().await;
        let mut effects = Vec::new();

        let session = match sessions.entry(msg.chat.id.0) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let session = entry.insert(QuizSession::new());
                effects.extend(session.greet());
                session
            }
        };
        effects.extend(session.handle_input(&state.questions, &mut rng, &text));
        (session.generation(), effects)
    };

    dispatch_effects(bot, msg.chat.id, state.clone(), generation, effects).await;
    Ok(())
}
