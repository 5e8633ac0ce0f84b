mod chat;
mod command;

pub use chat::*;
pub use command::*;

use crate::engine::{Deferred, Effect};
use crate::state::BotState;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use teloxide::prelude::*;

/// Sends immediate replies and spawns paced deliveries. Each spawned task
/// re-enters the session with the generation captured at schedule time, so
/// deliveries outlived by a reset are dropped inside the engine instead of
/// appending stale messages.
pub fn dispatch_effects(
    bot: Bot,
    chat_id: ChatId,
    state: Arc<BotState>,
    generation: u64,
    effects: Vec<Effect>,
) -> Pin<Box<dyn Future<Output = ()> + Send>> {
    Box::pin(async move {
        for effect in effects {
            match effect {
                Effect::Reply(text) => {
                    if let Err(e) = bot.send_message(chat_id, text).await {
                        log::error!("Failed to send message to chat {}: {}", chat_id.0, e);
                    }
                }
                Effect::Schedule { delay, deferred } => {
                    let bot = bot.clone();
                    let state = state.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let effects = deliver(&state, chat_id, generation, deferred).await;
                        dispatch_effects(bot, chat_id, state, generation, effects).await;
                    });
                }
            }
        }
    })
}

async fn deliver(
    state: &Arc<BotState>,
    chat_id: ChatId,
    generation: u64,
    deferred: Deferred,
) -> Vec<Effect> {
    let mut sessions = state.sessions.lock().await;
    match sessions.get_mut(&chat_id.0) {
        Some(session) => {
            let mut rng = state.rng.lock().await;
            session.deliver(generation, deferred, &state.questions, &mut rng)
        }
        None => Vec::new(),
    }
}
