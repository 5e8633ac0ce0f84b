use crate::commands::Command;
use crate::engine::QuizSession;
use crate::handlers::dispatch_effects;
use crate::state::BotState;
use std::error::Error;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<BotState>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match cmd {
        // Both create-or-reset the chat's session: the transcript is
        // cleared, the generation is bumped and the greeting re-emitted.
        Command::Start | Command::Reset => {
            let (generation, effects) = {
                let mut sessions = state.sessions.lock().await;
                let session = sessions
                    .entry(msg.chat.id.0)
                    .or_insert_with(QuizSession::new);
                let effects = session.reset();
                (session.generation(), effects)
            };
            dispatch_effects(bot, msg.chat.id, state.clone(), generation, effects).await;
        }
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
        }
    }
    Ok(())
}
