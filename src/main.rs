use std::error::Error;
use std::sync::Arc;
use teloxide::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::handlers::{chat_handler, command_handler};
use crate::state::BotState;
use crate::commands::Command;

mod types;
mod commands;
mod handlers;
mod error;
mod state;
mod bank;
mod engine;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    log::info!("Starting crypto quiz bot...");

    // Initialize bot with token from environment
    let bot = Bot::from_env();

    // Load the question bank from CSV
    let questions = bank::load_questions()?;
    log::info!("Loaded {} questions", questions.len());

    let state = Arc::new(BotState::new(questions, StdRng::from_entropy()));

    let handler = dptree::entry()
        .branch(Update::filter_message().filter_command::<Command>().endpoint(
            |bot: Bot, msg: Message, cmd: Command, state: Arc<BotState>| async move {
                command_handler(bot, msg, cmd, state).await
            },
        ))
        .branch(Update::filter_message().endpoint(
            |bot: Bot, msg: Message, state: Arc<BotState>| async move {
                chat_handler(bot, msg, state).await
            },
        ));

    log::info!("Starting command dispatching...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
