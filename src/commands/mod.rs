use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start a quiz chat")]
    Start,
    #[command(description = "Reset the current quiz session")]
    Reset,
    #[command(description = "Show help message")]
    Help,
}
