mod types;
mod commands;
mod handlers;
mod error;
mod state;
mod bank;
mod engine;

pub use types::*;
pub use commands::*;
pub use handlers::*;
pub use error::*;
pub use state::*;
pub use bank::*;
pub use engine::*;
