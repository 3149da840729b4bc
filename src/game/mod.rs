//! Game module - Character state, commands and the event log

mod auto;
mod engine;
mod log;
mod state;

pub use auto::AutoBattle;
pub use engine::{salvage_value, sell_value, Engine, Report};
pub use log::{EventLog, GameMessage, MessageCategory, DEFAULT_LOG_CAPACITY};
pub use state::{BaseAttributes, CharacterState, STARTING_GOLD};
