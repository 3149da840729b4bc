//! Scrapforge - A turn-based mech combat and itemization engine
//!
//! Fight scaled enemies floor by floor, roll randomized gear,
//! and build your frame from sets and passives.

pub mod combat;
pub mod data;
pub mod dice;
pub mod error;
pub mod game;
pub mod items;
pub mod progression;

// Re-export commonly used types
pub use data::Catalog;
pub use dice::Dice;
pub use error::{CatalogError, GameError, InvalidAction};
pub use game::{AutoBattle, CharacterState, Engine, Report};
