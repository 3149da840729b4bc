//! Progression systems

pub mod xp;

pub use xp::{grant_experience, xp_to_next};
