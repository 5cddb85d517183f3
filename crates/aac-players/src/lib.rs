//! Character lifecycle, deaths, and rankings.
//!
//! Characters are owned by exactly one account, are created with
//! policy-determined defaults (never user-supplied stats), and are deleted
//! by flipping a soft-delete marker rather than removing the row. Every
//! read path filters on that marker, so a deleted character's name becomes
//! available again immediately.
mod character;
mod death;
mod dto;
mod highscores;

pub use character::*;
pub use death::*;
pub use dto::*;
pub use highscores::*;

#[cfg(feature = "database")]
mod repository;
#[cfg(feature = "database")]
pub use repository::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
pub use handlers::*;
