//! News posts and announcements.
//!
//! Reads are public and never surface hidden posts. Writes require an
//! account at or above the configured admin tier.
mod dto;
mod news;

pub use dto::*;
pub use news::*;

#[cfg(feature = "database")]
mod repository;
#[cfg(feature = "database")]
pub use repository::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
pub use handlers::*;
