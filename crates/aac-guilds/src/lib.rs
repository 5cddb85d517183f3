//! Guild charters, ranks, and memberships.
//!
//! Every guild has exactly one leader, recorded explicitly as `owner_id` on
//! the guild row. Founding writes the guild, its three default ranks, and
//! the founder's leader membership in a single statement, so no observer
//! ever sees a leaderless or rankless guild. Disbanding unwinds the same
//! rows in one statement.
mod dto;
mod guild;

pub use dto::*;
pub use guild::*;

#[cfg(feature = "database")]
mod repository;
#[cfg(feature = "database")]
pub use repository::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
pub use handlers::*;
