//! Authentication, signed sessions, and account identity.
//!
//! JWT-based stateless authentication with Argon2 password hashing. Tokens
//! are self-contained: signature covers subject, kind, and expiry, and no
//! issued token is ever stored server-side, so the only way to end a session
//! before natural expiry is client-side discarding.
//!
//! ## Pipeline
//!
//! - [`password`] — Argon2 hashing and verification
//! - [`Crypto`] — signing and verification of access/refresh tokens
//! - [`Claims`] / [`Kind`] — token payload and kind discriminator
//! - [`Auth`] — extractor resolving a token to a live, non-blocked [`Account`]
mod account;
mod claims;
mod crypto;
mod dto;
pub mod password;

pub use account::*;
pub use claims::*;
pub use crypto::*;
pub use dto::*;

#[cfg(feature = "database")]
mod repository;
#[cfg(feature = "database")]
pub use repository::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub use handlers::*;
#[cfg(feature = "server")]
pub use middleware::*;
