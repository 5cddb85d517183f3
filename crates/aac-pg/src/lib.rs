//! PostgreSQL connectivity and schema bootstrap.
//!
//! The persistent store is the only shared mutable resource in the system;
//! a single [`Client`] is shared across request tasks behind an `Arc`, and
//! all exclusion is delegated to the store. Domain crates express their
//! table layout through [`Schema`] and their queries through repository
//! traits implemented on `Arc<Client>`.
mod schema;

pub use schema::*;

use std::sync::Arc;
use tokio_postgres::Client;

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Establishes a database connection from an explicit URL.
///
/// The connection task is spawned onto the current runtime. Failure here is
/// a startup error for the caller to surface, not a per-request condition.
pub async fn db(url: &str) -> Result<Arc<Client>, PgErr> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = tokio_postgres::connect(url, tls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection terminated: {}", e);
        }
    });
    client.execute("SET client_min_messages TO WARNING", &[]).await?;
    Ok(Arc::new(client))
}

/// Table for login accounts.
#[rustfmt::skip]
pub const ACCOUNTS:     &str = "accounts";
/// Table for player characters (game-server schema name).
#[rustfmt::skip]
pub const PLAYERS:      &str = "players";
/// Table for guilds.
#[rustfmt::skip]
pub const GUILDS:       &str = "guilds";
/// Table for per-guild ranks.
#[rustfmt::skip]
pub const GUILD_RANKS:  &str = "guild_ranks";
/// Table binding one character to one guild at one rank.
#[rustfmt::skip]
pub const MEMBERSHIPS:  &str = "guild_membership";
/// Table for news articles.
#[rustfmt::skip]
pub const NEWS:         &str = "news";
/// Table for character deaths recorded by the game server.
#[rustfmt::skip]
pub const DEATHS:       &str = "player_deaths";
