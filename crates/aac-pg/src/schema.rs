use super::PgErr;
use tokio_postgres::Client;

/// Schema metadata for PostgreSQL tables.
///
/// Purely describes table structure; no I/O. DDL strings are assembled at
/// compile time via [`const_format::concatcp!`] in each implementing crate.
/// The relational schema is ultimately owned by the game server — these
/// statements are `IF NOT EXISTS` bootstrap for fresh databases, never
/// migrations of live ones.
pub trait Schema {
    /// Returns the table name in the database.
    fn name() -> &'static str;
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL statement.
    fn creates() -> &'static str;
    /// Returns `CREATE INDEX IF NOT EXISTS` statements for all indices.
    fn indices() -> &'static str;
}

/// Applies one entity's DDL. Callers invoke this per entity in foreign-key
/// dependency order at startup.
pub async fn prepare<S: Schema>(client: &Client) -> Result<(), PgErr> {
    log::debug!("preparing table {}", S::name());
    client.batch_execute(S::creates()).await?;
    client.batch_execute(S::indices()).await?;
    Ok(())
}
