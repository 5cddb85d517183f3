use super::*;
use aac_core::ID;
use aac_core::Unique;
use aac_pg::*;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::Row;

/// Repository trait for account database operations.
/// Abstracts SQL from the handler layer.
#[allow(async_fn_in_trait)]
pub trait AccountRepository {
    /// Inserts a new account. Returns false when the name is already taken;
    /// the unique constraint closes the race two concurrent registrations
    /// would otherwise win together.
    async fn register(&self, account: &Account, hashword: &str) -> Result<bool, PgErr>;
    async fn lookup(&self, name: &str) -> Result<Option<(Account, String)>, PgErr>;
    async fn fetch(&self, account: ID<Account>) -> Result<Option<Account>, PgErr>;
    async fn hashword(&self, account: ID<Account>) -> Result<Option<String>, PgErr>;
    async fn update_email(&self, account: ID<Account>, email: Option<&str>) -> Result<(), PgErr>;
    async fn update_hashword(&self, account: ID<Account>, hashword: &str) -> Result<(), PgErr>;
    /// Non-deleted characters currently owned by the account.
    async fn characters(&self, account: ID<Account>) -> Result<i64, PgErr>;
}

fn hydrate(row: &Row) -> Account {
    Account::new(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        row.get::<_, String>(1),
        row.get::<_, Option<String>>(2),
        row.get::<_, bool>(3),
        row.get::<_, i32>(4),
        row.get::<_, std::time::SystemTime>(5),
    )
}

impl AccountRepository for Arc<Client> {
    async fn register(&self, account: &Account, hashword: &str) -> Result<bool, PgErr> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                ACCOUNTS,
                " (id, name, hashword, email, blocked, tier, created_at)
                  VALUES ($1, $2, $3, $4, $5, $6, $7)
                  ON CONFLICT (name) DO NOTHING"
            ),
            &[
                &account.id().inner(),
                &account.name(),
                &hashword,
                &account.email(),
                &account.blocked(),
                &account.tier(),
                &account.created(),
            ],
        )
        .await
        .map(|rows| rows == 1)
    }

    async fn lookup(&self, name: &str) -> Result<Option<(Account, String)>, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, name, email, blocked, tier, created_at, hashword FROM ",
                ACCOUNTS,
                " WHERE name = $1"
            ),
            &[&name],
        )
        .await
        .map(|opt| opt.map(|row| (hydrate(&row), row.get::<_, String>(6))))
    }

    async fn fetch(&self, account: ID<Account>) -> Result<Option<Account>, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, name, email, blocked, tier, created_at FROM ",
                ACCOUNTS,
                " WHERE id = $1"
            ),
            &[&account.inner()],
        )
        .await
        .map(|opt| opt.map(|row| hydrate(&row)))
    }

    async fn hashword(&self, account: ID<Account>) -> Result<Option<String>, PgErr> {
        self.query_opt(
            const_format::concatcp!("SELECT hashword FROM ", ACCOUNTS, " WHERE id = $1"),
            &[&account.inner()],
        )
        .await
        .map(|opt| opt.map(|row| row.get::<_, String>(0)))
    }

    async fn update_email(&self, account: ID<Account>, email: Option<&str>) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!("UPDATE ", ACCOUNTS, " SET email = $2 WHERE id = $1"),
            &[&account.inner(), &email],
        )
        .await
        .map(|_| ())
    }

    async fn update_hashword(&self, account: ID<Account>, hashword: &str) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!("UPDATE ", ACCOUNTS, " SET hashword = $2 WHERE id = $1"),
            &[&account.inner(), &hashword],
        )
        .await
        .map(|_| ())
    }

    async fn characters(&self, account: ID<Account>) -> Result<i64, PgErr> {
        self.query_one(
            const_format::concatcp!(
                "SELECT COUNT(*) FROM ",
                PLAYERS,
                " WHERE account_id = $1 AND NOT deleted"
            ),
            &[&account.inner()],
        )
        .await
        .map(|row| row.get::<_, i64>(0))
    }
}
