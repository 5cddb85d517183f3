use super::*;
use aac_core::ID;
use aac_core::Unique;
use aac_pg::*;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::Row;

fn hydrate(row: &Row) -> News {
    News::hydrate(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        row.get::<_, String>(1),
        row.get::<_, String>(2),
        ID::from(row.get::<_, uuid::Uuid>(3)),
        row.get::<_, String>(4),
        row.get::<_, Option<String>>(5),
        row.get::<_, bool>(6),
        row.get::<_, std::time::SystemTime>(7),
    )
}

const COLUMNS: &str = "n.id, n.title, n.body, n.author_id, n.category, n.icon, n.hidden, n.posted_at";

/// Repository trait for news database operations. Author names come from a
/// join against the accounts table.
#[allow(async_fn_in_trait)]
pub trait NewsRepository {
    async fn post(&self, news: &News) -> Result<(), PgErr>;
    /// Visible posts newest first.
    async fn posts(&self, limit: i64, offset: i64) -> Result<Vec<(News, String)>, PgErr>;
    /// One visible post.
    async fn post_of(&self, news: ID<News>) -> Result<Option<(News, String)>, PgErr>;
    async fn amend(
        &self,
        news: ID<News>,
        title: Option<&str>,
        body: Option<&str>,
        category: Option<&str>,
        icon: Option<&str>,
        hidden: Option<bool>,
    ) -> Result<bool, PgErr>;
    async fn retract(&self, news: ID<News>) -> Result<bool, PgErr>;
}

impl NewsRepository for Arc<Client> {
    async fn post(&self, news: &News) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                NEWS,
                " (id, title, body, author_id, category, icon, hidden, posted_at)
                  VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
            ),
            &[
                &news.id().inner(),
                &news.title(),
                &news.body(),
                &news.author().inner(),
                &news.category(),
                &news.icon(),
                &news.hidden(),
                &news.posted(),
            ],
        )
        .await
        .map(|_| ())
    }

    async fn posts(&self, limit: i64, offset: i64) -> Result<Vec<(News, String)>, PgErr> {
        self.query(
            const_format::concatcp!(
                "SELECT ",
                COLUMNS,
                ", a.name FROM ",
                NEWS,
                " n JOIN ",
                ACCOUNTS,
                " a ON a.id = n.author_id
                  WHERE NOT n.hidden
                  ORDER BY n.posted_at DESC LIMIT $1 OFFSET $2"
            ),
            &[&limit, &offset],
        )
        .await
        .map(|rows| {
            rows.iter()
                .map(|row| (hydrate(row), row.get::<_, String>(8)))
                .collect()
        })
    }

    async fn post_of(&self, news: ID<News>) -> Result<Option<(News, String)>, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT ",
                COLUMNS,
                ", a.name FROM ",
                NEWS,
                " n JOIN ",
                ACCOUNTS,
                " a ON a.id = n.author_id
                  WHERE n.id = $1 AND NOT n.hidden"
            ),
            &[&news.inner()],
        )
        .await
        .map(|opt| opt.map(|row| (hydrate(&row), row.get::<_, String>(8))))
    }

    async fn amend(
        &self,
        news: ID<News>,
        title: Option<&str>,
        body: Option<&str>,
        category: Option<&str>,
        icon: Option<&str>,
        hidden: Option<bool>,
    ) -> Result<bool, PgErr> {
        self.execute(
            const_format::concatcp!(
                "UPDATE ",
                NEWS,
                " SET title    = COALESCE($2, title),
                       body     = COALESCE($3, body),
                       category = COALESCE($4, category),
                       icon     = COALESCE($5, icon),
                       hidden   = COALESCE($6, hidden)
                  WHERE id = $1"
            ),
            &[&news.inner(), &title, &body, &category, &icon, &hidden],
        )
        .await
        .map(|rows| rows == 1)
    }

    async fn retract(&self, news: ID<News>) -> Result<bool, PgErr> {
        self.execute(
            const_format::concatcp!("DELETE FROM ", NEWS, " WHERE id = $1"),
            &[&news.inner()],
        )
        .await
        .map(|rows| rows == 1)
    }
}
