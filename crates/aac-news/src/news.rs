use aac_auth::Account;
use aac_core::ID;
use aac_core::Unique;
use std::time::SystemTime;

/// A news post. Hidden posts exist for drafting and retraction; public
/// reads never return them.
#[derive(Debug, Clone)]
pub struct News {
    id: ID<Self>,
    title: String,
    body: String,
    author: ID<Account>,
    category: String,
    icon: Option<String>,
    hidden: bool,
    posted: SystemTime,
}

impl News {
    pub fn post(
        title: String,
        body: String,
        author: ID<Account>,
        category: String,
        icon: Option<String>,
        hidden: bool,
    ) -> Self {
        Self {
            id: ID::default(),
            title,
            body,
            author,
            category,
            icon,
            hidden,
            posted: SystemTime::now(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn body(&self) -> &str {
        &self.body
    }
    pub fn author(&self) -> ID<Account> {
        self.author
    }
    pub fn category(&self) -> &str {
        &self.category
    }
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
    pub fn hidden(&self) -> bool {
        self.hidden
    }
    pub fn posted(&self) -> SystemTime {
        self.posted
    }

    pub fn hydrate(
        id: ID<Self>,
        title: String,
        body: String,
        author: ID<Account>,
        category: String,
        icon: Option<String>,
        hidden: bool,
        posted: SystemTime,
    ) -> Self {
        Self {
            id,
            title,
            body,
            author,
            category,
            icon,
            hidden,
            posted,
        }
    }
}

impl Unique for News {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use aac_pg::*;

    impl Schema for News {
        fn name() -> &'static str {
            NEWS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                NEWS,
                " (
                    id        UUID PRIMARY KEY,
                    title     VARCHAR(255) NOT NULL,
                    body      TEXT NOT NULL,
                    author_id UUID NOT NULL REFERENCES ",
                ACCOUNTS,
                "(id),
                    category  VARCHAR(32) NOT NULL,
                    icon      VARCHAR(255),
                    hidden    BOOLEAN NOT NULL DEFAULT FALSE,
                    posted_at TIMESTAMPTZ NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_news_posted ON ",
                NEWS,
                " (posted_at DESC);"
            )
        }
    }
}
