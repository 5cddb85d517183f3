use crate::Character;
use aac_core::ID;
use aac_core::Unique;
use std::time::SystemTime;

/// A character death recorded by the game server. Read-only here; the game
/// server owns the writes.
#[derive(Debug, Clone)]
pub struct Death {
    id: ID<Self>,
    player: ID<Character>,
    died_at: SystemTime,
    level: i32,
    killed_by: String,
    by_player: bool,
    mostdamage_by: Option<String>,
    mostdamage_by_player: Option<bool>,
}

impl Death {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ID<Self>,
        player: ID<Character>,
        died_at: SystemTime,
        level: i32,
        killed_by: String,
        by_player: bool,
        mostdamage_by: Option<String>,
        mostdamage_by_player: Option<bool>,
    ) -> Self {
        Self {
            id,
            player,
            died_at,
            level,
            killed_by,
            by_player,
            mostdamage_by,
            mostdamage_by_player,
        }
    }
    pub fn player(&self) -> ID<Character> {
        self.player
    }
    pub fn died_at(&self) -> SystemTime {
        self.died_at
    }
    pub fn level(&self) -> i32 {
        self.level
    }
    pub fn killed_by(&self) -> &str {
        &self.killed_by
    }
    pub fn by_player(&self) -> bool {
        self.by_player
    }
    pub fn mostdamage_by(&self) -> Option<&str> {
        self.mostdamage_by.as_deref()
    }
    pub fn mostdamage_by_player(&self) -> Option<bool> {
        self.mostdamage_by_player
    }
}

impl Unique for Death {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use aac_pg::*;

    impl Schema for Death {
        fn name() -> &'static str {
            DEATHS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                DEATHS,
                " (
                    id                   UUID PRIMARY KEY,
                    player_id            UUID NOT NULL REFERENCES ",
                PLAYERS,
                "(id) ON DELETE CASCADE,
                    died_at              TIMESTAMPTZ NOT NULL,
                    level                INTEGER NOT NULL,
                    killed_by            VARCHAR(255) NOT NULL,
                    is_player            BOOLEAN NOT NULL DEFAULT FALSE,
                    mostdamage_by        VARCHAR(255),
                    mostdamage_is_player BOOLEAN
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_deaths_player ON ",
                DEATHS,
                " (player_id);
                 CREATE INDEX IF NOT EXISTS idx_deaths_time ON ",
                DEATHS,
                " (died_at DESC);"
            )
        }
    }
}
