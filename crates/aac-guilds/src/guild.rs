use aac_core::Fault;
use aac_core::ID;
use aac_core::Unique;
use aac_players::Character;
use std::time::SystemTime;

/// Rank charter every new guild starts with: name and privilege level.
/// Levels are distinct by construction and enforced distinct by the schema.
pub const DEFAULT_RANKS: [(&str, i32); 3] = [("Leader", 3), ("Vice-Leader", 2), ("Member", 1)];

/// The privilege level of the leader rank within [`DEFAULT_RANKS`].
pub const LEADER_LEVEL: i32 = 3;

/// A guild chartered by a character. The owner is always the character who
/// founded it (or a later transferee) and is the only one who may edit or
/// disband the guild.
#[derive(Debug, Clone)]
pub struct Guild {
    id: ID<Self>,
    name: String,
    owner: ID<Character>,
    description: Option<String>,
    motd: String,
    created: SystemTime,
}

impl Guild {
    pub fn found(
        name: String,
        owner: ID<Character>,
        motd: String,
        description: Option<String>,
    ) -> Self {
        Self {
            id: ID::default(),
            name,
            owner,
            description,
            motd,
            created: SystemTime::now(),
        }
    }

    /// Validates and normalizes a guild name: letters, digits and single
    /// spaces, 3-32 characters. Display casing is kept as given.
    pub fn canonical_name(raw: &str) -> Result<String, Fault> {
        let words: Vec<&str> = raw.split_whitespace().collect();
        if words.is_empty()
            || !words
                .iter()
                .all(|w| w.chars().all(|c| c.is_alphanumeric()))
        {
            return Err(Fault::PolicyViolation(
                "guild name can only contain letters, digits and spaces".to_string(),
            ));
        }
        let name = words.join(" ");
        let length = name.chars().count();
        if length < 3 || length > 32 {
            return Err(Fault::PolicyViolation(
                "guild name must be 3-32 characters".to_string(),
            ));
        }
        Ok(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn owner(&self) -> ID<Character> {
        self.owner
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    pub fn motd(&self) -> &str {
        &self.motd
    }
    pub fn created(&self) -> SystemTime {
        self.created
    }

    pub fn hydrate(
        id: ID<Self>,
        name: String,
        owner: ID<Character>,
        description: Option<String>,
        motd: String,
        created: SystemTime,
    ) -> Self {
        Self {
            id,
            name,
            owner,
            description,
            motd,
            created,
        }
    }
}

impl Unique for Guild {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

/// A named privilege level within one guild.
#[derive(Debug, Clone)]
pub struct Rank {
    id: ID<Self>,
    guild: ID<Guild>,
    name: String,
    level: i32,
}

impl Rank {
    pub fn new(id: ID<Self>, guild: ID<Guild>, name: String, level: i32) -> Self {
        Self {
            id,
            guild,
            name,
            level,
        }
    }
    pub fn guild(&self) -> ID<Guild> {
        self.guild
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Unique for Rank {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

/// One character's membership in one guild. The primary key on the player
/// column makes at-most-one-guild a schema fact rather than a query habit.
#[derive(Debug, Clone)]
pub struct Membership {
    player: ID<Character>,
    guild: ID<Guild>,
    rank: ID<Rank>,
    nick: Option<String>,
}

impl Membership {
    pub fn new(
        player: ID<Character>,
        guild: ID<Guild>,
        rank: ID<Rank>,
        nick: Option<String>,
    ) -> Self {
        Self {
            player,
            guild,
            rank,
            nick,
        }
    }
    pub fn player(&self) -> ID<Character> {
        self.player
    }
    pub fn guild(&self) -> ID<Guild> {
        self.guild
    }
    pub fn rank(&self) -> ID<Rank> {
        self.rank
    }
    pub fn nick(&self) -> Option<&str> {
        self.nick.as_deref()
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use aac_pg::*;

    impl Schema for Guild {
        fn name() -> &'static str {
            GUILDS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                GUILDS,
                " (
                    id          UUID PRIMARY KEY,
                    name        VARCHAR(32) NOT NULL UNIQUE,
                    owner_id    UUID NOT NULL REFERENCES ",
                PLAYERS,
                "(id),
                    description TEXT,
                    motd        VARCHAR(255) NOT NULL DEFAULT '',
                    created_at  TIMESTAMPTZ NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_guilds_owner ON ",
                GUILDS,
                " (owner_id);"
            )
        }
    }

    /// The unique constraint over (guild, level) rejects rank-level ties
    /// outright instead of leaving promotion order ambiguous.
    impl Schema for Rank {
        fn name() -> &'static str {
            GUILD_RANKS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                GUILD_RANKS,
                " (
                    id       UUID PRIMARY KEY,
                    guild_id UUID NOT NULL REFERENCES ",
                GUILDS,
                "(id) ON DELETE CASCADE,
                    name     VARCHAR(255) NOT NULL,
                    level    INTEGER NOT NULL,
                    UNIQUE (guild_id, level)
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_ranks_guild ON ",
                GUILD_RANKS,
                " (guild_id);"
            )
        }
    }

    impl Schema for Membership {
        fn name() -> &'static str {
            MEMBERSHIPS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                MEMBERSHIPS,
                " (
                    player_id UUID PRIMARY KEY REFERENCES ",
                PLAYERS,
                "(id) ON DELETE CASCADE,
                    guild_id  UUID NOT NULL REFERENCES ",
                GUILDS,
                "(id) ON DELETE CASCADE,
                    rank_id   UUID NOT NULL REFERENCES ",
                GUILD_RANKS,
                "(id) ON DELETE CASCADE,
                    nick      VARCHAR(15)
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_membership_guild ON ",
                MEMBERSHIPS,
                " (guild_id);"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn charter_has_three_distinct_descending_levels() {
        let levels: Vec<i32> = DEFAULT_RANKS.iter().map(|(_, level)| *level).collect();
        assert_eq!(levels.len(), 3);
        assert_eq!(levels.iter().collect::<HashSet<_>>().len(), 3);
        assert!(levels.windows(2).all(|pair| pair[0] > pair[1]));
        assert_eq!(DEFAULT_RANKS[0], ("Leader", LEADER_LEVEL));
    }
    #[test]
    fn guild_names_normalize_whitespace() {
        assert_eq!(
            Guild::canonical_name("  Knights   of the  Round ").unwrap(),
            "Knights of the Round"
        );
    }
    #[test]
    fn guild_names_allow_digits_but_not_symbols() {
        assert!(Guild::canonical_name("Legion IX").is_ok());
        assert!(Guild::canonical_name("The 3rd Watch").is_ok());
        assert!(Guild::canonical_name("Dro;p Guild").is_err());
        assert!(Guild::canonical_name("ab").is_err());
        assert!(Guild::canonical_name(&"a".repeat(33)).is_err());
    }
    #[test]
    fn guild_name_length_counts_characters_not_bytes() {
        assert!(Guild::canonical_name("éé").is_err());
        assert!(Guild::canonical_name(&"é".repeat(32)).is_ok());
        assert!(Guild::canonical_name(&"é".repeat(33)).is_err());
    }
    #[test]
    fn founding_sets_the_owner() {
        let owner = ID::default();
        let guild = Guild::found("Rangers".into(), owner, String::new(), None);
        assert_eq!(guild.owner(), owner);
        assert_eq!(guild.motd(), "");
        assert!(guild.description().is_none());
    }
    #[test]
    fn founding_keeps_the_given_motd() {
        let guild = Guild::found(
            "Rangers".into(),
            ID::default(),
            "For the realm".into(),
            Some("Northern chapter".into()),
        );
        assert_eq!(guild.motd(), "For the realm");
        assert_eq!(guild.description(), Some("Northern chapter"));
    }
}
