use aac_auth::Account;
use aac_core::Fault;
use aac_core::ID;
use aac_core::Unique;
use std::time::SystemTime;

/// Character vocations as defined by the game server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocation {
    None,
    Sorcerer,
    Druid,
    Paladin,
    Knight,
    MasterSorcerer,
    ElderDruid,
    RoyalPaladin,
    EliteKnight,
}

impl Vocation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Sorcerer => "Sorcerer",
            Self::Druid => "Druid",
            Self::Paladin => "Paladin",
            Self::Knight => "Knight",
            Self::MasterSorcerer => "Master Sorcerer",
            Self::ElderDruid => "Elder Druid",
            Self::RoyalPaladin => "Royal Paladin",
            Self::EliteKnight => "Elite Knight",
        }
    }
}

impl TryFrom<i16> for Vocation {
    type Error = Fault;
    fn try_from(code: i16) -> Result<Self, Fault> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Sorcerer),
            2 => Ok(Self::Druid),
            3 => Ok(Self::Paladin),
            4 => Ok(Self::Knight),
            5 => Ok(Self::MasterSorcerer),
            6 => Ok(Self::ElderDruid),
            7 => Ok(Self::RoyalPaladin),
            8 => Ok(Self::EliteKnight),
            _ => Err(Fault::PolicyViolation("vocation must be 0-8".to_string())),
        }
    }
}
impl From<Vocation> for i16 {
    fn from(vocation: Vocation) -> Self {
        match vocation {
            Vocation::None => 0,
            Vocation::Sorcerer => 1,
            Vocation::Druid => 2,
            Vocation::Paladin => 3,
            Vocation::Knight => 4,
            Vocation::MasterSorcerer => 5,
            Vocation::ElderDruid => 6,
            Vocation::RoyalPaladin => 7,
            Vocation::EliteKnight => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    /// Default outfit for newly created characters.
    pub fn looktype(&self) -> i32 {
        match self {
            Self::Male => 136,
            Self::Female => 137,
        }
    }
}

impl TryFrom<i16> for Sex {
    type Error = Fault;
    fn try_from(code: i16) -> Result<Self, Fault> {
        match code {
            0 => Ok(Self::Female),
            1 => Ok(Self::Male),
            _ => Err(Fault::PolicyViolation(
                "sex must be 0 (female) or 1 (male)".to_string(),
            )),
        }
    }
}
impl From<Sex> for i16 {
    fn from(sex: Sex) -> Self {
        match sex {
            Sex::Female => 0,
            Sex::Male => 1,
        }
    }
}

/// The seven trainable skills, all starting at 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skills {
    pub fist: i32,
    pub club: i32,
    pub sword: i32,
    pub axe: i32,
    pub dist: i32,
    pub shielding: i32,
    pub fishing: i32,
}

impl Default for Skills {
    fn default() -> Self {
        Self {
            fist: 10,
            club: 10,
            sword: 10,
            axe: 10,
            dist: 10,
            shielding: 10,
            fishing: 10,
        }
    }
}

/// A player persona belonging to exactly one account.
///
/// Gameplay attributes are mutated by the game server; this service only
/// creates characters with policy defaults and flips the soft-delete marker.
#[derive(Debug, Clone)]
pub struct Character {
    id: ID<Self>,
    account: ID<Account>,
    name: String,
    vocation: Vocation,
    sex: Sex,
    level: i32,
    experience: i64,
    health: i32,
    healthmax: i32,
    mana: i32,
    manamax: i32,
    maglevel: i32,
    soul: i32,
    cap: i32,
    town: i32,
    position: (i32, i32, i32),
    looktype: i32,
    skills: Skills,
    online: bool,
    deleted: bool,
    created: SystemTime,
}

impl Character {
    /// A brand-new character with policy-determined defaults. Initial stats
    /// are never user input.
    pub fn create(name: String, account: ID<Account>, vocation: Vocation, sex: Sex) -> Self {
        Self {
            id: ID::default(),
            account,
            name,
            vocation,
            sex,
            level: 1,
            experience: 0,
            health: 150,
            healthmax: 150,
            mana: 0,
            manamax: 0,
            maglevel: 0,
            soul: 100,
            cap: 400,
            town: 1,
            position: (0, 0, 0),
            looktype: sex.looktype(),
            skills: Skills::default(),
            online: false,
            deleted: false,
            created: SystemTime::now(),
        }
    }

    /// Validates and canonicalizes a character name: letters and single
    /// spaces, 3-29 characters, each word title-cased. Display casing is
    /// preserved in storage; uniqueness is exact on the stored form.
    pub fn canonical_name(raw: &str) -> Result<String, Fault> {
        let words: Vec<&str> = raw.split_whitespace().collect();
        if words.is_empty() || !words.iter().all(|w| w.chars().all(|c| c.is_alphabetic())) {
            return Err(Fault::PolicyViolation(
                "character name can only contain letters and spaces".to_string(),
            ));
        }
        let name = words
            .iter()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let length = name.chars().count();
        if length < 3 || length > 29 {
            return Err(Fault::PolicyViolation(
                "character name must be 3-29 characters".to_string(),
            ));
        }
        Ok(name)
    }

    pub fn account(&self) -> ID<Account> {
        self.account
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn vocation(&self) -> Vocation {
        self.vocation
    }
    pub fn sex(&self) -> Sex {
        self.sex
    }
    pub fn level(&self) -> i32 {
        self.level
    }
    pub fn experience(&self) -> i64 {
        self.experience
    }
    pub fn health(&self) -> (i32, i32) {
        (self.health, self.healthmax)
    }
    pub fn mana(&self) -> (i32, i32) {
        (self.mana, self.manamax)
    }
    pub fn maglevel(&self) -> i32 {
        self.maglevel
    }
    pub fn soul(&self) -> i32 {
        self.soul
    }
    pub fn cap(&self) -> i32 {
        self.cap
    }
    pub fn town(&self) -> i32 {
        self.town
    }
    pub fn position(&self) -> (i32, i32, i32) {
        self.position
    }
    pub fn looktype(&self) -> i32 {
        self.looktype
    }
    pub fn skills(&self) -> &Skills {
        &self.skills
    }
    pub fn online(&self) -> bool {
        self.online
    }
    pub fn deleted(&self) -> bool {
        self.deleted
    }
    pub fn created(&self) -> SystemTime {
        self.created
    }

    /// Rehydration constructor for the repository layer.
    #[allow(clippy::too_many_arguments)]
    pub fn hydrate(
        id: ID<Self>,
        account: ID<Account>,
        name: String,
        vocation: Vocation,
        sex: Sex,
        level: i32,
        experience: i64,
        health: (i32, i32),
        mana: (i32, i32),
        maglevel: i32,
        soul: i32,
        cap: i32,
        town: i32,
        position: (i32, i32, i32),
        looktype: i32,
        skills: Skills,
        online: bool,
        deleted: bool,
        created: SystemTime,
    ) -> Self {
        Self {
            id,
            account,
            name,
            vocation,
            sex,
            level,
            experience,
            health: health.0,
            healthmax: health.1,
            mana: mana.0,
            manamax: mana.1,
            maglevel,
            soul,
            cap,
            town,
            position,
            looktype,
            skills,
            online,
            deleted,
            created,
        }
    }
}

impl Unique for Character {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

/// Escapes `ILIKE` metacharacters so a search query only ever matches
/// literally; `%%%` must not match every name.
pub fn search_pattern(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use aac_pg::*;

    /// Players table (game-server schema name). The unique index on `name`
    /// is partial over non-deleted rows, so soft-deleting a character frees
    /// its name for re-registration.
    impl Schema for Character {
        fn name() -> &'static str {
            PLAYERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                PLAYERS,
                " (
                    id              UUID PRIMARY KEY,
                    account_id      UUID NOT NULL REFERENCES ",
                ACCOUNTS,
                "(id) ON DELETE CASCADE,
                    name            VARCHAR(255) NOT NULL,
                    vocation        SMALLINT NOT NULL,
                    sex             SMALLINT NOT NULL,
                    level           INTEGER NOT NULL,
                    experience      BIGINT NOT NULL,
                    health          INTEGER NOT NULL,
                    healthmax       INTEGER NOT NULL,
                    mana            INTEGER NOT NULL,
                    manamax         INTEGER NOT NULL,
                    maglevel        INTEGER NOT NULL,
                    soul            INTEGER NOT NULL,
                    cap             INTEGER NOT NULL,
                    town_id         INTEGER NOT NULL,
                    posx            INTEGER NOT NULL,
                    posy            INTEGER NOT NULL,
                    posz            INTEGER NOT NULL,
                    looktype        INTEGER NOT NULL,
                    skill_fist      INTEGER NOT NULL,
                    skill_club      INTEGER NOT NULL,
                    skill_sword     INTEGER NOT NULL,
                    skill_axe       INTEGER NOT NULL,
                    skill_dist      INTEGER NOT NULL,
                    skill_shielding INTEGER NOT NULL,
                    skill_fishing   INTEGER NOT NULL,
                    online          BOOLEAN NOT NULL DEFAULT FALSE,
                    deleted         BOOLEAN NOT NULL DEFAULT FALSE,
                    created_at      TIMESTAMPTZ NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_players_name ON ",
                PLAYERS,
                " (name) WHERE NOT deleted;
                 CREATE INDEX IF NOT EXISTS idx_players_account ON ",
                PLAYERS,
                " (account_id);
                 CREATE INDEX IF NOT EXISTS idx_players_online ON ",
                PLAYERS,
                " (online) WHERE online;"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_title_cased() {
        assert_eq!(
            Character::canonical_name("sir lancelot").unwrap(),
            "Sir Lancelot"
        );
        assert_eq!(Character::canonical_name("GANDALF").unwrap(), "Gandalf");
    }
    #[test]
    fn whitespace_collapses() {
        assert_eq!(
            Character::canonical_name("  knight   errant ").unwrap(),
            "Knight Errant"
        );
    }
    #[test]
    fn digits_and_symbols_are_rejected() {
        assert!(Character::canonical_name("xXSlayerXx99").is_err());
        assert!(Character::canonical_name("drop'table").is_err());
        assert!(Character::canonical_name("").is_err());
    }
    #[test]
    fn length_bounds_are_enforced() {
        assert!(Character::canonical_name("ab").is_err());
        assert!(Character::canonical_name(&"a".repeat(30)).is_err());
        assert!(Character::canonical_name(&"a".repeat(29)).is_ok());
    }
    #[test]
    fn length_counts_characters_not_bytes() {
        // two letters in four bytes is still too short
        assert!(Character::canonical_name("éé").is_err());
        assert!(Character::canonical_name("éée").is_ok());
        assert!(Character::canonical_name(&"é".repeat(29)).is_ok());
        assert!(Character::canonical_name(&"é".repeat(30)).is_err());
    }
    #[test]
    fn creation_defaults_follow_policy() {
        let character = Character::create(
            "Gandalf".to_string(),
            ID::default(),
            Vocation::Druid,
            Sex::Male,
        );
        assert_eq!(character.level(), 1);
        assert_eq!(character.health(), (150, 150));
        assert_eq!(character.mana(), (0, 0));
        assert_eq!(character.soul(), 100);
        assert_eq!(character.cap(), 400);
        assert_eq!(character.looktype(), 136);
        assert_eq!(character.skills(), &Skills::default());
        assert!(!character.deleted());
        assert!(!character.online());
    }
    #[test]
    fn looktype_follows_sex() {
        let she = Character::create("Eowyn".into(), ID::default(), Vocation::Knight, Sex::Female);
        assert_eq!(she.looktype(), 137);
    }
    #[test]
    fn vocations_roundtrip() {
        for code in 0..=8i16 {
            assert_eq!(i16::from(Vocation::try_from(code).unwrap()), code);
        }
        assert!(Vocation::try_from(9).is_err());
        assert!(Vocation::try_from(-1).is_err());
    }
    #[test]
    fn search_patterns_neutralize_wildcards() {
        assert_eq!(search_pattern("%%%"), "\\%\\%\\%");
        assert_eq!(search_pattern("a_b"), "a\\_b");
        assert_eq!(search_pattern("back\\slash"), "back\\\\slash");
        assert_eq!(search_pattern("gandalf"), "gandalf");
    }
    #[test]
    fn vocation_names_match_the_game_server() {
        assert_eq!(Vocation::None.name(), "None");
        assert_eq!(Vocation::MasterSorcerer.name(), "Master Sorcerer");
        assert_eq!(Vocation::EliteKnight.name(), "Elite Knight");
    }
}
