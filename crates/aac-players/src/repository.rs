use super::*;
use aac_auth::Account;
use aac_core::ID;
use aac_core::Unique;
use aac_pg::*;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::Row;

/// Column list shared by every SELECT that hydrates a [`Character`].
const COLUMNS: &str = "id, account_id, name, vocation, sex, level, experience, \
                       health, healthmax, mana, manamax, maglevel, soul, cap, \
                       town_id, posx, posy, posz, looktype, \
                       skill_fist, skill_club, skill_sword, skill_axe, \
                       skill_dist, skill_shielding, skill_fishing, \
                       online, deleted, created_at";

fn hydrate(row: &Row) -> Character {
    Character::hydrate(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        ID::from(row.get::<_, uuid::Uuid>(1)),
        row.get::<_, String>(2),
        // rows written by the game server may carry vocations this service
        // does not know; degrade to None rather than refuse the row
        Vocation::try_from(row.get::<_, i16>(3)).unwrap_or(Vocation::None),
        Sex::try_from(row.get::<_, i16>(4)).unwrap_or(Sex::Female),
        row.get::<_, i32>(5),
        row.get::<_, i64>(6),
        (row.get::<_, i32>(7), row.get::<_, i32>(8)),
        (row.get::<_, i32>(9), row.get::<_, i32>(10)),
        row.get::<_, i32>(11),
        row.get::<_, i32>(12),
        row.get::<_, i32>(13),
        row.get::<_, i32>(14),
        (
            row.get::<_, i32>(15),
            row.get::<_, i32>(16),
            row.get::<_, i32>(17),
        ),
        row.get::<_, i32>(18),
        Skills {
            fist: row.get::<_, i32>(19),
            club: row.get::<_, i32>(20),
            sword: row.get::<_, i32>(21),
            axe: row.get::<_, i32>(22),
            dist: row.get::<_, i32>(23),
            shielding: row.get::<_, i32>(24),
            fishing: row.get::<_, i32>(25),
        },
        row.get::<_, bool>(26),
        row.get::<_, bool>(27),
        row.get::<_, std::time::SystemTime>(28),
    )
}

/// Repository trait for character database operations. Every read filters
/// the soft-delete marker; the policy engine never sees deleted rows.
#[allow(async_fn_in_trait)]
pub trait PlayerRepository {
    /// Inserts a character iff the owning account is under the live-character
    /// cap; the partial unique index on name closes the duplicate race. The
    /// check and the write are one statement, so no concurrent request can
    /// interleave between them. Returns false when nothing was inserted.
    async fn create(&self, character: &Character, cap: i64) -> Result<bool, PgErr>;
    async fn list(&self, account: ID<Account>) -> Result<Vec<Character>, PgErr>;
    async fn get(&self, name: &str) -> Result<Option<Character>, PgErr>;
    /// Flips the soft-delete marker unless the character currently leads a
    /// guild. Returns false when the row was not updated.
    async fn soft_delete(&self, character: ID<Character>) -> Result<bool, PgErr>;
    async fn leads_guild(&self, character: ID<Character>) -> Result<bool, PgErr>;
    async fn search(&self, query: &str, limit: i64) -> Result<Vec<Character>, PgErr>;
    async fn online_players(&self) -> Result<Vec<Character>, PgErr>;
    async fn highscores(
        &self,
        board: Board,
        vocation: Option<Vocation>,
        limit: i64,
    ) -> Result<Vec<Character>, PgErr>;
}

impl PlayerRepository for Arc<Client> {
    async fn create(&self, character: &Character, cap: i64) -> Result<bool, PgErr> {
        let vocation = i16::from(character.vocation());
        let sex = i16::from(character.sex());
        let (health, healthmax) = character.health();
        let (mana, manamax) = character.mana();
        let (posx, posy, posz) = character.position();
        let skills = character.skills();
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                PLAYERS,
                " (",
                "id, account_id, name, vocation, sex, level, experience, \
                 health, healthmax, mana, manamax, maglevel, soul, cap, \
                 town_id, posx, posy, posz, looktype, \
                 skill_fist, skill_club, skill_sword, skill_axe, \
                 skill_dist, skill_shielding, skill_fishing, \
                 online, deleted, created_at",
                ")
                  SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                         $13, $14, $15, $16, $17, $18, $19, $20, $21, $22,
                         $23, $24, $25, $26, $27, $28, $29
                  WHERE (SELECT COUNT(*) FROM ",
                PLAYERS,
                " WHERE account_id = $2 AND NOT deleted) < $30
                  ON CONFLICT (name) WHERE NOT deleted DO NOTHING"
            ),
            &[
                &character.id().inner(),
                &character.account().inner(),
                &character.name(),
                &vocation,
                &sex,
                &character.level(),
                &character.experience(),
                &health,
                &healthmax,
                &mana,
                &manamax,
                &character.maglevel(),
                &character.soul(),
                &character.cap(),
                &character.town(),
                &posx,
                &posy,
                &posz,
                &character.looktype(),
                &skills.fist,
                &skills.club,
                &skills.sword,
                &skills.axe,
                &skills.dist,
                &skills.shielding,
                &skills.fishing,
                &character.online(),
                &character.deleted(),
                &character.created(),
                &cap,
            ],
        )
        .await
        .map(|rows| rows == 1)
    }

    async fn list(&self, account: ID<Account>) -> Result<Vec<Character>, PgErr> {
        self.query(
            const_format::concatcp!(
                "SELECT ",
                COLUMNS,
                " FROM ",
                PLAYERS,
                " WHERE account_id = $1 AND NOT deleted ORDER BY name"
            ),
            &[&account.inner()],
        )
        .await
        .map(|rows| rows.iter().map(hydrate).collect())
    }

    async fn get(&self, name: &str) -> Result<Option<Character>, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT ",
                COLUMNS,
                " FROM ",
                PLAYERS,
                " WHERE name = $1 AND NOT deleted"
            ),
            &[&name],
        )
        .await
        .map(|opt| opt.map(|row| hydrate(&row)))
    }

    async fn soft_delete(&self, character: ID<Character>) -> Result<bool, PgErr> {
        self.execute(
            const_format::concatcp!(
                "UPDATE ",
                PLAYERS,
                " AS p SET deleted = TRUE
                  WHERE p.id = $1 AND NOT p.deleted
                    AND NOT EXISTS (SELECT 1 FROM ",
                GUILDS,
                " g WHERE g.owner_id = p.id)"
            ),
            &[&character.inner()],
        )
        .await
        .map(|rows| rows == 1)
    }

    async fn leads_guild(&self, character: ID<Character>) -> Result<bool, PgErr> {
        self.query_opt(
            const_format::concatcp!("SELECT 1 FROM ", GUILDS, " WHERE owner_id = $1"),
            &[&character.inner()],
        )
        .await
        .map(|opt| opt.is_some())
    }

    async fn search(&self, query: &str, limit: i64) -> Result<Vec<Character>, PgErr> {
        let pattern = search_pattern(query);
        self.query(
            const_format::concatcp!(
                "SELECT ",
                COLUMNS,
                " FROM ",
                PLAYERS,
                " WHERE name ILIKE '%' || $1 || '%' AND NOT deleted
                  ORDER BY name LIMIT $2"
            ),
            &[&pattern, &limit],
        )
        .await
        .map(|rows| rows.iter().map(hydrate).collect())
    }

    async fn online_players(&self) -> Result<Vec<Character>, PgErr> {
        self.query(
            const_format::concatcp!(
                "SELECT ",
                COLUMNS,
                " FROM ",
                PLAYERS,
                " WHERE online AND NOT deleted ORDER BY level DESC"
            ),
            &[],
        )
        .await
        .map(|rows| rows.iter().map(hydrate).collect())
    }

    async fn highscores(
        &self,
        board: Board,
        vocation: Option<Vocation>,
        limit: i64,
    ) -> Result<Vec<Character>, PgErr> {
        // ORDER BY column comes from the Board enum, never from user input
        let sql = format!(
            "SELECT {} FROM {} WHERE NOT deleted \
             AND ($1::SMALLINT IS NULL OR vocation = $1) \
             ORDER BY {} DESC LIMIT $2",
            COLUMNS,
            PLAYERS,
            board.column(),
        );
        let vocation = vocation.map(i16::from);
        self.query(&sql, &[&vocation, &limit])
            .await
            .map(|rows| rows.iter().map(hydrate).collect())
    }
}

fn exhume(row: &Row) -> Death {
    Death::new(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        ID::from(row.get::<_, uuid::Uuid>(1)),
        row.get::<_, std::time::SystemTime>(2),
        row.get::<_, i32>(3),
        row.get::<_, String>(4),
        row.get::<_, bool>(5),
        row.get::<_, Option<String>>(6),
        row.get::<_, Option<bool>>(7),
    )
}

/// Repository trait for death-record reads. The game server writes these.
#[allow(async_fn_in_trait)]
pub trait DeathRepository {
    /// Recent deaths joined with their character's name, newest first,
    /// optionally filtered to one character name.
    async fn recent_deaths(
        &self,
        limit: i64,
        player: Option<&str>,
    ) -> Result<Vec<(Death, String)>, PgErr>;
    async fn deaths_of(
        &self,
        character: ID<Character>,
        limit: i64,
    ) -> Result<Vec<Death>, PgErr>;
}

impl DeathRepository for Arc<Client> {
    async fn recent_deaths(
        &self,
        limit: i64,
        player: Option<&str>,
    ) -> Result<Vec<(Death, String)>, PgErr> {
        self.query(
            const_format::concatcp!(
                "SELECT d.id, d.player_id, d.died_at, d.level, d.killed_by, \
                        d.is_player, d.mostdamage_by, d.mostdamage_is_player, p.name
                   FROM ",
                DEATHS,
                " d JOIN ",
                PLAYERS,
                " p ON p.id = d.player_id
                  WHERE ($2::VARCHAR IS NULL OR p.name = $2)
                  ORDER BY d.died_at DESC LIMIT $1"
            ),
            &[&limit, &player],
        )
        .await
        .map(|rows| {
            rows.iter()
                .map(|row| (exhume(row), row.get::<_, String>(8)))
                .collect()
        })
    }

    async fn deaths_of(
        &self,
        character: ID<Character>,
        limit: i64,
    ) -> Result<Vec<Death>, PgErr> {
        self.query(
            const_format::concatcp!(
                "SELECT id, player_id, died_at, level, killed_by, \
                        is_player, mostdamage_by, mostdamage_is_player
                   FROM ",
                DEATHS,
                " WHERE player_id = $1 ORDER BY died_at DESC LIMIT $2"
            ),
            &[&character.inner(), &limit],
        )
        .await
        .map(|rows| rows.iter().map(exhume).collect())
    }
}
