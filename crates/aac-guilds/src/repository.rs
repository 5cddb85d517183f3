use super::*;
use aac_auth::Account;
use aac_core::ID;
use aac_core::Unique;
use aac_pg::*;
use aac_players::Character;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::Row;

fn hydrate(row: &Row) -> Guild {
    Guild::hydrate(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        row.get::<_, String>(1),
        ID::from(row.get::<_, uuid::Uuid>(2)),
        row.get::<_, Option<String>>(3),
        row.get::<_, String>(4),
        row.get::<_, std::time::SystemTime>(5),
    )
}

/// Repository trait for guild database operations.
#[allow(async_fn_in_trait)]
pub trait GuildRepository {
    /// Founds a guild in one statement: the guild row, its default rank
    /// ladder, and the founder's leader membership. Nothing is written when
    /// the guild name is taken (false); a membership conflict aborts the
    /// whole statement with a unique violation.
    async fn found(&self, guild: &Guild) -> Result<bool, PgErr>;
    /// Deletes memberships, ranks, and the guild row in one statement.
    /// Returns false when the guild did not exist.
    async fn disband(&self, guild: ID<Guild>) -> Result<bool, PgErr>;
    async fn taken(&self, name: &str) -> Result<bool, PgErr>;
    /// All guilds with owner name and member count, name order.
    async fn guilds(&self) -> Result<Vec<(Guild, String, i64)>, PgErr>;
    async fn guild(&self, guild: ID<Guild>) -> Result<Option<(Guild, String, i64)>, PgErr>;
    async fn ranks(&self, guild: ID<Guild>) -> Result<Vec<Rank>, PgErr>;
    async fn membership_of(&self, player: ID<Character>) -> Result<Option<Membership>, PgErr>;
    /// The account owning the guild's leader character.
    async fn steward(&self, guild: ID<Guild>) -> Result<Option<ID<Account>>, PgErr>;
    /// Absent motd/description leave the column untouched; an explicit
    /// `Some(None)` description clears it.
    async fn update(
        &self,
        guild: ID<Guild>,
        motd: Option<&str>,
        description: Option<Option<&str>>,
    ) -> Result<bool, PgErr>;
}

const GUILD_COLUMNS: &str = "g.id, g.name, g.owner_id, g.description, g.motd, g.created_at";

impl GuildRepository for Arc<Client> {
    async fn found(&self, guild: &Guild) -> Result<bool, PgErr> {
        let (leader, vice, member) = (&DEFAULT_RANKS[0], &DEFAULT_RANKS[1], &DEFAULT_RANKS[2]);
        let leader_id = ID::<Rank>::default();
        let vice_id = ID::<Rank>::default();
        let member_id = ID::<Rank>::default();
        self.execute(
            const_format::concatcp!(
                "WITH new_guild AS (
                    INSERT INTO ",
                GUILDS,
                " (id, name, owner_id, description, motd, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    ON CONFLICT (name) DO NOTHING
                    RETURNING id
                ), leader_rank AS (
                    INSERT INTO ",
                GUILD_RANKS,
                " (id, guild_id, name, level)
                    SELECT $7, id, $8, $9 FROM new_guild
                    RETURNING id
                ), other_ranks AS (
                    INSERT INTO ",
                GUILD_RANKS,
                " (id, guild_id, name, level)
                    SELECT ranks.id, new_guild.id, ranks.name, ranks.level
                    FROM new_guild,
                         (VALUES ($10::UUID, $11::VARCHAR, $12::INTEGER),
                                 ($13::UUID, $14::VARCHAR, $15::INTEGER))
                         AS ranks (id, name, level)
                )
                INSERT INTO ",
                MEMBERSHIPS,
                " (player_id, guild_id, rank_id, nick)
                  SELECT $3, new_guild.id, leader_rank.id, NULL
                  FROM new_guild, leader_rank"
            ),
            &[
                &guild.id().inner(),
                &guild.name(),
                &guild.owner().inner(),
                &guild.description(),
                &guild.motd(),
                &guild.created(),
                &leader_id.inner(),
                &leader.0,
                &leader.1,
                &vice_id.inner(),
                &vice.0,
                &vice.1,
                &member_id.inner(),
                &member.0,
                &member.1,
            ],
        )
        .await
        .map(|rows| rows == 1)
    }

    async fn disband(&self, guild: ID<Guild>) -> Result<bool, PgErr> {
        self.execute(
            const_format::concatcp!(
                "WITH gone_members AS (
                    DELETE FROM ",
                MEMBERSHIPS,
                " WHERE guild_id = $1
                ), gone_ranks AS (
                    DELETE FROM ",
                GUILD_RANKS,
                " WHERE guild_id = $1
                )
                DELETE FROM ",
                GUILDS,
                " WHERE id = $1"
            ),
            &[&guild.inner()],
        )
        .await
        .map(|rows| rows == 1)
    }

    async fn taken(&self, name: &str) -> Result<bool, PgErr> {
        self.query_opt(
            const_format::concatcp!("SELECT 1 FROM ", GUILDS, " WHERE name = $1"),
            &[&name],
        )
        .await
        .map(|opt| opt.is_some())
    }

    async fn guilds(&self) -> Result<Vec<(Guild, String, i64)>, PgErr> {
        self.query(
            const_format::concatcp!(
                "SELECT ",
                GUILD_COLUMNS,
                ", p.name, COUNT(m.player_id)
                   FROM ",
                GUILDS,
                " g JOIN ",
                PLAYERS,
                " p ON p.id = g.owner_id
                   LEFT JOIN ",
                MEMBERSHIPS,
                " m ON m.guild_id = g.id
                  GROUP BY ",
                GUILD_COLUMNS,
                ", p.name
                  ORDER BY g.name"
            ),
            &[],
        )
        .await
        .map(|rows| {
            rows.iter()
                .map(|row| (hydrate(row), row.get::<_, String>(6), row.get::<_, i64>(7)))
                .collect()
        })
    }

    async fn guild(&self, guild: ID<Guild>) -> Result<Option<(Guild, String, i64)>, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT ",
                GUILD_COLUMNS,
                ", p.name, COUNT(m.player_id)
                   FROM ",
                GUILDS,
                " g JOIN ",
                PLAYERS,
                " p ON p.id = g.owner_id
                   LEFT JOIN ",
                MEMBERSHIPS,
                " m ON m.guild_id = g.id
                  WHERE g.id = $1
                  GROUP BY ",
                GUILD_COLUMNS,
                ", p.name"
            ),
            &[&guild.inner()],
        )
        .await
        .map(|opt| {
            opt.map(|row| (hydrate(&row), row.get::<_, String>(6), row.get::<_, i64>(7)))
        })
    }

    async fn ranks(&self, guild: ID<Guild>) -> Result<Vec<Rank>, PgErr> {
        self.query(
            const_format::concatcp!(
                "SELECT id, guild_id, name, level FROM ",
                GUILD_RANKS,
                " WHERE guild_id = $1 ORDER BY level DESC"
            ),
            &[&guild.inner()],
        )
        .await
        .map(|rows| {
            rows.iter()
                .map(|row| {
                    Rank::new(
                        ID::from(row.get::<_, uuid::Uuid>(0)),
                        ID::from(row.get::<_, uuid::Uuid>(1)),
                        row.get::<_, String>(2),
                        row.get::<_, i32>(3),
                    )
                })
                .collect()
        })
    }

    async fn membership_of(&self, player: ID<Character>) -> Result<Option<Membership>, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT player_id, guild_id, rank_id, nick FROM ",
                MEMBERSHIPS,
                " WHERE player_id = $1"
            ),
            &[&player.inner()],
        )
        .await
        .map(|opt| {
            opt.map(|row| {
                Membership::new(
                    ID::from(row.get::<_, uuid::Uuid>(0)),
                    ID::from(row.get::<_, uuid::Uuid>(1)),
                    ID::from(row.get::<_, uuid::Uuid>(2)),
                    row.get::<_, Option<String>>(3),
                )
            })
        })
    }

    async fn steward(&self, guild: ID<Guild>) -> Result<Option<ID<Account>>, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT p.account_id FROM ",
                GUILDS,
                " g JOIN ",
                PLAYERS,
                " p ON p.id = g.owner_id WHERE g.id = $1"
            ),
            &[&guild.inner()],
        )
        .await
        .map(|opt| opt.map(|row| ID::from(row.get::<_, uuid::Uuid>(0))))
    }

    async fn update(
        &self,
        guild: ID<Guild>,
        motd: Option<&str>,
        description: Option<Option<&str>>,
    ) -> Result<bool, PgErr> {
        let apply = description.is_some();
        let value = description.flatten();
        self.execute(
            const_format::concatcp!(
                "UPDATE ",
                GUILDS,
                " SET motd = COALESCE($2, motd),
                       description = CASE WHEN $4 THEN $3::TEXT ELSE description END
                  WHERE id = $1"
            ),
            &[&guild.inner(), &motd, &value, &apply],
        )
        .await
        .map(|rows| rows == 1)
    }
}
