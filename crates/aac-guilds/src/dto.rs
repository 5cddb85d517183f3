use super::*;
use aac_core::Unique;

#[derive(Debug, serde::Deserialize)]
pub struct CreateGuildRequest {
    pub name: String,
    #[serde(default)]
    pub motd: String,
    pub description: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct UpdateGuildRequest {
    pub motd: Option<String>,
    /// Absent keeps the current description, explicit null clears it.
    #[serde(default, deserialize_with = "some_if_present")]
    pub description: Option<Option<String>>,
}

/// Wraps a present field (even an explicit null) in `Some`, so absence
/// stays distinguishable from `null`.
fn some_if_present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, serde::Serialize)]
pub struct GuildResponse {
    pub id: String,
    pub name: String,
    pub owner_name: String,
    pub description: Option<String>,
    pub motd: String,
    pub member_count: i64,
    pub created_at: i64,
}

impl GuildResponse {
    pub fn of(guild: &Guild, owner_name: &str, members: i64) -> Self {
        Self {
            id: guild.id().to_string(),
            name: guild.name().to_string(),
            owner_name: owner_name.to_string(),
            description: guild.description().map(str::to_string),
            motd: guild.motd().to_string(),
            member_count: members,
            created_at: aac_core::epoch_secs(guild.created()),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct RankResponse {
    pub id: String,
    pub name: String,
    pub level: i32,
}

impl RankResponse {
    pub fn of(rank: &Rank) -> Self {
        Self {
            id: rank.id().to_string(),
            name: rank.name().to_string(),
            level: rank.level(),
        }
    }
}

/// Detail view: the guild summary plus its rank ladder.
#[derive(Debug, serde::Serialize)]
pub struct GuildDetailResponse {
    #[serde(flatten)]
    pub summary: GuildResponse,
    pub ranks: Vec<RankResponse>,
}

impl GuildDetailResponse {
    pub fn of(guild: &Guild, owner_name: &str, members: i64, ranks: &[Rank]) -> Self {
        Self {
            summary: GuildResponse::of(guild, owner_name, members),
            ranks: ranks.iter().map(RankResponse::of).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aac_core::ID;

    #[test]
    fn create_request_motd_reaches_the_guild() {
        let req: CreateGuildRequest =
            serde_json::from_str(r#"{"name":"Rangers","motd":"For the realm"}"#).unwrap();
        let guild = Guild::found(req.name, ID::default(), req.motd, req.description);
        assert_eq!(guild.motd(), "For the realm");
    }
    #[test]
    fn create_request_motd_defaults_to_empty() {
        let req: CreateGuildRequest = serde_json::from_str(r#"{"name":"Rangers"}"#).unwrap();
        assert_eq!(req.motd, "");
        assert!(req.description.is_none());
    }
    #[test]
    fn update_request_distinguishes_absent_null_and_value() {
        let keep: UpdateGuildRequest = serde_json::from_str(r#"{"motd":"hi"}"#).unwrap();
        assert_eq!(keep.description, None);
        let clear: UpdateGuildRequest = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(clear.description, Some(None));
        let set: UpdateGuildRequest = serde_json::from_str(r#"{"description":"new"}"#).unwrap();
        assert_eq!(set.description, Some(Some("new".to_string())));
    }
}
