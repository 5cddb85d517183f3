use std::time::Duration;

/// Immutable process configuration, resolved once at startup and injected
/// into each component at construction. Components never read the
/// environment themselves.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    /// JWT signing key. Absence is a fatal startup error, never a
    /// per-request condition.
    pub secret_key: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    /// Non-deleted characters allowed per account.
    pub character_limit: i64,
    /// Minimum character level to found a guild.
    pub guild_min_level: i32,
    /// Account privilege tier required for news mutations.
    pub admin_tier: i32,
    /// Minimum length of a public character search query.
    pub search_min_chars: usize,
    pub game_host: String,
    pub game_port: u16,
    /// Upper bound on the game-server reachability probe.
    pub probe_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let secret_key = get("SECRET_KEY")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("SECRET_KEY must be set"))?;
        let database_url = get("DB_URL")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("DB_URL must be set"))?;
        Ok(Self {
            database_url,
            secret_key,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string()),
            access_ttl: Duration::from_secs(60 * parse(&get, "ACCESS_TTL_MINUTES", 30)?),
            refresh_ttl: Duration::from_secs(86400 * parse(&get, "REFRESH_TTL_DAYS", 7)?),
            character_limit: parse(&get, "CHARACTER_LIMIT", 15)?,
            guild_min_level: parse(&get, "GUILD_MIN_LEVEL", 20)?,
            admin_tier: parse(&get, "ADMIN_TIER", 4)?,
            search_min_chars: 3,
            game_host: get("GAME_HOST").unwrap_or_else(|| "localhost".to_string()),
            game_port: parse(&get, "GAME_PORT", 7171)?,
            probe_timeout: Duration::from_secs(2),
        })
    }
}

fn parse<T>(get: impl Fn(&str) -> Option<String>, key: &str, fallback: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        None => Ok(fallback),
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {}: {}", key, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(key: &str) -> Option<String> {
        match key {
            "SECRET_KEY" => Some("test-secret".to_string()),
            "DB_URL" => Some("postgres://localhost/aac".to_string()),
            _ => None,
        }
    }

    #[test]
    fn defaults_apply_when_env_is_minimal() {
        let settings = Settings::from_lookup(minimal).unwrap();
        assert_eq!(settings.access_ttl, Duration::from_secs(30 * 60));
        assert_eq!(settings.refresh_ttl, Duration::from_secs(7 * 86400));
        assert_eq!(settings.character_limit, 15);
        assert_eq!(settings.guild_min_level, 20);
        assert_eq!(settings.admin_tier, 4);
        assert_eq!(settings.search_min_chars, 3);
        assert_eq!(settings.game_port, 7171);
        assert_eq!(settings.probe_timeout, Duration::from_secs(2));
    }
    #[test]
    fn missing_signing_key_is_fatal() {
        let err = Settings::from_lookup(|key| match key {
            "DB_URL" => Some("postgres://localhost/aac".to_string()),
            _ => None,
        });
        assert!(err.is_err());
    }
    #[test]
    fn empty_signing_key_is_fatal() {
        let err = Settings::from_lookup(|key| match key {
            "SECRET_KEY" => Some(String::new()),
            other => minimal(other),
        });
        assert!(err.is_err());
    }
    #[test]
    fn overrides_are_parsed() {
        let settings = Settings::from_lookup(|key| match key {
            "ACCESS_TTL_MINUTES" => Some("5".to_string()),
            "CHARACTER_LIMIT" => Some("3".to_string()),
            other => minimal(other),
        })
        .unwrap();
        assert_eq!(settings.access_ttl, Duration::from_secs(300));
        assert_eq!(settings.character_limit, 3);
    }
    #[test]
    fn garbage_numbers_are_rejected() {
        let err = Settings::from_lookup(|key| match key {
            "GAME_PORT" => Some("not-a-port".to_string()),
            other => minimal(other),
        });
        assert!(err.is_err());
    }
}
