use super::*;
use aac_core::ID;
use std::time::Duration;

/// Token kind discriminator. A refresh token must never resolve an identity
/// for a protected resource; the [`Auth`](crate::Auth) extractor enforces
/// this in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Access,
    Refresh,
}

/// Signed token payload: subject account, kind, and issue/expiry instants.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid,
    pub typ: Kind,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(account: ID<Account>, typ: Kind, ttl: Duration) -> Self {
        let now = aac_core::now_secs();
        Self {
            sub: account.inner(),
            typ,
            iat: now,
            exp: now + ttl.as_secs() as i64,
        }
    }
    pub fn account(&self) -> ID<Account> {
        ID::from(self.sub)
    }
    pub fn kind(&self) -> Kind {
        self.typ
    }
    pub fn expired(&self) -> bool {
        self.exp < aac_core::now_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_claims_are_not_expired() {
        let claims = Claims::new(ID::default(), Kind::Access, Duration::from_secs(60));
        assert!(!claims.expired());
        assert_eq!(claims.kind(), Kind::Access);
    }
    #[test]
    fn zero_ttl_expires_in_the_past_or_now() {
        let mut claims = Claims::new(ID::default(), Kind::Refresh, Duration::from_secs(0));
        claims.exp -= 1;
        assert!(claims.expired());
    }
    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Kind::Access).unwrap(), "\"access\"");
        assert_eq!(serde_json::to_string(&Kind::Refresh).unwrap(), "\"refresh\"");
    }
}
