use super::*;
use aac_core::ID;
use std::time::Duration;

/// JWT signing and verification with injected key material and lifetimes.
///
/// Constructed once at startup from [`Settings`](aac_core::Settings); a
/// missing signing key aborts startup before this type ever exists. There is
/// no server-side record of issued tokens, so revocation before natural
/// expiry is not supported by this design.
pub struct Crypto {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
    access: Duration,
    refresh: Duration,
}

impl Crypto {
    pub fn new(secret: &[u8], access: Duration, refresh: Duration) -> Self {
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
            access,
            refresh,
        }
    }
    /// Short-lived token resolving identity on protected routes.
    pub fn issue_access(
        &self,
        account: ID<Account>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.encode(&Claims::new(account, Kind::Access, self.access))
    }
    /// Long-lived token; never accepted by the identity resolver.
    pub fn issue_refresh(
        &self,
        account: ID<Account>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.encode(&Claims::new(account, Kind::Refresh, self.refresh))
    }
    pub fn encode(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), claims, &self.encoding)
    }
    /// Verifies signature and expiry, with zero clock leeway.
    pub fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = jsonwebtoken::Validation::default();
        validation.leeway = 0;
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crypto() -> Crypto {
        Crypto::new(
            b"unit-test-secret",
            Duration::from_secs(30 * 60),
            Duration::from_secs(7 * 86400),
        )
    }

    #[test]
    fn access_token_roundtrips() {
        let crypto = crypto();
        let account = ID::default();
        let token = crypto.issue_access(account).unwrap();
        let claims = crypto.decode(&token).unwrap();
        assert_eq!(claims.account(), account);
        assert_eq!(claims.kind(), Kind::Access);
    }
    #[test]
    fn refresh_token_keeps_its_kind() {
        let crypto = crypto();
        let token = crypto.issue_refresh(ID::default()).unwrap();
        assert_eq!(crypto.decode(&token).unwrap().kind(), Kind::Refresh);
    }
    #[test]
    fn expired_token_is_rejected_despite_valid_signature() {
        let crypto = crypto();
        let mut claims = Claims::new(ID::default(), Kind::Access, Duration::from_secs(0));
        claims.exp = claims.iat - 3600;
        let token = crypto.encode(&claims).unwrap();
        assert!(crypto.decode(&token).is_err());
    }
    #[test]
    fn foreign_signature_is_rejected() {
        let token = crypto().issue_access(ID::default()).unwrap();
        let other = Crypto::new(b"other-secret", Duration::from_secs(60), Duration::from_secs(60));
        assert!(other.decode(&token).is_err());
    }
    #[test]
    fn garbage_is_rejected() {
        assert!(crypto().decode("not.a.jwt").is_err());
        assert!(crypto().decode("").is_err());
    }
}
