use aac_core::Fault;
use aac_core::ID;
use aac_core::Unique;
use std::time::SystemTime;

/// A login identity owning zero or more characters.
///
/// Names are globally unique and stored lower-cased; the password digest is
/// a database-only field, never part of the domain type. Accounts are never
/// hard-deleted by this service.
#[derive(Debug, Clone)]
pub struct Account {
    id: ID<Self>,
    name: String,
    email: Option<String>,
    blocked: bool,
    tier: i32,
    created: SystemTime,
}

impl Account {
    pub fn new(
        id: ID<Self>,
        name: String,
        email: Option<String>,
        blocked: bool,
        tier: i32,
        created: SystemTime,
    ) -> Self {
        Self {
            id,
            name,
            email,
            blocked,
            tier,
            created,
        }
    }
    /// A freshly registered account: unblocked, at the base privilege tier.
    /// The name must already be canonical (see [`Account::canonical_name`]).
    pub fn register(name: String, email: Option<String>) -> Self {
        Self::new(ID::default(), name, email, false, 1, SystemTime::now())
    }
    /// Lower-cases and validates an account name: 3-32 ASCII alphanumerics.
    /// Uniqueness is case-insensitive precisely because of this
    /// normalization at every entry point.
    pub fn canonical_name(raw: &str) -> Result<String, Fault> {
        let name = raw.trim().to_lowercase();
        if name.len() < 3 || name.len() > 32 {
            return Err(Fault::PolicyViolation(
                "account name must be 3-32 characters".to_string(),
            ));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Fault::PolicyViolation(
                "account name must be alphanumeric".to_string(),
            ));
        }
        Ok(name)
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
    pub fn blocked(&self) -> bool {
        self.blocked
    }
    pub fn tier(&self) -> i32 {
        self.tier
    }
    pub fn created(&self) -> SystemTime {
        self.created
    }
    /// Whether this account clears the administrative threshold.
    pub fn is_admin(&self, admin_tier: i32) -> bool {
        self.tier >= admin_tier
    }
}

impl Unique for Account {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use aac_pg::*;

    /// Accounts table. `hashword` lives only here, never on [`Account`].
    impl Schema for Account {
        fn name() -> &'static str {
            ACCOUNTS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                ACCOUNTS,
                " (
                    id          UUID PRIMARY KEY,
                    name        VARCHAR(32) UNIQUE NOT NULL,
                    hashword    TEXT NOT NULL,
                    email       VARCHAR(255),
                    blocked     BOOLEAN NOT NULL DEFAULT FALSE,
                    tier        INTEGER NOT NULL DEFAULT 1,
                    created_at  TIMESTAMPTZ NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_accounts_name ON ",
                ACCOUNTS,
                " (name);"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_lowercased() {
        assert_eq!(Account::canonical_name("Thorin99").unwrap(), "thorin99");
        assert_eq!(Account::canonical_name("  ABC  ").unwrap(), "abc");
    }
    #[test]
    fn same_name_any_casing_canonicalizes_identically() {
        assert_eq!(
            Account::canonical_name("DragonSlayer").unwrap(),
            Account::canonical_name("dragonslayer").unwrap(),
        );
    }
    #[test]
    fn length_bounds_are_enforced() {
        assert!(Account::canonical_name("ab").is_err());
        assert!(Account::canonical_name(&"a".repeat(33)).is_err());
        assert!(Account::canonical_name(&"a".repeat(32)).is_ok());
    }
    #[test]
    fn non_alphanumerics_are_rejected() {
        assert!(Account::canonical_name("no spaces").is_err());
        assert!(Account::canonical_name("semi;colon").is_err());
        assert!(Account::canonical_name("tilde~").is_err());
    }
    #[test]
    fn fresh_accounts_start_unblocked_at_base_tier() {
        let account = Account::register("thorin99".to_string(), None);
        assert!(!account.blocked());
        assert_eq!(account.tier(), 1);
        assert!(!account.is_admin(4));
    }
}
