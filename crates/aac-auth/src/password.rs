//! Argon2 password hashing. A fresh random salt per call means two hashes of
//! the same password never collide; cost parameters travel inside the digest
//! so verification needs no configuration.
use argon2::Argon2;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::password_hash::SaltString;

fn salt() -> Result<SaltString, argon2::password_hash::Error> {
    use rand::Rng;
    let mut bytes = [0u8; 16];
    rand::rng().fill(&mut bytes);
    SaltString::encode_b64(&bytes)
}

pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    Argon2::default()
        .hash_password(password.as_bytes(), &salt()?)
        .map(|digest| digest.to_string())
}

/// Constant-time verification. Malformed digests verify as false rather
/// than erroring; plaintext is never logged or stored.
pub fn verify(password: &str, hashword: &str) -> bool {
    PasswordHash::new(hashword)
        .ok()
        .as_ref()
        .map(|digest| {
            Argon2::default()
                .verify_password(password.as_bytes(), digest)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_own_hash() {
        let digest = hash("correct horse battery staple").unwrap();
        assert!(verify("correct horse battery staple", &digest));
    }
    #[test]
    fn verify_rejects_other_passwords() {
        let digest = hash("correct horse battery staple").unwrap();
        assert!(!verify("incorrect horse battery staple", &digest));
        assert!(!verify("", &digest));
    }
    #[test]
    fn salts_are_randomized() {
        assert_ne!(hash("hunter22").unwrap(), hash("hunter22").unwrap());
    }
    #[test]
    fn malformed_digest_is_false_not_fatal() {
        assert!(!verify("whatever", "not-a-phc-string"));
        assert!(!verify("whatever", ""));
    }
}
