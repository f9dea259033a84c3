// ============================
// glasshouse-backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use scrypt::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Scrypt,
};
use zeroize::Zeroize;

/// Default scrypt cost factor (log2 of the iteration count). Comparable in
/// work to bcrypt cost 10; raising it trades login latency for brute-force
/// resistance.
pub const DEFAULT_COST: u8 = 10;

const BLOCK_SIZE: u32 = 8;
const PARALLELISM: u32 = 1;

/// Cost-parameterized scrypt hasher producing self-contained PHC strings:
/// salt and parameters travel inside the digest, so `verify` needs no side
/// channel.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u8,
}

impl PasswordHasher {
    pub fn new(cost: u8) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u8 {
        self.cost
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, plain: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let params = scrypt::Params::new(self.cost, BLOCK_SIZE, PARALLELISM, scrypt::Params::RECOMMENDED_LEN)?;
        let hash = Scrypt
            .hash_password_customized(plain.as_bytes(), None, None, params, &salt)?
            .to_string();
        Ok(hash)
    }

    /// Verify a password against a PHC string. Malformed input verifies
    /// false; the digest comparison itself is constant-time.
    pub fn verify(&self, plain: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };
        Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
    }

    /// Hash a password and zeroize the plaintext
    pub fn hash_secure(&self, plain: &mut String) -> anyhow::Result<String> {
        let hash = self.hash(plain);
        plain.zeroize();
        hash
    }
}

/// Salt segment of a PHC string, for the hashing demo view
pub fn salt_part(hash: &str) -> Option<String> {
    PasswordHash::new(hash)
        .ok()
        .and_then(|h| h.salt.map(|s| s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // low cost keeps the test suite fast
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn test_hash_round_trip() {
        let hasher = hasher();
        let hash = hasher.hash("password123").unwrap();

        assert!(hasher.verify("password123", &hash));
        assert!(!hasher.verify("password124", &hash));
        assert!(!hasher.verify("", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = hasher();
        let first = hasher.hash("password123").unwrap();
        let second = hasher.hash("password123").unwrap();

        assert_ne!(first, second);
        assert_ne!(salt_part(&first), salt_part(&second));
        // both still verify
        assert!(hasher.verify("password123", &first));
        assert!(hasher.verify("password123", &second));
    }

    #[test]
    fn test_hash_encodes_cost_and_salt() {
        let hasher = hasher();
        let hash = hasher.hash("password123").unwrap();

        // PHC string: $scrypt$ln=4,r=8,p=1$<salt>$<digest>
        assert!(hash.starts_with("$scrypt$"));
        assert!(hash.contains("ln=4"));
        assert!(salt_part(&hash).is_some());

        // a hasher with a different cost still verifies: params come from
        // the hash string, not the verifier
        assert!(PasswordHasher::new(6).verify("password123", &hash));
    }

    #[test]
    fn test_malformed_hash_verifies_false() {
        let hasher = hasher();
        assert!(!hasher.verify("password123", ""));
        assert!(!hasher.verify("password123", "not-a-phc-string"));
        assert!(!hasher.verify("password123", "$scrypt$broken"));
    }

    #[test]
    fn test_hash_secure_zeroizes_plaintext() {
        let hasher = hasher();
        let mut plain = "password123".to_string();
        let hash = hasher.hash_secure(&mut plain).unwrap();

        assert!(plain.is_empty());
        assert!(hasher.verify("password123", &hash));
    }
}
