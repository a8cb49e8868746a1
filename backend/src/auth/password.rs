//! Password hashing with bcrypt and a legacy SHA-256 digest format
//!
//! New hashes are bcrypt. Stored values that are exactly 64 lowercase hex
//! characters are legacy unsalted SHA-256 digests and are verified as such.
//! When bcrypt itself fails the service can degrade to the digest format;
//! every degraded operation is logged at WARN.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. Async callers should use
//! `hash_async` / `verify_async`, which run on the blocking thread pool.

use crate::config::PasswordConfig;
use anyhow::Result;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// Input bytes beyond this limit are ignored by bcrypt.
pub const MAX_PASSWORD_BYTES: usize = 72;

const LEGACY_DIGEST_LEN: usize = 64;

/// Algorithm that produced a stored hash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// Salted bcrypt hash
    Adaptive,
    /// Unsalted lowercase hex SHA-256 digest
    LegacyDigest,
}

impl HashAlgorithm {
    /// Select the algorithm from the stored hash format
    pub fn detect(stored_hash: &str) -> Self {
        let is_digest = stored_hash.len() == LEGACY_DIGEST_LEN
            && stored_hash
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));

        if is_digest {
            HashAlgorithm::LegacyDigest
        } else {
            HashAlgorithm::Adaptive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Adaptive => "bcrypt",
            HashAlgorithm::LegacyDigest => "sha256",
        }
    }
}

/// Password hashing service
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
    legacy_fallback: bool,
}

impl PasswordService {
    pub fn new(cost: u32, legacy_fallback: bool) -> Self {
        Self {
            cost,
            legacy_fallback,
        }
    }

    pub fn from_config(config: &PasswordConfig) -> Self {
        Self::new(config.bcrypt_cost, config.legacy_digest_fallback)
    }

    /// Hash a password (blocking operation)
    ///
    /// Falls back to the legacy digest only when bcrypt fails and the
    /// fallback is enabled.
    pub fn hash(&self, password: &str) -> Result<String> {
        let input = truncate(password);

        match bcrypt::hash(input, self.cost) {
            Ok(hash) => {
                debug!(algorithm = HashAlgorithm::Adaptive.as_str(), "Password hashed");
                Ok(hash)
            }
            Err(e) if self.legacy_fallback => {
                warn!(
                    error = %e,
                    algorithm = HashAlgorithm::LegacyDigest.as_str(),
                    "bcrypt hashing failed; storing unsalted legacy digest (security downgrade)"
                );
                Ok(legacy_digest(input))
            }
            Err(e) => Err(anyhow::anyhow!("Failed to hash password: {}", e)),
        }
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(&self, password: String) -> Result<String> {
        let service = *self;
        tokio::task::spawn_blocking(move || service.hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let input = truncate(password);

        match HashAlgorithm::detect(stored_hash) {
            HashAlgorithm::LegacyDigest => {
                debug!(algorithm = HashAlgorithm::LegacyDigest.as_str(), "Verifying password");
                matches_legacy_digest(password, stored_hash)
            }
            HashAlgorithm::Adaptive => match bcrypt::verify(input, stored_hash) {
                Ok(valid) => valid,
                Err(e) if self.legacy_fallback => {
                    warn!(
                        error = %e,
                        "bcrypt verification failed; comparing against legacy digest (security downgrade)"
                    );
                    matches_legacy_digest(password, stored_hash)
                }
                Err(e) => {
                    warn!(error = %e, "bcrypt verification failed");
                    false
                }
            },
        }
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(&self, password: String, stored_hash: String) -> Result<bool> {
        let service = *self;
        tokio::task::spawn_blocking(move || service.verify(&password, &stored_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))
    }

    /// Spend the work of a real verification when there is no stored hash
    ///
    /// Always `false`. Hashing at the configured cost costs the same as a
    /// bcrypt verify, so a missing account is not visible in response time.
    pub async fn verify_missing_async(&self, password: String) -> Result<bool> {
        self.hash_async(password).await?;
        Ok(false)
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::from_config(&PasswordConfig::default())
    }
}

/// First 72 bytes of the UTF-8 encoding
fn truncate(password: &str) -> &[u8] {
    let bytes = password.as_bytes();
    &bytes[..bytes.len().min(MAX_PASSWORD_BYTES)]
}

fn legacy_digest(input: &[u8]) -> String {
    hex::encode(Sha256::digest(input))
}

/// Digests stored before truncation cover the full input; degraded-mode
/// hashes cover the truncated one. Either matches.
fn matches_legacy_digest(password: &str, stored_hash: &str) -> bool {
    let stored = stored_hash.as_bytes();
    let full = constant_time_eq(legacy_digest(password.as_bytes()).as_bytes(), stored);
    let truncated = constant_time_eq(legacy_digest(truncate(password)).as_bytes(), stored);
    full | truncated
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Minimum cost keeps the tests fast
    fn fast() -> PasswordService {
        PasswordService::new(4, true)
    }

    #[test]
    fn test_hash_and_verify() {
        let service = fast();
        let hash = service.hash("password123").unwrap();

        assert_eq!(HashAlgorithm::detect(&hash), HashAlgorithm::Adaptive);
        assert!(service.verify("password123", &hash));
        assert!(!service.verify("wrong_password", &hash));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let service = fast();
        let hash1 = service.hash("test_password").unwrap();
        let hash2 = service.hash("test_password").unwrap();

        // Random salt
        assert_ne!(hash1, hash2);
        assert!(service.verify("test_password", &hash1));
        assert!(service.verify("test_password", &hash2));
    }

    #[test]
    fn test_detect_legacy_digest() {
        let digest = legacy_digest(b"password123");
        assert_eq!(digest.len(), 64);
        assert_eq!(HashAlgorithm::detect(&digest), HashAlgorithm::LegacyDigest);

        // Uppercase hex and wrong length are not legacy digests
        assert_eq!(
            HashAlgorithm::detect(&digest.to_uppercase()),
            HashAlgorithm::Adaptive
        );
        assert_eq!(HashAlgorithm::detect(&digest[..63]), HashAlgorithm::Adaptive);
    }

    #[test]
    fn test_verify_legacy_digest() {
        let service = PasswordService::new(4, false);
        let stored = legacy_digest(b"password123");

        assert!(service.verify("password123", &stored));
        assert!(!service.verify("password124", &stored));
    }

    #[test]
    fn test_legacy_digest_of_full_long_password_verifies() {
        let service = PasswordService::new(4, false);
        let password = "x".repeat(80);
        let stored = hex::encode(Sha256::digest(password.as_bytes()));

        assert!(service.verify(&password, &stored));
        assert!(!service.verify(&"x".repeat(79), &stored));
        assert!(!service.verify(&"x".repeat(MAX_PASSWORD_BYTES), &stored));
    }

    #[test]
    fn test_degraded_hash_of_long_password_verifies() {
        let service = PasswordService::new(2, true);
        let password = format!("{}tail", "y".repeat(MAX_PASSWORD_BYTES));
        let hash = service.hash(&password).unwrap();

        assert!(service.verify(&password, &hash));
        assert!(!service.verify("short", &hash));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_long_passwords_are_truncated_to_72_bytes() {
        let service = fast();
        let base = "a".repeat(MAX_PASSWORD_BYTES);
        let hash = service.hash(&format!("{}first-suffix", base)).unwrap();

        assert!(service.verify(&format!("{}other-suffix", base), &hash));
        assert!(service.verify(&base, &hash));
    }

    #[test]
    fn test_truncation_counts_bytes_not_chars() {
        // 'é' is two bytes in UTF-8
        let password = "é".repeat(40);
        assert_eq!(truncate(&password).len(), MAX_PASSWORD_BYTES);
    }

    #[test]
    fn test_degraded_hash_uses_legacy_digest() {
        // Cost below bcrypt's minimum makes the primary path fail
        let service = PasswordService::new(2, true);
        let hash = service.hash("password123").unwrap();

        assert_eq!(hash, legacy_digest(b"password123"));
        assert!(service.verify("password123", &hash));
    }

    #[test]
    fn test_degraded_hash_disabled_is_an_error() {
        let service = PasswordService::new(2, false);
        assert!(service.hash("password123").is_err());
    }

    #[test]
    fn test_malformed_stored_hash_never_matches() {
        assert!(!fast().verify("password123", "not-a-bcrypt-hash"));
        assert!(!PasswordService::new(4, false).verify("password123", "not-a-bcrypt-hash"));
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let service = fast();
        let hash = service.hash_async("async_test_password".to_string()).await.unwrap();

        assert!(service
            .verify_async("async_test_password".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!service.verify_async("wrong".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_missing_never_matches() {
        let service = fast();
        assert!(!service
            .verify_missing_async("password123".to_string())
            .await
            .unwrap());
        assert!(!service.verify_missing_async(String::new()).await.unwrap());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_verify_accepts_own_hash(password in "\\PC{0,100}") {
            let service = fast();
            let hash = service.hash(&password).unwrap();
            prop_assert!(service.verify(&password, &hash));
        }

        #[test]
        fn prop_legacy_digest_round_trip(password in "\\PC{0,100}") {
            let service = PasswordService::new(2, true);
            let hash = service.hash(&password).unwrap();
            prop_assert_eq!(HashAlgorithm::detect(&hash), HashAlgorithm::LegacyDigest);
            prop_assert!(service.verify(&password, &hash));
        }
    }
}
