pub mod scheme;

pub use scheme::{DigestAlgorithm, HashAlgorithm};

use crate::{FairplayError, Result};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::fmt;

/// Length of the secret key in bytes
pub const KEY_LENGTH: usize = 16;

/// Secret key the computer commits to before the human moves
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; KEY_LENGTH]);

impl SecretKey {
    pub fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse a revealed key. Case-insensitive.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim())
            .map_err(|e| FairplayError::invalid_key(format!("not a hex string: {}", e)))?;
        let bytes: [u8; KEY_LENGTH] = bytes.try_into().map_err(|b: Vec<u8>| {
            FairplayError::invalid_key(format!(
                "expected {} bytes, got {}",
                KEY_LENGTH,
                b.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

/// Hash `key` and render it as uppercase hex
pub fn digest(algorithm: &dyn DigestAlgorithm, key: &SecretKey) -> String {
    hex::encode_upper(algorithm.hash(key.as_bytes()))
}

/// Map a key onto a 1-based move index in `[1, move_count]`.
///
/// The first four bytes are read as a big-endian `i32`. `unsigned_abs` keeps
/// `i32::MIN` at 2^31 instead of wrapping negative.
pub fn derive_choice(key: &SecretKey, move_count: usize) -> usize {
    debug_assert!(move_count > 0);
    let [a, b, c, d, ..] = key.0;
    let value = i32::from_be_bytes([a, b, c, d]).unsigned_abs() as usize;
    value % move_count + 1
}

/// Check a revealed key against a previously published digest
pub fn verify(algorithm: &dyn DigestAlgorithm, key_hex: &str, digest_hex: &str) -> Result<bool> {
    let key = SecretKey::from_hex(key_hex)?;
    Ok(digest(algorithm, &key).eq_ignore_ascii_case(digest_hex.trim()))
}

/// A published digest plus the hidden key behind it
pub struct Commitment {
    key: SecretKey,
    digest: String,
    algorithm: &'static str,
    committed_at: DateTime<Utc>,
}

impl Commitment {
    pub fn new(key: SecretKey, algorithm: &dyn DigestAlgorithm) -> Self {
        let digest = digest(algorithm, &key);
        Self {
            key,
            digest,
            algorithm: algorithm.name(),
            committed_at: Utc::now(),
        }
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    pub fn committed_at(&self) -> DateTime<Utc> {
        self.committed_at
    }

    /// The computer's move for a set of `move_count` moves
    pub fn choice(&self, move_count: usize) -> usize {
        derive_choice(&self.key, move_count)
    }

    /// Give up the key. Consumes the commitment so it cannot be reused.
    pub fn reveal(self) -> SecretKey {
        self.key
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commitment")
            .field("digest", &self.digest)
            .field("algorithm", &self.algorithm)
            .field("committed_at", &self.committed_at)
            .finish_non_exhaustive()
    }
}

/// Produces commitments from a cryptographically secure random source
pub struct CommitmentEngine<R = OsRng> {
    rng: R,
    algorithm: Box<dyn DigestAlgorithm + Send + Sync>,
}

impl CommitmentEngine<OsRng> {
    pub fn new(algorithm: impl DigestAlgorithm + Send + Sync + 'static) -> Self {
        Self::with_rng(OsRng, algorithm)
    }
}

impl<R: RngCore + CryptoRng> CommitmentEngine<R> {
    pub fn with_rng(rng: R, algorithm: impl DigestAlgorithm + Send + Sync + 'static) -> Self {
        Self {
            rng,
            algorithm: Box::new(algorithm),
        }
    }

    pub fn algorithm(&self) -> &dyn DigestAlgorithm {
        self.algorithm.as_ref()
    }

    pub fn generate_key(&mut self) -> Result<SecretKey> {
        let mut key = [0u8; KEY_LENGTH];
        self.rng
            .try_fill_bytes(&mut key)
            .map_err(|e| FairplayError::crypto_init(format!("Random source failed: {}", e)))?;
        Ok(SecretKey(key))
    }

    pub fn digest(&self, key: &SecretKey) -> String {
        digest(self.algorithm(), key)
    }

    /// Generate a fresh key and commit to it
    pub fn commit(&mut self) -> Result<Commitment> {
        let key = self.generate_key()?;
        let commitment = Commitment::new(key, self.algorithm());

        tracing::debug!(
            "Created {} commitment {} at {}",
            commitment.algorithm(),
            commitment.digest(),
            commitment.committed_at().to_rfc3339()
        );
        Ok(commitment)
    }
}

impl<R> fmt::Debug for CommitmentEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitmentEngine")
            .field("algorithm", &self.algorithm.name())
            .finish_non_exhaustive()
    }
}
