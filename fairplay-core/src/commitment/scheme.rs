use crate::{FairplayError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use sha2::Sha256;
use sha3::{Digest, Sha3_256};
use std::fmt;
use std::str::FromStr;

/// Hash function used to bind a secret key to a public digest.
///
/// Any implementation must produce at least 256 bits of output and be
/// collision and preimage resistant.
pub trait DigestAlgorithm {
    fn name(&self) -> &'static str;
    fn hash(&self, data: &[u8]) -> Vec<u8>;
}

/// Built-in hash algorithms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum HashAlgorithm {
    #[default]
    #[serde(rename = "sha3-256")]
    Sha3_256,
    #[serde(rename = "sha256")]
    Sha256,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 2] = [HashAlgorithm::Sha3_256, HashAlgorithm::Sha256];
}

impl DigestAlgorithm for HashAlgorithm {
    fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha3_256 => "sha3-256",
            HashAlgorithm::Sha256 => "sha256",
        }
    }

    fn hash(&self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha3_256 => {
                let mut hasher = Sha3_256::new();
                hasher.update(data);
                hasher.finalize().to_vec()
            }
            HashAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(data);
                hasher.finalize().to_vec()
            }
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = FairplayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "sha3-256" | "sha3" => Ok(HashAlgorithm::Sha3_256),
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            other => Err(FairplayError::crypto_init(format!(
                "Hash algorithm '{}' is not available. Supported: sha3-256, sha256",
                other
            ))),
        }
    }
}

// Accepts the same spellings as `FromStr`
impl<'de> Deserialize<'de> for HashAlgorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
