use crate::commitment::HashAlgorithm;
use crate::error::{ConfigError, Result};
use crate::moves::MoveSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub moves: Vec<String>,
    pub algorithm: HashAlgorithm,
    pub rounds: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            moves: vec![
                "Rock".to_string(),
                "Paper".to_string(),
                "Scissors".to_string(),
            ],
            algorithm: HashAlgorithm::Sha3_256,
            rounds: 1,
        }
    }
}

impl SessionConfig {
    pub fn new(moves: Vec<String>) -> Self {
        Self {
            moves,
            ..Self::default()
        }
    }

    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Check the whole config and return the validated move set
    pub fn validate(&self) -> std::result::Result<MoveSet, ConfigError> {
        if self.rounds == 0 {
            return Err(ConfigError::InvalidRounds);
        }

        MoveSet::new(self.moves.as_slice())
    }

    /// Parse a config file. An unknown `algorithm` is a `CryptoInit` error.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(name) = value.get("algorithm").and_then(|v| v.as_str()) {
            name.parse::<HashAlgorithm>()?;
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FairplayError;

    #[test]
    fn test_default_config_is_valid() {
        let config = SessionConfig::default();
        let moves = config.validate().unwrap();
        assert_eq!(moves.len(), 3);
        assert_eq!(config.algorithm, HashAlgorithm::Sha3_256);
    }

    #[test]
    fn test_invalid_rounds() {
        let config = SessionConfig::default().with_rounds(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidRounds));
    }

    #[test]
    fn test_invalid_moves() {
        let config = SessionConfig::new(vec!["Rock".to_string(), "Paper".to_string()]);
        assert_eq!(config.validate(), Err(ConfigError::InvalidCount(2)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SessionConfig::from_json(r#"{ "algorithm": "sha256" }"#).unwrap();
        assert_eq!(config.algorithm, HashAlgorithm::Sha256);
        assert_eq!(config.moves, SessionConfig::default().moves);
        assert_eq!(config.rounds, 1);
    }

    #[test]
    fn test_json_round_trip() {
        let config = SessionConfig::new(
            ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect(),
        )
        .with_rounds(3);

        let parsed = SessionConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unknown_algorithm_in_json() {
        let err = SessionConfig::from_json(r#"{ "algorithm": "md5" }"#).unwrap_err();
        assert!(matches!(err, FairplayError::CryptoInit(_)));
        assert!(err.to_string().contains("'md5' is not available"));
    }

    #[test]
    fn test_algorithm_aliases_in_json() {
        let config = SessionConfig::from_json(r#"{ "algorithm": "SHA3_256" }"#).unwrap();
        assert_eq!(config.algorithm, HashAlgorithm::Sha3_256);
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = SessionConfig::from_json(r#"{ "algorithm": 5 }"#).unwrap_err();
        assert!(matches!(err, FairplayError::Serialization(_)));
    }
}
