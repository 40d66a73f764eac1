use thiserror::Error;

pub type Result<T> = std::result::Result<T, FairplayError>;

/// Move-set configuration problems. The user can always fix these by
/// entering a different set of moves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No moves given")]
    EmptyConfig,

    #[error("Incorrect number of moves: {0} (need an odd number, at least 3)")]
    InvalidCount(usize),

    #[error("Identical moves found: '{0}'")]
    DuplicateMove(String),

    #[error("Number of rounds must be greater than 0")]
    InvalidRounds,
}

/// Bad input for a single round's choice. The round's commitment is kept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a number. Range: [0, {max}]")]
    NotNumeric { max: usize },

    #[error("Out of range: {value}. Range: [0, {max}]")]
    OutOfRange { value: String, max: usize },
}

#[derive(Error, Debug)]
pub enum FairplayError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid choice: {0}")]
    Input(#[from] InputError),

    #[error("Failed to initialize cryptography: {0}")]
    CryptoInit(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FairplayError {
    pub fn crypto_init(msg: impl Into<String>) -> Self {
        Self::CryptoInit(msg.into())
    }

    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKey(msg.into())
    }

    pub fn dialog(msg: impl Into<String>) -> Self {
        Self::Dialog(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
