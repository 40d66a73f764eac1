//! Provably fair Rock-Paper-Scissors for any odd number of moves
//!
//! The computer picks its move from a random secret key and publishes a hash
//! of that key before the human chooses. Once the round is decided the key is
//! revealed, so the human can recompute both the hash and the computer's move.

pub mod commitment;
pub mod config;
pub mod error;
pub mod game;
pub mod moves;
pub mod outcome;

pub use commitment::{Commitment, CommitmentEngine, DigestAlgorithm, HashAlgorithm, SecretKey};
pub use config::SessionConfig;
pub use error::{ConfigError, FairplayError, InputError, Result};
pub use game::{GameSession, RevealedRound, RoundIo, RoundResult, Tally};
pub use moves::{validate_choice, Choice, MoveSet};
pub use outcome::{resolve, Outcome};
