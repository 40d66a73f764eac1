use crate::commitment::{self, CommitmentEngine, HashAlgorithm};
use crate::config::SessionConfig;
use crate::error::InputError;
use crate::moves::{validate_choice, Choice, MoveSet};
use crate::outcome::{resolve, Outcome};
use crate::{FairplayError, Result};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Console side of a round.
///
/// [`GameSession::play_round`] calls these in a fixed order: the commitment
/// is shown once, choices are read until one is valid, and the result (with
/// the revealed key) comes last.
pub trait RoundIo {
    fn show_commitment(&mut self, digest: &str, algorithm: &str) -> Result<()>;

    /// Ask for a choice and return the raw input line
    fn read_choice(&mut self, moves: &MoveSet) -> Result<String>;

    fn reject_choice(&mut self, error: &InputError) -> Result<()>;

    fn show_result(&mut self, result: &RoundResult) -> Result<()>;
}

/// A finished round with everything needed to audit it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedRound {
    pub human_choice: usize,
    pub human_move: String,
    pub computer_choice: usize,
    pub computer_move: String,
    pub outcome: Outcome,
    pub algorithm: String,
    pub digest: String,
    /// Secret key in uppercase hex
    pub key: String,
}

impl RevealedRound {
    /// Recompute the digest and the computer's move from the revealed key
    pub fn verify(&self, moves: &MoveSet) -> Result<bool> {
        let algorithm: HashAlgorithm = self.algorithm.parse()?;
        let key = commitment::SecretKey::from_hex(&self.key)?;

        Ok(commitment::verify(&algorithm, &self.key, &self.digest)?
            && commitment::derive_choice(&key, moves.len()) == self.computer_choice)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    /// Human chose 0. The key stays hidden.
    Aborted { digest: String },
    Completed(RevealedRound),
}

impl RoundResult {
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            RoundResult::Aborted { .. } => None,
            RoundResult::Completed(round) => Some(round.outcome),
        }
    }

    pub fn digest(&self) -> &str {
        match self {
            RoundResult::Aborted { digest } => digest,
            RoundResult::Completed(round) => &round.digest,
        }
    }
}

/// Running score for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub human_wins: u32,
    pub computer_wins: u32,
    pub draws: u32,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Draw => self.draws += 1,
            Outcome::HumanWins => self.human_wins += 1,
            Outcome::ComputerWins => self.computer_wins += 1,
        }
    }

    pub fn rounds(&self) -> u32 {
        self.human_wins + self.computer_wins + self.draws
    }
}

/// One game session: a fixed move set and the engine that commits to the
/// computer's moves.
#[derive(Debug)]
pub struct GameSession<R = OsRng> {
    id: Uuid,
    moves: MoveSet,
    engine: CommitmentEngine<R>,
    tally: Tally,
}

impl GameSession<OsRng> {
    pub fn new(moves: MoveSet, algorithm: HashAlgorithm) -> Self {
        Self::with_engine(moves, CommitmentEngine::new(algorithm))
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        let moves = config.validate()?;
        Ok(Self::new(moves, config.algorithm))
    }
}

impl<R: RngCore + CryptoRng> GameSession<R> {
    pub fn with_engine(moves: MoveSet, engine: CommitmentEngine<R>) -> Self {
        let id = Uuid::new_v4();
        tracing::info!(
            "Session {} started with {} moves ({})",
            id,
            moves.len(),
            engine.algorithm().name()
        );

        Self {
            id,
            moves,
            engine,
            tally: Tally::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn moves(&self) -> &MoveSet {
        &self.moves
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Play one round.
    ///
    /// The digest is published before any choice is read, and the key only
    /// leaves the commitment after the outcome is decided. Invalid input is
    /// retried against the same commitment.
    pub fn play_round(&mut self, io: &mut impl RoundIo) -> Result<RoundResult> {
        let commitment = self.engine.commit()?;
        io.show_commitment(commitment.digest(), commitment.algorithm())?;

        let human_choice = loop {
            let line = io.read_choice(&self.moves)?;
            match validate_choice(&line, self.moves.len()) {
                Ok(Choice::Move(index)) => break index,
                Ok(Choice::Exit) => {
                    tracing::info!("Session {} round aborted by player", self.id);
                    let result = RoundResult::Aborted {
                        digest: commitment.digest().to_string(),
                    };
                    io.show_result(&result)?;
                    return Ok(result);
                }
                Err(e) => {
                    tracing::debug!("Session {} rejected choice {:?}: {}", self.id, line, e);
                    io.reject_choice(&e)?;
                }
            }
        };

        let computer_choice = commitment.choice(self.moves.len());
        let outcome = resolve(human_choice, computer_choice, self.moves.len());
        self.tally.record(outcome);

        let digest = commitment.digest().to_string();
        let algorithm = commitment.algorithm().to_string();
        let key = commitment.reveal();

        let result = RoundResult::Completed(RevealedRound {
            human_choice,
            human_move: self.move_name(human_choice)?,
            computer_choice,
            computer_move: self.move_name(computer_choice)?,
            outcome,
            algorithm,
            digest,
            key: key.to_hex(),
        });

        tracing::info!(
            "Session {} round {}: {:?}",
            self.id,
            self.tally.rounds(),
            outcome
        );
        io.show_result(&result)?;
        Ok(result)
    }

    /// Play up to `rounds` rounds, stopping early if the player exits
    pub fn play(&mut self, io: &mut impl RoundIo, rounds: u32) -> Result<Vec<RoundResult>> {
        let mut results = Vec::new();
        for _ in 0..rounds {
            let result = self.play_round(io)?;
            let aborted = matches!(result, RoundResult::Aborted { .. });
            results.push(result);
            if aborted {
                break;
            }
        }

        tracing::info!(
            "Session {} finished: {} won, {} lost, {} drawn",
            self.id,
            self.tally.human_wins,
            self.tally.computer_wins,
            self.tally.draws
        );
        Ok(results)
    }

    fn move_name(&self, index: usize) -> Result<String> {
        self.moves
            .name(index)
            .map(str::to_string)
            .ok_or_else(|| FairplayError::internal(format!("Move {} out of range", index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::{derive_choice, SecretKey};
    use crate::ConfigError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Commitment(String),
        Prompt,
        Rejected(InputError),
        Result(RoundResult),
    }

    /// Feeds canned input lines and records everything shown
    struct ScriptedConsole {
        input: VecDeque<String>,
        events: Vec<Event>,
    }

    impl ScriptedConsole {
        fn new(lines: &[&str]) -> Self {
            Self {
                input: lines.iter().map(|l| l.to_string()).collect(),
                events: Vec::new(),
            }
        }

        fn commitments(&self) -> Vec<&str> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Commitment(d) => Some(d.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl RoundIo for ScriptedConsole {
        fn show_commitment(&mut self, digest: &str, _algorithm: &str) -> Result<()> {
            self.events.push(Event::Commitment(digest.to_string()));
            Ok(())
        }

        fn read_choice(&mut self, _moves: &MoveSet) -> Result<String> {
            self.events.push(Event::Prompt);
            self.input.pop_front().ok_or_else(|| {
                FairplayError::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "script exhausted",
                ))
            })
        }

        fn reject_choice(&mut self, error: &InputError) -> Result<()> {
            self.events.push(Event::Rejected(error.clone()));
            Ok(())
        }

        fn show_result(&mut self, result: &RoundResult) -> Result<()> {
            self.events.push(Event::Result(result.clone()));
            Ok(())
        }
    }

    fn rps() -> MoveSet {
        MoveSet::new(&["Rock", "Paper", "Scissors"]).unwrap()
    }

    fn seeded_session(moves: MoveSet, seed: u64) -> GameSession<StdRng> {
        let engine = CommitmentEngine::with_rng(StdRng::seed_from_u64(seed), HashAlgorithm::Sha3_256);
        GameSession::with_engine(moves, engine)
    }

    fn completed(result: RoundResult) -> RevealedRound {
        match result {
            RoundResult::Completed(round) => round,
            other => panic!("expected a completed round, got {:?}", other),
        }
    }

    #[test]
    fn test_round_reveals_consistent_key() {
        let mut session = seeded_session(rps(), 3);
        let mut console = ScriptedConsole::new(&["1"]);

        let round = completed(session.play_round(&mut console).unwrap());
        let key = SecretKey::from_hex(&round.key).unwrap();

        assert_eq!(round.human_choice, 1);
        assert_eq!(round.human_move, "Rock");
        assert_eq!(round.computer_choice, derive_choice(&key, 3));
        assert_eq!(
            round.outcome,
            resolve(round.human_choice, round.computer_choice, 3)
        );
        assert_eq!(console.commitments(), vec![round.digest.as_str()]);
        assert!(round.verify(session.moves()).unwrap());
    }

    #[test]
    fn test_commitment_shown_before_choice_and_key_last() {
        let mut session = seeded_session(rps(), 5);
        let mut console = ScriptedConsole::new(&["2"]);
        session.play_round(&mut console).unwrap();

        assert!(matches!(console.events[0], Event::Commitment(_)));
        assert_eq!(console.events[1], Event::Prompt);
        assert!(matches!(console.events.last(), Some(Event::Result(_))));
        assert_eq!(console.events.len(), 3);
    }

    #[test]
    fn test_invalid_input_keeps_commitment() {
        let mut session = seeded_session(rps(), 11);
        let mut console = ScriptedConsole::new(&["rock", "9", "", "3"]);

        let round = completed(session.play_round(&mut console).unwrap());
        assert_eq!(round.human_choice, 3);

        // one digest for the whole round despite three bad inputs
        assert_eq!(console.commitments().len(), 1);
        let rejected: Vec<_> = console
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Rejected(err) => Some(err.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            rejected,
            vec![
                InputError::NotNumeric { max: 3 },
                InputError::OutOfRange {
                    value: "9".to_string(),
                    max: 3
                },
                InputError::NotNumeric { max: 3 },
            ]
        );
    }

    #[test]
    fn test_exit_aborts_without_outcome_or_key() {
        let mut session = seeded_session(rps(), 13);
        let mut console = ScriptedConsole::new(&["0"]);

        let result = session.play_round(&mut console).unwrap();
        assert!(matches!(result, RoundResult::Aborted { .. }));
        assert_eq!(result.outcome(), None);
        assert_eq!(result.digest(), console.commitments()[0]);
        assert_eq!(session.tally().rounds(), 0);
    }

    #[test]
    fn test_same_seed_same_commitment() {
        let mut a = seeded_session(rps(), 21);
        let mut b = seeded_session(rps(), 21);

        let ra = completed(a.play_round(&mut ScriptedConsole::new(&["1"])).unwrap());
        let rb = completed(b.play_round(&mut ScriptedConsole::new(&["1"])).unwrap());
        assert_eq!(ra.digest, rb.digest);
        assert_eq!(ra.computer_choice, rb.computer_choice);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_multiple_rounds_tally() {
        let moves = MoveSet::parse("Rock Paper Scissors Lizard Spock").unwrap();
        let mut session = seeded_session(moves, 17);
        let mut console = ScriptedConsole::new(&["1", "2", "3", "4"]);

        let results = session.play(&mut console, 4).unwrap();
        assert_eq!(results.len(), 4);
        assert_eq!(session.tally().rounds(), 4);

        // fresh commitment every round
        let digests = console.commitments();
        assert_eq!(digests.len(), 4);
        for (i, d) in digests.iter().enumerate() {
            assert!(!digests[i + 1..].contains(d));
        }
    }

    #[test]
    fn test_play_stops_on_exit() {
        let mut session = seeded_session(rps(), 19);
        let mut console = ScriptedConsole::new(&["1", "0", "2"]);

        let results = session.play(&mut console, 3).unwrap();
        assert_eq!(results.len(), 2);
        assert!(matches!(results[1], RoundResult::Aborted { .. }));
        assert_eq!(console.input.len(), 1);
    }

    #[test]
    fn test_huge_round_count_stops_on_exit() {
        let mut session = seeded_session(rps(), 31);
        let mut console = ScriptedConsole::new(&["0"]);

        let results = session.play(&mut console, u32::MAX).unwrap();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], RoundResult::Aborted { .. }));
        assert_eq!(session.tally().rounds(), 0);
    }

    #[test]
    fn test_exhausted_input_is_an_error() {
        let mut session = seeded_session(rps(), 23);
        let mut console = ScriptedConsole::new(&["x"]);

        let err = session.play_round(&mut console).unwrap_err();
        assert!(matches!(err, FairplayError::Io(_)));
    }

    #[test]
    fn test_from_config_validates() {
        let config = SessionConfig::new(vec!["Rock".to_string(), "Rock".to_string(), "Paper".to_string()]);
        let err = GameSession::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            FairplayError::Config(ConfigError::DuplicateMove(_))
        ));

        let session = GameSession::from_config(&SessionConfig::default()).unwrap();
        assert_eq!(session.moves().len(), 3);
    }

    #[test]
    fn test_tampered_round_fails_verification() {
        let mut session = seeded_session(rps(), 29);
        let mut round = completed(session.play_round(&mut ScriptedConsole::new(&["1"])).unwrap());

        round.computer_choice = round.computer_choice % 3 + 1;
        assert!(!round.verify(session.moves()).unwrap());
    }
}
