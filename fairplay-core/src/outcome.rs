//! Win/lose/draw rules for an odd cycle of moves.
//!
//! Moves sit on a circle numbered `1..=n`. The `n / 2` moves that follow a
//! move clockwise beat it, and it beats the `n / 2` moves before it. For
//! Rock Paper Scissors this is Paper over Rock, Scissors over Paper and Rock
//! over Scissors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a round, from the human's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Draw,
    HumanWins,
    ComputerWins,
}

impl Outcome {
    /// Same round seen from the other side
    pub fn flip(self) -> Self {
        match self {
            Outcome::Draw => Outcome::Draw,
            Outcome::HumanWins => Outcome::ComputerWins,
            Outcome::ComputerWins => Outcome::HumanWins,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Draw => "Draw",
            Outcome::HumanWins => "Win",
            Outcome::ComputerWins => "Lose",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Draw => write!(f, "Draw! What a great game!"),
            Outcome::HumanWins => write!(f, "You win!"),
            Outcome::ComputerWins => write!(f, "Unfortunately, you've lost!"),
        }
    }
}

/// Is `other` one of the `n / 2` moves following `mv` on the circle?
fn in_window(mv: usize, other: usize, n: usize) -> bool {
    let tmp_bound = (mv + n / 2) % n;
    // no move is numbered 0
    let bound = if tmp_bound == 0 { n } else { tmp_bound };

    if bound > mv {
        other > mv && other <= bound
    } else {
        // window wraps past n back to 1
        other > mv || other <= bound
    }
}

/// Does `attacker` beat `defender` in a cycle of `n` moves? Both 1-based.
pub fn beats(attacker: usize, defender: usize, n: usize) -> bool {
    attacker != defender && in_window(defender, attacker, n)
}

/// Decide a round between the human's and the computer's 1-based choices
pub fn resolve(human: usize, computer: usize, n: usize) -> Outcome {
    debug_assert!(n >= 3 && n % 2 == 1, "move count must be odd and >= 3");
    debug_assert!((1..=n).contains(&human) && (1..=n).contains(&computer));

    if human == computer {
        Outcome::Draw
    } else if in_window(human, computer, n) {
        Outcome::ComputerWins
    } else {
        Outcome::HumanWins
    }
}

/// Full `n x n` table; `table[row][col]` is the outcome for the row move
/// played against the column move.
pub fn dominance_table(n: usize) -> Vec<Vec<Outcome>> {
    (1..=n)
        .map(|row| (1..=n).map(|col| resolve(row, col, n)).collect())
        .collect()
}
