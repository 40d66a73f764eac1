use crate::console::{TerminalConsole, SAMPLE_MOVES};
use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use fairplay_core::{ConfigError, FairplayError, GameSession, MoveSet, SessionConfig, Tally};

pub fn play(
    mut config: SessionConfig,
    moves: Vec<String>,
    algorithm: Option<&str>,
    rounds: Option<u32>,
) -> Result<()> {
    config.algorithm = super::resolve_algorithm(&config, algorithm)?;
    if let Some(rounds) = rounds {
        config.rounds = rounds;
    }
    if !moves.is_empty() {
        config.moves = moves;
    }

    let mut console = TerminalConsole::new();
    let move_set = configure_moves(&mut config, || console.prompt_moves())?;

    let mut session = GameSession::new(move_set, config.algorithm);
    session.play(&mut console, config.rounds)?;

    if config.rounds > 1 && session.tally().rounds() > 0 {
        println!();
        println!("{}", tally_table(&session.tally()));
    }

    Ok(())
}

/// Validate the configured moves, asking again until they are usable
fn configure_moves(
    config: &mut SessionConfig,
    mut prompt: impl FnMut() -> fairplay_core::Result<String>,
) -> Result<MoveSet> {
    if config.rounds == 0 {
        return Err(FairplayError::from(ConfigError::InvalidRounds).into());
    }

    loop {
        match config.validate() {
            Ok(moves) => return Ok(moves),
            Err(e) => {
                tracing::debug!("Rejected configuration: {}", e);
                eprintln!("{}. Try again...", e);
                eprintln!("{}", SAMPLE_MOVES);

                config.moves = prompt()?
                    .split_whitespace()
                    .map(str::to_string)
                    .collect();
            }
        }
    }
}

fn tally_table(tally: &Tally) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Rounds", "Won", "Lost", "Drawn"]);
    table.add_row(vec![
        tally.rounds().to_string(),
        tally.human_wins.to_string(),
        tally.computer_wins.to_string(),
        tally.draws.to_string(),
    ]);
    table
}
