use dialoguer::Input;
use fairplay_core::{FairplayError, InputError, MoveSet, Result, RoundIo, RoundResult};
use std::io::{self, BufRead, IsTerminal, Write};

pub const SAMPLE_MOVES: &str = "Example:\n\tfairplay play Rock Paper Scissors Lizard Spock";

/// Game console on stdin/stdout.
///
/// Uses dialoguer prompts on a terminal and plain line reads when input is
/// piped.
pub struct TerminalConsole {
    interactive: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }

    fn read_line(&self, prompt: &str) -> Result<String> {
        if self.interactive {
            return Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| FairplayError::dialog(e.to_string()));
        }

        print!("{}: ", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(line)
    }

    pub fn prompt_moves(&mut self) -> Result<String> {
        self.read_line("Game moves")
    }
}

impl RoundIo for TerminalConsole {
    fn show_commitment(&mut self, digest: &str, algorithm: &str) -> Result<()> {
        render_commitment(&mut io::stdout(), digest, algorithm)?;
        Ok(())
    }

    fn read_choice(&mut self, moves: &MoveSet) -> Result<String> {
        render_moves(&mut io::stdout(), moves)?;
        self.read_line("Your choice")
    }

    fn reject_choice(&mut self, error: &InputError) -> Result<()> {
        eprintln!("{} Try again...", error);
        Ok(())
    }

    fn show_result(&mut self, result: &RoundResult) -> Result<()> {
        render_result(&mut io::stdout(), result)?;
        Ok(())
    }
}

pub fn render_commitment(out: &mut impl Write, digest: &str, algorithm: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Commitment ({}):", algorithm)?;
    writeln!(out, "\t{}", digest)
}

pub fn render_moves(out: &mut impl Write, moves: &MoveSet) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Available moves:")?;
    for (index, name) in moves.numbered() {
        writeln!(out, "{} - {}", index, name)?;
    }
    writeln!(out, "0 - Exit")
}

pub fn render_result(out: &mut impl Write, result: &RoundResult) -> io::Result<()> {
    match result {
        RoundResult::Aborted { .. } => {
            writeln!(out)?;
            writeln!(out, "Bye!")
        }
        RoundResult::Completed(round) => {
            writeln!(out, "Your move: {}", round.human_move)?;
            writeln!(out, "Computer move: {}", round.computer_move)?;
            writeln!(out, "{}", round.outcome)?;
            writeln!(out)?;
            writeln!(out, "Key:")?;
            writeln!(out, "\t{}", round.key)?;
            writeln!(
                out,
                "Check it with: fairplay verify {} {} -a {}",
                round.key, round.digest, round.algorithm
            )
        }
    }
}
