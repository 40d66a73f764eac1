use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use fairplay_core::outcome::dominance_table;
use fairplay_core::{MoveSet, SessionConfig};

pub fn show_table(config: &SessionConfig, moves: &[String]) -> Result<()> {
    let moves = if moves.is_empty() {
        config.validate()?
    } else {
        MoveSet::new(moves)?
    };

    println!("Result for your move (rows) against the computer's (columns):");
    println!("{}", outcome_table(&moves));
    Ok(())
}

fn outcome_table(moves: &MoveSet) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec!["You \\ PC".to_string()];
    header.extend(moves.iter().map(str::to_string));
    table.set_header(header);

    for (name, row) in moves.iter().zip(dominance_table(moves.len())) {
        let mut cells = vec![name.to_string()];
        cells.extend(row.iter().map(|outcome| outcome.label().to_string()));
        table.add_row(cells);
    }

    table
}
