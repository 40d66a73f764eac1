pub mod play;
pub mod table;
pub mod verify;

pub use play::play;
pub use table::show_table;
pub use verify::verify;

use anyhow::Result;
use fairplay_core::{HashAlgorithm, SessionConfig};

/// Algorithm from the command line, falling back to the config
fn resolve_algorithm(config: &SessionConfig, arg: Option<&str>) -> Result<HashAlgorithm> {
    match arg {
        Some(name) => Ok(name.parse()?),
        None => Ok(config.algorithm),
    }
}
