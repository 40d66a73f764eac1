use anyhow::{bail, Result};
use fairplay_core::commitment::{self, SecretKey};
use fairplay_core::{DigestAlgorithm, MoveSet, SessionConfig};

pub fn verify(
    config: &SessionConfig,
    key: &str,
    digest: &str,
    algorithm: Option<&str>,
    moves: &[String],
) -> Result<()> {
    let algorithm = super::resolve_algorithm(config, algorithm)?;

    if !commitment::verify(&algorithm, key, digest)? {
        let secret = SecretKey::from_hex(key)?;
        println!("Expected: {}", digest.trim().to_uppercase());
        println!("Computed: {}", commitment::digest(&algorithm, &secret));
        bail!("Digest does not match the key ({})", algorithm.name());
    }
    println!("Digest matches the key ({})", algorithm);

    if !moves.is_empty() {
        let moves = MoveSet::new(moves)?;
        let secret = SecretKey::from_hex(key)?;
        let choice = commitment::derive_choice(&secret, moves.len());
        let name = moves.name(choice).unwrap_or_default();
        println!("Computer move: {} ({})", name, choice);
    }

    Ok(())
}
