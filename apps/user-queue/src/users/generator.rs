use rand::distr::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error};

pub const USERNAME_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";
pub const PASSWORD_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz1234567890";
pub const IDENTIFIER_LENGTH: usize = 10;

/// Draws `length` symbols uniformly from `alphabet`.
///
/// Every call seeds a fresh CSPRNG from the operating system, and symbols are
/// picked through `Uniform`, which rejects out-of-zone samples instead of
/// reducing them modulo the alphabet size.
pub fn generate(length: usize, alphabet: &str) -> Result<String, GenerationError> {
    let symbols: Vec<char> = alphabet.chars().collect();

    let distribution = Uniform::<usize>::new(0, symbols.len()).map_err(|e| {
        error!(error = %e, "Cannot generate a string from an empty alphabet");
        GenerationError::EmptyAlphabet
    })?;

    let rng = StdRng::try_from_os_rng().map_err(|e| {
        error!(error = %e, "Secure random source unavailable");
        GenerationError::EntropyUnavailable(e.to_string())
    })?;

    let generated: String = rng
        .sample_iter(distribution)
        .take(length)
        .map(|index| symbols[index])
        .collect();

    debug!(length, alphabet_size = symbols.len(), "Generated random string");
    Ok(generated)
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Unable to generate a string: secure random source failed: {0}")]
    EntropyUnavailable(String),

    #[error("Unable to generate a string: alphabet is empty")]
    EmptyAlphabet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn output_has_requested_length_and_alphabet() {
        for (length, alphabet) in [
            (10, USERNAME_ALPHABET),
            (10, PASSWORD_ALPHABET),
            (1, "x"),
            (64, "01"),
            (33, "äöü€"),
        ] {
            let generated = generate(length, alphabet).unwrap();
            assert_eq!(generated.chars().count(), length);
            assert!(generated.chars().all(|c| alphabet.contains(c)), "{generated}");
        }
    }

    #[test]
    fn zero_length_is_empty() {
        assert_eq!(generate(0, USERNAME_ALPHABET).unwrap(), "");
    }

    #[test]
    fn empty_alphabet_is_an_error() {
        let err = generate(10, "").unwrap_err();
        assert!(matches!(err, GenerationError::EmptyAlphabet));
    }

    #[test]
    fn independent_calls_differ() {
        let first = generate(IDENTIFIER_LENGTH, USERNAME_ALPHABET).unwrap();
        let second = generate(IDENTIFIER_LENGTH, USERNAME_ALPHABET).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn symbols_are_roughly_uniform() {
        let draws = 30_000;
        let generated = generate(draws, "abc").unwrap();

        let mut counts: HashMap<char, usize> = HashMap::new();
        for c in generated.chars() {
            *counts.entry(c).or_default() += 1;
        }

        // Expected 10_000 each with a standard deviation of about 82.
        assert_eq!(counts.len(), 3);
        for (symbol, count) in counts {
            assert!((9_400..=10_600).contains(&count), "{symbol}: {count}");
        }
    }
}
