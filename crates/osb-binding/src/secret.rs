//! Secret generation
//!
//! Randomness is an injected capability rather than an inline
//! construction, so tests can substitute a deterministic generator.

use rand::Rng;

/// Length of generated secrets (130 bits of entropy in base 32)
const SECRET_LENGTH: usize = 26;

const SECRET_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuv";

/// Produces opaque credential values
pub trait SecretGenerator {
    /// Generate a fresh secret
    fn generate(&self) -> String;
}

/// Cryptographically random secrets from the OS entropy source
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSecrets;

impl SecretGenerator for RandomSecrets {
    fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..SECRET_LENGTH)
            .map(|_| {
                let index = rng.random_range(0..SECRET_ALPHABET.len());
                char::from(SECRET_ALPHABET[index])
            })
            .collect()
    }
}
