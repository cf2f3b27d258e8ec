//! Random identifier minting for authors and messages.
//!
//! Tokens are 10 bytes from `ThreadRng` (a CSPRNG), rendered as 20
//! lowercase hex characters. An 80-bit namespace makes collisions
//! negligible; the store still re-draws on a hit so uniqueness within a
//! table is unconditional.

use rand::Rng;

/// Number of random bytes per token. Hex-encodes to twice as many characters.
const TOKEN_BYTES: usize = 10;

/// Mints a fresh random token.
///
/// Entropy-source failure inside `ThreadRng` aborts the process; there is
/// no recoverable error path for identifier generation.
#[must_use]
pub fn random_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill(&mut bytes[..]);
    hex::encode(bytes)
}
