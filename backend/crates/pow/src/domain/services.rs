//! Domain Services
//!
//! Pure domain logic for PoW verification.

use sha2::{Digest, Sha256};

use crate::domain::value_objects::{ChallengeToken, Difficulty};

/// Decides whether a solution satisfies a challenge
///
/// Must be deterministic in `(token, solution, difficulty)`.
pub trait SolutionPredicate: Send + Sync {
    fn is_valid(&self, token: &ChallengeToken, solution: &str, difficulty: Difficulty) -> bool;
}

/// Default predicate: SHA-256 of `token:solution` has at least `difficulty`
/// leading zero bits
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingZeroBits;

impl SolutionPredicate for LeadingZeroBits {
    fn is_valid(&self, token: &ChallengeToken, solution: &str, difficulty: Difficulty) -> bool {
        let hash = compute_solution_hash(token.as_str(), solution);
        verify_difficulty(&hash, difficulty.bits())
    }
}

/// Count leading zero bits in a SHA-256 hash
pub fn count_leading_zero_bits(hash: &[u8; 32]) -> u32 {
    let mut count = 0u32;
    for &byte in hash {
        if byte == 0 {
            count += 8;
        } else {
            count += byte.leading_zeros();
            break;
        }
    }
    count
}

/// Verify that a hash meets the difficulty requirement
pub fn verify_difficulty(hash: &[u8; 32], difficulty_bits: u8) -> bool {
    count_leading_zero_bits(hash) >= u32::from(difficulty_bits)
}

/// Compute SHA-256 of `token || ":" || solution`
pub fn compute_solution_hash(token: &str, solution: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.update(b":");
    hasher.update(solution.as_bytes());
    hasher.finalize().into()
}

/// Brute-force a decimal nonce for a challenge
///
/// This is the client's side of the protocol; expected work is
/// `2^difficulty` hashes.
pub fn solve(token: &ChallengeToken, difficulty: Difficulty, max_attempts: u64) -> Option<String> {
    (0..max_attempts)
        .map(|nonce| nonce.to_string())
        .find(|candidate| LeadingZeroBits.is_valid(token, candidate, difficulty))
}
