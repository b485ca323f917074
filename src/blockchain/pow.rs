use sha2::{Digest, Sha256};

use super::PROOF_TARGET;

/// True iff `sha256("{last_proof}{proof}")` in hex starts with [`PROOF_TARGET`].
///
/// The puzzle only chains proof values together; it never looks at block
/// contents.
pub fn valid_proof(last_proof: u64, proof: u64) -> bool {
    let guess = format!("{last_proof}{proof}");
    let digest = hex::encode(Sha256::digest(guess.as_bytes()));
    digest.starts_with(PROOF_TARGET)
}

/// Find the smallest proof (starting at 0) that solves the puzzle for `last_proof`.
pub fn solve(last_proof: u64) -> u64 {
    let mut proof = 0u64;
    while !valid_proof(last_proof, proof) {
        proof = proof.wrapping_add(1);
    }
    proof
}

/// Same search as [`solve`], but polls `is_cancelled` before every candidate
/// and returns `None` as soon as it reports true.
pub fn solve_until<F>(last_proof: u64, is_cancelled: F) -> Option<u64>
where
    F: Fn() -> bool,
{
    let mut proof = 0u64;
    loop {
        if is_cancelled() {
            return None;
        }
        if valid_proof(last_proof, proof) {
            return Some(proof);
        }
        proof = proof.wrapping_add(1);
    }
}
