pub mod block;
pub mod model;
pub mod pow;
pub mod validate;

pub use block::Block;
pub use model::Ledger;
pub use validate::is_valid_chain;

/// Prefix a proof hash must start with. This is a literal string match,
/// not a count of leading zeros.
pub const PROOF_TARGET: &str = "0430";

/// Proof stored in the genesis block.
pub const GENESIS_PROOF: u64 = 1;

/// Placeholder `previous_hash` of the genesis block (not a real digest).
pub const GENESIS_PREVIOUS_HASH: &str = "1000";

/// Sender recorded on the reward a node pays itself for mining a block.
pub const MINING_REWARD_SENDER: &str = "0";

pub const MINING_REWARD: f64 = 1.0;

/// A valid chain of `len` blocks (at most 6), mined once and shared by tests.
#[cfg(test)]
pub(crate) fn mined_chain(len: usize) -> Vec<Block> {
    use std::sync::OnceLock;

    static CHAIN: OnceLock<Vec<Block>> = OnceLock::new();
    let full = CHAIN.get_or_init(|| {
        let mut ledger = Ledger::new();
        for i in 0..5u32 {
            ledger.add_transaction("alice", "bob", f64::from(i) + 0.5);
            let last = ledger.last_block();
            let proof = pow::solve(last.proof);
            let previous_hash = last.hash();
            ledger.append_block(proof, &previous_hash);
        }
        ledger.chain().to_vec()
    });
    full[..len].to_vec()
}
