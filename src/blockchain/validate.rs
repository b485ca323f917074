use log::debug;

use super::Block;
use super::pow::valid_proof;

/// Check every block after genesis against its predecessor: the stored
/// `previous_hash` must equal the predecessor's hash and the proof must
/// solve the puzzle for the predecessor's proof. Genesis is trusted as-is.
pub fn is_valid_chain(chain: &[Block]) -> bool {
    for pair in chain.windows(2) {
        let (prev, current) = (&pair[0], &pair[1]);

        if current.previous_hash != prev.hash() {
            debug!("block #{} does not link to block #{}", current.index, prev.index);
            return false;
        }

        if !valid_proof(prev.proof, current.proof) {
            debug!(
                "block #{} carries proof {} which does not solve {}",
                current.index, current.proof, prev.proof
            );
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::is_valid_chain;
    use crate::blockchain::{Block, mined_chain};
    use crate::transaction::Transaction;

    #[test]
    fn mined_chain_is_valid() {
        assert!(is_valid_chain(&mined_chain(3)));
        assert!(is_valid_chain(&mined_chain(5)));
    }

    #[test]
    fn genesis_alone_is_valid() {
        assert!(is_valid_chain(&[Block::genesis()]));
        assert!(is_valid_chain(&[]));
    }

    #[test]
    fn rejects_edited_transactions_in_linked_block() {
        let mut chain = mined_chain(3);
        chain[1].transactions.push(Transaction::new("mallory", "mallory", 1e6));
        assert!(!is_valid_chain(&chain));
    }

    #[test]
    fn rejects_edited_proof() {
        let mut chain = mined_chain(3);
        chain[1].proof += 1;
        assert!(!is_valid_chain(&chain));

        let mut chain = mined_chain(3);
        chain[2].proof += 1;
        assert!(!is_valid_chain(&chain));
    }

    #[test]
    fn rejects_broken_link() {
        let mut chain = mined_chain(3);
        chain[2].previous_hash = "0".repeat(64);
        assert!(!is_valid_chain(&chain));
    }

    #[test]
    fn rejects_reordered_blocks() {
        let mut chain = mined_chain(4);
        chain.swap(1, 2);
        assert!(!is_valid_chain(&chain));
    }

    // The puzzle only chains proofs, so nothing covers the tip's contents.
    #[test]
    fn tip_transactions_are_not_bound_by_the_puzzle() {
        let mut chain = mined_chain(3);
        chain[2].transactions = vec![Transaction::new("mallory", "mallory", 1e6)];
        assert!(is_valid_chain(&chain));
    }
}
