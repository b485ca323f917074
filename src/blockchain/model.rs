use super::Block;
use crate::transaction::Transaction;

/// In-memory chain plus the pool of transactions waiting for the next block.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Ledger {
    /// Start a ledger holding only the genesis block.
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis()],
            pending: Vec::new(),
        }
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    /// Queue a transaction; returns the index of the block that will carry it.
    pub fn add_transaction(
        &mut self,
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: f64,
    ) -> u64 {
        self.pending.push(Transaction::new(sender, receiver, amount));
        self.last_block().index + 1
    }

    /// Seal the pending pool into a new block and append it.
    ///
    /// An empty `previous_hash` is replaced by the hash of the current last block.
    pub fn append_block(&mut self, proof: u64, previous_hash: &str) -> &Block {
        let previous_hash = if previous_hash.is_empty() {
            self.last_block().hash()
        } else {
            previous_hash.to_string()
        };
        let index = self.chain.len() as u64 + 1;
        let transactions = std::mem::take(&mut self.pending);

        self.chain.push(Block::new(index, transactions, proof, previous_hash));
        self.last_block()
    }

    /// Swap in a chain adopted from a peer. Pending transactions stay queued.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        if !chain.is_empty() {
            self.chain = chain;
        }
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
