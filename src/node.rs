use actix_web::web;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::blockchain::{Block, Ledger, MINING_REWARD, MINING_REWARD_SENDER, is_valid_chain, pow};
use crate::error::{NodeError, Result};
use crate::network::{ChainSource, PeerRegistry, Resolution, longest_valid_chain, peers};

/// One ledger node: owns the chain, the pending pool and the peer set, and
/// serializes every mutation through its locks.
pub struct Node {
    node_id: String,
    ledger: Mutex<Ledger>,
    peers: Mutex<PeerRegistry>,
    /// Bumped (under the ledger lock) whenever the tip changes; running
    /// proof searches watch it to give up on a stale base.
    tip_version: Arc<AtomicU64>,
    source: Arc<dyn ChainSource>,
}

impl Node {
    pub fn new(node_id: impl Into<String>, source: Arc<dyn ChainSource>) -> Self {
        Self {
            node_id: node_id.into(),
            ledger: Mutex::new(Ledger::new()),
            peers: Mutex::new(PeerRegistry::new()),
            tip_version: Arc::new(AtomicU64::new(0)),
            source,
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Queue a transaction; returns the index of the block that will hold it.
    pub fn submit_transaction(&self, sender: String, receiver: String, amount: f64) -> u64 {
        let mut ledger = self.ledger.lock().expect("mutex poisoned");
        let index = ledger.add_transaction(sender, receiver, amount);
        debug!(
            "POOL - queued tx for block #{index} ({} pending)",
            ledger.pending().len()
        );
        index
    }

    /// Snapshot of the current chain.
    pub fn chain(&self) -> Vec<Block> {
        self.ledger.lock().expect("mutex poisoned").chain().to_vec()
    }

    /// Whether the local chain passes validation, and its length.
    pub fn validate(&self) -> (bool, usize) {
        let ledger = self.ledger.lock().expect("mutex poisoned");
        (is_valid_chain(ledger.chain()), ledger.len())
    }

    /// Solve the puzzle for the current tip, pay the mining reward and seal
    /// the pending pool into a new block.
    ///
    /// The search runs on a blocking worker with no lock held. If the tip
    /// moves meanwhile (another block mined or a chain adopted) the search is
    /// abandoned and nothing is appended.
    pub async fn mine(&self) -> Result<Block> {
        let (last_proof, last_hash, version) = {
            let ledger = self.ledger.lock().expect("mutex poisoned");
            let last = ledger.last_block();
            (
                last.proof,
                last.hash(),
                self.tip_version.load(Ordering::Acquire),
            )
        };

        let started = Instant::now();
        let tip = Arc::clone(&self.tip_version);
        let proof = web::block(move || {
            pow::solve_until(last_proof, || tip.load(Ordering::Acquire) != version)
        })
        .await
        .map_err(|e| NodeError::Worker(e.to_string()))?
        .ok_or(NodeError::MiningCancelled)?;
        debug!(
            "MINER - proof {proof} solves {last_proof} ({} ms)",
            started.elapsed().as_millis()
        );

        let mut ledger = self.ledger.lock().expect("mutex poisoned");
        if ledger.last_block().hash() != last_hash {
            warn!("MINER - tip moved while solving {last_proof}, dropping proof {proof}");
            return Err(NodeError::StaleTip);
        }

        ledger.add_transaction(MINING_REWARD_SENDER, self.node_id.as_str(), MINING_REWARD);
        let block = ledger.append_block(proof, &last_hash).clone();
        self.tip_version.fetch_add(1, Ordering::AcqRel);

        info!(
            "MINER - forged block #{} (proof={}, txs={})",
            block.index,
            block.proof,
            block.transactions.len()
        );
        Ok(block)
    }

    /// Register every address, or none of them if any is invalid.
    /// Returns the full peer list afterwards.
    pub fn register_peers(&self, addresses: &[String]) -> Result<Vec<String>> {
        if addresses.is_empty() {
            return Err(NodeError::EmptyPeerList);
        }
        let locations = addresses
            .iter()
            .map(|a| peers::network_location(a))
            .collect::<Result<Vec<_>>>()?;

        let mut registry = self.peers.lock().expect("mutex poisoned");
        for location in &locations {
            if registry.register(location)? {
                info!("PEERS - registered {location}");
            }
        }
        Ok(registry.list())
    }

    pub fn peers(&self) -> Vec<String> {
        self.peers.lock().expect("mutex poisoned").list()
    }

    /// Longest-valid-chain resolution against every registered peer.
    pub async fn resolve(&self) -> Resolution {
        let local_len = self.ledger.lock().expect("mutex poisoned").len();
        let peers = self.peers();

        let candidate = longest_valid_chain(local_len, &peers, self.source.as_ref()).await;

        let mut ledger = self.ledger.lock().expect("mutex poisoned");
        match candidate {
            // The local chain may have grown while peers were being asked.
            Some(chain) if chain.len() > ledger.len() => {
                ledger.replace_chain(chain);
                self.tip_version.fetch_add(1, Ordering::AcqRel);
                info!("CONSENSUS - chain replaced, length now {}", ledger.len());
                Resolution {
                    replaced: true,
                    chain: ledger.chain().to_vec(),
                }
            }
            _ => {
                debug!("CONSENSUS - local chain of {} blocks kept", ledger.len());
                Resolution {
                    replaced: false,
                    chain: ledger.chain().to_vec(),
                }
            }
        }
    }
}
