pub mod client;
pub mod consensus;
pub mod peers;

pub use client::{ChainSource, HttpChainSource};
pub use consensus::{Resolution, longest_valid_chain};
pub use peers::PeerRegistry;

use serde::{Deserialize, Serialize};

use crate::blockchain::Block;

/// Body of `GET /chain`, both as served by this node and as read from peers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainPayload {
    pub chain: Vec<Block>,
    pub length: usize,
}

impl ChainPayload {
    pub fn new(chain: Vec<Block>) -> Self {
        let length = chain.len();
        Self { chain, length }
    }
}
