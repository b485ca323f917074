use futures::future::join_all;
use log::{debug, warn};

use super::ChainSource;
use crate::blockchain::{Block, is_valid_chain};

/// Outcome of a resolution round.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub replaced: bool,
    pub chain: Vec<Block>,
}

/// Ask every peer for its chain and return the longest valid one that is
/// strictly longer than `local_len`, if any.
///
/// Peers are queried concurrently. A peer that fails to answer, answers with
/// an error or sends a payload whose `length` disagrees with its blocks is
/// skipped; the remaining peers are still considered. Among equally long
/// candidates the first peer in `peers` wins.
pub async fn longest_valid_chain(
    local_len: usize,
    peers: &[String],
    source: &dyn ChainSource,
) -> Option<Vec<Block>> {
    let replies = join_all(peers.iter().map(|peer| source.fetch_chain(peer))).await;

    let mut best_len = local_len;
    let mut best = None;

    for (peer, reply) in peers.iter().zip(replies) {
        let payload = match reply {
            Ok(payload) => payload,
            Err(e) => {
                warn!("CONSENSUS - skipping {peer}: {e}");
                continue;
            }
        };

        if payload.length != payload.chain.len() {
            warn!(
                "CONSENSUS - skipping {peer}: reported length {} but sent {} blocks",
                payload.length,
                payload.chain.len()
            );
            continue;
        }

        if payload.length <= best_len {
            debug!(
                "CONSENSUS - {peer} has {} blocks, best so far is {best_len}",
                payload.length
            );
            continue;
        }

        if !is_valid_chain(&payload.chain) {
            warn!("CONSENSUS - {peer} sent an invalid chain of {} blocks", payload.length);
            continue;
        }

        debug!("CONSENSUS - {peer} is the new best candidate ({} blocks)", payload.length);
        best_len = payload.length;
        best = Some(payload.chain);
    }

    best
}
