use std::collections::BTreeSet;
use url::Url;

use crate::error::{NodeError, Result};

/// Reduce a peer address to its `host:port` network location.
///
/// Accepts full URLs (`http://10.0.0.5:5000/`) as well as bare locations
/// (`10.0.0.5:5000`, `localhost:5000`). Scheme and path are dropped; a
/// missing port becomes the scheme's default.
pub fn network_location(address: &str) -> Result<String> {
    let invalid = || NodeError::InvalidPeerAddress(address.to_string());

    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    // A bare "localhost:5000" would parse as scheme "localhost" with no host.
    let url = if trimmed.contains("://") {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("http://{trimmed}"))
    }
    .map_err(|_| invalid())?;

    let host = url.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
    let port = url.port_or_known_default().ok_or_else(invalid)?;
    Ok(format!("{host}:{port}"))
}

/// Deduplicated set of peers, kept sorted for stable listings.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    peers: BTreeSet<String>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a peer. Returns `false` when the location was already known.
    pub fn register(&mut self, address: &str) -> Result<bool> {
        let location = network_location(address)?;
        Ok(self.peers.insert(location))
    }

    pub fn contains(&self, location: &str) -> bool {
        self.peers.contains(location)
    }

    pub fn list(&self) -> Vec<String> {
        self.peers.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}
