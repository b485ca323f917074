//! Environment-driven node settings (a `.env` file is honoured via dotenvy).

use std::env;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

use crate::error::{NodeError, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_PEER_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    /// Receiver of this node's mining rewards.
    pub node_id: String,
    /// Upper bound for a single `GET /chain` against a peer.
    pub peer_timeout: Duration,
    pub bootstrap_peers: Vec<String>,
}

impl NodeConfig {
    /// Read `HOST`, `PORT`, `NODE_ID`, `PEER_TIMEOUT_SECS` and `BOOTSTRAP_PEERS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let node_id = lookup("NODE_ID")
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());
        let timeout_secs = parse_or(
            "PEER_TIMEOUT_SECS",
            lookup("PEER_TIMEOUT_SECS"),
            DEFAULT_PEER_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(NodeError::config("PEER_TIMEOUT_SECS must be at least 1"));
        }
        let bootstrap_peers = lookup("BOOTSTRAP_PEERS")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            node_id,
            peer_timeout: Duration::from_secs(timeout_secs),
            bootstrap_peers,
        })
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| NodeError::config(format!("{key}={v:?} is not a valid value"))),
    }
}
