//! A single node of a proof-of-work ledger: chain and pending pool, the
//! proof search, chain validation, longest-valid-chain resolution against
//! peers, and the HTTP routes exposing them.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod network;
pub mod node;
pub mod transaction;

pub use blockchain::{Block, Ledger};
pub use error::{NodeError, Result};
pub use node::Node;
