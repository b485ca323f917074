use serde::{Deserialize, Serialize};

use crate::blockchain::Block;
use crate::error::{NodeError, Result};
use crate::transaction::Transaction;

/* ---------- Mining API Models ---------- */

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl From<Block> for MineResponse {
    fn from(block: Block) -> Self {
        Self {
            message: "New Block Forged",
            index: block.index,
            transactions: block.transactions,
            proof: block.proof,
            previous_hash: block.previous_hash,
        }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

/* ---------- TX API Models ---------- */

/// Fields are optional so a missing one is reported by name instead of
/// failing deserialization.
#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub amount: Option<f64>,
}

impl NewTxRequest {
    pub fn into_parts(self) -> Result<(String, String, f64)> {
        match (self.sender, self.receiver, self.amount) {
            (Some(sender), Some(receiver), Some(amount)) => Ok((sender, receiver, amount)),
            (sender, receiver, amount) => {
                let missing: Vec<&str> = [
                    ("sender", sender.is_none()),
                    ("receiver", receiver.is_none()),
                    ("amount", amount.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(NodeError::MissingFields(missing.join(", ")))
            }
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/* ---------- Peer API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: &'static str,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct NodesResponse {
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_chain: Option<Vec<Block>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<Vec<Block>>,
}

#[cfg(test)]
mod tests {
    use super::NewTxRequest;
    use crate::error::NodeError;

    #[test]
    fn lists_every_missing_field() {
        let req: NewTxRequest = serde_json::from_str(r#"{"receiver": "bob"}"#).unwrap();
        match req.into_parts() {
            Err(NodeError::MissingFields(fields)) => assert_eq!(fields, "sender, amount"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn complete_request_splits_into_parts() {
        let req: NewTxRequest =
            serde_json::from_str(r#"{"sender": "a", "receiver": "b", "amount": 4}"#).unwrap();
        assert_eq!(req.into_parts().unwrap(), ("a".into(), "b".into(), 4.0));
    }
}
