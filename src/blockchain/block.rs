use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::transaction::Transaction;

/// A single block in the chain. Blocks carry no cached hash: the hash is
/// always recomputed from the canonical form of the fields below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // seconds since the Unix epoch
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    /// The first block of every ledger.
    pub fn genesis() -> Self {
        Self::new(1, Vec::new(), GENESIS_PROOF, GENESIS_PREVIOUS_HASH.to_string())
    }

    /// Build a block stamped with the current time.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp: now_secs(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// Lowercase hex SHA-256 of the block's canonical JSON.
    pub fn hash(&self) -> String {
        let value = serde_json::to_value(self).expect("block fields are plain JSON values");
        let digest = Sha256::digest(canonical_json(&value).as_bytes());
        hex::encode(digest)
    }
}

/// Serialize a JSON value with object keys sorted at every level and no
/// insignificant whitespace. Scalars use serde_json's fixed formatting.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, val)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(val, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::{Block, canonical_json};
    use crate::transaction::Transaction;
    use serde_json::{Map, Value, json};

    fn sample() -> Block {
        Block {
            index: 2,
            timestamp: 1_700_000_000.25,
            transactions: vec![Transaction::new("alice", "bob", 3.0)],
            proof: 35_293,
            previous_hash: "ab".repeat(32),
        }
    }

    #[test]
    fn genesis_has_fixed_proof_and_sentinel() {
        let b = Block::genesis();
        assert_eq!(b.index, 1);
        assert_eq!(b.proof, 1);
        assert_eq!(b.previous_hash, "1000");
        assert!(b.transactions.is_empty());
    }

    #[test]
    fn hash_is_64_lowercase_hex_chars() {
        let h = sample().hash();
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn hash_ignores_field_order_of_the_source_json() {
        let a: Block = serde_json::from_str(
            r#"{"index":2,"timestamp":1700000000.25,"transactions":[{"sender":"alice","receiver":"bob","amount":3.0}],"proof":35293,"previous_hash":"x"}"#,
        )
        .unwrap();
        let b: Block = serde_json::from_str(
            r#"{"previous_hash":"x","proof":35293,"transactions":[{"amount":3.0,"receiver":"bob","sender":"alice"}],"timestamp":1700000000.25,"index":2}"#,
        )
        .unwrap();
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn canonical_form_sorts_keys_regardless_of_insertion_order() {
        let mut first = Map::new();
        first.insert("proof".into(), json!(7));
        first.insert("index".into(), json!(1));
        let mut second = Map::new();
        second.insert("index".into(), json!(1));
        second.insert("proof".into(), json!(7));

        let a = canonical_json(&Value::Object(first));
        let b = canonical_json(&Value::Object(second));
        assert_eq!(a, b);
        assert_eq!(a, r#"{"index":1,"proof":7}"#);
    }

    #[test]
    fn canonical_block_layout() {
        let value = serde_json::to_value(sample()).unwrap();
        let text = canonical_json(&value);
        assert!(text.starts_with(r#"{"index":2,"previous_hash":""#));
        assert!(text.contains(r#""transactions":[{"amount":3.0,"receiver":"bob","sender":"alice"}]"#));
    }

    #[test]
    fn hash_changes_when_a_field_changes() {
        let base = sample();
        let mut moved = base.clone();
        moved.proof += 1;
        assert_ne!(base.hash(), moved.hash());

        let mut edited = base.clone();
        edited.transactions[0].amount = 300.0;
        assert_ne!(base.hash(), edited.hash());
    }

    #[test]
    fn equal_blocks_hash_equally() {
        assert_eq!(sample().hash(), sample().clone().hash());
    }
}
