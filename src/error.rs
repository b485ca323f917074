//! Error type shared by the ledger node and its HTTP front end.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, NodeError>;

#[derive(Error, Debug)]
pub enum NodeError {
    /// A request body lacked one or more required fields.
    #[error("Missing values in request: {0}")]
    MissingFields(String),

    /// The body could not be read as the expected JSON document.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid node address: {0:?}")]
    InvalidPeerAddress(String),

    #[error("Please supply a valid list of nodes")]
    EmptyPeerList,

    /// Transport-level failure talking to a peer (connect, timeout, body).
    #[error("Peer request failed: {0}")]
    PeerRequest(#[from] reqwest::Error),

    #[error("Peer {peer} answered with status {status}")]
    PeerStatus { peer: String, status: u16 },

    #[error("Peer {peer} sent a malformed chain: {message}")]
    MalformedChain { peer: String, message: String },

    /// The chain tip moved while a proof was being searched for.
    #[error("Chain tip changed while mining; proof discarded")]
    StaleTip,

    #[error("Proof-of-work search was cancelled")]
    MiningCancelled,

    #[error("Blocking worker failed: {0}")]
    Worker(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NodeError {
    pub fn malformed(peer: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedChain {
            peer: peer.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ResponseError for NodeError {
    fn status_code(&self) -> StatusCode {
        match self {
            NodeError::MissingFields(_)
            | NodeError::InvalidBody(_)
            | NodeError::InvalidPeerAddress(_)
            | NodeError::EmptyPeerList => StatusCode::BAD_REQUEST,
            NodeError::StaleTip | NodeError::MiningCancelled => StatusCode::CONFLICT,
            NodeError::PeerRequest(_)
            | NodeError::PeerStatus { .. }
            | NodeError::MalformedChain { .. } => StatusCode::BAD_GATEWAY,
            NodeError::Worker(_) | NodeError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::NodeError;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn input_errors_are_client_errors() {
        assert_eq!(
            NodeError::MissingFields("amount".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(NodeError::EmptyPeerList.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            NodeError::InvalidPeerAddress("::".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn tip_conflicts_map_to_409() {
        assert_eq!(NodeError::StaleTip.status_code(), StatusCode::CONFLICT);
        assert_eq!(NodeError::MiningCancelled.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn peer_failures_map_to_bad_gateway() {
        let err = NodeError::PeerStatus {
            peer: "10.0.0.1:5000".into(),
            status: 503,
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert!(err.to_string().contains("503"));
    }
}
