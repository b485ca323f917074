use actix_web::{HttpResponse, Responder, get, post, web};

use super::models::{NodesResponse, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse};
use crate::error::NodeError;
use crate::node::Node;

/// Register one or more peers: `{"nodes": ["http://host:port", ...]}`.
#[post("/nodes/register")]
pub async fn register_nodes(
    node: web::Data<Node>,
    body: web::Json<RegisterNodesRequest>,
) -> Result<HttpResponse, NodeError> {
    let addresses = body.into_inner().nodes.ok_or(NodeError::EmptyPeerList)?;
    let total_nodes = node.register_peers(&addresses)?;

    Ok(HttpResponse::Created().json(RegisterNodesResponse {
        message: "New nodes have been added",
        total_nodes,
    }))
}

#[get("/nodes")]
pub async fn list_nodes(node: web::Data<Node>) -> impl Responder {
    HttpResponse::Ok().json(NodesResponse {
        nodes: node.peers(),
    })
}

/// Run longest-valid-chain resolution against every registered peer.
#[get("/nodes/resolve")]
pub async fn resolve(node: web::Data<Node>) -> impl Responder {
    let outcome = node.resolve().await;
    let resp = if outcome.replaced {
        ResolveResponse {
            message: "Our chain was replaced",
            new_chain: Some(outcome.chain),
            chain: None,
        }
    } else {
        ResolveResponse {
            message: "Our chain is authoritative",
            new_chain: None,
            chain: Some(outcome.chain),
        }
    };
    HttpResponse::Ok().json(resp)
}
