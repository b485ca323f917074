use actix_web::{HttpResponse, post, web};
use log::{debug, warn};

use super::models::{MessageResponse, NewTxRequest};
use crate::error::NodeError;
use crate::node::Node;

/// Submit a new transaction into the pending pool.
#[post("/transactions/new")]
pub async fn post_transaction(
    node: web::Data<Node>,
    body: web::Json<NewTxRequest>,
) -> Result<HttpResponse, NodeError> {
    let (sender, receiver, amount) = body.into_inner().into_parts().inspect_err(|e| {
        warn!("POST /transactions/new - rejected: {e}");
    })?;
    debug!("POST /transactions/new - {sender} -> {receiver} ({amount})");

    let index = node.submit_transaction(sender, receiver, amount);

    Ok(HttpResponse::Created().json(MessageResponse {
        message: format!("New transaction will be added to block {index}"),
    }))
}
