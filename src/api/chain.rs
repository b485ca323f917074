use actix_web::{HttpResponse, Responder, get, web};

use super::models::ValidateResponse;
use crate::network::ChainPayload;
use crate::node::Node;

/// Get the full blockchain. Peers read this endpoint during resolution.
#[get("/chain")]
pub async fn get_chain(node: web::Data<Node>) -> impl Responder {
    HttpResponse::Ok().json(ChainPayload::new(node.chain()))
}

/// Validate the whole local chain.
#[get("/validate")]
pub async fn validate_chain(node: web::Data<Node>) -> impl Responder {
    let (valid, length) = node.validate();
    HttpResponse::Ok().json(ValidateResponse { valid, length })
}
