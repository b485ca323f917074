use actix_web::{HttpResponse, get, web};

use super::models::MineResponse;
use crate::error::NodeError;
use crate::node::Node;

/// Mine a block on top of the current tip:
/// - search for the proof on a blocking worker
/// - reward this node with one unit
/// - seal the pending pool into the new block
#[get("/mine")]
pub async fn mine_block(node: web::Data<Node>) -> Result<HttpResponse, NodeError> {
    let block = node.mine().await?;
    Ok(HttpResponse::Ok().json(MineResponse::from(block)))
}
