mod chain;
mod health;
mod mining;
pub mod models;
mod nodes;
mod tx;

use actix_web::web::{self, ServiceConfig};

use crate::error::NodeError;

/// Routes are unscoped: peers fetch `GET /chain` from each other directly.
pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        NodeError::InvalidBody(err.to_string()).into()
    }))
    .service(health::health_check)
    .service(chain::get_chain)
    .service(chain::validate_chain)
    .service(mining::mine_block)
    .service(tx::post_transaction)
    .service(nodes::register_nodes)
    .service(nodes::list_nodes)
    .service(nodes::resolve);
}
