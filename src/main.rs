use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{info, warn};
use std::io;
use std::sync::Arc;

use proof_ledger::Node;
use proof_ledger::api;
use proof_ledger::config::NodeConfig;
use proof_ledger::network::HttpChainSource;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let cfg =
        NodeConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let source = HttpChainSource::new(cfg.peer_timeout).map_err(io::Error::other)?;
    let node = Node::new(cfg.node_id.clone(), Arc::new(source));

    if !cfg.bootstrap_peers.is_empty() {
        match node.register_peers(&cfg.bootstrap_peers) {
            Ok(peers) => info!("bootstrap peers: {}", peers.join(", ")),
            Err(e) => warn!("ignoring BOOTSTRAP_PEERS: {e}"),
        }
    }

    println!(
        "⛓️ Starting ledger node {} at http://{}:{}",
        node.node_id(),
        cfg.host,
        cfg.port
    );

    let state = web::Data::new(node);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((cfg.host.as_str(), cfg.port))?
    .run()
    .await
}
