use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

use super::ChainPayload;
use crate::error::{NodeError, Result};

/// Where consensus gets a peer's view of the chain from.
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// Fetch the full chain advertised by `peer` (a `host:port` location).
    async fn fetch_chain(&self, peer: &str) -> Result<ChainPayload>;
}

/// Talks to peers over plain HTTP: `GET http://<peer>/chain`.
pub struct HttpChainSource {
    client: Client,
}

impl HttpChainSource {
    /// `timeout` bounds each peer request end to end.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ChainSource for HttpChainSource {
    async fn fetch_chain(&self, peer: &str) -> Result<ChainPayload> {
        let url = format!("http://{peer}/chain");
        debug!("CONSENSUS - fetching {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NodeError::PeerStatus {
                peer: peer.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| NodeError::malformed(peer, e.to_string()))
    }
}


#[cfg(test)]
mod tests {
    use super::{ChainSource, HttpChainSource};
    use crate::blockchain::mined_chain;
    use crate::error::NodeError;
    use crate::network::ChainPayload;
    use actix_web::{App, HttpResponse, HttpServer, web};
    use std::time::Duration;

    fn source() -> HttpChainSource {
        HttpChainSource::new(Duration::from_secs(2)).unwrap()
    }

    #[actix_web::test]
    async fn fetches_chain_from_a_live_peer() {
        let served = mined_chain(2);
        let payload = ChainPayload::new(served.clone());
        let server = HttpServer::new(move || {
            let payload = payload.clone();
            App::new().route(
                "/chain",
                web::get().to(move || {
                    let payload = payload.clone();
                    async move { HttpResponse::Ok().json(payload) }
                }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let fetched = source().fetch_chain(&addr.to_string()).await.unwrap();
        assert_eq!(fetched.length, 2);
        assert_eq!(fetched.chain, served);

        handle.stop(true).await;
    }

    #[actix_web::test]
    async fn non_json_body_is_malformed() {
        let server = HttpServer::new(|| {
            App::new().route(
                "/chain",
                web::get().to(|| async { HttpResponse::Ok().body("not a chain") }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let err = source().fetch_chain(&addr.to_string()).await.unwrap_err();
        assert!(matches!(err, NodeError::MalformedChain { .. }));

        handle.stop(true).await;
    }

    #[actix_web::test]
    async fn error_status_is_reported() {
        let server = HttpServer::new(|| {
            App::new().route(
                "/chain",
                web::get().to(|| async { HttpResponse::ServiceUnavailable().finish() }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let err = source().fetch_chain(&addr.to_string()).await.unwrap_err();
        assert!(matches!(err, NodeError::PeerStatus { status: 503, .. }));

        handle.stop(true).await;
    }

    #[actix_web::test]
    async fn unreachable_peer_is_a_request_error() {
        // Port 9 (discard) is not expected to be listening locally.
        let err = source().fetch_chain("127.0.0.1:9").await.unwrap_err();
        assert!(matches!(err, NodeError::PeerRequest(_)));
    }
}
