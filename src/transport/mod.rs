use std::sync::Arc;

use async_trait::async_trait;

use crate::cache::BondRecord;
use crate::config::TransportConfig;
use crate::error::Result;

pub mod http;
pub mod mock;

pub use http::HttpTransport;
pub use mock::MockTransport;

/// Remote lookup of bond payloads for one quote date.
///
/// The cache only calls `fetch` with a non-empty ISIN list and stores the
/// returned records as they are.
#[async_trait]
pub trait BondTransport: Send + Sync {
    async fn fetch(&self, date: &str, isins: &[String]) -> Result<Vec<BondRecord>>;
}

/// Build the transport described by the configuration.
pub fn from_config(config: &TransportConfig) -> Result<Arc<dyn BondTransport>> {
    let transport: Arc<dyn BondTransport> = match config {
        TransportConfig::Mock { delay_ms } => Arc::new(MockTransport::with_delay_ms(*delay_ms)),
        TransportConfig::Http(http) => Arc::new(HttpTransport::new(http)?),
    };
    Ok(transport)
}
