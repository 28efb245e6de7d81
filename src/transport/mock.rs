use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rand::Rng;
use serde_json::json;
use tokio::time::{sleep, Duration};

use crate::cache::{BondData, BondRecord};
use crate::error::Result;

use super::BondTransport;

pub const DEFAULT_MOCK_DELAY_MS: u64 = 500;

/// In-process stand-in for the bonds endpoint: answers every ISIN with a random `prop` value.
pub struct MockTransport {
    delay: Duration,
    calls: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::with_delay_ms(DEFAULT_MOCK_DELAY_MS)
    }

    pub fn with_delay_ms(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `fetch` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BondTransport for MockTransport {
    async fn fetch(&self, _date: &str, isins: &[String]) -> Result<Vec<BondRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let mut rng = rand::thread_rng();
        let bonds = isins
            .iter()
            .map(|isin| {
                let mut data = BondData::new();
                data.insert("prop".to_string(), json!(rng.gen_range(0.0..1000.0)));
                BondRecord::new(isin.clone(), data)
            })
            .collect();
        Ok(bonds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_isins_in_request_order() {
        let transport = MockTransport::with_delay_ms(0);
        let isins = vec!["B".to_string(), "A".to_string()];

        let bonds = transport.fetch("20180120", &isins).await.unwrap();

        let returned: Vec<&str> = bonds.iter().map(|bond| bond.isin.as_str()).collect();
        assert_eq!(returned, vec!["B", "A"]);
        for bond in &bonds {
            let prop = bond.data["prop"].as_f64().expect("numeric prop");
            assert!((0.0..1000.0).contains(&prop));
        }
        assert_eq!(transport.calls(), 1);
    }
}
