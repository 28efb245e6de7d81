use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod merge;
pub mod resolver;
pub mod store;

pub use merge::BondCache;
pub use resolver::{resolve, Resolution};
pub use store::BondStore;

/// Field-to-value payload describing one bond on one quote date. Never interpreted by the cache.
pub type BondData = Map<String, Value>;

/// One bond as returned to callers and as exchanged with the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondRecord {
    pub isin: String,
    pub data: BondData,
}

impl BondRecord {
    pub fn new(isin: impl Into<String>, data: BondData) -> Self {
        Self {
            isin: isin.into(),
            data,
        }
    }
}
