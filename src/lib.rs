pub mod cache;
pub mod config;
pub mod error;
pub mod transport;
pub mod utils;

pub use cache::{BondCache, BondData, BondRecord, BondStore};
pub use error::{AppError, Result};
pub use transport::BondTransport;
