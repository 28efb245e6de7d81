use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{info, warn};

use crate::error::Result;
use crate::transport::BondTransport;

use super::{resolve, BondRecord, BondStore};

/// Read-through cache in front of a [`BondTransport`].
///
/// The store is only locked around synchronous work, never across the
/// transport call. Two overlapping requests that miss the same ISIN will
/// therefore both fetch it and both write it back; the later write wins.
pub struct BondCache {
    store: RwLock<BondStore>,
    transport: Arc<dyn BondTransport>,
}

impl BondCache {
    pub fn new(transport: Arc<dyn BondTransport>) -> Self {
        Self::with_store(BondStore::new(), transport)
    }

    pub fn with_store(store: BondStore, transport: Arc<dyn BondTransport>) -> Self {
        Self {
            store: RwLock::new(store),
            transport,
        }
    }

    /// Return payloads for every requested ISIN, fetching only those not cached yet.
    ///
    /// Cached bonds come first in request order, followed by freshly fetched
    /// bonds in transport order. A transport failure aborts the call and
    /// leaves the store untouched.
    pub async fn get_bonds_data<S: AsRef<str>>(
        &self,
        date: &str,
        isins: &[S],
    ) -> Result<Vec<BondRecord>> {
        let resolution = resolve(&self.read_store(), date, isins)?;

        let mut fetched = Vec::new();
        if !resolution.misses.is_empty() {
            info!(
                "Fetching {} uncached isin(s) for {}",
                resolution.misses.len(),
                date
            );
            fetched = self.transport.fetch(date, &resolution.misses).await?;
            self.write_store().put(date, &fetched)?;
            warn_on_omitted(date, &resolution.misses, &fetched);
        }

        let mut bonds = resolution.hits;
        bonds.extend(fetched);
        Ok(bonds)
    }

    /// Sorted ISINs cached for `date`, or `None` if nothing was ever stored for it.
    pub fn cached_isins(&self, date: &str) -> Option<Vec<String>> {
        self.read_store().partition_isins(date)
    }

    pub fn cached_dates(&self) -> usize {
        self.read_store().partition_count()
    }

    fn read_store(&self) -> RwLockReadGuard<'_, BondStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_store(&self) -> RwLockWriteGuard<'_, BondStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn warn_on_omitted(date: &str, requested: &[String], fetched: &[BondRecord]) {
    let returned: HashSet<&str> = fetched.iter().map(|bond| bond.isin.as_str()).collect();
    let omitted: Vec<&str> = requested
        .iter()
        .map(String::as_str)
        .filter(|isin| !returned.contains(isin))
        .collect();
    if !omitted.is_empty() {
        warn!(
            "Transport returned no data for {} on {}: {}",
            omitted.len(),
            date,
            omitted.join(", ")
        );
    }
}
