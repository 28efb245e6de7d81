use std::collections::HashSet;

use log::debug;

use crate::error::Result;

use super::{BondRecord, BondStore};

/// Outcome of splitting a request into cached hits and ISINs still to fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub hits: Vec<BondRecord>,
    pub misses: Vec<String>,
}

/// Partition `isins` against the store.
///
/// Hits keep request order and appear once even if requested twice. Misses
/// are the exact complement of the hit keys, so the two sides never overlap.
pub fn resolve<S: AsRef<str>>(store: &BondStore, date: &str, isins: &[S]) -> Result<Resolution> {
    let resolution = match store.find(date, isins)? {
        None => Resolution {
            hits: Vec::new(),
            misses: isins.iter().map(|isin| isin.as_ref().to_string()).collect(),
        },
        Some(mut cached) => {
            let cached_isins: HashSet<String> = cached.keys().cloned().collect();
            let mut hits = Vec::with_capacity(cached.len());
            let mut misses = Vec::new();
            for isin in isins {
                let isin = isin.as_ref();
                if let Some(data) = cached.remove(isin) {
                    hits.push(BondRecord::new(isin, data));
                } else if !cached_isins.contains(isin) {
                    misses.push(isin.to_string());
                }
            }
            Resolution { hits, misses }
        }
    };

    debug!(
        "Resolved {} isin(s) for {}: {} cached, {} to fetch",
        isins.len(),
        date,
        resolution.hits.len(),
        resolution.misses.len()
    );
    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seeded_store() -> BondStore {
        let mut store = BondStore::new();
        let bonds: Vec<BondRecord> = ["P1", "P2", "P3"]
            .iter()
            .map(|isin| {
                BondRecord::new(
                    *isin,
                    json!({ "prop": isin.len() }).as_object().cloned().unwrap(),
                )
            })
            .collect();
        store.put("20180120", &bonds).unwrap();
        store
    }

    #[test]
    fn unknown_date_misses_everything() {
        let store = seeded_store();
        let resolution = resolve(&store, "20180121", &["P1", "P2"]).unwrap();

        assert!(resolution.hits.is_empty());
        assert_eq!(resolution.misses, vec!["P1", "P2"]);
    }

    #[test]
    fn splits_hits_and_misses_in_request_order() {
        let store = seeded_store();
        let resolution = resolve(&store, "20180120", &["P4", "P2", "P5", "P1"]).unwrap();

        let hit_isins: Vec<&str> = resolution.hits.iter().map(|hit| hit.isin.as_str()).collect();
        assert_eq!(hit_isins, vec!["P2", "P1"]);
        assert_eq!(resolution.misses, vec!["P4", "P5"]);
    }

    #[test]
    fn hits_and_misses_are_disjoint() {
        let store = seeded_store();
        let resolution = resolve(&store, "20180120", &["P2", "P2", "P9", "P3"]).unwrap();

        assert_eq!(resolution.hits.len(), 2);
        for miss in &resolution.misses {
            assert!(resolution.hits.iter().all(|hit| &hit.isin != miss));
        }
    }

    #[test]
    fn empty_request_resolves_to_nothing() {
        let store = seeded_store();
        let resolution = resolve::<&str>(&store, "20180120", &[]).unwrap();

        assert_eq!(resolution, Resolution::default());
    }

    #[test]
    fn large_batches_split_cleanly() {
        let mut store = BondStore::new();
        let cached: Vec<BondRecord> = (0..20_000)
            .map(|n| BondRecord::new(format!("HIT{n}"), Default::default()))
            .collect();
        store.put("20180120", &cached).unwrap();

        let mut request: Vec<String> = cached.iter().map(|bond| bond.isin.clone()).collect();
        request.extend((0..20_000).map(|n| format!("MISS{n}")));
        request.push("HIT0".to_string());

        let resolution = resolve(&store, "20180120", &request).unwrap();

        assert_eq!(resolution.hits.len(), 20_000);
        assert_eq!(resolution.misses.len(), 20_000);
        assert_eq!(resolution.misses[0], "MISS0");
    }
}
