use std::collections::HashMap;

use crate::error::{AppError, Result};

use super::{BondData, BondRecord};

/// Bond payloads indexed by quote date, then by ISIN.
///
/// A partition for a date only comes into existence when at least one record
/// for that date is stored, so "no partition" and "partition without a match"
/// stay distinguishable through [`BondStore::find`].
#[derive(Debug, Default)]
pub struct BondStore {
    partitions: HashMap<String, HashMap<String, BondData>>,
}

impl BondStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bonds` under `date`, overwriting earlier payloads for the same ISIN.
    ///
    /// Every record is checked before the first write happens.
    pub fn put(&mut self, date: &str, bonds: &[BondRecord]) -> Result<()> {
        ensure_date(date)?;
        for (position, bond) in bonds.iter().enumerate() {
            if bond.isin.is_empty() {
                return Err(AppError::invalid_argument(format!(
                    "bond record at position {position} must carry a non-empty isin"
                )));
            }
        }

        if bonds.is_empty() {
            return Ok(());
        }

        let partition = self.partitions.entry(date.to_string()).or_default();
        for bond in bonds {
            partition.insert(bond.isin.clone(), bond.data.clone());
        }
        Ok(())
    }

    /// Look up the cached payloads for `isins` on `date`.
    ///
    /// Returns `None` when the date was never populated or when `isins` is
    /// empty; otherwise a map holding copies of the payloads that were found.
    pub fn find<S: AsRef<str>>(
        &self,
        date: &str,
        isins: &[S],
    ) -> Result<Option<HashMap<String, BondData>>> {
        ensure_date(date)?;
        ensure_isins(isins)?;

        let Some(partition) = self.partitions.get(date) else {
            return Ok(None);
        };
        if isins.is_empty() {
            return Ok(None);
        }

        let found = isins
            .iter()
            .filter_map(|isin| {
                let isin = isin.as_ref();
                partition
                    .get(isin)
                    .map(|data| (isin.to_string(), data.clone()))
            })
            .collect();
        Ok(Some(found))
    }

    pub fn contains_partition(&self, date: &str) -> bool {
        self.partitions.contains_key(date)
    }

    /// ISINs currently held for `date`, sorted for stable display.
    pub fn partition_isins(&self, date: &str) -> Option<Vec<String>> {
        self.partitions.get(date).map(|partition| {
            let mut isins: Vec<String> = partition.keys().cloned().collect();
            isins.sort();
            isins
        })
    }

    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }
}

pub(crate) fn ensure_date(date: &str) -> Result<()> {
    if date.is_empty() {
        return Err(AppError::invalid_argument(
            "quote date must be a non-empty string",
        ));
    }
    Ok(())
}

pub(crate) fn ensure_isins<S: AsRef<str>>(isins: &[S]) -> Result<()> {
    match isins.iter().position(|isin| isin.as_ref().is_empty()) {
        Some(position) => Err(AppError::invalid_argument(format!(
            "isin at position {position} must be a non-empty string"
        ))),
        None => Ok(()),
    }
}
