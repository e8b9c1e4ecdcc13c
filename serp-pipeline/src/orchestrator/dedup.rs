//! Result deduplication by domain.
//!
//! Keeps the first record seen for each domain and drops later ones
//! wholesale. Fields are never merged across duplicates, even when a
//! later record carries a snippet the kept one lacks.

use std::collections::HashSet;

use crate::types::SiteRecord;

/// Collapse `records` to at most one per domain, preserving input order.
pub fn dedup_by_domain(records: Vec<SiteRecord>) -> Vec<SiteRecord> {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.domain.clone()))
        .collect()
}
