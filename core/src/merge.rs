use std::collections::HashSet;

use ouiup_common::record::{Prefix, PrefixRecord};

use crate::database::PrefixDatabase;

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub database: PrefixDatabase,
    /// Records appended to the database, in registry order.
    pub added: Vec<PrefixRecord>,
}

/// Appends every fetched record whose prefix the database doesn't know yet.
///
/// Existing entries are never touched, even when the registry spells the
/// vendor differently. A prefix repeated in `fetched` is added once, with the
/// first vendor seen.
pub fn merge(existing: &PrefixDatabase, fetched: &[PrefixRecord]) -> MergeOutcome {
    let mut known: HashSet<Prefix> = existing.prefixes().into_iter().cloned().collect();
    let mut database = existing.clone();
    let mut added = Vec::new();

    for record in fetched {
        if known.insert(record.prefix.clone()) {
            database.push(record.clone());
            added.push(record.clone());
        }
    }

    MergeOutcome { database, added }
}
