//! # Record Store Module
//!
//! ## Purpose
//! Owns every [`Record`] aggregate, keyed by identifier, and keeps the
//! derived rating aggregates consistent under incremental updates.
//!
//! ## Input/Output Specification
//! - **Input**: well-formed scalar fields (the ingestion pipeline rejects
//!   malformed rows before calling in here)
//! - **Output**: identifier lookups and insertion-ordered iteration
//! - **Invariants**: `rating_count == ratings.len()` after any mutation;
//!   `rating_mean` is never stale; an id is assigned exactly once and a
//!   second creation attempt for it is a no-op (first writer wins)
//!
//! ## Aggregation
//! The mean is maintained through a private running sum so every rating
//! append costs O(1); only the derived mean is exposed.

use crate::RecordId;
use serde::Serialize;
use std::collections::HashMap;

/// One catalogued player with its aggregated rating and tag data.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub id: RecordId,
    pub short_name: String,
    /// Display name; the key material indexed by the name prefix trie.
    pub long_name: String,
    /// Short position codes, source order preserved, tokens verbatim.
    pub positions: Vec<String>,
    pub nationality: String,
    pub club: String,
    pub league: String,
    /// Append-only sequence of every score contributed over time.
    pub ratings: Vec<f64>,
    /// Always `ratings.len()`.
    pub rating_count: usize,
    /// Arithmetic mean of `ratings`, `0.0` when empty.
    pub rating_mean: f64,
    /// One score per contributor; a later write overwrites.
    pub user_ratings: HashMap<String, f64>,
    /// Free-form labels, stored verbatim, duplicates allowed.
    pub tags: Vec<String>,
    #[serde(skip)]
    rating_sum: f64,
}

impl Record {
    fn new(
        id: RecordId,
        short_name: String,
        long_name: String,
        positions: Vec<String>,
        nationality: String,
        club: String,
        league: String,
    ) -> Self {
        Self {
            id,
            short_name,
            long_name,
            positions,
            nationality,
            club,
            league,
            ratings: Vec::new(),
            rating_count: 0,
            rating_mean: 0.0,
            user_ratings: HashMap::new(),
            tags: Vec::new(),
            rating_sum: 0.0,
        }
    }

    fn push_rating(&mut self, contributor: &str, score: f64) {
        self.ratings.push(score);
        self.rating_sum += score;
        self.rating_count = self.ratings.len();
        self.rating_mean = self.rating_sum / self.rating_count as f64;
        self.user_ratings.insert(contributor.to_string(), score);
    }
}

/// Mapping from record identifier to its aggregate, iterable in insertion
/// order.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    by_id: HashMap<RecordId, usize>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new empty-aggregate record iff `id` is unknown; returns
    /// whether insertion occurred.
    #[allow(clippy::too_many_arguments)]
    pub fn create_if_absent(
        &mut self,
        id: RecordId,
        short_name: String,
        long_name: String,
        positions: Vec<String>,
        nationality: String,
        club: String,
        league: String,
    ) -> bool {
        if self.by_id.contains_key(&id) {
            return false;
        }
        self.by_id.insert(id, self.records.len());
        self.records.push(Record::new(
            id,
            short_name,
            long_name,
            positions,
            nationality,
            club,
            league,
        ));
        true
    }

    /// Fold one contributor score into the record's aggregates. No-op when
    /// `id` is unknown.
    pub fn add_contributor_rating(&mut self, id: RecordId, contributor: &str, score: f64) {
        if let Some(&idx) = self.by_id.get(&id) {
            self.records[idx].push_rating(contributor, score);
        }
    }

    /// Append one tag verbatim. No-op when `id` is unknown.
    pub fn append_tag(&mut self, id: RecordId, tag: String) {
        if let Some(&idx) = self.by_id.get(&id) {
            self.records[idx].tags.push(tag);
        }
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.by_id.get(&id).map(|&idx| &self.records[idx])
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate every record in insertion order.
    pub fn all(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(id: RecordId, long_name: &str) -> RecordStore {
        let mut store = RecordStore::new();
        store.create_if_absent(
            id,
            "Short".to_string(),
            long_name.to_string(),
            vec!["RW".to_string()],
            "Argentina".to_string(),
            "Inter Miami".to_string(),
            "MLS".to_string(),
        );
        store
    }

    #[test]
    fn created_record_has_empty_aggregates() {
        let store = store_with(1, "Lionel Messi");
        let record = store.get(1).unwrap();
        assert_eq!(record.rating_count, 0);
        assert_eq!(record.rating_mean, 0.0);
        assert!(record.ratings.is_empty());
        assert!(record.tags.is_empty());
    }

    #[test]
    fn create_is_first_writer_wins() {
        let mut store = store_with(1, "Lionel Messi");
        let inserted = store.create_if_absent(
            1,
            "Other".to_string(),
            "Someone Else".to_string(),
            vec![],
            String::new(),
            String::new(),
            String::new(),
        );
        assert!(!inserted);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().long_name, "Lionel Messi");
    }

    #[test]
    fn rating_aggregates_track_every_append() {
        let mut store = store_with(1, "Lionel Messi");
        store.add_contributor_rating(1, "u1", 9.0);
        store.add_contributor_rating(1, "u2", 7.0);

        let record = store.get(1).unwrap();
        assert_eq!(record.rating_count, 2);
        assert!((record.rating_mean - 8.0).abs() < 1e-9);
        assert_eq!(record.user_ratings["u1"], 9.0);
        assert_eq!(record.user_ratings["u2"], 7.0);
    }

    #[test]
    fn same_contributor_overwrites_user_score_but_still_appends() {
        let mut store = store_with(1, "Lionel Messi");
        store.add_contributor_rating(1, "u1", 4.0);
        store.add_contributor_rating(1, "u1", 8.0);

        let record = store.get(1).unwrap();
        assert_eq!(record.user_ratings.len(), 1);
        assert_eq!(record.user_ratings["u1"], 8.0);
        assert_eq!(record.rating_count, 2);
        assert!((record.rating_mean - 6.0).abs() < 1e-9);
    }

    #[test]
    fn mutations_on_unknown_id_are_no_ops() {
        let mut store = store_with(1, "Lionel Messi");
        store.add_contributor_rating(999, "u1", 9.0);
        store.append_tag(999, "dribbler".to_string());

        assert!(store.get(999).is_none());
        let record = store.get(1).unwrap();
        assert_eq!(record.rating_count, 0);
        assert!(record.tags.is_empty());
    }

    #[test]
    fn tags_are_appended_verbatim() {
        let mut store = store_with(1, "Lionel Messi");
        store.append_tag(1, " \"Dribbler\" ".to_string());
        assert_eq!(store.get(1).unwrap().tags, vec![" \"Dribbler\" "]);
    }

    #[test]
    fn all_iterates_in_insertion_order() {
        let mut store = store_with(7, "Seventh Player");
        store.create_if_absent(
            3,
            "T".to_string(),
            "Third Player".to_string(),
            vec![],
            String::new(),
            String::new(),
            String::new(),
        );
        let ids: Vec<_> = store.all().map(|r| r.id).collect();
        assert_eq!(ids, vec![7, 3]);
    }
}
