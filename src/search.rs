//! # Query Engine Module
//!
//! ## Purpose
//! Read-only query operations over the built catalog. Every operation
//! returns an ordered list and never mutates state; an empty list is a
//! valid answer for both "no match" and "unknown contributor/position";
//! the presentation layer decides the user-facing message.
//!
//! ## Ranking Rules
//! - Name searches rank by overall rating mean, descending; ties keep the
//!   records' first-encountered (insertion) order via a stable sort.
//! - Contributor lookups rank by the contributor's own score first, the
//!   overall mean second, and cap the result list.
//! - Position and tag comparisons trim surrounding quote/whitespace noise
//!   on both sides; stored values stay verbatim.

use crate::config::QueryConfig;
use crate::store::{Record, RecordStore};
use crate::trie::NamePrefixIndex;
use crate::utils::TextUtils;
use crate::Catalog;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Stateless query operations over an immutable catalog.
pub struct QueryEngine<'a> {
    store: &'a RecordStore,
    names: &'a NamePrefixIndex,
    config: QueryConfig,
}

impl<'a> QueryEngine<'a> {
    pub fn new(catalog: &'a Catalog, config: QueryConfig) -> Self {
        Self {
            store: &catalog.store,
            names: &catalog.names,
            config,
        }
    }

    /// Records whose display name has at least one whitespace-delimited
    /// word containing `token`, ranked by rating mean descending.
    pub fn search_by_name_substring(&self, token: &str) -> Vec<&'a Record> {
        let mut results: Vec<&Record> = self
            .store
            .all()
            .filter(|record| {
                record
                    .long_name
                    .split_whitespace()
                    .any(|word| word.contains(token))
            })
            .collect();
        sort_by_mean_desc(&mut results);
        results
    }

    /// Trie-accelerated variant: records whose display name starts with
    /// `token`, ranked by rating mean descending. The trie may hand back
    /// duplicate ids; the first occurrence wins.
    pub fn search_by_name_prefix(&self, token: &str) -> Vec<&'a Record> {
        let mut seen = HashSet::new();
        let mut results: Vec<&Record> = Vec::new();
        for &id in self.names.lookup_prefix(token) {
            if seen.insert(id) {
                if let Some(record) = self.store.get(id) {
                    results.push(record);
                }
            }
        }
        sort_by_mean_desc(&mut results);
        results
    }

    /// Every record the contributor has scored, as `(score, record)`
    /// pairs ranked by the contributor's score then the overall mean,
    /// capped at the configured limit.
    pub fn search_by_contributor(&self, contributor: &str) -> Vec<(f64, &'a Record)> {
        let mut results: Vec<(f64, &Record)> = self
            .store
            .all()
            .filter_map(|record| {
                record
                    .user_ratings
                    .get(contributor)
                    .map(|&score| (score, record))
            })
            .collect();
        results.sort_by(|a, b| {
            (b.0, b.1.rating_mean)
                .partial_cmp(&(a.0, a.1.rating_mean))
                .unwrap_or(Ordering::Equal)
        });
        results.truncate(self.config.contributor_result_limit);
        results
    }

    /// The first `limit` records that play `position_code` and have at
    /// least `min_rating_count` ratings, ranked by rating mean descending.
    pub fn top_by_position(
        &self,
        position_code: &str,
        min_rating_count: usize,
        limit: usize,
    ) -> Vec<&'a Record> {
        let wanted = TextUtils::trim_noise(position_code);
        let mut results: Vec<&Record> = self
            .store
            .all()
            .filter(|record| {
                record.rating_count >= min_rating_count
                    && record
                        .positions
                        .iter()
                        .any(|code| TextUtils::trim_noise(code) == wanted)
            })
            .collect();
        sort_by_mean_desc(&mut results);
        results.truncate(limit);
        results
    }

    /// Records whose tag set covers every required tag, ranked by rating
    /// mean descending. No result limit.
    pub fn search_by_tags(&self, required_tags: &[String]) -> Vec<&'a Record> {
        let required: HashSet<&str> = required_tags
            .iter()
            .map(|tag| TextUtils::trim_noise(tag))
            .collect();
        let mut results: Vec<&Record> = self
            .store
            .all()
            .filter(|record| {
                let present: HashSet<&str> = record
                    .tags
                    .iter()
                    .map(|tag| TextUtils::trim_noise(tag))
                    .collect();
                required.is_subset(&present)
            })
            .collect();
        sort_by_mean_desc(&mut results);
        results
    }
}

fn sort_by_mean_desc(results: &mut [&Record]) {
    results.sort_by(|a, b| {
        b.rating_mean
            .partial_cmp(&a.rating_mean)
            .unwrap_or(Ordering::Equal)
    });
}
