//! # Ingestion Pipeline
//!
//! ## Purpose
//! Drives the parser over the three line streams and populates the record
//! store and the name prefix trie while keeping them mutually consistent.
//!
//! ## Workflow
//! Records → Ratings → Tags, strictly in that order; ratings and tags can
//! only attach to records created in the first phase. The trie is updated
//! only when a record row actually inserts, so a duplicate-id row cannot
//! leave the two indexes disagreeing about a name.

use crate::errors::{CatalogError, Result};
use crate::ingestion::rows::{RatingRow, RecordRow, TagRow};
use crate::parser;
use crate::store::RecordStore;
use crate::trie::NamePrefixIndex;
use crate::utils::Timer;
use crate::Catalog;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters gathered while loading, reported once after the final phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestStats {
    /// Records created from well-formed rows
    pub records_created: usize,
    /// Records rows dropped as structural errors
    pub records_skipped: usize,
    /// Records rows dropped because their id already existed
    pub duplicates_skipped: usize,
    /// Ratings folded into an existing record
    pub ratings_applied: usize,
    /// Ratings rows dropped (structural error or unknown record)
    pub ratings_skipped: usize,
    /// Tags appended to an existing record
    pub tags_applied: usize,
    /// Tags rows dropped (structural error or unknown record)
    pub tags_skipped: usize,
    /// Start of the load run
    pub started_at: Option<DateTime<Utc>>,
    /// End of the load run
    pub finished_at: Option<DateTime<Utc>>,
}

/// Builds a [`Catalog`] from the three input streams.
#[derive(Debug, Default)]
pub struct IngestionPipeline {
    store: RecordStore,
    names: NamePrefixIndex,
    stats: IngestStats,
}

impl IngestionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the three line streams, in fixed order, and return the
    /// built catalog. Fails only on a content error (unparseable score);
    /// structural row errors are counted and skipped.
    pub fn ingest<R, S, T>(mut self, records: R, ratings: S, tags: T) -> Result<Catalog>
    where
        R: IntoIterator<Item = String>,
        S: IntoIterator<Item = String>,
        T: IntoIterator<Item = String>,
    {
        self.stats.started_at = Some(Utc::now());

        self.load_records(records.into_iter());
        self.load_ratings(ratings.into_iter())?;
        self.load_tags(tags.into_iter());

        self.stats.finished_at = Some(Utc::now());
        tracing::info!(
            "Ingestion completed: {} records ({} skipped, {} duplicates), {} ratings ({} skipped), {} tags ({} skipped)",
            self.stats.records_created,
            self.stats.records_skipped,
            self.stats.duplicates_skipped,
            self.stats.ratings_applied,
            self.stats.ratings_skipped,
            self.stats.tags_applied,
            self.stats.tags_skipped,
        );

        Ok(Catalog {
            store: self.store,
            names: self.names,
            stats: self.stats,
        })
    }

    fn load_records(&mut self, mut lines: impl Iterator<Item = String>) {
        let timer = Timer::new("records stream");
        lines.next(); // header

        for line in lines {
            let fields = match parser::split_line(&line) {
                Ok(fields) => fields,
                Err(e) => {
                    tracing::debug!("Skipping records row ({}): {:?}", e, line);
                    self.stats.records_skipped += 1;
                    continue;
                }
            };
            let Some(row) = RecordRow::from_fields(&fields) else {
                tracing::debug!("Skipping malformed records row: {:?}", line);
                self.stats.records_skipped += 1;
                continue;
            };

            let long_name = row.long_name.clone();
            let created = self.store.create_if_absent(
                row.id,
                row.short_name,
                row.long_name,
                row.positions,
                row.nationality,
                row.club,
                row.league,
            );
            if created {
                self.names.insert(&long_name, row.id);
                self.stats.records_created += 1;
            } else {
                tracing::debug!("Skipping duplicate record id {}", row.id);
                self.stats.duplicates_skipped += 1;
            }
        }

        timer.stop();
    }

    fn load_ratings(&mut self, mut lines: impl Iterator<Item = String>) -> Result<()> {
        let timer = Timer::new("ratings stream");
        lines.next(); // header

        for line in lines {
            let fields = match parser::split_line(&line) {
                Ok(fields) => fields,
                Err(e) => {
                    tracing::debug!("Skipping ratings row ({}): {:?}", e, line);
                    self.stats.ratings_skipped += 1;
                    continue;
                }
            };
            let Some(row) = RatingRow::from_fields(&fields) else {
                tracing::debug!("Skipping malformed ratings row: {:?}", line);
                self.stats.ratings_skipped += 1;
                continue;
            };
            // Unknown-record check runs before the numeric conversion, so
            // a bad score on an orphan row stays a silent skip.
            if !self.store.contains(row.record_id) {
                tracing::debug!("Skipping rating for unknown record {}", row.record_id);
                self.stats.ratings_skipped += 1;
                continue;
            }

            let score: f64 =
                row.score
                    .trim()
                    .parse()
                    .map_err(|_| CatalogError::InvalidScore {
                        stream: "ratings".to_string(),
                        line: line.clone(),
                    })?;

            self.store
                .add_contributor_rating(row.record_id, &row.contributor, score);
            self.stats.ratings_applied += 1;
        }

        timer.stop();
        Ok(())
    }

    fn load_tags(&mut self, mut lines: impl Iterator<Item = String>) {
        let timer = Timer::new("tags stream");
        lines.next(); // header

        for line in lines {
            let fields = match parser::split_line(&line) {
                Ok(fields) => fields,
                Err(e) => {
                    tracing::debug!("Skipping tags row ({}): {:?}", e, line);
                    self.stats.tags_skipped += 1;
                    continue;
                }
            };
            let Some(row) = TagRow::from_fields(&fields) else {
                tracing::debug!("Skipping malformed tags row: {:?}", line);
                self.stats.tags_skipped += 1;
                continue;
            };
            if !self.store.contains(row.record_id) {
                tracing::debug!("Skipping tag for unknown record {}", row.record_id);
                self.stats.tags_skipped += 1;
                continue;
            }

            self.store.append_tag(row.record_id, row.tag);
            self.stats.tags_applied += 1;
        }

        timer.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    const RECORDS_HEADER: &str =
        "sofifa_id,short_name,long_name,player_positions,nationality,club_name,league_name";
    const RATINGS_HEADER: &str = "user_id,sofifa_id,rating";
    const TAGS_HEADER: &str = "sofifa_id,tag";

    fn messi_row() -> &'static str {
        "1,L. Messi,Lionel Messi,\"RW, CF\",Argentina,Inter Miami,MLS"
    }

    #[test]
    fn ingests_a_record_with_quoted_positions() {
        let catalog = IngestionPipeline::new()
            .ingest(
                lines(&[RECORDS_HEADER, messi_row()]),
                lines(&[RATINGS_HEADER]),
                lines(&[TAGS_HEADER]),
            )
            .unwrap();

        let record = catalog.store.get(1).unwrap();
        assert_eq!(record.long_name, "Lionel Messi");
        assert_eq!(record.positions, vec!["RW", " CF"]);
        assert_eq!(record.rating_count, 0);
        assert_eq!(record.rating_mean, 0.0);
        assert!(catalog.names.lookup_prefix("Lionel").contains(&1));
        assert_eq!(catalog.stats.records_created, 1);
    }

    #[test]
    fn header_lines_are_discarded_unconditionally() {
        // The header would itself be a valid 7-field row if it were data.
        let catalog = IngestionPipeline::new()
            .ingest(
                lines(&["9,a,b,c,d,e,f", messi_row()]),
                lines(&[RATINGS_HEADER]),
                lines(&[TAGS_HEADER]),
            )
            .unwrap();

        assert!(catalog.store.get(9).is_none());
        assert!(catalog.store.get(1).is_some());
    }

    #[test]
    fn short_record_rows_are_skipped() {
        let catalog = IngestionPipeline::new()
            .ingest(
                lines(&[
                    RECORDS_HEADER,
                    "2,J. Doe,John Doe,ST,Nowhere,No Club", // six fields
                    messi_row(),
                ]),
                lines(&[RATINGS_HEADER]),
                lines(&[TAGS_HEADER]),
            )
            .unwrap();

        assert!(catalog.store.get(2).is_none());
        assert_eq!(catalog.stats.records_created, 1);
        assert_eq!(catalog.stats.records_skipped, 1);
    }

    #[test]
    fn duplicate_record_id_keeps_first_and_skips_trie_update() {
        let catalog = IngestionPipeline::new()
            .ingest(
                lines(&[
                    RECORDS_HEADER,
                    messi_row(),
                    "1,X. Impostor,Xavier Impostor,CB,Nowhere,No Club,No League",
                ]),
                lines(&[RATINGS_HEADER]),
                lines(&[TAGS_HEADER]),
            )
            .unwrap();

        assert_eq!(catalog.store.get(1).unwrap().long_name, "Lionel Messi");
        assert_eq!(catalog.stats.duplicates_skipped, 1);
        assert!(catalog.names.lookup_prefix("Xavier").is_empty());
    }

    #[test]
    fn ratings_fold_into_running_mean() {
        let catalog = IngestionPipeline::new()
            .ingest(
                lines(&[RECORDS_HEADER, messi_row()]),
                lines(&[RATINGS_HEADER, "u1,1,9.0", "u2,1,7.0"]),
                lines(&[TAGS_HEADER]),
            )
            .unwrap();

        let record = catalog.store.get(1).unwrap();
        assert_eq!(record.rating_count, 2);
        assert!((record.rating_mean - 8.0).abs() < 1e-9);
        assert_eq!(catalog.stats.ratings_applied, 2);
    }

    #[test]
    fn rating_for_unknown_record_is_skipped_without_side_effects() {
        let catalog = IngestionPipeline::new()
            .ingest(
                lines(&[RECORDS_HEADER, messi_row()]),
                lines(&[RATINGS_HEADER, "u1,999,9.0", "u1,1,6.0"]),
                lines(&[TAGS_HEADER]),
            )
            .unwrap();

        let record = catalog.store.get(1).unwrap();
        assert_eq!(record.rating_count, 1);
        assert!((record.rating_mean - 6.0).abs() < 1e-9);
        assert_eq!(catalog.stats.ratings_skipped, 1);
    }

    #[test]
    fn unparseable_score_is_fatal_and_identifies_the_stream() {
        let err = IngestionPipeline::new()
            .ingest(
                lines(&[RECORDS_HEADER, messi_row()]),
                lines(&[RATINGS_HEADER, "u1,1,excellent"]),
                lines(&[TAGS_HEADER]),
            )
            .unwrap_err();

        match err {
            CatalogError::InvalidScore { stream, line } => {
                assert_eq!(stream, "ratings");
                assert_eq!(line, "u1,1,excellent");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn bad_score_on_unknown_record_stays_a_skip() {
        let catalog = IngestionPipeline::new()
            .ingest(
                lines(&[RECORDS_HEADER, messi_row()]),
                lines(&[RATINGS_HEADER, "u1,999,excellent"]),
                lines(&[TAGS_HEADER]),
            )
            .unwrap();

        assert_eq!(catalog.stats.ratings_skipped, 1);
    }

    #[test]
    fn tags_attach_only_to_known_records() {
        let catalog = IngestionPipeline::new()
            .ingest(
                lines(&[RECORDS_HEADER, messi_row()]),
                lines(&[RATINGS_HEADER]),
                lines(&[TAGS_HEADER, "1,dribbler", "999,ghost", "1,finisher"]),
            )
            .unwrap();

        let record = catalog.store.get(1).unwrap();
        assert_eq!(record.tags, vec!["dribbler", "finisher"]);
        assert_eq!(catalog.stats.tags_applied, 2);
        assert_eq!(catalog.stats.tags_skipped, 1);
    }

    #[test]
    fn multi_quote_rows_are_structural_skips() {
        let catalog = IngestionPipeline::new()
            .ingest(
                lines(&[
                    RECORDS_HEADER,
                    "2,A. Name,\"A, Name\",\"ST, CF\",Nowhere,No Club,No League",
                    messi_row(),
                ]),
                lines(&[RATINGS_HEADER]),
                lines(&[TAGS_HEADER]),
            )
            .unwrap();

        assert!(catalog.store.get(2).is_none());
        assert_eq!(catalog.stats.records_skipped, 1);
        assert_eq!(catalog.stats.records_created, 1);
    }
}
