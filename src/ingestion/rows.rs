//! Strict tagged row types, one per input stream.
//!
//! Construction validates arity only and fails closed: a row with the
//! wrong field count (or an identifier that is not an integer) yields
//! `None` and is skipped by the pipeline as a structural error. Numeric
//! conversion of the rating score is deliberately NOT done here; that is
//! a content concern handled by the pipeline, where the fatal error can
//! carry the stream name and the raw line.

use crate::RecordId;

/// One row of the records stream: exactly seven fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordRow {
    pub id: RecordId,
    pub short_name: String,
    pub long_name: String,
    pub positions: Vec<String>,
    pub nationality: String,
    pub club: String,
    pub league: String,
}

impl RecordRow {
    pub const FIELD_COUNT: usize = 7;

    pub fn from_fields(fields: &[String]) -> Option<Self> {
        if fields.len() != Self::FIELD_COUNT {
            return None;
        }
        Some(Self {
            id: fields[0].parse().ok()?,
            short_name: fields[1].clone(),
            long_name: fields[2].clone(),
            positions: fields[3].split(',').map(str::to_string).collect(),
            nationality: fields[4].clone(),
            club: fields[5].clone(),
            league: fields[6].clone(),
        })
    }
}

/// One row of the ratings stream: contributor, record id, score.
/// Additional trailing fields are ignored. The score stays raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRow {
    pub contributor: String,
    pub record_id: RecordId,
    pub score: String,
}

impl RatingRow {
    pub const MIN_FIELD_COUNT: usize = 3;

    pub fn from_fields(fields: &[String]) -> Option<Self> {
        if fields.len() < Self::MIN_FIELD_COUNT {
            return None;
        }
        Some(Self {
            contributor: fields[0].clone(),
            record_id: fields[1].parse().ok()?,
            score: fields[2].clone(),
        })
    }
}

/// One row of the tags stream: record id, tag. Additional trailing fields
/// are ignored; the tag is kept verbatim, untrimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct TagRow {
    pub record_id: RecordId,
    pub tag: String,
}

impl TagRow {
    pub const MIN_FIELD_COUNT: usize = 2;

    pub fn from_fields(fields: &[String]) -> Option<Self> {
        if fields.len() < Self::MIN_FIELD_COUNT {
            return None;
        }
        Some(Self {
            record_id: fields[0].parse().ok()?,
            tag: fields[1].clone(),
        })
    }
}
