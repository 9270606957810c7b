//! # Tabular Line Parser Module
//!
//! ## Purpose
//! Splits one raw line of a comma-delimited dataset into its ordered field
//! strings, tolerating a single quoted span that may itself contain commas
//! (the records dataset quotes its position list this way).
//!
//! ## Input/Output Specification
//! - **Input**: one line of text, with or without a trailing terminator
//! - **Output**: ordered field strings, quoted span unwrapped verbatim
//! - **Quoting rule**: a span is introduced by a comma immediately followed
//!   by a double quote and terminated by a double quote immediately
//!   followed by a comma or by the end of the line
//!
//! ## Known Limitation
//! Lines containing more than one quoted span are not supported. The legacy
//! splitting behavior for such rows was ambiguous, so they are reported as
//! [`SplitError::MultipleQuotedSpans`] and skipped by the ingestion
//! pipeline rather than silently miscomputed. A quoted span that never
//! terminates is likewise rejected.

use thiserror::Error;

/// Rejected line shapes. The ingestion pipeline treats both as structural
/// row errors: the line is counted and skipped, never a fatal failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("more than one quoted span in line")]
    MultipleQuotedSpans,
    #[error("quoted span is never terminated")]
    UnterminatedQuote,
}

/// Split one line into its fields.
///
/// The trailing line terminator is stripped before splitting, so callers
/// may pass lines straight from a reader that keeps `\r`.
pub fn split_line(line: &str) -> Result<Vec<String>, SplitError> {
    let line = line.trim_end_matches(|c| c == '\n' || c == '\r');

    let mut spans = line.split(",\"");
    let head = spans.next().unwrap_or("");
    let quoted = spans.next();
    if spans.next().is_some() {
        return Err(SplitError::MultipleQuotedSpans);
    }

    let rest = match quoted {
        None => return Ok(line.split(',').map(str::to_string).collect()),
        Some(rest) => rest,
    };

    let mut fields: Vec<String> = head.split(',').map(str::to_string).collect();
    if let Some(end) = rest.find("\",") {
        fields.push(rest[..end].to_string());
        fields.extend(rest[end + 2..].split(',').map(str::to_string));
    } else if let Some(inner) = rest.strip_suffix('"') {
        fields.push(inner.to_string());
    } else {
        return Err(SplitError::UnterminatedQuote);
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_plain_line_on_every_comma() {
        let fields = split_line("1,L. Messi,Lionel Messi,RW,Argentina").unwrap();
        assert_eq!(fields, vec!["1", "L. Messi", "Lionel Messi", "RW", "Argentina"]);
    }

    #[test]
    fn quoted_span_keeps_embedded_commas() {
        let fields = split_line("1,L. Messi,Lionel Messi,\"RW, ST, CF\",Argentina,Inter Miami,MLS")
            .unwrap();
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[3], "RW, ST, CF");
        assert_eq!(fields[4], "Argentina");
    }

    #[test]
    fn quoted_span_at_end_of_line() {
        let fields = split_line("158023,\"RW, CF\"").unwrap();
        assert_eq!(fields, vec!["158023", "RW, CF"]);
    }

    #[test]
    fn trailing_terminator_is_stripped() {
        let fields = split_line("a,b,c\r\n").unwrap();
        assert_eq!(fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_trailing_field_is_preserved() {
        let fields = split_line("1,\"RW, CF\",").unwrap();
        assert_eq!(fields, vec!["1", "RW, CF", ""]);
    }

    #[test]
    fn rejects_multiple_quoted_spans() {
        let err = split_line("1,\"a, b\",x,\"c, d\",y").unwrap_err();
        assert_eq!(err, SplitError::MultipleQuotedSpans);
    }

    #[test]
    fn rejects_unterminated_quote() {
        let err = split_line("1,\"RW, CF").unwrap_err();
        assert_eq!(err, SplitError::UnterminatedQuote);
    }

    #[test]
    fn quote_not_preceded_by_comma_is_not_a_span() {
        let fields = split_line("1,ab\"cd,e").unwrap();
        assert_eq!(fields, vec!["1", "ab\"cd", "e"]);
    }
}
