//! # Utilities Module
//!
//! ## Purpose
//! Small helpers shared across the engine: load-phase timing, token noise
//! trimming used by the query layer, and buffered line reading for the
//! binary and the integration tests.

use crate::errors::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

/// Performance timer for measuring operation duration
pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    /// Start a new timer with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Stop timer and log duration
    pub fn stop(self) -> u64 {
        let elapsed = self.elapsed_ms();
        tracing::debug!("Timer '{}' completed in {}ms", self.name, elapsed);
        elapsed
    }
}

/// Text processing utilities
pub struct TextUtils;

impl TextUtils {
    /// Strip surrounding double quotes and whitespace from a token.
    /// Position codes and tags arrive with this noise from the source
    /// files; comparisons happen on the trimmed form while storage keeps
    /// the verbatim one.
    pub fn trim_noise(token: &str) -> &str {
        token.trim_matches(|c: char| c.is_whitespace() || c == '"')
    }
}

/// Open `path` and iterate its lines, dropping any unreadable tail.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<impl Iterator<Item = String>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file).lines().map_while(|line| line.ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_noise_strips_quotes_and_whitespace() {
        assert_eq!(TextUtils::trim_noise(" \"ST\" "), "ST");
        assert_eq!(TextUtils::trim_noise("\" CF\""), "CF");
        assert_eq!(TextUtils::trim_noise("RW"), "RW");
        assert_eq!(TextUtils::trim_noise(" \" \" "), "");
    }

    #[test]
    fn trim_noise_keeps_interior_characters() {
        assert_eq!(TextUtils::trim_noise("\"a \"b\" c\""), "a \"b\" c");
    }
}
