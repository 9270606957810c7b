//! # Interactive Command Module
//!
//! ## Purpose
//! Parses one line of user input into a typed query command and renders
//! query results as fixed-width tables (or JSON when toggled). The query
//! engine itself never formats anything; result-message choices for empty
//! lists live here.
//!
//! ## Command Forms
//! - `player <token>`: substring search over name words
//! - `name <prefix>`: trie-accelerated prefix search
//! - `user <contributor>`: that contributor's rated records
//! - `top<N> '<position>'`: top N by position (quotes optional)
//! - `tags '<tag>' ['<tag>' ...]`: tag-intersection search
//! - `json`: toggle JSON output; `exit`: quit

use crate::errors::Result;
use crate::store::Record;
use regex::Regex;

/// One parsed user command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Player(String),
    Name(String),
    User(String),
    Top { limit: usize, position: String },
    Tags(Vec<String>),
    Json,
    Exit,
}

/// Parse one input line; `None` means the line is not a valid command.
pub fn parse_command(input: &str) -> Option<Command> {
    let input = input.trim();

    match input {
        "exit" => return Some(Command::Exit),
        "json" => return Some(Command::Json),
        _ => {}
    }

    if let Some(rest) = input.strip_prefix("player ") {
        let token = rest.trim();
        return (!token.is_empty()).then(|| Command::Player(token.to_string()));
    }
    if let Some(rest) = input.strip_prefix("name ") {
        let token = rest.trim();
        return (!token.is_empty()).then(|| Command::Name(token.to_string()));
    }
    if let Some(rest) = input.strip_prefix("user ") {
        let contributor = rest.trim();
        return (!contributor.is_empty()).then(|| Command::User(contributor.to_string()));
    }
    if input.starts_with("top") {
        let re = Regex::new(r"^top(\d+)\s+'?([^']+?)'?$").ok()?;
        let caps = re.captures(input)?;
        let limit = caps[1].parse().ok()?;
        return Some(Command::Top {
            limit,
            position: caps[2].trim().to_string(),
        });
    }
    if let Some(rest) = input.strip_prefix("tags ") {
        let re = Regex::new(r"'([^']*)'").ok()?;
        let tags: Vec<String> = re
            .captures_iter(rest)
            .map(|caps| caps[1].to_string())
            .collect();
        return (!tags.is_empty()).then_some(Command::Tags(tags));
    }

    None
}

/// Renders result lists as aligned tables, or JSON when toggled.
#[derive(Debug, Default)]
pub struct Renderer {
    json: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the output mode; returns whether JSON is now active.
    pub fn toggle_json(&mut self) -> bool {
        self.json = !self.json;
        self.json
    }

    /// Render a record list for the name/top/tags queries.
    pub fn render_records(&self, records: &[&Record]) -> Result<String> {
        if records.is_empty() {
            return Ok("No players matched the query.".to_string());
        }
        if self.json {
            return Ok(serde_json::to_string_pretty(records)?);
        }

        let mut out = format!(
            "{:<10} {:<20} {:<45} {:<20} {:<10} {:<6}\n",
            "sofifa_id", "short_name", "long_name", "player_positions", "rating", "count"
        );
        for record in records {
            out.push_str(&format!(
                "{:<10} {:<20} {:<45} {:<20} {:<10.6} {:<6}\n",
                record.id,
                record.short_name,
                record.long_name,
                record.positions.join(","),
                record.rating_mean,
                record.rating_count
            ));
        }
        Ok(out)
    }

    /// Render the per-contributor result: their score next to each
    /// record's overall aggregates.
    pub fn render_contributor(&self, rows: &[(f64, &Record)]) -> Result<String> {
        if rows.is_empty() {
            return Ok("No ratings found for that user.".to_string());
        }
        if self.json {
            return Ok(serde_json::to_string_pretty(rows)?);
        }

        let mut out = format!(
            "{:<10} {:<20} {:<45} {:<15} {:<8} {:<10}\n",
            "sofifa_id", "short_name", "long_name", "global_rating", "count", "rating"
        );
        for (score, record) in rows {
            out.push_str(&format!(
                "{:<10} {:<20} {:<45} {:<15.6} {:<8} {:<10.1}\n",
                record.id,
                record.short_name,
                record.long_name,
                record.rating_mean,
                record.rating_count,
                score
            ));
        }
        Ok(out)
    }
}
