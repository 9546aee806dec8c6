//! Git commit object text and the fields derived from it
//!
//! ## Format
//!
//! ```text
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <title>
//! <more title paragraph>
//!
//! <description>
//! ```
//!
//! Paragraphs are separated by a blank line. The title is the first line of
//! the first message paragraph and the description the first line of the
//! second one.

use crate::errors::GitInfoError;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Timezone used when neither an override nor the author line provides one
pub const DEFAULT_TIMEZONE: &str = "+0800";

/// Largest accepted author timestamp (32-bit Unix epoch ceiling)
pub const MAX_TIMESTAMP: i64 = 2_147_483_647;

const AUTHOR_PREFIX: &str = "author ";
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Decoded payload of a commit object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitText(String);

impl CommitText {
    pub fn new(text: impl Into<String>) -> Self {
        CommitText(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First line starting with `author `
    pub fn author_line(&self) -> Result<AuthorLine<'_>, GitInfoError> {
        self.0
            .split('\n')
            .find(|line| line.starts_with(AUTHOR_PREFIX))
            .map(AuthorLine)
            .ok_or(GitInfoError::MissingAuthorLine)
    }

    /// First line of the first message paragraph, or `""`
    pub fn title(&self) -> &str {
        self.paragraph_first_line(1)
    }

    /// First line of the second message paragraph, or `""`
    pub fn description(&self) -> &str {
        self.paragraph_first_line(2)
    }

    // paragraph 0 is the header block
    fn paragraph_first_line(&self, index: usize) -> &str {
        self.0
            .split(PARAGRAPH_SEPARATOR)
            .nth(index)
            .and_then(|paragraph| paragraph.split('\n').next())
            .unwrap_or("")
    }
}

impl std::fmt::Display for CommitText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `author <name> <email> <unix-timestamp> <tz-offset>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorLine<'t>(&'t str);

impl<'t> AuthorLine<'t> {
    fn tokens(&self) -> Vec<&'t str> {
        self.0.split_whitespace().skip(1).collect()
    }

    /// Second-to-last token, if the line has one
    pub fn timestamp_token(&self) -> Option<&'t str> {
        let tokens = self.tokens();
        tokens.len().checked_sub(2).map(|i| tokens[i])
    }

    /// Last token, if the line has at least a timestamp before it
    pub fn timezone_token(&self) -> Option<&'t str> {
        let tokens = self.tokens();
        if tokens.len() < 2 {
            return None;
        }
        tokens.last().copied()
    }

    /// Parse the timestamp, rejecting anything outside `0..=MAX_TIMESTAMP`
    pub fn timestamp(&self) -> Result<i64, GitInfoError> {
        let token = self.timestamp_token().unwrap_or_default();

        match token.parse::<i64>() {
            Ok(timestamp) if (0..=MAX_TIMESTAMP).contains(&timestamp) => Ok(timestamp),
            _ => Err(GitInfoError::InvalidTimestamp(token.to_string())),
        }
    }
}

/// Signed timezone offset in seconds, parsed from `±HHMM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TzOffset(i32);

impl TzOffset {
    pub fn parse(value: &str) -> Result<Self, GitInfoError> {
        let invalid = || GitInfoError::InvalidTimezone(value.to_string());
        let bytes = value.as_bytes();

        if bytes.len() != 5 || !bytes[1..].iter().all(u8::is_ascii_digit) {
            return Err(invalid());
        }
        let sign = match bytes[0] {
            b'+' => 1,
            b'-' => -1,
            _ => return Err(invalid()),
        };

        let hours: i32 = value[1..3].parse().map_err(|_| invalid())?;
        let minutes: i32 = value[3..5].parse().map_err(|_| invalid())?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }

        Ok(TzOffset(sign * (hours * 3600 + minutes * 60)))
    }

    /// Resolve the effective offset: non-empty override, then the author
    /// line's token, then [`DEFAULT_TIMEZONE`]
    pub fn resolve(tz_override: &str, author_tz: Option<&str>) -> Result<Self, GitInfoError> {
        let tz = Some(tz_override)
            .filter(|tz| !tz.is_empty())
            .or(author_tz.filter(|tz| !tz.is_empty()))
            .unwrap_or(DEFAULT_TIMEZONE);

        Self::parse(tz)
    }

    pub fn seconds(&self) -> i32 {
        self.0
    }

    pub fn to_fixed_offset(&self) -> Result<FixedOffset, GitInfoError> {
        FixedOffset::east_opt(self.0)
            .ok_or_else(|| GitInfoError::InvalidTimezone(self.0.to_string()))
    }
}

/// Structured fields derived from a commit's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub timestamp: i64,
    pub tz: TzOffset,
    pub commit_date: DateTime<FixedOffset>,
    pub title: String,
    pub description: String,
}

impl CommitInfo {
    /// Derive the commit date, title and description from `text`
    ///
    /// # Arguments
    ///
    /// * `text` - Decoded commit payload
    /// * `tz_override` - Configured timezone; empty means "use the author's"
    pub fn parse(text: &CommitText, tz_override: &str) -> Result<Self, GitInfoError> {
        let author = text.author_line()?;
        let timestamp = author.timestamp()?;
        let tz = TzOffset::resolve(tz_override, author.timezone_token())?;

        let commit_date = DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| GitInfoError::InvalidTimestamp(timestamp.to_string()))?
            .with_timezone(&tz.to_fixed_offset()?);

        Ok(CommitInfo {
            timestamp,
            tz,
            commit_date,
            title: text.title().to_string(),
            description: text.description().to_string(),
        })
    }
}
