//! Episode catalog records, from raw source rows to query results.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EPISODE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bS(\d{1,3})\s*E(\d{1,3})\b").unwrap());

/// Date formats seen in the free-text air date source, tried in order.
const AIR_DATE_FORMATS: &[&str] = &["%B %d, %Y", "%B %d %Y", "%d %B %Y", "%Y-%m-%d", "%m/%d/%Y"];

/// Season/episode pair written as `S01E05`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpisodeCode {
    pub season: i32,
    pub episode: i32,
}

impl EpisodeCode {
    /// Find the first `S{season}E{episode}` token in `text`.
    #[must_use]
    pub fn find(text: &str) -> Option<Self> {
        let caps = EPISODE_CODE.captures(text)?;
        let season = caps.get(1)?.as_str().parse().ok()?;
        let episode = caps.get(2)?.as_str().parse().ok()?;
        Some(Self { season, episode })
    }
}

impl fmt::Display for EpisodeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}E{:02}", self.season, self.episode)
    }
}

/// Parse a free-text broadcast date such as `January 11, 1983` or `Jan. 1, 1983`.
///
/// Returns `None` for anything unparseable; never an error.
#[must_use]
pub fn parse_air_date(text: &str) -> Option<NaiveDate> {
    let cleaned = crate::title::collapse_whitespace(&text.replace('.', " ")).replace(" ,", ",");
    AIR_DATE_FORMATS.iter().find_map(|fmt| NaiveDate::parse_from_str(&cleaned, fmt).ok())
}

/// Coerce a spreadsheet cell (`"3"`, `"3.0"`, `" 3 "`) into an integer.
#[must_use]
pub fn coerce_int(cell: &str) -> Option<i32> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<i32>() {
        return Some(n);
    }
    let float = trimmed.parse::<f64>().ok()?;
    if float.fract() != 0.0 || !float.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, reason = "range checked below")]
    let n = float as i64;
    i32::try_from(n).ok()
}

/// Cleaned row from the free-text air date source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Title-cased display title with the embedded date removed.
    pub title: String,
    pub description: String,
    pub air_date: Option<NaiveDate>,
    pub season: Option<i32>,
    pub episode: Option<i32>,
}

/// Cleaned row from the color source: one episode with its color list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRow {
    /// Zero-based data row index in the source file, for diagnostics.
    pub row: usize,
    pub title: String,
    pub season: Option<i32>,
    pub episode: Option<i32>,
    /// Lowercased, trimmed, de-duplicated color names.
    pub colors: Vec<String>,
}

/// One long-format (episode, subject) pair from the subject matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRow {
    pub row: usize,
    pub title: String,
    pub episode_code: Option<EpisodeCode>,
    pub subject: String,
}

/// Insert payload for the `episode` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEpisode {
    pub title: String,
    pub air_date: Option<NaiveDate>,
    pub season: Option<i32>,
    pub episode: Option<i32>,
}

impl From<&EpisodeRecord> for NewEpisode {
    fn from(record: &EpisodeRecord) -> Self {
        Self {
            title: record.title.clone(),
            air_date: record.air_date,
            season: record.season,
            episode: record.episode,
        }
    }
}

/// An episode with its aggregated colors and subjects, as served by `/episodes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub id: i32,
    pub title: String,
    /// Serialized as an ISO `YYYY-MM-DD` date, or `null`.
    pub date: Option<NaiveDate>,
    pub season: Option<i32>,
    pub episode: Option<i32>,
    pub colors: Vec<String>,
    pub subjects: Vec<String>,
}

/// Row counts across the catalog schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub episodes: i64,
    pub colors: i64,
    pub subjects: i64,
    pub episode_colors: i64,
    pub episode_subjects: i64,
}
