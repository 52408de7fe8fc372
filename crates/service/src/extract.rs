//! Extractors for the three episode sources.
//!
//! Each extractor turns raw text into typed, row-indexed records and nothing more:
//! cleaning happens in [`crate::transform`]. A malformed row is logged and skipped;
//! only an unusable file as a whole is an error.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;

use crate::error::{ExtractError, ServiceError};
use crate::list_literal::parse_list_literal;

/// Separator between the title (with embedded date) and the free-text description.
const DESCRIPTION_SEPARATOR: &str = " - ";

/// One line of the free-text air date source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLine {
    pub line: usize,
    /// Title candidate, still carrying quotes and the parenthesized date.
    pub title: String,
    pub description: String,
}

/// One row of the color source with its list literal already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSourceRow {
    pub row: usize,
    pub title: String,
    pub season: Option<String>,
    pub episode: Option<String>,
    /// Raw color names; empty when the list literal was malformed.
    pub colors: Vec<String>,
}

/// One row of the wide subject matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideSubjectRow {
    pub row: usize,
    pub title: String,
    pub episode_code: Option<String>,
    /// `(lowercased column header, raw cell)` for every subject column.
    pub indicators: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
struct ColorCsvRow {
    painting_title: String,
    colors: String,
    #[serde(default)]
    season: Option<String>,
    #[serde(default)]
    episode: Option<String>,
}

/// Split one free-text line into title candidate and description.
///
/// Everything left of the first `" - "` is the title, whatever commas it holds.
#[must_use]
pub fn split_date_line(line: &str) -> (String, String) {
    match line.split_once(DESCRIPTION_SEPARATOR) {
        Some((title, description)) => (title.trim().to_owned(), description.trim().to_owned()),
        None => (line.trim().to_owned(), String::new()),
    }
}

/// Parse the free-text source. Blank lines are skipped.
#[must_use]
pub fn parse_date_lines(text: &str) -> Vec<DateLine> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line, raw)| {
            let (title, description) = split_date_line(raw);
            DateLine { line, title, description }
        })
        .collect()
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new().flexible(true).trim(Trim::All).from_reader(reader)
}

/// Lowercase and trim every header so lookups are case-insensitive.
fn normalized_headers<R: Read>(reader: &mut csv::Reader<R>) -> Result<StringRecord, ExtractError> {
    let headers: StringRecord = reader
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_lowercase())
        .collect();
    reader.set_headers(headers.clone());
    Ok(headers)
}

fn require_column(
    headers: &StringRecord,
    source_name: &'static str,
    column: &'static str,
) -> Result<usize, ExtractError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or(ExtractError::MissingColumn { source_name, column })
}

/// Parse the color source: `painting_title`, `colors` and optional `season`/`episode`.
pub fn read_color_rows<R: Read>(reader: R) -> Result<Vec<ColorSourceRow>, ExtractError> {
    let mut reader = csv_reader(reader);
    let headers = normalized_headers(&mut reader)?;
    require_column(&headers, "colors", "painting_title")?;
    require_column(&headers, "colors", "colors")?;

    let mut rows = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let parsed = record.and_then(|r| r.deserialize::<ColorCsvRow>(Some(&headers)));
        let raw = match parsed {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(row, error = %e, "skipping malformed color row");
                continue;
            },
        };
        let colors = parse_list_literal(&raw.colors).unwrap_or_else(|e| {
            tracing::warn!(row, title = %raw.painting_title, error = %e, "unparseable color list, using empty list");
            Vec::new()
        });
        rows.push(ColorSourceRow {
            row,
            title: raw.painting_title,
            season: raw.season,
            episode: raw.episode,
            colors,
        });
    }
    Ok(rows)
}

/// Parse the wide subject matrix: `title`, optional `episode`, one column per subject.
pub fn read_subject_rows<R: Read>(reader: R) -> Result<Vec<WideSubjectRow>, ExtractError> {
    let mut reader = csv_reader(reader);
    let headers = normalized_headers(&mut reader)?;
    let title_idx = require_column(&headers, "subjects", "title")?;
    let episode_idx = headers.iter().position(|h| h == "episode");

    let mut rows = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(row, error = %e, "skipping malformed subject row");
                continue;
            },
        };
        if record.len() != headers.len() {
            tracing::warn!(
                row,
                expected = headers.len(),
                found = record.len(),
                "skipping subject row with wrong column count"
            );
            continue;
        }
        let Some(title) = record.get(title_idx) else {
            continue;
        };
        let indicators = headers
            .iter()
            .zip(record.iter())
            .enumerate()
            .filter(|(idx, (header, _))| {
                *idx != title_idx && Some(*idx) != episode_idx && !header.is_empty()
            })
            .map(|(_, (header, cell))| (header.to_owned(), cell.to_owned()))
            .collect();
        rows.push(WideSubjectRow {
            row,
            title: title.to_owned(),
            episode_code: episode_idx.and_then(|idx| record.get(idx)).map(str::to_owned),
            indicators,
        });
    }
    Ok(rows)
}

fn open(path: &Path) -> Result<File, ServiceError> {
    File::open(path).map_err(|source| ServiceError::Io { path: path.to_path_buf(), source })
}

/// Read the free-text air date file. Invalid UTF-8 is replaced, not fatal.
pub fn extract_dates(path: &Path) -> Result<Vec<DateLine>, ServiceError> {
    let bytes =
        std::fs::read(path).map_err(|source| ServiceError::Io { path: path.to_path_buf(), source })?;
    let lines = parse_date_lines(&String::from_utf8_lossy(&bytes));
    tracing::info!(path = %path.display(), rows = lines.len(), "extracted air date lines");
    Ok(lines)
}

pub fn extract_colors(path: &Path) -> Result<Vec<ColorSourceRow>, ServiceError> {
    let rows = read_color_rows(open(path)?)
        .map_err(|source| ServiceError::Extract { path: path.to_path_buf(), source })?;
    tracing::info!(path = %path.display(), rows = rows.len(), "extracted color rows");
    Ok(rows)
}

pub fn extract_subjects(path: &Path) -> Result<Vec<WideSubjectRow>, ServiceError> {
    let rows = read_subject_rows(open(path)?)
        .map_err(|source| ServiceError::Extract { path: path.to_path_buf(), source })?;
    tracing::info!(path = %path.display(), rows = rows.len(), "extracted subject rows");
    Ok(rows)
}
