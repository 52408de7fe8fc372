//! Per-source cleaning: extracted rows in, typed catalog records out.
//!
//! The three transforms share nothing but the text helpers from `paintlog_core`;
//! they can run in any order.

use std::collections::HashSet;

use paintlog_core::{
    ColorRow, EpisodeCode, EpisodeRecord, SubjectRow, coerce_int, collapse_whitespace,
    first_parenthesized, parse_air_date, strip_parenthesized, strip_quotes, title_case,
};

use crate::extract::{ColorSourceRow, DateLine, WideSubjectRow};

const TRUTHY: &[&str] = &["1", "1.0", "true", "yes", "y", "t"];

/// Whether an indicator cell marks the subject as present.
#[must_use]
pub fn is_truthy(cell: &str) -> bool {
    let cell = cell.trim();
    TRUTHY.iter().any(|t| cell.eq_ignore_ascii_case(t))
}

/// Display title: quotes stripped, whitespace collapsed, title-cased.
fn display_title(raw: &str) -> String {
    title_case(&collapse_whitespace(&strip_quotes(raw)))
}

/// Clean the free-text date lines into episode records.
pub fn transform_episodes(lines: Vec<DateLine>) -> Vec<EpisodeRecord> {
    lines
        .into_iter()
        .filter_map(|line| {
            let air_date = first_parenthesized(&line.title).and_then(parse_air_date);
            if air_date.is_none() {
                tracing::debug!(line = line.line, title = %line.title, "no parseable air date");
            }
            let title = display_title(&strip_parenthesized(&line.title));
            if title.is_empty() {
                tracing::warn!(line = line.line, raw = %line.title, "skipping episode with empty title");
                return None;
            }
            let code = EpisodeCode::find(&line.title).or_else(|| EpisodeCode::find(&line.description));
            Some(EpisodeRecord {
                title,
                description: line.description,
                air_date,
                season: code.map(|c| c.season),
                episode: code.map(|c| c.episode),
            })
        })
        .collect()
}

/// Normalize color names and coerce the season/episode cells.
pub fn transform_colors(rows: Vec<ColorSourceRow>) -> Vec<ColorRow> {
    rows.into_iter()
        .map(|row| {
            let mut seen = HashSet::new();
            let colors = row
                .colors
                .iter()
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty() && seen.insert(c.clone()))
                .collect();
            ColorRow {
                row: row.row,
                title: row.title,
                season: row.season.as_deref().and_then(coerce_int),
                episode: row.episode.as_deref().and_then(coerce_int),
                colors,
            }
        })
        .collect()
}

/// Melt the wide subject matrix into one row per truthy (episode, subject) cell.
pub fn transform_subjects(rows: Vec<WideSubjectRow>) -> Vec<SubjectRow> {
    let mut long = Vec::new();
    for wide in rows {
        let title = display_title(&wide.title);
        if title.is_empty() {
            tracing::warn!(row = wide.row, "skipping subject row with empty title");
            continue;
        }
        let episode_code = wide.episode_code.as_deref().and_then(EpisodeCode::find);
        for (header, cell) in &wide.indicators {
            if !is_truthy(cell) {
                continue;
            }
            let subject = header.trim().to_lowercase();
            if subject.is_empty() {
                continue;
            }
            long.push(SubjectRow { row: wide.row, title: title.clone(), episode_code, subject });
        }
    }
    long
}
