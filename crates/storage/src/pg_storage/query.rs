//! EpisodeQueryStore implementation for PgStorage.
//!
//! The filter is compiled into a parameterized WHERE clause: values inside one
//! category are OR-ed, categories are joined by the filter mode. Color and subject
//! predicates are `EXISTS` subqueries so the aggregated arrays always carry the
//! episode's full color and subject sets, not only the matching ones.

use async_trait::async_trait;
use paintlog_core::{CatalogStats, EpisodeFilter, EpisodeSummary};

use super::{PgStorage, contains_pattern, row_to_episode_summary};
use crate::error::StorageError;
use crate::traits::EpisodeQueryStore;

const EPISODE_SELECT: &str = "SELECT e.id, e.title, e.air_date, e.season_number, e.episode_number,
        COALESCE((SELECT array_agg(DISTINCT c.name ORDER BY c.name)
                    FROM episode_color ec JOIN color c ON c.id = ec.color_id
                   WHERE ec.episode_id = e.id), '{}'::text[]) AS colors,
        COALESCE((SELECT array_agg(DISTINCT s.name ORDER BY s.name)
                    FROM episode_subject es JOIN subject s ON s.id = es.subject_id
                   WHERE es.episode_id = e.id), '{}'::text[]) AS subjects
   FROM episode e";

const EPISODE_ORDER: &str = "ORDER BY e.air_date ASC NULLS LAST, e.id ASC";

/// SQL text plus its positional string binds, in `$1..$n` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EpisodeQuery {
    pub sql: String,
    pub binds: Vec<String>,
}

/// `(expr ILIKE $i OR expr ILIKE $j ...)`, pushing one bind per value.
fn or_group(expr: &str, values: &[String], binds: &mut Vec<String>) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|value| {
            binds.push(contains_pattern(value));
            format!("{expr} ILIKE ${}", binds.len())
        })
        .collect();
    format!("({})", parts.join(" OR "))
}

pub(crate) fn build_episode_query(filter: &EpisodeFilter) -> EpisodeQuery {
    let mut binds = Vec::new();
    let mut conditions = Vec::new();

    if !filter.months.is_empty() {
        conditions.push(or_group("TO_CHAR(e.air_date, 'FMMonth')", &filter.months, &mut binds));
    }
    if !filter.colors.is_empty() {
        let names = or_group("c.name", &filter.colors, &mut binds);
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM episode_color ec JOIN color c ON c.id = ec.color_id
                      WHERE ec.episode_id = e.id AND {names})"
        ));
    }
    if !filter.subjects.is_empty() {
        let names = or_group("s.name", &filter.subjects, &mut binds);
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM episode_subject es JOIN subject s ON s.id = es.subject_id
                      WHERE es.episode_id = e.id AND {names})"
        ));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(filter.mode.as_sql()))
    };
    EpisodeQuery { sql: format!("{EPISODE_SELECT}\n  {where_clause}\n  {EPISODE_ORDER}"), binds }
}

#[async_trait]
impl EpisodeQueryStore for PgStorage {
    async fn find_episodes(
        &self,
        filter: &EpisodeFilter,
    ) -> Result<Vec<EpisodeSummary>, StorageError> {
        let EpisodeQuery { sql, binds } = build_episode_query(filter);
        let mut query = sqlx::query(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }
        let rows = query.fetch_all(&self.pool).await?;
        tracing::debug!(matched = rows.len(), mode = ?filter.mode, "episode query");
        rows.iter().map(row_to_episode_summary).collect()
    }

    async fn catalog_stats(&self) -> Result<CatalogStats, StorageError> {
        let (episodes, colors, subjects, episode_colors, episode_subjects): (
            i64,
            i64,
            i64,
            i64,
            i64,
        ) = sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM episode),
                    (SELECT COUNT(*) FROM color),
                    (SELECT COUNT(*) FROM subject),
                    (SELECT COUNT(*) FROM episode_color),
                    (SELECT COUNT(*) FROM episode_subject)",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(CatalogStats { episodes, colors, subjects, episode_colors, episode_subjects })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintlog_core::FilterMode;

    fn normalized(sql: &str) -> String {
        sql.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn empty_filter_has_no_where_clause() {
        let query = build_episode_query(&EpisodeFilter::default());
        assert!(query.binds.is_empty());
        let sql = normalized(&query.sql);
        assert!(sql.ends_with("FROM episode e ORDER BY e.air_date ASC NULLS LAST, e.id ASC"));
    }

    #[test]
    fn values_within_a_category_are_ored() {
        let filter = EpisodeFilter::new(FilterMode::And).month("January").month("March");
        let query = build_episode_query(&filter);
        assert_eq!(query.binds, vec!["%January%", "%March%"]);
        assert!(normalized(&query.sql).contains(
            "WHERE (TO_CHAR(e.air_date, 'FMMonth') ILIKE $1 OR TO_CHAR(e.air_date, 'FMMonth') ILIKE $2)"
        ));
    }

    #[test]
    fn categories_are_joined_by_mode() {
        let and = build_episode_query(
            &EpisodeFilter::new(FilterMode::And).month("January").color("red"),
        );
        let or = build_episode_query(
            &EpisodeFilter::new(FilterMode::Or).month("January").color("red"),
        );
        assert!(normalized(&and.sql).contains("ILIKE $1) AND EXISTS"));
        assert!(normalized(&or.sql).contains("ILIKE $1) OR EXISTS"));
        assert_eq!(and.binds, or.binds);
    }

    #[test]
    fn placeholders_are_numbered_across_categories() {
        let filter = EpisodeFilter::new(FilterMode::Or)
            .month("May")
            .color("blue")
            .color("white")
            .subject("tree");
        let query = build_episode_query(&filter);
        assert_eq!(query.binds, vec!["%May%", "%blue%", "%white%", "%tree%"]);
        let sql = normalized(&query.sql);
        assert!(sql.contains("(c.name ILIKE $2 OR c.name ILIKE $3)"));
        assert!(sql.contains("(s.name ILIKE $4)"));
    }

    #[test]
    fn user_wildcards_are_escaped() {
        let query = build_episode_query(&EpisodeFilter::default().color("100%"));
        assert_eq!(query.binds, vec!["%100\\%%"]);
    }
}
