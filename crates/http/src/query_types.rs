//! Request/query types

use paintlog_core::{EpisodeFilter, FilterMode};

/// Build an [`EpisodeFilter`] from raw `/episodes` query pairs.
///
/// `month`, `color` and `subject` may repeat; blank values are dropped. The last
/// `mode` wins. Unknown keys are ignored.
pub fn episode_filter(pairs: &[(String, String)]) -> EpisodeFilter {
    let mode = pairs.iter().rev().find(|(key, _)| key == "mode").map(|(_, value)| value.as_str());
    pairs.iter().fold(EpisodeFilter::new(FilterMode::from_param(mode)), |filter, (key, value)| {
        match key.as_str() {
            "month" => filter.month(value.as_str()),
            "color" => filter.color(value.as_str()),
            "subject" => filter.subject(value.as_str()),
            _ => filter,
        }
    })
}
