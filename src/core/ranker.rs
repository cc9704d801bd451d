use crate::models::ScoredResult;
use crate::services::Hit;

/// Project raw hits into scored results
///
/// Keeps hit order, count and every stored field exactly as returned; the
/// ordering was already decided by the query. A stored `score` field is
/// dropped in favour of the engine score.
pub fn format_hits(hits: Vec<Hit>) -> Vec<ScoredResult> {
    hits.into_iter()
        .map(|hit| ScoredResult {
            score: hit.score,
            fields: hit
                .source
                .into_iter()
                .filter(|(key, _)| key != "score")
                .collect(),
        })
        .collect()
}
