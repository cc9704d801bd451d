// Core relevance engine exports
pub mod engine;
pub mod error;
pub mod query;
pub mod ranker;
pub mod recommend;
pub mod search;

pub use engine::{TravelEngine, EngineError, MAX_LIMIT};
pub use error::QueryError;
pub use query::{Clause, BoolQuery, BoostedField, Fuzziness, Operator, SortClause, SortOrder, StructuredQuery};
pub use ranker::format_hits;
pub use recommend::{budget_ceiling, compose_recommendation_query, signal_clauses, RecommendationPlan};
pub use search::{build_search_query, build_reviews_query, filter_clauses, normalize_text, SearchFilters, SortField};
