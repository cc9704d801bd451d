//! Destination Search - travel destination search and recommendation service
//!
//! Turns free-text queries with optional filters, or a stored traveller
//! profile combined with global trends, into scored queries against an
//! Elasticsearch document index and shapes the ranked hits for callers.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{TravelEngine, EngineError, QueryError, StructuredQuery, build_search_query, compose_recommendation_query, format_hits};
pub use models::{Destination, UserProfile, Trend, ScoredResult, SearchRequest};
pub use services::{DocumentIndex, ElasticsearchClient, IndexError};
