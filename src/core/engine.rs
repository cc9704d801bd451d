use crate::config::IndexSettings;
use crate::core::error::QueryError;
use crate::core::query::{Clause, StructuredQuery};
use crate::core::ranker::format_hits;
use crate::core::recommend::{compose_recommendation_query, profile_lookup_query, trends_query, RecommendationPlan};
use crate::core::search::{build_reviews_query, build_search_query, normalize_text, SortField};
use crate::models::{
    DestinationDetailsResponse, Interaction, InteractionRequest, InteractionType, ReviewsQuery,
    SaveRecommendationRequest, SavedRecommendation, ScoredResult, SearchRequest, Trend, UserProfile,
};
use crate::services::{DocumentIndex, IndexError};
use serde_json::Value;
use thiserror::Error;

/// Largest page a caller may request
pub const MAX_LIMIT: u16 = 100;

/// Errors surfaced to callers of the engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Document index unavailable: {0}")]
    IndexUnavailable(#[from] IndexError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Request orchestration over an injected document index
///
/// Holds no mutable state; every call is an independent round trip.
pub struct TravelEngine<I> {
    index: I,
    indices: IndexSettings,
    trend_limit: usize,
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, QueryError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(QueryError::MissingRequiredInput(name))
}

fn apply_limit(query: StructuredQuery, limit: Option<u16>) -> StructuredQuery {
    match limit {
        Some(limit) => query.with_size(u64::from(limit.min(MAX_LIMIT))),
        None => query,
    }
}

impl<I: DocumentIndex> TravelEngine<I> {
    pub fn new(index: I, indices: IndexSettings, trend_limit: usize) -> Self {
        Self {
            index,
            indices,
            trend_limit,
        }
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    /// Free-text destination search
    ///
    /// Blank text answers with an empty list without touching the index.
    /// Input errors are reported before any round trip; index faults are
    /// surfaced, never turned into an empty list.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<ScoredResult>, EngineError> {
        let Some(text) = normalize_text(&request.q) else {
            tracing::debug!("Empty search text, skipping index");
            return Ok(Vec::new());
        };

        let sort = SortField::parse_optional(request.sort.as_deref())?;
        let query = apply_limit(build_search_query(text, &request.filters(), sort)?, request.limit);

        let response = self
            .index
            .search(&self.indices.destinations, &query.to_body())
            .await?;

        tracing::info!(
            "Search {:?} returned {} hits (total {})",
            text,
            response.hits.len(),
            response.total
        );

        Ok(format_hits(response.hits))
    }

    /// Load the user's profile and the trend set, and compose their query
    pub async fn build_recommendation_query(
        &self,
        user_id: &str,
    ) -> Result<RecommendationPlan, IndexError> {
        let profiles = self
            .index
            .search(&self.indices.user_profiles, &profile_lookup_query(user_id).to_body())
            .await?;

        let Some(hit) = profiles.hits.into_iter().next() else {
            return Ok(RecommendationPlan::NoProfile);
        };
        let profile: UserProfile = serde_json::from_value(Value::Object(hit.source))?;

        let trend_hits = self
            .index
            .search(&self.indices.trends, &trends_query(self.trend_limit).to_body())
            .await?
            .hits;

        if trend_hits.len() >= self.trend_limit {
            tracing::warn!("Trend set reached the load limit of {}", self.trend_limit);
        }

        let trends: Vec<Trend> = trend_hits
            .into_iter()
            .filter_map(|hit| match serde_json::from_value(Value::Object(hit.source)) {
                Ok(trend) => Some(trend),
                Err(e) => {
                    tracing::warn!("Skipping malformed trend {:?}: {}", hit.id, e);
                    None
                }
            })
            .collect();

        tracing::debug!(
            "Composing recommendations for {} from {} activities and {} trends",
            user_id,
            profile.preferences.activities.len(),
            trends.len()
        );

        Ok(RecommendationPlan::Query(compose_recommendation_query(&profile, &trends)))
    }

    /// Personalized recommendations
    ///
    /// Only a missing user id is an error. A missing profile or any index
    /// fault yields an empty list.
    pub async fn recommend(
        &self,
        user_id: Option<&str>,
        limit: Option<u16>,
    ) -> Result<Vec<ScoredResult>, QueryError> {
        let user_id = required(user_id, "user_id")?;

        let query = match self.build_recommendation_query(user_id).await {
            Ok(RecommendationPlan::Query(query)) => apply_limit(query, limit),
            Ok(RecommendationPlan::NoProfile) => {
                tracing::info!("No profile for user {}, returning no recommendations", user_id);
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::error!("Failed to load profile or trends for {}: {}", user_id, e);
                return Ok(Vec::new());
            }
        };

        match self
            .index
            .search(&self.indices.destinations, &query.to_body())
            .await
        {
            Ok(response) => {
                tracing::info!("Returning {} recommendations for user {}", response.hits.len(), user_id);
                Ok(format_hits(response.hits))
            }
            Err(e) => {
                tracing::error!("Recommendation search failed for {}: {}", user_id, e);
                Ok(Vec::new())
            }
        }
    }

    /// Destination looked up by name, with one page of its reviews
    pub async fn destination_details(
        &self,
        name: &str,
        paging: &ReviewsQuery,
    ) -> Result<DestinationDetailsResponse, EngineError> {
        let name = required(Some(name), "destination")?;

        let lookup = StructuredQuery::new(Clause::matching("destination", name)).with_size(1);
        let found = self
            .index
            .search(&self.indices.destinations, &lookup.to_body())
            .await?;

        let destination = format_hits(found.hits)
            .into_iter()
            .next()
            .ok_or_else(|| EngineError::NotFound(format!("Destination {}", name)))?;

        // Reviews key on the stored name, not the caller's spelling
        let stored_name = destination
            .get("destination")
            .and_then(Value::as_str)
            .unwrap_or(name)
            .to_string();

        let reviews = self
            .index
            .search(
                &self.indices.reviews,
                &build_reviews_query(&stored_name, paging.page, paging.size).to_body(),
            )
            .await?;

        Ok(DestinationDetailsResponse {
            destination,
            total_reviews: reviews.total,
            reviews: format_hits(reviews.hits),
            page: paging.page,
            size: paging.size,
        })
    }

    /// Persist a recommendation the user chose to keep
    pub async fn save_recommendation(
        &self,
        request: SaveRecommendationRequest,
    ) -> Result<String, EngineError> {
        let user_id = required(request.user_id.as_deref(), "user_id")?.to_string();
        let recommendation = request
            .recommendation
            .filter(|r| !r.is_null())
            .ok_or(QueryError::MissingRequiredInput("recommendation"))?;

        let saved = SavedRecommendation {
            user_id,
            recommendation,
            timestamp: chrono::Utc::now(),
        };

        let id = uuid::Uuid::new_v4().to_string();
        let stored = self
            .index
            .index_document(&self.indices.recommendations, Some(&id), &serde_json::to_value(&saved)?)
            .await?;

        tracing::info!("Saved recommendation {} for user {}", stored, saved.user_id);
        Ok(stored)
    }

    /// Record an interaction with a destination
    pub async fn record_interaction(&self, request: &InteractionRequest) -> Result<String, EngineError> {
        let interaction_type: InteractionType = request
            .interaction_type
            .parse()
            .map_err(QueryError::InvalidInteractionType)?;

        let interaction = Interaction {
            user_id: request.user_id.clone(),
            destination: request.destination.clone(),
            interaction_type,
            timestamp: chrono::Utc::now(),
        };

        let id = uuid::Uuid::new_v4().to_string();
        let stored = self
            .index
            .index_document(&self.indices.interactions, Some(&id), &serde_json::to_value(&interaction)?)
            .await?;

        tracing::debug!(
            "Recorded {:?} interaction: {} -> {}",
            interaction.interaction_type,
            interaction.user_id,
            interaction.destination
        );

        Ok(stored)
    }

    pub async fn is_healthy(&self) -> bool {
        self.index.ping().await
    }
}
