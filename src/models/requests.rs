use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;
use crate::core::search::SearchFilters;

/// Free-text destination search
///
/// All filter values arrive as raw strings and are parsed by the query
/// builder, so a malformed `maxPrice` surfaces as an invalid filter rather
/// than a query-string rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub q: String,
    #[serde(rename = "type")]
    pub destination_type: Option<String>,
    pub season: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
    pub rating: Option<String>,
    pub timezone: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<u16>,
}

impl SearchRequest {
    pub fn filters(&self) -> SearchFilters {
        SearchFilters {
            destination_type: self.destination_type.clone(),
            season: self.season.clone(),
            max_price: self.max_price.clone(),
            rating: self.rating.clone(),
            timezone: self.timezone.clone(),
        }
    }
}

/// Personalized recommendations for one user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub user_id: Option<String>,
    pub limit: Option<u16>,
}

/// Persist a recommendation the user chose to keep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRecommendationRequest {
    pub user_id: Option<String>,
    pub recommendation: Option<Value>,
}

/// Record a user interaction with a destination
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InteractionRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub destination: String,
    pub interaction_type: String,
}

/// Paging for the reviews attached to a destination
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewsQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u32,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub size: u32,
}

impl Default for ReviewsQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_page_size(),
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}
