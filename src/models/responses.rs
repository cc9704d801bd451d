use serde::{Deserialize, Serialize};
use crate::models::domain::ScoredResult;

/// Destination with one page of its reviews
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationDetailsResponse {
    pub destination: ScoredResult,
    pub reviews: Vec<ScoredResult>,
    pub total_reviews: u64,
    pub page: u32,
    pub size: u32,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Save recommendation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRecommendationResponse {
    pub message: String,
    pub id: String,
}

/// Record interaction response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionResponse {
    pub success: bool,
    pub id: String,
}
