// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Destination, Review, UserProfile, TravelPreferences, BudgetTier, Trend, ScoredResult, SavedRecommendation, Interaction, InteractionType};
pub use requests::{SearchRequest, RecommendationRequest, SaveRecommendationRequest, InteractionRequest, ReviewsQuery};
pub use responses::{DestinationDetailsResponse, HealthResponse, ErrorResponse, SaveRecommendationResponse, InteractionResponse};
