use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{EngineError, TravelEngine};
use crate::models::{
    ErrorResponse, HealthResponse, InteractionRequest, InteractionResponse, RecommendationRequest,
    ReviewsQuery, SaveRecommendationRequest, SaveRecommendationResponse, SearchRequest,
};
use crate::services::ElasticsearchClient;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<TravelEngine<ElasticsearchClient>>,
}

/// Configure all travel routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/search", web::get().to(search))
        .route("/recommendations", web::get().to(recommendations))
        .route("/recommendations/save", web::post().to(save_recommendation))
        .route("/save-recommendation", web::post().to(save_recommendation))
        .route("/interactions", web::post().to(record_interaction))
        .route("/destinations/{name}", web::get().to(destination_details));
}

fn error_response(status: u16, error: &str, message: String) -> HttpResponse {
    let body = ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status,
    };

    match status {
        400 => HttpResponse::BadRequest().json(body),
        404 => HttpResponse::NotFound().json(body),
        503 => HttpResponse::ServiceUnavailable().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

fn engine_error_response(err: &EngineError) -> HttpResponse {
    match err {
        EngineError::Query(e) => error_response(400, "Invalid request", e.to_string()),
        EngineError::NotFound(what) => error_response(404, "Not found", what.clone()),
        EngineError::IndexUnavailable(e) => {
            tracing::error!("Document index failure: {}", e);
            error_response(503, "Search unavailable", e.to_string())
        }
        EngineError::Serialization(e) => {
            tracing::error!("Serialization failure: {}", e);
            error_response(500, "Internal error", e.to_string())
        }
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.engine.is_healthy().await { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Destination search endpoint
///
/// GET /api/v1/search?q=beach&type=luxury&maxPrice=3000&sort=rating
///
/// Responds with the scored destinations, `[]` for blank `q`.
async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchRequest>,
) -> impl Responder {
    match state.engine.search(&query).await {
        Ok(results) => HttpResponse::Ok().json(results),
        Err(e) => {
            tracing::info!("Search {:?} failed: {}", query.q, e);
            engine_error_response(&e)
        }
    }
}

/// Personalized recommendations endpoint
///
/// GET /api/v1/recommendations?user_id={userId}
async fn recommendations(
    state: web::Data<AppState>,
    query: web::Query<RecommendationRequest>,
) -> impl Responder {
    match state.engine.recommend(query.user_id.as_deref(), query.limit).await {
        Ok(results) => HttpResponse::Ok().json(results),
        Err(e) => error_response(400, "User ID is required", e.to_string()),
    }
}

/// Save recommendation endpoint
///
/// POST /api/v1/recommendations/save
///
/// Request body:
/// ```json
/// {
///   "user_id": "string",
///   "recommendation": { "destination": "Maldives" }
/// }
/// ```
async fn save_recommendation(
    state: web::Data<AppState>,
    req: web::Json<SaveRecommendationRequest>,
) -> impl Responder {
    match state.engine.save_recommendation(req.into_inner()).await {
        Ok(id) => HttpResponse::Ok().json(SaveRecommendationResponse {
            message: "Recommendation saved successfully".to_string(),
            id,
        }),
        Err(e) => engine_error_response(&e),
    }
}

/// Record interaction endpoint
///
/// POST /api/v1/interactions
///
/// Request body:
/// ```json
/// {
///   "user_id": "string",
///   "destination": "string",
///   "interaction_type": "viewed|clicked|saved|booked"
/// }
/// ```
async fn record_interaction(
    state: web::Data<AppState>,
    req: web::Json<InteractionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(400, "Validation failed", errors.to_string());
    }

    match state.engine.record_interaction(&req).await {
        Ok(id) => HttpResponse::Ok().json(InteractionResponse { success: true, id }),
        Err(e) => engine_error_response(&e),
    }
}

/// Destination details endpoint
///
/// GET /api/v1/destinations/{name}?page=1&size=10
async fn destination_details(
    state: web::Data<AppState>,
    name: web::Path<String>,
    paging: web::Query<ReviewsQuery>,
) -> impl Responder {
    if let Err(errors) = paging.validate() {
        return error_response(400, "Validation failed", errors.to_string());
    }

    match state.engine.destination_details(&name, &paging).await {
        Ok(details) => HttpResponse::Ok().json(details),
        Err(e) => engine_error_response(&e),
    }
}
