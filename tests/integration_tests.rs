// Integration tests for Destination Search

use destination_search::config::IndexSettings;
use destination_search::core::{Clause, EngineError, QueryError, RecommendationPlan, TravelEngine};
use destination_search::models::{ReviewsQuery, SaveRecommendationRequest, SearchRequest};
use destination_search::services::{seed_sample_data, DocumentIndex, Hit, IndexError, SearchResponse};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory document index
///
/// Stores documents per index and answers every search with the documents of
/// that index in insertion order, recording each request body. A top-level
/// `term` query keeps only documents whose field equals the term value.
/// Indices listed in `failing` answer with an API error instead.
#[derive(Default)]
struct MemoryIndex {
    documents: Mutex<HashMap<String, Vec<Value>>>,
    requests: Mutex<Vec<(String, Value)>>,
    failing: Vec<String>,
}

impl MemoryIndex {
    fn failing_on(index: &str) -> Self {
        Self {
            failing: vec![index.to_string()],
            ..Default::default()
        }
    }

    fn insert(&self, index: &str, document: Value) {
        self.documents
            .lock()
            .unwrap()
            .entry(index.to_string())
            .or_default()
            .push(document);
    }

    fn requests_to(&self, index: &str) -> Vec<Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == index)
            .map(|(_, body)| body.clone())
            .collect()
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl DocumentIndex for MemoryIndex {
    async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse, IndexError> {
        self.requests.lock().unwrap().push((index.to_string(), body.clone()));

        if self.failing.iter().any(|name| name == index) {
            return Err(IndexError::ApiError {
                status: 503,
                body: "cluster_block_exception".to_string(),
            });
        }

        let term = body["query"]["term"]
            .as_object()
            .and_then(|term| term.iter().next())
            .map(|(field, value)| (field.clone(), value.clone()));

        let documents = self.documents.lock().unwrap();
        let hits: Vec<Hit> = documents
            .get(index)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| match &term {
                        Some((field, value)) => &doc[field.as_str()] == value,
                        None => true,
                    })
                    .map(|doc| Hit {
                        id: None,
                        score: Some(1.0),
                        source: doc.as_object().cloned().unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(SearchResponse {
            total: hits.len() as u64,
            hits,
        })
    }

    async fn index_document(&self, index: &str, id: Option<&str>, document: &Value) -> Result<String, IndexError> {
        self.insert(index, document.clone());
        Ok(id.unwrap_or("auto").to_string())
    }

    async fn ping(&self) -> bool {
        true
    }
}

fn create_engine(index: MemoryIndex) -> TravelEngine<MemoryIndex> {
    TravelEngine::new(index, IndexSettings::default(), 10_000)
}

async fn seeded_engine() -> TravelEngine<MemoryIndex> {
    let engine = create_engine(MemoryIndex::default());
    let stored = seed_sample_data(engine.index(), &IndexSettings::default()).await;
    assert_eq!(stored, 12 + 1 + 8 + 2);
    engine
}

#[tokio::test]
async fn test_search_end_to_end() {
    let engine = seeded_engine().await;
    let request = SearchRequest {
        q: "beach".to_string(),
        destination_type: Some("luxury".to_string()),
        max_price: Some("3000".to_string()),
        sort: Some("rating".to_string()),
        ..Default::default()
    };

    let results = engine.search(&request).await.unwrap();
    assert_eq!(results.len(), 12);
    assert!(results.iter().all(|r| r.score == Some(1.0)));

    let bodies = engine.index().requests_to("destinations");
    assert_eq!(bodies.len(), 1);
    let bool_query = &bodies[0]["query"]["bool"];
    assert_eq!(bool_query["must"].as_array().unwrap().len(), 2);
    assert_eq!(bool_query["should"][0]["multi_match"]["query"], json!("beach"));
    assert_eq!(bodies[0]["sort"], json!([{ "rating": { "order": "asc" } }, "_score"]));
}

#[tokio::test]
async fn test_search_validation_happens_before_index() {
    let engine = create_engine(MemoryIndex::default());

    let bad_price = SearchRequest {
        q: "beach".to_string(),
        max_price: Some("abc".to_string()),
        ..Default::default()
    };
    let err = engine.search(&bad_price).await.unwrap_err();
    assert!(matches!(err, EngineError::Query(QueryError::InvalidFilter { .. })));

    let bad_sort = SearchRequest {
        q: "beach".to_string(),
        sort: Some("bogus_field".to_string()),
        ..Default::default()
    };
    let err = engine.search(&bad_sort).await.unwrap_err();
    assert!(matches!(err, EngineError::Query(QueryError::InvalidSortKey(_))));

    assert_eq!(engine.index().request_count(), 0);
}

#[tokio::test]
async fn test_search_surfaces_index_failure() {
    let engine = create_engine(MemoryIndex::failing_on("destinations"));
    let request = SearchRequest {
        q: "beach".to_string(),
        ..Default::default()
    };

    let err = engine.search(&request).await.unwrap_err();
    assert!(matches!(err, EngineError::IndexUnavailable(_)));
}

#[tokio::test]
async fn test_recommendations_for_seeded_user() {
    let engine = seeded_engine().await;

    let plan = engine.build_recommendation_query("user123").await.unwrap();
    let RecommendationPlan::Query(query) = plan else {
        panic!("expected a query for a seeded profile");
    };
    // 3 activities + price + 2 seasons + 2 per seeded trend
    assert_eq!(query.bool_query().unwrap().should.len(), 3 + 1 + 2 + 2 * 8);

    let results = engine.recommend(Some("user123"), Some(5)).await.unwrap();
    assert_eq!(results.len(), 12);

    let bodies = engine.index().requests_to("destinations");
    let last = bodies.last().unwrap();
    assert_eq!(last["size"], json!(5));
    assert_eq!(last["sort"], json!([{ "rating": { "order": "desc" } }]));

    let trend_loads = engine.index().requests_to("travel_trends");
    assert_eq!(trend_loads[0]["size"], json!(10_000));
}

#[tokio::test]
async fn test_recommendations_use_requested_profile() {
    let engine = seeded_engine().await;

    let plan = engine.build_recommendation_query("user456").await.unwrap();
    let RecommendationPlan::Query(query) = plan else {
        panic!("expected a query for a seeded profile");
    };
    let should = &query.bool_query().unwrap().should;

    assert_eq!(should[0], Clause::matching("activities", "hiking"));
    assert_eq!(should[3], Clause::between("price", 0.0, 2500.0));
    assert_eq!(should[4], Clause::matching("season", "spring"));
    assert!(!should.contains(&Clause::matching("activities", "diving")));

    let lookups = engine.index().requests_to("user_profiles");
    assert_eq!(lookups[0]["query"], json!({ "term": { "user_id": "user456" } }));
}

#[tokio::test]
async fn test_recommendations_tolerate_loose_stored_values() {
    let index = MemoryIndex::default();
    index.insert("user_profiles", json!({ "user_id": "user789", "preferences": { "budget_range": 3 } }));
    index.insert("travel_trends", json!({ "trend": "wellness retreats", "popularity": 85.5, "season": "all" }));
    index.insert("travel_trends", json!({ "trend": "food tourism", "popularity": "high", "season": null }));
    let engine = create_engine(index);

    let plan = engine.build_recommendation_query("user789").await.unwrap();
    let RecommendationPlan::Query(query) = plan else {
        panic!("expected a query despite loose stored values");
    };
    let should = &query.bool_query().unwrap().should;

    // price + 2 per trend
    assert_eq!(should.len(), 1 + 2 * 2);
    assert_eq!(should[0], Clause::between("price", 0.0, 5000.0));
    assert_eq!(should[0].to_json(), json!({ "range": { "price": { "gte": 0.0, "lte": 5000.0 } } }));
    assert_eq!(should[1], Clause::matching("activities", "wellness retreats"));

    let results = engine.recommend(Some("user789"), None).await.unwrap();
    assert!(results.is_empty());
    assert_eq!(engine.index().requests_to("destinations").len(), 1);
}

#[tokio::test]
async fn test_recommendations_without_profile() {
    let engine = create_engine(MemoryIndex::default());

    let plan = engine.build_recommendation_query("ghost").await.unwrap();
    assert_eq!(plan, RecommendationPlan::NoProfile);

    let results = engine.recommend(Some("ghost"), None).await.unwrap();
    assert!(results.is_empty());
    assert!(engine.index().requests_to("destinations").is_empty());
}

#[tokio::test]
async fn test_recommendations_swallow_profile_failure() {
    let engine = create_engine(MemoryIndex::failing_on("user_profiles"));

    let results = engine.recommend(Some("user123"), None).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_recommendations_swallow_search_failure() {
    let index = MemoryIndex::failing_on("destinations");
    index.insert("user_profiles", json!({ "user_id": "user123", "preferences": { "budget_range": "low" } }));
    let engine = create_engine(index);

    let results = engine.recommend(Some("user123"), None).await.unwrap();
    assert!(results.is_empty());
    assert_eq!(engine.index().requests_to("destinations").len(), 1);
}

#[tokio::test]
async fn test_recommendations_require_user_id() {
    let engine = create_engine(MemoryIndex::default());

    let err = engine.recommend(None, None).await.unwrap_err();
    assert_eq!(err, QueryError::MissingRequiredInput("user_id"));
    assert_eq!(engine.index().request_count(), 0);
}

#[tokio::test]
async fn test_destination_details_with_reviews() {
    let engine = seeded_engine().await;
    let paging = ReviewsQuery { page: 2, size: 5 };

    let details = engine.destination_details("Bali", &paging).await.unwrap();
    assert_eq!(details.destination.get("destination"), Some(&json!("Bali, Indonesia")));
    assert_eq!(details.total_reviews, 1);
    assert_eq!(details.page, 2);

    let review_requests = engine.index().requests_to("destination_reviews");
    assert_eq!(review_requests[0]["from"], json!(5));
    assert_eq!(review_requests[0]["size"], json!(5));
    assert_eq!(
        review_requests[0]["query"],
        json!({ "match": { "destination": "Bali, Indonesia" } })
    );
}

#[tokio::test]
async fn test_save_recommendation_stores_document() {
    let engine = create_engine(MemoryIndex::default());
    let request = SaveRecommendationRequest {
        user_id: Some("user123".to_string()),
        recommendation: Some(json!({ "destination": "Maldives" })),
    };

    let id = engine.save_recommendation(request).await.unwrap();
    assert!(!id.is_empty());

    let stored = engine.index().documents.lock().unwrap();
    let saved = &stored["user_recommendations"][0];
    assert_eq!(saved["user_id"], json!("user123"));
    assert_eq!(saved["recommendation"]["destination"], json!("Maldives"));
    assert!(saved["timestamp"].is_string());
}

#[tokio::test]
async fn test_save_recommendation_requires_user() {
    let engine = create_engine(MemoryIndex::default());
    let request = SaveRecommendationRequest {
        user_id: None,
        recommendation: Some(json!({ "destination": "Maldives" })),
    };

    let err = engine.save_recommendation(request).await.unwrap_err();
    assert!(matches!(err, EngineError::Query(QueryError::MissingRequiredInput("user_id"))));
}
