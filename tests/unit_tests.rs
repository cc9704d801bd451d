// Unit tests for Destination Search

use destination_search::core::{
    build_search_query, budget_ceiling, compose_recommendation_query, filter_clauses, format_hits,
    signal_clauses, Clause, QueryError, SearchFilters, SortField,
};
use destination_search::models::{TravelPreferences, Trend, UserProfile};
use destination_search::services::{Hit, SearchResponse};
use serde_json::{json, Value};

fn full_filters() -> SearchFilters {
    SearchFilters {
        destination_type: Some("luxury".to_string()),
        season: Some("winter".to_string()),
        max_price: Some("3000".to_string()),
        rating: Some("5".to_string()),
        timezone: Some("UTC+4".to_string()),
    }
}

fn create_profile(activities: usize, seasons: usize, budget: &str) -> UserProfile {
    UserProfile {
        user_id: "user123".to_string(),
        preferences: TravelPreferences {
            activities: (0..activities).map(|i| format!("activity {}", i)).collect(),
            budget_range: Some(budget.to_string()),
            preferred_seasons: (0..seasons).map(|i| format!("season {}", i)).collect(),
        },
        past_searches: vec![],
    }
}

fn create_trends(count: usize) -> Vec<Trend> {
    (0..count)
        .map(|i| Trend {
            trend: format!("trend {}", i),
            popularity: json!(50),
            season: "all".to_string(),
        })
        .collect()
}

#[test]
fn test_search_end_to_end_shape() {
    let filters = SearchFilters {
        destination_type: Some("luxury".to_string()),
        max_price: Some("3000".to_string()),
        ..Default::default()
    };

    let query = build_search_query("beach", &filters, SortField::Rating).unwrap();

    assert_eq!(
        query.to_body(),
        json!({
            "query": {
                "bool": {
                    "must": [
                        { "match": { "type": "luxury" } },
                        { "range": { "price": { "lte": 3000.0 } } }
                    ],
                    "should": [{
                        "multi_match": {
                            "query": "beach",
                            "fields": ["destination^3", "type^2", "activities", "season"],
                            "fuzziness": "AUTO",
                            "operator": "or"
                        }
                    }],
                    "minimum_should_match": 1
                }
            },
            "sort": [{ "rating": { "order": "asc" } }, "_score"]
        })
    );
}

#[test]
fn test_each_filter_adds_one_must_clause() {
    let all = full_filters();
    let fields: [fn(&mut SearchFilters); 5] = [
        |f| f.destination_type = None,
        |f| f.season = None,
        |f| f.max_price = None,
        |f| f.rating = None,
        |f| f.timezone = None,
    ];

    assert_eq!(filter_clauses(&all).unwrap().len(), 5);

    for clear in fields {
        let mut fewer = all.clone();
        clear(&mut fewer);
        assert_eq!(filter_clauses(&fewer).unwrap().len(), 4);
    }

    assert!(filter_clauses(&SearchFilters::default()).unwrap().is_empty());
}

#[test]
fn test_filters_never_touch_relevance_clause() {
    let bare = build_search_query("temples", &SearchFilters::default(), SortField::Price).unwrap();
    let filtered = build_search_query("temples", &full_filters(), SortField::Price).unwrap();

    assert_eq!(bare.bool_query().unwrap().should, filtered.bool_query().unwrap().should);
    assert_eq!(filtered.bool_query().unwrap().minimum_should_match, Some(1));
}

#[test]
fn test_invalid_max_price() {
    let filters = SearchFilters {
        max_price: Some("abc".to_string()),
        ..Default::default()
    };

    let err = build_search_query("beach", &filters, SortField::Price).unwrap_err();
    assert!(matches!(err, QueryError::InvalidFilter { field: "maxPrice", .. }));
}

#[test]
fn test_invalid_sort_key() {
    let err = "bogus_field".parse::<SortField>().unwrap_err();
    assert_eq!(err, QueryError::InvalidSortKey("bogus_field".to_string()));
}

#[test]
fn test_default_sort_is_price_then_score() {
    let sort = SortField::parse_optional(None).unwrap();
    let body = build_search_query("paris", &SearchFilters::default(), sort).unwrap().to_body();
    assert_eq!(body["sort"], json!([{ "price": { "order": "asc" } }, "_score"]));
}

#[test]
fn test_recommendation_clause_count_formula() {
    for (activities, seasons, trends) in [(0, 0, 0), (3, 2, 0), (1, 1, 8), (5, 0, 40)] {
        let profile = create_profile(activities, seasons, "medium");
        let should = signal_clauses(&profile, &create_trends(trends));
        assert_eq!(should.len(), activities + 1 + seasons + 2 * trends);
    }
}

#[test]
fn test_recommendation_shape() {
    let profile = create_profile(1, 1, "low");
    let query = compose_recommendation_query(&profile, &create_trends(1));
    let body = query.to_body();

    assert_eq!(body["query"]["bool"]["minimum_should_match"], json!(1));
    assert!(body["query"]["bool"].get("must").is_none());
    assert_eq!(body["sort"], json!([{ "rating": { "order": "desc" } }]));
    assert_eq!(
        query.bool_query().unwrap().should[1],
        Clause::between("price", 0.0, 1500.0)
    );
}

#[test]
fn test_budget_mapping() {
    assert_eq!(budget_ceiling(Some("low")), 1500.0);
    assert_eq!(budget_ceiling(Some("medium")), 2500.0);
    assert_eq!(budget_ceiling(Some("high")), 5000.0);
    assert_eq!(budget_ceiling(Some("")), 5000.0);
    assert_eq!(budget_ceiling(None), 5000.0);
}

#[test]
fn test_formatter_keeps_every_field() {
    let raw = json!({
        "hits": {
            "total": { "value": 2 },
            "hits": [
                { "_score": 3.2, "_source": { "destination": "Bali, Indonesia", "price": 1200, "amenities": ["wifi"] } },
                { "_score": 1.1, "_source": { "destination": "Paris, France" } }
            ]
        }
    });

    let response = SearchResponse::from_json(&raw).unwrap();
    let results = format_hits(response.hits);

    assert_eq!(results.len(), 2);
    let first = serde_json::to_value(&results[0]).unwrap();
    assert_eq!(
        first,
        json!({ "score": 3.2, "destination": "Bali, Indonesia", "price": 1200, "amenities": ["wifi"] })
    );
    let second = serde_json::to_value(&results[1]).unwrap();
    assert_eq!(second.as_object().unwrap().len(), 2);
}

#[test]
fn test_formatter_keeps_duplicates() {
    let hit = Hit {
        id: None,
        score: Some(2.0),
        source: json!({ "destination": "Maldives" }).as_object().cloned().unwrap(),
    };

    let results = format_hits(vec![hit.clone(), hit]);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].get("destination"), Some(&Value::from("Maldives")));
}
