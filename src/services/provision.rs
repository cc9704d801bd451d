//! Index schema provisioning and sample data for local development

use crate::config::IndexSettings;
use crate::models::{Destination, Review, Trend, TravelPreferences, UserProfile};
use crate::services::elasticsearch::ElasticsearchClient;
use crate::services::index::{DocumentIndex, IndexError};
use serde::Serialize;
use serde_json::{json, Value};

/// Mapping for every index the service touches, keyed by configured name
pub fn index_mappings(indices: &IndexSettings) -> Vec<(String, Value)> {
    vec![
        (
            indices.destinations.clone(),
            json!({
                "mappings": {
                    "properties": {
                        "destination": {
                            "type": "text",
                            "fields": { "keyword": { "type": "keyword" } }
                        },
                        "type": { "type": "keyword" },
                        "activities": { "type": "text" },
                        "season": { "type": "keyword" },
                        "price": { "type": "float" },
                        "rating": { "type": "float" },
                        "reviews_count": { "type": "integer" },
                        "amenities": { "type": "keyword" },
                        "language": { "type": "keyword" },
                        "currency": { "type": "keyword" },
                        "timezone": { "type": "keyword" }
                    }
                }
            }),
        ),
        (
            indices.user_profiles.clone(),
            json!({
                "mappings": {
                    "properties": {
                        "user_id": { "type": "keyword" },
                        "preferences": {
                            "properties": {
                                "activities": { "type": "text" },
                                "budget_range": { "type": "keyword" },
                                "preferred_seasons": { "type": "keyword" }
                            }
                        },
                        "past_searches": { "type": "text" }
                    }
                }
            }),
        ),
        (
            indices.trends.clone(),
            json!({
                "mappings": {
                    "properties": {
                        "trend": { "type": "text" },
                        "popularity": { "type": "integer" },
                        "season": { "type": "keyword" }
                    }
                }
            }),
        ),
        (
            indices.reviews.clone(),
            json!({
                "mappings": {
                    "properties": {
                        "destination": { "type": "keyword" },
                        "user_id": { "type": "keyword" },
                        "rating": { "type": "float" },
                        "review": { "type": "text" },
                        "date": { "type": "date" },
                        "helpful_votes": { "type": "integer" }
                    }
                }
            }),
        ),
        (
            indices.recommendations.clone(),
            json!({
                "mappings": {
                    "properties": {
                        "user_id": { "type": "keyword" },
                        "recommendation": { "type": "object", "enabled": false },
                        "timestamp": { "type": "date" }
                    }
                }
            }),
        ),
        (
            indices.interactions.clone(),
            json!({
                "mappings": {
                    "properties": {
                        "user_id": { "type": "keyword" },
                        "destination": { "type": "keyword" },
                        "interaction_type": { "type": "keyword" },
                        "timestamp": { "type": "date" }
                    }
                }
            }),
        ),
    ]
}

/// Create every missing index; existing indices are left untouched
pub async fn ensure_indices(
    client: &ElasticsearchClient,
    indices: &IndexSettings,
) -> Result<usize, IndexError> {
    let mut created = 0;

    for (name, mapping) in index_mappings(indices) {
        if client.index_exists(&name).await? {
            tracing::debug!("Index {} already exists", name);
            continue;
        }
        client.create_index(&name, &mapping).await?;
        created += 1;
    }

    Ok(created)
}

/// Index one batch of documents, logging and skipping individual failures
async fn index_batch<I, T>(
    index: &I,
    name: &str,
    documents: &[(Option<String>, T)],
) -> usize
where
    I: DocumentIndex,
    T: Serialize,
{
    let mut stored = 0;

    for (id, document) in documents {
        let result = match serde_json::to_value(document) {
            Ok(value) => index.index_document(name, id.as_deref(), &value).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(_) => stored += 1,
            Err(e) => tracing::warn!("Failed to seed document into {}: {}", name, e),
        }
    }

    stored
}

/// Seed sample destinations, reviews, trends and profiles
///
/// Returns the number of documents stored.
pub async fn seed_sample_data<I: DocumentIndex>(index: &I, indices: &IndexSettings) -> usize {
    let destinations: Vec<_> = sample_destinations().into_iter().map(|d| (None, d)).collect();
    let reviews: Vec<_> = sample_reviews().into_iter().map(|r| (None, r)).collect();
    let trends: Vec<_> = sample_trends().into_iter().map(|t| (None, t)).collect();
    let profiles: Vec<_> = sample_profiles()
        .into_iter()
        .map(|p| (Some(p.user_id.clone()), p))
        .collect();

    let stored = index_batch(index, &indices.destinations, &destinations).await
        + index_batch(index, &indices.reviews, &reviews).await
        + index_batch(index, &indices.trends, &trends).await
        + index_batch(index, &indices.user_profiles, &profiles).await;

    tracing::info!("Seeded {} sample documents", stored);
    stored
}

fn destination(
    name: &str,
    price: f64,
    category: &str,
    activities: &str,
    season: &str,
) -> Destination {
    Destination {
        name: name.to_string(),
        category: Some(category.to_string()),
        price: Some(price),
        activities: Some(activities.to_string()),
        season: Some(season.to_string()),
        ..Default::default()
    }
}

pub fn sample_destinations() -> Vec<Destination> {
    vec![
        Destination {
            rating: Some(4.5),
            reviews_count: Some(1250),
            amenities: vec!["wifi".into(), "restaurants".into(), "shopping".into()],
            language: Some("Indonesian".into()),
            currency: Some("IDR".into()),
            timezone: Some("UTC+8".into()),
            ..destination("Bali, Indonesia", 1200.0, "beach", "surfing, temples, diving, yoga", "dry_season")
        },
        destination("Queenstown, New Zealand", 2000.0, "adventure", "skiing, bungee jumping, hiking", "winter"),
        destination("Paris, France", 1800.0, "cultural", "museums, dining, architecture", "spring"),
        destination("Tokyo, Japan", 2200.0, "urban", "shopping, temples, dining, cherry blossoms", "spring"),
        destination("Maldives", 3000.0, "luxury", "snorkeling, diving, spa, overwater villas", "winter"),
        destination("Machu Picchu, Peru", 1500.0, "historical", "hiking, archaeology, photography", "dry_season"),
        destination("Santorini, Greece", 1700.0, "romantic", "beaches, wine tasting, sunset viewing", "summer"),
        destination("Swiss Alps", 2500.0, "mountains", "skiing, hiking, mountain biking", "winter"),
        destination("Great Barrier Reef", 2300.0, "nature", "diving, snorkeling, boat tours", "summer"),
        destination("Bangkok, Thailand", 1000.0, "cultural", "temples, street food, shopping, nightlife", "winter"),
        destination("Dubai, UAE", 2800.0, "luxury", "shopping, desert safari, architecture, beaches", "winter"),
        destination("Cape Town, South Africa", 1800.0, "diverse", "beaches, wine tasting, hiking, cultural tours", "spring"),
    ]
}

pub fn sample_reviews() -> Vec<Review> {
    chrono::NaiveDate::from_ymd_opt(2023, 1, 15)
        .map(|date| Review {
            destination: "Bali, Indonesia".to_string(),
            user_id: "user123".to_string(),
            rating: 5,
            review: "Amazing experience!".to_string(),
            date,
            helpful_votes: 45,
        })
        .into_iter()
        .collect()
}

pub fn sample_trends() -> Vec<Trend> {
    [
        ("sustainable tourism", 92, "all"),
        ("digital nomad destinations", 88, "all"),
        ("wellness retreats", 85, "all"),
        ("adventure sports", 80, "summer"),
        ("cultural immersion", 78, "spring"),
        ("luxury escapes", 75, "winter"),
        ("food tourism", 82, "all"),
        ("eco-friendly stays", 87, "all"),
    ]
    .into_iter()
    .map(|(trend, popularity, season)| Trend {
        trend: trend.to_string(),
        popularity: json!(popularity),
        season: season.to_string(),
    })
    .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn sample_profiles() -> Vec<UserProfile> {
    vec![
        UserProfile {
            user_id: "user123".to_string(),
            preferences: TravelPreferences {
                activities: strings(&["beach", "diving", "luxury"]),
                budget_range: Some("high".to_string()),
                preferred_seasons: strings(&["summer", "winter"]),
            },
            past_searches: strings(&["Maldives", "luxury resorts", "beach destinations"]),
        },
        UserProfile {
            user_id: "user456".to_string(),
            preferences: TravelPreferences {
                activities: strings(&["hiking", "adventure", "photography"]),
                budget_range: Some("medium".to_string()),
                preferred_seasons: strings(&["spring", "fall"]),
            },
            past_searches: strings(&["hiking trails", "adventure sports", "mountain destinations"]),
        },
    ]
}
