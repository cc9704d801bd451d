use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Accept only a JSON string; any other stored value reads as absent
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Read a scalar as text; null and composite values read as empty
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// A travel offering stored in the destinations index
///
/// Seeded documents are sparse, so every field past the name is optional and
/// omitted from the stored document when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Destination {
    #[serde(rename = "destination")]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// A traveller review attached to a destination by name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub destination: String,
    pub user_id: String,
    pub rating: u8,
    pub review: String,
    pub date: chrono::NaiveDate,
    #[serde(default)]
    pub helpful_votes: u32,
}

/// Stored travel profile, one per user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub preferences: TravelPreferences,
    /// History only, never used for ranking
    #[serde(default)]
    pub past_searches: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelPreferences {
    #[serde(default)]
    pub activities: Vec<String>,
    /// Non-string tiers fall back to the default ceiling
    #[serde(default, deserialize_with = "string_or_none")]
    pub budget_range: Option<String>,
    #[serde(default)]
    pub preferred_seasons: Vec<String>,
}

/// Budget tier of a profile; unknown or missing tiers fall back to `High`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTier {
    Low,
    Medium,
    High,
}

impl BudgetTier {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("low") => BudgetTier::Low,
            Some("medium") => BudgetTier::Medium,
            _ => BudgetTier::High,
        }
    }

    /// Highest destination price the tier accepts
    pub fn ceiling(self) -> f64 {
        match self {
            BudgetTier::Low => 1500.0,
            BudgetTier::Medium => 2500.0,
            BudgetTier::High => 5000.0,
        }
    }
}

/// Global travel trend signal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trend {
    #[serde(default, deserialize_with = "lenient_text")]
    pub trend: String,
    /// Informational only, kept as stored
    #[serde(default)]
    pub popularity: Value,
    #[serde(default, deserialize_with = "lenient_text")]
    pub season: String,
}

/// A destination (or review) as returned to callers: the engine score
/// followed by every stored source field in stored order.
///
/// `fields` never holds a `score` key; the formatter drops a stored one so
/// the engine score is the only `score` in the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub score: Option<f64>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ScoredResult {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Recommendation a user chose to keep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRecommendation {
    pub user_id: String,
    pub recommendation: Value,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// User interaction with a destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub user_id: String,
    pub destination: String,
    pub interaction_type: InteractionType,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    Viewed,
    Clicked,
    Saved,
    Booked,
}

impl std::str::FromStr for InteractionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "viewed" => Ok(InteractionType::Viewed),
            "clicked" => Ok(InteractionType::Clicked),
            "saved" => Ok(InteractionType::Saved),
            "booked" => Ok(InteractionType::Booked),
            other => Err(other.to_string()),
        }
    }
}
