use crate::core::query::{BoolQuery, Clause, SortClause, SortOrder, StructuredQuery};
use crate::models::{BudgetTier, Trend, UserProfile};

/// Outcome of composing a recommendation query for a user
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationPlan {
    Query(StructuredQuery),
    /// The user has no stored profile; callers answer with an empty list
    NoProfile,
}

/// Price ceiling for a stored budget tier
#[inline]
pub fn budget_ceiling(budget_range: Option<&str>) -> f64 {
    BudgetTier::parse(budget_range).ceiling()
}

/// Exact lookup of a profile by user id
pub fn profile_lookup_query(user_id: &str) -> StructuredQuery {
    StructuredQuery::new(Clause::term("user_id", user_id)).with_size(1)
}

/// Wholesale load of the trend collection, bounded by `limit`
pub fn trends_query(limit: usize) -> StructuredQuery {
    StructuredQuery::new(Clause::MatchAll).with_size(limit as u64)
}

/// Every preference and trend signal as an independent `should` clause
///
/// Order: preference activities, the budget price range, preferred seasons,
/// then an activities match and a season match per trend.
pub fn signal_clauses(profile: &UserProfile, trends: &[Trend]) -> Vec<Clause> {
    let preferences = &profile.preferences;
    let mut should = Vec::with_capacity(
        preferences.activities.len() + 1 + preferences.preferred_seasons.len() + trends.len() * 2,
    );

    should.extend(
        preferences
            .activities
            .iter()
            .map(|activity| Clause::matching("activities", activity.as_str())),
    );

    should.push(Clause::between(
        "price",
        0.0,
        budget_ceiling(preferences.budget_range.as_deref()),
    ));

    should.extend(
        preferences
            .preferred_seasons
            .iter()
            .map(|season| Clause::matching("season", season.as_str())),
    );

    for trend in trends {
        should.push(Clause::matching("activities", trend.trend.as_str()));
        should.push(Clause::matching("season", trend.season.as_str()));
    }

    should
}

/// Build the recommendation query for a loaded profile and trend set
///
/// Any single signal qualifies a destination; ordering is by rating
/// descending only, so equal ratings keep the index's own (stable but
/// arbitrary) order.
pub fn compose_recommendation_query(profile: &UserProfile, trends: &[Trend]) -> StructuredQuery {
    let query = BoolQuery {
        must: Vec::new(),
        should: signal_clauses(profile, trends),
        minimum_should_match: Some(1),
    };

    StructuredQuery::new(Clause::Bool(query)).sorted_by(SortClause::field("rating", SortOrder::Desc))
}
