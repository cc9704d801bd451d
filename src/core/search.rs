use crate::core::error::QueryError;
use crate::core::query::{BoolQuery, BoostedField, Clause, Fuzziness, Operator, SortClause, SortOrder, StructuredQuery};
use std::str::FromStr;

/// Fields searched by free text, with their relevance boost
const RELEVANCE_FIELDS: [(&str, u32); 4] = [
    ("destination", 3),
    ("type", 2),
    ("activities", 1),
    ("season", 1),
];

/// Optional narrowing filters, as raw caller strings
///
/// A filter is considered present when its trimmed value is non-empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub destination_type: Option<String>,
    pub season: Option<String>,
    pub max_price: Option<String>,
    /// Exact rating, not a minimum
    pub rating: Option<String>,
    pub timezone: Option<String>,
}

/// Fields a search may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Price,
    Rating,
    ReviewsCount,
    Season,
    Destination,
}

impl SortField {
    /// Indexed field the sort runs against
    pub fn index_field(self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::Rating => "rating",
            SortField::ReviewsCount => "reviews_count",
            SortField::Season => "season",
            // `destination` is analyzed text; sorting needs the keyword subfield
            SortField::Destination => "destination.keyword",
        }
    }

    /// Parse an optional caller sort key; blank falls back to price
    pub fn parse_optional(raw: Option<&str>) -> Result<Self, QueryError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(SortField::default()),
            Some(key) => key.parse(),
        }
    }
}

impl FromStr for SortField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(SortField::Price),
            "rating" => Ok(SortField::Rating),
            "reviews_count" => Ok(SortField::ReviewsCount),
            "season" => Ok(SortField::Season),
            "destination" => Ok(SortField::Destination),
            other => Err(QueryError::InvalidSortKey(other.to_string())),
        }
    }
}

/// Returns the trimmed text, or `None` when nothing searchable remains
///
/// Callers use this to short-circuit to an empty result without querying.
pub fn normalize_text(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, QueryError> {
    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| QueryError::InvalidFilter {
            field,
            value: raw.to_string(),
        })
}

/// Translate the filter set into mandatory clauses, one per present filter
pub fn filter_clauses(filters: &SearchFilters) -> Result<Vec<Clause>, QueryError> {
    let mut must = Vec::new();

    if let Some(destination_type) = present(&filters.destination_type) {
        must.push(Clause::matching("type", destination_type));
    }
    if let Some(season) = present(&filters.season) {
        must.push(Clause::matching("season", season));
    }
    if let Some(max_price) = present(&filters.max_price) {
        must.push(Clause::at_most("price", parse_number("maxPrice", max_price)?));
    }
    if let Some(rating) = present(&filters.rating) {
        must.push(Clause::term("rating", parse_number("rating", rating)?));
    }
    if let Some(timezone) = present(&filters.timezone) {
        must.push(Clause::matching("timezone", timezone));
    }

    Ok(must)
}

/// Fuzzy, boosted, any-term match of the free text
pub fn relevance_clause(text: &str) -> Clause {
    Clause::MultiMatch {
        query: text.to_string(),
        fields: RELEVANCE_FIELDS
            .iter()
            .map(|(name, boost)| BoostedField::new(name, *boost))
            .collect(),
        fuzziness: Fuzziness::Auto,
        operator: Operator::Or,
    }
}

/// Build the destination search query
///
/// Shape: every present filter as a `must` clause, the free-text relevance
/// clause as the single `should` clause with `minimum_should_match = 1`, then
/// sorted by the requested field ascending with relevance score as the
/// tie-break.
///
/// Text is expected to have passed [`normalize_text`]; the caller owns the
/// empty-text shortcut.
pub fn build_search_query(
    text: &str,
    filters: &SearchFilters,
    sort: SortField,
) -> Result<StructuredQuery, QueryError> {
    let query = BoolQuery {
        must: filter_clauses(filters)?,
        should: vec![relevance_clause(text)],
        minimum_should_match: Some(1),
    };

    Ok(StructuredQuery::new(Clause::Bool(query))
        .sorted_by(SortClause::field(sort.index_field(), SortOrder::Asc))
        .sorted_by(SortClause::Score))
}

/// One page of reviews for a destination, most helpful and newest first
pub fn build_reviews_query(destination: &str, page: u32, size: u32) -> StructuredQuery {
    let from = u64::from(page.saturating_sub(1)) * u64::from(size);

    StructuredQuery::new(Clause::matching("destination", destination))
        .sorted_by(SortClause::field("helpful_votes", SortOrder::Desc))
        .sorted_by(SortClause::field("date", SortOrder::Desc))
        .with_from(from)
        .with_size(u64::from(size))
}
