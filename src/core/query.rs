//! Engine-agnostic query descriptor
//!
//! The builders in this crate only assemble these types. Rendering to the
//! document index's JSON DSL happens in [`StructuredQuery::to_body`], which is
//! the single place the wire shape is defined.

use serde_json::{json, Map, Value};

/// A single query condition
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Analyzed match on one field
    Match { field: String, query: String },
    /// Analyzed match across several weighted fields
    MultiMatch {
        query: String,
        fields: Vec<BoostedField>,
        fuzziness: Fuzziness,
        operator: Operator,
    },
    /// Numeric range, either bound optional
    Range {
        field: String,
        gte: Option<f64>,
        lte: Option<f64>,
    },
    /// Exact, unanalyzed value
    Term { field: String, value: Value },
    MatchAll,
    Bool(BoolQuery),
}

impl Clause {
    pub fn matching(field: &str, query: impl Into<String>) -> Self {
        Clause::Match {
            field: field.to_string(),
            query: query.into(),
        }
    }

    pub fn at_most(field: &str, lte: f64) -> Self {
        Clause::Range {
            field: field.to_string(),
            gte: None,
            lte: Some(lte),
        }
    }

    pub fn between(field: &str, gte: f64, lte: f64) -> Self {
        Clause::Range {
            field: field.to_string(),
            gte: Some(gte),
            lte: Some(lte),
        }
    }

    pub fn term(field: &str, value: impl Into<Value>) -> Self {
        Clause::Term {
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Clause::Match { field, query } => json!({ "match": { field: query } }),
            Clause::MultiMatch {
                query,
                fields,
                fuzziness,
                operator,
            } => json!({
                "multi_match": {
                    "query": query,
                    "fields": fields.iter().map(BoostedField::render).collect::<Vec<_>>(),
                    "fuzziness": fuzziness.as_str(),
                    "operator": operator.as_str(),
                }
            }),
            Clause::Range { field, gte, lte } => {
                let mut bounds = Map::new();
                if let Some(gte) = gte {
                    bounds.insert("gte".to_string(), json!(gte));
                }
                if let Some(lte) = lte {
                    bounds.insert("lte".to_string(), json!(lte));
                }
                json!({ "range": { field: bounds } })
            }
            Clause::Term { field, value } => json!({ "term": { field: value } }),
            Clause::MatchAll => json!({ "match_all": {} }),
            Clause::Bool(bool_query) => bool_query.to_json(),
        }
    }
}

/// Field name with a relevance multiplier
#[derive(Debug, Clone, PartialEq)]
pub struct BoostedField {
    pub name: String,
    pub boost: u32,
}

impl BoostedField {
    pub fn new(name: &str, boost: u32) -> Self {
        Self {
            name: name.to_string(),
            boost,
        }
    }

    fn render(&self) -> String {
        if self.boost == 1 {
            self.name.clone()
        } else {
            format!("{}^{}", self.name, self.boost)
        }
    }
}

/// Edit-distance tolerance for text matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fuzziness {
    /// Scales with term length: exact for short terms, up to 2 edits for long ones
    Auto,
}

impl Fuzziness {
    fn as_str(self) -> &'static str {
        match self {
            Fuzziness::Auto => "AUTO",
        }
    }
}

/// How individual query terms combine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Or,
    And,
}

impl Operator {
    fn as_str(self) -> &'static str {
        match self {
            Operator::Or => "or",
            Operator::And => "and",
        }
    }
}

/// Boolean combination: every `must` clause and at least
/// `minimum_should_match` of the `should` clauses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    pub must: Vec<Clause>,
    pub should: Vec<Clause>,
    pub minimum_should_match: Option<u32>,
}

impl BoolQuery {
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        if !self.must.is_empty() {
            body.insert(
                "must".to_string(),
                Value::Array(self.must.iter().map(Clause::to_json).collect()),
            );
        }
        if !self.should.is_empty() {
            body.insert(
                "should".to_string(),
                Value::Array(self.should.iter().map(Clause::to_json).collect()),
            );
        }
        if let Some(minimum) = self.minimum_should_match {
            body.insert("minimum_should_match".to_string(), json!(minimum));
        }
        json!({ "bool": body })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// One key of a multi-key sort
#[derive(Debug, Clone, PartialEq)]
pub enum SortClause {
    Field { field: String, order: SortOrder },
    /// Engine relevance score
    Score,
}

impl SortClause {
    pub fn field(field: &str, order: SortOrder) -> Self {
        SortClause::Field {
            field: field.to_string(),
            order,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            SortClause::Field { field, order } => json!({ field: { "order": order.as_str() } }),
            SortClause::Score => json!("_score"),
        }
    }
}

/// Complete request against one collection of the document index
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredQuery {
    pub query: Clause,
    pub sort: Vec<SortClause>,
    pub from: Option<u64>,
    pub size: Option<u64>,
}

impl StructuredQuery {
    pub fn new(query: Clause) -> Self {
        Self {
            query,
            sort: Vec::new(),
            from: None,
            size: None,
        }
    }

    pub fn sorted_by(mut self, sort: SortClause) -> Self {
        self.sort.push(sort);
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_from(mut self, from: u64) -> Self {
        self.from = Some(from);
        self
    }

    /// The top-level boolean query, if this is one
    pub fn bool_query(&self) -> Option<&BoolQuery> {
        match &self.query {
            Clause::Bool(bool_query) => Some(bool_query),
            _ => None,
        }
    }

    /// Render as a search request body
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("query".to_string(), self.query.to_json());
        if !self.sort.is_empty() {
            body.insert(
                "sort".to_string(),
                Value::Array(self.sort.iter().map(SortClause::to_json).collect()),
            );
        }
        if let Some(from) = self.from {
            body.insert("from".to_string(), json!(from));
        }
        if let Some(size) = self.size {
            body.insert("size".to_string(), json!(size));
        }
        Value::Object(body)
    }
}
