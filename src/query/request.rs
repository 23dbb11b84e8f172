use serde::Serialize;

use super::ast::FilterSet;

const MATCH_ALL: &str = "True";

/// Body of a dataset query. Either `filter` or `expr` is present, never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub reverse: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aggregate: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub discard: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl QueryRequest {
    /// A non-empty filter set takes precedence over `expr`; with neither,
    /// the query matches every record.
    pub fn new(filter: FilterSet, expr: Option<String>) -> Self {
        if !filter.is_empty() {
            return Self {
                filter: Some(filter),
                ..Self::default()
            };
        }

        let expr = expr
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| MATCH_ALL.to_string());
        Self {
            expr: Some(expr),
            ..Self::default()
        }
    }

    pub fn sort(mut self, field: Option<String>) -> Self {
        self.sort = field.filter(|f| !f.is_empty());
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: Option<u64>) -> Self {
        self.offset = offset.filter(|&n| n > 0);
        self
    }

    pub fn aggregate(mut self, aggregate: Vec<String>) -> Self {
        self.aggregate = aggregate;
        self
    }

    pub fn fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    pub fn discard(mut self, discard: bool) -> Self {
        self.discard = discard;
        self
    }
}
