use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Ge,
    Le,
    Eq,
    Gt,
    Lt,
}

impl FilterOp {
    /// Scan order. Two-character operators come first so that `price<=100`
    /// never splits on the bare `<` or `=`.
    pub const SCAN_ORDER: [FilterOp; 5] = [
        FilterOp::Ge,
        FilterOp::Le,
        FilterOp::Eq,
        FilterOp::Gt,
        FilterOp::Lt,
    ];

    pub fn literal(self) -> &'static str {
        match self {
            FilterOp::Ge => ">=",
            FilterOp::Le => "<=",
            FilterOp::Eq => "=",
            FilterOp::Gt => ">",
            FilterOp::Lt => "<",
        }
    }

    /// Suffix the server expects on the field name.
    pub fn suffix(self) -> &'static str {
        match self {
            FilterOp::Ge => "__ge",
            FilterOp::Le => "__le",
            FilterOp::Eq => "",
            FilterOp::Gt => "__gt",
            FilterOp::Lt => "__lt",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl FilterClause {
    pub fn key(&self) -> String {
        format!("{}{}", self.field, self.op.suffix())
    }
}

/// Suffixed field name to decoded value.
///
/// Inserting a clause whose key is already present replaces the earlier
/// value, so `id>=5 id>=10` keeps only `id__ge: 10`. Callers that expect
/// both bounds to apply should use distinct operators.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterSet(Map<String, Value>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, clause: FilterClause) -> Option<Value> {
        let key = clause.key();
        self.0.insert(key, clause.value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
