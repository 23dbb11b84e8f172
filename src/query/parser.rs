use super::ast::{FilterClause, FilterOp, FilterSet};

#[derive(Debug, thiserror::Error)]
#[error("Invalid filter {filter:?}: {message}")]
pub struct FilterError {
    pub filter: String,
    pub message: String,
}

impl FilterError {
    fn new(filter: &str, message: impl Into<String>) -> Self {
        Self {
            filter: filter.to_string(),
            message: message.into(),
        }
    }
}

/// Splits `input` at the first occurrence of the first operator found in
/// scan order and decodes the right-hand side as JSON.
pub fn parse_clause(input: &str) -> Result<FilterClause, FilterError> {
    let Some((op, pos)) = FilterOp::SCAN_ORDER
        .iter()
        .find_map(|op| input.find(op.literal()).map(|pos| (*op, pos)))
    else {
        return Err(FilterError::new(
            input,
            "no operator found (expected one of >=, <=, =, >, <)",
        ));
    };

    let field = &input[..pos];
    let raw_value = &input[pos + op.literal().len()..];

    let value = serde_json::from_str(raw_value)
        .map_err(|e| FilterError::new(input, format!("value is not valid JSON ({})", e)))?;

    Ok(FilterClause {
        field: field.to_string(),
        op,
        value,
    })
}

pub fn translate<I, S>(filters: I) -> Result<FilterSet, FilterError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = FilterSet::new();
    for raw in filters {
        let clause = parse_clause(raw.as_ref())?;
        if let Some(previous) = set.insert(clause) {
            tracing::debug!(filter = raw.as_ref(), %previous, "filter overrides earlier clause");
        }
    }
    Ok(set)
}
