use colored::Colorize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Pretty JSON with object keys in sorted order.
pub fn format_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(&sorted(value))?)
}

fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            Value::Object(
                keys.into_iter()
                    .map(|k| (k.clone(), sorted(&map[k])))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", format_json(value)?);
    Ok(())
}

/// Print `err` to stderr, followed by the server's response body if the
/// server rejected the request.
pub fn report(err: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);
    if let Some(body) = err.response_body() {
        eprintln!("{}", body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_sorted() {
        let value: Value = serde_json::from_str(r#"{"b": 1, "a": {"d": 2, "c": 3}}"#).unwrap();
        let text = format_json(&value).unwrap();
        assert!(text.find("\"a\"").unwrap() < text.find("\"b\"").unwrap());
        assert!(text.find("\"c\"").unwrap() < text.find("\"d\"").unwrap());
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), json!({"a": {"c": 3, "d": 2}, "b": 1}));
    }
}
