use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// Read a JSON upload file (`-` for stdin) and return the records found at
/// `keypath`.
pub fn read_dataset(path: &Path, keypath: &[String]) -> Result<Vec<Value>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };

    let document: Value = serde_json::from_str(&content)?;
    extract_dataset(document, keypath)
}

pub fn extract_dataset(document: Value, keypath: &[String]) -> Result<Vec<Value>> {
    let mut current = document;
    for key in keypath {
        current = match current {
            Value::Object(mut map) => map
                .remove(key)
                .ok_or_else(|| Error::Dataset(format!("Not found key {:?}", key)))?,
            other => {
                return Err(Error::Dataset(format!(
                    "Cannot look up key {:?} in {}",
                    key,
                    type_name(&other)
                )))
            }
        };
    }

    let records = match current {
        Value::Array(records) => records,
        other => {
            return Err(Error::Dataset(format!(
                "Incorrect dataset (type: {}, but need list)",
                type_name(&other)
            )))
        }
    };

    if let Some(first) = records.first() {
        if !first.is_object() {
            return Err(Error::Dataset(format!(
                "Incorrect dataset record (type: {}, but need object)",
                type_name(first)
            )));
        }
    }

    Ok(records)
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn keys(path: &[&str]) -> Vec<String> {
        path.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plain_list() {
        let records = extract_dataset(json!([{"id": 1}, {"id": 2}]), &[]).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_keypath() {
        let doc = json!({"data": {"products": [{"id": 1}]}});
        let records = extract_dataset(doc, &keys(&["data", "products"])).unwrap();
        assert_eq!(records, vec![json!({"id": 1})]);
    }

    #[test]
    fn test_missing_key() {
        let err = extract_dataset(json!({"data": []}), &keys(&["items"])).unwrap_err();
        assert!(err.to_string().contains("Not found key"));
    }

    #[test]
    fn test_not_a_list() {
        let err = extract_dataset(json!({"id": 1}), &[]).unwrap_err();
        assert!(err.to_string().contains("need list"));
    }

    #[test]
    fn test_records_must_be_objects() {
        assert!(extract_dataset(json!([1, 2, 3]), &[]).is_err());
        assert!(extract_dataset(json!([]), &[]).unwrap().is_empty());
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"products": [{{"id": 1, "name": "phone"}}]}}"#).unwrap();

        let records = read_dataset(file.path(), &keys(&["products"])).unwrap();
        assert_eq!(records[0]["name"], "phone");
    }
}
