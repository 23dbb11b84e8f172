use std::fs;
use std::path::PathBuf;

use crate::error::Result;

/// Where a dataset or project config comes from.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    File(PathBuf),
    Inline(String),
}

/// Read the config text and make sure it is well-formed YAML. The text is
/// returned unchanged; the server does the real validation.
pub fn load(source: &ConfigSource) -> Result<String> {
    let text = match source {
        ConfigSource::File(path) => fs::read_to_string(path)?,
        ConfigSource::Inline(text) => text.clone(),
    };
    check_yaml(&text)?;
    Ok(text)
}

fn check_yaml(text: &str) -> Result<()> {
    serde_yaml::from_str::<serde_yaml::Value>(text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_inline_passthrough() {
        let text = "sort: price\nfields: [id, name]\n";
        let loaded = load(&ConfigSource::Inline(text.to_string())).unwrap();
        assert_eq!(loaded, text);
    }

    #[test]
    fn test_malformed_yaml() {
        let source = ConfigSource::Inline("key: [unclosed".to_string());
        assert!(load(&source).is_err());
    }

    #[test]
    fn test_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "datasets:\n  - products").unwrap();

        let loaded = load(&ConfigSource::File(file.path().to_path_buf())).unwrap();
        assert!(loaded.starts_with("datasets:"));
    }
}
