//! Process setup shared by both binaries: dotenv loading and logging.

use std::path::PathBuf;

use crate::error::Result;

const DEFAULT_DOTENV: &str = ".env";

/// Load the dotenv file named by `$<dotenv_var>` (default `.env`).
/// A missing file yields `Ok(None)`; a file that cannot be parsed is an error.
pub fn load_dotenv(dotenv_var: &str) -> Result<Option<PathBuf>> {
    let file = std::env::var(dotenv_var).unwrap_or_else(|_| DEFAULT_DOTENV.to_string());
    match dotenvy::from_filename(&file) {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Log to stderr so command output stays machine-readable. The filter comes
/// from `$<log_var>`, then `$RUST_LOG`, then `warn`.
pub fn init_logging(log_var: &str) {
    let filter = std::env::var(log_var)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact()
        .with_env_filter(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_dotenv_from_named_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "SASHIMI_TEST_DOTENV_VALUE=from-file").unwrap();

        std::env::set_var("SASHIMI_TEST_DOTENV", file.path());
        let loaded = load_dotenv("SASHIMI_TEST_DOTENV").unwrap();

        assert_eq!(loaded.as_deref(), Some(file.path()));
        assert_eq!(
            std::env::var("SASHIMI_TEST_DOTENV_VALUE").unwrap(),
            "from-file"
        );
    }

    #[test]
    fn test_missing_dotenv_is_ignored() {
        std::env::set_var("SASHIMI_TEST_NO_DOTENV", "/nonexistent/sashimi.env");
        assert!(load_dotenv("SASHIMI_TEST_NO_DOTENV").unwrap().is_none());
    }

    #[test]
    fn test_malformed_dotenv_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "SASHIMI_TEST_BROKEN=\"unterminated").unwrap();

        std::env::set_var("SASHIMI_TEST_BROKEN_DOTENV", file.path());
        let err = load_dotenv("SASHIMI_TEST_BROKEN_DOTENV").unwrap_err();
        assert!(matches!(err, crate::error::Error::Dotenv(_)));
    }
}
