//! Project-wide constants.

use std::path::PathBuf;

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Solver endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/ask";

/// Answer text shown for every failed request.
pub const ERROR_MESSAGE: &str = "Error connecting to backend";

/// Config key holding the persisted endpoint URL.
pub const ENDPOINT_KEY: &str = "endpoint_url";

/// Default database path: `~/.math-agent/math-agent.db`.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".math-agent")
        .join("math-agent.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consts_are_non_empty() {
        assert!(!AUTHOR.is_empty());
        assert!(!HOMEPAGE.is_empty());
        assert!(!REPO.is_empty());
        assert!(!DEFAULT_ENDPOINT.is_empty());
    }

    #[test]
    fn consts_from_cargo_toml() {
        assert!(AUTHOR.contains("Assaf Sapir"));
        assert!(REPO.contains("math-agent"));
    }

    #[test]
    fn default_endpoint_is_local_ask() {
        assert_eq!(DEFAULT_ENDPOINT, "http://127.0.0.1:8000/ask");
    }

    #[test]
    fn error_message_is_exact() {
        assert_eq!(ERROR_MESSAGE, "Error connecting to backend");
    }

    #[test]
    fn default_db_path_ends_with_db_file() {
        let path = default_db_path();
        assert!(path.ends_with(".math-agent/math-agent.db"));
    }
}
