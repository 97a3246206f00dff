//! Form configuration and its SQLite-backed key-value store.
//!
//! [`FormConfig`] is what the form and solver are built from. [`ConfigStore`]
//! remembers the last endpoint between sessions; pass the same database path
//! the CLI was given with `--db`.

use anyhow::{Context, Result, bail};
use reqwest::Url;
use rusqlite::Connection;
use std::sync::Mutex;

use crate::consts::{DEFAULT_ENDPOINT, ENDPOINT_KEY};

/// Injected configuration for a question form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    pub endpoint_url: String,
}

impl FormConfig {
    /// Build a config after checking the endpoint is an http(s) URL.
    pub fn new(endpoint_url: impl Into<String>) -> Result<Self> {
        let endpoint_url = endpoint_url.into();
        parse_endpoint(&endpoint_url)?;
        Ok(Self { endpoint_url })
    }

    /// The endpoint as a parsed URL.
    pub fn endpoint(&self) -> Result<Url> {
        parse_endpoint(&self.endpoint_url)
    }

    /// Pick the endpoint: explicit override, then the stored value, then the default.
    pub fn resolve(explicit: Option<&str>, store: &ConfigStore) -> Result<Self> {
        if let Some(url) = explicit {
            return Self::new(url);
        }
        match store.get(ENDPOINT_KEY)? {
            Some(url) => Self::new(url).context("stored endpoint is invalid"),
            None => Ok(Self::default()),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("invalid endpoint URL: {raw}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("unsupported endpoint scheme: {other}"),
    }
}

/// Persistent key-value configuration store.
pub struct ConfigStore {
    conn: Mutex<Connection>,
}

impl ConfigStore {
    /// Open or create the config table in the given database.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open config database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS config (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .context("failed to create config table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Get a config value by key.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT value FROM config WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Set a config value (upsert).
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO config (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    /// Remove a config key.
    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM config WHERE key = ?1", [key])?;
        Ok(())
    }

    /// Persist the endpoint of `config` so the next session picks it up.
    pub fn save_endpoint(&self, config: &FormConfig) -> Result<()> {
        self.set(ENDPOINT_KEY, &config.endpoint_url)
    }
}
