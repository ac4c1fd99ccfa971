//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.signdesk.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `SIGNDESK_PATH`, `SIGNDESK_DEBOUNCE_MS`, …
//! 4. **Command-line arguments** – `--path`/`-p`, `--query`/`-q`, …
//!
//! # Configuration File
//!
//! ```toml
//! path = "/screens"
//! query = "page=2&size=50"
//! page = 2
//! debounce_ms = 1000
//! fields = "search,name"
//! option_fields = "status,active"
//! set = "search=Lobby,active=true"
//! ```

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::error::SigndeskError;
use crate::filter::{FilterDescriptor, FilterDescriptors, FilterValue};
use crate::query::NavigableQuery;

const DEFAULT_PATH: &str = "/";
const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use signdesk::SigndeskConfig;
///
/// let config = SigndeskConfig::load().expect("failed to load configuration");
/// let descriptors = config.descriptors().expect("field keys are unique");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "SIGNDESK",
    discovery(
        dotfile_name = ".signdesk.toml",
        config_file_name = "signdesk.toml",
        app_name = "signdesk"
    )
)]
pub struct SigndeskConfig {
    /// Path of the list page, e.g. `/screens`.
    ///
    /// Can be provided via:
    /// - CLI: `--path <PATH>` or `-p <PATH>`
    /// - Environment: `SIGNDESK_PATH`
    /// - Config file: `path = "..."`
    #[ortho_config(cli_short = 'p')]
    pub path: Option<String>,

    /// Query string the page is opened with.
    ///
    /// Can be provided via:
    /// - CLI: `--query <QUERY>` or `-q <QUERY>`
    /// - Environment: `SIGNDESK_QUERY`
    /// - Config file: `query = "..."`
    #[ortho_config(cli_short = 'q')]
    pub query: Option<String>,

    /// 1-based page currently displayed. Defaults to 1.
    #[ortho_config()]
    pub page: u32,

    /// Debounce applied to filter edits, in milliseconds. Defaults to 1000.
    #[ortho_config()]
    pub debounce_ms: u64,

    /// Comma-separated keys of free-text filter fields.
    #[ortho_config(cli_short = 'f')]
    pub fields: Option<String>,

    /// Comma-separated keys of option filter fields.
    #[ortho_config(cli_short = 'o')]
    pub option_fields: Option<String>,

    /// Comma-separated `key=value` filter edits to replay, in order.
    #[ortho_config(cli_short = 's')]
    pub set: Option<String>,

    /// Zero-based page index to jump to after the edits.
    #[ortho_config()]
    pub page_change: Option<u32>,

    /// Writes telemetry events to stderr as JSON lines.
    ///
    /// Note: environment variable `SIGNDESK_TELEMETRY` is not supported
    /// because `ortho_config` does not load boolean values from the
    /// environment.
    #[ortho_config()]
    pub telemetry: bool,
}

impl Default for SigndeskConfig {
    fn default() -> Self {
        Self {
            path: None,
            query: None,
            page: 1,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            fields: None,
            option_fields: None,
            set: None,
            page_change: None,
            telemetry: false,
        }
    }
}

impl SigndeskConfig {
    /// Path of the list page, `/` when unset.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or(DEFAULT_PATH)
    }

    /// Query the page is opened with.
    #[must_use]
    pub fn initial_query(&self) -> NavigableQuery {
        self.query
            .as_deref()
            .map_or_else(NavigableQuery::new, NavigableQuery::parse)
    }

    /// Debounce delay as a [`Duration`].
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Builds filter descriptors: text fields first, then option fields.
    ///
    /// # Errors
    ///
    /// Returns [`SigndeskError::Filter`] when a key is listed twice.
    pub fn descriptors(&self) -> Result<FilterDescriptors, SigndeskError> {
        let text = split_list(self.fields.as_deref())
            .map(|key| FilterDescriptor::text(key, key));
        let options = split_list(self.option_fields.as_deref())
            .map(|key| FilterDescriptor::option(key, key, []));
        Ok(FilterDescriptors::new(text.chain(options).collect())?)
    }

    /// Parses the configured `key=value` edits.
    ///
    /// Values go through the same `true`/`false` coercion as query values.
    ///
    /// # Errors
    ///
    /// Returns [`SigndeskError::InvalidEdit`] for an entry without `=` or
    /// with an empty key.
    pub fn edits(&self) -> Result<Vec<(String, FilterValue)>, SigndeskError> {
        split_list(self.set.as_deref())
            .map(|entry| match entry.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    Ok((key.trim().to_owned(), FilterValue::from_query(value)))
                }
                _ => Err(SigndeskError::InvalidEdit {
                    entry: entry.to_owned(),
                }),
            })
            .collect()
    }
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

#[cfg(test)]
mod tests;
