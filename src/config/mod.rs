// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Dashboard configuration and layout files
//!
//! - `DashboardConfig`: title, theme, data sources and dispatch policy,
//!   read from TOML with every field defaulted
//! - `layout`: node descriptions stored as JSON
//!
//! All writes go through `atomic-write-file`, so a crash mid-write leaves
//! the previous file in place.
//!
//! # Example
//!
//! ```
//! use reactive_dashboard::config::DashboardConfig;
//!
//! let config = DashboardConfig::from_toml_str(r##"
//! title = "Fruit"
//!
//! [theme]
//! background = "#E75480"
//! "##)?;
//!
//! assert_eq!(config.title, "Fruit");
//! assert_eq!(config.theme.text, "#7FDBFF");
//! assert_eq!(config.table.max_rows, 10);
//! # Ok::<(), reactive_dashboard::config::ConfigError>(())
//! ```

pub mod error;
pub mod layout;

pub use error::ConfigError;
pub use layout::{read_layout, write_layout, write_page, PageFile};

use atomic_write_file::AtomicWriteFile;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::core::props::DEFAULT_MAX_ROWS;
use crate::core::validator::validate_colour;
use crate::core::NotifyPolicy;

/// US agricultural exports, 2011
pub const AGRICULTURE_CSV_URL: &str = "https://gist.githubusercontent.com/chriddyp/c78bf172206ce24f77d6363a2d754b59/raw/c353e8ef842413cae56ae3920b8fd78468aa4cb2/usa-agricultural-exports-2011.csv";

/// GDP per capita and life expectancy by country, 2007
pub const GDP_LIFE_EXP_CSV_URL: &str = "https://gist.githubusercontent.com/chriddyp/5d1ea79569ed194d432e56108a04d188/raw/a9f9e8076b837d541398e999dcbac2b2826a81f8/gdp-life-exp-2007.csv";

pub const DEFAULT_STYLESHEET: &str = "https://codepen.io/chriddyp/pen/bWLwgP.css";

/// Page and figure colours
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    pub background: String,
    pub text: String,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: "#111111".to_string(),
            text: "#7FDBFF".to_string(),
        }
    }

    pub fn rose() -> Self {
        Self {
            background: "#E75480".to_string(),
            text: "#7FDBFF".to_string(),
        }
    }

    /// Looks up a named preset (`dark`, `rose`)
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "rose" => Some(Self::rose()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// The agriculture exports table
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// CSV file path or URL
    pub source: String,
    pub max_rows: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            source: AGRICULTURE_CSV_URL.to_string(),
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

/// Settings handed to the external rendering transport
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub listen: String,
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8050".to_string(),
            debug: true,
        }
    }
}

/// Dashboard configuration
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub title: String,
    pub subtitle: String,
    pub external_stylesheets: Vec<String>,
    pub notify_policy: NotifyPolicy,
    /// CSV file path or URL of the life expectancy vs GDP data
    pub bubble_source: String,

    // Tables last so the TOML output stays valid
    pub theme: Theme,
    pub table: TableConfig,
    pub server: ServerConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Hello Taylor's Dash".to_string(),
            subtitle: "Dash: A web application framework for Python".to_string(),
            external_stylesheets: vec![DEFAULT_STYLESHEET.to_string()],
            notify_policy: NotifyPolicy::default(),
            bubble_source: GDP_LIFE_EXP_CSV_URL.to_string(),
            theme: Theme::default(),
            table: TableConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Loads and validates a TOML config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist,
    /// `ConfigError::Parse` for malformed TOML or unknown keys, and
    /// `ConfigError::InvalidTheme` / `ValidationFailed` for bad values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        debug!("Loading dashboard config from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the config as TOML, atomically
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        write_atomic(path, &self.to_toml_string()?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_colour(&self.theme.background).map_err(|source| ConfigError::InvalidTheme {
            field: "background",
            source,
        })?;
        validate_colour(&self.theme.text).map_err(|source| ConfigError::InvalidTheme {
            field: "text",
            source,
        })?;

        if self.table.max_rows == 0 {
            return Err(ConfigError::ValidationFailed(
                "table.max_rows must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Replaces `path` with `contents` via temp-file-then-rename
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
    let mut file = AtomicWriteFile::options()
        .open(path)
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to open for atomic write: {}", e)))?;

    file.write_all(contents.as_bytes())
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to write content: {}", e)))?;

    file.commit()
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to commit atomic write: {}", e)))?;

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests;
