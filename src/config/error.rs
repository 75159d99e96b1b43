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

use std::path::PathBuf;
use thiserror::Error;

use crate::core::ValidationError;

/// Errors that can occur while loading or saving configuration and layouts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// TOML could not be parsed into a `DashboardConfig`.
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialise config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A theme colour is not `#RGB` / `#RRGGBB`.
    #[error("Invalid theme {field}: {source}")]
    InvalidTheme {
        field: &'static str,
        source: ValidationError,
    },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Layout file is not a valid node description.
    #[error("Invalid layout: {0}")]
    Layout(#[from] serde_json::Error),

    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),

    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
