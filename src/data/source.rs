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

//! Dataset sources
//!
//! Datasets come from a literal value, a local CSV file or a remote CSV
//! URL. Each is loaded exactly once; failures are returned to the caller
//! and never retried here.

use log::{debug, info};
use std::fmt;
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use crate::data::{DataError, Dataset};

/// Upper bound on a single remote fetch
const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Where a dataset is loaded from
#[derive(Clone, Debug, PartialEq)]
pub enum DatasetSource {
    /// Literal data built in code
    Inline(Dataset),
    /// CSV file on disk
    File(PathBuf),
    /// CSV served over HTTP(S)
    Url(String),
}

impl DatasetSource {
    /// Classifies a location string
    ///
    /// `http://` and `https://` locations are URLs; anything else is a file
    /// path, with a leading `~` expanded to the home directory.
    pub fn locate(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            DatasetSource::Url(location.to_string())
        } else {
            DatasetSource::File(PathBuf::from(shellexpand::tilde(location).as_ref()))
        }
    }

    /// Loads the dataset
    ///
    /// # Errors
    ///
    /// - `DataError::Io` if a file cannot be opened
    /// - `DataError::Fetch` on network failure or a non-success HTTP status
    /// - `DataError::Csv` / `DataError::RaggedRow` on malformed content
    pub fn load(&self) -> Result<Dataset, DataError> {
        debug!("Loading dataset from {}", self);

        let dataset = match self {
            DatasetSource::Inline(dataset) => dataset.clone(),
            DatasetSource::File(path) => {
                let file = File::open(path).map_err(|source| DataError::Io {
                    path: path.clone(),
                    source,
                })?;
                Dataset::from_csv_reader(file)?
            }
            DatasetSource::Url(url) => Dataset::from_csv_str(&fetch(url)?)?,
        };

        info!(
            "Loaded {} record{} ({} columns) from {}",
            dataset.len(),
            if dataset.len() == 1 { "" } else { "s" },
            dataset.columns().len(),
            self
        );

        Ok(dataset)
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Inline(_) => write!(f, "inline data"),
            DatasetSource::File(path) => write!(f, "{}", path.display()),
            DatasetSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Fetches a remote CSV body
fn fetch(url: &str) -> Result<String, DataError> {
    let wrap = |source| DataError::Fetch {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(wrap)?;

    client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(wrap)
}
