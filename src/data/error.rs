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

/// Errors that can occur while loading or assembling a dataset.
#[derive(Debug, Error)]
pub enum DataError {
    /// Local dataset file could not be read.
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Remote dataset could not be fetched (network failure or HTTP error status).
    #[error("Failed to fetch dataset from {url}: {source}")]
    Fetch {
        url: String,
        source: reqwest::Error,
    },
    /// CSV content could not be parsed (includes rows of unequal length).
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    /// A row does not have one cell per column.
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Columns passed to `Dataset::from_columns` differ in length.
    #[error("Column '{column}' has {found} values, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
    /// The same column name appears twice.
    #[error("Column '{0}' is declared more than once")]
    DuplicateColumn(String),
    /// The source has no header row.
    #[error("Dataset has no columns")]
    NoColumns,
}
