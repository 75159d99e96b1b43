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

//! Tabular datasets attached to chart and table nodes
//!
//! - `dataset.rs`: The immutable `Dataset` and its `Scalar` cells
//! - `source.rs`: Loading from literals, CSV files and CSV URLs
//! - `error.rs`: `DataError`
//!
//! CSV parsing is delegated to the `csv` crate and HTTP to `reqwest`.

pub mod dataset;
pub mod error;
pub mod source;

pub use dataset::{Dataset, Record, Scalar};
pub use error::DataError;
pub use source::DatasetSource;

#[cfg(test)]
mod tests;
