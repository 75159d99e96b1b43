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

//! Table builder

use crate::core::{NodeKind, NodeSpec};

/// Builds a table node showing the first `max_rows` records of a dataset
///
/// The header row comes from the dataset's columns; rows beyond
/// `max_rows` are left out.
pub fn generate_table(dataset: &str, max_rows: usize) -> NodeSpec {
    NodeSpec::new(NodeKind::Table)
        .prop("dataset", dataset)
        .prop("max_rows", max_rows)
}
