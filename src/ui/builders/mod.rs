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

//! UI builder modules
//!
//! Contains modular builders for constructing the dashboards:
//! - Page header creation
//! - Layout construction and dataset loading
//! - Table generation
//! - Callback wiring

pub mod handlers;
pub mod header;
pub mod layout;
pub mod table;

pub use handlers::{update_output_div, wire_up_handlers};
pub use header::build_header;
pub use layout::{build_main_layout, fruit_dataset, layout_spec, load_datasets, Variant};
pub use table::generate_table;
