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

//! Dashboard application layer
//!
//! # Architecture
//!
//! - **Model**: ComponentTree, BindingRegistry (in the `core` module)
//! - **Context**: `AppContext` owns one dashboard's tree and rules
//! - **View**: the plain-text outline renderer and the output sinks
//!
//! # Module Structure
//!
//! ```text
//! ui/
//! ├── mod.rs          // This file - exports
//! ├── app.rs          // AppContext lifecycle
//! ├── render.rs       // Plain-text outline
//! ├── transport.rs    // Event lines in, output changes out
//! └── builders/       // Dashboard layouts and callback wiring
//! ```

pub mod app;
pub mod builders;
pub mod render;
pub mod transport;

pub use app::{AppContext, AppError, Lifecycle, ShutdownReport};
pub use builders::Variant;
pub use render::{render_outline, render_tree};
pub use transport::{run_events, run_lines, ConsoleSink, OutputSink, RecordingSink, TransportSummary};

#[cfg(test)]
mod tests;
