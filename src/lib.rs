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

//! Reactive Dashboard
//!
//! Declarative component trees and reactive property bindings for data
//! dashboards: a page is described as a tree of typed nodes, and binding
//! rules recompute output properties whenever the inputs they read change.
//!
//! # Features
//!
//! - **Validated Trees:** Every node's properties are checked against its kind
//! - **Binding Registry:** One producer per output, cycle detection, cascades
//! - **Datasets:** Inline, CSV file and CSV URL sources shared between nodes
//! - **Handler Isolation:** A failing or panicking handler never stops dispatch
//! - **Atomic Writes:** Layouts and configs are written without partial files
//!
//! # Architecture
//!
//! - **`core`:** Node types, validation, the component tree and the binding registry
//! - **`data`:** Tabular datasets and their sources
//! - **`config`:** Dashboard settings and layout files
//! - **`ui`:** Application context, dashboard builders, outline renderer, event transport
//!
//! # Examples
//!
//! ## Building a tree and binding an output
//!
//! ```
//! use reactive_dashboard::core::{
//!     BindingRegistry, BindingRule, ComponentTree, NodeKind, NodeSpec, PropertyRef,
//! };
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let tree = ComponentTree::build(&NodeSpec::container(vec![
//!     NodeSpec::new(NodeKind::Input).with_id("my-input").prop("value", "hi"),
//!     NodeSpec::container(vec![]).with_id("my-output"),
//! ]))?;
//!
//! let mut registry = BindingRegistry::new(Arc::new(tree));
//! registry.register(BindingRule::new(
//!     PropertyRef::new("my-output", "children"),
//!     vec![PropertyRef::new("my-input", "value")],
//!     |inputs| Ok(json!(format!("Output: {}", inputs[0].as_str().unwrap_or_default()))),
//! ))?;
//!
//! let dispatch = registry.notify(PropertyRef::new("my-input", "value"), json!("there"))?;
//! assert_eq!(dispatch.changes[0].value, json!("Output: there"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Running a built-in dashboard
//!
//! ```no_run
//! use reactive_dashboard::config::DashboardConfig;
//! use reactive_dashboard::ui::{AppContext, Variant};
//!
//! let mut ctx = AppContext::from_variant(DashboardConfig::default(), Variant::Full)?;
//! ctx.start()?;
//! println!("{}", ctx.outline());
//! ctx.shutdown();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod core;
pub mod data;
pub mod ui;

// Re-export commonly used types for convenience
pub use crate::core::{BindingRegistry, BindingRule, ComponentTree, NodeKind, NodeSpec, PropertyRef};
