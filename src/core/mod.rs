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

//! src/core/mod.rs
//!
//! Core business logic module
//!
//! This module contains the declarative UI tree and the reactive binding
//! machinery built over it:
//! - Type definitions for nodes, properties and node descriptions
//! - Typed per-kind configuration and its validation
//! - The immutable component tree with O(1) id lookup
//! - The binding registry that dispatches input changes to handlers
//! - The line-oriented event parser
//!
//! Nothing here performs I/O, so everything is unit tested without a
//! network or a rendering layer.

pub mod binding;
pub mod event;
pub mod figure;
pub mod props;
pub mod tree;
pub mod types;
pub mod validator;

pub use binding::{
    BindingRegistry, BindingRule, Dispatch, HandlerError, HandlerResult, InputEvent,
    NotifyPolicy, OutputChange, RegistryError, RuleHandle,
};
pub use event::{parse_event, parse_event_script, EventParseError};
pub use figure::{BarMode, ChartKind, FigureLayout, FigureSpec, Point, Series};
pub use props::{NodeConfig, DEFAULT_MAX_ROWS};
pub use tree::{ComponentTree, DatasetCatalog, Node, TreeBuilder, TreeError};
pub use types::*;
pub use validator::{validate_node, ValidationError};

#[cfg(test)]
mod tests;
