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

//! Layout files
//!
//! A layout is a root `NodeSpec` serialised as pretty JSON, either bare or
//! wrapped in a `PageFile` that also carries the page settings the
//! rendering transport needs (title, stylesheets, listen address). Reading
//! only checks the JSON shape; property validation happens when the tree
//! is built.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::{write_atomic, ConfigError, DashboardConfig, ServerConfig};
use crate::core::NodeSpec;

/// A layout together with its page settings
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PageFile {
    pub title: String,
    pub external_stylesheets: Vec<String>,
    pub server: ServerConfig,
    pub layout: NodeSpec,
}

impl PageFile {
    pub fn new(config: &DashboardConfig, layout: NodeSpec) -> Self {
        Self {
            title: config.title.clone(),
            external_stylesheets: config.external_stylesheets.clone(),
            server: config.server.clone(),
            layout,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LayoutFile {
    Page(PageFile),
    Bare(NodeSpec),
}

/// Reads a layout file, bare or wrapped in a `PageFile`
pub fn read_layout(path: &Path) -> Result<NodeSpec, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let spec = match serde_json::from_str::<LayoutFile>(&content)? {
        LayoutFile::Page(page) => page.layout,
        LayoutFile::Bare(spec) => spec,
    };
    debug!("Read layout of {} nodes from {}", spec.count(), path.display());
    Ok(spec)
}

pub fn write_layout(path: &Path, spec: &NodeSpec) -> Result<(), ConfigError> {
    write_json(path, spec)
}

/// Writes a layout with its page settings
pub fn write_page(path: &Path, page: &PageFile) -> Result<(), ConfigError> {
    write_json(path, page)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    write_atomic(path, &content)
}
