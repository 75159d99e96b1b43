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

//! Typed node configuration
//!
//! One props struct per `NodeKind`. Field names (after serde renames) are
//! the property names bindings address, so `NodeConfig::property` can read
//! any of them back as JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::figure::FigureSpec;
use crate::core::types::{InputType, NodeKind, Props, SelectOption, Selection, Style, TextLevel};
use crate::data::Dataset;

/// Rows shown by a table when `max_rows` is not given
pub const DEFAULT_MAX_ROWS: usize = 10;

fn default_max_rows() -> usize {
    DEFAULT_MAX_ROWS
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ContainerProps {
    #[serde(default)]
    pub style: Style,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TextProps {
    #[serde(default)]
    pub level: TextLevel,

    #[serde(default, rename = "children")]
    pub content: String,

    #[serde(default)]
    pub style: Style,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChartProps {
    pub figure: FigureSpec,

    #[serde(default)]
    pub style: Style,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TableProps {
    /// Name of the dataset rendered by the table
    pub dataset: String,

    #[serde(default = "default_max_rows")]
    pub max_rows: usize,

    /// Columns to show, in order; all columns when absent
    #[serde(default)]
    pub columns: Option<Vec<String>>,

    #[serde(default)]
    pub style: Style,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InputProps {
    #[serde(default)]
    pub value: String,

    #[serde(default, rename = "type")]
    pub input_type: InputType,

    #[serde(default)]
    pub placeholder: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DropdownProps {
    pub options: Vec<SelectOption>,

    #[serde(default)]
    pub value: Option<Selection>,

    #[serde(default)]
    pub multi: bool,

    #[serde(default)]
    pub placeholder: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RadioItemsProps {
    pub options: Vec<SelectOption>,

    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChecklistProps {
    pub options: Vec<SelectOption>,

    #[serde(default)]
    pub value: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SliderProps {
    pub min: f64,
    pub max: f64,

    #[serde(default)]
    pub step: Option<f64>,

    #[serde(default)]
    pub value: Option<f64>,

    /// Tick labels keyed by position (JSON object keys are strings)
    #[serde(default)]
    pub marks: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MarkdownProps {
    #[serde(default, rename = "children")]
    pub source: String,
}

/// Validated configuration of a node, one variant per kind
///
/// Chart and table nodes hold the dataset they draw from; the dataset is
/// shared, never copied per node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeConfig {
    Container(ContainerProps),
    Text(TextProps),
    Chart { props: ChartProps, data: Arc<Dataset> },
    Table { props: TableProps, data: Arc<Dataset> },
    Input(InputProps),
    Dropdown(DropdownProps),
    RadioItems(RadioItemsProps),
    Checklist(ChecklistProps),
    Slider(SliderProps),
    Markdown(MarkdownProps),
}

impl NodeConfig {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeConfig::Container(_) => NodeKind::Container,
            NodeConfig::Text(_) => NodeKind::Text,
            NodeConfig::Chart { .. } => NodeKind::Chart,
            NodeConfig::Table { .. } => NodeKind::Table,
            NodeConfig::Input(_) => NodeKind::Input,
            NodeConfig::Dropdown(_) => NodeKind::Dropdown,
            NodeConfig::RadioItems(_) => NodeKind::RadioItems,
            NodeConfig::Checklist(_) => NodeKind::Checklist,
            NodeConfig::Slider(_) => NodeKind::Slider,
            NodeConfig::Markdown(_) => NodeKind::Markdown,
        }
    }

    pub fn style(&self) -> Option<&Style> {
        match self {
            NodeConfig::Container(props) => Some(&props.style),
            NodeConfig::Text(props) => Some(&props.style),
            NodeConfig::Chart { props, .. } => Some(&props.style),
            NodeConfig::Table { props, .. } => Some(&props.style),
            _ => None,
        }
    }

    /// The dataset attached to a chart or table node
    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        match self {
            NodeConfig::Chart { data, .. } | NodeConfig::Table { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Every property the kind exposes, with its initial value
    ///
    /// Properties that are declared but unset read as `null`. A table's
    /// `data` is its visible rows; a container's `children` starts unset.
    pub fn properties(&self) -> Props {
        let serialised = match self {
            NodeConfig::Container(props) => serde_json::to_value(props),
            NodeConfig::Text(props) => serde_json::to_value(props),
            NodeConfig::Chart { props, .. } => serde_json::to_value(props),
            NodeConfig::Table { props, .. } => serde_json::to_value(props),
            NodeConfig::Input(props) => serde_json::to_value(props),
            NodeConfig::Dropdown(props) => serde_json::to_value(props),
            NodeConfig::RadioItems(props) => serde_json::to_value(props),
            NodeConfig::Checklist(props) => serde_json::to_value(props),
            NodeConfig::Slider(props) => serde_json::to_value(props),
            NodeConfig::Markdown(props) => serde_json::to_value(props),
        };

        let mut properties = match serialised {
            Ok(Value::Object(map)) => map,
            _ => Props::new(),
        };

        if let NodeConfig::Table { props, data } = self {
            properties.insert(
                "data".to_string(),
                data.to_value(Some(props.max_rows), props.columns.as_deref()),
            );
        }

        for name in self.kind().properties() {
            properties.entry(name.to_string()).or_insert(Value::Null);
        }

        properties
    }

    /// Initial value of one property, or `None` if the kind does not expose it
    ///
    /// Reads only the named field; a table's rows are produced only for
    /// `data`.
    pub fn property(&self, name: &str) -> Option<Value> {
        if !self.kind().exposes(name) {
            return None;
        }

        let value = match (self, name) {
            (NodeConfig::Container(props), "style") => json(&props.style),
            (NodeConfig::Text(props), "children") => json(&props.content),
            (NodeConfig::Text(props), "level") => json(&props.level),
            (NodeConfig::Text(props), "style") => json(&props.style),
            (NodeConfig::Chart { props, .. }, "figure") => json(&props.figure),
            (NodeConfig::Chart { props, .. }, "style") => json(&props.style),
            (NodeConfig::Table { props, data }, "data") => {
                data.to_value(Some(props.max_rows), props.columns.as_deref())
            }
            (NodeConfig::Table { props, .. }, "columns") => json(&props.columns),
            (NodeConfig::Table { props, .. }, "dataset") => json(&props.dataset),
            (NodeConfig::Table { props, .. }, "max_rows") => json(&props.max_rows),
            (NodeConfig::Table { props, .. }, "style") => json(&props.style),
            (NodeConfig::Input(props), "placeholder") => json(&props.placeholder),
            (NodeConfig::Input(props), "type") => json(&props.input_type),
            (NodeConfig::Input(props), "value") => json(&props.value),
            (NodeConfig::Dropdown(props), "multi") => json(&props.multi),
            (NodeConfig::Dropdown(props), "options") => json(&props.options),
            (NodeConfig::Dropdown(props), "placeholder") => json(&props.placeholder),
            (NodeConfig::Dropdown(props), "value") => json(&props.value),
            (NodeConfig::RadioItems(props), "options") => json(&props.options),
            (NodeConfig::RadioItems(props), "value") => json(&props.value),
            (NodeConfig::Checklist(props), "options") => json(&props.options),
            (NodeConfig::Checklist(props), "value") => json(&props.value),
            (NodeConfig::Slider(props), "marks") => json(&props.marks),
            (NodeConfig::Slider(props), "max") => json(&props.max),
            (NodeConfig::Slider(props), "min") => json(&props.min),
            (NodeConfig::Slider(props), "step") => json(&props.step),
            (NodeConfig::Slider(props), "value") => json(&props.value),
            (NodeConfig::Markdown(props), "children") => json(&props.source),
            // Declared but not stored, e.g. a container's `children`
            _ => Value::Null,
        };

        Some(value)
    }
}

fn json<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
