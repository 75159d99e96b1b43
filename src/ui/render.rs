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

//! Plain-text outline renderer
//!
//! Renders a component tree as an indented outline, one node per line:
//!
//! ```text
//! div
//!   h1#title: Hello Taylor's Dash
//!   chart#example-graph-2: bar chart of Amount vs Fruit by City: 2 series, 6 points
//!   input#my-input [text]: default_value
//!   div#my-output: Output: default_value
//! ```
//!
//! Visual rendering belongs to an external layer; this outline is what the
//! CLI prints.

use serde_json::Value;

use crate::core::{ComponentTree, Node, NodeConfig, PropertyRef, SelectOption};

/// Indent per depth level
const INDENT: &str = "  ";

/// Renders the tree with its initial property values
pub fn render_tree(tree: &ComponentTree) -> String {
    render_outline(tree, &|_| None)
}

/// Renders the tree, taking values from `current` where it has one
///
/// `current` is asked for the `value` / `children` property of nodes with
/// an id; `None` falls back to the node's initial value.
pub fn render_outline(
    tree: &ComponentTree,
    current: &dyn Fn(&PropertyRef) -> Option<Value>,
) -> String {
    let mut out = String::new();

    for (depth, node) in tree.walk() {
        out.push_str(&INDENT.repeat(depth));
        out.push_str(&describe(node, current));
        out.push('\n');
    }

    out
}

fn describe(node: &Node, current: &dyn Fn(&PropertyRef) -> Option<Value>) -> String {
    let live = |property: &str| {
        node.id()
            .and_then(|id| current(&PropertyRef::new(id.clone(), property)))
    };

    let (tag, detail) = match node.config() {
        NodeConfig::Container(_) => ("div".to_string(), live("children").map(|v| plain(&v))),
        NodeConfig::Text(props) => (
            props.level.to_string(),
            Some(live("children").map_or_else(|| props.content.trim().to_string(), |v| plain(&v))),
        ),
        NodeConfig::Chart { props, data } => {
            ("chart".to_string(), Some(props.figure.summary(data)))
        }
        NodeConfig::Table { props, data } => {
            let columns = props
                .columns
                .clone()
                .unwrap_or_else(|| data.columns().to_vec());
            (
                "table".to_string(),
                Some(format!(
                    "{} of {} rows from {} [{}]",
                    props.max_rows.min(data.len()),
                    data.len(),
                    props.dataset,
                    columns.join(", ")
                )),
            )
        }
        NodeConfig::Input(props) => {
            let value = live("value").map_or_else(|| props.value.clone(), |v| plain(&v));
            let kind = serde_json::to_value(props.input_type)
                .map(|v| plain(&v))
                .unwrap_or_default();
            (format!("input [{}]", kind), Some(value))
        }
        NodeConfig::Dropdown(props) => {
            let value = live("value").or_else(|| serde_json::to_value(&props.value).ok());
            let tag = if props.multi { "dropdown (multi)" } else { "dropdown" };
            (tag.to_string(), Some(choice(value, &props.options)))
        }
        NodeConfig::RadioItems(props) => {
            let value = live("value").or_else(|| serde_json::to_value(&props.value).ok());
            ("radio_items".to_string(), Some(choice(value, &props.options)))
        }
        NodeConfig::Checklist(props) => {
            let value = live("value").or_else(|| serde_json::to_value(&props.value).ok());
            ("checklist".to_string(), Some(choice(value, &props.options)))
        }
        NodeConfig::Slider(props) => {
            let value = live("value")
                .map(|v| plain(&v))
                .or_else(|| props.value.map(|v| v.to_string()))
                .unwrap_or_default();
            let marks: Vec<&str> = props.marks.values().map(String::as_str).collect();
            let mut detail = format!("{} in [{}, {}]", value, props.min, props.max);
            if !marks.is_empty() {
                detail.push_str(&format!(" marks: {}", marks.join(", ")));
            }
            ("slider".to_string(), Some(detail))
        }
        NodeConfig::Markdown(props) => {
            let first = props
                .source
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .unwrap_or_default();
            ("markdown".to_string(), Some(first.to_string()))
        }
    };

    let mut line = tag;
    if let Some(id) = node.id() {
        // Keep the flavour suffix after the id: `input#my-input [text]`
        match line.split_once(' ') {
            Some((head, rest)) => line = format!("{}#{} {}", head, id, rest),
            None => line = format!("{}#{}", line, id),
        }
    }
    match detail {
        Some(detail) if !detail.is_empty() => format!("{}: {}", line, detail),
        _ => line,
    }
}

/// Selected values and the available option values
fn choice(value: Option<Value>, options: &[SelectOption]) -> String {
    let selected = value.map(|v| plain(&v)).unwrap_or_default();
    let available: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
    format!("{} (options: {})", selected, available.join(", "))
}

/// JSON value as display text: strings unquoted, lists comma-joined
fn plain(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(plain).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
