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

//! src/core/types.rs
//!
//! Core type definitions for component trees and bindings
//!
//! This module defines the fundamental types used throughout the crate:
//! - `NodeId` / `PropertyRef`: Addressing a named property on a node
//! - `NodeKind`: The closed set of node kinds and the properties each exposes
//! - `Style`, `SelectOption`, `Selection`: Shared property shapes
//! - `NodeSpec`: The declarative description handed to the tree builder
//!
//! Everything here is serialisable so layouts can be kept in JSON files.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::fmt;

use crate::core::validator::ValidationError;

/// Raw property map of a node description (property name → JSON value)
pub type Props = Map<String, Value>;

/// Identifier of a node, unique within a tree
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Lets id-keyed maps be queried with plain `&str`
impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A `(node, property)` pair: the unit binding rules read from and write to
///
/// Displayed as `node.property`, which is also the addressing format
/// accepted by the event transport.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct PropertyRef {
    pub node: NodeId,
    pub property: String,
}

impl PropertyRef {
    pub fn new(node: impl Into<NodeId>, property: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            property: property.into(),
        }
    }
}

impl fmt::Display for PropertyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.node, self.property)
    }
}

/// Kind of UI node
///
/// Only `Container` may hold children; every other kind is a leaf whose
/// content lives in its typed properties.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Groups child nodes (a `div`)
    Container,
    /// Heading, paragraph or label text
    Text,
    /// Figure drawn from an attached dataset
    Chart,
    /// Tabular view of an attached dataset
    Table,
    /// Free text input
    Input,
    /// Single or multi-select dropdown
    Dropdown,
    /// Radio button group
    RadioItems,
    /// Checkbox group
    Checklist,
    /// Numeric range slider
    Slider,
    /// Markdown block
    Markdown,
}

impl NodeKind {
    /// Returns true for kinds that cannot hold child nodes
    pub fn is_leaf(self) -> bool {
        !matches!(self, NodeKind::Container)
    }

    /// Property names a node of this kind exposes to bindings
    pub fn properties(self) -> &'static [&'static str] {
        match self {
            NodeKind::Container => &["children", "style"],
            NodeKind::Text => &["children", "level", "style"],
            NodeKind::Chart => &["figure", "style"],
            NodeKind::Table => &["columns", "data", "dataset", "max_rows", "style"],
            NodeKind::Input => &["placeholder", "type", "value"],
            NodeKind::Dropdown => &["multi", "options", "placeholder", "value"],
            NodeKind::RadioItems => &["options", "value"],
            NodeKind::Checklist => &["options", "value"],
            NodeKind::Slider => &["marks", "max", "min", "step", "value"],
            NodeKind::Markdown => &["children"],
        }
    }

    /// Checks whether this kind exposes the named property
    pub fn exposes(self, property: &str) -> bool {
        self.properties().contains(&property)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Container => "container",
            NodeKind::Text => "text",
            NodeKind::Chart => "chart",
            NodeKind::Table => "table",
            NodeKind::Input => "input",
            NodeKind::Dropdown => "dropdown",
            NodeKind::RadioItems => "radio_items",
            NodeKind::Checklist => "checklist",
            NodeKind::Slider => "slider",
            NodeKind::Markdown => "markdown",
        };
        f.write_str(name)
    }
}

/// Semantic level of a text node
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextLevel {
    H1,
    H2,
    H3,
    H4,
    #[default]
    Div,
    #[serde(rename = "p")]
    Paragraph,
    Label,
}

impl fmt::Display for TextLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            TextLevel::H1 => "h1",
            TextLevel::H2 => "h2",
            TextLevel::H3 => "h3",
            TextLevel::H4 => "h4",
            TextLevel::Div => "div",
            TextLevel::Paragraph => "p",
            TextLevel::Label => "label",
        };
        f.write_str(tag)
    }
}

/// Horizontal text alignment
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

/// Inline style of a node
///
/// A closed set of style keys (camelCase on the wire, as in CSS-in-JS).
/// Unknown keys are rejected when the tree is built.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_count: Option<u32>,
}

impl Style {
    /// Style with both colours set
    pub fn coloured(background: &str, text: &str) -> Self {
        Self {
            background_color: Some(background.to_string()),
            color: Some(text.to_string()),
            ..Self::default()
        }
    }

    /// Centred text in the given colour
    pub fn centred(text: &str) -> Self {
        Self {
            color: Some(text.to_string()),
            text_align: Some(TextAlign::Center),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// All colour values set on this style
    pub fn colours(&self) -> impl Iterator<Item = &str> {
        self.background_color
            .iter()
            .chain(self.color.iter())
            .map(String::as_str)
    }
}

/// One entry of a dropdown, radio or checklist option list
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SelectOption {
    /// Text shown to the user
    pub label: String,
    /// Value reported to bindings when selected
    pub value: String,
}

impl SelectOption {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// Current selection of a dropdown: one value, or several when `multi` is set
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Selection {
    One(String),
    Many(Vec<String>),
}

impl Selection {
    pub fn values(&self) -> Vec<&str> {
        match self {
            Selection::One(value) => vec![value.as_str()],
            Selection::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// Text input flavour
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Number,
    Password,
    Email,
    Search,
    Tel,
    Url,
}

/// Declarative description of a node and its subtree
///
/// This is the unvalidated form: `props` is a free-form map that the tree
/// builder checks against the typed configuration of `kind`.
///
/// # Example
/// ```
/// use reactive_dashboard::core::{NodeSpec, TextLevel};
///
/// let layout = NodeSpec::container(vec![
///     NodeSpec::text(TextLevel::H1, "Hello"),
///     NodeSpec::container(vec![]).with_id("my-output"),
/// ]);
/// assert_eq!(layout.count(), 3);
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct NodeSpec {
    pub kind: NodeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Props,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    /// Creates an empty description of the given kind
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            id: None,
            props: Props::new(),
            children: Vec::new(),
        }
    }

    pub fn container(children: Vec<NodeSpec>) -> Self {
        Self {
            children,
            ..Self::new(NodeKind::Container)
        }
    }

    pub fn text(level: TextLevel, content: impl Into<String>) -> Self {
        Self::new(NodeKind::Text)
            .prop("level", level.to_string())
            .prop("children", Value::String(content.into()))
    }

    pub fn markdown(source: impl Into<String>) -> Self {
        Self::new(NodeKind::Markdown).prop("children", Value::String(source.into()))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets a raw property value
    pub fn prop(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.props.insert(name.to_string(), value.into());
        self
    }

    /// Sets a property from any serialisable value
    ///
    /// # Errors
    ///
    /// `ValidationError::Malformed` if the value has no JSON form (e.g. a
    /// map with non-string keys).
    pub fn prop_from<T: Serialize + ?Sized>(
        self,
        name: &str,
        value: &T,
    ) -> Result<Self, ValidationError> {
        let kind = self.kind;
        let value = serde_json::to_value(value).map_err(|e| ValidationError::Malformed {
            kind,
            message: format!("property '{}': {}", name, e),
        })?;
        Ok(self.prop(name, value))
    }

    /// Sets the `style` property, omitting it when the style is empty
    pub fn style(self, style: &Style) -> Result<Self, ValidationError> {
        if style.is_empty() {
            return Ok(self);
        }
        self.prop_from("style", style)
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Total number of nodes in this description, including itself
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(NodeSpec::count).sum::<usize>()
    }
}
