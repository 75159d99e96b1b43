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

use serde_json::json;
use std::collections::HashMap;

use crate::core::validator::ValidationError;
use crate::core::types::{
    NodeId, NodeKind, NodeSpec, PropertyRef, Selection, Style, TextAlign, TextLevel,
};

#[test]
fn test_property_ref_display() {
    let target = PropertyRef::new("my-output", "children");
    assert_eq!(target.to_string(), "my-output.children");
    assert_eq!(target.node, NodeId::from("my-output"));
}

#[test]
fn test_only_containers_hold_children() {
    assert!(!NodeKind::Container.is_leaf());
    assert!(NodeKind::Text.is_leaf());
    assert!(NodeKind::Slider.is_leaf());
    assert!(NodeKind::Markdown.is_leaf());
}

#[test]
fn test_exposed_properties() {
    assert!(NodeKind::Input.exposes("value"));
    assert!(NodeKind::Container.exposes("children"));
    assert!(NodeKind::Table.exposes("data"));
    assert!(!NodeKind::Input.exposes("children"));
    assert!(!NodeKind::Markdown.exposes("style"));
}

#[test]
fn test_kind_serialises_snake_case() {
    assert_eq!(
        serde_json::to_value(NodeKind::RadioItems).unwrap(),
        json!("radio_items")
    );
    assert_eq!(NodeKind::RadioItems.to_string(), "radio_items");
}

#[test]
fn test_text_level_names() {
    assert_eq!(TextLevel::H1.to_string(), "h1");
    assert_eq!(serde_json::to_value(TextLevel::Paragraph).unwrap(), json!("p"));
    assert_eq!(TextLevel::default(), TextLevel::Div);
}

#[test]
fn test_style_wire_format_is_camel_case() {
    let style = Style::coloured("#111111", "#7FDBFF");
    assert_eq!(
        serde_json::to_value(&style).unwrap(),
        json!({"backgroundColor": "#111111", "color": "#7FDBFF"})
    );

    let centred = Style::centred("#7FDBFF");
    assert_eq!(centred.text_align, Some(TextAlign::Center));
    assert_eq!(centred.colours().collect::<Vec<_>>(), vec!["#7FDBFF"]);
}

#[test]
fn test_style_rejects_unknown_keys() {
    let result: Result<Style, _> = serde_json::from_value(json!({"fontSize": 12}));
    assert!(result.is_err());
}

#[test]
fn test_selection_is_untagged() {
    let one: Selection = serde_json::from_value(json!("MTL")).unwrap();
    let many: Selection = serde_json::from_value(json!(["MTL", "SF"])).unwrap();

    assert_eq!(one.values(), vec!["MTL"]);
    assert_eq!(many.values(), vec!["MTL", "SF"]);
}

#[test]
fn test_node_spec_builders() {
    let spec = NodeSpec::container(vec![
        NodeSpec::text(TextLevel::H1, "Hello Dash"),
        NodeSpec::new(NodeKind::Input)
            .with_id("my-input")
            .prop("value", "initial value"),
    ])
    .style(&Style::coloured("#111111", "#7FDBFF"))
    .unwrap();

    assert_eq!(spec.count(), 3);
    assert_eq!(spec.children[0].props["children"], json!("Hello Dash"));
    assert_eq!(spec.children[0].props["level"], json!("h1"));
    assert_eq!(spec.children[1].id.as_deref(), Some("my-input"));
    assert!(spec.props.contains_key("style"));
}

#[test]
fn test_empty_style_is_omitted() {
    let spec = NodeSpec::container(vec![]).style(&Style::default()).unwrap();
    assert!(spec.props.is_empty());
}

#[test]
fn test_prop_from_reports_values_without_json_form() {
    let mut marks = HashMap::new();
    marks.insert((1, 2), "tuple keys");

    let result = NodeSpec::new(NodeKind::Slider).prop_from("marks", &marks);
    match result {
        Err(ValidationError::Malformed { kind, message }) => {
            assert_eq!(kind, NodeKind::Slider);
            assert!(message.contains("marks"));
        }
        other => panic!("expected a malformed property, got {:?}", other),
    }

    let spec = NodeSpec::new(NodeKind::Dropdown)
        .prop_from("value", &["MTL", "SF"])
        .unwrap();
    assert_eq!(spec.props["value"], json!(["MTL", "SF"]));
}

#[test]
fn test_node_spec_json_shape() {
    let spec: NodeSpec = serde_json::from_value(json!({
        "kind": "container",
        "children": [
            {"kind": "input", "id": "my-input", "props": {"value": "x"}}
        ]
    }))
    .unwrap();

    assert_eq!(spec.kind, NodeKind::Container);
    assert_eq!(spec.children[0].kind, NodeKind::Input);
    assert_eq!(spec.id, None);

    let back = serde_json::to_value(&spec).unwrap();
    assert!(back.get("id").is_none());
    assert!(back.get("props").is_none());
}
