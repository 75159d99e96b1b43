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

use serde_json::{json, Value};
use std::sync::Arc;

use crate::core::tree::{ComponentTree, TreeError};
use crate::core::types::{NodeKind, NodeSpec, PropertyRef, TextLevel};
use crate::core::validator::ValidationError;
use crate::data::{Dataset, Scalar};

fn sample_layout() -> NodeSpec {
    NodeSpec::container(vec![
        NodeSpec::text(TextLevel::H1, "Hello Dash").with_id("title"),
        NodeSpec::new(NodeKind::Input)
            .with_id("my-input")
            .prop("value", "initial value"),
        NodeSpec::container(vec![NodeSpec::markdown("### Nested")]).with_id("my-output"),
    ])
    .with_id("page")
}

#[test]
fn test_builds_and_resolves_every_id() {
    let tree = ComponentTree::build(&sample_layout()).unwrap();

    assert_eq!(tree.node_count(), 5);
    assert_eq!(tree.ids().len(), 4);
    for id in ["page", "title", "my-input", "my-output"] {
        let node = tree.get(id).unwrap();
        assert_eq!(node.id().map(|id| id.as_str()), Some(id));
    }
    assert!(tree.get("missing").is_none());
}

#[test]
fn test_walk_is_pre_order_with_depth() {
    let tree = ComponentTree::build(&sample_layout()).unwrap();

    let outline: Vec<(usize, NodeKind)> = tree
        .walk()
        .into_iter()
        .map(|(depth, node)| (depth, node.kind()))
        .collect();

    assert_eq!(
        outline,
        vec![
            (0, NodeKind::Container),
            (1, NodeKind::Text),
            (1, NodeKind::Input),
            (1, NodeKind::Container),
            (2, NodeKind::Markdown),
        ]
    );
}

#[test]
fn test_initial_values() {
    let tree = ComponentTree::build(&sample_layout()).unwrap();

    assert_eq!(
        tree.initial_value(&PropertyRef::new("my-input", "value")),
        Some(json!("initial value"))
    );
    assert_eq!(
        tree.initial_value(&PropertyRef::new("my-output", "children")),
        Some(Value::Null)
    );
    assert_eq!(tree.initial_value(&PropertyRef::new("my-input", "figure")), None);
    assert_eq!(tree.initial_value(&PropertyRef::new("nobody", "value")), None);
}

#[test]
fn test_duplicate_id_fails() {
    let spec = NodeSpec::container(vec![
        NodeSpec::new(NodeKind::Input).with_id("dup"),
        NodeSpec::container(vec![NodeSpec::new(NodeKind::Input).with_id("dup")]),
    ]);

    assert_eq!(
        ComponentTree::build(&spec).unwrap_err(),
        TreeError::DuplicateId { id: "dup".into() }
    );
}

#[test]
fn test_invalid_id_fails() {
    let spec = NodeSpec::container(vec![NodeSpec::new(NodeKind::Input).with_id("my.input")]);

    assert!(matches!(
        ComponentTree::build(&spec),
        Err(TreeError::InvalidProperty {
            source: ValidationError::InvalidId(_),
            ..
        })
    ));
}

#[test]
fn test_leaf_with_children_fails() {
    let spec = NodeSpec::text(TextLevel::Paragraph, "leaf").child(NodeSpec::markdown("child"));

    assert_eq!(
        ComponentTree::build(&spec).unwrap_err(),
        TreeError::InvalidProperty {
            node: "root text".to_string(),
            source: ValidationError::LeafWithChildren(NodeKind::Text),
        }
    );
}

#[test]
fn test_error_names_anonymous_node_by_path() {
    let spec = NodeSpec::container(vec![
        NodeSpec::markdown("fine"),
        NodeSpec::container(vec![NodeSpec::new(NodeKind::Slider)
            .prop("min", 5)
            .prop("max", 1)]),
    ]);

    match ComponentTree::build(&spec).unwrap_err() {
        TreeError::InvalidProperty { node, source } => {
            assert_eq!(node, "slider at /1/0");
            assert!(matches!(source, ValidationError::InvertedRange { .. }));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_datasets_are_shared_not_copied() {
    let data = Arc::new(
        Dataset::from_columns(vec![
            ("Fruit", vec![Scalar::from("Apples")]),
            ("Amount", vec![Scalar::Int(4)]),
        ])
        .unwrap(),
    );

    let table = |id: &str| {
        NodeSpec::new(NodeKind::Table)
            .with_id(id)
            .prop("dataset", "fruit")
    };
    let spec = NodeSpec::container(vec![table("first"), table("second")]);

    let tree = ComponentTree::builder()
        .dataset("fruit", Arc::clone(&data))
        .build(&spec)
        .unwrap();

    let first = tree.get("first").unwrap().config().dataset().unwrap();
    let second = tree.get("second").unwrap().config().dataset().unwrap();
    assert!(Arc::ptr_eq(first, second));
    assert!(Arc::ptr_eq(first, &data));
}

#[test]
fn test_tree_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ComponentTree>();
}

#[test]
fn test_single_property_matches_full_property_map() {
    let data = Dataset::from_columns(vec![
        ("Fruit", vec![Scalar::from("Apples"), Scalar::from("Pears")]),
        ("Amount", vec![Scalar::Int(4), Scalar::Int(2)]),
    ])
    .unwrap();

    let tree = ComponentTree::builder()
        .dataset("fruit", data)
        .build(&NodeSpec::container(vec![
            NodeSpec::text(TextLevel::H2, "Sales").with_id("heading"),
            NodeSpec::new(NodeKind::Table)
                .with_id("sales")
                .prop("dataset", "fruit")
                .prop("max_rows", 1),
            NodeSpec::new(NodeKind::Input).with_id("my-input").prop("value", "x"),
            NodeSpec::new(NodeKind::Slider)
                .with_id("slider")
                .prop("min", 0)
                .prop("max", 9)
                .prop("value", 5),
            NodeSpec::markdown("# Notes"),
        ]))
        .unwrap();

    for (_, node) in tree.walk() {
        let all = node.config().properties();
        for name in node.kind().properties() {
            assert_eq!(
                node.property(name).as_ref(),
                all.get(*name),
                "{} property '{}'",
                node.kind(),
                name
            );
        }
        assert_eq!(node.property("checked"), None);
    }

    assert_eq!(
        tree.initial_value(&PropertyRef::new("sales", "data")),
        Some(json!([{"Fruit": "Apples", "Amount": 4}]))
    );
    assert_eq!(
        tree.initial_value(&PropertyRef::new("heading", "children")),
        Some(json!("Sales"))
    );
}
