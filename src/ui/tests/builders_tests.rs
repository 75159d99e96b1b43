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

use crate::config::{DashboardConfig, Theme};
use crate::core::{NodeConfig, NodeKind, PropertyRef};
use crate::ui::builders::{
    build_main_layout, fruit_dataset, generate_table, layout_spec, load_datasets,
    update_output_div, Variant,
};
use crate::ui::tests::fixtures::local_config;

#[test]
fn test_fruit_dataset() {
    let fruit = fruit_dataset().unwrap();
    assert_eq!(fruit.len(), 6);
    assert_eq!(fruit.columns(), ["Fruit", "Amount", "City"]);
}

#[test]
fn test_bar_variant_layout() {
    let config = DashboardConfig::default();
    let datasets = load_datasets(&config, Variant::Bar).unwrap();
    let tree = build_main_layout(&config, Variant::Bar, &datasets).unwrap();

    assert_eq!(tree.node_count(), 4);
    assert_eq!(
        tree.initial_value(&PropertyRef::new("title", "children")),
        Some(json!("Hello Taylor's Dash"))
    );

    let chart = tree.get("example-graph-2").unwrap();
    match chart.config() {
        NodeConfig::Chart { props, data } => {
            assert_eq!(props.figure.series(data).len(), 2);
            assert_eq!(props.figure.layout.plot_bgcolor.as_deref(), Some("#111111"));
        }
        other => panic!("expected a chart, got {:?}", other.kind()),
    }

    let page = tree.root().config().style().unwrap();
    assert_eq!(page.background_color.as_deref(), Some("#111111"));
    assert_eq!(page.column_count, None);
}

#[test]
fn test_full_variant_layout() {
    let (_temp_dir, mut config) = local_config();
    config.theme = Theme::rose();
    config.table.max_rows = 10;

    let datasets = load_datasets(&config, Variant::Full).unwrap();
    assert_eq!(datasets.len(), 3);

    let tree = build_main_layout(&config, Variant::Full, &datasets).unwrap();
    for id in [
        "example-graph-2",
        "example-graph-3",
        "dropdown",
        "multi-dropdown",
        "radio-items",
        "checklist",
        "text-input",
        "slider",
        "my-input",
        "my-output",
    ] {
        assert!(tree.contains(id), "missing node {}", id);
    }

    assert_eq!(
        tree.initial_value(&PropertyRef::new("multi-dropdown", "value")),
        Some(json!(["MTL", "SF"]))
    );
    assert_eq!(
        tree.initial_value(&PropertyRef::new("slider", "value")),
        Some(json!(5.0))
    );
    assert_eq!(
        tree.initial_value(&PropertyRef::new("my-input", "value")),
        Some(json!("default_value"))
    );

    let page = tree.root().config().style().unwrap();
    assert_eq!(page.background_color.as_deref(), Some("#E75480"));
    assert_eq!(page.column_count, Some(1));

    let tables: Vec<_> = tree
        .walk()
        .into_iter()
        .filter(|(_, node)| node.kind() == NodeKind::Table)
        .collect();
    assert_eq!(tables.len(), 1);
    let rows = tables[0].1.property("data").unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 10);
}

#[test]
fn test_echo_output_follows_a_line_break() {
    let spec = layout_spec(&DashboardConfig::default(), Variant::Full).unwrap();
    let children = &spec.children;
    let output = children
        .iter()
        .position(|child| child.id.as_deref() == Some("my-output"))
        .unwrap();

    let spacer = &children[output - 1];
    assert_eq!(spacer.kind, NodeKind::Container);
    assert!(spacer.id.is_none());
    assert!(spacer.children.is_empty());
    assert_eq!(children[output - 2].count(), 3);
}

#[test]
fn test_slider_marks() {
    let spec = layout_spec(&DashboardConfig::default(), Variant::Full).unwrap();
    let slider = spec
        .children
        .iter()
        .find(|child| child.id.as_deref() == Some("slider"))
        .unwrap();

    assert_eq!(
        slider.props["marks"],
        json!({"1": "Label 1", "2": "2", "3": "3", "4": "4", "5": "5"})
    );
}

#[test]
fn test_generate_table() {
    let table = generate_table("agriculture", 3);
    assert_eq!(table.kind, NodeKind::Table);
    assert_eq!(table.props["dataset"], json!("agriculture"));
    assert_eq!(table.props["max_rows"], json!(3));
}

#[test]
fn test_update_output_div() {
    assert_eq!(update_output_div(&[json!("x")]).unwrap(), json!("Output: x"));
    assert_eq!(update_output_div(&[json!(42)]).unwrap(), json!("Output: 42"));
    assert_eq!(update_output_div(&[]).unwrap(), json!("Output: "));
}

#[test]
fn test_variant_parsing() {
    assert_eq!("bar".parse::<Variant>(), Ok(Variant::Bar));
    assert_eq!("FULL".parse::<Variant>(), Ok(Variant::Full));
    assert!("pie".parse::<Variant>().is_err());
    assert_eq!(Variant::Full.to_string(), "full");
}
