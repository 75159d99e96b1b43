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

//! Dashboard layouts
//!
//! Two variants of the same page:
//! - **Bar**: heading, subtitle and the grouped fruit bar chart
//! - **Full**: the bar page plus the agriculture exports table, the GDP
//!   bubble chart, a markdown block, one of each input control and the
//!   echo input/output pair
//!
//! `layout_spec` produces the declarative description (exportable as
//! JSON); `build_main_layout` validates it into a `ComponentTree`.

use log::info;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::core::figure::{BarMode, FigureLayout, FigureSpec};
use crate::core::{
    ComponentTree, DatasetCatalog, InputType, NodeKind, NodeSpec, SelectOption, Style,
    TextLevel, TreeBuilder, TreeError, ValidationError,
};
use crate::data::{DataError, Dataset, DatasetSource, Scalar};
use crate::ui::builders::header::build_header;
use crate::ui::builders::table::generate_table;

pub const FRUIT_DATASET: &str = "fruit";
pub const AGRICULTURE_DATASET: &str = "agriculture";
pub const GDP_DATASET: &str = "gdp";

pub const INPUT_ID: &str = "my-input";
pub const OUTPUT_ID: &str = "my-output";

const MARKDOWN_TEXT: &str = "\
### Dash and Markdown

Dash apps can be written in Markdown.
Dash uses the [CommonMark](http://commonmark.org/)
specification of Markdown.
Check out their [60 Second Markdown Tutorial](http://commonmark.org/help/)
if this is your first introduction to Markdown!
";

/// Which dashboard page to build
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Variant {
    #[default]
    Bar,
    Full,
}

impl Variant {
    /// Name of the theme preset the page is styled with by default
    pub fn theme_name(self) -> &'static str {
        match self {
            Variant::Bar => "dark",
            Variant::Full => "rose",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Bar => write!(f, "bar"),
            Variant::Full => write!(f, "full"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bar" => Ok(Variant::Bar),
            "full" => Ok(Variant::Full),
            other => Err(format!("unknown variant '{}' (expected bar or full)", other)),
        }
    }
}

/// The long-form fruit sales data behind the bar chart
pub fn fruit_dataset() -> Result<Dataset, DataError> {
    let text = |values: [&str; 6]| -> Vec<Scalar> { values.into_iter().map(Scalar::from).collect() };

    Dataset::from_columns(vec![
        (
            "Fruit",
            text(["Apples", "Oranges", "Bananas", "Apples", "Oranges", "Bananas"]),
        ),
        (
            "Amount",
            [4_i64, 1, 2, 2, 4, 5].into_iter().map(Scalar::Int).collect(),
        ),
        ("City", text(["SF", "SF", "SF", "Montreal", "Montreal", "Montreal"])),
    ])
}

/// Loads every dataset the variant draws from
///
/// Remote sources are fetched once here; any failure aborts the build.
pub fn load_datasets(
    config: &DashboardConfig,
    variant: Variant,
) -> Result<DatasetCatalog, DataError> {
    let mut datasets = DatasetCatalog::new();
    datasets.insert(FRUIT_DATASET.to_string(), Arc::new(fruit_dataset()?));

    if variant == Variant::Full {
        let sources = [
            (AGRICULTURE_DATASET, &config.table.source),
            (GDP_DATASET, &config.bubble_source),
        ];
        for (name, location) in sources {
            let data = DatasetSource::locate(location).load()?;
            datasets.insert(name.to_string(), Arc::new(data));
        }
    }

    info!("Loaded {} datasets for the {} dashboard", datasets.len(), variant);
    Ok(datasets)
}

/// Declarative description of the whole page
///
/// # Errors
///
/// `ValidationError::Malformed` if a property value has no JSON form
pub fn layout_spec(config: &DashboardConfig, variant: Variant) -> Result<NodeSpec, ValidationError> {
    let theme = &config.theme;

    let mut page_style = Style {
        background_color: Some(theme.background.clone()),
        ..Style::default()
    };
    if variant == Variant::Full {
        page_style.column_count = Some(1);
    }

    let bar_figure = FigureSpec::bar(FRUIT_DATASET, "Fruit", "Amount")
        .color("City")
        .barmode(BarMode::Group)
        .layout(FigureLayout::themed(&theme.background, &theme.text));

    let mut children = build_header(config)?;
    children.push(chart("example-graph-2", &bar_figure)?);

    if variant == Variant::Full {
        children.extend(full_sections(config)?);
    }

    NodeSpec::container(children).style(&page_style)
}

/// Builds and validates the page against loaded datasets
pub fn build_main_layout(
    config: &DashboardConfig,
    variant: Variant,
    datasets: &DatasetCatalog,
) -> Result<ComponentTree, TreeError> {
    let builder = datasets
        .iter()
        .fold(TreeBuilder::new(), |builder, (name, data)| {
            builder.dataset(name.clone(), Arc::clone(data))
        });

    let spec = layout_spec(config, variant).map_err(|source| TreeError::InvalidProperty {
        node: format!("{} layout", variant),
        source,
    })?;
    builder.build(&spec)
}

fn full_sections(config: &DashboardConfig) -> Result<Vec<NodeSpec>, ValidationError> {
    let bubble_figure = FigureSpec::scatter(GDP_DATASET, "gdp per capita", "life expectancy")
        .size("population")
        .color("continent")
        .hover_name("country")
        .log_x(true)
        .size_max(60.0);

    let slider_marks: serde_json::Map<String, serde_json::Value> = (1..=5)
        .map(|i| {
            let label = if i == 1 {
                format!("Label {}", i)
            } else {
                i.to_string()
            };
            (i.to_string(), label.into())
        })
        .collect();

    Ok(vec![
        NodeSpec::container(vec![
            NodeSpec::text(TextLevel::H2, "US Agriculture Exports (2011)"),
            generate_table(AGRICULTURE_DATASET, config.table.max_rows),
        ]),
        NodeSpec::container(vec![
            NodeSpec::text(TextLevel::H3, "Life Expenctancy vs GDP"),
            chart("example-graph-3", &bubble_figure)?,
        ]),
        NodeSpec::container(vec![NodeSpec::markdown(MARKDOWN_TEXT)]),
        label("Dropdown"),
        NodeSpec::new(NodeKind::Dropdown)
            .with_id("dropdown")
            .prop_from("options", &city_options())?
            .prop("value", "MTL"),
        label("Multi-Select Dropdown"),
        NodeSpec::new(NodeKind::Dropdown)
            .with_id("multi-dropdown")
            .prop_from("options", &city_options())?
            .prop_from("value", &["MTL", "SF"])?
            .prop("multi", true),
        label("Radio Items"),
        NodeSpec::new(NodeKind::RadioItems)
            .with_id("radio-items")
            .prop_from("options", &city_options())?
            .prop("value", "MTL"),
        label("Checkboxes"),
        NodeSpec::new(NodeKind::Checklist)
            .with_id("checklist")
            .prop_from("options", &city_options())?
            .prop_from("value", &["MTL", "SF"])?,
        label("Text Input"),
        text_input("text-input", "MTL")?,
        label("Slider"),
        NodeSpec::new(NodeKind::Slider)
            .with_id("slider")
            .prop("min", 0)
            .prop("max", 9)
            .prop("marks", slider_marks)
            .prop("value", 5),
        NodeSpec::text(
            TextLevel::H4,
            "Change the value in the text box to see callbacks in action!",
        ),
        NodeSpec::container(vec![
            NodeSpec::text(TextLevel::Div, "Input: "),
            text_input(INPUT_ID, "default_value")?,
        ]),
        // Line break between the echo input and its output
        NodeSpec::container(vec![]),
        NodeSpec::container(vec![]).with_id(OUTPUT_ID),
    ])
}

fn city_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("New York City", "NYC"),
        SelectOption::new("Montreal", "MTL"),
        SelectOption::new("San Francisco", "SF"),
    ]
}

fn chart(id: &str, figure: &FigureSpec) -> Result<NodeSpec, ValidationError> {
    NodeSpec::new(NodeKind::Chart)
        .with_id(id)
        .prop_from("figure", figure)
}

fn label(text: &str) -> NodeSpec {
    NodeSpec::text(TextLevel::Label, text)
}

fn text_input(id: &str, value: &str) -> Result<NodeSpec, ValidationError> {
    NodeSpec::new(NodeKind::Input)
        .with_id(id)
        .prop("value", value)
        .prop_from("type", &InputType::Text)
}
