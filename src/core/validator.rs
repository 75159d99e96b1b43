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

//! Node property validation
//!
//! Turns the free-form property map of a `NodeSpec` into the typed
//! `NodeConfig` of its kind, rejecting anything outside the closed shape:
//! - Unknown property names or wrongly typed values (via serde)
//! - Malformed colours and node ids
//! - Inverted or inconsistent slider ranges
//! - Duplicate options and selections that are not among the options
//! - Charts and tables referring to unknown datasets or columns
//!
//! Like the rest of `core`, nothing here touches I/O.

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};
use thiserror::Error;

use crate::core::figure::FigureSpec;
use crate::core::props::{
    ChartProps, ChecklistProps, ContainerProps, DropdownProps, InputProps, MarkdownProps,
    NodeConfig, RadioItemsProps, SliderProps, TableProps, TextProps,
};
use crate::core::types::{NodeKind, Props, SelectOption, Selection, Style};
use crate::data::Dataset;

/// Validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Property map does not fit the kind (unknown key, wrong type, missing field)
    #[error("Malformed {kind} properties: {message}")]
    Malformed { kind: NodeKind, message: String },

    /// Node id contains characters outside `[A-Za-z0-9_-]`
    #[error("Invalid node id '{0}': only letters, digits, '-' and '_' are allowed")]
    InvalidId(String),

    /// Colour is not `#RGB` or `#RRGGBB`
    #[error("Invalid colour '{0}': expected #RGB or #RRGGBB")]
    InvalidColour(String),

    #[error("Slider range is inverted: min {min} is greater than max {max}")]
    InvertedRange { min: f64, max: f64 },

    #[error("Slider bound is not a finite number")]
    NonFiniteBound,

    #[error("Slider value {value} lies outside [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("Slider step must be positive, got {0}")]
    InvalidStep(f64),

    #[error("Slider mark '{0}' is not a number within the slider range")]
    InvalidMark(String),

    #[error("Option value '{0}' is declared more than once")]
    DuplicateOption(String),

    #[error("Selected value '{0}' is not one of the declared options")]
    UnknownSelection(String),

    #[error("Several values selected on a single-select dropdown")]
    MultipleSelection,

    /// A non-container node was given children
    #[error("{0} nodes cannot have children")]
    LeafWithChildren(NodeKind),

    #[error("Unknown dataset '{0}'")]
    UnknownDataset(String),

    #[error("Column '{column}' not found in dataset '{dataset}'")]
    UnknownColumn { dataset: String, column: String },
}

#[allow(clippy::expect_used)]
static HEX_COLOUR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$")
        .expect("hex colour pattern should be valid regex")
});

/// Validates a node id
///
/// Ids are addressed as `id.property`, so dots, spaces and other
/// punctuation are refused.
pub fn validate_id(id: &str) -> Result<(), ValidationError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidId(id.to_string()))
    }
}

/// Validates a `#RGB` / `#RRGGBB` colour
pub fn validate_colour(colour: &str) -> Result<(), ValidationError> {
    if HEX_COLOUR.is_match(colour) {
        Ok(())
    } else {
        Err(ValidationError::InvalidColour(colour.to_string()))
    }
}

pub fn validate_style(style: &Style) -> Result<(), ValidationError> {
    style.colours().try_for_each(validate_colour)
}

/// Checks that option values are unique
pub fn validate_options(options: &[SelectOption]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for option in options {
        if !seen.insert(option.value.as_str()) {
            return Err(ValidationError::DuplicateOption(option.value.clone()));
        }
    }
    Ok(())
}

/// Checks that every selected value is one of the options
pub fn validate_selection<'a>(
    options: &[SelectOption],
    selected: impl IntoIterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    for value in selected {
        if !options.iter().any(|option| option.value == value) {
            return Err(ValidationError::UnknownSelection(value.to_string()));
        }
    }
    Ok(())
}

/// Validates slider bounds, step, value and marks
///
/// Requires finite `min <= max`, a positive step, and a value and marks
/// that fall inside the range.
pub fn validate_slider(slider: &SliderProps) -> Result<(), ValidationError> {
    let (min, max) = (slider.min, slider.max);

    if !min.is_finite() || !max.is_finite() {
        return Err(ValidationError::NonFiniteBound);
    }
    if min > max {
        return Err(ValidationError::InvertedRange { min, max });
    }

    if let Some(step) = slider.step {
        if !step.is_finite() || step <= 0.0 {
            return Err(ValidationError::InvalidStep(step));
        }
    }

    if let Some(value) = slider.value {
        if !(min..=max).contains(&value) {
            return Err(ValidationError::OutOfRange { value, min, max });
        }
    }

    for key in slider.marks.keys() {
        match key.trim().parse::<f64>() {
            Ok(position) if (min..=max).contains(&position) => {}
            _ => return Err(ValidationError::InvalidMark(key.clone())),
        }
    }

    Ok(())
}

/// Checks a figure against the dataset it will be drawn from
pub fn validate_figure(figure: &FigureSpec, data: &Dataset) -> Result<(), ValidationError> {
    figure.colours().into_iter().try_for_each(validate_colour)?;
    require_columns(&figure.dataset, data, figure.columns())
}

fn require_columns<'a>(
    dataset: &str,
    data: &Dataset,
    columns: impl IntoIterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    for column in columns {
        if !data.has_column(column) {
            return Err(ValidationError::UnknownColumn {
                dataset: dataset.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

fn resolve_dataset(
    datasets: &HashMap<String, Arc<Dataset>>,
    name: &str,
) -> Result<Arc<Dataset>, ValidationError> {
    datasets
        .get(name)
        .cloned()
        .ok_or_else(|| ValidationError::UnknownDataset(name.to_string()))
}

/// Deserialises a raw property map into the props struct of `kind`
fn parse_props<T: DeserializeOwned>(kind: NodeKind, props: &Props) -> Result<T, ValidationError> {
    serde_json::from_value(Value::Object(props.clone())).map_err(|e| ValidationError::Malformed {
        kind,
        message: e.to_string(),
    })
}

/// Validates one node's properties and produces its typed configuration
///
/// `datasets` resolves the dataset names used by chart and table nodes.
///
/// # Example
/// ```
/// use reactive_dashboard::core::{validate_node, NodeKind, Props, ValidationError};
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let mut props = Props::new();
/// props.insert("min".into(), json!(9));
/// props.insert("max".into(), json!(0));
///
/// let result = validate_node(NodeKind::Slider, &props, &HashMap::new());
/// assert!(matches!(result, Err(ValidationError::InvertedRange { .. })));
/// ```
pub fn validate_node(
    kind: NodeKind,
    props: &Props,
    datasets: &HashMap<String, Arc<Dataset>>,
) -> Result<NodeConfig, ValidationError> {
    let config = match kind {
        NodeKind::Container => {
            let container: ContainerProps = parse_props(kind, props)?;
            validate_style(&container.style)?;
            NodeConfig::Container(container)
        }
        NodeKind::Text => {
            let text: TextProps = parse_props(kind, props)?;
            validate_style(&text.style)?;
            NodeConfig::Text(text)
        }
        NodeKind::Chart => {
            let chart: ChartProps = parse_props(kind, props)?;
            validate_style(&chart.style)?;
            let data = resolve_dataset(datasets, &chart.figure.dataset)?;
            validate_figure(&chart.figure, &data)?;
            NodeConfig::Chart { props: chart, data }
        }
        NodeKind::Table => {
            let table: TableProps = parse_props(kind, props)?;
            validate_style(&table.style)?;
            let data = resolve_dataset(datasets, &table.dataset)?;
            if let Some(columns) = &table.columns {
                require_columns(&table.dataset, &data, columns.iter().map(String::as_str))?;
            }
            NodeConfig::Table { props: table, data }
        }
        NodeKind::Input => NodeConfig::Input(parse_props::<InputProps>(kind, props)?),
        NodeKind::Dropdown => {
            let dropdown: DropdownProps = parse_props(kind, props)?;
            validate_options(&dropdown.options)?;
            if let Some(selection) = &dropdown.value {
                if !dropdown.multi && matches!(selection, Selection::Many(_)) {
                    return Err(ValidationError::MultipleSelection);
                }
                validate_selection(&dropdown.options, selection.values())?;
            }
            NodeConfig::Dropdown(dropdown)
        }
        NodeKind::RadioItems => {
            let radio: RadioItemsProps = parse_props(kind, props)?;
            validate_options(&radio.options)?;
            validate_selection(&radio.options, radio.value.as_deref())?;
            NodeConfig::RadioItems(radio)
        }
        NodeKind::Checklist => {
            let checklist: ChecklistProps = parse_props(kind, props)?;
            validate_options(&checklist.options)?;
            validate_selection(
                &checklist.options,
                checklist.value.iter().map(String::as_str),
            )?;
            NodeConfig::Checklist(checklist)
        }
        NodeKind::Slider => {
            let slider: SliderProps = parse_props(kind, props)?;
            validate_slider(&slider)?;
            NodeConfig::Slider(slider)
        }
        NodeKind::Markdown => NodeConfig::Markdown(parse_props::<MarkdownProps>(kind, props)?),
    };

    Ok(config)
}
