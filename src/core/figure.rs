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

//! Chart figure descriptions
//!
//! A `FigureSpec` names a dataset and the columns mapped onto each visual
//! channel (x, y, colour, size, hover label). Drawing is left to the
//! rendering layer; this module only groups records into series.

use serde::{Deserialize, Serialize};

use crate::data::{Dataset, Scalar};

/// Chart type
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Scatter,
    Line,
}

/// How bars sharing an x value are arranged
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    #[default]
    Group,
    Stack,
    Relative,
    Overlay,
}

/// Figure-level colours
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FigureLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
}

impl FigureLayout {
    /// Same background for plot and paper, with the given font colour
    pub fn themed(background: &str, text: &str) -> Self {
        Self {
            plot_bgcolor: Some(background.to_string()),
            paper_bgcolor: Some(background.to_string()),
            font_color: Some(text.to_string()),
        }
    }
}

/// Declarative chart description
///
/// # Example
/// ```
/// use reactive_dashboard::core::figure::{BarMode, FigureSpec};
///
/// let figure = FigureSpec::bar("fruit", "Fruit", "Amount")
///     .color("City")
///     .barmode(BarMode::Group);
/// assert_eq!(figure.columns(), vec!["Fruit", "Amount", "City"]);
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FigureSpec {
    pub chart: ChartKind,

    /// Name of the dataset the figure is drawn from
    pub dataset: String,

    pub x: String,
    pub y: String,

    /// Column whose values split records into coloured series
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Column driving marker size (scatter)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_name: Option<String>,

    #[serde(default)]
    pub barmode: BarMode,

    #[serde(default)]
    pub log_x: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub layout: FigureLayout,
}

impl FigureSpec {
    fn new(chart: ChartKind, dataset: &str, x: &str, y: &str) -> Self {
        Self {
            chart,
            dataset: dataset.to_string(),
            x: x.to_string(),
            y: y.to_string(),
            color: None,
            size: None,
            hover_name: None,
            barmode: BarMode::default(),
            log_x: false,
            size_max: None,
            title: None,
            layout: FigureLayout::default(),
        }
    }

    pub fn bar(dataset: &str, x: &str, y: &str) -> Self {
        Self::new(ChartKind::Bar, dataset, x, y)
    }

    pub fn scatter(dataset: &str, x: &str, y: &str) -> Self {
        Self::new(ChartKind::Scatter, dataset, x, y)
    }

    pub fn line(dataset: &str, x: &str, y: &str) -> Self {
        Self::new(ChartKind::Line, dataset, x, y)
    }

    pub fn color(mut self, column: &str) -> Self {
        self.color = Some(column.to_string());
        self
    }

    pub fn size(mut self, column: &str) -> Self {
        self.size = Some(column.to_string());
        self
    }

    pub fn hover_name(mut self, column: &str) -> Self {
        self.hover_name = Some(column.to_string());
        self
    }

    pub fn barmode(mut self, barmode: BarMode) -> Self {
        self.barmode = barmode;
        self
    }

    pub fn log_x(mut self, log_x: bool) -> Self {
        self.log_x = log_x;
        self
    }

    pub fn size_max(mut self, size_max: f64) -> Self {
        self.size_max = Some(size_max);
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn layout(mut self, layout: FigureLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Every dataset column this figure reads, in channel order
    pub fn columns(&self) -> Vec<&str> {
        let mut columns = vec![self.x.as_str(), self.y.as_str()];
        columns.extend(
            [&self.color, &self.size, &self.hover_name]
                .into_iter()
                .flatten()
                .map(String::as_str),
        );
        columns
    }

    /// Every colour set on the figure layout
    pub fn colours(&self) -> Vec<&str> {
        [
            &self.layout.plot_bgcolor,
            &self.layout.paper_bgcolor,
            &self.layout.font_color,
        ]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect()
    }

    /// Splits the dataset into one series per distinct `color` value
    ///
    /// Series appear in order of first occurrence. Without a colour column
    /// the whole dataset is a single series named after the y column.
    /// Records missing an x or y column are skipped.
    pub fn series(&self, data: &Dataset) -> Vec<Series> {
        let mut series: Vec<Series> = Vec::new();

        for record in data.records() {
            let (Some(x), Some(y)) = (record.get(&self.x), record.get(&self.y)) else {
                continue;
            };

            let name = match &self.color {
                Some(column) => record
                    .get(column)
                    .map(|value| value.to_string())
                    .unwrap_or_default(),
                None => self.y.clone(),
            };

            let point = Point {
                x: x.clone(),
                y: y.clone(),
                size: self
                    .size
                    .as_ref()
                    .and_then(|column| record.get(column))
                    .and_then(Scalar::as_f64),
                label: self
                    .hover_name
                    .as_ref()
                    .and_then(|column| record.get(column))
                    .map(|value| value.to_string()),
            };

            match series.iter_mut().find(|s| s.name == name) {
                Some(existing) => existing.points.push(point),
                None => series.push(Series {
                    name,
                    points: vec![point],
                }),
            }
        }

        series
    }

    /// One-line description used by text renderers
    pub fn summary(&self, data: &Dataset) -> String {
        let kind = match self.chart {
            ChartKind::Bar => "bar chart",
            ChartKind::Scatter => "scatter chart",
            ChartKind::Line => "line chart",
        };
        let series = self.series(data);
        let points: usize = series.iter().map(|s| s.points.len()).sum();

        let mut summary = format!("{} of {} vs {}", kind, self.y, self.x);
        if let Some(color) = &self.color {
            summary.push_str(&format!(" by {}", color));
        }
        if self.log_x {
            summary.push_str(" (log x)");
        }
        summary.push_str(&format!(
            ": {} series, {} point{}",
            series.len(),
            points,
            if points == 1 { "" } else { "s" }
        ));
        summary
    }
}

/// Points sharing one colour value
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

/// One plotted record
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub x: Scalar,
    pub y: Scalar,
    pub size: Option<f64>,
    pub label: Option<String>,
}
