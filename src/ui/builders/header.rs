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

//! Page header builder
//!
//! Creates the centred title and subtitle at the top of every dashboard

use crate::config::DashboardConfig;
use crate::core::{NodeSpec, Style, TextLevel, ValidationError};

/// Builds the H1 title and the subtitle line, both in the theme's text colour
///
/// # Returns
///
/// The two header nodes, in page order
pub fn build_header(config: &DashboardConfig) -> Result<Vec<NodeSpec>, ValidationError> {
    let style = Style::centred(&config.theme.text);

    Ok(vec![
        NodeSpec::text(TextLevel::H1, config.title.as_str())
            .with_id("title")
            .style(&style)?,
        NodeSpec::text(TextLevel::Div, config.subtitle.as_str())
            .with_id("subtitle")
            .style(&style)?,
    ])
}
