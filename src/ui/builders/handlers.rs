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

//! Callback wiring
//!
//! Registers the binding rules of each dashboard variant with the
//! `AppContext`. Must run before the context is started.

use log::debug;
use serde_json::Value;

use crate::core::{BindingRule, HandlerResult, PropertyRef, RuleHandle};
use crate::ui::app::{AppContext, AppError};
use crate::ui::builders::layout::{Variant, INPUT_ID, OUTPUT_ID};

/// Echoes the text box back into the output container
pub fn update_output_div(inputs: &[Value]) -> HandlerResult {
    let text = match inputs.first() {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    Ok(Value::String(format!("Output: {}", text)))
}

/// Registers every rule of `variant`
///
/// # Returns
///
/// Handles of the registered rules, in registration order
pub fn wire_up_handlers(
    ctx: &mut AppContext,
    variant: Variant,
) -> Result<Vec<RuleHandle>, AppError> {
    let mut handles = Vec::new();

    if variant == Variant::Full {
        let rule = BindingRule::new(
            PropertyRef::new(OUTPUT_ID, "children"),
            vec![PropertyRef::new(INPUT_ID, "value")],
            update_output_div,
        )
        .named("update_output_div");
        handles.push(ctx.register(rule)?);
    }

    debug!("Wired {} handlers for the {} dashboard", handles.len(), variant);
    Ok(handles)
}
