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

//! Event line parser
//!
//! The line transport delivers input changes as text, one per line:
//!
//! ```text
//! # comment
//! my-input.value = hello world
//! my-slider.value = 7
//! my-dropdown.value = ["MTL", "SF"]
//! ```
//!
//! The value is taken as JSON when it parses as JSON, otherwise as the
//! trimmed text. Blank lines and `#` comments are skipped.

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, space0},
    combinator::rest,
    IResult, Parser,
};
use serde_json::Value;
use thiserror::Error;

use crate::core::binding::InputEvent;
use crate::core::types::PropertyRef;

/// Event parse errors with line number context
#[derive(Debug, Error, PartialEq)]
pub enum EventParseError {
    #[error("Event parse error on line {line}: {message}")]
    InvalidSyntax { line: usize, message: String },
}

/// Parses a whole event script
///
/// Stops at the first malformed line.
pub fn parse_event_script(content: &str) -> Result<Vec<InputEvent>, EventParseError> {
    let mut events = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        if let Some(event) = parse_event(line, line_num + 1)? {
            events.push(event);
        }
    }

    Ok(events)
}

/// Parses one line of an event script
///
/// Returns `Ok(None)` for blank lines and comments.
pub fn parse_event(line: &str, line_num: usize) -> Result<Option<InputEvent>, EventParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    match parse_event_line(trimmed) {
        Ok((_, event)) => Ok(Some(event)),
        Err(e) => Err(EventParseError::InvalidSyntax {
            line: line_num,
            message: format!("expected '<node-id>.<property> = <value>' ({:?})", e),
        }),
    }
}

/// Parses `<node-id>.<property> = <value>`
pub fn parse_event_line(input: &str) -> IResult<&str, InputEvent> {
    let (input, source) = parse_property_ref(input)?;
    let (input, _) = (space0, char('='), space0).parse(input)?;
    let (input, raw) = rest(input)?;

    Ok((
        input,
        InputEvent {
            source,
            value: parse_value(raw),
        },
    ))
}

/// Parses `<node-id>.<property>`
pub fn parse_property_ref(input: &str) -> IResult<&str, PropertyRef> {
    let (input, node) =
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_')(input)?;
    let (input, _) = char('.')(input)?;
    let (input, property) = take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)?;

    Ok((input, PropertyRef::new(node, property)))
}

/// JSON if it parses, otherwise the trimmed text
pub fn parse_value(raw: &str) -> Value {
    let raw = raw.trim();
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
