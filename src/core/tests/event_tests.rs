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

use crate::core::event::{
    parse_event, parse_event_line, parse_event_script, parse_value, EventParseError,
};
use crate::core::types::PropertyRef;

#[test]
fn test_parse_text_value() {
    let (_, event) = parse_event_line("my-input.value = hello world").unwrap();
    assert_eq!(event.source, PropertyRef::new("my-input", "value"));
    assert_eq!(event.value, json!("hello world"));
}

#[test]
fn test_parse_json_values() {
    let (_, number) = parse_event_line("my-slider.value=7").unwrap();
    assert_eq!(number.value, json!(7));

    let (_, list) = parse_event_line(r#"multi_dropdown.value = ["MTL", "SF"]"#).unwrap();
    assert_eq!(list.value, json!(["MTL", "SF"]));

    let (_, quoted) = parse_event_line(r#"my-input.value = "  padded  ""#).unwrap();
    assert_eq!(quoted.value, json!("  padded  "));
}

#[test]
fn test_value_fallback_is_trimmed_text() {
    assert_eq!(parse_value("  MTL  "), json!("MTL"));
    assert_eq!(parse_value("true"), json!(true));
    assert_eq!(parse_value(""), json!(""));
}

#[test]
fn test_skips_blank_lines_and_comments() {
    assert_eq!(parse_event("", 1).unwrap(), None);
    assert_eq!(parse_event("   # a comment", 2).unwrap(), None);
}

#[test]
fn test_rejects_missing_property() {
    assert!(parse_event_line("my-input = x").is_err());
    assert!(parse_event_line("my-input.value x").is_err());
    assert!(parse_event_line(".value = x").is_err());
}

#[test]
fn test_script_reports_line_numbers() {
    let script = "\
# change the input twice
my-input.value = first

my-input.value = second
";
    let events = parse_event_script(script).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].value, json!("second"));

    let broken = "my-input.value = ok\nnot an event\n";
    assert!(matches!(
        parse_event_script(broken),
        Err(EventParseError::InvalidSyntax { line: 2, .. })
    ));
}
