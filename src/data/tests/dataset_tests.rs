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

use crate::data::{DataError, Dataset, Scalar};

/// Helper: the fruit sales frame used by the bar chart demos
fn fruit() -> Dataset {
    Dataset::from_columns(vec![
        (
            "Fruit",
            vec!["Apples", "Oranges", "Bananas"]
                .into_iter()
                .map(Scalar::from)
                .collect(),
        ),
        ("Amount", vec![Scalar::Int(4), Scalar::Int(1), Scalar::Int(2)]),
        (
            "City",
            vec![Scalar::from("SF"), Scalar::from("SF"), Scalar::from("SF")],
        ),
    ])
    .unwrap()
}

#[test]
fn test_scalar_parse_infers_types() {
    assert_eq!(Scalar::parse("42"), Scalar::Int(42));
    assert_eq!(Scalar::parse(" 3.5 "), Scalar::Float(3.5));
    assert_eq!(Scalar::parse("Apples"), Scalar::Text("Apples".to_string()));
    assert_eq!(Scalar::parse(""), Scalar::Null);
    assert_eq!(Scalar::parse("NaN"), Scalar::Text("NaN".to_string()));
}

#[test]
fn test_scalar_display_and_numeric_view() {
    assert_eq!(Scalar::Int(7).to_string(), "7");
    assert_eq!(Scalar::Null.to_string(), "");
    assert_eq!(Scalar::Int(7).as_f64(), Some(7.0));
    assert_eq!(Scalar::from("x").as_f64(), None);
}

#[test]
fn test_from_columns_transposes() {
    let data = fruit();

    assert_eq!(data.len(), 3);
    assert_eq!(data.columns(), &["Fruit", "Amount", "City"]);

    let second = data.record(1).unwrap();
    assert_eq!(second.get("Fruit"), Some(&Scalar::from("Oranges")));
    assert_eq!(second.get("Amount"), Some(&Scalar::Int(1)));
    assert_eq!(second.get("Missing"), None);
}

#[test]
fn test_from_columns_rejects_length_mismatch() {
    let result = Dataset::from_columns(vec![
        ("a", vec![Scalar::Int(1), Scalar::Int(2)]),
        ("b", vec![Scalar::Int(1)]),
    ]);

    match result {
        Err(DataError::ColumnLengthMismatch { column, expected, found }) => {
            assert_eq!(column, "b");
            assert_eq!(expected, 2);
            assert_eq!(found, 1);
        }
        other => panic!("Expected ColumnLengthMismatch, got: {:?}", other),
    }
}

#[test]
fn test_from_rows_rejects_duplicate_columns() {
    let result = Dataset::from_rows(vec!["a".to_string(), "a".to_string()], vec![]);
    assert!(matches!(result, Err(DataError::DuplicateColumn(name)) if name == "a"));
}

#[test]
fn test_from_rows_rejects_ragged_rows() {
    let result = Dataset::from_rows(
        vec!["a".to_string(), "b".to_string()],
        vec![vec![Scalar::Int(1), Scalar::Int(2)], vec![Scalar::Int(3)]],
    );

    assert!(matches!(
        result,
        Err(DataError::RaggedRow { row: 1, expected: 2, found: 1 })
    ));
}

#[test]
fn test_from_rows_requires_columns() {
    assert!(matches!(
        Dataset::from_rows(vec![], vec![]),
        Err(DataError::NoColumns)
    ));
}

#[test]
fn test_csv_parsing() {
    let csv = "state,total exports,beef\nAlabama,1390.63,34.4\nAlaska,13.31,0.2\n";
    let data = Dataset::from_csv_str(csv).unwrap();

    assert_eq!(data.len(), 2);
    assert!(data.has_column("total exports"));
    assert_eq!(
        data.column("state").unwrap(),
        vec![&Scalar::from("Alabama"), &Scalar::from("Alaska")]
    );
    assert_eq!(data.record(0).unwrap().get("beef"), Some(&Scalar::Float(34.4)));
}

#[test]
fn test_csv_with_unequal_rows_is_malformed() {
    let csv = "a,b\n1,2\n3\n";
    assert!(matches!(
        Dataset::from_csv_str(csv),
        Err(DataError::Csv(_))
    ));
}

#[test]
fn test_to_value_truncates_and_selects() {
    let data = fruit();
    let columns = vec!["Amount".to_string(), "Unknown".to_string()];

    let value = data.to_value(Some(2), Some(&columns));

    assert_eq!(value, json!([{ "Amount": 4 }, { "Amount": 1 }]));
}

#[test]
fn test_records_iterate_in_order() {
    let data = fruit();
    let fruits: Vec<String> = data
        .records()
        .filter_map(|record| record.get("Fruit").map(|v| v.to_string()))
        .collect();

    assert_eq!(fruits, vec!["Apples", "Oranges", "Bananas"]);

    let pairs: Vec<(&str, String)> = data
        .record(0)
        .unwrap()
        .iter()
        .map(|(column, value)| (column, value.to_string()))
        .collect();
    assert_eq!(pairs[1], ("Amount", "4".to_string()));
}
