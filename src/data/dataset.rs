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

//! Immutable tabular datasets
//!
//! A `Dataset` is a header plus uniformly shaped rows of `Scalar` cells.
//! Shape is checked once at construction; afterwards the dataset is only
//! read (and shared between nodes behind an `Arc`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::HashSet;
use std::fmt;
use std::io::Read;

use crate::data::DataError;

/// A single cell value
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Infers the cell type from CSV text
    ///
    /// Empty cells become `Null`; integers are tried before floats, and
    /// non-finite floats ("NaN", "inf") stay text.
    pub fn parse(cell: &str) -> Self {
        let cell = cell.trim();
        if cell.is_empty() {
            return Scalar::Null;
        }
        if let Ok(int) = cell.parse::<i64>() {
            return Scalar::Int(int);
        }
        match cell.parse::<f64>() {
            Ok(float) if float.is_finite() => Scalar::Float(float),
            _ => Scalar::Text(cell.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(int) => Some(*int as f64),
            Scalar::Float(float) => Some(*float),
            Scalar::Null | Scalar::Text(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    pub fn to_value(&self) -> Value {
        match self {
            Scalar::Null => Value::Null,
            Scalar::Int(int) => Value::from(*int),
            Scalar::Float(float) => Number::from_f64(*float)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Scalar::Text(text) => Value::String(text.clone()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Int(int) => write!(f, "{}", int),
            Scalar::Float(float) => write!(f, "{}", float),
            Scalar::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Scalar {
    fn from(text: &str) -> Self {
        Scalar::Text(text.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(int: i64) -> Self {
        Scalar::Int(int)
    }
}

impl From<f64> for Scalar {
    fn from(float: f64) -> Self {
        Scalar::Float(float)
    }
}

/// Ordered, uniformly shaped records
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Scalar>>,
}

impl Dataset {
    /// Builds a dataset from a header and row-major cells
    ///
    /// # Errors
    ///
    /// - `DataError::NoColumns` if the header is empty
    /// - `DataError::DuplicateColumn` if a column name repeats
    /// - `DataError::RaggedRow` if a row is not exactly one cell per column
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Scalar>>) -> Result<Self, DataError> {
        if columns.is_empty() {
            return Err(DataError::NoColumns);
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(DataError::DuplicateColumn(column.clone()));
            }
        }

        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(DataError::RaggedRow {
                    row: index,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }

        Ok(Self { columns, rows })
    }

    /// Builds a dataset from named columns, the way data frames are usually
    /// written out literally
    ///
    /// # Example
    /// ```
    /// use reactive_dashboard::data::{Dataset, Scalar};
    ///
    /// let data = Dataset::from_columns(vec![
    ///     ("Fruit", vec![Scalar::from("Apples"), Scalar::from("Oranges")]),
    ///     ("Amount", vec![Scalar::Int(4), Scalar::Int(1)]),
    /// ])?;
    /// assert_eq!(data.len(), 2);
    /// # Ok::<(), reactive_dashboard::data::DataError>(())
    /// ```
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<Scalar>)>) -> Result<Self, DataError> {
        let mut names = Vec::with_capacity(columns.len());
        let mut cells = Vec::with_capacity(columns.len());
        for (name, values) in columns {
            names.push(name.into());
            cells.push(values);
        }

        let expected = cells.first().map(Vec::len).unwrap_or(0);
        for (name, values) in names.iter().zip(&cells) {
            if values.len() != expected {
                return Err(DataError::ColumnLengthMismatch {
                    column: name.clone(),
                    expected,
                    found: values.len(),
                });
            }
        }

        let mut rows = vec![Vec::with_capacity(names.len()); expected];
        for values in cells {
            for (row, value) in rows.iter_mut().zip(values) {
                row.push(value);
            }
        }

        Self::from_rows(names, rows)
    }

    /// Parses CSV with a header row
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(Scalar::parse).collect());
        }

        Self::from_rows(columns, rows)
    }

    pub fn from_csv_str(text: &str) -> Result<Self, DataError> {
        Self::from_csv_reader(text.as_bytes())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// All values of one column, in record order
    pub fn column(&self, name: &str) -> Option<Vec<&Scalar>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        self.rows.get(index).map(|cells| Record {
            columns: &self.columns,
            cells,
        })
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|cells| Record {
            columns: &self.columns,
            cells,
        })
    }

    /// Records as a JSON array of objects
    ///
    /// `max_rows` truncates the output; `columns` restricts and orders the
    /// fields (unknown names are ignored).
    pub fn to_value(&self, max_rows: Option<usize>, columns: Option<&[String]>) -> Value {
        let selected: Vec<(usize, &String)> = match columns {
            Some(wanted) => wanted
                .iter()
                .filter_map(|name| self.column_index(name).map(|index| (index, name)))
                .collect(),
            None => self.columns.iter().enumerate().collect(),
        };

        let limit = max_rows.unwrap_or(self.rows.len());
        let records = self
            .rows
            .iter()
            .take(limit)
            .map(|row| {
                let mut object = Map::new();
                for (index, name) in &selected {
                    object.insert((*name).clone(), row[*index].to_value());
                }
                Value::Object(object)
            })
            .collect();

        Value::Array(records)
    }
}

/// Borrowed view of one record
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    columns: &'a [String],
    cells: &'a [Scalar],
}

impl<'a> Record<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Scalar> {
        self.columns
            .iter()
            .position(|name| name == column)
            .map(|index| &self.cells[index])
    }

    /// `(column, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Scalar)> {
        self.columns.iter().map(String::as_str).zip(self.cells.iter())
    }
}
