//! Decoding of the database tools' JSON table format.
//!
//! `ovs-vsctl -f json find <table>` (and the `ovn-nbctl`/`ovn-sbctl`
//! equivalents) print:
//!
//! ```json
//! {"headings": ["name", "_uuid"], "data": [["br-int", ["uuid", "1234"]]]}
//! ```
//!
//! Non-scalar columns are encoded as a two-element `[tag, payload]` array
//! (`["uuid", ...]`, `["set", [...]]`, `["map", [[k, v], ...]]`). Decoding
//! keeps the payload and drops the tag, one level deep only.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use serde_json::Value;

use ovsdb_common::{OvsdbError, OvsdbResult};

/// Column holding a row's identifier.
pub const UUID_COLUMN: &str = "_uuid";

/// Raw query output as printed by the tool.
#[derive(Debug, Deserialize)]
struct QueryOutput {
    headings: Vec<String>,
    data: Vec<Vec<Value>>,
}

/// Decodes one raw column value.
///
/// A two-element array is a tagged value and decodes to its second element,
/// unchanged. Anything else, arrays of other lengths included, is returned
/// as-is.
pub fn decode_value(raw: Value) -> Value {
    match raw {
        Value::Array(mut pair) if pair.len() == 2 => pair.swap_remove(1),
        other => other,
    }
}

/// One decoded table row.
///
/// Columns keep the order of the query's `headings`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Builds a row from already decoded columns.
    pub fn new(columns: Vec<(String, Value)>) -> Self {
        Self { columns }
    }

    /// Gets the value of a column, if present.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    /// Gets the value of a column if it is a string.
    pub fn get_str(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(Value::as_str)
    }

    /// The row identifier, for tables that report `_uuid`.
    pub fn uuid(&self) -> Option<&str> {
        self.get_str(UUID_COLUMN)
    }

    /// Column names in heading order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(c, _)| c.as_str())
    }

    /// Column/value pairs in heading order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in &self.columns {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Rows of one query, decoded as they are iterated.
///
/// The whole output has already been parsed and its shape checked, so
/// iteration itself cannot fail.
#[derive(Debug)]
pub struct Rows {
    headings: Vec<String>,
    data: std::vec::IntoIter<Vec<Value>>,
}

impl Rows {
    /// Parses the JSON printed by `<tool> -f json find <table>`.
    ///
    /// `command` is only used in error messages.
    pub fn parse(command: &str, output: &str) -> OvsdbResult<Self> {
        let parsed: QueryOutput = serde_json::from_str(output)
            .map_err(|e| OvsdbError::malformed_output(command, e.to_string()))?;

        let width = parsed.headings.len();
        if let Some((index, row)) = parsed
            .data
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != width)
        {
            return Err(OvsdbError::malformed_output(
                command,
                format!(
                    "row {} has {} values but there are {} headings",
                    index,
                    row.len(),
                    width
                ),
            ));
        }

        Ok(Self {
            headings: parsed.headings,
            data: parsed.data.into_iter(),
        })
    }

    /// Column names every row carries.
    pub fn headings(&self) -> &[String] {
        &self.headings
    }
}

impl Iterator for Rows {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        let raw = self.data.next()?;
        let columns = self
            .headings
            .iter()
            .cloned()
            .zip(raw.into_iter().map(decode_value))
            .collect();
        Some(Row::new(columns))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.data.size_hint()
    }
}

impl ExactSizeIterator for Rows {}
