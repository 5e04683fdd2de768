//! Generic row model
//!
//! A [`Row`] is one database record as an ordered list of column name/value
//! pairs. Column order is the order of the result set, and serializing a row
//! produces a JSON object with keys in that same order.
//!
//! Every value is decoded into a [`ColumnValue`] according to the column's
//! PostgreSQL type:
//!
//! | PostgreSQL type                        | `ColumnValue` |
//! |----------------------------------------|---------------|
//! | any NULL                               | `Null`        |
//! | BOOL                                   | `Bool`        |
//! | INT2, INT4, INT8                       | `Integer`     |
//! | FLOAT4, FLOAT8 (finite)                | `Float` (shortest form of the column's own precision) |
//! | FLOAT4, FLOAT8 (NaN, ±Infinity)        | `Text` (`"NaN"`, `"Infinity"`, `"-Infinity"`) |
//! | NUMERIC                                | `Text` (PostgreSQL's exact rendering, including `NaN`) |
//! | TEXT, VARCHAR, CHAR, NAME              | `Text`        |
//! | UUID                                   | `Text` (hyphenated) |
//! | TIMESTAMPTZ                            | `Text` (RFC 3339) |
//! | TIMESTAMP, DATE, TIME                  | `Text` (ISO 8601) |
//! | JSON, JSONB                            | `Json`        |
//! | anything else (arrays, INET, INTERVAL, MONEY, BYTEA, enums, extensions) | `Text` (PostgreSQL's text output) |
//!
//! NUMERIC and the catch-all types are read from PostgreSQL's text output, so
//! rows must come from the simple query protocol (an unbound `&str` query, as
//! [`fetch_all_users`](crate::models::user::fetch_all_users) runs). In a
//! binary-format row those columns fail with [`BinaryValueUnsupported`].
//!
//! # Example
//!
//! ```no_run
//! use stridez_shared::models::row::Row;
//! use sqlx::{Executor, FromRow, PgPool};
//!
//! # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
//! let rows = pool
//!     .fetch_all("SELECT id, name FROM users")
//!     .await?
//!     .iter()
//!     .map(Row::from_row)
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! println!("{}", serde_json::to_string(&rows).unwrap());
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use sqlx::postgres::{PgColumn, PgRow, PgValueFormat, PgValueRef};
use sqlx::{Column, FromRow, Row as _, TypeInfo, ValueRef};
use thiserror::Error;
use uuid::Uuid;

/// A single column value with an explicit JSON mapping
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ColumnValue {
    /// SQL NULL, serialized as `null`
    Null,

    /// Boolean
    Bool(bool),

    /// Any integer column, widened to 64 bits
    Integer(i64),

    /// Finite floating point value
    Float(f64),

    /// Textual representation
    Text(String),

    /// JSON/JSONB column embedded as-is
    Json(serde_json::Value),
}

impl ColumnValue {
    /// Maps a FLOAT8 value; non-finite values become their PostgreSQL spelling
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            ColumnValue::Text("NaN".to_string())
        } else if value.is_infinite() {
            let spelling = if value > 0.0 { "Infinity" } else { "-Infinity" };
            ColumnValue::Text(spelling.to_string())
        } else {
            ColumnValue::Float(value)
        }
    }

    /// Maps a FLOAT4 value without exposing single-precision rounding noise
    ///
    /// `0.1f32` widens to `0.10000000149011612`; going through the shortest
    /// `f32` rendering keeps it `0.1`.
    pub fn from_f32(value: f32) -> Self {
        if !value.is_finite() {
            return ColumnValue::from_f64(f64::from(value));
        }

        match value.to_string().parse::<f64>() {
            Ok(widened) => ColumnValue::Float(widened),
            Err(_) => ColumnValue::Float(f64::from(value)),
        }
    }
}

/// How a PostgreSQL column type is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Bool,
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Numeric,
    Text,
    Uuid,
    TimestampTz,
    Timestamp,
    Date,
    Time,
    Json,
    /// No dedicated mapping; rendered from PostgreSQL's text output
    Other,
}

impl ColumnKind {
    /// Classifies a column by its type name as reported by the driver
    pub fn from_type_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "BOOL" | "BOOLEAN" => ColumnKind::Bool,
            "INT2" | "SMALLINT" => ColumnKind::Int2,
            "INT4" | "INT" | "INTEGER" => ColumnKind::Int4,
            "INT8" | "BIGINT" => ColumnKind::Int8,
            "FLOAT4" | "REAL" => ColumnKind::Float4,
            "FLOAT8" | "DOUBLE PRECISION" => ColumnKind::Float8,
            "NUMERIC" | "DECIMAL" => ColumnKind::Numeric,
            "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "\"CHAR\"" | "NAME" => ColumnKind::Text,
            "UUID" => ColumnKind::Uuid,
            "TIMESTAMPTZ" => ColumnKind::TimestampTz,
            "TIMESTAMP" => ColumnKind::Timestamp,
            "DATE" => ColumnKind::Date,
            "TIME" => ColumnKind::Time,
            "JSON" | "JSONB" => ColumnKind::Json,
            _ => ColumnKind::Other,
        }
    }
}

/// Raised when a text-only column arrives in binary format
#[derive(Error, Debug)]
#[error("column `{column}` of type {type_name} can only be read from text-format rows")]
pub struct BinaryValueUnsupported {
    pub column: String,
    pub type_name: String,
}

fn column_decode_error(
    column: &PgColumn,
    source: Box<dyn std::error::Error + Send + Sync>,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.name().to_string(),
        source,
    }
}

/// PostgreSQL's own text rendering of a value
fn text_output(raw: &PgValueRef<'_>, column: &PgColumn) -> Result<String, sqlx::Error> {
    if raw.format() != PgValueFormat::Text {
        return Err(column_decode_error(
            column,
            Box::new(BinaryValueUnsupported {
                column: column.name().to_string(),
                type_name: column.type_info().name().to_string(),
            }),
        ));
    }

    raw.as_str()
        .map(str::to_string)
        .map_err(|err| column_decode_error(column, err))
}

impl ColumnValue {
    /// Decodes the value of `column` from `row`
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error::ColumnDecode` if the value cannot be decoded.
    pub fn decode(row: &PgRow, column: &PgColumn) -> Result<Self, sqlx::Error> {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;

        if raw.is_null() {
            return Ok(ColumnValue::Null);
        }

        let value = match ColumnKind::from_type_name(column.type_info().name()) {
            ColumnKind::Bool => ColumnValue::Bool(row.try_get(index)?),
            ColumnKind::Int2 => ColumnValue::Integer(row.try_get::<i16, _>(index)?.into()),
            ColumnKind::Int4 => ColumnValue::Integer(row.try_get::<i32, _>(index)?.into()),
            ColumnKind::Int8 => ColumnValue::Integer(row.try_get(index)?),
            ColumnKind::Float4 => ColumnValue::from_f32(row.try_get(index)?),
            ColumnKind::Float8 => ColumnValue::from_f64(row.try_get(index)?),
            ColumnKind::Numeric | ColumnKind::Other => ColumnValue::Text(text_output(&raw, column)?),
            ColumnKind::Text => ColumnValue::Text(row.try_get_unchecked(index)?),
            ColumnKind::Uuid => ColumnValue::Text(row.try_get::<Uuid, _>(index)?.to_string()),
            ColumnKind::Json => ColumnValue::Json(row.try_get(index)?),
            temporal => match decode_temporal(row, index, temporal) {
                Ok(text) => ColumnValue::Text(text),
                // `infinity` and friends have no chrono counterpart
                Err(_) if raw.format() == PgValueFormat::Text => {
                    ColumnValue::Text(text_output(&raw, column)?)
                }
                Err(err) => return Err(err),
            },
        };

        Ok(value)
    }
}

fn decode_temporal(row: &PgRow, index: usize, kind: ColumnKind) -> Result<String, sqlx::Error> {
    let text = match kind {
        ColumnKind::TimestampTz => row.try_get::<DateTime<Utc>, _>(index)?.to_rfc3339(),
        ColumnKind::Timestamp => row
            .try_get::<NaiveDateTime, _>(index)?
            .format("%Y-%m-%dT%H:%M:%S%.f")
            .to_string(),
        ColumnKind::Date => row.try_get::<NaiveDate, _>(index)?.to_string(),
        _ => row.try_get::<NaiveTime, _>(index)?.to_string(),
    };
    Ok(text)
}

/// One database record as ordered column name/value pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, ColumnValue)>,
}

impl Row {
    /// Creates a row from column name/value pairs, keeping their order
    pub fn new(columns: Vec<(String, ColumnValue)>) -> Self {
        Self { columns }
    }

    /// Looks up a value by column name
    pub fn get(&self, column: &str) -> Option<&ColumnValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Column names in result set order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, ColumnValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, ColumnValue)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'r> FromRow<'r, PgRow> for Row {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        row.columns()
            .iter()
            .map(|column| -> Result<(String, ColumnValue), sqlx::Error> {
                Ok((column.name().to_string(), ColumnValue::decode(row, column)?))
            })
            .collect()
    }
}
