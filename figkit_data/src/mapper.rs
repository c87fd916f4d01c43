// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-field coercion applied while parsing.

use crate::dataset::Schema;
use crate::error::{LoadError, LoadResult};
use crate::value::Value;

/// How a field is coerced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coercion {
    /// Parse to [`Value::Number`]; an empty string becomes [`Value::Missing`].
    Number,
    /// Parse `true`/`false`/`1`/`0` (any case) to [`Value::Bool`].
    Boolean,
    /// Keep or render as [`Value::Text`].
    Text,
    /// A list of numbers; a bare number becomes a list of one.
    Numbers,
    /// Keep the parsed value, but the field must be present.
    Require,
}

/// Declares which fields a plot needs and how to coerce them.
///
/// Every mapped field must be present in the schema; rows whose value cannot be coerced fail
/// the whole load.
#[derive(Clone, Debug, Default)]
pub struct RowMapper {
    fields: Vec<(String, Coercion)>,
}

impl RowMapper {
    /// Creates a mapper with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    fn with(mut self, field: &str, coercion: Coercion) -> Self {
        self.fields.retain(|(f, _)| f != field);
        self.fields.push((field.into(), coercion));
        self
    }

    /// Coerces `field` to a number.
    pub fn number(self, field: &str) -> Self {
        self.with(field, Coercion::Number)
    }

    /// Coerces `field` to a boolean.
    pub fn boolean(self, field: &str) -> Self {
        self.with(field, Coercion::Boolean)
    }

    /// Coerces `field` to text.
    pub fn text(self, field: &str) -> Self {
        self.with(field, Coercion::Text)
    }

    /// Coerces `field` to a list of numbers.
    pub fn numbers(self, field: &str) -> Self {
        self.with(field, Coercion::Numbers)
    }

    /// Requires `field` to be present without changing its value.
    pub fn require(self, field: &str) -> Self {
        self.with(field, Coercion::Require)
    }

    /// The declared fields in order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Coercion)> + '_ {
        self.fields.iter().map(|(f, c)| (f.as_str(), *c))
    }

    /// Coerces `rows` in place.
    pub(crate) fn apply(&self, schema: &Schema, rows: &mut [Vec<Value>]) -> LoadResult<()> {
        for (field, coercion) in &self.fields {
            let Some(col) = schema.index_of(field) else {
                return Err(LoadError::SchemaMismatch {
                    row: 0,
                    field: field.clone(),
                });
            };
            for (row, values) in rows.iter_mut().enumerate() {
                let Some(slot) = values.get_mut(col) else {
                    return Err(LoadError::SchemaMismatch {
                        row,
                        field: field.clone(),
                    });
                };
                let raw = core::mem::take(slot);
                if raw.is_missing() {
                    // JSON rows may omit keys that other rows carry.
                    return Err(LoadError::SchemaMismatch {
                        row,
                        field: field.clone(),
                    });
                }
                *slot = coerce(&raw, *coercion).ok_or_else(|| LoadError::InvalidValue {
                    row,
                    field: field.clone(),
                    value: raw.to_string(),
                })?;
            }
        }
        Ok(())
    }
}

fn coerce(raw: &Value, coercion: Coercion) -> Option<Value> {
    match (coercion, raw) {
        (Coercion::Require, v) => Some(v.clone()),
        (Coercion::Number, Value::Number(n)) => Some(Value::Number(*n)),
        (Coercion::Number, Value::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Some(Value::Missing)
            } else {
                s.parse::<f64>().ok().map(Value::Number)
            }
        }
        (Coercion::Number, Value::Bool(b)) => Some(Value::Number(f64::from(u8::from(*b)))),
        (Coercion::Boolean, Value::Bool(b)) => Some(Value::Bool(*b)),
        (Coercion::Boolean, Value::Text(s)) => parse_bool(s).map(Value::Bool),
        (Coercion::Boolean, Value::Number(n)) if *n == 0.0 || *n == 1.0 => {
            Some(Value::Bool(*n == 1.0))
        }
        (Coercion::Text, Value::Text(s)) => Some(Value::Text(s.clone())),
        (Coercion::Text, v) => Some(Value::Text(v.to_string())),
        (Coercion::Numbers, Value::Numbers(v)) => Some(Value::Numbers(v.clone())),
        (Coercion::Numbers, Value::Number(n)) => Some(Value::Numbers(vec![*n])),
        (Coercion::Numbers, Value::Text(s)) => {
            s.trim().parse::<f64>().ok().map(|n| Value::Numbers(vec![n]))
        }
        _ => None,
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") || s == "1" {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") || s == "0" {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn schema() -> Schema {
        Schema::new(["score".into(), "correct".into()])
    }

    #[test]
    fn coerces_text_fields() {
        let mut rows = vec![
            vec![Value::Text("0.5".into()), Value::Text("TRUE".into())],
            vec![Value::Text("-1".into()), Value::Text("0".into())],
        ];
        RowMapper::new()
            .number("score")
            .boolean("correct")
            .apply(&schema(), &mut rows)
            .unwrap();
        assert_eq!(rows[0], vec![Value::Number(0.5), Value::Bool(true)], "first row");
        assert_eq!(rows[1], vec![Value::Number(-1.0), Value::Bool(false)], "second row");
    }

    #[test]
    fn absent_field_is_a_schema_mismatch() {
        let mut rows = vec![vec![Value::Number(1.0), Value::Bool(true)]];
        let err = RowMapper::new()
            .number("ks_distance")
            .apply(&schema(), &mut rows)
            .unwrap_err();
        assert!(
            matches!(err, LoadError::SchemaMismatch { ref field, .. } if field == "ks_distance"),
            "got {err:?}"
        );
    }

    #[test]
    fn bad_value_reports_row_and_field() {
        let mut rows = vec![
            vec![Value::Text("1".into()), Value::Text("yes".into())],
            vec![Value::Text("abc".into()), Value::Text("true".into())],
        ];
        let err = RowMapper::new()
            .number("score")
            .apply(&schema(), &mut rows)
            .unwrap_err();
        assert!(
            matches!(err, LoadError::InvalidValue { row: 1, ref value, .. } if value == "abc"),
            "got {err:?}"
        );
    }
}
