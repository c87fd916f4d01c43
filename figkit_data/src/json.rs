// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON arrays of objects.

use serde_json::Value as Json;

use crate::dataset::{Dataset, Schema};
use crate::error::{LoadError, LoadResult};
use crate::mapper::RowMapper;
use crate::value::Value;

/// Parses a top-level JSON array of flat objects into a dataset.
///
/// The schema is the union of keys in first-appearance order; keys absent from an object are
/// [`Value::Missing`], as is `null`. Arrays must hold only numbers.
pub fn parse_json(text: &str, mapper: Option<&RowMapper>) -> LoadResult<Dataset> {
    let doc: Json = serde_json::from_str(text)?;
    let Json::Array(items) = doc else {
        return Err(LoadError::NotATable(kind(&doc).into()));
    };

    let mut schema = Schema::default();
    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(items.len());
    for (row, item) in items.into_iter().enumerate() {
        let Json::Object(object) = item else {
            return Err(LoadError::NotATable(format!(
                "element {row} is {}",
                kind(&item)
            )));
        };
        let mut values = Vec::with_capacity(schema.fields().len().max(object.len()));
        for (field, raw) in object {
            let value = convert(&raw).ok_or_else(|| LoadError::InvalidValue {
                row,
                field: field.clone(),
                value: raw.to_string(),
            })?;
            let col = schema.push(field);
            if values.len() <= col {
                values.resize(col + 1, Value::Missing);
            }
            values[col] = value;
        }
        rows.push(values);
    }
    let width = schema.fields().len();
    for values in &mut rows {
        values.resize(width, Value::Missing);
    }

    if let Some(mapper) = mapper {
        mapper.apply(&schema, &mut rows)?;
    }
    Ok(Dataset::new(schema, rows))
}

fn convert(raw: &Json) -> Option<Value> {
    match raw {
        Json::Null => Some(Value::Missing),
        Json::Bool(b) => Some(Value::Bool(*b)),
        Json::Number(n) => n.as_f64().map(Value::Number),
        Json::String(s) => Some(Value::Text(s.clone())),
        Json::Array(items) => items
            .iter()
            .map(Json::as_f64)
            .collect::<Option<Vec<f64>>>()
            .map(Value::Numbers),
        Json::Object(_) => None,
    }
}

fn kind(doc: &Json) -> &'static str {
    match doc {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn typed_values_survive() {
        let text = r#"[
            {"method": "IDPEP", "thresh": 0.01, "n_correct": [10, 12, 11]},
            {"method": "Percolator", "thresh": 0.05, "n_correct": 14}
        ]"#;
        let data = parse_json(text, None).unwrap();
        let first = data.get(0).unwrap();
        assert_eq!(first.text("method"), Some("IDPEP"), "string");
        assert_eq!(first.numbers("n_correct"), Some(&[10.0, 12.0, 11.0][..]), "array");
        let second = data.get(1).unwrap();
        assert_eq!(second.numbers("n_correct"), Some(&[14.0][..]), "scalar as list of one");
    }

    #[test]
    fn schema_is_union_of_keys() {
        let data = parse_json(r#"[{"a": 1}, {"b": true, "a": null}]"#, None).unwrap();
        assert_eq!(data.schema().fields(), ["a", "b"], "first-appearance order");
        assert!(data.get(0).is_some_and(|r| r.get("b").is_missing()), "absent key");
        assert!(data.get(1).is_some_and(|r| r.get("a").is_missing()), "null");
    }

    #[test]
    fn numeric_strings_need_a_mapper() {
        let text = r#"[{"score": "0.75", "correct": "true"}]"#;
        let raw = parse_json(text, None).unwrap();
        assert_eq!(raw.get(0).and_then(|r| r.number("score")), None, "text by default");
        let mapper = RowMapper::new().number("score").boolean("correct");
        let typed = parse_json(text, Some(&mapper)).unwrap();
        let r = typed.get(0).unwrap();
        assert_eq!((r.number("score"), r.boolean("correct")), (Some(0.75), Some(true)), "coerced");
    }

    #[test]
    fn rejects_non_tables() {
        assert!(matches!(parse_json("{}", None), Err(LoadError::NotATable(_))), "object");
        assert!(matches!(parse_json("[1]", None), Err(LoadError::NotATable(_))), "element");
        assert!(matches!(parse_json("[", None), Err(LoadError::Json(_))), "syntax");
    }
}
