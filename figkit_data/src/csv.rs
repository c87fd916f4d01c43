// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Comma-separated files with a header row.

use crate::dataset::{Dataset, Schema};
use crate::error::{LoadError, LoadResult};
use crate::mapper::RowMapper;
use crate::value::Value;

/// Parses CSV text into a dataset.
///
/// Every field is read as [`Value::Text`]; numeric and boolean columns need a [`RowMapper`].
/// Blank lines are skipped. A row with a different number of fields than the header is a
/// [`LoadError::Csv`].
pub fn parse_csv(text: &str, mapper: Option<&RowMapper>) -> LoadResult<Dataset> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Err(LoadError::Csv {
            line: 1,
            message: "missing header row".into(),
        });
    };
    let names = split_csv_line(header);
    let schema = Schema::new(names.iter().map(|n| unquote(n)));
    if schema.fields().len() != names.len() {
        return Err(LoadError::Csv {
            line: 1,
            message: "duplicate column name".into(),
        });
    }

    let mut rows = Vec::new();
    for (i, line) in lines {
        let cells = split_csv_line(line);
        if cells.len() != names.len() {
            return Err(LoadError::Csv {
                line: i + 1,
                message: format!("expected {} fields, found {}", names.len(), cells.len()),
            });
        }
        rows.push(cells.iter().map(|c| Value::Text(unquote(c))).collect());
    }

    if let Some(mapper) = mapper {
        mapper.apply(&schema, &mut rows)?;
    }
    Ok(Dataset::new(schema, rows))
}

/// Splits a line on commas outside double quotes.
fn split_csv_line(line: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == ',' && !in_quotes {
            result.push(&line[start..i]);
            start = i + 1;
        }
    }
    result.push(&line[start..]);
    result
}

/// Trims a field and removes surrounding quotes; `""` inside quotes is a literal quote.
fn unquote(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].replace("\"\"", "\"")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn quoted_fields_may_contain_commas() {
        let fields = split_csv_line(r#"B1,"comet, tuned",0.25"#);
        assert_eq!(fields, vec!["B1", r#""comet, tuned""#, "0.25"], "three fields");
        assert_eq!(unquote(fields[1]), "comet, tuned", "quotes removed");
        assert_eq!(unquote(r#""say ""hi""""#), r#"say "hi""#, "escaped quotes");
    }

    #[test]
    fn parses_header_and_rows() {
        let text = "dataset,engine,ks_distance\nB1,xtandem,0.5\n\nA2,comet,0.25\n";
        let data = parse_csv(text, Some(&RowMapper::new().number("ks_distance"))).unwrap();
        assert_eq!(data.len(), 2, "blank line skipped");
        let first = data.get(0).unwrap();
        assert_eq!(first.text("engine"), Some("xtandem"), "text column");
        assert_eq!(first.number("ks_distance"), Some(0.5), "coerced column");
    }

    #[test]
    fn untyped_fields_stay_text() {
        let data = parse_csv("score\n1.5\n", None).unwrap();
        assert_eq!(data.get(0).and_then(|r| r.text("score")), Some("1.5"), "no mapper");
        assert_eq!(data.get(0).and_then(|r| r.number("score")), None, "not a number yet");
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = parse_csv("a,b\n1,2\n3\n", None).unwrap_err();
        assert!(matches!(err, LoadError::Csv { line: 3, .. }), "got {err:?}");
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let data = parse_csv("\u{feff}engine\ncomet\n", None).unwrap();
        assert!(data.schema().contains("engine"), "BOM stripped from first header");
    }
}
