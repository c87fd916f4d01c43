// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where data files come from.

use std::path::{Path, PathBuf};

use hashbrown::HashMap;

use crate::csv::parse_csv;
use crate::dataset::Dataset;
use crate::error::{LoadError, LoadResult};
use crate::json::parse_json;
use crate::mapper::RowMapper;

/// Fetches the text of a static data file.
pub trait DataSource {
    /// Returns the file content for a relative `path` such as `ks-distances.csv`.
    fn fetch(&self, path: &str) -> LoadResult<String>;
}

/// Reads files below a root directory.
#[derive(Clone, Debug)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DataSource for FsSource {
    fn fetch(&self, path: &str) -> LoadResult<String> {
        let full = self.root.join(path);
        std::fs::read_to_string(&full).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound(full.display().to_string())
            } else {
                LoadError::Io {
                    path: full.display().to_string(),
                    source,
                }
            }
        })
    }
}

/// Serves files from memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file.
    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    /// Adds or replaces a file.
    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }
}

impl DataSource for MemorySource {
    fn fetch(&self, path: &str) -> LoadResult<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(path.into()))
    }
}

/// Fetches `path` from `source` and parses it by extension (`.csv` or `.json`).
pub fn load(
    source: &dyn DataSource,
    path: &str,
    mapper: Option<&RowMapper>,
) -> LoadResult<Dataset> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let parse: fn(&str, Option<&RowMapper>) -> LoadResult<Dataset> = match ext.as_deref() {
        Some("csv") => parse_csv,
        Some("json") => parse_json,
        _ => return Err(LoadError::UnsupportedFormat(path.into())),
    };
    let text = source.fetch(path)?;
    let data = parse(&text, mapper)?;
    tracing::debug!(path, records = data.len(), "loaded data file");
    Ok(data)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn dispatches_on_extension() {
        let source = MemorySource::new()
            .with_file("a.csv", "x\n1\n")
            .with_file("b.json", r#"[{"x": 1}]"#)
            .with_file("c.tsv", "x\t1\n");
        let mapper = RowMapper::new().number("x");
        let a = load(&source, "a.csv", Some(&mapper)).unwrap();
        let b = load(&source, "b.json", None).unwrap();
        assert_eq!(a.get(0).and_then(|r| r.number("x")), Some(1.0), "csv");
        assert_eq!(b.get(0).and_then(|r| r.number("x")), Some(1.0), "json");
        assert!(
            matches!(load(&source, "c.tsv", None), Err(LoadError::UnsupportedFormat(_))),
            "tsv"
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load(&MemorySource::new(), "nope.json", None).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(ref p) if p == "nope.json"), "got {err:?}");
        let fs = FsSource::new("/nonexistent-figkit-root");
        assert!(matches!(fs.fetch("x.csv"), Err(LoadError::NotFound(_))), "fs miss");
    }
}
