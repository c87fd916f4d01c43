// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for data loading.

use thiserror::Error;

/// Errors that can occur while fetching or parsing a data file.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Reading the file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The requested path.
        path: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The source has no file at this path.
    #[error("no such file: {0}")]
    NotFound(String),

    /// The file extension is not `.csv` or `.json`.
    #[error("unsupported data format: {0}")]
    UnsupportedFormat(String),

    /// JSON syntax error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON document is not an array of objects.
    #[error("JSON is not a table: {0}")]
    NotATable(String),

    /// CSV structure error.
    #[error("CSV parse error at line {line}: {message}")]
    Csv {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// A field required by the row mapper is absent.
    #[error("row {row}: missing field `{field}`")]
    SchemaMismatch {
        /// 0-based record index.
        row: usize,
        /// The missing field.
        field: String,
    },

    /// A field could not be coerced to the requested type.
    #[error("row {row}: field `{field}` has invalid value {value:?}")]
    InvalidValue {
        /// 0-based record index.
        row: usize,
        /// The offending field.
        field: String,
        /// The raw value.
        value: String,
    },
}

/// Result type alias for data loading.
pub type LoadResult<T> = Result<T, LoadError>;
