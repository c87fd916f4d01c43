// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static data files to typed records.
//!
//! A [`DataSource`] fetches file text; [`load`] parses it as CSV or JSON into a [`Dataset`] of
//! immutable [`Record`]s. An optional [`RowMapper`] coerces fields (CSV parsing yields text
//! only) and rejects rows missing a field some plot needs, so schema problems surface at load
//! time rather than as `NaN` geometry.

mod csv;
mod dataset;
mod error;
mod json;
mod mapper;
mod source;
mod value;

pub use csv::parse_csv;
pub use dataset::{Dataset, Grouped, Record, Schema, composite_key};
pub use error::{LoadError, LoadResult};
pub use json::parse_json;
pub use mapper::{Coercion, RowMapper};
pub use source::{DataSource, FsSource, MemorySource, load};
pub use value::Value;
