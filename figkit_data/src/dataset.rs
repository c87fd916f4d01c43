// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Records, datasets and grouping.

use std::sync::Arc;

use hashbrown::HashMap;

use crate::value::Value;

static MISSING: Value = Value::Missing;

/// Joins key parts with `-`, e.g. `["A", "comet"]` to `"A-comet"`.
pub fn composite_key<S: AsRef<str>>(parts: &[S]) -> String {
    let mut out = String::new();
    for (i, p) in parts.iter().enumerate() {
        if i > 0 {
            out.push('-');
        }
        out.push_str(p.as_ref());
    }
    out
}

/// Ordered field names shared by all records of a dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    fields: Vec<String>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Creates a schema from field names; later duplicates are ignored.
    pub fn new(fields: impl IntoIterator<Item = String>) -> Self {
        let mut out = Self::default();
        for f in fields {
            out.push(f);
        }
        out
    }

    pub(crate) fn push(&mut self, field: String) -> usize {
        if let Some(i) = self.index.get(&field) {
            return *i;
        }
        let i = self.fields.len();
        self.index.insert(field.clone(), i);
        self.fields.push(field);
        i
    }

    /// Field names in order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Column index of a field.
    pub fn index_of(&self, field: &str) -> Option<usize> {
        self.index.get(field).copied()
    }

    /// Returns `true` if the schema has this field.
    pub fn contains(&self, field: &str) -> bool {
        self.index.contains_key(field)
    }
}

/// An immutable row; cheap to clone.
#[derive(Clone, Debug)]
pub struct Record {
    schema: Arc<Schema>,
    values: Arc<[Value]>,
}

impl Record {
    pub(crate) fn new(schema: Arc<Schema>, values: Vec<Value>) -> Self {
        Self {
            schema,
            values: values.into(),
        }
    }

    /// The raw value of `field` ([`Value::Missing`] if absent).
    pub fn get(&self, field: &str) -> &Value {
        self.schema
            .index_of(field)
            .and_then(|i| self.values.get(i))
            .unwrap_or(&MISSING)
    }

    /// Numeric field accessor.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).as_number()
    }

    /// Text field accessor.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).as_text()
    }

    /// Boolean field accessor.
    pub fn boolean(&self, field: &str) -> Option<bool> {
        self.get(field).as_bool()
    }

    /// Number-list field accessor (a plain number is a list of one).
    pub fn numbers(&self, field: &str) -> Option<&[f64]> {
        self.get(field).as_numbers()
    }

    /// Composite key of this record over `fields`, joined with `-`.
    pub fn key(&self, fields: &[&str]) -> String {
        let parts: Vec<String> = fields.iter().map(|f| self.get(f).to_string()).collect();
        composite_key(&parts)
    }

    /// The schema shared with the owning dataset.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

/// An ordered sequence of records sharing a schema. Immutable after load.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    schema: Arc<Schema>,
    records: Vec<Record>,
}

impl Dataset {
    /// Creates a dataset from rows laid out by `schema`.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        let schema = Arc::new(schema);
        let records = rows
            .into_iter()
            .map(|values| Record::new(schema.clone(), values))
            .collect();
        Self { schema, records }
    }

    /// The shared schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Record by position.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// The first record matching `pred`.
    pub fn find(&self, pred: impl Fn(&Record) -> bool) -> Option<&Record> {
        self.records.iter().find(|r| pred(r))
    }

    /// A sub-dataset of the records matching `pred`, in order.
    pub fn filter(&self, pred: impl Fn(&Record) -> bool) -> Self {
        Self {
            schema: self.schema.clone(),
            records: self.records.iter().filter(|r| pred(r)).cloned().collect(),
        }
    }

    /// A sub-dataset of the records whose text `field` equals `value`.
    pub fn where_text(&self, field: &str, value: &str) -> Self {
        self.filter(|r| r.text(field) == Some(value))
    }

    /// All values of a numeric field; records without a number yield `None`.
    pub fn numbers(&self, field: &str) -> Vec<Option<f64>> {
        self.records.iter().map(|r| r.number(field)).collect()
    }

    /// Groups records by the composite key over `fields`, preserving first-appearance order.
    pub fn group_by(&self, fields: &[&str]) -> Grouped {
        let mut grouped = Grouped::default();
        for r in &self.records {
            let key = r.key(fields);
            match grouped.groups.get_mut(&key) {
                Some(ds) => ds.records.push(r.clone()),
                None => {
                    grouped.keys.push(key.clone());
                    grouped.groups.insert(
                        key,
                        Self {
                            schema: self.schema.clone(),
                            records: vec![r.clone()],
                        },
                    );
                }
            }
        }
        grouped
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = core::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Sub-datasets keyed by composite key, in first-appearance order.
#[derive(Clone, Debug, Default)]
pub struct Grouped {
    keys: Vec<String>,
    groups: HashMap<String, Dataset>,
}

impl Grouped {
    /// Adds (or replaces) a group.
    pub fn insert(&mut self, key: impl Into<String>, data: Dataset) {
        let key = key.into();
        if !self.groups.contains_key(&key) {
            self.keys.push(key.clone());
        }
        self.groups.insert(key, data);
    }

    /// The sub-dataset for `key`.
    pub fn get(&self, key: &str) -> Option<&Dataset> {
        self.groups.get(key)
    }

    /// Keys in first-appearance order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// `(key, dataset)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Dataset)> + '_ {
        self.keys
            .iter()
            .filter_map(|k| self.groups.get(k).map(|d| (k.as_str(), d)))
    }
}
