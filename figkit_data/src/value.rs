// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// A single field value of a record.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// A number.
    Number(f64),
    /// A string (untyped CSV fields start out as text).
    Text(String),
    /// A boolean.
    Bool(bool),
    /// A list of numbers, e.g. counts over replicate runs.
    Numbers(Vec<f64>),
    /// The field is absent or null.
    #[default]
    Missing,
}

impl Value {
    /// The value as a number, if it is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as a list of numbers; a single number is a list of one.
    pub fn as_numbers(&self) -> Option<&[f64]> {
        match self {
            Self::Numbers(v) => Some(v),
            Self::Number(n) => Some(core::slice::from_ref(n)),
            _ => None,
        }
    }

    /// Returns `true` for [`Value::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Numbers(v) => {
                f.write_str("[")?;
                for (i, n) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{n}")?;
                }
                f.write_str("]")
            }
            Self::Missing => Ok(()),
        }
    }
}
