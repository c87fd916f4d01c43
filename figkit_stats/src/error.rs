// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// A statistic was requested over a sequence without any (finite) values.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
#[error("cannot compute {statistic} of an empty sequence")]
pub struct EmptyInputError {
    /// Name of the statistic that was requested.
    pub statistic: &'static str,
}

impl EmptyInputError {
    pub(crate) fn new(statistic: &'static str) -> Self {
        Self { statistic }
    }
}
