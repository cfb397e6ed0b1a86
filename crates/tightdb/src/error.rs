//   Copyright (c) 2024-2026 Anton Kundenko <singaraiona@gmail.com>
//   All rights reserved.
//
//   Permission is hereby granted, free of charge, to any person obtaining a copy
//   of this software and associated documentation files (the "Software"), to deal
//   in the Software without restriction, including without limitation the rights
//   to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
//   copies of the Software, and to permit persons to whom the Software is
//   furnished to do so, subject to the following conditions:
//
//   The above copyright notice and this permission notice shall be included in all
//   copies or substantial portions of the Software.
//
//   THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
//   IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//   FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
//   AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
//   LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
//   OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
//   SOFTWARE.

use chrono::{DateTime, Utc};
use tightdb_sys::{AbiWidth, LoadError};

use crate::datatype::DataType;
use crate::resource::ResourceKind;

/// Everything that can go wrong at the boundary.
///
/// Variants fall in five groups: local validation (raised before any native
/// call), interop failures from the startup self-test, use of a released
/// wrapper, failures reported by the engine, and deliberately unbuilt
/// operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ----- validation -----
    /// A column or row index does not fit the ABI's index type.
    #[error("{what} index {value} exceeds the {abi} limit of {limit}")]
    IndexOutOfRange {
        what: &'static str,
        value: u64,
        limit: u64,
        abi: AbiWidth,
    },

    /// Mixed cells cannot hold dates before the epoch.
    #[error("mixed date {0} is before 1970-01-01T00:00:00Z")]
    PreEpochMixedDate(DateTime<Utc>),

    /// A name or string value cannot be passed as a C string.
    #[error("{what} contains an interior NUL byte")]
    InteriorNul { what: &'static str },

    /// The engine only accepts paths that are valid UTF-8.
    #[error("path {} is not valid UTF-8", .0.display())]
    InvalidPath(std::path::PathBuf),

    /// A nested spec was requested for a column that is not a sub-table.
    #[error("column {column} has type {actual}, expected Table")]
    NotSubtableColumn { column: u64, actual: DataType },

    // ----- interop -----
    /// The native library broke a binary assumption.
    #[error("interop check '{assumption}' failed: native returned {native}, expected {expected}")]
    Interop {
        assumption: &'static str,
        native: String,
        expected: String,
    },

    // ----- resource state -----
    #[error("{kind} has already been released")]
    Released { kind: ResourceKind },

    // ----- engine -----
    /// Failure signalled by the engine through its error slot.
    #[error("{kind} {op} failed{}: {message} (engine code {code})", location(.column, .row))]
    Engine {
        kind: ResourceKind,
        op: &'static str,
        column: Option<u64>,
        row: Option<u64>,
        code: usize,
        message: String,
    },

    /// A constructor or derivation returned the null handle.
    #[error("{kind} {op} returned a null handle")]
    NullHandle { kind: ResourceKind, op: &'static str },

    #[error("engine returned unknown data type tag {0}")]
    UnknownDataType(usize),

    #[error("engine returned a string that is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    // ----- other -----
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error(transparent)]
    Load(#[from] LoadError),
}

impl Error {
    /// True for errors raised locally before any native call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::IndexOutOfRange { .. }
                | Error::PreEpochMixedDate(_)
                | Error::InteriorNul { .. }
                | Error::InvalidPath(_)
                | Error::NotSubtableColumn { .. }
        )
    }

    pub fn is_engine(&self) -> bool {
        matches!(self, Error::Engine { .. })
    }
}

fn location(column: &Option<u64>, row: &Option<u64>) -> String {
    match (column, row) {
        (Some(c), Some(r)) => format!(" at column {c}, row {r}"),
        (Some(c), None) => format!(" at column {c}"),
        (None, Some(r)) => format!(" at row {r}"),
        (None, None) => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_names_its_call_site() {
        let err = Error::Engine {
            kind: ResourceKind::Table,
            op: "get_mixed_int",
            column: Some(0),
            row: Some(3),
            code: 2,
            message: "mixed cell holds String".into(),
        };
        let text = err.to_string();
        assert!(text.contains("get_mixed_int"));
        assert!(text.contains("column 0, row 3"));
        assert!(text.contains("mixed cell holds String"));
        assert!(err.is_engine());
        assert!(!err.is_validation());
    }

    #[test]
    fn index_error_reports_value_and_limit() {
        let err = Error::IndexOutOfRange {
            what: "row",
            value: 1 << 40,
            limit: i32::MAX as u64,
            abi: AbiWidth::Narrow,
        };
        let text = err.to_string();
        assert!(text.contains(&(1u64 << 40).to_string()));
        assert!(text.contains("2147483647"));
        assert!(err.is_validation());
    }
}
