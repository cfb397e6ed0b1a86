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

//! Cells of `Mixed` columns.
//!
//! A mixed cell carries its own type tag. Reads fetch the tag first and then
//! call the accessor for that type; writes pick the setter from the value,
//! which also sets the tag.

use chrono::{DateTime, Utc};

use crate::datatype::DataType;
use crate::error::{Error, Result};
use crate::marshal::{bool_from_wire, bool_to_wire, c_string};
use crate::rowset::{cell_string, on_cell, RowSet};
use crate::table::Table;
use crate::time;

/// The value held by a mixed cell.
#[derive(Debug)]
pub enum MixedValue {
    Int(i64),
    Bool(bool),
    String(String),
    /// Declared by the engine but not supported in mixed cells.
    Binary(Vec<u8>),
    Table(Table),
    Date(DateTime<Utc>),
    Float(f32),
    Double(f64),
}

impl MixedValue {
    pub fn data_type(&self) -> DataType {
        match self {
            MixedValue::Int(_) => DataType::Int,
            MixedValue::Bool(_) => DataType::Bool,
            MixedValue::String(_) => DataType::String,
            MixedValue::Binary(_) => DataType::Binary,
            MixedValue::Table(_) => DataType::Table,
            MixedValue::Date(_) => DataType::Date,
            MixedValue::Float(_) => DataType::Float,
            MixedValue::Double(_) => DataType::Double,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            MixedValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MixedValue::String(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for MixedValue {
    fn from(v: i64) -> Self {
        MixedValue::Int(v)
    }
}

impl From<bool> for MixedValue {
    fn from(v: bool) -> Self {
        MixedValue::Bool(v)
    }
}

impl From<&str> for MixedValue {
    fn from(v: &str) -> Self {
        MixedValue::String(v.to_string())
    }
}

impl From<String> for MixedValue {
    fn from(v: String) -> Self {
        MixedValue::String(v)
    }
}

impl From<f32> for MixedValue {
    fn from(v: f32) -> Self {
        MixedValue::Float(v)
    }
}

impl From<f64> for MixedValue {
    fn from(v: f64) -> Self {
        MixedValue::Double(v)
    }
}

impl From<DateTime<Utc>> for MixedValue {
    fn from(v: DateTime<Utc>) -> Self {
        MixedValue::Date(v)
    }
}

impl From<Table> for MixedValue {
    fn from(v: Table) -> Self {
        MixedValue::Table(v)
    }
}

// ---------------------------------------------------------------------------
// Typed accessors. A tag mismatch is reported by the engine.
// ---------------------------------------------------------------------------

pub(crate) fn value_type<S: RowSet + ?Sized>(rows: &S, column: u64, row: u64) -> Result<DataType> {
    let code = on_cell(rows, "get_mixed_type", column, row, |api, h, c, r| unsafe {
        (api.get_mixed_type)(h, c, r)
    })?;
    DataType::from_code(code)
}

pub(crate) fn get_int<S: RowSet + ?Sized>(rows: &S, column: u64, row: u64) -> Result<i64> {
    on_cell(rows, "get_mixed_int", column, row, |api, h, c, r| unsafe {
        (api.get_mixed_int)(h, c, r)
    })
}

pub(crate) fn get_bool<S: RowSet + ?Sized>(rows: &S, column: u64, row: u64) -> Result<bool> {
    let raw = on_cell(rows, "get_mixed_bool", column, row, |api, h, c, r| unsafe {
        (api.get_mixed_bool)(h, c, r)
    })?;
    Ok(bool_from_wire(raw))
}

pub(crate) fn get_float<S: RowSet + ?Sized>(rows: &S, column: u64, row: u64) -> Result<f32> {
    on_cell(rows, "get_mixed_float", column, row, |api, h, c, r| unsafe {
        (api.get_mixed_float)(h, c, r)
    })
}

pub(crate) fn get_double<S: RowSet + ?Sized>(rows: &S, column: u64, row: u64) -> Result<f64> {
    on_cell(rows, "get_mixed_double", column, row, |api, h, c, r| unsafe {
        (api.get_mixed_double)(h, c, r)
    })
}

pub(crate) fn get_date<S: RowSet + ?Sized>(
    rows: &S,
    column: u64,
    row: u64,
) -> Result<DateTime<Utc>> {
    let secs = on_cell(rows, "get_mixed_date", column, row, |api, h, c, r| unsafe {
        (api.get_mixed_date)(h, c, r)
    })?;
    Ok(time::decode(secs))
}

/// Stock bindings cannot read strings back out of mixed cells.
pub(crate) fn get_string<S: RowSet + ?Sized>(rows: &S, column: u64, row: u64) -> Result<String> {
    let b = rows.bound();
    b.raw()?;
    let Some(getter) = S::rows(b.native().entry_points()).get_mixed_string else {
        return Err(Error::NotImplemented("reading a string from a mixed cell with this binding"));
    };
    cell_string(rows, "get_mixed_string", column, row, move |_| getter)
}

/// Read the tag, then the value.
pub(crate) fn get<S: RowSet + ?Sized>(rows: &S, column: u64, row: u64) -> Result<MixedValue> {
    let value = match value_type(rows, column, row)? {
        DataType::Int => MixedValue::Int(get_int(rows, column, row)?),
        DataType::Bool => MixedValue::Bool(get_bool(rows, column, row)?),
        DataType::String => MixedValue::String(get_string(rows, column, row)?),
        DataType::Binary => return Err(Error::NotImplemented("reading binary from a mixed cell")),
        DataType::Table => MixedValue::Table(rows.subtable(column, row)?),
        DataType::Date => MixedValue::Date(get_date(rows, column, row)?),
        DataType::Float => MixedValue::Float(get_float(rows, column, row)?),
        DataType::Double => MixedValue::Double(get_double(rows, column, row)?),
        DataType::Mixed => return Err(Error::UnknownDataType(DataType::Mixed.code())),
    };
    Ok(value)
}

/// Store `value`, replacing the cell's tag.
pub(crate) fn set<S: RowSet + ?Sized>(
    rows: &S,
    column: u64,
    row: u64,
    value: &MixedValue,
) -> Result<()> {
    match value {
        MixedValue::Int(v) => on_cell(rows, "set_mixed_int", column, row, |api, h, c, r| unsafe {
            (api.set_mixed_int)(h, c, r, *v)
        }),
        MixedValue::Bool(v) => {
            let wire = bool_to_wire(*v);
            on_cell(rows, "set_mixed_bool", column, row, |api, h, c, r| unsafe {
                (api.set_mixed_bool)(h, c, r, wire)
            })
        }
        MixedValue::String(v) => {
            let v = c_string("mixed string", v)?;
            on_cell(rows, "set_mixed_string", column, row, |api, h, c, r| unsafe {
                (api.set_mixed_string)(h, c, r, v.as_ptr())
            })
        }
        MixedValue::Binary(_) => Err(Error::NotImplemented("writing binary to a mixed cell")),
        MixedValue::Table(source) => {
            let src = source.bound.raw()?;
            on_cell(rows, "set_mixed_subtable", column, row, |api, h, c, r| unsafe {
                (api.set_mixed_subtable)(h, c, r, src)
            })
        }
        MixedValue::Date(v) => {
            let secs = time::encode_mixed(*v)?;
            on_cell(rows, "set_mixed_date", column, row, |api, h, c, r| unsafe {
                (api.set_mixed_date)(h, c, r, secs)
            })
        }
        MixedValue::Float(v) => on_cell(rows, "set_mixed_float", column, row, |api, h, c, r| unsafe {
            (api.set_mixed_float)(h, c, r, *v)
        }),
        MixedValue::Double(v) => {
            on_cell(rows, "set_mixed_double", column, row, |api, h, c, r| unsafe {
                (api.set_mixed_double)(h, c, r, *v)
            })
        }
    }
}
