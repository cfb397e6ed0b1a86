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

use tightdb_sys as sys;

use crate::error::{Error, Result};

/// Column and mixed-value type tag. Discriminants are the engine's wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum DataType {
    Int = sys::TYPE_INT,
    Bool = sys::TYPE_BOOL,
    String = sys::TYPE_STRING,
    Binary = sys::TYPE_BINARY,
    Table = sys::TYPE_TABLE,
    Mixed = sys::TYPE_MIXED,
    Date = sys::TYPE_DATE,
    Float = sys::TYPE_FLOAT,
    Double = sys::TYPE_DOUBLE,
}

impl DataType {
    pub const ALL: [DataType; 9] = [
        DataType::Int,
        DataType::Bool,
        DataType::String,
        DataType::Binary,
        DataType::Table,
        DataType::Mixed,
        DataType::Date,
        DataType::Float,
        DataType::Double,
    ];

    /// Pointer-sized wire value.
    #[inline]
    pub fn code(self) -> usize {
        self as usize
    }

    pub fn from_code(code: usize) -> Result<DataType> {
        match code {
            sys::TYPE_INT => Ok(DataType::Int),
            sys::TYPE_BOOL => Ok(DataType::Bool),
            sys::TYPE_STRING => Ok(DataType::String),
            sys::TYPE_BINARY => Ok(DataType::Binary),
            sys::TYPE_TABLE => Ok(DataType::Table),
            sys::TYPE_MIXED => Ok(DataType::Mixed),
            sys::TYPE_DATE => Ok(DataType::Date),
            sys::TYPE_FLOAT => Ok(DataType::Float),
            sys::TYPE_DOUBLE => Ok(DataType::Double),
            other => Err(Error::UnknownDataType(other)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DataType::Int => "Int",
            DataType::Bool => "Bool",
            DataType::String => "String",
            DataType::Binary => "Binary",
            DataType::Table => "Table",
            DataType::Mixed => "Mixed",
            DataType::Date => "Date",
            DataType::Float => "Float",
            DataType::Double => "Double",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
