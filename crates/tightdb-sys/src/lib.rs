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

// Raw bindings to the TightDB C binding library (tightdb_c_cs32 / tightdb_c_cs64).
//
// Nothing in this crate is safe to call directly. The `tightdb` crate routes
// every call through a single `EntryPoints` table chosen once per process.

pub mod abi;
pub mod api;
pub mod loader;

pub use abi::AbiWidth;
pub use api::{
    EntryPoints, ErrorApi, GroupApi, ProbeApi, QueryApi, RowSetApi, SpecApi, StringCellFn,
    TableApi, ViewApi,
};
pub use loader::{LoadConfig, LoadError, NativeLibrary};

/// Opaque, pointer-sized reference to a native object.
///
/// Zero is the "not bound" sentinel. A non-zero value is only meaningful to
/// the library that produced it.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Handle(usize);

impl Handle {
    pub const NULL: Handle = Handle(0);

    #[inline]
    pub const fn from_raw(raw: usize) -> Self {
        Handle(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> usize {
        self.0
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

// ===== DataType wire codes (tightdb/data_type.hpp) =====

pub const TYPE_INT: usize = 0;
pub const TYPE_BOOL: usize = 1;
pub const TYPE_STRING: usize = 2;
pub const TYPE_BINARY: usize = 4;
pub const TYPE_TABLE: usize = 5;
pub const TYPE_MIXED: usize = 6;
pub const TYPE_DATE: usize = 7;
pub const TYPE_FLOAT: usize = 9;
pub const TYPE_DOUBLE: usize = 10;

/// Returned by find/lookup entry points when nothing matches (`size_t(-1)`).
pub const NOT_FOUND: usize = usize::MAX;

/// `last_error_code` value meaning the previous call succeeded.
pub const ERR_NONE: usize = 0;
