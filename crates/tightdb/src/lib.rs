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

//! Safe access to the TightDB engine through its flat C binding.
//!
//! The engine itself lives in a native library (`tightdb_c_cs32` or
//! `tightdb_c_cs64`, picked by pointer width). This crate binds its entry
//! points once, verifies the binary contract, and wraps every native object
//! in an owning type that releases it exactly once.
//!
//! ```no_run
//! use tightdb::{Context, DataType, RowSet};
//!
//! let ctx = Context::from_env()?;
//! let table = ctx.new_table()?;
//! let age = table.add_column(DataType::Int, "age")?;
//! table.add_empty_row(3)?;
//! for (row, value) in [10, 20, 30].into_iter().enumerate() {
//!     table.set_int(age, row as u64, value)?;
//! }
//! assert_eq!(table.find_first_int(age, 20)?, Some(1));
//! # Ok::<(), tightdb::Error>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]

pub mod calllog;
mod context;
mod datatype;
mod error;
mod group;
pub mod marshal;
mod mixed;
mod native;
mod query;
mod resource;
mod rowset;
mod selftest;
mod spec;
mod table;
pub mod time;
mod view;

pub use context::Context;
pub use datatype::DataType;
pub use error::{Error, Result};
pub use group::Group;
pub use mixed::MixedValue;
pub use query::Query;
pub use resource::ResourceKind;
pub use rowset::RowSet;
pub use spec::{Spec, SpecOps, TableSpec};
pub use table::Table;
pub use view::TableView;

pub use tightdb_sys::{AbiWidth, Handle, LoadConfig, LoadError};
