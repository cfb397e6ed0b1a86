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

use std::sync::Arc;

use tightdb_sys::Handle;

use crate::datatype::DataType;
use crate::error::Result;
use crate::marshal::c_string;
use crate::native::{Native, Site};
use crate::query::Query;
use crate::resource::{Bound, ResourceKind};
use crate::spec::TableSpec;
use crate::view::TableView;

/// A root table, a sub-table, or a table owned by a group.
///
/// Tables are reference counted by the engine; dropping or releasing a
/// `Table` unbinds this reference only. Cell access and search live on
/// [`RowSet`](crate::RowSet).
#[derive(Debug)]
pub struct Table {
    pub(crate) bound: Bound,
}

impl Table {
    pub(crate) fn bind(native: Arc<Native>, op: &'static str, handle: Handle) -> Result<Table> {
        Ok(Table {
            bound: Bound::new(native, ResourceKind::Table, op, handle)?,
        })
    }

    /// The native handle, or [`Handle::NULL`] once released.
    pub fn handle(&self) -> Handle {
        self.bound.handle()
    }

    pub fn is_released(&self) -> bool {
        self.bound.is_released()
    }

    /// Unbind now instead of on drop. A second call fails with `Released`.
    pub fn release(&mut self) -> Result<()> {
        self.bound.release()
    }

    fn site(&self, op: &'static str) -> Site {
        Site::new(ResourceKind::Table, op)
    }

    // ----- schema -----

    /// Append a column and return its index.
    pub fn add_column(&self, ty: DataType, name: &str) -> Result<u64> {
        let name = c_string("column name", name)?;
        let code = ty.code();
        let index = self.bound.call(self.site("add_column"), |api, h| unsafe {
            (api.table.add_column)(h, code, name.as_ptr())
        })?;
        Ok(index as u64)
    }

    pub fn rename_column(&self, column: u64, name: &str) -> Result<()> {
        self.bound.raw()?;
        let c = self.bound.index("column", column)?;
        let name = c_string("column name", name)?;
        self.bound
            .call(self.site("rename_column").column(column), |api, h| unsafe {
                (api.table.rename_column)(h, c, name.as_ptr())
            })
    }

    pub fn remove_column(&self, column: u64) -> Result<()> {
        self.bound.raw()?;
        let c = self.bound.index("column", column)?;
        self.bound
            .call(self.site("remove_column").column(column), |api, h| unsafe {
                (api.table.remove_column)(h, c)
            })
    }

    /// The table's own schema. It is never released separately.
    pub fn spec(&self) -> Result<TableSpec<'_>> {
        let handle = self
            .bound
            .call(self.site("get_spec"), |api, h| unsafe { (api.table.get_spec)(h) })?;
        TableSpec::bind(self, handle)
    }

    /// Apply changes made through [`Table::spec`] to the table's columns.
    pub fn update_from_spec(&self) -> Result<()> {
        self.bound.call(self.site("update_from_spec"), |api, h| unsafe {
            (api.table.update_from_spec)(h)
        })
    }

    // ----- rows -----

    pub fn insert_empty_row(&self, row: u64, count: u64) -> Result<()> {
        self.bound.raw()?;
        let r = self.bound.index("row", row)?;
        let n = self.bound.index("row count", count)?;
        self.bound
            .call(self.site("insert_empty_row").row(row), |api, h| unsafe {
                (api.table.insert_empty_row)(h, r, n)
            })
    }

    /// Append `count` empty rows and return the index of the first.
    pub fn add_empty_row(&self, count: u64) -> Result<u64> {
        self.bound.raw()?;
        let n = self.bound.index("row count", count)?;
        let first = self.bound.call(self.site("add_empty_row"), |api, h| unsafe {
            (api.table.add_empty_row)(h, n)
        })?;
        Ok(first as u64)
    }

    pub fn remove_row(&self, row: u64) -> Result<()> {
        self.bound.raw()?;
        let r = self.bound.index("row", row)?;
        self.bound
            .call(self.site("remove_row").row(row), |api, h| unsafe {
                (api.table.remove_row)(h, r)
            })
    }

    /// Insert a new row at `row` whose `column` holds `value`; every other
    /// cell takes its default.
    pub fn insert_int(&self, column: u64, row: u64, value: i64) -> Result<()> {
        self.bound.raw()?;
        let c = self.bound.index("column", column)?;
        let r = self.bound.index("row", row)?;
        self.bound
            .call(self.site("insert_int").cell(column, row), |api, h| unsafe {
                (api.table.insert_int)(h, c, r, value)
            })
    }

    // ----- indexing and search -----

    pub fn set_index(&self, column: u64) -> Result<()> {
        self.bound.raw()?;
        let c = self.bound.index("column", column)?;
        self.bound
            .call(self.site("set_index").column(column), |api, h| unsafe {
                (api.table.set_index)(h, c)
            })
    }

    /// One row per distinct value. The column must be indexed.
    pub fn distinct(&self, column: u64) -> Result<TableView<'_>> {
        self.bound.raw()?;
        let c = self.bound.index("column", column)?;
        let handle = self
            .bound
            .call(self.site("distinct").column(column), |api, h| unsafe {
                (api.table.distinct)(h, c)
            })?;
        TableView::bind(self.bound.native().clone(), "distinct", handle)
    }

    /// Start an unexecuted query over this table.
    pub fn query(&self) -> Result<Query<'_>> {
        let handle = self
            .bound
            .call(self.site("where"), |api, h| unsafe { (api.table.where_)(h) })?;
        Query::bind(self, handle)
    }
}
