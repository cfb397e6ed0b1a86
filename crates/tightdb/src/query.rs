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

use std::marker::PhantomData;

use tightdb_sys::{Handle, NOT_FOUND};

use crate::error::Result;
use crate::marshal::{bool_to_wire, c_string, found};
use crate::native::Site;
use crate::resource::{Bound, ResourceKind};
use crate::table::Table;
use crate::view::TableView;

/// An unexecuted filter over one table.
///
/// Conditions are added in place; execution produces a [`TableView`] or walks
/// matches one at a time with [`Query::find_next`].
#[derive(Debug)]
pub struct Query<'t> {
    bound: Bound,
    _table: PhantomData<&'t Table>,
}

impl<'t> Query<'t> {
    pub(crate) fn bind(table: &'t Table, handle: Handle) -> Result<Self> {
        Ok(Query {
            bound: Bound::new(
                table.bound.native().clone(),
                ResourceKind::Query,
                "where",
                handle,
            )?,
            _table: PhantomData,
        })
    }

    pub fn handle(&self) -> Handle {
        self.bound.handle()
    }

    pub fn is_released(&self) -> bool {
        self.bound.is_released()
    }

    pub fn release(&mut self) -> Result<()> {
        self.bound.release()
    }

    fn site(&self, op: &'static str) -> Site {
        Site::new(ResourceKind::Query, op)
    }

    fn bound_or_all(&self, what: &'static str, value: Option<u64>) -> Result<usize> {
        match value {
            Some(v) => self.bound.index(what, v),
            None => Ok(NOT_FOUND),
        }
    }

    // ----- conditions -----

    pub fn bool_equal(&mut self, column: u64, value: bool) -> Result<&mut Self> {
        self.bound.raw()?;
        let c = self.bound.index("column", column)?;
        let wire = bool_to_wire(value);
        self.bound
            .call(self.site("bool_equal").column(column), |api, h| unsafe {
                (api.query.bool_equal)(h, c, wire)
            })?;
        Ok(self)
    }

    /// Inclusive on both ends.
    pub fn int_between(&mut self, column: u64, low: i64, high: i64) -> Result<&mut Self> {
        self.bound.raw()?;
        let c = self.bound.index("column", column)?;
        self.bound
            .call(self.site("int_between").column(column), |api, h| unsafe {
                (api.query.int_between)(h, c, low, high)
            })?;
        Ok(self)
    }

    pub fn column_index(&self, name: &str) -> Result<Option<u64>> {
        let name = c_string("column name", name)?;
        let raw = self
            .bound
            .call(self.site("get_column_index"), |api, h| unsafe {
                (api.query.get_column_index)(h, name.as_ptr())
            })?;
        Ok(found(raw))
    }

    // ----- execution -----

    /// Matching rows in `[start, end)`, at most `limit` of them. `None` for
    /// `end` or `limit` means unbounded.
    pub fn find_all(
        &self,
        start: u64,
        end: Option<u64>,
        limit: Option<u64>,
    ) -> Result<TableView<'t>> {
        self.bound.raw()?;
        let s = self.bound.index("start row", start)?;
        let e = self.bound_or_all("end row", end)?;
        let l = self.bound_or_all("limit", limit)?;
        let handle = self
            .bound
            .call(self.site("find_all").row(start), |api, h| unsafe {
                (api.query.find_all)(h, s, e, l)
            })?;
        TableView::bind(self.bound.native().clone(), "find_all", handle)
    }

    /// Every matching row.
    pub fn find_all_rows(&self) -> Result<TableView<'t>> {
        self.find_all(0, None, None)
    }

    /// First match after `last`, or the first match overall when `last` is
    /// `None`.
    pub fn find_next(&self, last: Option<u64>) -> Result<Option<u64>> {
        self.bound.raw()?;
        let from = self.bound_or_all("row", last)?;
        let raw = self.bound.call(self.site("find_next"), |api, h| unsafe {
            (api.query.find_next)(h, from)
        })?;
        Ok(found(raw))
    }

    /// Average of an Int column over the matching rows.
    pub fn average(&self, column: u64) -> Result<f64> {
        self.bound.raw()?;
        let c = self.bound.index("column", column)?;
        self.bound
            .call(self.site("average").column(column), |api, h| unsafe {
                (api.query.average)(h, c)
            })
    }
}
