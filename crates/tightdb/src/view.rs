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
use std::sync::Arc;

use tightdb_sys::Handle;

use crate::error::Result;
use crate::native::{Native, Site};
use crate::resource::{Bound, ResourceKind};
use crate::table::Table;

/// An ordered selection of rows from a source table.
///
/// Produced by searches, `distinct` and query execution. The view is a
/// separate native object with a single owner; it borrows the table it was
/// derived from so the source cannot be released underneath it.
#[derive(Debug)]
pub struct TableView<'t> {
    pub(crate) bound: Bound,
    _source: PhantomData<&'t Table>,
}

impl<'t> TableView<'t> {
    pub(crate) fn bind(native: Arc<Native>, op: &'static str, handle: Handle) -> Result<Self> {
        Ok(TableView {
            bound: Bound::new(native, ResourceKind::TableView, op, handle)?,
            _source: PhantomData,
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

    /// Remove the row at `row` in this view from the source table.
    pub fn remove_row(&self, row: u64) -> Result<()> {
        self.bound.raw()?;
        let r = self.bound.index("row", row)?;
        self.bound.call(
            Site::new(ResourceKind::TableView, "remove").row(row),
            |api, h| unsafe { (api.view.remove_row)(h, r) },
        )
    }
}
