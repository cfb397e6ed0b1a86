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

//! Operations shared by tables and table views.
//!
//! The engine exports the same family twice (`table_*` and `tableview_*`).
//! [`RowSet`] is implemented by [`Table`] and [`TableView`] and picks the
//! family for its receiver, so every method below exists once.

use chrono::{DateTime, Utc};
use tightdb_sys::{EntryPoints, Handle, RowSetApi, StringCellFn};

use crate::datatype::DataType;
use crate::error::Result;
use crate::marshal::{bool_from_wire, bool_to_wire, c_string, found};
use crate::mixed::{self, MixedValue};
use crate::native::Site;
use crate::resource::{Bound, ResourceKind};
use crate::table::Table;
use crate::time;
use crate::view::TableView;

pub(crate) mod sealed {
    use tightdb_sys::{EntryPoints, RowSetApi};

    use crate::resource::Bound;

    pub trait Sealed {
        fn bound(&self) -> &Bound;
        fn rows(api: &EntryPoints) -> &RowSetApi;
    }
}

use sealed::Sealed;

// ---------------------------------------------------------------------------
// Call helpers
// ---------------------------------------------------------------------------

pub(crate) fn on_set<S, T>(
    set: &S,
    op: &'static str,
    f: impl FnOnce(&RowSetApi, Handle) -> T,
) -> Result<T>
where
    S: Sealed + ?Sized,
{
    let b = set.bound();
    b.call(Site::new(b.kind(), op), |api, h| f(S::rows(api), h))
}

pub(crate) fn on_column<S, T>(
    set: &S,
    op: &'static str,
    column: u64,
    f: impl FnOnce(&RowSetApi, Handle, usize) -> T,
) -> Result<T>
where
    S: Sealed + ?Sized,
{
    let b = set.bound();
    b.raw()?;
    let c = b.index("column", column)?;
    b.call(Site::new(b.kind(), op).column(column), |api, h| {
        f(S::rows(api), h, c)
    })
}

pub(crate) fn on_cell<S, T>(
    set: &S,
    op: &'static str,
    column: u64,
    row: u64,
    f: impl FnOnce(&RowSetApi, Handle, usize, usize) -> T,
) -> Result<T>
where
    S: Sealed + ?Sized,
{
    let b = set.bound();
    b.raw()?;
    let c = b.index("column", column)?;
    let r = b.index("row", row)?;
    b.call(Site::new(b.kind(), op).cell(column, row), |api, h| {
        f(S::rows(api), h, c, r)
    })
}

pub(crate) fn cell_string<S>(
    set: &S,
    op: &'static str,
    column: u64,
    row: u64,
    getter: impl Fn(&RowSetApi) -> StringCellFn,
) -> Result<String>
where
    S: Sealed + ?Sized,
{
    let b = set.bound();
    b.raw()?;
    let c = b.index("column", column)?;
    let r = b.index("row", row)?;
    b.call_string(Site::new(b.kind(), op).cell(column, row), |api, h, buf, cap| {
        // SAFETY: `buf` is valid for `cap` writable bytes for this call.
        unsafe { getter(S::rows(api))(h, c, r, buf, cap) }
    })
}

fn new_view<'a, S>(set: &'a S, op: &'static str, handle: Handle) -> Result<TableView<'a>>
where
    S: Sealed + ?Sized,
{
    TableView::bind(set.bound().native().clone(), op, handle)
}

// ---------------------------------------------------------------------------
// RowSet
// ---------------------------------------------------------------------------

/// Rows addressed by zero-based column and row index.
///
/// Indices are `u64` on every ABI; on the 32-bit ABI values above
/// `i32::MAX` are rejected before reaching the engine.
pub trait RowSet: Sealed {
    fn kind(&self) -> ResourceKind {
        self.bound().kind()
    }

    /// Number of rows.
    fn size(&self) -> Result<u64> {
        on_set(self, "size", |api, h| unsafe { (api.size)(h) as u64 })
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.size()? == 0)
    }

    // ----- schema -----

    fn column_count(&self) -> Result<u64> {
        on_set(self, "get_column_count", |api, h| unsafe {
            (api.get_column_count)(h) as u64
        })
    }

    fn column_name(&self, column: u64) -> Result<String> {
        let b = self.bound();
        b.raw()?;
        let c = b.index("column", column)?;
        b.call_string(
            Site::new(b.kind(), "get_column_name").column(column),
            |api, h, buf, cap| unsafe { (Self::rows(api).get_column_name)(h, c, buf, cap) },
        )
    }

    fn column_type(&self, column: u64) -> Result<DataType> {
        let code = on_column(self, "get_column_type", column, |api, h, c| unsafe {
            (api.get_column_type)(h, c)
        })?;
        DataType::from_code(code)
    }

    /// Index of the column called `name`, if there is one.
    fn column_index(&self, name: &str) -> Result<Option<u64>> {
        let name = c_string("column name", name)?;
        let raw = on_set(self, "get_column_index", |api, h| unsafe {
            (api.get_column_index)(h, name.as_ptr())
        })?;
        Ok(found(raw))
    }

    // ----- plain cells -----

    fn get_int(&self, column: u64, row: u64) -> Result<i64> {
        on_cell(self, "get_int", column, row, |api, h, c, r| unsafe { (api.get_int)(h, c, r) })
    }

    fn set_int(&self, column: u64, row: u64, value: i64) -> Result<()> {
        on_cell(self, "set_int", column, row, |api, h, c, r| unsafe {
            (api.set_int)(h, c, r, value)
        })
    }

    fn get_bool(&self, column: u64, row: u64) -> Result<bool> {
        let raw = on_cell(self, "get_bool", column, row, |api, h, c, r| unsafe {
            (api.get_bool)(h, c, r)
        })?;
        Ok(bool_from_wire(raw))
    }

    fn set_bool(&self, column: u64, row: u64, value: bool) -> Result<()> {
        on_cell(self, "set_bool", column, row, |api, h, c, r| unsafe {
            (api.set_bool)(h, c, r, bool_to_wire(value))
        })
    }

    fn get_float(&self, column: u64, row: u64) -> Result<f32> {
        on_cell(self, "get_float", column, row, |api, h, c, r| unsafe {
            (api.get_float)(h, c, r)
        })
    }

    fn set_float(&self, column: u64, row: u64, value: f32) -> Result<()> {
        on_cell(self, "set_float", column, row, |api, h, c, r| unsafe {
            (api.set_float)(h, c, r, value)
        })
    }

    fn get_double(&self, column: u64, row: u64) -> Result<f64> {
        on_cell(self, "get_double", column, row, |api, h, c, r| unsafe {
            (api.get_double)(h, c, r)
        })
    }

    fn set_double(&self, column: u64, row: u64, value: f64) -> Result<()> {
        on_cell(self, "set_double", column, row, |api, h, c, r| unsafe {
            (api.set_double)(h, c, r, value)
        })
    }

    fn get_date(&self, column: u64, row: u64) -> Result<DateTime<Utc>> {
        let secs = on_cell(self, "get_date", column, row, |api, h, c, r| unsafe {
            (api.get_date)(h, c, r)
        })?;
        Ok(time::decode(secs))
    }

    /// Pre-epoch values are passed through; the engine decides.
    fn set_date(&self, column: u64, row: u64, value: DateTime<Utc>) -> Result<()> {
        let secs = time::encode(value);
        on_cell(self, "set_date", column, row, |api, h, c, r| unsafe {
            (api.set_date)(h, c, r, secs)
        })
    }

    fn get_string(&self, column: u64, row: u64) -> Result<String> {
        cell_string(self, "get_string", column, row, |api| api.get_string)
    }

    fn set_string(&self, column: u64, row: u64, value: &str) -> Result<()> {
        let value = c_string("string value", value)?;
        on_cell(self, "set_string", column, row, |api, h, c, r| unsafe {
            (api.set_string)(h, c, r, value.as_ptr())
        })
    }

    /// The sub-table in a Table column, or in a mixed cell holding a table.
    fn subtable(&self, column: u64, row: u64) -> Result<Table> {
        let handle = on_cell(self, "get_subtable", column, row, |api, h, c, r| unsafe {
            (api.get_subtable)(h, c, r)
        })?;
        Table::bind(self.bound().native().clone(), "get_subtable", handle)
    }

    // ----- mixed cells -----

    fn mixed_type(&self, column: u64, row: u64) -> Result<DataType> {
        mixed::value_type(self, column, row)
    }

    /// Read the cell's tag and then its value.
    fn get_mixed(&self, column: u64, row: u64) -> Result<MixedValue> {
        mixed::get(self, column, row)
    }

    fn get_mixed_int(&self, column: u64, row: u64) -> Result<i64> {
        mixed::get_int(self, column, row)
    }

    fn get_mixed_bool(&self, column: u64, row: u64) -> Result<bool> {
        mixed::get_bool(self, column, row)
    }

    fn get_mixed_float(&self, column: u64, row: u64) -> Result<f32> {
        mixed::get_float(self, column, row)
    }

    fn get_mixed_double(&self, column: u64, row: u64) -> Result<f64> {
        mixed::get_double(self, column, row)
    }

    fn get_mixed_date(&self, column: u64, row: u64) -> Result<DateTime<Utc>> {
        mixed::get_date(self, column, row)
    }

    fn get_mixed_string(&self, column: u64, row: u64) -> Result<String> {
        mixed::get_string(self, column, row)
    }

    fn set_mixed(&self, column: u64, row: u64, value: &MixedValue) -> Result<()> {
        mixed::set(self, column, row, value)
    }

    fn set_mixed_empty_subtable(&self, column: u64, row: u64) -> Result<()> {
        on_cell(self, "set_mixed_empty_subtable", column, row, |api, h, c, r| unsafe {
            (api.set_mixed_empty_subtable)(h, c, r)
        })
    }

    // ----- search -----

    fn find_first_int(&self, column: u64, value: i64) -> Result<Option<u64>> {
        let raw = on_column(self, "find_first_int", column, |api, h, c| unsafe {
            (api.find_first_int)(h, c, value)
        })?;
        Ok(found(raw))
    }

    fn find_first_string(&self, column: u64, value: &str) -> Result<Option<u64>> {
        let value = c_string("search value", value)?;
        let raw = on_column(self, "find_first_string", column, |api, h, c| unsafe {
            (api.find_first_string)(h, c, value.as_ptr())
        })?;
        Ok(found(raw))
    }

    fn find_first_binary(&self, column: u64, value: &[u8]) -> Result<Option<u64>> {
        let raw = on_column(self, "find_first_binary", column, |api, h, c| unsafe {
            (api.find_first_binary)(h, c, value.as_ptr(), value.len())
        })?;
        Ok(found(raw))
    }

    fn find_first_double(&self, column: u64, value: f64) -> Result<Option<u64>> {
        let raw = on_column(self, "find_first_double", column, |api, h, c| unsafe {
            (api.find_first_double)(h, c, value)
        })?;
        Ok(found(raw))
    }

    fn find_first_float(&self, column: u64, value: f32) -> Result<Option<u64>> {
        let raw = on_column(self, "find_first_float", column, |api, h, c| unsafe {
            (api.find_first_float)(h, c, value)
        })?;
        Ok(found(raw))
    }

    fn find_first_date(&self, column: u64, value: DateTime<Utc>) -> Result<Option<u64>> {
        let secs = time::encode(value);
        let raw = on_column(self, "find_first_date", column, |api, h, c| unsafe {
            (api.find_first_date)(h, c, secs)
        })?;
        Ok(found(raw))
    }

    fn find_first_bool(&self, column: u64, value: bool) -> Result<Option<u64>> {
        let raw = on_column(self, "find_first_bool", column, |api, h, c| unsafe {
            (api.find_first_bool)(h, c, bool_to_wire(value))
        })?;
        Ok(found(raw))
    }

    fn find_all_int(&self, column: u64, value: i64) -> Result<TableView<'_>> {
        let handle = on_column(self, "find_all_int", column, |api, h, c| unsafe {
            (api.find_all_int)(h, c, value)
        })?;
        new_view(self, "find_all_int", handle)
    }

    fn find_all_string(&self, column: u64, value: &str) -> Result<TableView<'_>> {
        let value = c_string("search value", value)?;
        let handle = on_column(self, "find_all_string", column, |api, h, c| unsafe {
            (api.find_all_string)(h, c, value.as_ptr())
        })?;
        new_view(self, "find_all_string", handle)
    }

    // ----- aggregates -----

    fn count_int(&self, column: u64, target: i64) -> Result<i64> {
        on_column(self, "count_int", column, |api, h, c| unsafe {
            (api.count_int)(h, c, target)
        })
    }

    fn count_float(&self, column: u64, target: f32) -> Result<i64> {
        on_column(self, "count_float", column, |api, h, c| unsafe {
            (api.count_float)(h, c, target)
        })
    }

    fn count_double(&self, column: u64, target: f64) -> Result<i64> {
        on_column(self, "count_double", column, |api, h, c| unsafe {
            (api.count_double)(h, c, target)
        })
    }

    fn count_string(&self, column: u64, target: &str) -> Result<i64> {
        let target = c_string("count target", target)?;
        on_column(self, "count_string", column, |api, h, c| unsafe {
            (api.count_string)(h, c, target.as_ptr())
        })
    }

    fn sum_int(&self, column: u64) -> Result<i64> {
        on_column(self, "sum_int", column, |api, h, c| unsafe { (api.sum_int)(h, c) })
    }

    /// Float sums are accumulated in double precision by the engine.
    fn sum_float(&self, column: u64) -> Result<f64> {
        on_column(self, "sum_float", column, |api, h, c| unsafe { (api.sum_float)(h, c) })
    }

    fn sum_double(&self, column: u64) -> Result<f64> {
        on_column(self, "sum_double", column, |api, h, c| unsafe { (api.sum_double)(h, c) })
    }

    fn maximum_int(&self, column: u64) -> Result<i64> {
        on_column(self, "maximum_int", column, |api, h, c| unsafe { (api.maximum_int)(h, c) })
    }

    fn maximum_float(&self, column: u64) -> Result<f32> {
        on_column(self, "maximum_float", column, |api, h, c| unsafe {
            (api.maximum_float)(h, c)
        })
    }

    fn maximum_double(&self, column: u64) -> Result<f64> {
        on_column(self, "maximum_double", column, |api, h, c| unsafe {
            (api.maximum_double)(h, c)
        })
    }

    fn minimum_int(&self, column: u64) -> Result<i64> {
        on_column(self, "minimum_int", column, |api, h, c| unsafe { (api.minimum_int)(h, c) })
    }

    fn minimum_float(&self, column: u64) -> Result<f32> {
        on_column(self, "minimum_float", column, |api, h, c| unsafe {
            (api.minimum_float)(h, c)
        })
    }

    fn minimum_double(&self, column: u64) -> Result<f64> {
        on_column(self, "minimum_double", column, |api, h, c| unsafe {
            (api.minimum_double)(h, c)
        })
    }

    fn average_int(&self, column: u64) -> Result<f64> {
        on_column(self, "average_int", column, |api, h, c| unsafe { (api.average_int)(h, c) })
    }

    fn average_float(&self, column: u64) -> Result<f64> {
        on_column(self, "average_float", column, |api, h, c| unsafe {
            (api.average_float)(h, c)
        })
    }

    fn average_double(&self, column: u64) -> Result<f64> {
        on_column(self, "average_double", column, |api, h, c| unsafe {
            (api.average_double)(h, c)
        })
    }
}

impl Sealed for Table {
    fn bound(&self) -> &Bound {
        &self.bound
    }

    fn rows(api: &EntryPoints) -> &RowSetApi {
        &api.table_rows
    }
}

impl RowSet for Table {}

impl Sealed for TableView<'_> {
    fn bound(&self) -> &Bound {
        &self.bound
    }

    fn rows(api: &EntryPoints) -> &RowSetApi {
        &api.view_rows
    }
}

impl RowSet for TableView<'_> {}
