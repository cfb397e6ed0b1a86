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

//! Native objects behind simulated handles, and helpers to reach them.

use std::cell::{Ref, RefCell, RefMut};
use std::ffi::CStr;
use std::os::raw::c_char;

use tightdb_sys::Handle;

use crate::model::{SharedSpec, SharedTable, TableData};
use crate::registry::{
    check, register, unregister, HandleKind, SimError, SimResult, ERR_ARGUMENT, ERR_INTERNAL,
    ERR_RANGE, ERR_TYPE,
};

/// One reference to a table. Unbinding drops the reference.
pub struct TableRef {
    pub table: SharedTable,
}

pub struct ViewData {
    pub table: SharedTable,
    pub rows: Vec<usize>,
}

#[derive(Default)]
pub struct GroupData {
    pub tables: Vec<(String, SharedTable)>,
}

#[derive(Debug, Clone, Copy)]
pub enum Condition {
    BoolEqual(usize, bool),
    IntBetween(usize, i64, i64),
}

pub struct QueryData {
    pub table: SharedTable,
    pub conditions: Vec<Condition>,
}

// ----- allocation -----

pub fn alloc<T>(value: T, kind: HandleKind) -> Handle {
    register(Box::into_raw(Box::new(value)) as usize, kind)
}

/// # Safety
/// `handle` must have been produced by `alloc::<T>` and still be live.
pub unsafe fn get<'a, T>(handle: Handle) -> &'a T {
    unsafe { &*(handle.as_raw() as *const T) }
}

pub fn free<T>(handle: Handle, kind: HandleKind) -> SimResult<()> {
    unregister(handle, kind)?;
    // SAFETY: the registry held `handle` as `kind`, which only `alloc::<T>` produces.
    drop(unsafe { Box::from_raw(handle.as_raw() as *mut T) });
    Ok(())
}

pub fn table_ref<'a>(handle: Handle) -> SimResult<&'a TableRef> {
    check(handle, &[HandleKind::Table])?;
    Ok(unsafe { get::<TableRef>(handle) })
}

/// Views, groups and queries sit in a `RefCell` behind their handle, so
/// overlapping access from two calls is refused instead of aliased.
fn borrow_mut<'a, T>(handle: Handle, kind: HandleKind) -> SimResult<RefMut<'a, T>> {
    check(handle, &[kind])?;
    // SAFETY: the registry holds `handle` as `kind`, which `alloc_cell::<T>` produced.
    let cell = unsafe { get::<RefCell<T>>(handle) };
    cell.try_borrow_mut()
        .map_err(|_| SimError::new(ERR_INTERNAL, format!("{kind:?} handle is in use")))
}

pub fn alloc_cell<T>(value: T, kind: HandleKind) -> Handle {
    alloc(RefCell::new(value), kind)
}

pub fn free_cell<T>(handle: Handle, kind: HandleKind) -> SimResult<()> {
    free::<RefCell<T>>(handle, kind)
}

pub fn view_mut<'a>(handle: Handle) -> SimResult<RefMut<'a, ViewData>> {
    borrow_mut(handle, HandleKind::TableView)
}

pub fn group_mut<'a>(handle: Handle) -> SimResult<RefMut<'a, GroupData>> {
    borrow_mut(handle, HandleKind::Group)
}

pub fn query_mut<'a>(handle: Handle) -> SimResult<RefMut<'a, QueryData>> {
    borrow_mut(handle, HandleKind::Query)
}

/// Both spec kinds point at a `SharedSpec`: owned ones at a box, table
/// ones at the table's own field.
pub fn spec(handle: Handle) -> SimResult<SharedSpec> {
    check(handle, &[HandleKind::Spec, HandleKind::TableSpec])?;
    Ok(unsafe { get::<SharedSpec>(handle) }.clone())
}

pub fn new_table_handle(table: SharedTable) -> Handle {
    alloc(TableRef { table }, HandleKind::Table)
}

pub fn new_view_handle(table: SharedTable, rows: Vec<usize>) -> Handle {
    alloc_cell(ViewData { table, rows }, HandleKind::TableView)
}

pub fn new_spec_handle(spec: SharedSpec) -> Handle {
    alloc(spec, HandleKind::Spec)
}

pub fn table_spec_handle(table: &TableData) -> Handle {
    register(&table.spec as *const SharedSpec as usize, HandleKind::TableSpec)
}

// ----- row sets -----

/// The receiver of a `table_*` or `tableview_*` entry point.
pub enum Target<'a> {
    Table(&'a TableRef),
    View(Ref<'a, ViewData>),
}

pub fn resolve<'a, const VIEW: bool>(handle: Handle) -> SimResult<Target<'a>> {
    if VIEW {
        check(handle, &[HandleKind::TableView])?;
        let cell = unsafe { get::<RefCell<ViewData>>(handle) };
        let view = cell
            .try_borrow()
            .map_err(|_| SimError::new(ERR_INTERNAL, "view is being modified"))?;
        Ok(Target::View(view))
    } else {
        check(handle, &[HandleKind::Table])?;
        Ok(Target::Table(unsafe { get::<TableRef>(handle) }))
    }
}

impl Target<'_> {
    pub fn shared(&self) -> &SharedTable {
        match self {
            Target::Table(t) => &t.table,
            Target::View(v) => &v.table,
        }
    }

    /// Table rows in receiver order.
    pub fn rows(&self, table: &TableData) -> Vec<usize> {
        match self {
            Target::Table(_) => (0..table.rows.len()).collect(),
            Target::View(v) => v
                .rows
                .iter()
                .copied()
                .filter(|r| *r < table.rows.len())
                .collect(),
        }
    }

    pub fn len(&self, table: &TableData) -> usize {
        match self {
            Target::Table(_) => table.rows.len(),
            Target::View(v) => v.rows.len(),
        }
    }

    /// Map a receiver row to a table row.
    pub fn row(&self, table: &TableData, row: usize) -> SimResult<usize> {
        let mapped = match self {
            Target::Table(_) => Some(row),
            Target::View(v) => v.rows.get(row).copied(),
        };
        match mapped {
            Some(r) if r < table.rows.len() => Ok(r),
            _ => Err(out_of_range("row", row, self.len(table))),
        }
    }
}

// ----- borrowing -----

pub fn read(table: &SharedTable) -> SimResult<Ref<'_, TableData>> {
    table
        .try_borrow()
        .map_err(|_| SimError::new(ERR_INTERNAL, "table is being modified"))
}

pub fn write(table: &SharedTable) -> SimResult<RefMut<'_, TableData>> {
    table
        .try_borrow_mut()
        .map_err(|_| SimError::new(ERR_INTERNAL, "table is in use"))
}

// ----- errors and strings -----

pub fn out_of_range(what: &str, index: usize, len: usize) -> SimError {
    SimError::new(ERR_RANGE, format!("{what} index {index} out of range (size {len})"))
}

pub fn type_mismatch(expected: &str, actual: &str) -> SimError {
    SimError::new(ERR_TYPE, format!("expected {expected}, found {actual}"))
}

/// Column type check shared by every typed accessor.
pub fn expect_column(table: &TableData, column: usize, ty: usize) -> SimResult<()> {
    let count = table.spec.borrow().columns.len();
    let actual = table
        .column_type(column)
        .ok_or_else(|| out_of_range("column", column, count))?;
    if actual != ty {
        return Err(type_mismatch(
            &format!("{} column", crate::model::type_name(ty)),
            &format!("{} column", crate::model::type_name(actual)),
        ));
    }
    Ok(())
}

/// # Safety
/// `ptr` must be null or point at a NUL-terminated string.
pub unsafe fn read_str(ptr: *const c_char) -> SimResult<String> {
    if ptr.is_null() {
        return Err(SimError::new(ERR_ARGUMENT, "null string argument"));
    }
    let text = unsafe { CStr::from_ptr(ptr) };
    text.to_str()
        .map(str::to_string)
        .map_err(|_| SimError::new(ERR_ARGUMENT, "string argument is not UTF-8"))
}

/// Copy what fits of `value` into `buf`, NUL-terminate when there is room,
/// and return the full length.
///
/// # Safety
/// `buf` must be null or valid for `cap` bytes.
pub unsafe fn write_str(buf: *mut c_char, cap: usize, value: &[u8]) -> usize {
    if !buf.is_null() && cap > 0 {
        let n = value.len().min(cap);
        unsafe {
            std::ptr::copy_nonoverlapping(value.as_ptr(), buf.cast::<u8>(), n);
            if n < cap {
                *buf.add(n) = 0;
            }
        }
    }
    value.len()
}
