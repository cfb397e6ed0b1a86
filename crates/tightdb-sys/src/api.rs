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

// Function-pointer tables for the C binding.
// Hand-written from tightdb_c_cs.h; one field per exported entry point.
//
// Every table is `Copy`: it is filled once from a loaded library (or from an
// in-process engine in tests) and read-only afterwards.

use std::os::raw::c_char;

use crate::Handle;

/// Var-length string read from one cell: writes up to `cap` bytes into `buf`
/// and returns the full length.
pub type StringCellFn =
    unsafe extern "C" fn(h: Handle, col: usize, row: usize, buf: *mut c_char, cap: usize) -> usize;

// ===== Engine error slot =====

/// Per-thread error slot. Only bindings built with error reporting export it.
#[derive(Clone, Copy)]
pub struct ErrorApi {
    /// Code of the failure raised by the previous entry point on this thread,
    /// or `ERR_NONE`. Every entry point clears it on entry.
    pub last_error_code: unsafe extern "C" fn() -> usize,
    /// Writes up to `cap` bytes of the message, returns the full length.
    pub last_error_message: unsafe extern "C" fn(buf: *mut c_char, cap: usize) -> usize,
}

// ===== Row-set family (table_* and tableview_*) =====

/// Entry points exported twice, once with a `table_` prefix and once with a
/// `tableview_` prefix. The handle is a `Table*` or a `TableView*`.
#[derive(Clone, Copy)]
pub struct RowSetApi {
    pub size: unsafe extern "C" fn(h: Handle) -> usize,

    // --- Schema introspection ---
    pub get_column_count: unsafe extern "C" fn(h: Handle) -> usize,
    pub get_column_name:
        unsafe extern "C" fn(h: Handle, col: usize, buf: *mut c_char, cap: usize) -> usize,
    pub get_column_type: unsafe extern "C" fn(h: Handle, col: usize) -> usize,
    pub get_column_index: unsafe extern "C" fn(h: Handle, name: *const c_char) -> usize,

    // --- Plain cells ---
    pub get_int: unsafe extern "C" fn(h: Handle, col: usize, row: usize) -> i64,
    pub set_int: unsafe extern "C" fn(h: Handle, col: usize, row: usize, value: i64),
    pub get_bool: unsafe extern "C" fn(h: Handle, col: usize, row: usize) -> usize,
    pub set_bool: unsafe extern "C" fn(h: Handle, col: usize, row: usize, value: usize),
    pub get_float: unsafe extern "C" fn(h: Handle, col: usize, row: usize) -> f32,
    pub set_float: unsafe extern "C" fn(h: Handle, col: usize, row: usize, value: f32),
    pub get_double: unsafe extern "C" fn(h: Handle, col: usize, row: usize) -> f64,
    pub set_double: unsafe extern "C" fn(h: Handle, col: usize, row: usize, value: f64),
    pub get_date: unsafe extern "C" fn(h: Handle, col: usize, row: usize) -> i64,
    pub set_date: unsafe extern "C" fn(h: Handle, col: usize, row: usize, value: i64),
    pub get_string: StringCellFn,
    pub set_string: unsafe extern "C" fn(h: Handle, col: usize, row: usize, value: *const c_char),
    /// Works on sub-table columns and on mixed cells holding a table.
    pub get_subtable: unsafe extern "C" fn(h: Handle, col: usize, row: usize) -> Handle,

    // --- Mixed cells ---
    pub get_mixed_type: unsafe extern "C" fn(h: Handle, col: usize, row: usize) -> usize,
    pub get_mixed_int: unsafe extern "C" fn(h: Handle, col: usize, row: usize) -> i64,
    pub get_mixed_bool: unsafe extern "C" fn(h: Handle, col: usize, row: usize) -> usize,
    pub get_mixed_float: unsafe extern "C" fn(h: Handle, col: usize, row: usize) -> f32,
    pub get_mixed_double: unsafe extern "C" fn(h: Handle, col: usize, row: usize) -> f64,
    pub get_mixed_date: unsafe extern "C" fn(h: Handle, col: usize, row: usize) -> i64,
    /// Absent from the stock `tightdb_c_cs` builds.
    pub get_mixed_string: Option<StringCellFn>,
    pub set_mixed_int: unsafe extern "C" fn(h: Handle, col: usize, row: usize, value: i64),
    pub set_mixed_bool: unsafe extern "C" fn(h: Handle, col: usize, row: usize, value: usize),
    pub set_mixed_float: unsafe extern "C" fn(h: Handle, col: usize, row: usize, value: f32),
    pub set_mixed_double: unsafe extern "C" fn(h: Handle, col: usize, row: usize, value: f64),
    pub set_mixed_date: unsafe extern "C" fn(h: Handle, col: usize, row: usize, value: i64),
    pub set_mixed_string:
        unsafe extern "C" fn(h: Handle, col: usize, row: usize, value: *const c_char),
    pub set_mixed_subtable: unsafe extern "C" fn(h: Handle, col: usize, row: usize, src: Handle),
    pub set_mixed_empty_subtable: unsafe extern "C" fn(h: Handle, col: usize, row: usize),

    // --- Search ---
    pub find_first_int: unsafe extern "C" fn(h: Handle, col: usize, value: i64) -> usize,
    pub find_first_string:
        unsafe extern "C" fn(h: Handle, col: usize, value: *const c_char) -> usize,
    pub find_first_binary:
        unsafe extern "C" fn(h: Handle, col: usize, value: *const u8, len: usize) -> usize,
    pub find_first_double: unsafe extern "C" fn(h: Handle, col: usize, value: f64) -> usize,
    pub find_first_float: unsafe extern "C" fn(h: Handle, col: usize, value: f32) -> usize,
    pub find_first_date: unsafe extern "C" fn(h: Handle, col: usize, value: i64) -> usize,
    pub find_first_bool: unsafe extern "C" fn(h: Handle, col: usize, value: usize) -> usize,
    /// Returns a new `TableView*`.
    pub find_all_int: unsafe extern "C" fn(h: Handle, col: usize, value: i64) -> Handle,
    /// Returns a new `TableView*`.
    pub find_all_string: unsafe extern "C" fn(h: Handle, col: usize, value: *const c_char) -> Handle,

    // --- Aggregates ---
    pub count_int: unsafe extern "C" fn(h: Handle, col: usize, target: i64) -> i64,
    pub count_float: unsafe extern "C" fn(h: Handle, col: usize, target: f32) -> i64,
    pub count_double: unsafe extern "C" fn(h: Handle, col: usize, target: f64) -> i64,
    pub count_string: unsafe extern "C" fn(h: Handle, col: usize, target: *const c_char) -> i64,
    pub sum_int: unsafe extern "C" fn(h: Handle, col: usize) -> i64,
    pub sum_float: unsafe extern "C" fn(h: Handle, col: usize) -> f64,
    pub sum_double: unsafe extern "C" fn(h: Handle, col: usize) -> f64,
    pub maximum_int: unsafe extern "C" fn(h: Handle, col: usize) -> i64,
    pub maximum_float: unsafe extern "C" fn(h: Handle, col: usize) -> f32,
    pub maximum_double: unsafe extern "C" fn(h: Handle, col: usize) -> f64,
    pub minimum_int: unsafe extern "C" fn(h: Handle, col: usize) -> i64,
    pub minimum_float: unsafe extern "C" fn(h: Handle, col: usize) -> f32,
    pub minimum_double: unsafe extern "C" fn(h: Handle, col: usize) -> f64,
    pub average_int: unsafe extern "C" fn(h: Handle, col: usize) -> f64,
    pub average_float: unsafe extern "C" fn(h: Handle, col: usize) -> f64,
    pub average_double: unsafe extern "C" fn(h: Handle, col: usize) -> f64,
}

// ===== Table =====

#[derive(Clone, Copy)]
pub struct TableApi {
    pub new_table: unsafe extern "C" fn() -> Handle,
    /// Reference-counted release of a `Table*`.
    pub unbind: unsafe extern "C" fn(h: Handle),
    pub add_column: unsafe extern "C" fn(h: Handle, ty: usize, name: *const c_char) -> usize,
    pub rename_column: unsafe extern "C" fn(h: Handle, col: usize, name: *const c_char),
    pub remove_column: unsafe extern "C" fn(h: Handle, col: usize),
    pub remove_row: unsafe extern "C" fn(h: Handle, row: usize),
    /// Borrowed `Spec*`: lives as long as the table and is never deallocated.
    pub get_spec: unsafe extern "C" fn(h: Handle) -> Handle,
    pub update_from_spec: unsafe extern "C" fn(h: Handle),
    pub insert_empty_row: unsafe extern "C" fn(h: Handle, row: usize, count: usize),
    /// Returns the index of the first added row.
    pub add_empty_row: unsafe extern "C" fn(h: Handle, count: usize) -> usize,
    pub insert_int: unsafe extern "C" fn(h: Handle, col: usize, row: usize, value: i64),
    pub set_index: unsafe extern "C" fn(h: Handle, col: usize),
    pub distinct: unsafe extern "C" fn(h: Handle, col: usize) -> Handle,
    pub where_: unsafe extern "C" fn(h: Handle) -> Handle,
}

// ===== TableView =====

#[derive(Clone, Copy)]
pub struct ViewApi {
    pub delete: unsafe extern "C" fn(h: Handle),
    /// Removes the row from the view and from its source table.
    pub remove_row: unsafe extern "C" fn(h: Handle, row: usize),
}

// ===== Group =====

#[derive(Clone, Copy)]
pub struct GroupApi {
    pub new_group: unsafe extern "C" fn() -> Handle,
    pub new_group_file: unsafe extern "C" fn(path: *const c_char) -> Handle,
    pub write: unsafe extern "C" fn(h: Handle, path: *const c_char),
    pub delete: unsafe extern "C" fn(h: Handle),
    /// Creates the table when the group does not have one by that name.
    pub get_table: unsafe extern "C" fn(h: Handle, name: *const c_char) -> Handle,
    pub has_table: unsafe extern "C" fn(h: Handle, name: *const c_char) -> usize,
}

// ===== Query =====

#[derive(Clone, Copy)]
pub struct QueryApi {
    pub delete: unsafe extern "C" fn(h: Handle),
    pub find_all: unsafe extern "C" fn(h: Handle, start: usize, end: usize, limit: usize) -> Handle,
    pub find_next: unsafe extern "C" fn(h: Handle, last_match: usize) -> usize,
    pub average: unsafe extern "C" fn(h: Handle, col: usize) -> f64,
    pub get_column_index: unsafe extern "C" fn(h: Handle, name: *const c_char) -> usize,
    pub bool_equal: unsafe extern "C" fn(h: Handle, col: usize, value: usize),
    pub int_between: unsafe extern "C" fn(h: Handle, col: usize, low: i64, high: i64),
}

// ===== Spec =====

#[derive(Clone, Copy)]
pub struct SpecApi {
    pub deallocate: unsafe extern "C" fn(h: Handle),
    pub add_column: unsafe extern "C" fn(h: Handle, ty: usize, name: *const c_char) -> usize,
    /// Returns an owned `Spec*` for the new column.
    pub add_subtable_column: unsafe extern "C" fn(h: Handle, name: *const c_char) -> Handle,
    /// Returns an owned `Spec*` for a sub-table column.
    pub get_spec: unsafe extern "C" fn(h: Handle, col: usize) -> Handle,
    pub get_column_count: unsafe extern "C" fn(h: Handle) -> usize,
    pub get_column_type: unsafe extern "C" fn(h: Handle, col: usize) -> usize,
    pub get_column_name:
        unsafe extern "C" fn(h: Handle, col: usize, buf: *mut c_char, cap: usize) -> usize,
}

// ===== Interop probes =====

/// Constant-returning and echoing functions used only by the startup
/// self-test to verify the binary contract.
#[derive(Clone, Copy)]
pub struct ProbeApi {
    pub sizeof_size_t: unsafe extern "C" fn() -> i32,
    pub sizeof_int32_t: unsafe extern "C" fn() -> usize,
    pub sizeof_table_pointer: unsafe extern "C" fn() -> usize,
    pub sizeof_char_pointer: unsafe extern "C" fn() -> usize,
    pub sizeof_int64_t: unsafe extern "C" fn() -> usize,
    pub sizeof_float: unsafe extern "C" fn() -> usize,
    pub sizeof_double: unsafe extern "C" fn() -> usize,
    pub sizeof_time_t: unsafe extern "C" fn() -> usize,
    pub get_five_parameters:
        unsafe extern "C" fn(p1: usize, p2: usize, p3: usize, p4: usize, p5: usize) -> usize,
    pub float_max: unsafe extern "C" fn() -> f32,
    pub float_min: unsafe extern "C" fn() -> f32,
    pub float_return: unsafe extern "C" fn(value: f32) -> f32,
    pub double_max: unsafe extern "C" fn() -> f64,
    pub double_min: unsafe extern "C" fn() -> f64,
    pub double_return: unsafe extern "C" fn(value: f64) -> f64,
    pub int64_max: unsafe extern "C" fn() -> i64,
    pub int64_min: unsafe extern "C" fn() -> i64,
    pub int64_return: unsafe extern "C" fn(value: i64) -> i64,
    pub size_t_max: unsafe extern "C" fn() -> usize,
    pub size_t_min: unsafe extern "C" fn() -> usize,
    pub size_t_return: unsafe extern "C" fn(value: usize) -> usize,
    pub return_datatype: unsafe extern "C" fn(value: usize) -> usize,
    pub return_bool: unsafe extern "C" fn(value: usize) -> usize,
    pub return_true_bool: unsafe extern "C" fn() -> usize,
    pub return_false_bool: unsafe extern "C" fn() -> usize,
    pub increment_integer: unsafe extern "C" fn(value: i64) -> i64,
}

// ===== The whole catalogue =====

/// One logical function per operation. Built once per process for the
/// selected ABI width; callers never see the two width variants.
#[derive(Clone, Copy)]
pub struct EntryPoints {
    pub version: unsafe extern "C" fn() -> usize,
    /// `None` when the library does not export the error slot.
    pub error: Option<ErrorApi>,
    pub table_rows: RowSetApi,
    pub view_rows: RowSetApi,
    pub table: TableApi,
    pub view: ViewApi,
    pub group: GroupApi,
    pub query: QueryApi,
    pub spec: SpecApi,
    pub probe: ProbeApi,
}
