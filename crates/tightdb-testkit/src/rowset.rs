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

//! The `table_*` / `tableview_*` family.
//!
//! Each entry point is written once, generic over `VIEW`; the two exported
//! families are the `false` and `true` instantiations.

use std::cell::RefCell;
use std::os::raw::c_char;
use std::rc::Rc;

use tightdb_sys::{self as sys, Handle, RowSetApi, NOT_FOUND};

use crate::handles::{
    new_table_handle, new_view_handle, out_of_range, read, read_str, resolve, table_ref,
    type_mismatch, write, write_str,
};
use crate::model::{type_name, TableData, Value};
use crate::registry::{enter, SimError, SimResult, ERR_TYPE};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn with_cell<const VIEW: bool, T>(
    h: Handle,
    column: usize,
    row: usize,
    f: impl FnOnce(usize, &mut Value) -> SimResult<T>,
) -> SimResult<T> {
    let target = resolve::<VIEW>(h)?;
    let mut table = write(target.shared())?;
    let r = target.row(&table, row)?;
    let count = table.spec.borrow().columns.len();
    let ty = table
        .column_type(column)
        .ok_or_else(|| out_of_range("column", column, count))?;
    let cell = table.rows[r]
        .get_mut(column)
        .ok_or_else(|| out_of_range("column", column, count))?;
    f(ty, cell)
}

fn column_check(actual: usize, expected: usize) -> SimResult<()> {
    if actual != expected {
        return Err(type_mismatch(
            &format!("{} column", type_name(expected)),
            &format!("{} column", type_name(actual)),
        ));
    }
    Ok(())
}

fn get_plain<const VIEW: bool, T: Default>(
    name: &'static str,
    (h, c, r): (Handle, usize, usize),
    ty: usize,
    extract: impl FnOnce(&Value) -> Option<T>,
) -> T {
    enter(name, T::default(), || {
        with_cell::<VIEW, _>(h, c, r, |col_ty, v| {
            column_check(col_ty, ty)?;
            extract(v).ok_or_else(|| type_mismatch(type_name(ty), v.type_name()))
        })
    })
}

fn set_plain<const VIEW: bool>(name: &'static str, (h, c, r): (Handle, usize, usize), ty: usize, value: Value) {
    enter(name, (), || {
        with_cell::<VIEW, _>(h, c, r, |col_ty, v| {
            column_check(col_ty, ty)?;
            *v = value;
            Ok(())
        })
    })
}

fn get_mixed<const VIEW: bool, T: Default>(
    name: &'static str,
    (h, c, r): (Handle, usize, usize),
    ty: usize,
    extract: impl FnOnce(&Value) -> Option<T>,
) -> T {
    enter(name, T::default(), || {
        with_cell::<VIEW, _>(h, c, r, |col_ty, v| {
            column_check(col_ty, sys::TYPE_MIXED)?;
            extract(v).ok_or_else(|| {
                SimError::new(
                    ERR_TYPE,
                    format!("mixed cell holds {}, not {}", v.type_name(), type_name(ty)),
                )
            })
        })
    })
}

fn set_mixed<const VIEW: bool>(name: &'static str, (h, c, r): (Handle, usize, usize), value: Value) {
    enter(name, (), || {
        with_cell::<VIEW, _>(h, c, r, |col_ty, v| {
            column_check(col_ty, sys::TYPE_MIXED)?;
            *v = value;
            Ok(())
        })
    })
}

/// `(table row, value)` for every receiver row, after a column type check.
fn column<const VIEW: bool>(
    h: Handle,
    column: usize,
    ty: usize,
) -> SimResult<(Rc<RefCell<TableData>>, Vec<(usize, Value)>)> {
    let target = resolve::<VIEW>(h)?;
    let shared = target.shared().clone();
    let table = read(&shared)?;
    let count = table.spec.borrow().columns.len();
    let actual = table
        .column_type(column)
        .ok_or_else(|| out_of_range("column", column, count))?;
    column_check(actual, ty)?;
    let values = target
        .rows(&table)
        .into_iter()
        .filter_map(|r| table.rows[r].get(column).map(|v| (r, v.clone())))
        .collect();
    drop(table);
    Ok((shared, values))
}

fn find_first<const VIEW: bool>(
    name: &'static str,
    h: Handle,
    c: usize,
    ty: usize,
    pred: impl Fn(&Value) -> bool,
) -> usize {
    enter(name, NOT_FOUND, || {
        let (_, values) = column::<VIEW>(h, c, ty)?;
        Ok(values.iter().position(|(_, v)| pred(v)).unwrap_or(NOT_FOUND))
    })
}

fn find_all<const VIEW: bool>(
    name: &'static str,
    h: Handle,
    c: usize,
    ty: usize,
    pred: impl Fn(&Value) -> bool,
) -> Handle {
    enter(name, Handle::NULL, || {
        let (shared, values) = column::<VIEW>(h, c, ty)?;
        let rows = values
            .into_iter()
            .filter(|(_, v)| pred(v))
            .map(|(r, _)| r)
            .collect();
        Ok(new_view_handle(shared, rows))
    })
}

fn count<const VIEW: bool>(name: &'static str, h: Handle, c: usize, ty: usize, pred: impl Fn(&Value) -> bool) -> i64 {
    enter(name, 0, || {
        let (_, values) = column::<VIEW>(h, c, ty)?;
        Ok(values.iter().filter(|(_, v)| pred(v)).count() as i64)
    })
}

fn ints<const VIEW: bool>(h: Handle, c: usize) -> SimResult<Vec<i64>> {
    let (_, values) = column::<VIEW>(h, c, sys::TYPE_INT)?;
    Ok(values
        .into_iter()
        .filter_map(|(_, v)| match v {
            Value::Int(i) => Some(i),
            _ => None,
        })
        .collect())
}

fn floats<const VIEW: bool>(h: Handle, c: usize) -> SimResult<Vec<f32>> {
    let (_, values) = column::<VIEW>(h, c, sys::TYPE_FLOAT)?;
    Ok(values
        .into_iter()
        .filter_map(|(_, v)| match v {
            Value::Float(f) => Some(f),
            _ => None,
        })
        .collect())
}

fn doubles<const VIEW: bool>(h: Handle, c: usize) -> SimResult<Vec<f64>> {
    let (_, values) = column::<VIEW>(h, c, sys::TYPE_DOUBLE)?;
    Ok(values
        .into_iter()
        .filter_map(|(_, v)| match v {
            Value::Double(d) => Some(d),
            _ => None,
        })
        .collect())
}

fn mean(sum: f64, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

extern "C" fn size<const VIEW: bool>(h: Handle) -> usize {
    enter("size", 0, || {
        let target = resolve::<VIEW>(h)?;
        let table = read(target.shared())?;
        Ok(target.len(&table))
    })
}

extern "C" fn get_column_count<const VIEW: bool>(h: Handle) -> usize {
    enter("get_column_count", 0, || {
        let target = resolve::<VIEW>(h)?;
        let table = read(target.shared())?;
        let n = table.spec.borrow().columns.len();
        Ok(n)
    })
}

unsafe extern "C" fn get_column_name<const VIEW: bool>(
    h: Handle,
    c: usize,
    buf: *mut c_char,
    cap: usize,
) -> usize {
    let name = enter("get_column_name", String::new(), || {
        let target = resolve::<VIEW>(h)?;
        let table = read(target.shared())?;
        let spec = table.spec.borrow();
        spec.columns
            .get(c)
            .map(|col| col.name.clone())
            .ok_or_else(|| out_of_range("column", c, spec.columns.len()))
    });
    unsafe { write_str(buf, cap, name.as_bytes()) }
}

extern "C" fn get_column_type<const VIEW: bool>(h: Handle, c: usize) -> usize {
    enter("get_column_type", 0, || {
        let target = resolve::<VIEW>(h)?;
        let table = read(target.shared())?;
        let count = table.spec.borrow().columns.len();
        table
            .column_type(c)
            .ok_or_else(|| out_of_range("column", c, count))
    })
}

unsafe extern "C" fn get_column_index<const VIEW: bool>(h: Handle, name: *const c_char) -> usize {
    enter("get_column_index", NOT_FOUND, || {
        let name = unsafe { read_str(name)? };
        let target = resolve::<VIEW>(h)?;
        let table = read(target.shared())?;
        let index = table.spec.borrow().index_of(&name);
        Ok(index.unwrap_or(NOT_FOUND))
    })
}

// ---------------------------------------------------------------------------
// Plain cells
// ---------------------------------------------------------------------------

extern "C" fn get_int<const VIEW: bool>(h: Handle, c: usize, r: usize) -> i64 {
    get_plain::<VIEW, _>("get_int", (h, c, r), sys::TYPE_INT, |v| match v {
        Value::Int(i) => Some(*i),
        _ => None,
    })
}

extern "C" fn set_int<const VIEW: bool>(h: Handle, c: usize, r: usize, value: i64) {
    set_plain::<VIEW>("set_int", (h, c, r), sys::TYPE_INT, Value::Int(value))
}

extern "C" fn get_bool<const VIEW: bool>(h: Handle, c: usize, r: usize) -> usize {
    get_plain::<VIEW, _>("get_bool", (h, c, r), sys::TYPE_BOOL, |v| match v {
        Value::Bool(b) => Some(usize::from(*b)),
        _ => None,
    })
}

extern "C" fn set_bool<const VIEW: bool>(h: Handle, c: usize, r: usize, value: usize) {
    set_plain::<VIEW>("set_bool", (h, c, r), sys::TYPE_BOOL, Value::Bool(value == 1))
}

extern "C" fn get_float<const VIEW: bool>(h: Handle, c: usize, r: usize) -> f32 {
    get_plain::<VIEW, _>("get_float", (h, c, r), sys::TYPE_FLOAT, |v| match v {
        Value::Float(f) => Some(*f),
        _ => None,
    })
}

extern "C" fn set_float<const VIEW: bool>(h: Handle, c: usize, r: usize, value: f32) {
    set_plain::<VIEW>("set_float", (h, c, r), sys::TYPE_FLOAT, Value::Float(value))
}

extern "C" fn get_double<const VIEW: bool>(h: Handle, c: usize, r: usize) -> f64 {
    get_plain::<VIEW, _>("get_double", (h, c, r), sys::TYPE_DOUBLE, |v| match v {
        Value::Double(d) => Some(*d),
        _ => None,
    })
}

extern "C" fn set_double<const VIEW: bool>(h: Handle, c: usize, r: usize, value: f64) {
    set_plain::<VIEW>("set_double", (h, c, r), sys::TYPE_DOUBLE, Value::Double(value))
}

extern "C" fn get_date<const VIEW: bool>(h: Handle, c: usize, r: usize) -> i64 {
    get_plain::<VIEW, _>("get_date", (h, c, r), sys::TYPE_DATE, |v| match v {
        Value::Date(d) => Some(*d),
        _ => None,
    })
}

extern "C" fn set_date<const VIEW: bool>(h: Handle, c: usize, r: usize, value: i64) {
    set_plain::<VIEW>("set_date", (h, c, r), sys::TYPE_DATE, Value::Date(value))
}

unsafe extern "C" fn get_string<const VIEW: bool>(
    h: Handle,
    c: usize,
    r: usize,
    buf: *mut c_char,
    cap: usize,
) -> usize {
    let value = get_plain::<VIEW, _>("get_string", (h, c, r), sys::TYPE_STRING, |v| match v {
        Value::String(s) => Some(s.clone()),
        _ => None,
    });
    unsafe { write_str(buf, cap, value.as_bytes()) }
}

unsafe extern "C" fn set_string<const VIEW: bool>(h: Handle, c: usize, r: usize, value: *const c_char) {
    enter("set_string", (), || {
        let value = unsafe { read_str(value)? };
        with_cell::<VIEW, _>(h, c, r, |col_ty, v| {
            column_check(col_ty, sys::TYPE_STRING)?;
            *v = Value::String(value);
            Ok(())
        })
    })
}

extern "C" fn get_subtable<const VIEW: bool>(h: Handle, c: usize, r: usize) -> Handle {
    enter("get_subtable", Handle::NULL, || {
        with_cell::<VIEW, _>(h, c, r, |col_ty, v| {
            if col_ty != sys::TYPE_TABLE && col_ty != sys::TYPE_MIXED {
                return Err(type_mismatch("Table or Mixed column", type_name(col_ty)));
            }
            match v {
                Value::Table(t) => Ok(new_table_handle(t.clone())),
                other => Err(type_mismatch("sub-table", other.type_name())),
            }
        })
    })
}

// ---------------------------------------------------------------------------
// Mixed cells
// ---------------------------------------------------------------------------

extern "C" fn get_mixed_type<const VIEW: bool>(h: Handle, c: usize, r: usize) -> usize {
    enter("get_mixed_type", 0, || {
        with_cell::<VIEW, _>(h, c, r, |col_ty, v| {
            column_check(col_ty, sys::TYPE_MIXED)?;
            Ok(v.type_code())
        })
    })
}

extern "C" fn get_mixed_int<const VIEW: bool>(h: Handle, c: usize, r: usize) -> i64 {
    get_mixed::<VIEW, _>("get_mixed_int", (h, c, r), sys::TYPE_INT, |v| match v {
        Value::Int(i) => Some(*i),
        _ => None,
    })
}

extern "C" fn get_mixed_bool<const VIEW: bool>(h: Handle, c: usize, r: usize) -> usize {
    get_mixed::<VIEW, _>("get_mixed_bool", (h, c, r), sys::TYPE_BOOL, |v| match v {
        Value::Bool(b) => Some(usize::from(*b)),
        _ => None,
    })
}

extern "C" fn get_mixed_float<const VIEW: bool>(h: Handle, c: usize, r: usize) -> f32 {
    get_mixed::<VIEW, _>("get_mixed_float", (h, c, r), sys::TYPE_FLOAT, |v| match v {
        Value::Float(f) => Some(*f),
        _ => None,
    })
}

extern "C" fn get_mixed_double<const VIEW: bool>(h: Handle, c: usize, r: usize) -> f64 {
    get_mixed::<VIEW, _>("get_mixed_double", (h, c, r), sys::TYPE_DOUBLE, |v| match v {
        Value::Double(d) => Some(*d),
        _ => None,
    })
}

extern "C" fn get_mixed_date<const VIEW: bool>(h: Handle, c: usize, r: usize) -> i64 {
    get_mixed::<VIEW, _>("get_mixed_date", (h, c, r), sys::TYPE_DATE, |v| match v {
        Value::Date(d) => Some(*d),
        _ => None,
    })
}

unsafe extern "C" fn get_mixed_string<const VIEW: bool>(
    h: Handle,
    c: usize,
    r: usize,
    buf: *mut c_char,
    cap: usize,
) -> usize {
    let value = get_mixed::<VIEW, _>("get_mixed_string", (h, c, r), sys::TYPE_STRING, |v| match v {
        Value::String(s) => Some(s.clone()),
        _ => None,
    });
    unsafe { write_str(buf, cap, value.as_bytes()) }
}

extern "C" fn set_mixed_int<const VIEW: bool>(h: Handle, c: usize, r: usize, value: i64) {
    set_mixed::<VIEW>("set_mixed_int", (h, c, r), Value::Int(value))
}

extern "C" fn set_mixed_bool<const VIEW: bool>(h: Handle, c: usize, r: usize, value: usize) {
    set_mixed::<VIEW>("set_mixed_bool", (h, c, r), Value::Bool(value == 1))
}

extern "C" fn set_mixed_float<const VIEW: bool>(h: Handle, c: usize, r: usize, value: f32) {
    set_mixed::<VIEW>("set_mixed_float", (h, c, r), Value::Float(value))
}

extern "C" fn set_mixed_double<const VIEW: bool>(h: Handle, c: usize, r: usize, value: f64) {
    set_mixed::<VIEW>("set_mixed_double", (h, c, r), Value::Double(value))
}

extern "C" fn set_mixed_date<const VIEW: bool>(h: Handle, c: usize, r: usize, value: i64) {
    set_mixed::<VIEW>("set_mixed_date", (h, c, r), Value::Date(value))
}

unsafe extern "C" fn set_mixed_string<const VIEW: bool>(
    h: Handle,
    c: usize,
    r: usize,
    value: *const c_char,
) {
    enter("set_mixed_string", (), || {
        let value = unsafe { read_str(value)? };
        with_cell::<VIEW, _>(h, c, r, |col_ty, v| {
            column_check(col_ty, sys::TYPE_MIXED)?;
            *v = Value::String(value);
            Ok(())
        })
    })
}

extern "C" fn set_mixed_subtable<const VIEW: bool>(h: Handle, c: usize, r: usize, src: Handle) {
    enter("set_mixed_subtable", (), || {
        let copy = {
            let source = table_ref(src)?;
            let data = read(&source.table)?;
            data.deep_clone()
        };
        with_cell::<VIEW, _>(h, c, r, |col_ty, v| {
            column_check(col_ty, sys::TYPE_MIXED)?;
            *v = Value::Table(Rc::new(RefCell::new(copy)));
            Ok(())
        })
    })
}

extern "C" fn set_mixed_empty_subtable<const VIEW: bool>(h: Handle, c: usize, r: usize) {
    set_mixed::<VIEW>(
        "set_mixed_empty_subtable",
        (h, c, r),
        Value::Table(Rc::new(RefCell::new(TableData::default()))),
    )
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

extern "C" fn find_first_int<const VIEW: bool>(h: Handle, c: usize, value: i64) -> usize {
    find_first::<VIEW>("find_first_int", h, c, sys::TYPE_INT, |v| {
        matches!(v, Value::Int(i) if *i == value)
    })
}

unsafe extern "C" fn find_first_string<const VIEW: bool>(h: Handle, c: usize, value: *const c_char) -> usize {
    let Ok(value) = (unsafe { read_str(value) }) else {
        return enter("find_first_string", NOT_FOUND, || {
            Err(SimError::new(crate::registry::ERR_ARGUMENT, "invalid search string"))
        });
    };
    find_first::<VIEW>("find_first_string", h, c, sys::TYPE_STRING, |v| {
        matches!(v, Value::String(s) if *s == value)
    })
}

unsafe extern "C" fn find_first_binary<const VIEW: bool>(
    h: Handle,
    c: usize,
    value: *const u8,
    len: usize,
) -> usize {
    let needle: Vec<u8> = if value.is_null() || len == 0 {
        Vec::new()
    } else {
        unsafe { std::slice::from_raw_parts(value, len) }.to_vec()
    };
    find_first::<VIEW>("find_first_binary", h, c, sys::TYPE_BINARY, |v| {
        matches!(v, Value::Binary(b) if *b == needle)
    })
}

extern "C" fn find_first_double<const VIEW: bool>(h: Handle, c: usize, value: f64) -> usize {
    find_first::<VIEW>("find_first_double", h, c, sys::TYPE_DOUBLE, |v| {
        matches!(v, Value::Double(d) if *d == value)
    })
}

extern "C" fn find_first_float<const VIEW: bool>(h: Handle, c: usize, value: f32) -> usize {
    find_first::<VIEW>("find_first_float", h, c, sys::TYPE_FLOAT, |v| {
        matches!(v, Value::Float(f) if *f == value)
    })
}

extern "C" fn find_first_date<const VIEW: bool>(h: Handle, c: usize, value: i64) -> usize {
    find_first::<VIEW>("find_first_date", h, c, sys::TYPE_DATE, |v| {
        matches!(v, Value::Date(d) if *d == value)
    })
}

extern "C" fn find_first_bool<const VIEW: bool>(h: Handle, c: usize, value: usize) -> usize {
    let value = value == 1;
    find_first::<VIEW>("find_first_bool", h, c, sys::TYPE_BOOL, |v| {
        matches!(v, Value::Bool(b) if *b == value)
    })
}

extern "C" fn find_all_int<const VIEW: bool>(h: Handle, c: usize, value: i64) -> Handle {
    find_all::<VIEW>("find_all_int", h, c, sys::TYPE_INT, |v| {
        matches!(v, Value::Int(i) if *i == value)
    })
}

unsafe extern "C" fn find_all_string<const VIEW: bool>(h: Handle, c: usize, value: *const c_char) -> Handle {
    let Ok(value) = (unsafe { read_str(value) }) else {
        return enter("find_all_string", Handle::NULL, || {
            Err(SimError::new(crate::registry::ERR_ARGUMENT, "invalid search string"))
        });
    };
    find_all::<VIEW>("find_all_string", h, c, sys::TYPE_STRING, |v| {
        matches!(v, Value::String(s) if *s == value)
    })
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

extern "C" fn count_int<const VIEW: bool>(h: Handle, c: usize, target: i64) -> i64 {
    count::<VIEW>("count_int", h, c, sys::TYPE_INT, |v| matches!(v, Value::Int(i) if *i == target))
}

extern "C" fn count_float<const VIEW: bool>(h: Handle, c: usize, target: f32) -> i64 {
    count::<VIEW>("count_float", h, c, sys::TYPE_FLOAT, |v| {
        matches!(v, Value::Float(f) if *f == target)
    })
}

extern "C" fn count_double<const VIEW: bool>(h: Handle, c: usize, target: f64) -> i64 {
    count::<VIEW>("count_double", h, c, sys::TYPE_DOUBLE, |v| {
        matches!(v, Value::Double(d) if *d == target)
    })
}

unsafe extern "C" fn count_string<const VIEW: bool>(h: Handle, c: usize, target: *const c_char) -> i64 {
    let Ok(target) = (unsafe { read_str(target) }) else {
        return enter("count_string", 0, || {
            Err(SimError::new(crate::registry::ERR_ARGUMENT, "invalid count target"))
        });
    };
    count::<VIEW>("count_string", h, c, sys::TYPE_STRING, |v| {
        matches!(v, Value::String(s) if *s == target)
    })
}

extern "C" fn sum_int<const VIEW: bool>(h: Handle, c: usize) -> i64 {
    enter("sum_int", 0, || {
        Ok(ints::<VIEW>(h, c)?.into_iter().fold(0i64, i64::wrapping_add))
    })
}

extern "C" fn sum_float<const VIEW: bool>(h: Handle, c: usize) -> f64 {
    enter("sum_float", 0.0, || {
        Ok(floats::<VIEW>(h, c)?.into_iter().map(f64::from).sum())
    })
}

extern "C" fn sum_double<const VIEW: bool>(h: Handle, c: usize) -> f64 {
    enter("sum_double", 0.0, || Ok(doubles::<VIEW>(h, c)?.into_iter().sum()))
}

extern "C" fn maximum_int<const VIEW: bool>(h: Handle, c: usize) -> i64 {
    enter("maximum_int", 0, || Ok(ints::<VIEW>(h, c)?.into_iter().max().unwrap_or(0)))
}

extern "C" fn maximum_float<const VIEW: bool>(h: Handle, c: usize) -> f32 {
    enter("maximum_float", 0.0, || {
        Ok(floats::<VIEW>(h, c)?.into_iter().reduce(f32::max).unwrap_or(0.0))
    })
}

extern "C" fn maximum_double<const VIEW: bool>(h: Handle, c: usize) -> f64 {
    enter("maximum_double", 0.0, || {
        Ok(doubles::<VIEW>(h, c)?.into_iter().reduce(f64::max).unwrap_or(0.0))
    })
}

extern "C" fn minimum_int<const VIEW: bool>(h: Handle, c: usize) -> i64 {
    enter("minimum_int", 0, || Ok(ints::<VIEW>(h, c)?.into_iter().min().unwrap_or(0)))
}

extern "C" fn minimum_float<const VIEW: bool>(h: Handle, c: usize) -> f32 {
    enter("minimum_float", 0.0, || {
        Ok(floats::<VIEW>(h, c)?.into_iter().reduce(f32::min).unwrap_or(0.0))
    })
}

extern "C" fn minimum_double<const VIEW: bool>(h: Handle, c: usize) -> f64 {
    enter("minimum_double", 0.0, || {
        Ok(doubles::<VIEW>(h, c)?.into_iter().reduce(f64::min).unwrap_or(0.0))
    })
}

extern "C" fn average_int<const VIEW: bool>(h: Handle, c: usize) -> f64 {
    enter("average_int", 0.0, || {
        let values = ints::<VIEW>(h, c)?;
        Ok(mean(values.iter().map(|v| *v as f64).sum(), values.len()))
    })
}

extern "C" fn average_float<const VIEW: bool>(h: Handle, c: usize) -> f64 {
    enter("average_float", 0.0, || {
        let values = floats::<VIEW>(h, c)?;
        Ok(mean(values.iter().map(|v| f64::from(*v)).sum(), values.len()))
    })
}

extern "C" fn average_double<const VIEW: bool>(h: Handle, c: usize) -> f64 {
    enter("average_double", 0.0, || {
        let values = doubles::<VIEW>(h, c)?;
        Ok(mean(values.iter().sum(), values.len()))
    })
}

/// One instantiation of the family: `false` for tables, `true` for views.
pub fn api<const VIEW: bool>() -> RowSetApi {
    RowSetApi {
        size: size::<VIEW>,
        get_column_count: get_column_count::<VIEW>,
        get_column_name: get_column_name::<VIEW>,
        get_column_type: get_column_type::<VIEW>,
        get_column_index: get_column_index::<VIEW>,
        get_int: get_int::<VIEW>,
        set_int: set_int::<VIEW>,
        get_bool: get_bool::<VIEW>,
        set_bool: set_bool::<VIEW>,
        get_float: get_float::<VIEW>,
        set_float: set_float::<VIEW>,
        get_double: get_double::<VIEW>,
        set_double: set_double::<VIEW>,
        get_date: get_date::<VIEW>,
        set_date: set_date::<VIEW>,
        get_string: get_string::<VIEW>,
        set_string: set_string::<VIEW>,
        get_subtable: get_subtable::<VIEW>,
        get_mixed_type: get_mixed_type::<VIEW>,
        get_mixed_int: get_mixed_int::<VIEW>,
        get_mixed_bool: get_mixed_bool::<VIEW>,
        get_mixed_float: get_mixed_float::<VIEW>,
        get_mixed_double: get_mixed_double::<VIEW>,
        get_mixed_date: get_mixed_date::<VIEW>,
        get_mixed_string: Some(get_mixed_string::<VIEW>),
        set_mixed_int: set_mixed_int::<VIEW>,
        set_mixed_bool: set_mixed_bool::<VIEW>,
        set_mixed_float: set_mixed_float::<VIEW>,
        set_mixed_double: set_mixed_double::<VIEW>,
        set_mixed_date: set_mixed_date::<VIEW>,
        set_mixed_string: set_mixed_string::<VIEW>,
        set_mixed_subtable: set_mixed_subtable::<VIEW>,
        set_mixed_empty_subtable: set_mixed_empty_subtable::<VIEW>,
        find_first_int: find_first_int::<VIEW>,
        find_first_string: find_first_string::<VIEW>,
        find_first_binary: find_first_binary::<VIEW>,
        find_first_double: find_first_double::<VIEW>,
        find_first_float: find_first_float::<VIEW>,
        find_first_date: find_first_date::<VIEW>,
        find_first_bool: find_first_bool::<VIEW>,
        find_all_int: find_all_int::<VIEW>,
        find_all_string: find_all_string::<VIEW>,
        count_int: count_int::<VIEW>,
        count_float: count_float::<VIEW>,
        count_double: count_double::<VIEW>,
        count_string: count_string::<VIEW>,
        sum_int: sum_int::<VIEW>,
        sum_float: sum_float::<VIEW>,
        sum_double: sum_double::<VIEW>,
        maximum_int: maximum_int::<VIEW>,
        maximum_float: maximum_float::<VIEW>,
        maximum_double: maximum_double::<VIEW>,
        minimum_int: minimum_int::<VIEW>,
        minimum_float: minimum_float::<VIEW>,
        minimum_double: minimum_double::<VIEW>,
        average_int: average_int::<VIEW>,
        average_float: average_float::<VIEW>,
        average_double: average_double::<VIEW>,
    }
}
