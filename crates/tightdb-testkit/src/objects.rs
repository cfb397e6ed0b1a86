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

//! Entry points for tables, views, groups, queries and specs.

use std::cell::RefCell;
use std::fs;
use std::os::raw::c_char;
use std::rc::Rc;

use tightdb_sys::{self as sys, GroupApi, Handle, QueryApi, SpecApi, TableApi, ViewApi, NOT_FOUND};

use crate::handles::{
    alloc_cell, expect_column, free, free_cell, group_mut, new_spec_handle, new_table_handle,
    new_view_handle, out_of_range, query_mut, read, read_str, spec, table_ref, table_spec_handle,
    view_mut, write, write_str, Condition, GroupData, QueryData, TableRef, ViewData,
};
use crate::model::{is_known_type, GroupFile, TableData, Value, GROUP_FORMAT};
use crate::registry::{
    enter, HandleKind, SimError, SimResult, ERR_ARGUMENT, ERR_IO, ERR_NOT_INDEXED, ERR_TYPE,
};

fn known_type(ty: usize) -> SimResult<()> {
    if !is_known_type(ty) {
        return Err(SimError::new(ERR_TYPE, format!("unknown column type {ty}")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

extern "C" fn new_table() -> Handle {
    enter("new_table", Handle::NULL, || {
        Ok(new_table_handle(Rc::new(RefCell::new(TableData::default()))))
    })
}

extern "C" fn unbind_table_ref(h: Handle) {
    enter("unbind_table_ref", (), || free::<TableRef>(h, HandleKind::Table))
}

unsafe extern "C" fn table_add_column(h: Handle, ty: usize, name: *const c_char) -> usize {
    enter("table_add_column", NOT_FOUND, || {
        let name = unsafe { read_str(name)? };
        known_type(ty)?;
        let mut table = write(&table_ref(h)?.table)?;
        let (index, _) = table.spec.borrow_mut().push(ty, &name);
        table.sync_with_spec();
        Ok(index)
    })
}

unsafe extern "C" fn table_rename_column(h: Handle, col: usize, name: *const c_char) {
    enter("table_rename_column", (), || {
        let name = unsafe { read_str(name)? };
        let table = read(&table_ref(h)?.table)?;
        let mut spec = table.spec.borrow_mut();
        let count = spec.columns.len();
        let column = spec
            .columns
            .get_mut(col)
            .ok_or_else(|| out_of_range("column", col, count))?;
        column.name = name;
        Ok(())
    })
}

extern "C" fn table_remove_column(h: Handle, col: usize) {
    enter("table_remove_column", (), || {
        let mut table = write(&table_ref(h)?.table)?;
        {
            let mut spec = table.spec.borrow_mut();
            if col >= spec.columns.len() {
                return Err(out_of_range("column", col, spec.columns.len()));
            }
            spec.columns.remove(col);
        }
        for row in &mut table.rows {
            if col < row.len() {
                row.remove(col);
            }
        }
        table.indexed.retain(|c| *c != col);
        for c in &mut table.indexed {
            if *c > col {
                *c -= 1;
            }
        }
        Ok(())
    })
}

extern "C" fn table_remove_row(h: Handle, row: usize) {
    enter("table_remove_row", (), || {
        let mut table = write(&table_ref(h)?.table)?;
        if row >= table.rows.len() {
            return Err(out_of_range("row", row, table.rows.len()));
        }
        table.rows.remove(row);
        Ok(())
    })
}

extern "C" fn table_get_spec(h: Handle) -> Handle {
    enter("table_get_spec", Handle::NULL, || {
        let table = read(&table_ref(h)?.table)?;
        Ok(table_spec_handle(&table))
    })
}

extern "C" fn table_update_from_spec(h: Handle) {
    enter("table_update_from_spec", (), || {
        write(&table_ref(h)?.table)?.sync_with_spec();
        Ok(())
    })
}

extern "C" fn table_insert_empty_row(h: Handle, row: usize, count: usize) {
    enter("table_insert_empty_row", (), || {
        let mut table = write(&table_ref(h)?.table)?;
        if row > table.rows.len() {
            return Err(out_of_range("row", row, table.rows.len()));
        }
        for at in row..row + count {
            let fresh = table.new_row();
            table.rows.insert(at, fresh);
        }
        Ok(())
    })
}

extern "C" fn table_add_empty_row(h: Handle, count: usize) -> usize {
    enter("table_add_empty_row", NOT_FOUND, || {
        let mut table = write(&table_ref(h)?.table)?;
        let first = table.rows.len();
        for _ in 0..count {
            let fresh = table.new_row();
            table.rows.push(fresh);
        }
        Ok(first)
    })
}

extern "C" fn table_insert_int(h: Handle, col: usize, row: usize, value: i64) {
    enter("table_insert_int", (), || {
        let mut table = write(&table_ref(h)?.table)?;
        expect_column(&table, col, sys::TYPE_INT)?;
        if row > table.rows.len() {
            return Err(out_of_range("row", row, table.rows.len()));
        }
        let mut fresh = table.new_row();
        fresh[col] = Value::Int(value);
        table.rows.insert(row, fresh);
        Ok(())
    })
}

extern "C" fn table_set_index(h: Handle, col: usize) {
    enter("table_set_index", (), || {
        let mut table = write(&table_ref(h)?.table)?;
        let ty = table.column_type(col);
        if ty != Some(sys::TYPE_INT) && ty != Some(sys::TYPE_STRING) {
            expect_column(&table, col, sys::TYPE_STRING)?;
        }
        if !table.indexed.contains(&col) {
            table.indexed.push(col);
        }
        Ok(())
    })
}

fn same_key(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        _ => false,
    }
}

extern "C" fn table_distinct(h: Handle, col: usize) -> Handle {
    enter("table_distinct", Handle::NULL, || {
        let shared = table_ref(h)?.table.clone();
        let table = read(&shared)?;
        if !table.indexed.contains(&col) {
            return Err(SimError::new(
                ERR_NOT_INDEXED,
                format!("column {col} has no index"),
            ));
        }
        let mut seen: Vec<&Value> = Vec::new();
        let mut rows = Vec::new();
        for (r, cells) in table.rows.iter().enumerate() {
            let Some(v) = cells.get(col) else { continue };
            if !seen.iter().any(|s| same_key(s, v)) {
                seen.push(v);
                rows.push(r);
            }
        }
        drop(seen);
        drop(table);
        Ok(new_view_handle(shared, rows))
    })
}

extern "C" fn table_where(h: Handle) -> Handle {
    enter("table_where", Handle::NULL, || {
        let table = table_ref(h)?.table.clone();
        Ok(alloc_cell(
            QueryData {
                table,
                conditions: Vec::new(),
            },
            HandleKind::Query,
        ))
    })
}

// ---------------------------------------------------------------------------
// TableView
// ---------------------------------------------------------------------------

extern "C" fn tableview_delete(h: Handle) {
    enter("tableview_delete", (), || free_cell::<ViewData>(h, HandleKind::TableView))
}

extern "C" fn tableview_remove(h: Handle, row: usize) {
    enter("tableview_remove", (), || {
        let mut view = view_mut(h)?;
        let source = view.table.clone();
        let mut table = write(&source)?;
        let target = match view.rows.get(row) {
            Some(r) if *r < table.rows.len() => *r,
            _ => return Err(out_of_range("row", row, view.rows.len())),
        };
        table.rows.remove(target);
        view.rows.remove(row);
        for r in &mut view.rows {
            if *r > target {
                *r -= 1;
            }
        }
        Ok(())
    })
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

extern "C" fn new_group() -> Handle {
    enter("new_group", Handle::NULL, || {
        Ok(alloc_cell(GroupData::default(), HandleKind::Group))
    })
}

unsafe extern "C" fn new_group_file(path: *const c_char) -> Handle {
    enter("new_group_file", Handle::NULL, || {
        let path = unsafe { read_str(path)? };
        let text = fs::read_to_string(&path)
            .map_err(|e| SimError::new(ERR_IO, format!("cannot read {path}: {e}")))?;
        let file: GroupFile = serde_json::from_str(&text)
            .map_err(|e| SimError::new(ERR_IO, format!("{path} is not a group file: {e}")))?;
        if file.format != GROUP_FORMAT {
            return Err(SimError::new(
                ERR_IO,
                format!("{path} has group format {}, expected {GROUP_FORMAT}", file.format),
            ));
        }
        tracing::debug!(%path, tables = file.tables.len(), "group opened");
        Ok(alloc_cell(GroupData { tables: file.tables }, HandleKind::Group))
    })
}

unsafe extern "C" fn group_write(h: Handle, path: *const c_char) {
    enter("group_write", (), || {
        let path = unsafe { read_str(path)? };
        let group = group_mut(h)?;
        let file = GroupFile {
            format: GROUP_FORMAT,
            tables: group.tables.clone(),
        };
        let text = serde_json::to_string(&file)
            .map_err(|e| SimError::new(ERR_IO, format!("cannot encode group: {e}")))?;
        fs::write(&path, text)
            .map_err(|e| SimError::new(ERR_IO, format!("cannot write {path}: {e}")))?;
        tracing::debug!(%path, tables = file.tables.len(), "group written");
        Ok(())
    })
}

extern "C" fn group_delete(h: Handle) {
    enter("group_delete", (), || free_cell::<GroupData>(h, HandleKind::Group))
}

unsafe extern "C" fn group_get_table(h: Handle, name: *const c_char) -> Handle {
    enter("group_get_table", Handle::NULL, || {
        let name = unsafe { read_str(name)? };
        let mut group = group_mut(h)?;
        let shared = match group.tables.iter().find(|(n, _)| *n == name) {
            Some((_, t)) => t.clone(),
            None => {
                let t = Rc::new(RefCell::new(TableData::default()));
                group.tables.push((name, t.clone()));
                t
            }
        };
        Ok(new_table_handle(shared))
    })
}

unsafe extern "C" fn group_has_table(h: Handle, name: *const c_char) -> usize {
    enter("group_has_table", 0, || {
        let name = unsafe { read_str(name)? };
        let group = group_mut(h)?;
        Ok(usize::from(group.tables.iter().any(|(n, _)| *n == name)))
    })
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

fn matches(cells: &[Value], conditions: &[Condition]) -> bool {
    conditions.iter().all(|cond| match *cond {
        Condition::BoolEqual(col, want) => matches!(cells.get(col), Some(Value::Bool(b)) if *b == want),
        Condition::IntBetween(col, low, high) => {
            matches!(cells.get(col), Some(Value::Int(v)) if (low..=high).contains(v))
        }
    })
}

fn add_condition(h: Handle, cond: Condition, col: usize, ty: usize) -> SimResult<()> {
    let mut query = query_mut(h)?;
    expect_column(&*read(&query.table)?, col, ty)?;
    query.conditions.push(cond);
    Ok(())
}

extern "C" fn query_delete(h: Handle) {
    enter("query_delete", (), || free_cell::<QueryData>(h, HandleKind::Query))
}

extern "C" fn query_find_all(h: Handle, start: usize, end: usize, limit: usize) -> Handle {
    enter("query_find_all", Handle::NULL, || {
        let query = query_mut(h)?;
        let shared = query.table.clone();
        let table = read(&shared)?;
        let len = table.rows.len();
        let end = if end == NOT_FOUND { len } else { end };
        if end > len {
            return Err(out_of_range("end row", end, len));
        }
        if start > end {
            return Err(SimError::new(
                ERR_ARGUMENT,
                format!("start {start} is past end {end}"),
            ));
        }
        let rows: Vec<usize> = (start..end)
            .filter(|r| matches(&table.rows[*r], &query.conditions))
            .take(limit)
            .collect();
        drop(table);
        Ok(new_view_handle(shared, rows))
    })
}

extern "C" fn query_find_next(h: Handle, last_match: usize) -> usize {
    enter("query_find_next", NOT_FOUND, || {
        let query = query_mut(h)?;
        let table = read(&query.table)?;
        let from = if last_match == NOT_FOUND { 0 } else { last_match + 1 };
        Ok((from..table.rows.len())
            .find(|r| matches(&table.rows[*r], &query.conditions))
            .unwrap_or(NOT_FOUND))
    })
}

extern "C" fn query_average(h: Handle, col: usize) -> f64 {
    enter("query_average", 0.0, || {
        let query = query_mut(h)?;
        let table = read(&query.table)?;
        expect_column(&table, col, sys::TYPE_INT)?;
        let values: Vec<i64> = table
            .rows
            .iter()
            .filter(|cells| matches(cells, &query.conditions))
            .filter_map(|cells| match cells.get(col) {
                Some(Value::Int(v)) => Some(*v),
                _ => None,
            })
            .collect();
        if values.is_empty() {
            return Ok(0.0);
        }
        Ok(values.iter().map(|v| *v as f64).sum::<f64>() / values.len() as f64)
    })
}

unsafe extern "C" fn query_get_column_index(h: Handle, name: *const c_char) -> usize {
    enter("query_get_column_index", NOT_FOUND, || {
        let name = unsafe { read_str(name)? };
        let query = query_mut(h)?;
        let table = read(&query.table)?;
        let index = table.spec.borrow().index_of(&name);
        Ok(index.unwrap_or(NOT_FOUND))
    })
}

extern "C" fn query_bool_equal(h: Handle, col: usize, value: usize) {
    enter("query_bool_equal", (), || {
        add_condition(h, Condition::BoolEqual(col, value == 1), col, sys::TYPE_BOOL)
    })
}

extern "C" fn query_int_between(h: Handle, col: usize, low: i64, high: i64) {
    enter("query_int_between", (), || {
        add_condition(h, Condition::IntBetween(col, low, high), col, sys::TYPE_INT)
    })
}

// ---------------------------------------------------------------------------
// Spec
// ---------------------------------------------------------------------------

extern "C" fn spec_deallocate(h: Handle) {
    enter("spec_deallocate", (), || free::<crate::model::SharedSpec>(h, HandleKind::Spec))
}

unsafe extern "C" fn spec_add_column(h: Handle, ty: usize, name: *const c_char) -> usize {
    enter("spec_add_column", NOT_FOUND, || {
        let name = unsafe { read_str(name)? };
        known_type(ty)?;
        let (index, _) = spec(h)?.borrow_mut().push(ty, &name);
        Ok(index)
    })
}

unsafe extern "C" fn spec_add_subtable_column(h: Handle, name: *const c_char) -> Handle {
    enter("spec_add_subtable_column", Handle::NULL, || {
        let name = unsafe { read_str(name)? };
        let (_, sub) = spec(h)?.borrow_mut().push(sys::TYPE_TABLE, &name);
        let sub = sub.ok_or_else(|| SimError::new(ERR_TYPE, "sub-table column without a spec"))?;
        Ok(new_spec_handle(sub))
    })
}

extern "C" fn spec_get_spec(h: Handle, col: usize) -> Handle {
    enter("spec_get_spec", Handle::NULL, || {
        let shared = spec(h)?;
        let spec = shared.borrow();
        let column = spec
            .columns
            .get(col)
            .ok_or_else(|| out_of_range("column", col, spec.columns.len()))?;
        match &column.sub {
            Some(sub) if column.ty == sys::TYPE_TABLE => Ok(new_spec_handle(sub.clone())),
            _ => Err(SimError::new(
                ERR_TYPE,
                format!("column {col} is not a sub-table column"),
            )),
        }
    })
}

extern "C" fn spec_get_column_count(h: Handle) -> usize {
    enter("spec_get_column_count", 0, || Ok(spec(h)?.borrow().columns.len()))
}

extern "C" fn spec_get_column_type(h: Handle, col: usize) -> usize {
    enter("spec_get_column_type", 0, || {
        let shared = spec(h)?;
        let spec = shared.borrow();
        spec.columns
            .get(col)
            .map(|c| c.ty)
            .ok_or_else(|| out_of_range("column", col, spec.columns.len()))
    })
}

unsafe extern "C" fn spec_get_column_name(
    h: Handle,
    col: usize,
    buf: *mut c_char,
    cap: usize,
) -> usize {
    let name = enter("spec_get_column_name", String::new(), || {
        let shared = spec(h)?;
        let spec = shared.borrow();
        spec.columns
            .get(col)
            .map(|c| c.name.clone())
            .ok_or_else(|| out_of_range("column", col, spec.columns.len()))
    });
    unsafe { write_str(buf, cap, name.as_bytes()) }
}

// ---------------------------------------------------------------------------
// Tables of entry points
// ---------------------------------------------------------------------------

pub fn table_api() -> TableApi {
    TableApi {
        new_table,
        unbind: unbind_table_ref,
        add_column: table_add_column,
        rename_column: table_rename_column,
        remove_column: table_remove_column,
        remove_row: table_remove_row,
        get_spec: table_get_spec,
        update_from_spec: table_update_from_spec,
        insert_empty_row: table_insert_empty_row,
        add_empty_row: table_add_empty_row,
        insert_int: table_insert_int,
        set_index: table_set_index,
        distinct: table_distinct,
        where_: table_where,
    }
}

pub fn view_api() -> ViewApi {
    ViewApi {
        delete: tableview_delete,
        remove_row: tableview_remove,
    }
}

pub fn group_api() -> GroupApi {
    GroupApi {
        new_group,
        new_group_file,
        write: group_write,
        delete: group_delete,
        get_table: group_get_table,
        has_table: group_has_table,
    }
}

pub fn query_api() -> QueryApi {
    QueryApi {
        delete: query_delete,
        find_all: query_find_all,
        find_next: query_find_next,
        average: query_average,
        get_column_index: query_get_column_index,
        bool_equal: query_bool_equal,
        int_between: query_int_between,
    }
}

pub fn spec_api() -> SpecApi {
    SpecApi {
        deallocate: spec_deallocate,
        add_column: spec_add_column,
        add_subtable_column: spec_add_subtable_column,
        get_spec: spec_get_spec,
        get_column_count: spec_get_column_count,
        get_column_type: spec_get_column_type,
        get_column_name: spec_get_column_name,
    }
}
