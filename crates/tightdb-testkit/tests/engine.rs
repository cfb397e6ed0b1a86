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

//! The simulated binding, driven through its raw entry points.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use tightdb_sys::{EntryPoints, Handle, ERR_NONE, NOT_FOUND, TYPE_INT, TYPE_MIXED, TYPE_STRING};
use tightdb_testkit::{entry_points, live_handles, native_calls, HandleKind, ERR_BAD_HANDLE, ERR_TYPE};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn cstr(s: &str) -> CString {
    CString::new(s).unwrap()
}

fn last_error(api: &EntryPoints) -> (usize, String) {
    let slot = api.error.expect("error slot");
    let code = unsafe { (slot.last_error_code)() };
    let mut buf = vec![0u8; 256];
    let len = unsafe { (slot.last_error_message)(buf.as_mut_ptr().cast(), buf.len()) };
    buf.truncate(len);
    (code, String::from_utf8(buf).unwrap())
}

/// A table with columns `n: Int` and `s: String` and three rows.
fn sample(api: &EntryPoints) -> Handle {
    unsafe {
        let t = (api.table.new_table)();
        (api.table.add_column)(t, TYPE_INT, cstr("n").as_ptr());
        (api.table.add_column)(t, TYPE_STRING, cstr("s").as_ptr());
        (api.table.add_empty_row)(t, 3);
        for (r, (n, s)) in [(10, "a"), (20, "b"), (10, "c")].into_iter().enumerate() {
            (api.table_rows.set_int)(t, 0, r, n);
            (api.table_rows.set_string)(t, 1, r, cstr(s).as_ptr());
        }
        t
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn strings_report_full_length_into_small_buffers() {
    let api = entry_points();
    let t = sample(&api);
    unsafe {
        (api.table_rows.set_string)(t, 1, 0, cstr("hello world").as_ptr());
        let mut buf = [0 as c_char; 4];
        let len = (api.table_rows.get_string)(t, 1, 0, buf.as_mut_ptr(), buf.len());
        assert_eq!(len, 11);

        let mut buf = [0 as c_char; 16];
        let len = (api.table_rows.get_string)(t, 1, 0, buf.as_mut_ptr(), buf.len());
        assert_eq!(len, 11);
        assert_eq!(CStr::from_ptr(buf.as_ptr()).to_str().unwrap(), "hello world");
        (api.table.unbind)(t);
    }
}

#[test]
fn stale_handle_sets_error_slot() {
    let api = entry_points();
    let t = sample(&api);
    unsafe {
        (api.table.unbind)(t);
        assert_eq!(last_error(&api).0, ERR_NONE);
        let size = (api.table_rows.size)(t);
        assert_eq!(size, 0);
        let (code, message) = last_error(&api);
        assert_eq!(code, ERR_BAD_HANDLE);
        assert!(message.contains("not live"), "{message}");
    }
}

#[test]
fn mixed_getter_rejects_other_tag() {
    let api = entry_points();
    unsafe {
        let t = (api.table.new_table)();
        (api.table.add_column)(t, TYPE_MIXED, cstr("m").as_ptr());
        (api.table.add_empty_row)(t, 1);
        (api.table_rows.set_mixed_string)(t, 0, 0, cstr("hello").as_ptr());
        assert_eq!((api.table_rows.get_mixed_type)(t, 0, 0), TYPE_STRING);

        (api.table_rows.get_mixed_int)(t, 0, 0);
        let (code, message) = last_error(&api);
        assert_eq!(code, ERR_TYPE);
        assert!(message.contains("String"), "{message}");
        (api.table.unbind)(t);
    }
}

#[test]
fn views_index_their_own_rows() {
    let api = entry_points();
    let t = sample(&api);
    unsafe {
        let v = (api.table_rows.find_all_int)(t, 0, 10);
        assert_eq!((api.view_rows.size)(v), 2);
        assert_eq!((api.view_rows.find_first_int)(v, 0, 10), 0);
        assert_eq!((api.view_rows.find_first_int)(v, 0, 20), NOT_FOUND);
        assert_eq!((api.view_rows.sum_int)(v, 0), 20);

        (api.view.remove_row)(v, 0);
        assert_eq!((api.table_rows.size)(t), 2);
        assert_eq!((api.view_rows.size)(v), 1);
        assert_eq!((api.view_rows.get_int)(v, 0, 0), 10);

        (api.view.delete)(v);
        (api.table.unbind)(t);
    }
}

#[test]
fn distinct_needs_an_index() {
    let api = entry_points();
    let t = sample(&api);
    unsafe {
        let v = (api.table.distinct)(t, 0);
        assert!(v.is_null());
        assert_eq!(last_error(&api).0, tightdb_testkit::ERR_NOT_INDEXED);

        (api.table.set_index)(t, 0);
        let v = (api.table.distinct)(t, 0);
        assert_eq!((api.view_rows.size)(v), 2);
        (api.view.delete)(v);
        (api.table.unbind)(t);
    }
}

#[test]
fn query_walks_matches_in_order() {
    let api = entry_points();
    let t = sample(&api);
    unsafe {
        let q = (api.table.where_)(t);
        (api.query.int_between)(q, 0, 5, 15);
        assert_eq!((api.query.find_next)(q, NOT_FOUND), 0);
        assert_eq!((api.query.find_next)(q, 0), 2);
        assert_eq!((api.query.find_next)(q, 2), NOT_FOUND);
        assert_eq!((api.query.average)(q, 0), 10.0);

        let v = (api.query.find_all)(q, 0, NOT_FOUND, 1);
        assert_eq!((api.view_rows.size)(v), 1);
        (api.view.delete)(v);
        (api.query.delete)(q);
        (api.table.unbind)(t);
    }
}

#[test]
fn group_survives_write_and_reopen() {
    let api = entry_points();
    let dir = tempfile::tempdir().unwrap();
    let path = cstr(dir.path().join("g.tightdb").to_str().unwrap());
    unsafe {
        let g = (api.group.new_group)();
        let t = (api.group.get_table)(g, cstr("T").as_ptr());
        (api.table.add_column)(t, TYPE_INT, cstr("n").as_ptr());
        (api.table.add_empty_row)(t, 2);
        (api.table_rows.set_int)(t, 0, 1, 7);
        (api.table.unbind)(t);
        (api.group.write)(g, path.as_ptr());
        assert_eq!(last_error(&api).0, ERR_NONE);
        (api.group.delete)(g);

        let g = (api.group.new_group_file)(path.as_ptr());
        assert!(!g.is_null());
        assert_eq!((api.group.has_table)(g, cstr("T").as_ptr()), 1);
        assert_eq!((api.group.has_table)(g, cstr("U").as_ptr()), 0);
        let t = (api.group.get_table)(g, cstr("T").as_ptr());
        assert_eq!((api.table_rows.size)(t), 2);
        assert_eq!((api.table_rows.get_int)(t, 0, 1), 7);
        (api.table.unbind)(t);
        (api.group.delete)(g);
    }
}

#[test]
fn missing_group_file_is_an_io_error() {
    let api = entry_points();
    let dir = tempfile::tempdir().unwrap();
    let path = cstr(dir.path().join("absent").to_str().unwrap());
    let g = unsafe { (api.group.new_group_file)(path.as_ptr()) };
    assert!(g.is_null());
    assert_eq!(last_error(&api).0, tightdb_testkit::ERR_IO);
}

#[test]
fn only_owned_specs_can_be_deallocated() {
    let api = entry_points();
    unsafe {
        let t = (api.table.new_table)();
        let spec = (api.table.get_spec)(t);
        let sub = (api.spec.add_subtable_column)(spec, cstr("sub").as_ptr());
        (api.spec.add_column)(sub, TYPE_INT, cstr("x").as_ptr());
        assert_eq!(live_handles(HandleKind::Spec), 1);

        (api.spec.deallocate)(spec);
        assert_eq!(last_error(&api).0, ERR_BAD_HANDLE);
        (api.spec.deallocate)(sub);
        assert_eq!(last_error(&api).0, ERR_NONE);
        assert_eq!(live_handles(HandleKind::Spec), 0);

        (api.table.update_from_spec)(t);
        assert_eq!((api.table_rows.get_column_count)(t), 1);
        (api.table.unbind)(t);
    }
}

#[test]
fn every_entry_point_is_counted() {
    let api = entry_points();
    let before = native_calls();
    unsafe {
        let t = (api.table.new_table)();
        (api.table_rows.size)(t);
        (api.table.unbind)(t);
        (api.error.expect("error slot").last_error_code)();
    }
    assert_eq!(native_calls() - before, 3);
}
