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

//! The opt-in foreign call log.

use std::sync::Mutex;

use tightdb::{calllog, Context, DataType, RowSet};

// The log is process-wide; serialize the tests that touch it.
static LOG_LOCK: Mutex<()> = Mutex::new(());

fn context() -> Context {
    Context::with_entry_points(tightdb_testkit::entry_points()).unwrap()
}

#[test]
fn records_calls_with_their_site() {
    let _guard = LOG_LOCK.lock().unwrap();
    let ctx = context();
    let t = ctx.new_table().unwrap();
    t.add_column(DataType::Int, "a").unwrap();
    t.add_empty_row(2).unwrap();

    calllog::enable("-- records_calls_with_their_site");
    t.set_int(0, 1, 5).unwrap();
    assert_eq!(t.find_first_int(0, 5).unwrap(), Some(1));
    calllog::disable();
    t.size().unwrap();

    let log = calllog::contents();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(
        lines,
        vec![
            "-- records_calls_with_their_site",
            "table.set_int col=0 row=1",
            "table.find_first_int col=0",
        ]
    );
}

#[test]
fn disabled_log_stays_empty_and_saves() {
    let _guard = LOG_LOCK.lock().unwrap();
    calllog::enable("-- start");
    calllog::disable();
    assert!(!calllog::is_enabled());
    let ctx = context();
    ctx.new_table().unwrap();
    assert_eq!(calllog::contents(), "-- start\n");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calls.log");
    calllog::save_file(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "-- start\n");
}
