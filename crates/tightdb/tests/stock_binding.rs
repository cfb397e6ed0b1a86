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

//! A catalogue without the optional entry points, as loaded from a stock
//! build of the binding.

use tightdb::{Context, DataType, Error, MixedValue, RowSet, Table};
use tightdb_testkit::native_calls;

fn stock_context() -> Context {
    let mut api = tightdb_testkit::entry_points();
    api.error = None;
    api.table_rows.get_mixed_string = None;
    api.view_rows.get_mixed_string = None;
    Context::with_entry_points(api).unwrap()
}

fn mixed_table(ctx: &Context) -> Table {
    let t = ctx.new_table().unwrap();
    t.add_column(DataType::Mixed, "m").unwrap();
    t.add_empty_row(1).unwrap();
    t
}

#[test]
fn stock_catalogue_passes_startup() {
    let ctx = stock_context();
    let t = ctx.new_table().unwrap();
    let age = t.add_column(DataType::Int, "age").unwrap();
    t.add_empty_row(1).unwrap();
    t.set_int(age, 0, 10).unwrap();
    assert_eq!(t.get_int(age, 0).unwrap(), 10);
}

#[test]
fn mixed_strings_can_be_written_but_not_read() {
    let ctx = stock_context();
    let t = mixed_table(&ctx);
    t.set_mixed(0, 0, &"hello".into()).unwrap();
    assert_eq!(t.mixed_type(0, 0).unwrap(), DataType::String);

    let before = native_calls();
    let err = t.get_mixed_string(0, 0).unwrap_err();
    assert!(matches!(err, Error::NotImplemented(_)), "{err}");
    assert_eq!(native_calls(), before);

    // the tag is read, the value is not
    let err = t.get_mixed(0, 0).unwrap_err();
    assert!(matches!(err, Error::NotImplemented(_)), "{err}");
    assert_eq!(native_calls(), before + 1);
}

#[test]
fn other_mixed_kinds_still_read_back() {
    let ctx = stock_context();
    let t = mixed_table(&ctx);
    t.set_mixed(0, 0, &MixedValue::Int(5)).unwrap();
    assert_eq!(t.get_mixed(0, 0).unwrap().as_int(), Some(5));
}

#[test]
fn view_mixed_strings_are_not_read_either() {
    let ctx = stock_context();
    let t = ctx.new_table().unwrap();
    let n = t.add_column(DataType::Int, "n").unwrap();
    let m = t.add_column(DataType::Mixed, "m").unwrap();
    t.add_empty_row(2).unwrap();
    t.set_int(n, 1, 7).unwrap();
    t.set_mixed(m, 1, &"hello".into()).unwrap();

    let view = t.find_all_int(n, 7).unwrap();
    assert_eq!(view.size().unwrap(), 1);
    assert_eq!(view.mixed_type(m, 0).unwrap(), DataType::String);
    let err = view.get_mixed_string(m, 0).unwrap_err();
    assert!(matches!(err, Error::NotImplemented(_)), "{err}");
}

#[test]
fn engine_failures_go_unreported_without_the_error_slot() {
    let ctx = stock_context();
    let t = mixed_table(&ctx);
    t.set_mixed(0, 0, &MixedValue::Int(3)).unwrap();
    // with the slot this is an engine error; here the engine's default comes back
    assert!(!t.get_mixed_bool(0, 0).unwrap());
}
