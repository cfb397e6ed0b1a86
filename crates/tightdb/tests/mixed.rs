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

//! Mixed cells hold any value kind and report its tag.

mod common;

use chrono::{DateTime, TimeZone, Utc};
use tightdb::{Context, DataType, Error, Handle, MixedValue, RowSet, Table};
use tightdb_testkit::native_calls;

use common::context;

fn mixed_table(ctx: &Context) -> Table {
    let t = ctx.new_table().unwrap();
    t.add_column(DataType::Mixed, "m").unwrap();
    t.add_empty_row(1).unwrap();
    t
}

#[test]
fn every_supported_kind_round_trips() {
    let ctx = context();
    let t = mixed_table(&ctx);
    let when = Utc.with_ymd_and_hms(2014, 3, 2, 8, 0, 0).unwrap();

    t.set_mixed(0, 0, &MixedValue::Int(-7)).unwrap();
    assert_eq!(t.mixed_type(0, 0).unwrap(), DataType::Int);
    assert_eq!(t.get_mixed(0, 0).unwrap().as_int(), Some(-7));

    t.set_mixed(0, 0, &true.into()).unwrap();
    assert!(t.get_mixed_bool(0, 0).unwrap());

    t.set_mixed(0, 0, &2.5f32.into()).unwrap();
    assert_eq!(t.mixed_type(0, 0).unwrap(), DataType::Float);
    assert_eq!(t.get_mixed_float(0, 0).unwrap(), 2.5);

    t.set_mixed(0, 0, &6.25f64.into()).unwrap();
    assert_eq!(t.get_mixed_double(0, 0).unwrap(), 6.25);

    t.set_mixed(0, 0, &when.into()).unwrap();
    assert_eq!(t.mixed_type(0, 0).unwrap(), DataType::Date);
    assert_eq!(t.get_mixed_date(0, 0).unwrap(), when);

    t.set_mixed(0, 0, &"text".into()).unwrap();
    assert_eq!(t.get_mixed(0, 0).unwrap().as_str(), Some("text"));
}

#[test]
fn subtable_is_copied_into_the_cell() {
    let ctx = context();
    let t = mixed_table(&ctx);
    let source = ctx.new_table().unwrap();
    source.add_column(DataType::Int, "x").unwrap();
    source.add_empty_row(2).unwrap();
    source.set_int(0, 1, 42).unwrap();

    t.set_mixed(0, 0, &MixedValue::Table(source)).unwrap();
    assert_eq!(t.mixed_type(0, 0).unwrap(), DataType::Table);
    let MixedValue::Table(copy) = t.get_mixed(0, 0).unwrap() else {
        panic!("expected a table");
    };
    assert_eq!(copy.size().unwrap(), 2);
    assert_eq!(copy.get_int(0, 1).unwrap(), 42);

    t.set_mixed_empty_subtable(0, 0).unwrap();
    let empty = t.subtable(0, 0).unwrap();
    assert_eq!(empty.size().unwrap(), 0);
    assert_eq!(empty.column_count().unwrap(), 0);
}

#[test]
fn binary_is_not_supported() {
    let ctx = context();
    let t = mixed_table(&ctx);
    let before = native_calls();
    let err = t.set_mixed(0, 0, &MixedValue::Binary(vec![1, 2, 3])).unwrap_err();
    assert!(matches!(err, Error::NotImplemented(_)), "{err}");
    assert_eq!(native_calls(), before);
}

extern "C" fn binary_tag(_: Handle, _: usize, _: usize) -> usize {
    tightdb_sys::TYPE_BINARY
}

#[test]
fn binary_cell_is_not_read() {
    let mut api = tightdb_testkit::entry_points();
    api.table_rows.get_mixed_type = binary_tag;
    let ctx = Context::with_entry_points(api).unwrap();
    let t = mixed_table(&ctx);
    assert_eq!(t.mixed_type(0, 0).unwrap(), DataType::Binary);

    let before = native_calls();
    let err = t.get_mixed(0, 0).unwrap_err();
    assert!(matches!(err, Error::NotImplemented(_)), "{err}");
    assert_eq!(native_calls(), before);
}

#[test]
fn pre_epoch_date_is_rejected_before_the_call() {
    let ctx = context();
    let t = mixed_table(&ctx);
    let before = native_calls();
    let old = Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 59).unwrap();
    let err = t.set_mixed(0, 0, &old.into()).unwrap_err();
    assert!(matches!(err, Error::PreEpochMixedDate(_)), "{err}");
    assert!(err.is_validation());
    assert_eq!(native_calls(), before);

    t.set_mixed(0, 0, &DateTime::UNIX_EPOCH.into()).unwrap();
    assert_eq!(t.get_mixed_date(0, 0).unwrap(), DateTime::UNIX_EPOCH);
}

#[test]
fn typed_read_of_a_mixed_column_fails_in_the_engine() {
    let ctx = context();
    let t = mixed_table(&ctx);
    t.set_mixed(0, 0, &MixedValue::Int(3)).unwrap();
    let err = t.get_int(0, 0).unwrap_err();
    assert!(err.is_engine(), "{err}");
    let err = t.get_mixed_string(0, 0).unwrap_err();
    assert!(err.is_engine(), "{err}");
}
