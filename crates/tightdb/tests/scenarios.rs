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

//! End-to-end use of the wrappers against the in-process engine.

mod common;

use chrono::{TimeZone, Utc};
use tightdb::{DataType, MixedValue, RowSet, SpecOps};

use common::{context, sample};

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[test]
fn find_first_int_returns_row_index() {
    let ctx = context();
    let t = ctx.new_table().unwrap();
    let age = t.add_column(DataType::Int, "age").unwrap();
    t.add_empty_row(3).unwrap();
    for (r, v) in [10, 20, 30].into_iter().enumerate() {
        t.set_int(age, r as u64, v).unwrap();
    }
    assert_eq!(t.find_first_int(age, 20).unwrap(), Some(1));
    assert_eq!(t.find_first_int(age, 25).unwrap(), None);
}

#[test]
fn schema_is_readable_by_name_and_index() {
    let ctx = context();
    let t = sample(&ctx);
    assert_eq!(t.column_count().unwrap(), 5);
    assert_eq!(t.column_name(1).unwrap(), "s");
    assert_eq!(t.column_type(3).unwrap(), DataType::Double);
    assert_eq!(t.column_index("b").unwrap(), Some(4));
    assert_eq!(t.column_index("missing").unwrap(), None);

    t.rename_column(1, "label").unwrap();
    assert_eq!(t.column_name(1).unwrap(), "label");
    t.remove_column(2).unwrap();
    assert_eq!(t.column_count().unwrap(), 4);
    assert_eq!(t.column_type(2).unwrap(), DataType::Double);
}

#[test]
fn long_strings_survive_the_buffer_protocol() {
    let ctx = context();
    let t = sample(&ctx);
    let long = "x".repeat(10_000);
    t.set_string(1, 0, &long).unwrap();
    assert_eq!(t.get_string(1, 0).unwrap(), long);
    t.set_string(1, 1, "").unwrap();
    assert_eq!(t.get_string(1, 1).unwrap(), "");
    let sixteen = "0123456789abcdef";
    t.set_string(1, 2, sixteen).unwrap();
    assert_eq!(t.get_string(1, 2).unwrap(), sixteen);
}

#[test]
fn scalar_cells_round_trip() {
    let ctx = context();
    let t = sample(&ctx);
    assert_eq!(t.get_int(0, 1).unwrap(), 20);
    assert_eq!(t.get_float(2, 0).unwrap(), 1.5);
    assert_eq!(t.get_double(3, 2).unwrap(), 4.0);
    assert!(t.get_bool(4, 0).unwrap());
    assert!(!t.get_bool(4, 1).unwrap());

    t.add_column(DataType::Date, "when").unwrap();
    let when = Utc.with_ymd_and_hms(2012, 6, 1, 12, 30, 0).unwrap();
    t.set_date(5, 0, when).unwrap();
    assert_eq!(t.get_date(5, 0).unwrap(), when);
    assert_eq!(t.find_first_date(5, when).unwrap(), Some(0));
}

#[test]
fn search_and_aggregates() {
    let ctx = context();
    let t = sample(&ctx);
    assert_eq!(t.find_first_string(1, "twenty").unwrap(), Some(1));
    assert_eq!(t.find_first_bool(4, false).unwrap(), Some(1));
    assert_eq!(t.find_first_float(2, 3.0).unwrap(), Some(2));
    assert_eq!(t.find_first_double(3, 3.5).unwrap(), Some(1));

    assert_eq!(t.count_int(0, 10).unwrap(), 2);
    assert_eq!(t.count_string(1, "ten").unwrap(), 1);
    assert_eq!(t.count_float(2, 2.5).unwrap(), 1);
    assert_eq!(t.count_double(3, 9.0).unwrap(), 0);
    assert_eq!(t.sum_int(0).unwrap(), 40);
    assert_eq!(t.sum_float(2).unwrap(), 7.0);
    assert_eq!(t.sum_double(3).unwrap(), 10.0);
    assert_eq!(t.maximum_int(0).unwrap(), 20);
    assert_eq!(t.minimum_float(2).unwrap(), 1.5);
    assert_eq!(t.maximum_double(3).unwrap(), 4.0);
    assert_eq!(t.average_int(0).unwrap(), 40.0 / 3.0);
    assert_eq!(t.average_double(3).unwrap(), 10.0 / 3.0);
}

#[test]
fn views_share_the_row_set_operations() {
    let ctx = context();
    let t = sample(&ctx);
    let v = t.find_all_int(0, 10).unwrap();
    assert_eq!(v.size().unwrap(), 2);
    assert_eq!(v.get_string(1, 1).unwrap(), "ten again");
    assert_eq!(v.sum_int(0).unwrap(), 20);

    v.set_string(1, 0, "changed").unwrap();
    assert_eq!(t.get_string(1, 0).unwrap(), "changed");

    v.remove_row(0).unwrap();
    assert_eq!(t.size().unwrap(), 2);
    assert_eq!(v.size().unwrap(), 1);
}

#[test]
fn distinct_after_index() {
    let ctx = context();
    let t = sample(&ctx);
    let err = t.distinct(0).unwrap_err();
    assert!(err.is_engine(), "{err}");
    t.set_index(0).unwrap();
    let v = t.distinct(0).unwrap();
    assert_eq!(v.size().unwrap(), 2);
}

#[test]
fn rows_can_be_inserted_and_removed() {
    let ctx = context();
    let t = sample(&ctx);
    t.insert_empty_row(1, 2).unwrap();
    assert_eq!(t.size().unwrap(), 5);
    assert_eq!(t.get_int(0, 3).unwrap(), 20);
    t.insert_int(0, 0, 99).unwrap();
    assert_eq!(t.get_int(0, 0).unwrap(), 99);
    assert_eq!(t.size().unwrap(), 6);
    t.remove_row(0).unwrap();
    assert_eq!(t.get_int(0, 0).unwrap(), 10);
    assert_eq!(t.add_empty_row(1).unwrap(), 5);
}

#[test]
fn query_conditions_chain() {
    let ctx = context();
    let t = sample(&ctx);
    let mut q = t.query().unwrap();
    q.int_between(0, 5, 15).unwrap().bool_equal(4, true).unwrap();
    assert_eq!(q.column_index("n").unwrap(), Some(0));
    assert_eq!(q.find_next(None).unwrap(), Some(0));
    assert_eq!(q.find_next(Some(0)).unwrap(), Some(2));
    assert_eq!(q.find_next(Some(2)).unwrap(), None);
    assert_eq!(q.average(0).unwrap(), 10.0);
    assert_eq!(q.find_all_rows().unwrap().size().unwrap(), 2);
    assert_eq!(q.find_all(1, None, None).unwrap().size().unwrap(), 1);
    assert_eq!(q.find_all(0, Some(3), Some(1)).unwrap().size().unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Mixed cells
// ---------------------------------------------------------------------------

#[test]
fn mixed_string_reports_its_tag_and_rejects_int_reads() {
    let ctx = context();
    let t = ctx.new_table().unwrap();
    t.add_column(DataType::Mixed, "m").unwrap();
    t.add_empty_row(1).unwrap();
    t.set_mixed(0, 0, &MixedValue::from("hello")).unwrap();

    assert_eq!(t.mixed_type(0, 0).unwrap(), DataType::String);
    assert_eq!(t.get_mixed_string(0, 0).unwrap(), "hello");
    let err = t.get_mixed_int(0, 0).unwrap_err();
    assert!(err.is_engine(), "{err}");
}

// ---------------------------------------------------------------------------
// Schemas
// ---------------------------------------------------------------------------

#[test]
fn subtable_columns_through_specs() {
    let ctx = context();
    let t = ctx.new_table().unwrap();
    {
        let spec = t.spec().unwrap();
        spec.add_column(DataType::Int, "id").unwrap();
        let sub = spec.add_subtable_column("items").unwrap();
        sub.add_column(DataType::String, "name").unwrap();
        assert_eq!(
            spec.columns().unwrap(),
            vec![("id".to_string(), DataType::Int), ("items".to_string(), DataType::Table)]
        );
        let err = spec.subtable_spec(0).unwrap_err();
        assert!(err.is_validation(), "{err}");
        let again = spec.subtable_spec(1).unwrap();
        assert_eq!(again.column_name(0).unwrap(), "name");
    }
    t.update_from_spec().unwrap();
    assert_eq!(t.column_count().unwrap(), 2);

    t.add_empty_row(1).unwrap();
    let items = t.subtable(1, 0).unwrap();
    assert_eq!(items.column_count().unwrap(), 1);
    assert_eq!(items.column_type(0).unwrap(), DataType::String);
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

#[test]
fn group_round_trips_through_a_file() {
    let ctx = context();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.tightdb");
    {
        let g = ctx.new_group().unwrap();
        let t = g.table("T").unwrap();
        t.add_column(DataType::Int, "age").unwrap();
        t.add_column(DataType::String, "name").unwrap();
        t.add_empty_row(1).unwrap();
        t.set_string(1, 0, "ada").unwrap();
        g.write(&path).unwrap();
    }

    let g = ctx.open_group(&path).unwrap();
    assert!(g.has_table("T").unwrap());
    assert!(!g.has_table("U").unwrap());
    let t = g.table("T").unwrap();
    assert_eq!(t.column_count().unwrap(), 2);
    assert_eq!(t.column_name(0).unwrap(), "age");
    assert_eq!(t.column_name(1).unwrap(), "name");
    assert_eq!(t.get_string(1, 0).unwrap(), "ada");
}

#[test]
fn opening_a_missing_group_is_an_engine_error() {
    let ctx = context();
    let dir = tempfile::tempdir().unwrap();
    let err = ctx.open_group(dir.path().join("absent")).unwrap_err();
    assert!(err.is_engine(), "{err}");
}
