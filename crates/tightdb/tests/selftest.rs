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

//! Startup interop checks and ABI width handling.

use tightdb::{AbiWidth, Context, DataType, Error, RowSet};
use tightdb_testkit::{entry_points, entry_points_for, native_calls};

extern "C" fn wrong_int32_size() -> usize {
    8
}

extern "C" fn wrong_float_max() -> f32 {
    1.0
}

extern "C" fn bool_as_two() -> usize {
    2
}

#[test]
fn matching_library_passes_every_check() {
    let ctx = Context::with_entry_points(entry_points()).unwrap();
    assert_eq!(ctx.abi(), AbiWidth::host());
    let checks = ctx.interop_checks();
    assert!(checks.contains(&"sizeof(size_t) matches pointer width"));
    assert!(checks.contains(&"parameters arrive in order"));
    assert!(checks.contains(&"DataType round-trip"));
    assert_eq!(ctx.native_version(), tightdb_testkit::VERSION);
}

#[test]
fn size_mismatch_aborts_startup() {
    let mut api = entry_points();
    api.probe.sizeof_int32_t = wrong_int32_size;
    let err = Context::with_entry_points(api).unwrap_err();
    match err {
        Error::Interop { assumption, native, expected } => {
            assert_eq!(assumption, "sizeof(int32_t) is 4");
            assert_eq!(native, "8");
            assert_eq!(expected, "4");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn value_mismatch_aborts_startup() {
    let mut api = entry_points();
    api.probe.float_max = wrong_float_max;
    let err = Context::with_entry_points(api).unwrap_err();
    assert!(matches!(err, Error::Interop { assumption: "float max", .. }), "{err}");
}

#[test]
fn only_one_is_true() {
    let mut api = entry_points();
    api.probe.return_true_bool = bool_as_two;
    let err = Context::with_entry_points(api).unwrap_err();
    assert!(matches!(err, Error::Interop { assumption: "true probe", .. }), "{err}");
}

#[test]
fn wrong_width_is_caught() {
    let other = match AbiWidth::host() {
        AbiWidth::Wide => AbiWidth::Narrow,
        AbiWidth::Narrow => AbiWidth::Wide,
    };
    let err = Context::with_entry_points(entry_points_for(other)).unwrap_err();
    assert!(
        matches!(err, Error::Interop { assumption: "sizeof(size_t) matches pointer width", .. }),
        "{err}"
    );
}

#[test]
fn narrow_indices_are_checked_before_the_call() {
    let ctx =
        Context::with_simulated_abi(AbiWidth::Narrow, entry_points_for(AbiWidth::Narrow)).unwrap();
    let t = ctx.new_table().unwrap();
    t.add_column(DataType::Int, "a").unwrap();
    t.add_empty_row(1).unwrap();

    let before = native_calls();
    let err = t.get_int(0, 1 << 31).unwrap_err();
    match err {
        Error::IndexOutOfRange { what, value, limit, abi } => {
            assert_eq!(what, "row");
            assert_eq!(value, 1 << 31);
            assert_eq!(limit, i32::MAX as u64);
            assert_eq!(abi, AbiWidth::Narrow);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(native_calls(), before);

    assert_eq!(t.get_int(0, 0).unwrap(), 0);
}
