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

#![allow(dead_code)]

use tightdb::{Context, DataType, RowSet, Table};

/// A context over the in-process engine at host width.
pub fn context() -> Context {
    Context::with_entry_points(tightdb_testkit::entry_points()).unwrap()
}

/// `n: Int`, `s: String`, `f: Float`, `d: Double`, `b: Bool`, three rows.
pub fn sample(ctx: &Context) -> Table {
    let t = ctx.new_table().unwrap();
    t.add_column(DataType::Int, "n").unwrap();
    t.add_column(DataType::String, "s").unwrap();
    t.add_column(DataType::Float, "f").unwrap();
    t.add_column(DataType::Double, "d").unwrap();
    t.add_column(DataType::Bool, "b").unwrap();
    t.add_empty_row(3).unwrap();
    let rows = [
        (10, "ten", 1.5f32, 2.5f64, true),
        (20, "twenty", 2.5, 3.5, false),
        (10, "ten again", 3.0, 4.0, true),
    ];
    for (r, (n, s, f, d, b)) in rows.into_iter().enumerate() {
        let r = r as u64;
        t.set_int(0, r, n).unwrap();
        t.set_string(1, r, s).unwrap();
        t.set_float(2, r, f).unwrap();
        t.set_double(3, r, d).unwrap();
        t.set_bool(4, r, b).unwrap();
    }
    t
}
