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

//! Cost of one checked foreign call, measured against the in-process engine.
//!
//! With `TIGHTDB_NATIVE_LIB` set, the loaded library is measured instead.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tightdb::{calllog, Context, DataType, RowSet, Table};

fn context() -> Context {
    if std::env::var_os("TIGHTDB_NATIVE_LIB").is_some() {
        if let Ok(ctx) = Context::from_env() {
            return ctx;
        }
        eprintln!("native library failed to load; using the in-process engine");
    }
    Context::with_entry_points(tightdb_testkit::entry_points()).unwrap()
}

fn filled(ctx: &Context, rows: u64) -> Table {
    let t = ctx.new_table().unwrap();
    t.add_column(DataType::Int, "n").unwrap();
    t.add_column(DataType::String, "s").unwrap();
    t.add_empty_row(rows).unwrap();
    for r in 0..rows {
        t.set_int(0, r, (r % 97) as i64).unwrap();
        t.set_string(1, r, &"v".repeat((r % 40) as usize)).unwrap();
    }
    t
}

fn bench_cells(c: &mut Criterion) {
    let ctx = context();
    let t = filled(&ctx, 64);
    let mut group = c.benchmark_group("cell");

    group.bench_function("get_int", |b| {
        b.iter(|| black_box(t.get_int(0, black_box(17)).unwrap()));
    });

    group.bench_function("set_int", |b| {
        b.iter(|| t.set_int(0, black_box(17), black_box(3)).unwrap());
    });

    // 15 bytes fit the first buffer, 39 need a second call
    for row in [15u64, 39] {
        group.bench_with_input(BenchmarkId::new("get_string", row), &row, |b, row| {
            b.iter(|| black_box(t.get_string(1, *row).unwrap()));
        });
    }

    group.bench_function("get_int_logged", |b| {
        calllog::enable("-- bench");
        b.iter(|| black_box(t.get_int(0, black_box(17)).unwrap()));
        calllog::disable();
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let ctx = context();
    let mut group = c.benchmark_group("search");
    for rows in [100u64, 10_000] {
        let t = filled(&ctx, rows);
        group.bench_with_input(BenchmarkId::new("find_first_int", rows), &rows, |b, _| {
            b.iter(|| black_box(t.find_first_int(0, black_box(96)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("sum_int", rows), &rows, |b, _| {
            b.iter(|| black_box(t.sum_int(0).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cells, bench_search);
criterion_main!(benches);
