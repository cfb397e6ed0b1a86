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

//! Startup verification of the binary contract with the native library.
//!
//! Runs once per [`Context`](crate::Context), before any wrapper exists. The
//! first broken assumption aborts initialisation with [`Error::Interop`].

use std::fmt::Debug;

use tightdb_sys::{ProbeApi, TYPE_BINARY};

use crate::error::{Error, Result};
use crate::marshal::{bool_from_wire, bool_to_wire};
use crate::native::Native;

type SizeProbe = unsafe extern "C" fn() -> usize;

struct Checks<'a> {
    native: &'a Native,
    passed: Vec<&'static str>,
}

impl Checks<'_> {
    fn expect<T: PartialEq + Debug>(
        &mut self,
        assumption: &'static str,
        native: T,
        expected: T,
    ) -> Result<()> {
        if native != expected {
            tracing::error!(assumption, native = ?native, expected = ?expected, "interop check failed");
            return Err(Error::Interop {
                assumption,
                native: format!("{native:?}"),
                expected: format!("{expected:?}"),
            });
        }
        self.passed.push(assumption);
        Ok(())
    }

    fn size_of(&self, op: &'static str, pick: fn(&ProbeApi) -> SizeProbe) -> usize {
        self.native.probe(op, |p| unsafe { pick(p)() })
    }

    fn sizes(&mut self) -> Result<()> {
        let ptr = self.native.abi().pointer_bytes();

        let size_t = self
            .native
            .probe("sizeofsize_t", |p| unsafe { (p.sizeof_size_t)() });
        self.expect("sizeof(size_t) matches pointer width", size_t as i64, ptr as i64)?;
        let v = self.size_of("sizeofint32_t", |p| p.sizeof_int32_t);
        self.expect("sizeof(int32_t) is 4", v, 4)?;
        // from here on size_t and int32_t are known to map correctly
        let v = self.size_of("sizeoftablepointer", |p| p.sizeof_table_pointer);
        self.expect("sizeof(Table*) matches pointer width", v, ptr)?;
        let v = self.size_of("sizeofcharpointer", |p| p.sizeof_char_pointer);
        self.expect("sizeof(char*) matches pointer width", v, ptr)?;
        let v = self.size_of("sizeofint64_t", |p| p.sizeof_int64_t);
        self.expect("sizeof(int64_t) is 8", v, 8)?;
        let v = self.size_of("sizeoftime_t", |p| p.sizeof_time_t);
        self.expect("sizeof(time_t) is 8", v, 8)?;
        let v = self.size_of("sizeoffloat", |p| p.sizeof_float);
        self.expect("sizeof(float) is 4", v, 4)?;
        let v = self.size_of("sizeofdouble", |p| p.sizeof_double);
        self.expect("sizeof(double) is 8", v, 8)?;
        Ok(())
    }

    fn values(&mut self) -> Result<()> {
        let n = self.native;

        let first = n.probe("get_five_parametres", |p| unsafe {
            (p.get_five_parameters)(1, 2, 3, 4, 5)
        });
        self.expect("parameters arrive in order", first, 1)?;

        let v = n.probe("float_max", |p| unsafe { (p.float_max)() });
        self.expect("float max", v, f32::MAX)?;
        let v = n.probe("float_min", |p| unsafe { (p.float_min)() });
        self.expect("float min", v, f32::MIN)?;
        let v = n.probe("float_return", |p| unsafe { (p.float_return)(42.0) });
        self.expect("float round-trip", v, 42.0)?;

        let v = n.probe("double_max", |p| unsafe { (p.double_max)() });
        self.expect("double max", v, f64::MAX)?;
        let v = n.probe("double_min", |p| unsafe { (p.double_min)() });
        self.expect("double min", v, f64::MIN)?;
        let v = n.probe("double_return", |p| unsafe { (p.double_return)(42.0) });
        self.expect("double round-trip", v, 42.0)?;

        let v = n.probe("int64_t_max", |p| unsafe { (p.int64_max)() });
        self.expect("int64_t max", v, i64::MAX)?;
        let v = n.probe("int64_t_min", |p| unsafe { (p.int64_min)() });
        self.expect("int64_t min", v, i64::MIN)?;
        let v = n.probe("int64_t_return", |p| unsafe { (p.int64_return)(42) });
        self.expect("int64_t round-trip", v, 42)?;

        let v = n.probe("size_t_max", |p| unsafe { (p.size_t_max)() });
        self.expect("size_t max is all ones", v, usize::MAX)?;
        let v = n.probe("size_t_min", |p| unsafe { (p.size_t_min)() });
        self.expect("size_t min is zero", v, 0)?;
        let v = n.probe("size_t_return", |p| unsafe { (p.size_t_return)(42) });
        self.expect("size_t round-trip", v, 42)?;

        let v = n.probe("increment_integer", |p| unsafe { (p.increment_integer)(41) });
        self.expect("int64_t increment", v, 42)?;

        let v = n.probe("return_datatype", |p| unsafe { (p.return_datatype)(TYPE_BINARY) });
        self.expect("DataType round-trip", v, TYPE_BINARY)?;

        let v = n.probe("return_false_bool", |p| unsafe { (p.return_false_bool)() });
        self.expect("false probe", bool_from_wire(v), false)?;
        let v = n.probe("return_true_bool", |p| unsafe { (p.return_true_bool)() });
        self.expect("true probe", bool_from_wire(v), true)?;
        let v = n.probe("return_bool", |p| unsafe { (p.return_bool)(bool_to_wire(true)) });
        self.expect("bool round-trip true", bool_from_wire(v), true)?;
        let v = n.probe("return_bool", |p| unsafe { (p.return_bool)(bool_to_wire(false)) });
        self.expect("bool round-trip false", bool_from_wire(v), false)?;
        Ok(())
    }
}

/// Run every check in order. Returns the names of the checks that passed.
pub(crate) fn run(native: &Native) -> Result<Vec<&'static str>> {
    let mut checks = Checks {
        native,
        passed: Vec::new(),
    };
    checks.sizes()?;
    checks.values()?;
    tracing::info!(abi = %native.abi(), checks = checks.passed.len(), "interop self-test passed");
    Ok(checks.passed)
}
