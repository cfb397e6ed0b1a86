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

//! Interop probes. Values are those of the host, except that a narrow
//! catalogue reports 4-byte pointers.

use std::mem::size_of;

use tightdb_sys::{AbiWidth, ProbeApi};

extern "C" fn sizeof_size_t() -> i32 {
    size_of::<usize>() as i32
}

extern "C" fn sizeof_size_t_narrow() -> i32 {
    4
}

extern "C" fn sizeof_int32_t() -> usize {
    size_of::<i32>()
}

extern "C" fn sizeof_pointer() -> usize {
    size_of::<*const ()>()
}

extern "C" fn sizeof_pointer_narrow() -> usize {
    4
}

extern "C" fn sizeof_int64_t() -> usize {
    size_of::<i64>()
}

extern "C" fn sizeof_float() -> usize {
    size_of::<f32>()
}

extern "C" fn sizeof_double() -> usize {
    size_of::<f64>()
}

extern "C" fn sizeof_time_t() -> usize {
    size_of::<i64>()
}

extern "C" fn get_five_parameters(p1: usize, _: usize, _: usize, _: usize, _: usize) -> usize {
    p1
}

extern "C" fn float_max() -> f32 {
    f32::MAX
}

extern "C" fn float_min() -> f32 {
    f32::MIN
}

extern "C" fn float_return(value: f32) -> f32 {
    value
}

extern "C" fn double_max() -> f64 {
    f64::MAX
}

extern "C" fn double_min() -> f64 {
    f64::MIN
}

extern "C" fn double_return(value: f64) -> f64 {
    value
}

extern "C" fn int64_max() -> i64 {
    i64::MAX
}

extern "C" fn int64_min() -> i64 {
    i64::MIN
}

extern "C" fn int64_return(value: i64) -> i64 {
    value
}

extern "C" fn size_t_max() -> usize {
    usize::MAX
}

extern "C" fn size_t_min() -> usize {
    0
}

extern "C" fn size_t_return(value: usize) -> usize {
    value
}

extern "C" fn return_datatype(value: usize) -> usize {
    value
}

extern "C" fn return_bool(value: usize) -> usize {
    value
}

extern "C" fn return_true_bool() -> usize {
    1
}

extern "C" fn return_false_bool() -> usize {
    0
}

extern "C" fn increment_integer(value: i64) -> i64 {
    value.wrapping_add(1)
}

pub fn api(abi: AbiWidth) -> ProbeApi {
    let narrow = abi == AbiWidth::Narrow;
    ProbeApi {
        sizeof_size_t: if narrow { sizeof_size_t_narrow } else { sizeof_size_t },
        sizeof_int32_t,
        sizeof_table_pointer: if narrow { sizeof_pointer_narrow } else { sizeof_pointer },
        sizeof_char_pointer: if narrow { sizeof_pointer_narrow } else { sizeof_pointer },
        sizeof_int64_t,
        sizeof_float,
        sizeof_double,
        sizeof_time_t,
        get_five_parameters,
        float_max,
        float_min,
        float_return,
        double_max,
        double_min,
        double_return,
        int64_max,
        int64_min,
        int64_return,
        size_t_max,
        size_t_min,
        size_t_return,
        return_datatype,
        return_bool,
        return_true_bool,
        return_false_bool,
        increment_integer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tightdb_sys::TYPE_BINARY;

    #[test]
    fn narrow_catalogue_reports_four_byte_pointers() {
        let probe = api(AbiWidth::Narrow);
        unsafe {
            assert_eq!((probe.sizeof_size_t)(), 4);
            assert_eq!((probe.sizeof_table_pointer)(), 4);
            assert_eq!((probe.sizeof_int64_t)(), 8);
        }
    }

    #[test]
    fn echoes_return_their_argument() {
        let probe = api(AbiWidth::Wide);
        unsafe {
            assert_eq!((probe.return_datatype)(TYPE_BINARY), TYPE_BINARY);
            assert_eq!((probe.increment_integer)(41), 42);
            assert_eq!((probe.get_five_parameters)(1, 2, 3, 4, 5), 1);
        }
    }
}
