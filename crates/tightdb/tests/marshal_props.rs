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

//! Property tests for the value codecs.

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use tightdb::marshal::{bool_from_wire, bool_to_wire, index, read_string};
use tightdb::time;
use tightdb::{AbiWidth, DataType};

proptest! {
    #[test]
    fn data_type_codes_round_trip(i in 0usize..DataType::ALL.len()) {
        let ty = DataType::ALL[i];
        prop_assert_eq!(DataType::from_code(ty.code()).unwrap(), ty);
    }

    #[test]
    fn unknown_codes_are_rejected(code in 11usize..10_000) {
        prop_assert!(DataType::from_code(code).is_err());
    }

    #[test]
    fn only_one_decodes_as_true(raw in any::<usize>()) {
        prop_assert_eq!(bool_from_wire(raw), raw == 1);
    }

    #[test]
    fn bools_encode_to_zero_or_one(b in any::<bool>()) {
        prop_assert!(bool_to_wire(b) <= 1);
        prop_assert_eq!(bool_from_wire(bool_to_wire(b)), b);
    }

    #[test]
    fn narrow_indices_respect_i32(v in any::<u64>()) {
        let ok = index(AbiWidth::Narrow, "row", v).is_ok();
        prop_assert_eq!(ok, v <= i32::MAX as u64);
    }

    #[test]
    fn whole_second_times_round_trip(secs in -62_135_596_800i64..253_402_300_799) {
        let t = DateTime::<Utc>::from_timestamp(secs, 0).unwrap();
        prop_assert_eq!(time::encode(t), secs);
        prop_assert_eq!(time::decode(secs), t);
    }

    #[test]
    fn strings_of_any_length_are_read_whole(s in ".{0,300}") {
        let bytes = s.as_bytes().to_vec();
        let mut calls = 0;
        let out = read_string(|buf| {
            calls += 1;
            let n = bytes.len().min(buf.len());
            buf[..n].copy_from_slice(&bytes[..n]);
            Ok(bytes.len())
        }).unwrap();
        prop_assert_eq!(out, s);
        prop_assert!(calls <= 2);
    }
}
