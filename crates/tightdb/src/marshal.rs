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

//! Value conversion between Rust types and the pointer-sized wire forms.

use std::ffi::CString;

use tightdb_sys::{AbiWidth, NOT_FOUND};

use crate::error::{Error, Result};

/// First buffer size offered to a string getter.
pub const INITIAL_CAPACITY: usize = 16;

#[inline]
pub fn bool_to_wire(value: bool) -> usize {
    if value {
        1
    } else {
        0
    }
}

/// Only an exact 1 decodes as true.
#[inline]
pub fn bool_from_wire(raw: usize) -> bool {
    raw == 1
}

/// Convert a column or row index for the given ABI.
///
/// Rejects values above the ABI's signed maximum without touching the engine.
pub fn index(abi: AbiWidth, what: &'static str, value: u64) -> Result<usize> {
    let limit = abi.max_index();
    if value > limit {
        return Err(Error::IndexOutOfRange {
            what,
            value,
            limit,
            abi,
        });
    }
    usize::try_from(value).map_err(|_| Error::IndexOutOfRange {
        what,
        value,
        limit: usize::MAX as u64,
        abi,
    })
}

/// Map the engine's `size_t(-1)` "no match" to `None`.
#[inline]
pub fn found(raw: usize) -> Option<u64> {
    if raw == NOT_FOUND {
        None
    } else {
        Some(raw as u64)
    }
}

pub fn c_string(what: &'static str, value: &str) -> Result<CString> {
    CString::new(value).map_err(|_| Error::InteriorNul { what })
}

/// Run the probe-and-grow protocol against a string getter.
///
/// The getter writes at most `buf.len()` bytes and returns the full byte
/// length of the value. A result that does not fit is fetched again with a
/// buffer one byte larger than required.
pub fn read_bytes<F>(mut getter: F) -> Result<Vec<u8>>
where
    F: FnMut(&mut [u8]) -> Result<usize>,
{
    let mut buf = vec![0u8; INITIAL_CAPACITY];
    loop {
        let required = getter(&mut buf)?;
        if required >= buf.len() {
            buf = vec![0u8; required + 1];
            continue;
        }
        buf.truncate(required);
        return Ok(buf);
    }
}

pub fn read_string<F>(getter: F) -> Result<String>
where
    F: FnMut(&mut [u8]) -> Result<usize>,
{
    Ok(String::from_utf8(read_bytes(getter)?)?)
}
