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

//! An in-process stand-in for the TightDB C binding.
//!
//! [`entry_points`] returns a complete [`EntryPoints`] catalogue backed by a
//! small engine written in Rust. It keeps the binding's contracts: handles
//! are opaque, strings go through caller buffers, failures land in a
//! per-thread error slot, and group files survive a write and reopen.
//!
//! Every handle is checked against a registry before use, so tests can
//! assert that a released handle never reaches the engine again
//! ([`native_calls`]) and that nothing leaks ([`live_handles`]).
//!
//! All state is thread-local. Handles created on one thread are unknown on
//! any other.

mod handles;
mod model;
mod objects;
mod probe;
mod registry;
mod rowset;

use std::os::raw::c_char;

use tightdb_sys::{AbiWidth, EntryPoints, ErrorApi};

pub use registry::{
    live_handles, native_calls, HandleKind, ERR_BAD_HANDLE, ERR_INTERNAL, ERR_IO, ERR_NOT_INDEXED,
    ERR_RANGE, ERR_TYPE,
};

/// Binding version reported by `tightdb_c_cs_getver`.
pub const VERSION: usize = 1;

extern "C" fn version() -> usize {
    VERSION
}

extern "C" fn last_error_code() -> usize {
    registry::last_error_code()
}

unsafe extern "C" fn last_error_message(buf: *mut c_char, cap: usize) -> usize {
    let message = registry::last_error_message();
    unsafe { handles::write_str(buf, cap, message.as_bytes()) }
}

/// The catalogue for the host's own pointer width.
pub fn entry_points() -> EntryPoints {
    entry_points_for(AbiWidth::host())
}

/// A catalogue whose probes report `abi`. Only the size probes differ; the
/// engine itself always runs at host width.
pub fn entry_points_for(abi: AbiWidth) -> EntryPoints {
    EntryPoints {
        version,
        error: Some(ErrorApi {
            last_error_code,
            last_error_message,
        }),
        table_rows: rowset::api::<false>(),
        view_rows: rowset::api::<true>(),
        table: objects::table_api(),
        view: objects::view_api(),
        group: objects::group_api(),
        query: objects::query_api(),
        spec: objects::spec_api(),
        probe: probe::api(abi),
    }
}
