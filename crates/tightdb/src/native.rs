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

//! The process's bound entry-point table and the single call path into it.

use std::os::raw::c_char;

use libloading::Library;
use tightdb_sys::{AbiWidth, EntryPoints, ProbeApi, ERR_NONE};

use crate::calllog;
use crate::error::{Error, Result};
use crate::marshal;
use crate::resource::ResourceKind;

/// Identifies a foreign call for logging and error context.
#[derive(Debug, Clone, Copy)]
pub struct Site {
    pub kind: ResourceKind,
    pub op: &'static str,
    pub column: Option<u64>,
    pub row: Option<u64>,
}

impl Site {
    pub fn new(kind: ResourceKind, op: &'static str) -> Site {
        Site {
            kind,
            op,
            column: None,
            row: None,
        }
    }

    pub fn column(mut self, column: u64) -> Site {
        self.column = Some(column);
        self
    }

    pub fn cell(mut self, column: u64, row: u64) -> Site {
        self.column = Some(column);
        self.row = Some(row);
        self
    }

    pub fn row(mut self, row: u64) -> Site {
        self.row = Some(row);
        self
    }
}

/// One ABI's catalogue, plus the library that backs it when loaded from disk.
pub struct Native {
    abi: AbiWidth,
    api: EntryPoints,
    // keeps every pointer in `api` valid
    _library: Option<Library>,
}

impl Native {
    pub fn new(abi: AbiWidth, api: EntryPoints, library: Option<Library>) -> Native {
        Native {
            abi,
            api,
            _library: library,
        }
    }

    #[inline]
    pub fn abi(&self) -> AbiWidth {
        self.abi
    }

    pub fn version(&self) -> usize {
        calllog::record(|buf| buf.push_str("tightdb_c_cs_getver"));
        unsafe { (self.api.version)() }
    }

    #[inline]
    pub fn entry_points(&self) -> &EntryPoints {
        &self.api
    }

    #[inline]
    pub fn index(&self, what: &'static str, value: u64) -> Result<usize> {
        marshal::index(self.abi, what, value)
    }

    /// Invoke `f` and turn a raised engine error into `Error::Engine`.
    pub fn call<T>(&self, site: &Site, f: impl FnOnce(&EntryPoints) -> T) -> Result<T> {
        calllog::record_call(&site.kind, site.op, site.column, site.row);
        tracing::trace!(
            target: "tightdb::ffi",
            kind = %site.kind,
            op = site.op,
            column = ?site.column,
            row = ?site.row,
            "native call"
        );
        let out = f(&self.api);
        self.check(site)?;
        Ok(out)
    }

    /// Fetch a string through the probe-and-grow protocol. Each attempt is a
    /// separate checked call.
    pub fn call_string(
        &self,
        site: &Site,
        mut f: impl FnMut(&EntryPoints, *mut c_char, usize) -> usize,
    ) -> Result<String> {
        marshal::read_string(|buf| {
            self.call(site, |api| f(api, buf.as_mut_ptr().cast::<c_char>(), buf.len()))
        })
    }

    /// Probes never raise engine errors; only the log sees them.
    pub fn probe<T>(&self, op: &'static str, f: impl FnOnce(&ProbeApi) -> T) -> T {
        calllog::record(|buf| {
            buf.push_str("probe.");
            buf.push_str(op);
        });
        tracing::trace!(target: "tightdb::ffi", op, "interop probe");
        f(&self.api.probe)
    }

    /// Without an error slot in the library there is nothing to check.
    fn check(&self, site: &Site) -> Result<()> {
        let Some(slot) = self.api.error else {
            return Ok(());
        };
        let code = unsafe { (slot.last_error_code)() };
        if code == ERR_NONE {
            return Ok(());
        }
        let message = marshal::read_string(|buf| {
            Ok(unsafe { (slot.last_error_message)(buf.as_mut_ptr().cast::<c_char>(), buf.len()) })
        })
        .unwrap_or_else(|_| String::from("(unreadable engine message)"));

        tracing::debug!(
            target: "tightdb::ffi",
            kind = %site.kind,
            op = site.op,
            code,
            %message,
            "engine error"
        );
        Err(Error::Engine {
            kind: site.kind,
            op: site.op,
            column: site.column,
            row: site.row,
            code,
            message,
        })
    }
}

impl std::fmt::Debug for Native {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Native")
            .field("abi", &self.abi)
            .field("loaded", &self._library.is_some())
            .field("error_slot", &self.api.error.is_some())
            .finish_non_exhaustive()
    }
}
