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

//! Handle bookkeeping and the per-thread error slot.
//!
//! Every handle given out is recorded with its kind. Entry points look a
//! handle up before dereferencing it, so a stale or mistyped handle becomes
//! an engine error instead of undefined behaviour.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tightdb_sys::{Handle, ERR_NONE};

/// Kind of object behind a simulated handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Table,
    TableView,
    Group,
    Query,
    /// Spec owned by the caller.
    Spec,
    /// Spec owned by its table; never released.
    TableSpec,
}

pub const ERR_BAD_HANDLE: usize = 1;
pub const ERR_TYPE: usize = 2;
pub const ERR_RANGE: usize = 3;
pub const ERR_IO: usize = 4;
pub const ERR_NOT_INDEXED: usize = 5;
pub const ERR_ARGUMENT: usize = 6;
pub const ERR_INTERNAL: usize = 7;

#[derive(Debug)]
pub struct SimError {
    pub code: usize,
    pub message: String,
}

impl SimError {
    pub fn new(code: usize, message: impl Into<String>) -> SimError {
        SimError {
            code,
            message: message.into(),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;

thread_local! {
    static LIVE: RefCell<HashMap<usize, HandleKind>> = RefCell::new(HashMap::new());
    static LAST_ERROR: RefCell<Option<SimError>> = const { RefCell::new(None) };
    static CALLS: Cell<u64> = const { Cell::new(0) };
}

pub fn register(raw: usize, kind: HandleKind) -> Handle {
    LIVE.with(|live| live.borrow_mut().insert(raw, kind));
    Handle::from_raw(raw)
}

/// Drop the record of `handle` if it is of `kind`.
pub fn unregister(handle: Handle, kind: HandleKind) -> SimResult<()> {
    LIVE.with(|live| {
        let mut live = live.borrow_mut();
        match live.get(&handle.as_raw()) {
            Some(k) if *k == kind => {
                live.remove(&handle.as_raw());
                Ok(())
            }
            Some(other) => Err(SimError::new(
                ERR_BAD_HANDLE,
                format!("handle {:#x} is a {other:?}, not a {kind:?}", handle.as_raw()),
            )),
            None => Err(SimError::new(
                ERR_BAD_HANDLE,
                format!("{kind:?} handle {:#x} is not live", handle.as_raw()),
            )),
        }
    })
}

pub fn check(handle: Handle, kinds: &[HandleKind]) -> SimResult<HandleKind> {
    let found = LIVE.with(|live| live.borrow().get(&handle.as_raw()).copied());
    match found {
        Some(kind) if kinds.contains(&kind) => Ok(kind),
        Some(kind) => Err(SimError::new(
            ERR_BAD_HANDLE,
            format!("handle {:#x} is a {kind:?}, expected {kinds:?}", handle.as_raw()),
        )),
        None => Err(SimError::new(
            ERR_BAD_HANDLE,
            format!("handle {:#x} is not live", handle.as_raw()),
        )),
    }
}

/// Number of live handles of `kind` created on this thread.
pub fn live_handles(kind: HandleKind) -> usize {
    LIVE.with(|live| live.borrow().values().filter(|k| **k == kind).count())
}

/// Entry points called on this thread so far (error-slot reads excluded).
pub fn native_calls() -> u64 {
    CALLS.with(Cell::get)
}

/// Run the body of one entry point.
///
/// Clears the error slot, counts the call, and turns an error or a panic
/// into the error slot plus `fallback`.
pub fn enter<T>(name: &'static str, fallback: T, body: impl FnOnce() -> SimResult<T>) -> T {
    CALLS.with(|c| c.set(c.get() + 1));
    LAST_ERROR.with(|e| *e.borrow_mut() = None);
    let result = catch_unwind(AssertUnwindSafe(body))
        .unwrap_or_else(|_| Err(SimError::new(ERR_INTERNAL, format!("{name} panicked"))));
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(entry = name, code = err.code, message = %err.message, "simulated engine error");
            LAST_ERROR.with(|e| *e.borrow_mut() = Some(err));
            fallback
        }
    }
}

pub fn last_error_code() -> usize {
    LAST_ERROR.with(|e| e.borrow().as_ref().map_or(ERR_NONE, |err| err.code))
}

pub fn last_error_message() -> String {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|err| err.message.clone())
            .unwrap_or_default()
    })
}
