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

//! Opt-in, process-wide record of every foreign call.
//!
//! Disabled by default. When disabled the only cost per call is one relaxed
//! atomic load; when enabled, call sites append under a mutex so lines from
//! different threads never interleave.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{const_mutex, Mutex};

static ENABLED: AtomicBool = AtomicBool::new(false);
static BUFFER: Mutex<String> = const_mutex(String::new());

/// Start recording. Clears anything recorded earlier and writes `marker` as
/// the first line.
pub fn enable(marker: &str) {
    let mut buf = BUFFER.lock();
    buf.clear();
    buf.push_str(marker);
    buf.push('\n');
    ENABLED.store(true, Ordering::Release);
}

/// Stop recording. The buffer is kept until the next `enable`.
pub fn disable() {
    ENABLED.store(false, Ordering::Release);
}

#[inline]
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn contents() -> String {
    BUFFER.lock().clone()
}

pub fn save_file(path: impl AsRef<Path>) -> std::io::Result<()> {
    let snapshot = contents();
    std::fs::write(path, snapshot)
}

/// Append one line. `line` is only evaluated when recording.
#[inline]
pub(crate) fn record(line: impl FnOnce(&mut String)) {
    if !is_enabled() {
        return;
    }
    let mut buf = BUFFER.lock();
    line(&mut buf);
    buf.push('\n');
}

pub(crate) fn record_call(
    kind: &dyn std::fmt::Display,
    op: &str,
    column: Option<u64>,
    row: Option<u64>,
) {
    record(|buf| {
        let _ = write!(buf, "{kind}.{op}");
        if let Some(c) = column {
            let _ = write!(buf, " col={c}");
        }
        if let Some(r) = row {
            let _ = write!(buf, " row={r}");
        }
    });
}
