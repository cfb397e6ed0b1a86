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

use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;

use tightdb_sys::{AbiWidth, EntryPoints, LoadConfig, NativeLibrary};

use crate::error::Result;
use crate::group::Group;
use crate::native::{Native, Site};
use crate::resource::ResourceKind;
use crate::selftest;
use crate::table::Table;

/// Entry point to the engine: a bound catalogue that passed the interop
/// self-test.
///
/// Every wrapper created from a `Context` keeps the catalogue (and the loaded
/// library) alive, so wrappers may outlive the `Context` value itself.
pub struct Context {
    native: Arc<Native>,
    checks: Vec<&'static str>,
    // *mut () makes Context !Send + !Sync; the boundary is single-threaded
    _not_send_sync: PhantomData<*mut ()>,
}

impl Context {
    /// Open the native library described by `config` and verify it. The
    /// entry-point set is always the host's.
    pub fn load(config: &LoadConfig) -> Result<Context> {
        let abi = AbiWidth::host();
        let library = NativeLibrary::open(config)?;
        tracing::info!(path = %library.path().display(), %abi, "native library loaded");
        let (library, api) = library.into_parts();
        Self::start(Native::new(abi, api, Some(library)))
    }

    /// [`Context::load`] with [`LoadConfig::from_env`].
    pub fn from_env() -> Result<Context> {
        Self::load(&LoadConfig::from_env())
    }

    /// Use a catalogue that is already in the process, such as an in-process
    /// engine. The self-test still runs.
    pub fn with_entry_points(api: EntryPoints) -> Result<Context> {
        Self::start(Native::new(AbiWidth::host(), api, None))
    }

    /// Test support: treat `api` as a library built for `abi` instead of the
    /// host width. Index limits follow `abi`.
    #[doc(hidden)]
    pub fn with_simulated_abi(abi: AbiWidth, api: EntryPoints) -> Result<Context> {
        Self::start(Native::new(abi, api, None))
    }

    fn start(native: Native) -> Result<Context> {
        let checks = selftest::run(&native)?;
        Ok(Context {
            native: Arc::new(native),
            checks,
            _not_send_sync: PhantomData,
        })
    }

    pub fn abi(&self) -> AbiWidth {
        self.native.abi()
    }

    /// Version number reported by the native binding.
    pub fn native_version(&self) -> usize {
        self.native.version()
    }

    /// Names of the interop checks that passed at startup, in order.
    pub fn interop_checks(&self) -> &[&'static str] {
        &self.checks
    }

    /// A new, empty, free-standing table.
    pub fn new_table(&self) -> Result<Table> {
        let handle = self
            .native
            .call(&Site::new(ResourceKind::Table, "new_table"), |api| unsafe {
                (api.table.new_table)()
            })?;
        Table::bind(self.native.clone(), "new_table", handle)
    }

    /// A new in-memory group.
    pub fn new_group(&self) -> Result<Group> {
        Group::in_memory(self.native.clone())
    }

    /// Open a group previously written with [`Group::write`].
    pub fn open_group(&self, path: impl AsRef<Path>) -> Result<Group> {
        Group::open(self.native.clone(), path.as_ref())
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("native", &self.native)
            .field("checks", &self.checks.len())
            .finish()
    }
}
