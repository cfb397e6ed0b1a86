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

//! Ownership of one native handle.
//!
//! Every owning wrapper embeds a [`Bound`]. It is the only place a handle is
//! released, and the only place that knows which destructor belongs to which
//! kind of resource.

use std::marker::PhantomData;
use std::sync::Arc;

use tightdb_sys::{EntryPoints, Handle};

use crate::error::{Error, Result};
use crate::native::{Native, Site};

/// The five kinds of native object a handle can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Table,
    TableView,
    Group,
    Query,
    Spec,
}

impl ResourceKind {
    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Table => "table",
            ResourceKind::TableView => "tableview",
            ResourceKind::Group => "group",
            ResourceKind::Query => "query",
            ResourceKind::Spec => "spec",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Destroy a handle of the given kind.
///
/// Tables are reference counted natively and are unbound; every other kind
/// has a single owner and is deleted.
fn destroy(api: &EntryPoints, kind: ResourceKind, handle: Handle) {
    // SAFETY: `handle` was produced by this catalogue for `kind` and is
    // released at most once (the caller has already nulled its copy).
    unsafe {
        match kind {
            ResourceKind::Table => (api.table.unbind)(handle),
            ResourceKind::TableView => (api.view.delete)(handle),
            ResourceKind::Group => (api.group.delete)(handle),
            ResourceKind::Query => (api.query.delete)(handle),
            ResourceKind::Spec => (api.spec.deallocate)(handle),
        }
    }
}

/// A handle this process is responsible for releasing.
///
/// `Unbound` is not representable: construction fails on a null handle.
/// After [`Bound::release`] the handle is null and every operation returns
/// [`Error::Released`] without calling into the engine.
pub struct Bound {
    handle: Handle,
    kind: ResourceKind,
    native: Arc<Native>,
    // *mut () keeps wrappers on the thread that created them
    _not_send_sync: PhantomData<*mut ()>,
}

impl Bound {
    pub(crate) fn new(
        native: Arc<Native>,
        kind: ResourceKind,
        op: &'static str,
        handle: Handle,
    ) -> Result<Bound> {
        if handle.is_null() {
            return Err(Error::NullHandle { kind, op });
        }
        tracing::debug!(%kind, handle = handle.as_raw(), "bound");
        Ok(Bound {
            handle,
            kind,
            native,
            _not_send_sync: PhantomData,
        })
    }

    #[inline]
    pub(crate) fn kind(&self) -> ResourceKind {
        self.kind
    }

    #[inline]
    pub(crate) fn native(&self) -> &Arc<Native> {
        &self.native
    }

    #[inline]
    pub(crate) fn handle(&self) -> Handle {
        self.handle
    }

    #[inline]
    pub(crate) fn is_released(&self) -> bool {
        self.handle.is_null()
    }

    /// The live handle, or `Released`.
    #[inline]
    pub(crate) fn raw(&self) -> Result<Handle> {
        if self.handle.is_null() {
            return Err(Error::Released { kind: self.kind });
        }
        Ok(self.handle)
    }

    pub(crate) fn index(&self, what: &'static str, value: u64) -> Result<usize> {
        self.native.index(what, value)
    }

    /// Check the handle is live, then make one checked call with it.
    pub(crate) fn call<T>(
        &self,
        site: Site,
        f: impl FnOnce(&EntryPoints, Handle) -> T,
    ) -> Result<T> {
        let handle = self.raw()?;
        self.native.call(&site, |api| f(api, handle))
    }

    pub(crate) fn call_string(
        &self,
        site: Site,
        mut f: impl FnMut(&EntryPoints, Handle, *mut std::os::raw::c_char, usize) -> usize,
    ) -> Result<String> {
        let handle = self.raw()?;
        self.native
            .call_string(&site, |api, buf, cap| f(api, handle, buf, cap))
    }

    /// Issue the kind's destructor once and null the handle.
    pub(crate) fn release(&mut self) -> Result<()> {
        let handle = self.raw()?;
        self.handle = Handle::NULL;
        tracing::debug!(kind = %self.kind, handle = handle.as_raw(), "release");
        let kind = self.kind;
        self.native
            .call(&Site::new(kind, "release"), |api| destroy(api, kind, handle))
    }
}

impl Drop for Bound {
    fn drop(&mut self) {
        if self.is_released() {
            return;
        }
        if let Err(err) = self.release() {
            tracing::warn!(kind = %self.kind, error = %err, "release on drop failed");
        }
    }
}

impl std::fmt::Debug for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bound")
            .field("kind", &self.kind)
            .field("handle", &self.handle.as_raw())
            .finish()
    }
}
