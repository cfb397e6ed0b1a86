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

//! Table schemas.
//!
//! The engine hands out two kinds of `Spec*`: the schema of a live table,
//! owned by that table, and the schema of a sub-table column, which the
//! caller owns and must deallocate. They are separate types here:
//! [`TableSpec`] borrows its table and has no release, [`Spec`] owns its
//! handle and releases it on drop.

use std::marker::PhantomData;
use std::sync::Arc;

use tightdb_sys::Handle;

use crate::datatype::DataType;
use crate::error::{Error, Result};
use crate::marshal::c_string;
use crate::native::{Native, Site};
use crate::resource::{Bound, ResourceKind};
use crate::table::Table;

pub(crate) mod sealed {
    use std::sync::Arc;

    use tightdb_sys::Handle;

    use crate::error::Result;
    use crate::native::Native;

    pub trait Sealed {
        fn spec_handle(&self) -> Result<Handle>;
        fn spec_native(&self) -> &Arc<Native>;
    }
}

use sealed::Sealed;

fn call<S, T>(spec: &S, site: Site, f: impl FnOnce(&tightdb_sys::SpecApi, Handle) -> T) -> Result<T>
where
    S: Sealed + ?Sized,
{
    let handle = spec.spec_handle()?;
    spec.spec_native().call(&site, |api| f(&api.spec, handle))
}

/// Read and extend an ordered list of `(name, type)` columns.
pub trait SpecOps: Sealed {
    fn column_count(&self) -> Result<u64> {
        call(self, Site::new(ResourceKind::Spec, "get_column_count"), |api, h| unsafe {
            (api.get_column_count)(h) as u64
        })
    }

    fn column_type(&self, column: u64) -> Result<DataType> {
        self.spec_handle()?;
        let c = self.spec_native().index("column", column)?;
        let code = call(
            self,
            Site::new(ResourceKind::Spec, "get_column_type").column(column),
            |api, h| unsafe { (api.get_column_type)(h, c) },
        )?;
        DataType::from_code(code)
    }

    fn column_name(&self, column: u64) -> Result<String> {
        let handle = self.spec_handle()?;
        let c = self.spec_native().index("column", column)?;
        self.spec_native().call_string(
            &Site::new(ResourceKind::Spec, "get_column_name").column(column),
            |api, buf, cap| unsafe { (api.spec.get_column_name)(handle, c, buf, cap) },
        )
    }

    /// Every column as `(name, type)`, in order.
    fn columns(&self) -> Result<Vec<(String, DataType)>> {
        let count = self.column_count()?;
        (0..count)
            .map(|c| Ok((self.column_name(c)?, self.column_type(c)?)))
            .collect()
    }

    fn add_column(&self, ty: DataType, name: &str) -> Result<u64> {
        let name = c_string("column name", name)?;
        let code = ty.code();
        let index = call(self, Site::new(ResourceKind::Spec, "add_column"), |api, h| unsafe {
            (api.add_column)(h, code, name.as_ptr())
        })?;
        Ok(index as u64)
    }

    /// Add a sub-table column and return the (owned) spec of its rows.
    fn add_subtable_column(&self, name: &str) -> Result<Spec> {
        let name = c_string("sub-table column name", name)?;
        let handle = call(
            self,
            Site::new(ResourceKind::Spec, "add_subtable_column"),
            |api, h| unsafe { (api.add_subtable_column)(h, name.as_ptr()) },
        )?;
        Spec::bind(self.spec_native().clone(), "add_subtable_column", handle)
    }

    /// The owned spec of a sub-table column. Other column types are rejected
    /// before the spec is requested.
    fn subtable_spec(&self, column: u64) -> Result<Spec> {
        let actual = self.column_type(column)?;
        if actual != DataType::Table {
            return Err(Error::NotSubtableColumn { column, actual });
        }
        let c = self.spec_native().index("column", column)?;
        let handle = call(
            self,
            Site::new(ResourceKind::Spec, "get_spec").column(column),
            |api, h| unsafe { (api.get_spec)(h, c) },
        )?;
        Spec::bind(self.spec_native().clone(), "get_spec", handle)
    }
}

// ---------------------------------------------------------------------------
// TableSpec: borrowed from a live table
// ---------------------------------------------------------------------------

/// The schema of a live table. Valid while the table is borrowed; never
/// released on its own.
#[derive(Debug)]
pub struct TableSpec<'t> {
    handle: Handle,
    native: Arc<Native>,
    _table: PhantomData<&'t Table>,
}

impl<'t> TableSpec<'t> {
    pub(crate) fn bind(table: &'t Table, handle: Handle) -> Result<Self> {
        if handle.is_null() {
            return Err(Error::NullHandle {
                kind: ResourceKind::Spec,
                op: "get_spec",
            });
        }
        Ok(TableSpec {
            handle,
            native: table.bound.native().clone(),
            _table: PhantomData,
        })
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }
}

impl Sealed for TableSpec<'_> {
    fn spec_handle(&self) -> Result<Handle> {
        Ok(self.handle)
    }

    fn spec_native(&self) -> &Arc<Native> {
        &self.native
    }
}

impl SpecOps for TableSpec<'_> {}

// ---------------------------------------------------------------------------
// Spec: independently owned
// ---------------------------------------------------------------------------

/// The schema of a sub-table column. Deallocated on release or drop.
#[derive(Debug)]
pub struct Spec {
    bound: Bound,
}

impl Spec {
    pub(crate) fn bind(native: Arc<Native>, op: &'static str, handle: Handle) -> Result<Spec> {
        Ok(Spec {
            bound: Bound::new(native, ResourceKind::Spec, op, handle)?,
        })
    }

    pub fn handle(&self) -> Handle {
        self.bound.handle()
    }

    pub fn is_released(&self) -> bool {
        self.bound.is_released()
    }

    pub fn release(&mut self) -> Result<()> {
        self.bound.release()
    }
}

impl Sealed for Spec {
    fn spec_handle(&self) -> Result<Handle> {
        self.bound.raw()
    }

    fn spec_native(&self) -> &Arc<Native> {
        self.bound.native()
    }
}

impl SpecOps for Spec {}
