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

use std::path::Path;
use std::sync::Arc;

use tightdb_sys::Handle;

use crate::error::{Error, Result};
use crate::marshal::{bool_from_wire, c_string};
use crate::native::{Native, Site};
use crate::resource::{Bound, ResourceKind};
use crate::table::Table;

/// A named collection of tables, in memory or opened from a file.
///
/// The file format belongs to the engine; this type only names the path.
#[derive(Debug)]
pub struct Group {
    bound: Bound,
}

fn path_string(path: &Path) -> Result<std::ffi::CString> {
    let text = path
        .to_str()
        .ok_or_else(|| Error::InvalidPath(path.to_path_buf()))?;
    c_string("group path", text)
}

impl Group {
    pub(crate) fn in_memory(native: Arc<Native>) -> Result<Group> {
        let handle = native.call(&Site::new(ResourceKind::Group, "new_group"), |api| unsafe {
            (api.group.new_group)()
        })?;
        Self::bind(native, "new_group", handle)
    }

    pub(crate) fn open(native: Arc<Native>, path: &Path) -> Result<Group> {
        let c_path = path_string(path)?;
        let handle = native.call(&Site::new(ResourceKind::Group, "new_group_file"), |api| unsafe {
            (api.group.new_group_file)(c_path.as_ptr())
        })?;
        tracing::debug!(path = %path.display(), "opened group file");
        Self::bind(native, "new_group_file", handle)
    }

    fn bind(native: Arc<Native>, op: &'static str, handle: Handle) -> Result<Group> {
        Ok(Group {
            bound: Bound::new(native, ResourceKind::Group, op, handle)?,
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

    /// Persist every table to `path`.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let c_path = path_string(path.as_ref())?;
        self.bound
            .call(Site::new(ResourceKind::Group, "write"), |api, h| unsafe {
                (api.group.write)(h, c_path.as_ptr())
            })
    }

    /// The table called `name`, created empty if the group has none.
    pub fn table(&self, name: &str) -> Result<Table> {
        let c_name = c_string("table name", name)?;
        let handle = self
            .bound
            .call(Site::new(ResourceKind::Group, "get_table"), |api, h| unsafe {
                (api.group.get_table)(h, c_name.as_ptr())
            })?;
        Table::bind(self.bound.native().clone(), "get_table", handle)
    }

    pub fn has_table(&self, name: &str) -> Result<bool> {
        let c_name = c_string("table name", name)?;
        let raw = self
            .bound
            .call(Site::new(ResourceKind::Group, "has_table"), |api, h| unsafe {
                (api.group.has_table)(h, c_name.as_ptr())
            })?;
        Ok(bool_from_wire(raw))
    }
}
