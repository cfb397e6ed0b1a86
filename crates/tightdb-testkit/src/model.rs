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

//! Data held by the simulated engine.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tightdb_sys as sys;

pub type SharedTable = Rc<RefCell<TableData>>;
pub type SharedSpec = Rc<RefCell<SpecData>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub ty: usize,
    /// Row layout of a sub-table column.
    pub sub: Option<SharedSpec>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SpecData {
    pub columns: Vec<ColumnSpec>,
}

impl SpecData {
    pub fn push(&mut self, ty: usize, name: &str) -> (usize, Option<SharedSpec>) {
        let sub = (ty == sys::TYPE_TABLE).then(|| Rc::new(RefCell::new(SpecData::default())));
        self.columns.push(ColumnSpec {
            name: name.to_string(),
            ty,
            sub: sub.clone(),
        });
        (self.columns.len() - 1, sub)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    fn deep_clone(&self) -> SpecData {
        SpecData {
            columns: self
                .columns
                .iter()
                .map(|c| ColumnSpec {
                    name: c.name.clone(),
                    ty: c.ty,
                    sub: c
                        .sub
                        .as_ref()
                        .map(|s| Rc::new(RefCell::new(s.borrow().deep_clone()))),
                })
                .collect(),
        }
    }
}

/// One cell. Mixed columns hold any variant; typed columns hold theirs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Bool(bool),
    String(String),
    Binary(Vec<u8>),
    Table(SharedTable),
    Date(i64),
    Float(f32),
    Double(f64),
}

impl Value {
    pub fn type_code(&self) -> usize {
        match self {
            Value::Int(_) => sys::TYPE_INT,
            Value::Bool(_) => sys::TYPE_BOOL,
            Value::String(_) => sys::TYPE_STRING,
            Value::Binary(_) => sys::TYPE_BINARY,
            Value::Table(_) => sys::TYPE_TABLE,
            Value::Date(_) => sys::TYPE_DATE,
            Value::Float(_) => sys::TYPE_FLOAT,
            Value::Double(_) => sys::TYPE_DOUBLE,
        }
    }

    pub fn type_name(&self) -> &'static str {
        type_name(self.type_code())
    }

    /// Fresh value for a new cell in a column of type `ty`.
    pub fn default_for(column: &ColumnSpec) -> Value {
        match column.ty {
            sys::TYPE_BOOL => Value::Bool(false),
            sys::TYPE_STRING => Value::String(String::new()),
            sys::TYPE_BINARY => Value::Binary(Vec::new()),
            sys::TYPE_TABLE => {
                let spec = column.sub.clone().unwrap_or_default();
                Value::Table(Rc::new(RefCell::new(TableData::with_spec(spec))))
            }
            sys::TYPE_DATE => Value::Date(0),
            sys::TYPE_FLOAT => Value::Float(0.0),
            sys::TYPE_DOUBLE => Value::Double(0.0),
            // Int and Mixed
            _ => Value::Int(0),
        }
    }

    fn deep_clone(&self) -> Value {
        match self {
            Value::Table(t) => Value::Table(Rc::new(RefCell::new(t.borrow().deep_clone()))),
            other => other.clone(),
        }
    }
}

pub fn type_name(code: usize) -> &'static str {
    match code {
        sys::TYPE_INT => "Int",
        sys::TYPE_BOOL => "Bool",
        sys::TYPE_STRING => "String",
        sys::TYPE_BINARY => "Binary",
        sys::TYPE_TABLE => "Table",
        sys::TYPE_MIXED => "Mixed",
        sys::TYPE_DATE => "Date",
        sys::TYPE_FLOAT => "Float",
        sys::TYPE_DOUBLE => "Double",
        _ => "unknown",
    }
}

pub fn is_known_type(code: usize) -> bool {
    type_name(code) != "unknown"
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TableData {
    pub spec: SharedSpec,
    pub rows: Vec<Vec<Value>>,
    pub indexed: Vec<usize>,
}

impl TableData {
    pub fn with_spec(spec: SharedSpec) -> TableData {
        let mut table = TableData {
            spec,
            rows: Vec::new(),
            indexed: Vec::new(),
        };
        table.sync_with_spec();
        table
    }

    pub fn new_row(&self) -> Vec<Value> {
        self.spec.borrow().columns.iter().map(Value::default_for).collect()
    }

    /// Give every row a cell for each column added to the spec since.
    pub fn sync_with_spec(&mut self) {
        let spec = self.spec.borrow();
        for row in &mut self.rows {
            for column in spec.columns.iter().skip(row.len()) {
                row.push(Value::default_for(column));
            }
        }
    }

    pub fn column_type(&self, column: usize) -> Option<usize> {
        self.spec.borrow().columns.get(column).map(|c| c.ty)
    }

    pub fn deep_clone(&self) -> TableData {
        TableData {
            spec: Rc::new(RefCell::new(self.spec.borrow().deep_clone())),
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(Value::deep_clone).collect())
                .collect(),
            indexed: self.indexed.clone(),
        }
    }
}

/// Serialized form of a group file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GroupFile {
    pub format: u32,
    pub tables: Vec<(String, SharedTable)>,
}

pub const GROUP_FORMAT: u32 = 1;
