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

//! Locating and opening the native binding library.
//!
//! The library is opened with `libloading` and every entry point of the
//! catalogue is resolved up front. A missing required symbol fails the load,
//! so a half-populated [`EntryPoints`] table can never exist. The error slot
//! and the mixed string getters are optional: stock builds of the binding do
//! not export them.
//!
//! The entry-point set is always the host's ([`AbiWidth::host`]).

use std::path::{Path, PathBuf};

use libloading::Library;

use crate::abi::AbiWidth;
use crate::api::{
    EntryPoints, ErrorApi, GroupApi, ProbeApi, QueryApi, RowSetApi, SpecApi, TableApi, ViewApi,
};

/// Environment variable holding a full path to the native library.
pub const ENV_LIBRARY: &str = "TIGHTDB_NATIVE_LIB";
/// Environment variable holding an extra directory to search.
pub const ENV_DIR: &str = "TIGHTDB_NATIVE_DIR";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No candidate file exists for the library name.
    #[error("native library '{name}' not found (searched {} locations)", searched.len())]
    LibraryNotFound {
        name: String,
        searched: Vec<PathBuf>,
    },

    /// The file exists but the dynamic loader rejected it.
    #[error("failed to load native library {}: {source}", path.display())]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// The library does not export an entry point of the catalogue.
    #[error("symbol '{symbol}' not found in {}", library.display())]
    SymbolNotFound {
        library: PathBuf,
        symbol: String,
        #[source]
        source: libloading::Error,
    },
}

// ===== Configuration =====

/// Where to find the native library.
#[derive(Debug, Clone, Default)]
pub struct LoadConfig {
    /// Exact file to open. Skips the directory search when set.
    pub library: Option<PathBuf>,
    /// Directories searched before the current directory and system paths.
    pub search_dirs: Vec<PathBuf>,
}

impl LoadConfig {
    /// Defaults overridden by `TIGHTDB_NATIVE_LIB` and `TIGHTDB_NATIVE_DIR`.
    pub fn from_env() -> Self {
        let mut config = LoadConfig::default();
        if let Some(path) = std::env::var_os(ENV_LIBRARY).filter(|v| !v.is_empty()) {
            config.library = Some(PathBuf::from(path));
        }
        if let Some(dir) = std::env::var_os(ENV_DIR).filter(|v| !v.is_empty()) {
            config.search_dirs.push(PathBuf::from(dir));
        }
        config
    }

    pub fn with_library(mut self, path: impl Into<PathBuf>) -> Self {
        self.library = Some(path.into());
        self
    }

    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    /// Every directory the search visits, in order.
    pub fn search_path(&self) -> Vec<PathBuf> {
        let mut dirs = self.search_dirs.clone();
        if let Ok(cwd) = std::env::current_dir() {
            dirs.push(cwd);
        }
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            dirs.push(exe_dir);
        }

        #[cfg(target_os = "linux")]
        {
            dirs.push(PathBuf::from("/usr/local/lib"));
            dirs.push(PathBuf::from("/usr/lib"));
            if cfg!(target_pointer_width = "64") {
                dirs.push(PathBuf::from("/usr/lib64"));
            }
        }
        #[cfg(target_os = "macos")]
        {
            dirs.push(PathBuf::from("/usr/local/lib"));
            dirs.push(PathBuf::from("/opt/homebrew/lib"));
        }
        dirs
    }

    /// File names tried in each directory, platform convention first.
    pub fn candidate_file_names(&self) -> Vec<String> {
        let name = AbiWidth::host().library_name();
        let (prefixes, extensions): (&[&str], &[&str]) = if cfg!(target_os = "windows") {
            (&["", "lib"], &["dll"])
        } else if cfg!(target_os = "macos") {
            (&["lib", ""], &["dylib", "so"])
        } else {
            (&["lib", ""], &["so"])
        };

        let mut names = Vec::with_capacity(prefixes.len() * extensions.len());
        for prefix in prefixes {
            for ext in extensions {
                names.push(format!("{prefix}{name}.{ext}"));
            }
        }
        names
    }

    /// Resolve the configuration to one existing file.
    pub fn locate(&self) -> Result<PathBuf, LoadError> {
        if let Some(path) = &self.library {
            if path.is_file() {
                return Ok(path.clone());
            }
            return Err(LoadError::LibraryNotFound {
                name: path.display().to_string(),
                searched: vec![path.clone()],
            });
        }

        let names = self.candidate_file_names();
        let mut searched = Vec::new();
        for dir in self.search_path() {
            for file in &names {
                let candidate = dir.join(file);
                if candidate.is_file() {
                    return Ok(candidate);
                }
                searched.push(candidate);
            }
        }
        Err(LoadError::LibraryNotFound {
            name: AbiWidth::host().library_name().to_string(),
            searched,
        })
    }
}

// ===== Symbol resolution =====

struct Resolver<'a> {
    library: &'a Library,
    path: &'a Path,
}

impl Resolver<'_> {
    /// Copy a function pointer out of the library.
    ///
    /// # Safety
    /// `T` must be the exact C signature of `symbol`.
    unsafe fn get<T: Copy>(&self, symbol: &str) -> Result<T, LoadError> {
        let sym = unsafe { self.library.get::<T>(symbol.as_bytes()) }.map_err(|source| {
            LoadError::SymbolNotFound {
                library: self.path.to_path_buf(),
                symbol: symbol.to_string(),
                source,
            }
        })?;
        Ok(*sym)
    }

    /// Like [`Resolver::get`], but a missing symbol is `None`.
    ///
    /// # Safety
    /// `T` must be the exact C signature of `symbol`.
    unsafe fn optional<T: Copy>(&self, symbol: &str) -> Option<T> {
        match unsafe { self.library.get::<T>(symbol.as_bytes()) } {
            Ok(sym) => Some(*sym),
            Err(_) => {
                tracing::debug!(symbol, library = %self.path.display(), "optional symbol not exported");
                None
            }
        }
    }
}

/// Build one api struct, resolving `<prefix><field>` unless a field names
/// its symbol explicitly with `=> "symbol"`. Fields listed under `optional`
/// are `Option`s and never fail the load.
macro_rules! resolve_table {
    (@sym $prefix:expr, $field:ident) => {
        format!("{}{}", $prefix, stringify!($field))
    };
    (@sym $prefix:expr, $field:ident, $sym:expr) => {
        String::from($sym)
    };
    (
        $r:expr, $ty:ident, $prefix:expr,
        { $($field:ident $(=> $sym:expr)?),* $(,)? }
        $(optional { $($opt:ident),* $(,)? })?
    ) => {
        $ty {
            $( $field: unsafe { $r.get(&resolve_table!(@sym $prefix, $field $(, $sym)?))? }, )*
            $($( $opt: unsafe { $r.optional(&resolve_table!(@sym $prefix, $opt)) }, )*)?
        }
    };
}

/// The wide library exports the mixed string setter with a doubled
/// underscore; the narrow one does not.
fn mixed_string_setter(abi: AbiWidth) -> &'static str {
    match abi {
        AbiWidth::Wide => "set__mixed_string",
        AbiWidth::Narrow => "set_mixed_string",
    }
}

fn resolve_row_set(r: &Resolver<'_>, prefix: &str) -> Result<RowSetApi, LoadError> {
    Ok(resolve_table!(r, RowSetApi, prefix, {
        size,
        get_column_count,
        get_column_name,
        get_column_type,
        get_column_index,
        get_int,
        set_int,
        get_bool,
        set_bool,
        get_float,
        set_float,
        get_double,
        set_double,
        get_date,
        set_date,
        get_string,
        set_string,
        get_subtable,
        get_mixed_type,
        get_mixed_int,
        get_mixed_bool,
        get_mixed_float,
        get_mixed_double,
        get_mixed_date,
        set_mixed_int,
        set_mixed_bool,
        set_mixed_float,
        set_mixed_double,
        set_mixed_date,
        set_mixed_string => format!("{prefix}{}", mixed_string_setter(AbiWidth::host())),
        set_mixed_subtable,
        set_mixed_empty_subtable,
        find_first_int,
        find_first_string,
        find_first_binary,
        find_first_double,
        find_first_float,
        find_first_date,
        find_first_bool,
        find_all_int,
        find_all_string,
        count_int,
        count_float,
        count_double,
        count_string,
        sum_int,
        sum_float,
        sum_double,
        maximum_int,
        maximum_float,
        maximum_double,
        minimum_int,
        minimum_float,
        minimum_double,
        average_int,
        average_float,
        average_double,
    } optional {
        get_mixed_string,
    }))
}

/// Both halves of the error slot, or neither.
fn resolve_error_slot(r: &Resolver<'_>) -> Option<ErrorApi> {
    let last_error_code = unsafe { r.optional("last_error_code")? };
    let last_error_message = unsafe { r.optional("last_error_message")? };
    Some(ErrorApi {
        last_error_code,
        last_error_message,
    })
}

fn resolve_entry_points(r: &Resolver<'_>) -> Result<EntryPoints, LoadError> {
    Ok(EntryPoints {
        version: unsafe { r.get("tightdb_c_cs_getver")? },
        error: resolve_error_slot(r),
        table_rows: resolve_row_set(r, "table_")?,
        view_rows: resolve_row_set(r, "tableview_")?,
        table: resolve_table!(r, TableApi, "table_", {
            new_table => "new_table",
            unbind => "unbind_table_ref",
            add_column,
            rename_column,
            remove_column,
            remove_row,
            get_spec,
            update_from_spec,
            insert_empty_row,
            add_empty_row,
            insert_int,
            set_index,
            distinct,
            where_ => "table_where",
        }),
        view: resolve_table!(r, ViewApi, "tableview_", {
            delete,
            remove_row => "tableview_remove",
        }),
        group: resolve_table!(r, GroupApi, "group_", {
            new_group => "new_group",
            new_group_file => "new_group_file",
            write,
            delete,
            get_table,
            has_table,
        }),
        query: resolve_table!(r, QueryApi, "query_", {
            delete,
            find_all,
            find_next,
            average,
            get_column_index,
            bool_equal,
            int_between,
        }),
        spec: resolve_table!(r, SpecApi, "spec_", {
            deallocate,
            add_column,
            add_subtable_column,
            get_spec,
            get_column_count,
            get_column_type,
            get_column_name,
        }),
        probe: resolve_table!(r, ProbeApi, "test_", {
            sizeof_size_t => "test_sizeofsize_t",
            sizeof_int32_t => "test_sizeofint32_t",
            sizeof_table_pointer => "test_sizeoftablepointer",
            sizeof_char_pointer => "test_sizeofcharpointer",
            sizeof_int64_t => "test_sizeofint64_t",
            sizeof_float => "test_sizeoffloat",
            sizeof_double => "test_sizeofdouble",
            sizeof_time_t => "test_sizeoftime_t",
            get_five_parameters => "test_get_five_parametres",
            float_max,
            float_min,
            float_return,
            double_max,
            double_min,
            double_return,
            int64_max => "test_int64_t_max",
            int64_min => "test_int64_t_min",
            int64_return => "test_int64_t_return",
            size_t_max,
            size_t_min,
            size_t_return,
            return_datatype,
            return_bool,
            return_true_bool,
            return_false_bool,
            increment_integer,
        }),
    })
}

// ===== Loaded library =====

/// An opened native library together with its resolved catalogue.
///
/// The function pointers in [`EntryPoints`] are only valid while the
/// `Library` is loaded; keep them together or use [`NativeLibrary::into_parts`].
pub struct NativeLibrary {
    library: Library,
    path: PathBuf,
    entry_points: EntryPoints,
}

impl NativeLibrary {
    /// Locate, open and resolve every entry point.
    ///
    /// Loading runs the library's initialisers; only point this at a trusted
    /// build of the TightDB binding.
    pub fn open(config: &LoadConfig) -> Result<NativeLibrary, LoadError> {
        let path = config.locate()?;
        tracing::debug!(path = %path.display(), abi = %AbiWidth::host(), "opening native library");

        let library = unsafe { Library::new(&path) }.map_err(|source| LoadError::LoadFailed {
            path: path.clone(),
            source,
        })?;

        let entry_points = {
            let resolver = Resolver {
                library: &library,
                path: &path,
            };
            resolve_entry_points(&resolver)?
        };
        if entry_points.error.is_none() {
            tracing::info!(path = %path.display(), "library has no error slot; engine failures go unreported");
        }

        Ok(NativeLibrary {
            library,
            path,
            entry_points,
        })
    }

    pub fn entry_points(&self) -> &EntryPoints {
        &self.entry_points
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Split into the library (which must outlive every call) and the table.
    pub fn into_parts(self) -> (Library, EntryPoints) {
        (self.library, self.entry_points)
    }
}

impl std::fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeLibrary")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
