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

//! Pointer-width selection between the two native entry-point sets.

use std::sync::OnceLock;

/// Which of the two native libraries a process talks to.
///
/// Both export the same catalogue; they differ only in the width of `size_t`
/// and of every handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbiWidth {
    /// 32-bit pointers, `tightdb_c_cs32`.
    Narrow,
    /// 64-bit pointers, `tightdb_c_cs64`.
    Wide,
}

impl AbiWidth {
    /// The width of the running process. Computed once and never changes.
    pub fn host() -> AbiWidth {
        static HOST: OnceLock<AbiWidth> = OnceLock::new();
        *HOST.get_or_init(|| {
            if std::mem::size_of::<usize>() == 8 {
                AbiWidth::Wide
            } else {
                AbiWidth::Narrow
            }
        })
    }

    #[inline]
    pub fn is_wide(self) -> bool {
        self == AbiWidth::Wide
    }

    /// Size in bytes of `size_t`, `Table*` and `char*` on this ABI.
    pub fn pointer_bytes(self) -> usize {
        match self {
            AbiWidth::Narrow => 4,
            AbiWidth::Wide => 8,
        }
    }

    /// Base name of the native library, without platform prefix/extension.
    pub fn library_name(self) -> &'static str {
        match self {
            AbiWidth::Narrow => "tightdb_c_cs32",
            AbiWidth::Wide => "tightdb_c_cs64",
        }
    }

    /// Largest column or row index that can cross the boundary.
    ///
    /// The narrow binding only supports 32-bit signed column and row counts.
    pub fn max_index(self) -> u64 {
        match self {
            AbiWidth::Narrow => i32::MAX as u64,
            AbiWidth::Wide => i64::MAX as u64,
        }
    }
}

impl std::fmt::Display for AbiWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbiWidth::Narrow => f.write_str("32-bit"),
            AbiWidth::Wide => f.write_str("64-bit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_matches_pointer_size() {
        let host = AbiWidth::host();
        assert_eq!(host.pointer_bytes(), std::mem::size_of::<usize>());
        assert_eq!(AbiWidth::host(), host);
    }

    #[test]
    fn library_names_differ_per_width() {
        assert_eq!(AbiWidth::Narrow.library_name(), "tightdb_c_cs32");
        assert_eq!(AbiWidth::Wide.library_name(), "tightdb_c_cs64");
    }

    #[test]
    fn narrow_index_limit_is_i32_max() {
        assert_eq!(AbiWidth::Narrow.max_index(), 2_147_483_647);
        assert!(AbiWidth::Wide.max_index() > AbiWidth::Narrow.max_index());
    }
}
