// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod asserts;
mod env;

pub(crate) use asserts::{assert_layouts_eq, assert_line_texts, assert_lines_fit};
pub(crate) use env::{CountingTypesetter, TestEnv, FONT_SIZE};

/// Expands to the name of the enclosing function.
macro_rules! test_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            core::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let name = &name[..name.len() - 3];
        &name[name.rfind(':').map_or(0, |x| x + 1)..]
    }};
}

pub(crate) use test_name;
