// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_hyphenation;
mod test_justify;
mod test_snapshot;
mod utils;
