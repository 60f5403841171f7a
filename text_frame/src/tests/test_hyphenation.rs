// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use crate::{ScaleInfo, Size, SoftHyphenSource};

use super::utils::{assert_lines_fit, test_name, TestEnv};

#[cfg(feature = "hyphenation")]
#[test]
fn loose_lines_are_hyphenated() {
    let mut env = TestEnv::new(test_name!());
    env.paragraph_style_mut().hyphenation_factor = Some(1.);
    let shaped = env.shaped("ab hyphenation");
    let typesetter = env.typesetter(&shaped);
    let mut layouter = env.layouter(&shaped, &typesetter);
    layouter.layout_and_scale(Size::new(100., 100.), env.options());

    assert_lines_fit(&layouter, env.name());
    let first = &layouter.lines()[0];
    assert_eq!(first.hyphen(), Some('-'));
    assert!(first.range_in_original_string().end > 3);
    assert_eq!(first.trailing_whitespace_len(), 0);
}

#[test]
fn hyphenation_factor_zero_disables_hyphenation() {
    let env = TestEnv::new(test_name!());
    let shaped = env.shaped("ab hyphenation");
    let typesetter = env.typesetter(&shaped);
    let mut layouter = env.layouter(&shaped, &typesetter);
    layouter.layout_and_scale(Size::new(100., 100.), env.options());

    let first = &layouter.lines()[0];
    assert_eq!(first.hyphen(), None);
    assert_eq!(first.range_in_original_string(), 0..3);
}

#[test]
fn soft_hyphens_hyphenate_lines() {
    let mut env = TestEnv::new(test_name!());
    env.options_mut().hyphenation_factor = 1.;
    env.options_mut().hyphenation_source = Some(Arc::new(SoftHyphenSource));
    let shaped = env.shaped("ab hy\u{ad}phen\u{ad}ation");
    let typesetter = env.typesetter(&shaped);
    let mut layouter = env.layouter(&shaped, &typesetter);
    layouter.layout_and_scale(Size::new(100., 100.), env.options());

    assert_lines_fit(&layouter, env.name());
    let first = &layouter.lines()[0];
    assert_eq!(first.hyphen(), Some('-'));
    assert_eq!(&shaped.text()[first.range_in_original_string()], "ab hy\u{ad}phen\u{ad}");
    assert_eq!(first.width(), 100.);
}

#[test]
fn estimate_with_hyphenation_opportunities_is_inaccurate() {
    let mut env = TestEnv::new(test_name!());
    env.options_mut().hyphenation_factor = 1.;
    env.options_mut().hyphenation_source = Some(Arc::new(SoftHyphenSource));
    let shaped = env.shaped("aaa bb\u{ad}bb ccc");
    let typesetter = env.typesetter(&shaped);
    {
        let mut layouter = env.layouter(&shaped, &typesetter);
        layouter.layout(Size::new(40., 20.), ScaleInfo::default(), 0, env.options());
        let estimate = layouter.estimate_scale_factor_needed_to_fit(20., 0, 0.25, 1. / 128.);
        assert!(!estimate.is_accurate, "{}", env.name());
        assert!((estimate.value - 0.5).abs() <= 1. / 128.);
    }

    env.options_mut().hyphenation_factor = 0.;
    let mut layouter = env.layouter(&shaped, &typesetter);
    layouter.layout(Size::new(40., 20.), ScaleInfo::default(), 0, env.options());
    let estimate = layouter.estimate_scale_factor_needed_to_fit(20., 0, 0.25, 1. / 128.);
    assert!(estimate.is_accurate, "{}", env.name());
}
