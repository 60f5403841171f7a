// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{SavedLayout, ScaleInfo, Size, TruncationToken};

use super::utils::{assert_layouts_eq, test_name, TestEnv};

#[test]
fn save_and_restore_round_trip() {
    let mut env = TestEnv::new(test_name!());
    env.options_mut().max_line_count = 2;
    env.options_mut().truncation_token = Some(TruncationToken::new("~"));
    let shaped = env.shaped("aaa bbb ccc ddd");
    let typesetter = env.typesetter(&shaped);

    let mut reference = env.layouter(&shaped, &typesetter);
    reference.layout(Size::new(40., 100.), ScaleInfo::default(), 2, env.options());

    let mut layouter = env.layouter(&shaped, &typesetter);
    layouter.layout(Size::new(40., 100.), ScaleInfo::default(), 2, env.options());
    let mut saved = SavedLayout::new();
    assert!(saved.is_empty());
    layouter.save_layout_to(&mut saved);
    assert!(!saved.is_empty());

    layouter.layout(
        Size::new(160., 200.),
        ScaleInfo::with_scale(0.5),
        0,
        env.options(),
    );
    assert_eq!(layouter.lines().len(), 1);

    layouter.restore_layout_from(saved);
    assert_layouts_eq(&layouter, &reference, env.name());
    assert_eq!(layouter.lines().len(), 2);
    assert!(layouter.lines()[1].has_truncation_token());
}

#[test]
fn saving_twice_keeps_the_latest_layout() {
    let env = TestEnv::new(test_name!());
    let shaped = env.shaped("aaa bbb");
    let typesetter = env.typesetter(&shaped);
    let mut layouter = env.layouter(&shaped, &typesetter);
    let mut saved = SavedLayout::default();

    layouter.layout(Size::new(40., 100.), ScaleInfo::default(), 0, env.options());
    layouter.save_layout_to(&mut saved);
    layouter.layout(Size::new(100., 100.), ScaleInfo::default(), 0, env.options());
    layouter.save_layout_to(&mut saved);
    layouter.layout(Size::new(40., 100.), ScaleInfo::default(), 0, env.options());
    assert_eq!(layouter.lines().len(), 2);

    layouter.restore_layout_from(saved);
    assert_eq!(layouter.lines().len(), 1);
    assert_eq!(layouter.inversely_scaled_frame_size(), Size::new(100., 100.));
}
