// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{ScaleInfo, Size, TextAlignment, WritingDirection};

use super::utils::{assert_line_texts, test_name, TestEnv};

#[test]
fn justified_lines_fill_their_width() {
    let mut env = TestEnv::new(test_name!());
    env.paragraph_style_mut().alignment = TextAlignment::Justified;
    let shaped = env.shaped("aa bb cc dd");
    let typesetter = env.typesetter(&shaped);
    let mut layouter = env.layouter(&shaped, &typesetter);
    layouter.layout_and_scale(Size::new(70., 100.), env.options());

    assert_line_texts(&layouter, shaped.text(), &["aa bb ", "cc dd"], env.name());
    assert!(!layouter.need_to_justify_lines());
    let lines = layouter.lines();
    let justification = lines[0].justification().unwrap();
    assert_eq!(justification.gap_count, 1);
    assert_eq!(justification.extra_space_per_gap, 20.);
    assert_eq!(lines[0].width(), 70.);
    assert_eq!(lines[0].natural_width(), 50.);
    // The last line is start-aligned.
    assert_eq!(lines[1].justification(), None);
    assert_eq!(lines[1].x(), 0.);
}

#[test]
fn justification_is_idempotent() {
    let mut env = TestEnv::new(test_name!());
    env.paragraph_style_mut().alignment = TextAlignment::Justified;
    env.options_mut().justify_last_line = true;
    let shaped = env.shaped("aa bb cc dd");
    let typesetter = env.typesetter(&shaped);
    let mut layouter = env.layouter(&shaped, &typesetter);
    layouter.layout(Size::new(70., 100.), ScaleInfo::default(), 0, env.options());

    assert!(layouter.need_to_justify_lines());
    layouter.justify_lines_where_necessary();
    let once = layouter.lines().to_vec();
    layouter.justify_lines_where_necessary();
    assert_eq!(layouter.lines(), once.as_slice());
    assert_eq!(once[1].justification().unwrap().extra_space_per_gap, 20.);
}

#[test]
fn disabled_justification_leaves_lines_alone() {
    let mut env = TestEnv::new(test_name!());
    env.paragraph_style_mut().alignment = TextAlignment::Justified;
    env.options_mut().justification_enabled = false;
    let shaped = env.shaped("aa bb cc dd");
    let typesetter = env.typesetter(&shaped);
    let mut layouter = env.layouter(&shaped, &typesetter);
    layouter.layout_and_scale(Size::new(70., 100.), env.options());

    assert!(layouter.lines().iter().all(|line| line.justification().is_none()));
    assert_eq!(layouter.lines()[0].width(), 50.);
}

#[test]
fn right_to_left_justified_paragraphs_end_right() {
    let mut env = TestEnv::new(test_name!());
    env.paragraph_style_mut().alignment = TextAlignment::Justified;
    env.paragraph_style_mut().base_direction = WritingDirection::RightToLeft;
    let shaped = env.shaped("aa bb cc dd");
    let typesetter = env.typesetter(&shaped);
    let mut layouter = env.layouter(&shaped, &typesetter);
    layouter.layout_and_scale(Size::new(70., 100.), env.options());

    let lines = layouter.lines();
    assert_eq!(lines[0].x(), 0.);
    assert_eq!(lines[1].x(), 20.);
}
