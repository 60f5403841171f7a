// Copyright 2026 the Text Frame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::typesetter::Typesetter;

use super::{LayoutState, Ownership, TextFrameLayouter};

/// A snapshot of a layout, used to go back to an earlier result.
///
/// Snapshots can only be moved, and restoring one consumes it.
#[derive(Debug)]
pub struct SavedLayout<L> {
    data: Option<Box<(LayoutState<L>, Ownership)>>,
}

impl<L> SavedLayout<L> {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self { data: None }
    }

    /// Returns `true` if nothing was saved into the snapshot.
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }
}

impl<L> Default for SavedLayout<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Typesetter> TextFrameLayouter<'_, T> {
    /// Copies the current layout into `saved`, replacing its contents.
    pub fn save_layout_to(&self, saved: &mut SavedLayout<T::Line>) {
        debug_assert!(!self.is_cancelled, "the layouter was cancelled");
        match &mut saved.data {
            Some(data) => {
                data.0.clone_from(&self.state);
                data.1 = self.ownership;
            }
            None => saved.data = Some(Box::new((self.state.clone(), self.ownership))),
        }
    }

    /// Replaces the current layout with the one in `saved`.
    ///
    /// Restoring an empty snapshot has no effect.
    pub fn restore_layout_from(&mut self, saved: SavedLayout<T::Line>) {
        debug_assert!(!self.is_cancelled, "the layouter was cancelled");
        if let Some(data) = saved.data {
            let (state, ownership) = *data;
            self.state = state;
            self.ownership = ownership;
        }
    }
}
