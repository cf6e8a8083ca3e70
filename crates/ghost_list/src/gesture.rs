use std::mem;

use gpui::{Pixels, Point, SharedString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::ghost::{GhostLayer, SwapDirection};
use crate::model::{ItemLayout, ItemList};
use crate::preview::{DragPreview, RevealToken};

/// Which input modality drives a drag.
///
/// Mouse drags re-evaluate every time the pointer enters an item. Touch
/// drags resolve the item under the touch point and skip repeats of the
/// current drop target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSource {
    #[default]
    Mouse,
    Touch,
}

/// A committed reorder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GhostListReorder {
    pub item_id: SharedString,
    /// Index before the commit.
    pub from: usize,
    /// Index after the commit.
    pub to: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveDrag {
    pub source: InputSource,
    pub drag_target: SharedString,
    pub drop_target: Option<SharedString>,
    /// Current index of the dragged item's ghost in the ghost layer.
    pub dragging_ghost: usize,
    /// Item under the dragged pointer, `None` over a gap or outside the rows.
    pub hovered: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Not dragging, the candidate is not an item, or a touch repeat.
    Ignored,
    /// Drop target updated, ghosts already in place.
    Unchanged,
    /// The dragging ghost swapped with an adjacent ghost.
    Swapped { from: usize, to: usize },
    /// The swap would run past an end of the ghost sequence.
    ///
    /// The ghosts keep their order but the drop target still moves, so the
    /// committed order on release can differ from the ghost order shown.
    Clamped,
}

/// Per-list drag controller. Owns the ghost layer and the drag preview; the
/// committed [`ItemList`] and measured [`ItemLayout`] are passed in.
#[derive(Debug, Default)]
pub struct GestureMachine {
    state: GestureState,
    ghosts: GhostLayer,
    preview: DragPreview,
}

impl GestureMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        match &self.state {
            GestureState::Dragging(drag) => Some(drag),
            GestureState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active().is_some()
    }

    pub fn is_drag_target(&self, item_id: &str) -> bool {
        self.active()
            .is_some_and(|drag| drag.drag_target.as_ref() == item_id)
    }

    pub fn is_drop_target(&self, item_id: &str) -> bool {
        self.active()
            .and_then(|drag| drag.drop_target.as_ref())
            .is_some_and(|id| id.as_ref() == item_id)
    }

    pub fn ghosts(&self) -> &GhostLayer {
        &self.ghosts
    }

    pub fn preview(&self) -> &DragPreview {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut DragPreview {
        &mut self.preview
    }

    /// Begin dragging the item at `ix`.
    ///
    /// Returns the token that reveals the preview on a later tick, or `None`
    /// when a drag is already active or `ix` is not an item.
    pub fn start<T>(
        &mut self,
        source: InputSource,
        ix: usize,
        items: &ItemList<T>,
        layout: &ItemLayout,
    ) -> Option<RevealToken> {
        if self.is_dragging() {
            trace!(ix, "drag start ignored, a drag is already active");
            return None;
        }
        let item = items.get(ix)?;

        let bounds = layout.item_bounds(ix).unwrap_or_default();
        let token = self.preview.show(ix, bounds.size, bounds.center().y);

        self.ghosts.spawn(items, layout);
        self.ghosts.reveal();

        debug!(?source, item_id = %item.id, ix, "drag started");
        self.state = GestureState::Dragging(ActiveDrag {
            source,
            drag_target: item.id.clone(),
            drop_target: None,
            dragging_ghost: ix,
            hovered: Some(ix),
        });
        Some(token)
    }

    pub fn reveal_preview(&mut self, token: RevealToken) -> bool {
        self.is_dragging() && self.preview.reveal(token)
    }

    /// Track the hovered item while idle so the next reveal starts in place.
    pub fn hover(&mut self, ix: usize, layout: &ItemLayout) {
        if self.is_dragging() {
            return;
        }
        if let Some(center_y) = layout.center_y(ix) {
            self.preview.move_to(center_y);
        }
    }

    /// Mouse path: the pointer entered the item at `ix`.
    pub fn drag_enter<T>(
        &mut self,
        ix: usize,
        items: &ItemList<T>,
        layout: &ItemLayout,
    ) -> MoveOutcome {
        self.move_to_candidate(InputSource::Mouse, ix, items, layout)
    }

    /// Mouse path: the dragged pointer moved and is now over `hovered`.
    ///
    /// Only a change of hovered item counts as an enter. Passing over a gap
    /// clears it, so coming back to the same item enters it again.
    pub fn drag_over<T>(
        &mut self,
        hovered: Option<usize>,
        items: &ItemList<T>,
        layout: &ItemLayout,
    ) -> MoveOutcome {
        let GestureState::Dragging(drag) = &mut self.state else {
            return MoveOutcome::Ignored;
        };
        if drag.hovered == hovered {
            return MoveOutcome::Ignored;
        }
        drag.hovered = hovered;
        match hovered {
            Some(ix) => self.drag_enter(ix, items, layout),
            None => MoveOutcome::Ignored,
        }
    }

    /// Touch path: the touch point moved to `position`.
    pub fn touch_move<T>(
        &mut self,
        position: Point<Pixels>,
        items: &ItemList<T>,
        layout: &ItemLayout,
    ) -> MoveOutcome {
        if !self.is_dragging() {
            return MoveOutcome::Ignored;
        }
        let Some(ix) = layout.hit_test(position) else {
            return MoveOutcome::Ignored;
        };
        self.move_to_candidate(InputSource::Touch, ix, items, layout)
    }

    fn move_to_candidate<T>(
        &mut self,
        source: InputSource,
        candidate: usize,
        items: &ItemList<T>,
        layout: &ItemLayout,
    ) -> MoveOutcome {
        let GestureState::Dragging(drag) = &mut self.state else {
            return MoveOutcome::Ignored;
        };
        let Some(item) = items.get(candidate) else {
            return MoveOutcome::Ignored;
        };
        if source == InputSource::Touch && drag.drop_target.as_ref() == Some(&item.id) {
            return MoveOutcome::Ignored;
        }

        drag.drop_target = Some(item.id.clone());
        let Some(candidate_y) = layout.center_y(candidate) else {
            return MoveOutcome::Unchanged;
        };
        self.preview.move_to(candidate_y);

        let Some(ghost_y) = self.ghosts.get(drag.dragging_ghost).map(|g| g.center_y()) else {
            return MoveOutcome::Unchanged;
        };
        let direction = if ghost_y > candidate_y {
            SwapDirection::Up
        } else if ghost_y < candidate_y {
            SwapDirection::Down
        } else {
            return MoveOutcome::Unchanged;
        };

        let from = drag.dragging_ghost;
        match self
            .ghosts
            .swap_with_neighbor(from, direction, candidate_y)
        {
            Some(to) => {
                drag.dragging_ghost = to;
                debug!(?direction, from, to, "dragging ghost swapped");
                MoveOutcome::Swapped { from, to }
            }
            None => {
                debug!(?direction, from, "dragging ghost already at the edge");
                MoveOutcome::Clamped
            }
        }
    }

    /// End the drag (drag end or touch end) and commit the move if the
    /// pointer settled on another item.
    pub fn finish<T>(&mut self, items: &mut ItemList<T>) -> Option<GhostListReorder> {
        let state = mem::take(&mut self.state);
        self.preview.hide();
        self.ghosts.teardown();

        let GestureState::Dragging(drag) = state else {
            return None;
        };
        let drop_target = drag.drop_target?;

        let from = items.index_of(&drag.drag_target)?;
        let reference = items.index_of(&drop_target)?;
        let to = if from > reference {
            items.move_before(from, reference)?
        } else if from < reference {
            items.move_after(from, reference)?
        } else {
            return None;
        };

        info!(item_id = %drag.drag_target, from, to, "reorder committed");
        Some(GhostListReorder {
            item_id: drag.drag_target,
            from,
            to,
        })
    }

    /// A drop landed outside the list. Ghosts are removed either way; the
    /// move still commits if an earlier move had set a drop target.
    pub fn drop_outside<T>(&mut self, items: &mut ItemList<T>) -> Option<GhostListReorder> {
        if self.ghosts.teardown() > 0 {
            debug!("drop outside the list");
        }
        self.finish(items)
    }

    /// Settle a mouse drag that the platform no longer reports, as when it was
    /// dropped on another window. Touch drags end on their own release.
    pub fn release_abandoned<T>(
        &mut self,
        platform_drag_active: bool,
        items: &mut ItemList<T>,
    ) -> Option<GhostListReorder> {
        let abandoned = !platform_drag_active
            && self
                .active()
                .is_some_and(|drag| drag.source == InputSource::Mouse);
        if !abandoned {
            return None;
        }
        debug!("drag ended without a drop on the list");
        self.drop_outside(items)
    }

    /// Drop the current drag without committing.
    pub fn abort(&mut self) {
        if let GestureState::Dragging(drag) = mem::take(&mut self.state) {
            debug!(item_id = %drag.drag_target, "drag aborted");
        }
        self.preview.hide();
        self.ghosts.teardown();
    }
}
