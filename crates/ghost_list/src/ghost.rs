use gpui::{Pixels, Point, SharedString, Size, point};
use tracing::trace;

use crate::model::{ItemList, ItemLayout, Side, move_element};

/// An inert placeholder standing in for one item while a drag is active.
#[derive(Clone, Debug, PartialEq)]
pub struct GhostItem {
    pub item_id: SharedString,
    /// Committed index of the item this ghost was cloned from.
    pub source_ix: usize,
    pub size: Size<Pixels>,
    center_y: Pixels,
}

impl GhostItem {
    pub fn center_y(&self) -> Pixels {
        self.center_y
    }

    /// Top-left corner when centered on (`center_x`, `center_y`).
    pub fn origin(&self, center_x: Pixels) -> Point<Pixels> {
        point(
            center_x - self.size.width / 2.,
            self.center_y - self.size.height / 2.,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapDirection {
    Up,
    Down,
}

/// The proposed order during a drag, kept apart from the committed
/// [`ItemList`]. Ghost order is always a permutation of item order.
#[derive(Debug, Default)]
pub struct GhostLayer {
    ghosts: Vec<GhostItem>,
    revealed: bool,
}

impl GhostLayer {
    /// Create one hidden ghost per item, centered where the item is laid out.
    ///
    /// Any ghosts from a previous drag are discarded first.
    pub fn spawn<T>(&mut self, items: &ItemList<T>, layout: &ItemLayout) {
        self.revealed = false;
        self.ghosts = items
            .items()
            .iter()
            .enumerate()
            .map(|(ix, item)| {
                let bounds = layout.item_bounds(ix).unwrap_or_default();
                GhostItem {
                    item_id: item.id.clone(),
                    source_ix: ix,
                    size: bounds.size,
                    center_y: bounds.center().y,
                }
            })
            .collect();
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn len(&self) -> usize {
        self.ghosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ghosts.is_empty()
    }

    pub fn ghosts(&self) -> &[GhostItem] {
        &self.ghosts
    }

    pub fn get(&self, ix: usize) -> Option<&GhostItem> {
        self.ghosts.get(ix)
    }

    pub fn reposition(&mut self, ix: usize, center_y: Pixels) -> bool {
        match self.ghosts.get_mut(ix) {
            Some(ghost) => {
                ghost.center_y = center_y;
                true
            }
            None => false,
        }
    }

    pub fn move_before(&mut self, ix: usize, reference: usize) -> Option<usize> {
        move_element(&mut self.ghosts, ix, reference, Side::Before)
    }

    pub fn move_after(&mut self, ix: usize, reference: usize) -> Option<usize> {
        move_element(&mut self.ghosts, ix, reference, Side::After)
    }

    /// Swap the ghost at `ix` with its neighbor in `direction`.
    ///
    /// The neighbor takes over the ghost's current center, the ghost moves to
    /// `target_center_y`, and the two trade places in the sequence. Returns the
    /// ghost's new index, or `None` when there is no neighbor on that side.
    pub fn swap_with_neighbor(
        &mut self,
        ix: usize,
        direction: SwapDirection,
        target_center_y: Pixels,
    ) -> Option<usize> {
        let neighbor = match direction {
            SwapDirection::Up => ix.checked_sub(1)?,
            SwapDirection::Down => ix.checked_add(1).filter(|&n| n < self.ghosts.len())?,
        };
        let old_center_y = self.ghosts.get(ix)?.center_y;

        self.reposition(neighbor, old_center_y);
        self.reposition(ix, target_center_y);
        match direction {
            SwapDirection::Up => self.move_before(ix, neighbor),
            SwapDirection::Down => self.move_after(ix, neighbor),
        }
    }

    /// Remove every ghost. Returns how many were removed; calling it on an
    /// empty layer is fine.
    pub fn teardown(&mut self) -> usize {
        let removed = self.ghosts.len();
        self.ghosts.clear();
        self.revealed = false;
        if removed > 0 {
            trace!(removed, "ghost layer torn down");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use gpui::{bounds, px, size};

    use super::*;
    use crate::model::GhostListItem;

    fn fixture() -> (ItemList<()>, ItemLayout) {
        let items = ItemList::new(vec![
            GhostListItem::new("A", "A", ()),
            GhostListItem::new("B", "B", ()),
            GhostListItem::new("C", "C", ()),
        ]);
        let layout = ItemLayout::from_item_bounds(
            (0..3).map(|ix| bounds(point(px(0.), px(ix as f32 * 50.)), size(px(200.), px(40.)))),
        );
        (items, layout)
    }

    fn order(layer: &GhostLayer) -> Vec<String> {
        layer.ghosts().iter().map(|g| g.item_id.to_string()).collect()
    }

    #[test]
    fn spawn_creates_one_ghost_per_item() {
        let (items, layout) = fixture();
        let mut layer = GhostLayer::default();
        layer.spawn(&items, &layout);

        assert_eq!(layer.len(), items.len());
        assert!(!layer.is_revealed());
        assert_eq!(order(&layer), vec!["A", "B", "C"]);
        assert_eq!(layer.get(1).map(GhostItem::center_y), Some(px(70.)));
        assert_eq!(layer.get(1).map(|g| g.origin(px(100.))), Some(point(px(0.), px(50.))));
    }

    #[test]
    fn swap_up_trades_position_and_slot() {
        let (items, layout) = fixture();
        let mut layer = GhostLayer::default();
        layer.spawn(&items, &layout);

        assert_eq!(layer.swap_with_neighbor(2, SwapDirection::Up, px(70.)), Some(1));
        assert_eq!(order(&layer), vec!["A", "C", "B"]);
        assert_eq!(layer.get(1).map(GhostItem::center_y), Some(px(70.)));
        assert_eq!(layer.get(2).map(GhostItem::center_y), Some(px(120.)));
        assert_eq!(layer.get(0).map(GhostItem::center_y), Some(px(20.)));
    }

    #[test]
    fn swap_past_either_end_is_refused() {
        let (items, layout) = fixture();
        let mut layer = GhostLayer::default();
        layer.spawn(&items, &layout);

        assert_eq!(layer.swap_with_neighbor(0, SwapDirection::Up, px(0.)), None);
        assert_eq!(layer.swap_with_neighbor(2, SwapDirection::Down, px(200.)), None);
        assert_eq!(order(&layer), vec!["A", "B", "C"]);
        assert_eq!(layer.get(0).map(GhostItem::center_y), Some(px(20.)));
    }

    #[test]
    fn teardown_is_idempotent() {
        let (items, layout) = fixture();
        let mut layer = GhostLayer::default();
        layer.spawn(&items, &layout);
        layer.reveal();

        assert_eq!(layer.teardown(), 3);
        assert_eq!(layer.teardown(), 0);
        assert!(layer.is_empty());
        assert!(!layer.is_revealed());
    }
}
