use gpui::{Bounds, Pixels, Point, SharedString};

/// A single item in a [`GhostListState`](crate::GhostListState).
#[derive(Clone)]
pub struct GhostListItem<T> {
    pub id: SharedString,
    pub label: SharedString,
    pub data: T,
}

impl<T> GhostListItem<T> {
    pub fn new(id: impl Into<SharedString>, label: impl Into<SharedString>, data: T) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            data,
        }
    }
}

/// The committed order of the list.
///
/// Reordering only happens through [`ItemList::move_before`] and
/// [`ItemList::move_after`], which the gesture machine calls once per
/// completed drag.
pub struct ItemList<T> {
    items: Vec<GhostListItem<T>>,
}

impl<T> Default for ItemList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> ItemList<T> {
    pub fn new(items: impl Into<Vec<GhostListItem<T>>>) -> Self {
        Self {
            items: items.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[GhostListItem<T>] {
        &self.items
    }

    pub fn get(&self, ix: usize) -> Option<&GhostListItem<T>> {
        self.items.get(ix)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id.as_ref() == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &SharedString> {
        self.items.iter().map(|item| &item.id)
    }

    /// Move the item at `ix` so it sits immediately before `reference`.
    ///
    /// Returns the item's new index, or `None` when `ix == reference` or either
    /// index is out of range.
    pub fn move_before(&mut self, ix: usize, reference: usize) -> Option<usize> {
        move_element(&mut self.items, ix, reference, Side::Before)
    }

    /// Move the item at `ix` so it sits immediately after `reference`.
    pub fn move_after(&mut self, ix: usize, reference: usize) -> Option<usize> {
        move_element(&mut self.items, ix, reference, Side::After)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Before,
    After,
}

pub(crate) fn move_element<E>(
    elements: &mut Vec<E>,
    ix: usize,
    reference: usize,
    side: Side,
) -> Option<usize> {
    if ix == reference || ix >= elements.len() || reference >= elements.len() {
        return None;
    }

    let element = elements.remove(ix);
    let reference = if reference > ix {
        reference - 1
    } else {
        reference
    };
    let to_ix = match side {
        Side::Before => reference,
        Side::After => reference + 1,
    };
    elements.insert(to_ix, element);
    Some(to_ix)
}

/// Measured window-space bounds of the container and its items, by committed
/// index. Refreshed every frame while the list is painted.
#[derive(Clone, Debug, Default)]
pub struct ItemLayout {
    container: Option<Bounds<Pixels>>,
    items: Vec<Option<Bounds<Pixels>>>,
}

impl ItemLayout {
    pub fn from_item_bounds(bounds: impl IntoIterator<Item = Bounds<Pixels>>) -> Self {
        Self {
            container: None,
            items: bounds.into_iter().map(Some).collect(),
        }
    }

    pub fn container_bounds(&self) -> Option<Bounds<Pixels>> {
        self.container
    }

    pub fn set_container_bounds(&mut self, bounds: Bounds<Pixels>) {
        self.container = Some(bounds);
    }

    pub fn set_item_bounds(&mut self, ix: usize, bounds: Bounds<Pixels>) {
        if self.items.len() <= ix {
            self.items.resize(ix + 1, None);
        }
        self.items[ix] = Some(bounds);
    }

    /// Forget measurements past `len`, e.g. after the items were replaced.
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    pub fn item_bounds(&self, ix: usize) -> Option<Bounds<Pixels>> {
        self.items.get(ix).copied().flatten()
    }

    pub fn center_y(&self, ix: usize) -> Option<Pixels> {
        self.item_bounds(ix).map(|bounds| bounds.center().y)
    }

    /// Horizontal center of the first item, used to anchor the floating layer.
    pub fn first_center_x(&self) -> Option<Pixels> {
        self.item_bounds(0).map(|bounds| bounds.center().x)
    }

    /// Index of the item containing `point`, if any.
    pub fn hit_test(&self, point: Point<Pixels>) -> Option<usize> {
        self.items
            .iter()
            .position(|bounds| bounds.is_some_and(|bounds| bounds.contains(&point)))
    }
}

#[cfg(test)]
mod tests {
    use gpui::{bounds, point, px, size};

    use super::*;

    fn list(ids: &[&'static str]) -> ItemList<()> {
        ItemList::new(
            ids.iter()
                .map(|id| GhostListItem::new(*id, *id, ()))
                .collect::<Vec<_>>(),
        )
    }

    fn ids(list: &ItemList<()>) -> Vec<String> {
        list.ids().map(|id| id.to_string()).collect()
    }

    #[test]
    fn move_before_moves_item_up() {
        let mut items = list(&["A", "B", "C", "D"]);
        assert_eq!(items.move_before(3, 1), Some(1));
        assert_eq!(ids(&items), vec!["A", "D", "B", "C"]);
    }

    #[test]
    fn move_after_moves_item_down() {
        let mut items = list(&["A", "B", "C", "D"]);
        assert_eq!(items.move_after(0, 2), Some(2));
        assert_eq!(ids(&items), vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn move_onto_self_is_noop() {
        let mut items = list(&["A", "B", "C"]);
        assert_eq!(items.move_before(1, 1), None);
        assert_eq!(items.move_after(1, 1), None);
        assert_eq!(ids(&items), vec!["A", "B", "C"]);
    }

    #[test]
    fn move_out_of_range_is_noop() {
        let mut items = list(&["A", "B"]);
        assert_eq!(items.move_after(0, 5), None);
        assert_eq!(items.move_before(7, 0), None);
        assert_eq!(ids(&items), vec!["A", "B"]);
    }

    #[test]
    fn index_of_finds_by_id() {
        let items = list(&["A", "B", "C"]);
        assert_eq!(items.index_of("C"), Some(2));
        assert_eq!(items.index_of("Z"), None);
    }

    #[test]
    fn layout_hit_test_and_centers() {
        let layout = ItemLayout::from_item_bounds([
            bounds(point(px(0.), px(0.)), size(px(100.), px(40.))),
            bounds(point(px(0.), px(50.)), size(px(100.), px(40.))),
        ]);

        assert_eq!(layout.center_y(0), Some(px(20.)));
        assert_eq!(layout.center_y(1), Some(px(70.)));
        assert_eq!(layout.first_center_x(), Some(px(50.)));
        assert_eq!(layout.hit_test(point(px(10.), px(60.))), Some(1));
        assert_eq!(layout.hit_test(point(px(10.), px(45.))), None);
        assert_eq!(layout.center_y(2), None);
    }

    #[test]
    fn layout_grows_and_truncates() {
        let mut layout = ItemLayout::default();
        layout.set_item_bounds(2, bounds(point(px(0.), px(0.)), size(px(1.), px(1.))));
        assert_eq!(layout.item_bounds(0), None);
        assert!(layout.item_bounds(2).is_some());

        layout.truncate(1);
        assert_eq!(layout.item_bounds(2), None);
    }
}
