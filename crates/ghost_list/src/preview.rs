use gpui::{Pixels, Point, Size, point};

/// Identifies one `show` call, so a reveal scheduled for an earlier drag is
/// ignored once the preview has been hidden or shown again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealToken(u64);

impl RevealToken {
    pub fn epoch(self) -> u64 {
        self.0
    }
}

/// The floating element that follows the pointer during a drag.
///
/// Created once per list and reused across drags. `show` leaves it hidden;
/// it only becomes visible when the matching [`RevealToken`] is redeemed on a
/// later tick.
#[derive(Debug, Default)]
pub struct DragPreview {
    content: Option<usize>,
    size: Size<Pixels>,
    center_x: Option<Pixels>,
    center_y: Pixels,
    visible: bool,
    epoch: u64,
}

impl DragPreview {
    /// Load the content of the item at `item_ix` and park the preview at
    /// `center_y`, still hidden.
    pub fn show(&mut self, item_ix: usize, size: Size<Pixels>, center_y: Pixels) -> RevealToken {
        self.epoch = self.epoch.wrapping_add(1);
        self.content = Some(item_ix);
        self.size = size;
        self.center_y = center_y;
        self.visible = false;
        RevealToken(self.epoch)
    }

    /// Make the preview visible if `token` is still current.
    pub fn reveal(&mut self, token: RevealToken) -> bool {
        if token.0 != self.epoch || self.content.is_none() {
            return false;
        }
        self.visible = true;
        true
    }

    pub fn move_to(&mut self, center_y: Pixels) {
        self.center_y = center_y;
    }

    pub fn hide(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.visible = false;
    }

    pub fn set_center_x(&mut self, center_x: Pixels) {
        self.center_x = Some(center_x);
    }

    pub fn center_x(&self) -> Option<Pixels> {
        self.center_x
    }

    pub fn center_y(&self) -> Pixels {
        self.center_y
    }

    pub fn size(&self) -> Size<Pixels> {
        self.size
    }

    /// Committed index of the item whose content is loaded.
    pub fn content(&self) -> Option<usize> {
        self.content
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn origin(&self, center_x: Pixels) -> Point<Pixels> {
        point(
            center_x - self.size.width / 2.,
            self.center_y - self.size.height / 2.,
        )
    }
}

#[cfg(test)]
mod tests {
    use gpui::{px, size};

    use super::*;

    #[test]
    fn show_is_hidden_until_revealed() {
        let mut preview = DragPreview::default();
        let token = preview.show(2, size(px(100.), px(40.)), px(70.));

        assert!(!preview.is_visible());
        assert_eq!(preview.content(), Some(2));
        assert!(preview.reveal(token));
        assert!(preview.is_visible());
        assert_eq!(preview.origin(px(60.)), point(px(10.), px(50.)));
    }

    #[test]
    fn stale_reveal_after_hide_is_ignored() {
        let mut preview = DragPreview::default();
        let token = preview.show(0, size(px(10.), px(10.)), px(5.));
        preview.hide();

        assert!(!preview.reveal(token));
        assert!(!preview.is_visible());
    }

    #[test]
    fn reveal_from_previous_drag_is_ignored() {
        let mut preview = DragPreview::default();
        let first = preview.show(0, size(px(10.), px(10.)), px(5.));
        preview.hide();
        let second = preview.show(1, size(px(10.), px(10.)), px(15.));

        assert!(!preview.reveal(first));
        assert!(preview.reveal(second));
    }

    #[test]
    fn move_to_tracks_vertical_position() {
        let mut preview = DragPreview::default();
        preview.show(0, size(px(10.), px(10.)), px(5.));
        preview.move_to(px(42.));
        assert_eq!(preview.center_y(), px(42.));
    }
}
