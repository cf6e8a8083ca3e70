use std::time::Duration;

use gpui::{Refineable as _, StyleRefinement};
use serde::{Deserialize, Serialize};

use crate::gesture::InputSource;

/// Style overrides for the four parts of a ghost list.
///
/// Each category is layered over the built-in, theme-derived defaults when the
/// list renders. Setting a category again merges into what is already there,
/// so only the properties named by the new refinement change.
///
/// Every change bumps [`GhostListStyles::revision`], which the list compares
/// against the revision it last measured its layout for.
#[derive(Clone, Default)]
pub struct GhostListStyles {
    container: StyleRefinement,
    item: StyleRefinement,
    preview: StyleRefinement,
    ghost: StyleRefinement,
    revision: u64,
}

impl GhostListStyles {
    pub fn container(mut self, style: StyleRefinement) -> Self {
        self.refine_container(&style);
        self
    }

    pub fn item(mut self, style: StyleRefinement) -> Self {
        self.refine_item(&style);
        self
    }

    pub fn preview(mut self, style: StyleRefinement) -> Self {
        self.refine_preview(&style);
        self
    }

    pub fn ghost(mut self, style: StyleRefinement) -> Self {
        self.refine_ghost(&style);
        self
    }

    pub fn refine_container(&mut self, style: &StyleRefinement) {
        self.container.refine(style);
        self.revision += 1;
    }

    pub fn refine_item(&mut self, style: &StyleRefinement) {
        self.item.refine(style);
        self.revision += 1;
    }

    pub fn refine_preview(&mut self, style: &StyleRefinement) {
        self.preview.refine(style);
        self.revision += 1;
    }

    pub fn refine_ghost(&mut self, style: &StyleRefinement) {
        self.ghost.refine(style);
        self.revision += 1;
    }

    pub fn merge(&mut self, other: &GhostListStyles) {
        self.container.refine(&other.container);
        self.item.refine(&other.item);
        self.preview.refine(&other.preview);
        self.ghost.refine(&other.ghost);
        self.revision += 1;
    }

    pub fn container_ref(&self) -> &StyleRefinement {
        &self.container
    }

    pub fn item_ref(&self) -> &StyleRefinement {
        &self.item
    }

    pub fn preview_ref(&self) -> &StyleRefinement {
        &self.preview
    }

    pub fn ghost_ref(&self) -> &StyleRefinement {
        &self.ghost
    }

    /// Counts style changes. Any change may move the list's horizontal center.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Preview opacity at `progress` through its fade-in, scaled by the
    /// configured preview opacity.
    pub fn preview_opacity(&self, progress: f32) -> f32 {
        self.preview.opacity.unwrap_or(1.) * progress
    }
}

/// Behaviour settings for a ghost list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostListSettings {
    /// Input modality that drives drags.
    pub input: InputSource,
    /// Delay before measuring the horizontal center of the list.
    pub layout_settle_ms: u64,
    /// Fade-in duration of the drag preview.
    pub transition_ms: u64,
    /// Let the hidden preview follow the hovered item while idle.
    pub hover_tracking: bool,
}

impl Default for GhostListSettings {
    fn default() -> Self {
        Self {
            input: InputSource::Mouse,
            layout_settle_ms: 200,
            transition_ms: 150,
            hover_tracking: true,
        }
    }
}

impl GhostListSettings {
    pub fn layout_settle(&self) -> Duration {
        Duration::from_millis(self.layout_settle_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

#[cfg(test)]
mod tests {
    use gpui::{Styled as _, px};

    use super::*;

    #[test]
    fn later_refinements_only_override_named_properties() {
        let styles = GhostListStyles::default()
            .item(StyleRefinement::default().w(px(300.)).opacity(0.5))
            .item(StyleRefinement::default().opacity(0.8));

        assert_eq!(styles.item_ref().opacity, Some(0.8));
        assert!(styles.item_ref().size.width.is_some());
        assert_eq!(styles.ghost_ref().opacity, None);
    }

    #[test]
    fn merge_combines_categories() {
        let mut styles = GhostListStyles::default().ghost(StyleRefinement::default().opacity(0.4));
        styles.merge(&GhostListStyles::default().preview(StyleRefinement::default().opacity(0.9)));

        assert_eq!(styles.ghost_ref().opacity, Some(0.4));
        assert_eq!(styles.preview_ref().opacity, Some(0.9));
    }

    #[test]
    fn every_category_update_bumps_the_revision() {
        let mut styles = GhostListStyles::default();
        let mut last = styles.revision();

        styles.refine_container(&StyleRefinement::default().p(px(20.)));
        assert!(styles.revision() > last);
        last = styles.revision();

        styles.refine_item(&StyleRefinement::default().w(px(200.)));
        assert!(styles.revision() > last);
        last = styles.revision();

        styles.refine_preview(&StyleRefinement::default().opacity(0.9));
        assert!(styles.revision() > last);
        last = styles.revision();

        styles.refine_ghost(&StyleRefinement::default().opacity(0.5));
        assert!(styles.revision() > last);
        last = styles.revision();

        styles.merge(&GhostListStyles::default());
        assert!(styles.revision() > last);
        assert!(styles.container_ref().padding.left.is_some());
        assert!(styles.item_ref().size.width.is_some());
    }

    #[test]
    fn preview_fade_settles_at_configured_opacity() {
        let styles = GhostListStyles::default().preview(StyleRefinement::default().opacity(0.9));

        assert_eq!(styles.preview_opacity(0.), 0.);
        assert!((styles.preview_opacity(0.5) - 0.45).abs() < f32::EPSILON);
        assert!((styles.preview_opacity(1.) - 0.9).abs() < f32::EPSILON);
        assert_eq!(GhostListStyles::default().preview_opacity(1.), 1.);
    }

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let settings: GhostListSettings =
            serde_json::from_str(r#"{ "input": "touch", "layout_settle_ms": 50 }"#).unwrap();

        assert_eq!(settings.input, InputSource::Touch);
        assert_eq!(settings.layout_settle(), Duration::from_millis(50));
        assert_eq!(settings.transition(), Duration::from_millis(150));
        assert!(settings.hover_tracking);
    }
}
