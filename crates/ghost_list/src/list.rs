use std::{rc::Rc, time::Duration};

use gpui::{
    Animation, AnimationExt as _, AnyElement, App, AppContext as _, Context, CursorStyle, Div,
    DragMoveEvent, ElementId, EmptyView, Entity, EntityId, FocusHandle, InteractiveElement as _,
    IntoElement, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, ParentElement as _,
    Pixels, Point, Render, RenderOnce, StatefulInteractiveElement as _, StyleRefinement, Styled,
    Task, Window, canvas, div, ease_in_out, prelude::FluentBuilder as _, px,
};
use gpui_component::list::ListItem;
use gpui_component::{ActiveTheme as _, StyledExt as _, Theme};
use tracing::{debug, trace};

use crate::gesture::{GestureMachine, GhostListReorder, InputSource, MoveOutcome};
use crate::model::{GhostListItem, ItemLayout, ItemList};
use crate::preview::RevealToken;
use crate::style::{GhostListSettings, GhostListStyles};

const CONTEXT: &str = "GhostList";

type RenderItem<T> =
    dyn Fn(usize, &GhostListItem<T>, GhostListRowState, &mut Window, &mut App) -> ListItem;

/// Create a [`GhostList`].
pub fn ghost_list<T, R>(state: &Entity<GhostListState<T>>, render_item: R) -> GhostList<T>
where
    T: 'static,
    R: Fn(usize, &GhostListItem<T>, GhostListRowState, &mut Window, &mut App) -> ListItem + 'static,
{
    GhostList::new(state, render_item)
}

#[derive(Clone)]
struct GhostListDrag {
    list_id: EntityId,
    ix: usize,
}

/// Where a row is being rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GhostListRowRole {
    #[default]
    Item,
    Ghost,
    Preview,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GhostListRowState {
    pub role: GhostListRowRole,
    pub dragging: bool,
    pub drop_target: bool,
}

/// State for a list that previews reordering with ghost placeholders.
pub struct GhostListState<T> {
    focus_handle: FocusHandle,
    items: ItemList<T>,
    layout: ItemLayout,
    gesture: GestureMachine,
    styles: GhostListStyles,
    settings: GhostListSettings,
    /// Style revision the horizontal center was last scheduled for.
    measured_revision: Option<u64>,
    reveal_task: Option<Task<anyhow::Result<()>>>,
    measure_task: Option<Task<anyhow::Result<()>>>,
    on_reorder: Option<Rc<dyn Fn(&GhostListReorder, &[GhostListItem<T>])>>,
    render_item: Rc<RenderItem<T>>,
}

impl<T: 'static> GhostListState<T> {
    pub fn new(cx: &mut App) -> Self {
        Self {
            focus_handle: cx.focus_handle(),
            items: ItemList::default(),
            layout: ItemLayout::default(),
            gesture: GestureMachine::new(),
            styles: GhostListStyles::default(),
            settings: GhostListSettings::default(),
            measured_revision: None,
            reveal_task: None,
            measure_task: None,
            on_reorder: None,
            render_item: Rc::new(|_, _, _, _, _| ListItem::new("ghost-list-empty")),
        }
    }

    pub fn items(mut self, items: impl Into<Vec<GhostListItem<T>>>) -> Self {
        self.items = ItemList::new(items);
        self
    }

    pub fn styles(mut self, styles: GhostListStyles) -> Self {
        self.styles.merge(&styles);
        self
    }

    pub fn settings(mut self, settings: GhostListSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Provide a callback invoked after every committed reorder.
    pub fn on_reorder(
        mut self,
        on_reorder: impl Fn(&GhostListReorder, &[GhostListItem<T>]) + 'static,
    ) -> Self {
        self.on_reorder = Some(Rc::new(on_reorder));
        self
    }

    /// Replace the items. An active drag is abandoned without committing.
    pub fn set_items(
        &mut self,
        items: impl Into<Vec<GhostListItem<T>>>,
        cx: &mut Context<Self>,
    ) {
        self.gesture.abort();
        self.reveal_task = None;
        self.items = ItemList::new(items);
        self.layout.truncate(self.items.len());
        self.schedule_center_measure(cx);
        cx.notify();
    }

    pub fn items_ref(&self) -> &[GhostListItem<T>] {
        self.items.items()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Merge new style overrides into every category.
    ///
    /// Each setter bumps the style revision; the next render re-measures the
    /// horizontal center for it.
    pub fn set_styles(&mut self, styles: GhostListStyles, cx: &mut Context<Self>) {
        self.styles.merge(&styles);
        cx.notify();
    }

    pub fn set_container_style(&mut self, style: StyleRefinement, cx: &mut Context<Self>) {
        self.styles.refine_container(&style);
        cx.notify();
    }

    pub fn set_item_style(&mut self, style: StyleRefinement, cx: &mut Context<Self>) {
        self.styles.refine_item(&style);
        cx.notify();
    }

    pub fn set_preview_style(&mut self, style: StyleRefinement, cx: &mut Context<Self>) {
        self.styles.refine_preview(&style);
        cx.notify();
    }

    pub fn set_ghost_style(&mut self, style: StyleRefinement, cx: &mut Context<Self>) {
        self.styles.refine_ghost(&style);
        cx.notify();
    }

    /// Mouse drag started on the item at `ix`.
    pub fn drag_start(&mut self, ix: usize, cx: &mut Context<Self>) {
        self.begin(InputSource::Mouse, ix, cx);
    }

    /// Mouse drag entered the item at `ix`.
    pub fn drag_enter(&mut self, ix: usize, cx: &mut Context<Self>) {
        let outcome = self.gesture.drag_enter(ix, &self.items, &self.layout);
        if outcome != MoveOutcome::Ignored {
            cx.notify();
        }
    }

    /// Mouse drag released over the list.
    pub fn drag_end(&mut self, cx: &mut Context<Self>) {
        if !self.gesture.is_dragging() {
            return;
        }
        let reorder = self.gesture.finish(&mut self.items);
        self.settle(reorder);
        cx.notify();
    }

    /// Mouse drag released somewhere other than the list.
    pub fn drop_outside(&mut self, cx: &mut Context<Self>) {
        if !self.gesture.is_dragging() {
            return;
        }
        let reorder = self.gesture.drop_outside(&mut self.items);
        self.settle(reorder);
        cx.notify();
    }

    pub fn touch_start(&mut self, ix: usize, cx: &mut Context<Self>) {
        self.begin(InputSource::Touch, ix, cx);
    }

    /// Touch point moved to `position`, in window coordinates.
    pub fn touch_move(&mut self, position: Point<Pixels>, cx: &mut Context<Self>) {
        let outcome = self.gesture.touch_move(position, &self.items, &self.layout);
        if outcome != MoveOutcome::Ignored {
            cx.notify();
        }
    }

    pub fn touch_end(&mut self, cx: &mut Context<Self>) {
        self.drag_end(cx);
    }

    fn begin(&mut self, source: InputSource, ix: usize, cx: &mut Context<Self>) {
        let Some(token) = self.gesture.start(source, ix, &self.items, &self.layout) else {
            return;
        };
        self.schedule_reveal(token, cx);
        cx.notify();
    }

    fn settle(&mut self, reorder: Option<GhostListReorder>) {
        self.reveal_task = None;

        if let Some(reorder) = reorder
            && let Some(on_reorder) = self.on_reorder.as_ref()
        {
            on_reorder(&reorder, self.items.items());
        }
    }

    fn schedule_reveal(&mut self, token: RevealToken, cx: &mut Context<Self>) {
        self.reveal_task = Some(cx.spawn(async move |this, cx| {
            cx.background_executor().timer(Duration::ZERO).await;
            this.update(cx, |this, cx| {
                if this.gesture.reveal_preview(token) {
                    cx.notify();
                } else {
                    trace!(epoch = token.epoch(), "stale preview reveal skipped");
                }
            })
        }));
    }

    fn schedule_center_measure(&mut self, cx: &mut Context<Self>) {
        let delay = self.settings.layout_settle();
        self.measure_task = Some(cx.spawn(async move |this, cx| {
            cx.background_executor().timer(delay).await;
            this.update(cx, |this, cx| this.measure_center_x(cx))
        }));
    }

    fn measure_center_x(&mut self, cx: &mut Context<Self>) {
        match self.layout.first_center_x() {
            Some(center_x) => {
                debug!(?center_x, "list center measured");
                self.gesture.preview_mut().set_center_x(center_x);
                cx.notify();
            }
            None => {
                trace!("no item measured yet, measuring again on next render");
                self.measured_revision = None;
            }
        }
    }

    fn center_x(&self) -> Option<Pixels> {
        self.gesture.preview().center_x().or_else(|| {
            self.layout
                .container_bounds()
                .map(|bounds| bounds.center().x)
        })
    }

    fn on_pointer_move(
        &mut self,
        event: &MouseMoveEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if !self.gesture.is_dragging() {
            if self.settings.hover_tracking
                && let Some(ix) = self.layout.hit_test(event.position)
            {
                self.gesture.hover(ix, &self.layout);
            }
            return;
        }

        if self.settings.input == InputSource::Touch {
            self.touch_move(event.position, cx);
        }
    }

    fn on_drag_move(
        &mut self,
        event: &DragMoveEvent<GhostListDrag>,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let list_id = event.drag(cx).list_id;
        if list_id != cx.entity_id() {
            return;
        }

        let hovered_ix = self.layout.hit_test(event.event.position);
        let outcome = self
            .gesture
            .drag_over(hovered_ix, &self.items, &self.layout);
        if outcome != MoveOutcome::Ignored {
            cx.notify();
        }
    }

    fn on_drop(&mut self, drag: &GhostListDrag, _window: &mut Window, cx: &mut Context<Self>) {
        if drag.list_id != cx.entity_id() {
            return;
        }
        self.drag_end(cx);
    }

    fn render_floating_layer(&self, window: &mut Window, cx: &mut App) -> Vec<AnyElement> {
        let (Some(center_x), Some(container)) = (self.center_x(), self.layout.container_bounds())
        else {
            return Vec::new();
        };
        let theme = cx.theme().clone();
        let mut layer = Vec::with_capacity(self.gesture.ghosts().len() + 1);

        let revealed = self.gesture.ghosts().is_revealed();
        for ghost in self.gesture.ghosts().ghosts() {
            let Some(item) = self.items.get(ghost.source_ix) else {
                continue;
            };
            let origin = ghost.origin(center_x) - container.origin;
            let row_state = GhostListRowState {
                role: GhostListRowRole::Ghost,
                dragging: self.gesture.is_drag_target(&item.id),
                drop_target: false,
            };
            let content = (self.render_item)(ghost.source_ix, item, row_state, window, cx);

            layer.push(
                ghost_defaults(div().id(("ghost-list-ghost", ghost.source_ix)), &theme)
                    .absolute()
                    .left(origin.x)
                    .top(origin.y)
                    .w(ghost.size.width)
                    .h(ghost.size.height)
                    .refine_style(self.styles.ghost_ref())
                    .when(!revealed, |this| this.opacity(0.))
                    .child(content)
                    .into_any_element(),
            );
        }

        let preview = self.gesture.preview();
        if preview.is_visible()
            && let Some(ix) = preview.content()
            && let Some(item) = self.items.get(ix)
        {
            let origin = preview.origin(center_x) - container.origin;
            let row_state = GhostListRowState {
                role: GhostListRowRole::Preview,
                dragging: true,
                drop_target: false,
            };
            let content = (self.render_item)(ix, item, row_state, window, cx);
            let styles = self.styles.clone();

            layer.push(
                preview_defaults(div().id("ghost-list-preview"), &theme)
                    .absolute()
                    .left(origin.x)
                    .top(origin.y)
                    .w(preview.size().width)
                    .h(preview.size().height)
                    .refine_style(self.styles.preview_ref())
                    .child(content)
                    .with_animation(
                        ("ghost-list-preview", preview.epoch() as usize),
                        Animation::new(self.settings.transition()).with_easing(ease_in_out),
                        move |this, delta| this.opacity(styles.preview_opacity(delta)),
                    )
                    .into_any_element(),
            );
        }

        layer
    }
}

fn container_defaults(this: Div, theme: &Theme) -> Div {
    this.flex()
        .flex_col()
        .gap(px(12.))
        .p(px(10.))
        .rounded(px(12.))
        .bg(theme.muted)
}

fn item_defaults<E: Styled>(this: E, theme: &Theme) -> E {
    this.rounded_full().bg(theme.background).shadow_sm()
}

fn ghost_defaults<E: Styled>(this: E, theme: &Theme) -> E {
    item_defaults(this, theme)
        .border_1()
        .border_color(theme.border)
        .overflow_hidden()
}

fn preview_defaults<E: Styled>(this: E, theme: &Theme) -> E {
    this.rounded_full()
        .bg(theme.popover.alpha(0.9))
        .border_1()
        .border_color(theme.drag_border)
        .shadow_md()
        .text_color(theme.popover_foreground)
        .overflow_hidden()
}

impl<T: 'static> Render for GhostListState<T> {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let was_dragging = self.gesture.is_dragging();
        let reorder = self
            .gesture
            .release_abandoned(cx.has_active_drag(), &mut self.items);
        if was_dragging && !self.gesture.is_dragging() {
            self.settle(reorder);
        }

        let revision = self.styles.revision();
        if self.measured_revision != Some(revision) {
            self.measured_revision = Some(revision);
            self.schedule_center_measure(cx);
        }
        self.layout.truncate(self.items.len());

        let theme = cx.theme().clone();
        let state_entity = cx.entity();
        let list_id = cx.entity_id();
        let input = self.settings.input;

        let mut rows = Vec::with_capacity(self.items.len());
        for (ix, item) in self.items.items().iter().enumerate() {
            let dragging = self.gesture.is_drag_target(&item.id);
            let row_state = GhostListRowState {
                role: GhostListRowRole::Item,
                dragging,
                drop_target: self.gesture.is_drop_target(&item.id),
            };
            let list_item = (self.render_item)(ix, item, row_state, window, cx);

            let measure = {
                let state_entity = state_entity.clone();
                canvas(
                    move |bounds, _window, cx| {
                        state_entity.update(cx, |state, _| state.layout.set_item_bounds(ix, bounds))
                    },
                    |_, _, _, _| {},
                )
                .absolute()
                .top_0()
                .left_0()
                .size_full()
            };

            let row = item_defaults(div().id(("ghost-list-item", ix)), &theme)
                .relative()
                .cursor(CursorStyle::OpenHand)
                .refine_style(self.styles.item_ref())
                .when(dragging, |this| this.opacity(0.))
                .child(list_item)
                .child(measure);

            let row = match input {
                InputSource::Mouse => {
                    let state_entity = state_entity.clone();
                    row.on_drag(
                        GhostListDrag { list_id, ix },
                        move |drag, _offset, _window, cx| {
                            state_entity.update(cx, |state, cx| state.drag_start(drag.ix, cx));
                            cx.new(|_| EmptyView)
                        },
                    )
                    .into_any_element()
                }
                InputSource::Touch => row
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(move |this, _: &MouseDownEvent, _window, cx| {
                            this.touch_start(ix, cx);
                        }),
                    )
                    .into_any_element(),
            };
            rows.push(row);
        }

        let floating_layer = self.render_floating_layer(window, cx);
        let measure_container = {
            let state_entity = state_entity.clone();
            canvas(
                move |bounds, _window, cx| {
                    state_entity.update(cx, |state, _| state.layout.set_container_bounds(bounds))
                },
                |_, _, _, _| {},
            )
            .absolute()
            .top_0()
            .left_0()
            .size_full()
        };

        container_defaults(div(), &theme)
            .id("ghost-list-state")
            .relative()
            .refine_style(self.styles.container_ref())
            .child(measure_container)
            .children(rows)
            .children(floating_layer)
            .on_mouse_move(cx.listener(Self::on_pointer_move))
            .map(|this| match input {
                InputSource::Mouse => this
                    .on_drag_move::<GhostListDrag>(cx.listener(Self::on_drag_move))
                    .on_drop::<GhostListDrag>(cx.listener(Self::on_drop))
                    .on_mouse_up_out(
                        MouseButton::Left,
                        cx.listener(|this, _: &MouseUpEvent, _window, cx| this.drop_outside(cx)),
                    ),
                InputSource::Touch => this
                    .on_mouse_up(
                        MouseButton::Left,
                        cx.listener(|this, _: &MouseUpEvent, _window, cx| this.touch_end(cx)),
                    )
                    .on_mouse_up_out(
                        MouseButton::Left,
                        cx.listener(|this, _: &MouseUpEvent, _window, cx| this.touch_end(cx)),
                    ),
            })
    }
}

/// A list element that previews drag-and-drop reordering with ghosts.
#[derive(IntoElement)]
pub struct GhostList<T: 'static> {
    id: ElementId,
    state: Entity<GhostListState<T>>,
    style: StyleRefinement,
    render_item: Rc<RenderItem<T>>,
}

impl<T: 'static> GhostList<T> {
    pub fn new<R>(state: &Entity<GhostListState<T>>, render_item: R) -> Self
    where
        R: Fn(usize, &GhostListItem<T>, GhostListRowState, &mut Window, &mut App) -> ListItem
            + 'static,
    {
        Self {
            id: ElementId::Name(format!("ghost-list-{}", state.entity_id()).into()),
            state: state.clone(),
            style: StyleRefinement::default(),
            render_item: Rc::new(render_item),
        }
    }
}

impl<T: 'static> Styled for GhostList<T> {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl<T: 'static> RenderOnce for GhostList<T> {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let focus_handle = self.state.read(cx).focus_handle.clone();
        self.state
            .update(cx, |state, _| state.render_item = self.render_item);

        div()
            .id(self.id)
            .key_context(CONTEXT)
            .track_focus(&focus_handle)
            .child(self.state)
            .refine_style(&self.style)
    }
}
