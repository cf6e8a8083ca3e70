use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::ActiveTheme as _;
use gpui_component::button::{Button, ButtonVariants as _};
use gpui_component::list::ListItem;
use gpui_component::{Icon, IconName, Sizable as _, h_flex, v_flex};
use gpui_ghost_list::{
    GhostListItem, GhostListRowRole, GhostListRowState, GhostListSettings, GhostListState,
    GhostListStyles, InputSource, ghost_list,
};
use tracing::info;

pub struct GhostListExample {
    mouse_list: Entity<GhostListState<()>>,
    touch_list: Entity<GhostListState<()>>,
    compact: bool,
}

impl GhostListExample {
    pub fn view(_window: &mut Window, cx: &mut App) -> Entity<Self> {
        let mouse_list = cx.new(|cx| {
            GhostListState::new(cx)
                .items(demo_items(
                    "fruit",
                    &["Apple", "Banana", "Cherry", "Durian", "Elderberry"],
                ))
                .on_reorder(|reorder, _| {
                    info!(
                        item_id = %reorder.item_id,
                        from = reorder.from,
                        to = reorder.to,
                        "mouse list reordered"
                    );
                })
        });
        let touch_list = cx.new(|cx| {
            GhostListState::new(cx)
                .items(demo_items("planet", &["Mercury", "Venus", "Earth", "Mars"]))
                .settings(GhostListSettings {
                    input: InputSource::Touch,
                    ..Default::default()
                })
                .styles(
                    GhostListStyles::default().preview(StyleRefinement::default().opacity(0.9)),
                )
                .on_reorder(|reorder, _| {
                    info!(
                        item_id = %reorder.item_id,
                        from = reorder.from,
                        to = reorder.to,
                        "touch list reordered"
                    );
                })
        });

        cx.new(|cx| {
            cx.observe(&mouse_list, |_, _, cx| cx.notify()).detach();
            cx.observe(&touch_list, |_, _, cx| cx.notify()).detach();
            Self {
                mouse_list,
                touch_list,
                compact: false,
            }
        })
    }

    fn toggle_compact(&mut self, _: &ClickEvent, _window: &mut Window, cx: &mut Context<Self>) {
        self.compact = !self.compact;
        let (width, radius) = if self.compact {
            (px(200.), px(6.))
        } else {
            (px(300.), px(9999.))
        };
        for list in [&self.mouse_list, &self.touch_list] {
            list.update(cx, |list, cx| {
                list.set_styles(
                    GhostListStyles::default()
                        .item(StyleRefinement::default().w(width).rounded(radius))
                        .ghost(StyleRefinement::default().rounded(radius))
                        .preview(StyleRefinement::default().rounded(radius)),
                    cx,
                );
            });
        }
        cx.notify();
    }
}

impl Render for GhostListExample {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let muted = theme.muted_foreground;

        v_flex()
            .size_full()
            .p(px(16.))
            .gap_y_3()
            .child(
                v_flex()
                    .gap_y_1()
                    .child(
                        div()
                            .text_xl()
                            .font_weight(FontWeight::BOLD)
                            .child("Ghost List"),
                    )
                    .child(div().text_sm().text_color(muted).child(
                        "Drag a row: ghosts preview the new order, the list itself only changes on release.",
                    )),
            )
            .child(
                h_flex().child(
                    Button::new("toggle-compact")
                        .small()
                        .outline()
                        .label(if self.compact { "Pill style" } else { "Compact style" })
                        .on_click(cx.listener(Self::toggle_compact)),
                ),
            )
            .child(
                h_flex()
                    .flex_1()
                    .min_h(px(0.))
                    .gap_x_6()
                    .items_start()
                    .child(render_column("Mouse", &self.mouse_list, cx))
                    .child(render_column("Touch (press and slide)", &self.touch_list, cx)),
            )
    }
}

fn render_column(
    title: &'static str,
    list: &Entity<GhostListState<()>>,
    cx: &mut Context<GhostListExample>,
) -> impl IntoElement {
    let muted = cx.theme().muted_foreground;
    let dump = list
        .read(cx)
        .items_ref()
        .iter()
        .enumerate()
        .map(|(ix, item)| format!("{ix:02}  {}", item.id))
        .collect::<Vec<_>>();

    v_flex()
        .gap_y_2()
        .child(
            div()
                .text_sm()
                .font_weight(FontWeight::MEDIUM)
                .child(title),
        )
        .child(ghost_list(list, move |ix, item, row_state, _window, cx| {
            render_row(ix, item, row_state, cx)
        }))
        .child(
            v_flex()
                .gap_y_0p5()
                .text_xs()
                .text_color(muted)
                .children(dump.into_iter().map(|line| div().child(line))),
        )
}

fn render_row(
    ix: usize,
    item: &GhostListItem<()>,
    row_state: GhostListRowState,
    cx: &mut App,
) -> ListItem {
    let theme = cx.theme();

    ListItem::new(ix).child(
        h_flex()
            .gap_x_2()
            .items_center()
            .child(
                Icon::from(IconName::Menu)
                    .small()
                    .text_color(theme.muted_foreground),
            )
            .child(item.label.clone())
            .when(row_state.role == GhostListRowRole::Ghost, |this| {
                this.text_color(theme.muted_foreground)
            })
            .when(row_state.drop_target, |this| {
                this.font_weight(FontWeight::SEMIBOLD)
            }),
    )
}

fn demo_items(prefix: &str, labels: &[&str]) -> Vec<GhostListItem<()>> {
    labels
        .iter()
        .map(|label| {
            GhostListItem::new(
                format!("{prefix}/{}", label.to_lowercase()),
                label.to_string(),
                (),
            )
        })
        .collect()
}
