use gpui::*;
use gpui_component::Root;
use tracing_subscriber::{EnvFilter, fmt};

use gpui_ghost_list_story::ghost_list::GhostListExample;

const DEFAULT_LOG_FILTER: &str = "gpui_ghost_list=debug,gpui_ghost_list_story=info";

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = fmt().with_env_filter(env_filter).try_init();
}

fn main() {
    init_logging();
    let app = Application::new();

    app.run(move |cx| {
        gpui_component::init(cx);
        cx.activate(true);

        cx.spawn(async move |cx| {
            cx.open_window(
                WindowOptions {
                    titlebar: Some(TitlebarOptions {
                        title: Some("Ghost List".into()),
                        appears_transparent: false,
                        traffic_light_position: None,
                    }),
                    ..Default::default()
                },
                |window, cx| {
                    let view = GhostListExample::view(window, cx);
                    cx.new(|cx| Root::new(view, window, cx))
                },
            )?;

            Ok::<_, anyhow::Error>(())
        })
        .detach();
    });
}
