mod app;
mod charts;
mod data;
mod importing;
mod message;
mod reports;
mod screens;
mod settings;
mod theme;

use app::App;
use iced::Settings;
use lucide_icons::LUCIDE_FONT_BYTES;
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = settings::load_settings().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "failed to load settings, using defaults");
        settings::Settings::default()
    });
    let window_size = (settings.window.width, settings.window.height);

    iced::application(move || App::new(settings.clone()), App::update, App::view)
        .title(screens::visualizer::TITLE)
        .theme(App::theme)
        .subscription(App::subscription)
        .settings(Settings {
            fonts: vec![LUCIDE_FONT_BYTES.into()],
            ..Default::default()
        })
        .window_size(window_size)
        .run()
}
