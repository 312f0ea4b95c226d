mod app;
mod views;

use tracing_subscriber::EnvFilter;

use app::App;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    iced::application(App::new, App::update, App::view)
        .title("AI Video Producer")
        .theme(App::theme)
        .run()
}
