mod app;
mod handler;
mod logging;
mod tui;
mod ui;

use anyhow::Result;
use trailhead_core::Config;

use app::App;
use tui::{EventHandler, Tui};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing log file should not stop the app
    let log_path = logging::init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "could not read config, using defaults");
            Config::new()
        }
    };
    if let Ok(path) = &log_path {
        tracing::info!(log = %path.display(), model = config.model_or_default(), "starting trailhead");
    }

    let mut app = App::new(&config);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();

    let result = run(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    if let Err(e) = &result {
        tracing::error!(error = %e, "trailhead exited with an error");
    }
    result
}

async fn run(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        let Some(event) = events.next().await else {
            break;
        };
        handler::handle_event(app, event);

        // Results are picked up on the next event, at most one tick later
        app.poll_search().await;
    }
    Ok(())
}
