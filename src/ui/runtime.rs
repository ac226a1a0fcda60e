use crate::api::ApiClient;
use crate::config::Config;
use crate::store::Store;
use crate::ui::app::{App, MapSettings};
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use crate::worker::ApiWorker;
use std::io;
use std::time::Duration;
use tokio::runtime::Handle;

/// Run the terminal UI until the user quits.
///
/// The store is flushed before the terminal is restored.
pub fn run(config: &Config, store: Store, client: ApiClient, handle: Handle) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let events = EventHandler::new(tick_rate);
    let worker = ApiWorker::new(handle, client, events.sender());
    let mut app = App::new(
        store,
        Box::new(worker),
        MapSettings::from(&config.map),
        config.upload_limits(),
    );

    let (mut terminal, guard) = setup_terminal()?;

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Tick) => app.on_tick(),
            // The next draw picks up the new size.
            Ok(AppEvent::Resize(_, _)) => {}
            Ok(AppEvent::Api { epoch, outcome }) => app.on_api(epoch, outcome),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    app.shutdown();
    drop(guard);
    Ok(())
}
