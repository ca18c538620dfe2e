use crate::config::ConfigStore;
use crate::store::Store;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use std::io;
use std::time::Instant;
use tokio::runtime::Handle;

/// Run the terminal UI until the user quits.
///
/// Blocks the calling thread; requests run on `runtime` and report back
/// through the event channel.
pub fn run(runtime: Handle, config: ConfigStore, store: Store) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let tick_rate = std::time::Duration::from_millis(config.get().ui.tick_rate_ms);
    let events = EventHandler::new(tick_rate);
    let mut app = App::new(runtime, config, store, events.sender());
    app.start();

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(app.tick_rate()) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Tick) => app.on_tick(Instant::now()),
            Ok(AppEvent::Resize(_, _)) => {}
            Ok(AppEvent::Action(action)) => app.on_action(action),
            Ok(AppEvent::SearchDue) => app.on_search_due(),
            Ok(AppEvent::SearchSettled { seq, result }) => app.on_search_settled(seq, result),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(app);
    drop(guard);
    Ok(())
}
