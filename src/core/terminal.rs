//! Terminal rendering and event loop for gotry.
//!
//! Handles setup/teardown of raw mode and the alternate screen, redraws, and feeds key presses,
//! resizes and worker responses into the [Session]. The UI is drawn on stderr so that stdout
//! only ever carries the result line for the shell.

use crate::app::{Command, Event, Keymap, Session};
use crate::config::Config;
use crate::core::worker::{WorkerResponse, Workers};
use crate::core::delete_entries;
use crate::ui;

use crossterm::{
    cursor::Show,
    event::{self, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::{debug, warn};

use std::{io, time::Duration};

/// Initializes the terminal in raw mode and alternate screen and runs the main event loop.
///
/// Blocks until the session is done. The terminal is restored even when the loop fails.
pub fn run_terminal(
    session: &mut Session,
    workers: &mut Workers,
    config: &Config,
) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stderr = io::stderr();
    if let Err(e) = execute!(stderr, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }

    let result = Terminal::new(CrosstermBackend::new(io::stderr()))
        .and_then(|mut terminal| event_loop(&mut terminal, session, workers, config));

    let restored = disable_raw_mode().and(execute!(io::stderr(), LeaveAlternateScreen, Show));
    result.and(restored)
}

/// Main event loop: draws the UI, polls for events and dispatches them to the session.
/// Returns once the session is done.
fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &mut Session,
    workers: &mut Workers,
    config: &Config,
) -> io::Result<()>
where
    io::Error: From<<B as Backend>::Error>,
{
    let keymap = Keymap::from_config(config.keys());
    let mut changed = true;

    let first = session.init();
    execute_command(first, session, workers, config);

    while !session.is_done() {
        for response in workers.drain_current() {
            let event = match response {
                WorkerResponse::CatalogLoaded { entries, .. } => Event::CatalogLoaded(entries),
                WorkerResponse::LoadFailed { message, .. } => Event::LoadFailed(message),
            };
            dispatch(event, session, workers, config);
            changed = true;
        }
        if session.is_done() {
            break;
        }

        if changed {
            terminal.draw(|f| ui::render(f, session, config))?;
            changed = false;
        }

        // Event Polling
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                event::Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(input) = keymap.translate(key, session.mode()) {
                        dispatch(Event::Key(input), session, workers, config);
                        changed = true;
                    }
                }
                event::Event::Resize(_, _) => changed = true,
                _ => {}
            }
        }
    }
    Ok(())
}

/// Feeds one event into the session and runs whatever follows from it.
fn dispatch(event: Event, session: &mut Session, workers: &mut Workers, config: &Config) {
    let command = session.handle(event);
    execute_command(command, session, workers, config);
}

fn execute_command(
    mut command: Command,
    session: &mut Session,
    workers: &mut Workers,
    config: &Config,
) {
    loop {
        command = match command {
            Command::None | Command::Quit => return,
            Command::Reload => {
                workers.request_catalog(session.base().to_path_buf());
                return;
            }
            Command::Delete(paths) => {
                debug!(count = paths.len(), "deleting marked entries");
                let res = delete_entries(&paths, config.general().move_to_trash()).map_err(|e| {
                    warn!(error = %e, "delete failed");
                    e.to_string()
                });
                session.handle(Event::DeleteFinished(res))
            }
        };
    }
}
