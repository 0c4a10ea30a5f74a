//! Terminal management and main run loop

use std::collections::HashSet;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use compform_core::TourTimings;
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use tracing::info;

use super::app::App;
use super::event::{handle_key, poll_event, HandleResult};
use super::ui;

/// Longest the loop blocks on input when no tour step is pending
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the interactive form
///
/// With `autofill` the guided tour starts as soon as the form is on screen.
pub fn run(timings: TourTimings, autofill: bool) -> Result<()> {
    let mut terminal = init_terminal()?;
    let mut app = App::new(timings);
    info!(?timings, autofill, "form opened");

    let result = run_loop(&mut terminal, &mut app, autofill);

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop
fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, mut autofill: bool) -> Result<()> {
    loop {
        let mut visible = HashSet::new();
        terminal.draw(|frame| visible = ui::render(frame, app))?;
        app.highlighter.set_visible(visible);

        // Targets are only known after the first frame
        if autofill {
            autofill = false;
            app.start_tour(Instant::now());
        }

        let timeout = app.scheduler.poll_timeout(Instant::now(), IDLE_POLL);
        if let Some(Event::Key(key)) = poll_event(timeout)? {
            if key.kind == KeyEventKind::Press {
                match handle_key(app, key) {
                    HandleResult::Continue => {}
                    HandleResult::Quit => app.should_quit = true,
                    HandleResult::StartTour => app.start_tour(Instant::now()),
                    HandleResult::CancelTour => app.cancel_tour(),
                    HandleResult::Submit => app.submit()?,
                }
            }
        }

        app.tick(Instant::now())?;

        if app.should_quit {
            break;
        }
    }

    info!("form closed");
    Ok(())
}
