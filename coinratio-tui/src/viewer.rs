//! Full-screen viewer: draw once, redraw on resize, return on explicit close.

use std::io::{self, stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::event;
use crossterm::execute;
use crossterm::cursor::Show;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use crate::input::{self, Action};
use crate::ui;
use crate::view::RatioView;

/// Show the view and block until the user closes it.
///
/// The terminal is restored on every exit path, including a failed setup
/// and a panic while drawing.
pub fn show(view: &RatioView) -> Result<()> {
    let result = with_panic_hook(
        || {
            let _ = restore_terminal();
        },
        || session(view),
    );
    let restored = restore_terminal();
    result?;
    restored?;
    Ok(())
}

fn session(view: &RatioView) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    run(&mut terminal, view, || Ok(event::read()?))
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

/// Run `body` with a panic hook that calls `on_panic` before the previous
/// hook, then put the previous hook back.
fn with_panic_hook<T>(on_panic: impl Fn() + Send + Sync + 'static, body: impl FnOnce() -> T) -> T {
    let previous = Arc::new(std::panic::take_hook());
    let chained = Arc::clone(&previous);
    std::panic::set_hook(Box::new(move |info| {
        on_panic();
        (*chained)(info);
    }));

    let out = body();

    // Dropping our hook releases its handle on `previous`.
    drop(std::panic::take_hook());
    if let Ok(hook) = Arc::try_unwrap(previous) {
        std::panic::set_hook(hook);
    }
    out
}

/// Draw, then block on events until one closes the view.
pub fn run<B, F>(terminal: &mut Terminal<B>, view: &RatioView, mut next_event: F) -> Result<()>
where
    B: Backend,
    F: FnMut() -> Result<event::Event>,
{
    terminal.draw(|f| ui::draw(f, view))?;
    loop {
        match input::handle_event(&next_event()?) {
            Action::Close => return Ok(()),
            Action::Redraw => {
                terminal.draw(|f| ui::draw(f, view))?;
            }
            Action::Ignore => {}
        }
    }
}
