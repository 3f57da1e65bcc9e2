//! Keyboard handling: the view is static, so the only action is closing it.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the viewer should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Close,
    Redraw,
    Ignore,
}

pub fn handle_event(event: &Event) -> Action {
    match event {
        Event::Key(key) => handle_key(*key),
        Event::Resize(_, _) => Action::Redraw,
        _ => Action::Ignore,
    }
}

/// `q`, `Esc`, `Enter` or Ctrl-C close the view.
pub fn handle_key(key: KeyEvent) -> Action {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return Action::Ignore;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc | KeyCode::Enter => Action::Close,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Close,
        _ => Action::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn close_keys() {
        assert_eq!(handle_key(press(KeyCode::Char('q'), KeyModifiers::NONE)), Action::Close);
        assert_eq!(handle_key(press(KeyCode::Esc, KeyModifiers::NONE)), Action::Close);
        assert_eq!(handle_key(press(KeyCode::Enter, KeyModifiers::NONE)), Action::Close);
        assert_eq!(handle_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Action::Close);
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(handle_key(press(KeyCode::Char('c'), KeyModifiers::NONE)), Action::Ignore);
        assert_eq!(handle_key(press(KeyCode::Left, KeyModifiers::NONE)), Action::Ignore);
    }

    #[test]
    fn key_release_does_not_close() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key(release), Action::Ignore);
    }

    #[test]
    fn resize_redraws() {
        assert_eq!(handle_event(&Event::Resize(80, 24)), Action::Redraw);
        assert_eq!(handle_event(&Event::FocusGained), Action::Ignore);
    }
}
