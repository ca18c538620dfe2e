use crate::routes::Route;
use crate::search::SearchIntent;
use crate::ui::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Route a key press: global shortcuts first, then the search overlay when
/// open, then the current screen.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') {
        app.request_quit();
        return;
    }
    if is_ctrl_char(key, 'f') {
        app.toggle_search();
        return;
    }
    if is_ctrl_char(key, 'r') {
        app.reload_config();
        return;
    }

    if app.is_search_open() {
        handle_search_key(app, key);
        return;
    }

    let route = if is_ctrl_char(key, 'a') {
        Some(Route::Albums { shared: false })
    } else if is_ctrl_char(key, 's') {
        Some(Route::Albums { shared: true })
    } else if is_ctrl_char(key, 'n') {
        Some(Route::CreateAlbum { editing: None })
    } else if is_ctrl_char(key, 'p') {
        Some(Route::Profile)
    } else if is_ctrl_char(key, 'g') {
        Some(Route::Home)
    } else {
        None
    };
    if let Some(route) = route {
        app.navigate(route);
        return;
    }
    if is_ctrl_char(key, 'l') {
        app.logout();
        return;
    }

    app.on_key(key);
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    let intent = match key.code {
        KeyCode::Esc => SearchIntent::Close,
        KeyCode::Tab => SearchIntent::FocusNext,
        KeyCode::BackTab => SearchIntent::FocusPrev,
        KeyCode::Up => SearchIntent::MoveUp,
        KeyCode::Down => SearchIntent::MoveDown,
        KeyCode::Backspace => SearchIntent::Backspace,
        KeyCode::Enter => {
            if !app.open_search_result() {
                app.submit_search();
            }
            return;
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            SearchIntent::Input(c)
        }
        _ => return,
    };
    app.dispatch_search(intent);
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_char_ignores_shift_and_plain_keys() {
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        let ctrl_shift_q = KeyEvent::new(
            KeyCode::Char('Q'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );
        let plain_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(is_ctrl_char(ctrl_q, 'q'));
        assert!(!is_ctrl_char(ctrl_shift_q, 'q'));
        assert!(!is_ctrl_char(plain_q, 'q'));
    }
}
