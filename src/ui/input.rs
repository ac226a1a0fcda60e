use crate::session::Route;
use crate::ui::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    if is_ctrl_char(key, 'q') {
        app.request_quit();
        return;
    }
    if is_ctrl_char(key, 'l') {
        app.logout();
        return;
    }

    match key.code {
        KeyCode::F(2) => return app.navigate(Route::Home),
        KeyCode::F(3) => return app.navigate(Route::Profile),
        KeyCode::F(4) => return app.navigate(Route::Friends),
        KeyCode::F(5) => return app.navigate(Route::Quests),
        _ => {}
    }

    match app.route() {
        Route::Home => handle_map_key(app, key),
        Route::Quests => handle_list_key(app, key),
        Route::SignIn | Route::SignUp => {
            if is_ctrl_char(key, 'n') {
                let other = if app.route() == Route::SignIn {
                    Route::SignUp
                } else {
                    Route::SignIn
                };
                app.navigate(other);
                return;
            }
            handle_form_key(app, key);
        }
        Route::Profile => {
            if is_ctrl_char(key, 'x') {
                app.clear_photos();
                return;
            }
            handle_form_key(app, key);
        }
        Route::Friends => match key.code {
            KeyCode::Up | KeyCode::Down => handle_list_key(app, key),
            _ => handle_form_key(app, key),
        },
    }
}

fn handle_map_key(app: &mut App, key: KeyEvent) {
    if app.task_popup_open() {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => app.close_task_popup(),
            KeyCode::Char('g') | KeyCode::Char('G') => app.fly_to_quest(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Left => app.pan_map(-1.0, 0.0),
        KeyCode::Right => app.pan_map(1.0, 0.0),
        KeyCode::Up => app.pan_map(0.0, 1.0),
        KeyCode::Down => app.pan_map(0.0, -1.0),
        KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_map(1.0),
        KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_map(-1.0),
        KeyCode::Char('r') | KeyCode::Char('R') => app.roll_quest(),
        KeyCode::Char('g') | KeyCode::Char('G') => app.fly_to_quest(),
        KeyCode::Char('0') => app.reset_view(),
        KeyCode::Esc => app.go_back(),
        _ => {}
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        KeyCode::Esc => app.go_back(),
        _ => {}
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab => app.next_field(),
        KeyCode::BackTab => app.prev_field(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Esc => app.go_back(),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.type_char(ch),
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}
