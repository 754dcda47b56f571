use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(crate) fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('J') => app.move_selected(1),
        KeyCode::Char('K') => app.move_selected(-1),
        KeyCode::Char('l') | KeyCode::Right => app.shift_depth(1),
        KeyCode::Char('h') | KeyCode::Left => app.shift_depth(-1),
        KeyCode::Char('a') => app.add_node(),
        KeyCode::Char('x') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('t') => app.cycle_theme(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_row_height(1),
        KeyCode::Char('-') => app.adjust_row_height(-1),
        KeyCode::Char('0') => app.reset_row_height(),
        KeyCode::Char('r') => app.toggle_direction(),
        _ => {}
    }
}

pub(crate) const KEY_HINTS: &str =
    "j/k select  J/K move  h/l depth  a add  x delete  t theme  +/- height  0 reset  r dir  q quit";
