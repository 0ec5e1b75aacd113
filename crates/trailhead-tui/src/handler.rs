use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use trailhead_core::View;

use crate::app::App;
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.show_model_picker {
        handle_model_picker(app, key);
        return;
    }

    match app.view() {
        View::Home => handle_home(app, key),
        View::Map => handle_map(app, key),
    }
}

fn handle_model_picker(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.show_model_picker = false,
        KeyCode::Char('j') | KeyCode::Down => app.model_picker_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.model_picker_nav_up(),
        KeyCode::Enter => app.select_model(),
        _ => {}
    }
}

fn handle_home(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::F(2) => app.open_model_picker(),

        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => app.toggle_focus(),
        KeyCode::Enter => app.submit_search(),

        KeyCode::Backspace => app.focused_input().backspace(),
        KeyCode::Delete => app.focused_input().delete(),
        KeyCode::Left => app.focused_input().left(),
        KeyCode::Right => app.focused_input().right(),
        KeyCode::Home => app.focused_input().home(),
        KeyCode::End => app.focused_input().end(),
        KeyCode::Char(c) => {
            app.notice = None;
            app.focused_input().insert(c);
        }
        _ => {}
    }
}

fn handle_map(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('h') | KeyCode::Backspace | KeyCode::Left => {
            app.go_back()
        }

        KeyCode::Char('j') | KeyCode::Down => app.trail_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.trail_nav_up(),
        KeyCode::Char('g') | KeyCode::Home => app.trail_nav_first(),
        KeyCode::Char('G') | KeyCode::End => app.trail_nav_last(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.show_model_picker {
        return;
    }

    if mouse.kind == MouseEventKind::Down(MouseButton::Left) && app.click_logo(mouse.column, mouse.row) {
        return;
    }

    if app.view() != View::Map {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.click_trail(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.trail_nav_down(),
        MouseEventKind::ScrollUp => app.trail_nav_up(),
        _ => {}
    }
}
