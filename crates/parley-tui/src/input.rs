use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::compose::{ComposeKind, Outbound};
use crate::ui::{App, InputMode};

/// Work the runtime must perform after a key was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Send(Outbound),
}

/// Route one key event. Normal mode drives the bindings, compose mode
/// feeds the form.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Action::None;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Compose => handle_compose_key(app, key),
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('p') => app.open_compose(ComposeKind::Private),
        KeyCode::Char('s') => app.open_compose(ComposeKind::Stream),
        KeyCode::Char('j') => app.open_compose(ComposeKind::Join),
        _ => {}
    }
    Action::None
}

fn handle_compose_key(app: &mut App, key: KeyEvent) -> Action {
    if key.code == KeyCode::Esc {
        app.close_compose();
        return Action::None;
    }
    let Some(form) = app.compose.as_mut() else {
        app.input_mode = InputMode::Normal;
        return Action::None;
    };
    if let Some(outbound) = form.handle_key(key) {
        app.close_compose();
        return Action::Send(outbound);
    }
    Action::None
}
