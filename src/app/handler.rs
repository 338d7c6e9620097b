use crate::app::action::{send, Action};
use crate::app::event::{AppEvent, ConnectionId};
use crate::app::state::*;
use crate::net::protocol::{parse_line, ServerMessage};
use crate::ui::{action_bar, layout};
use crossterm::event::{
    Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Rect;
use tracing::{debug, warn};

const PAGE: usize = 10;

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => handle_terminal(state, cevent),
        AppEvent::ServerLine { id, line } => {
            if is_current(state, id) {
                handle_server_line(state, &line);
            }
            vec![]
        }
        AppEvent::Connected { id, host, port } => {
            if is_current(state, id) {
                state.connection = ConnectionStatus::Connected;
                state.system_message(format!("Connected to {}:{}.", host, port));
            }
            vec![]
        }
        AppEvent::Disconnected { id, reason } => {
            if is_current(state, id) {
                state.connection = ConnectionStatus::Disconnected;
                state.active_connection = None;
                state.system_message(format!("Disconnected: {}", reason));
            }
            vec![]
        }
        AppEvent::NetError { id, error } => {
            if is_current(state, id) {
                state.error_message(error);
            }
            vec![]
        }
        AppEvent::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            vec![]
        }
    }
}

fn is_current(state: &AppState, id: ConnectionId) -> bool {
    let current = state.active_connection == Some(id);
    if !current {
        debug!(id, "dropping event from stale connection");
    }
    current
}

pub fn handle_server_line(state: &mut AppState, line: &str) {
    match parse_line(line) {
        Ok(ServerMessage::Text(text)) => state.game_line(text),
        Ok(ServerMessage::Skills(skills)) => {
            debug!(count = skills.len(), "skills updated");
            state.set_character_skills(skills);
        }
        Ok(ServerMessage::Room(room)) => {
            state.room = Some(room);
            state.dirty = true;
        }
        Ok(ServerMessage::Character(name)) => {
            state.character_name = name;
            state.dirty = true;
        }
        Ok(ServerMessage::Vitals(vitals)) => {
            state.vitals = Some(vitals);
            state.dirty = true;
        }
        Err(e) => {
            warn!("bad server line {:?}: {}", line, e);
            state.game_line(line.trim_end().to_string());
        }
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => {
            state.dirty = true;
            handle_key(state, key)
        }
        CEvent::Mouse(mouse) => handle_mouse(state, mouse),
        CEvent::Resize(width, height) => {
            state.viewport = Rect::new(0, 0, width, height);
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn activate_skill(state: &mut AppState, index: usize) -> Vec<Action> {
    let Some(skill) = state.character_skills.get(index) else {
        return vec![];
    };
    let action = action_bar::on_activate(skill);
    state.selected_skill = Some(skill.key.clone());
    state.dirty = true;
    vec![action]
}

fn handle_mouse(state: &mut AppState, mouse: MouseEvent) -> Vec<Action> {
    let game_layout = layout::compute_layout(state.viewport, state.config.ui.middle_width);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            match action_bar::button_at(
                game_layout.action_bar,
                &state.character_skills,
                mouse.column,
                mouse.row,
            ) {
                Some(index) => activate_skill(state, index),
                None => vec![],
            }
        }
        MouseEventKind::ScrollUp => {
            state.output.scroll_up(3);
            state.dirty = true;
            vec![]
        }
        MouseEventKind::ScrollDown => {
            state.output.scroll_down(3);
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    match key.code {
        KeyCode::F(n) if (1..=12).contains(&n) => return activate_skill(state, n as usize - 1),
        KeyCode::Tab => {
            state.cycle_focus();
            return vec![];
        }
        KeyCode::Esc => {
            state.focus = FocusPanel::Input;
            return vec![];
        }
        KeyCode::PageUp => {
            state.output.scroll_up(PAGE);
            return vec![];
        }
        KeyCode::PageDown => {
            state.output.scroll_down(PAGE);
            return vec![];
        }
        _ => {}
    }

    match state.focus {
        FocusPanel::Input => handle_input_key(state, key),
        FocusPanel::ActionBar => handle_action_bar_key(state, key),
        FocusPanel::Output => handle_output_key(state, key),
    }
}

fn handle_action_bar_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Left => state.select_prev_skill(),
        KeyCode::Right => state.select_next_skill(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            return match state.selected_skill_index() {
                Some(index) => activate_skill(state, index),
                None => vec![],
            };
        }
        KeyCode::Char(c) => {
            // Typing jumps back to the command line
            state.focus = FocusPanel::Input;
            state.input.insert_char(c);
        }
        _ => {}
    }
    vec![]
}

fn handle_output_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Up => state.output.scroll_up(1),
        KeyCode::Down => state.output.scroll_down(1),
        KeyCode::Home => state.output.scroll_up(usize::MAX / 2),
        KeyCode::End => state.output.scroll_offset = 0,
        KeyCode::Char(c) => {
            state.focus = FocusPanel::Input;
            state.input.insert_char(c);
        }
        _ => {}
    }
    vec![]
}

fn handle_input_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => {
            let text = state.input.take_text();
            return submit_input(state, &text);
        }
        KeyCode::Char('w') if ctrl => state.input.delete_word_back(),
        KeyCode::Char('a') if ctrl => state.input.move_home(),
        KeyCode::Char('e') if ctrl => state.input.move_end(),
        KeyCode::Char(c) => state.input.insert_char(c),
        KeyCode::Backspace => state.input.delete_back(),
        KeyCode::Delete => state.input.delete_forward(),
        KeyCode::Left => state.input.move_left(),
        KeyCode::Right => state.input.move_right(),
        KeyCode::Home => state.input.move_home(),
        KeyCode::End => state.input.move_end(),
        KeyCode::Up => state.input.history_up(),
        KeyCode::Down => state.input.history_down(),
        _ => {}
    }
    vec![]
}

/// Typed lines go to the server verbatim; a few `/` commands stay local.
fn submit_input(state: &mut AppState, text: &str) -> Vec<Action> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return vec![];
    }
    state.output.scroll_offset = 0;

    match trimmed.to_lowercase().as_str() {
        "/quit" | "/exit" => vec![Action::Quit],
        "/connect" => vec![Action::Connect],
        "/disconnect" => vec![Action::Disconnect],
        "/help" => {
            for line in [
                "Type a command and press Enter to send it to the game.",
                "F1-F12 use the matching skill; Tab focuses the skill bar.",
                "/connect, /disconnect, /quit are handled locally.",
            ] {
                state.system_message(line.to_string());
            }
            vec![]
        }
        _ => vec![send(text)],
    }
}
