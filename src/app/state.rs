use crate::app::event::ConnectionId;
use crate::config::AppConfig;
use chrono::Local;
use ratatui::layout::Rect;
use std::collections::VecDeque;

/// A character ability offered by the server. `key` is the list identity,
/// `name` is both the label and the source of the emitted command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub key: String,
    pub name: String,
}

impl Skill {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }

    /// The command sent when this skill is activated.
    pub fn command(&self) -> String {
        self.name.to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Vitals {
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
}

impl Vitals {
    pub fn hp_ratio(&self) -> f64 {
        ratio(self.hp, self.max_hp)
    }

    pub fn mp_ratio(&self) -> f64 {
        ratio(self.mp, self.max_mp)
    }
}

fn ratio(value: u32, max: u32) -> f64 {
    if max == 0 {
        0.0
    } else {
        (value as f64 / max as f64).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Game,
    Echo,
    System,
    Error,
}

#[derive(Debug, Clone)]
pub struct OutputLine {
    pub timestamp: String,
    pub text: String,
    pub kind: LineKind,
}

/// Scrollback of everything the server and client printed.
#[derive(Debug, Default)]
pub struct OutputLog {
    pub lines: VecDeque<OutputLine>,
    /// Lines scrolled up from the bottom; 0 follows new output.
    pub scroll_offset: usize,
}

impl OutputLog {
    pub fn push(&mut self, line: OutputLine, max_scrollback: usize) {
        self.lines.push_back(line);
        while self.lines.len() > max_scrollback.max(1) {
            self.lines.pop_front();
        }
        if self.scroll_offset > 0 {
            self.scroll_offset = (self.scroll_offset + 1).min(self.lines.len().saturating_sub(1));
        }
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = (self.scroll_offset + amount).min(self.lines.len().saturating_sub(1));
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
}

#[derive(Debug, Default)]
pub struct InputState {
    pub text: String,
    pub cursor: usize,
    pub history: Vec<String>,
    pub history_index: Option<usize>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.text.len())
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.next_boundary();
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Take the submitted line, recording it in history when non-empty.
    pub fn take_text(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        self.cursor = 0;
        self.history_index = None;
        if !text.is_empty() && self.history.last() != Some(&text) {
            self.history.push(text.clone());
        }
        text
    }

    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let idx = match self.history_index {
            Some(0) => return,
            Some(i) => i - 1,
            None => self.history.len() - 1,
        };
        self.history_index = Some(idx);
        self.text = self.history[idx].clone();
        self.cursor = self.text.len();
    }

    pub fn history_down(&mut self) {
        match self.history_index {
            Some(i) if i + 1 < self.history.len() => {
                self.history_index = Some(i + 1);
                self.text = self.history[i + 1].clone();
                self.cursor = self.text.len();
            }
            Some(_) => {
                self.history_index = None;
                self.text.clear();
                self.cursor = 0;
            }
            None => {}
        }
    }

    pub fn delete_word_back(&mut self) {
        let bytes = self.text.as_bytes();
        let mut pos = self.cursor;
        while pos > 0 && bytes[pos - 1] == b' ' {
            pos -= 1;
        }
        while pos > 0 && bytes[pos - 1] != b' ' {
            pos -= 1;
        }
        self.text.drain(pos..self.cursor);
        self.cursor = pos;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPanel {
    Input,
    ActionBar,
    Output,
}

/// The single-writer store. Only `handler::handle_event` mutates it; views
/// borrow it immutably for a render pass.
pub struct AppState {
    pub config: AppConfig,
    pub character_skills: Vec<Skill>,
    /// Key of the highlighted action bar button.
    pub selected_skill: Option<String>,
    pub character_name: String,
    pub room: Option<String>,
    pub vitals: Option<Vitals>,
    pub output: OutputLog,
    pub input: InputState,
    pub focus: FocusPanel,
    pub connection: ConnectionStatus,
    /// Events tagged with any other id come from a replaced connection.
    pub active_connection: Option<ConnectionId>,
    /// Terminal size, kept current for mouse hit-testing.
    pub viewport: Rect,
    pub should_quit: bool,
    pub dirty: bool,
    pub tick_count: u64,
    /// Lines appended since the main loop last drained them for the transcript.
    pub new_lines: Vec<OutputLine>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let character_name = config.server.character.clone();
        Self {
            config,
            character_skills: Vec::new(),
            selected_skill: None,
            character_name,
            room: None,
            vitals: None,
            output: OutputLog::default(),
            input: InputState::new(),
            focus: FocusPanel::Input,
            connection: ConnectionStatus::Disconnected,
            active_connection: None,
            viewport: Rect::default(),
            should_quit: false,
            dirty: true,
            tick_count: 0,
            new_lines: Vec::new(),
        }
    }

    /// Replace the skill list. The highlight follows its key when the skill
    /// is still present, otherwise it falls back to the first skill.
    pub fn set_character_skills(&mut self, skills: Vec<Skill>) {
        let keep = self
            .selected_skill
            .as_ref()
            .is_some_and(|key| skills.iter().any(|s| &s.key == key));
        if !keep {
            self.selected_skill = skills.first().map(|s| s.key.clone());
        }
        self.character_skills = skills;
        self.dirty = true;
    }

    pub fn selected_skill_index(&self) -> Option<usize> {
        let key = self.selected_skill.as_ref()?;
        self.character_skills.iter().position(|s| &s.key == key)
    }

    pub fn select_next_skill(&mut self) {
        self.step_selection(1);
    }

    pub fn select_prev_skill(&mut self) {
        self.step_selection(-1);
    }

    fn step_selection(&mut self, delta: isize) {
        let len = self.character_skills.len();
        if len == 0 {
            return;
        }
        let next = match self.selected_skill_index() {
            Some(i) => (i as isize + delta).rem_euclid(len as isize) as usize,
            None => 0,
        };
        self.selected_skill = Some(self.character_skills[next].key.clone());
        self.dirty = true;
    }

    fn push_line(&mut self, text: String, kind: LineKind) {
        let line = OutputLine {
            timestamp: Local::now()
                .format(&self.config.ui.timestamp_format)
                .to_string(),
            text,
            kind,
        };
        self.new_lines.push(line.clone());
        self.output.push(line, self.config.ui.max_scrollback);
        self.dirty = true;
    }

    pub fn game_line(&mut self, text: String) {
        self.push_line(text, LineKind::Game);
    }

    pub fn echo_line(&mut self, text: String) {
        self.push_line(text, LineKind::Echo);
    }

    pub fn system_message(&mut self, text: String) {
        self.push_line(text, LineKind::System);
    }

    pub fn error_message(&mut self, text: String) {
        self.push_line(text, LineKind::Error);
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPanel::Input => FocusPanel::ActionBar,
            FocusPanel::ActionBar => FocusPanel::Output,
            FocusPanel::Output => FocusPanel::Input,
        };
        self.dirty = true;
    }

    pub fn status_line(&self) -> String {
        let server = &self.config.server;
        match self.connection {
            ConnectionStatus::Connected => format!("Connected to {}:{}", server.host, server.port),
            ConnectionStatus::Connecting => format!("Connecting to {}:{}...", server.host, server.port),
            ConnectionStatus::Disconnected => "Disconnected".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(AppConfig::default())
    }

    #[test]
    fn test_skill_command_is_lowercase_name() {
        assert_eq!(Skill::new("1", "Fireball").command(), "fireball");
        assert_eq!(Skill::new("1", "ICE-BOLT").command(), "ice-bolt");
    }

    #[test]
    fn test_selection_follows_key_across_updates() {
        let mut s = state();
        s.set_character_skills(vec![Skill::new("1", "Fireball"), Skill::new("2", "Heal")]);
        assert_eq!(s.selected_skill_index(), Some(0));

        s.select_next_skill();
        assert_eq!(s.selected_skill.as_deref(), Some("2"));

        // "2" moved to the front: the highlight moves with it
        s.set_character_skills(vec![Skill::new("2", "Heal"), Skill::new("3", "Shield")]);
        assert_eq!(s.selected_skill_index(), Some(0));

        // "2" gone: fall back to the first skill
        s.set_character_skills(vec![Skill::new("3", "Shield")]);
        assert_eq!(s.selected_skill.as_deref(), Some("3"));

        s.set_character_skills(Vec::new());
        assert_eq!(s.selected_skill, None);
        s.select_next_skill();
        assert_eq!(s.selected_skill, None);
    }

    #[test]
    fn test_selection_wraps() {
        let mut s = state();
        s.set_character_skills(vec![Skill::new("1", "A"), Skill::new("2", "B")]);
        s.select_prev_skill();
        assert_eq!(s.selected_skill.as_deref(), Some("2"));
        s.select_next_skill();
        assert_eq!(s.selected_skill.as_deref(), Some("1"));
    }

    #[test]
    fn test_output_log_trims_scrollback() {
        let mut s = state();
        s.config.ui.max_scrollback = 3;
        for i in 0..5 {
            s.game_line(format!("line {}", i));
        }
        let texts: Vec<_> = s.output.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["line 2", "line 3", "line 4"]);
        assert_eq!(s.new_lines.len(), 5);
    }

    #[test]
    fn test_scroll_offset_pins_view_while_scrolled() {
        let mut log = OutputLog::default();
        let line = |t: &str| OutputLine {
            timestamp: String::new(),
            text: t.into(),
            kind: LineKind::Game,
        };
        for t in ["a", "b", "c"] {
            log.push(line(t), 100);
        }
        log.scroll_up(1);
        log.push(line("d"), 100);
        assert_eq!(log.scroll_offset, 2);
        log.scroll_down(5);
        assert_eq!(log.scroll_offset, 0);
        log.push(line("e"), 100);
        assert_eq!(log.scroll_offset, 0);
    }

    #[test]
    fn test_input_editing_and_history() {
        let mut input = InputState::new();
        for c in "cast héal".chars() {
            input.insert_char(c);
        }
        input.move_left();
        input.delete_back();
        assert_eq!(input.text, "cast hél");
        input.move_end();
        input.delete_word_back();
        assert_eq!(input.text, "cast ");

        assert_eq!(input.take_text(), "cast ");
        input.insert_char('n');
        assert_eq!(input.take_text(), "n");
        assert!(input.text.is_empty());

        input.history_up();
        assert_eq!(input.text, "n");
        input.history_up();
        assert_eq!(input.text, "cast ");
        input.history_down();
        assert_eq!(input.text, "n");
        input.history_down();
        assert_eq!(input.text, "");
    }

    #[test]
    fn test_vitals_ratio_handles_zero_max() {
        let v = Vitals {
            hp: 5,
            max_hp: 10,
            mp: 3,
            max_mp: 0,
        };
        assert_eq!(v.hp_ratio(), 0.5);
        assert_eq!(v.mp_ratio(), 0.0);
    }
}
