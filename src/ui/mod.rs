pub mod action_bar;
mod game_container;
mod input_box;
pub mod layout;
mod left_pane;
mod middle_pane;
mod output;
mod right_pane;
mod status_bar;
pub mod theme;

use crate::app::state::AppState;
use ratatui::prelude::*;
use theme::Theme;

pub fn render(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let area = frame.area();
    let status = layout::compute_layout(area, state.config.ui.middle_width).status_bar;

    game_container::render(frame, area, state, theme);
    status_bar::render(frame, status, state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{Skill, Vitals};
    use crate::config::AppConfig;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    fn draw(state: &AppState) -> Buffer {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| render(f, state, &theme)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn screen(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_full_screen_renders_every_pane() {
        let mut state = AppState::new(AppConfig::default());
        state.character_name = "Brannoc".into();
        state.room = Some("Town Square".into());
        state.vitals = Some(Vitals {
            hp: 10,
            max_hp: 20,
            mp: 4,
            max_mp: 8,
        });
        state.set_character_skills(vec![Skill::new("1", "Fireball"), Skill::new("2", "Heal")]);
        state.game_line("A fountain gurgles.".into());

        let text = screen(&draw(&state));
        assert!(text.contains("Brannoc"));
        assert!(text.contains("Town Square"));
        assert!(text.contains("A fountain gurgles."));
        assert!(text.contains("Fireball"));
        assert!(text.contains("HP 10/20"));
        assert!(text.contains("Disconnected"));
    }

    #[test]
    fn test_side_panes_use_secondary_background() {
        let state = AppState::new(AppConfig::default());
        let theme = Theme::default();
        let buf = draw(&state);
        // left edge of the left pane and right edge of the right pane
        assert_eq!(buf[(0u16, 0u16)].bg, theme.bg_secondary);
        assert_eq!(buf[(119u16, 0u16)].bg, theme.bg_secondary);
        // inside the middle pane's output block
        assert_eq!(buf[(60u16, 5u16)].bg, theme.bg_primary);
    }

    #[test]
    fn test_render_is_pure() {
        let mut state = AppState::new(AppConfig::default());
        state.set_character_skills(vec![Skill::new("1", "Fireball")]);
        state.dirty = false;
        let first = draw(&state);
        let second = draw(&state);
        assert_eq!(first, second);
        assert!(!state.dirty);
        assert!(state.new_lines.is_empty());
    }
}
