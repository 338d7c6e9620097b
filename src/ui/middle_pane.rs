//! Output log, player HUD and command input, top to bottom.

use crate::app::state::AppState;
use crate::ui::layout::GameLayout;
use crate::ui::theme::Theme;
use crate::ui::{action_bar, input_box, output};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, layout: &GameLayout, state: &AppState, theme: &Theme) {
    output::render(frame, layout.output, state, theme);
    render_vitals(frame, layout.vitals, state);
    action_bar::render(frame, layout.action_bar, &action_bar::select(state));
    input_box::render(frame, layout.input_box, state, theme);
}

fn render_vitals(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(v) = state.vitals else {
        return;
    };
    let line = Line::from(vec![
        Span::styled(format!(" HP {}/{} ", v.hp, v.max_hp), Style::default().fg(Theme::HP)),
        Span::styled(format!(" MP {}/{} ", v.mp, v.max_mp), Style::default().fg(Theme::MP)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
