//! Top-level composition: flexible left pane, fixed middle pane, flexible
//! right pane, all on the theme's text colour and font.

use crate::app::state::AppState;
use crate::ui::layout::compute_layout;
use crate::ui::theme::Theme;
use crate::ui::{left_pane, middle_pane, right_pane};
use ratatui::prelude::*;
use ratatui::widgets::Block;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let layout = compute_layout(area, state.config.ui.middle_width);

    frame.render_widget(Block::default().style(theme.secondary()), layout.left);
    frame.render_widget(Block::default().style(theme.primary()), layout.middle);
    frame.render_widget(Block::default().style(theme.secondary()), layout.right);

    left_pane::render(frame, layout.left_inner, state, theme);
    middle_pane::render(frame, &layout, state, theme);
    right_pane::render(frame, layout.right_inner, state, theme);
}
