use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.focus == FocusPanel::Output;
    let block = Block::default()
        .title(state.room.as_deref().map(|r| format!(" {} ", r)).unwrap_or_default())
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .style(theme.primary());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let log = &state.output;
    let total = log.lines.len();
    let available_height = inner.height as usize;

    let end = total.saturating_sub(log.scroll_offset);
    let start = end.saturating_sub(available_height);
    let show_ts = state.config.ui.show_timestamps;

    let lines: Vec<Line> = log
        .lines
        .iter()
        .skip(start)
        .take(end - start)
        .map(|line| format_line(line, show_ts))
        .collect();

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);

    if total > available_height {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(available_height)).position(start);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .thumb_symbol("┃")
            .track_symbol(Some("│"));
        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

fn format_line(line: &OutputLine, show_ts: bool) -> Line<'static> {
    let mut spans = Vec::with_capacity(3);
    if show_ts {
        spans.push(Span::styled(format!("[{}] ", line.timestamp), Theme::timestamp()));
    }
    match line.kind {
        LineKind::Game => spans.push(Span::raw(line.text.clone())),
        LineKind::Echo => spans.push(Span::styled(format!("> {}", line.text), Theme::echo_line())),
        LineKind::System => {
            spans.push(Span::styled("• ", Theme::system_message()));
            spans.push(Span::styled(line.text.clone(), Theme::system_message()));
        }
        LineKind::Error => {
            spans.push(Span::styled("✘ ", Theme::error_message()));
            spans.push(Span::styled(line.text.clone(), Theme::error_message()));
        }
    }
    Line::from(spans)
}
