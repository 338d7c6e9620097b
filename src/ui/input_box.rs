use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.focus == FocusPanel::Input;
    let block = Block::default()
        .title(" Command ")
        .title_style(if focused { Theme::title() } else { Theme::border() })
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .padding(Padding::horizontal(1))
        .style(theme.primary());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input_text = &state.input.text;

    if focused {
        let line = Line::from(vec![
            Span::styled("❯ ", Style::default().fg(Theme::ACCENT)),
            Span::styled(input_text.as_str(), Theme::input_text()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);

        if inner.width > 0 && inner.height > 0 {
            let cursor_x = cursor_column(inner, input_text, state.input.cursor);
            frame.set_cursor_position((cursor_x, inner.y));
        }
    } else {
        let paragraph = Paragraph::new(input_text.as_str()).style(Theme::input_text());
        frame.render_widget(paragraph, inner);
    }
}

/// Terminal column of the cursor, kept inside `inner` however long the line.
fn cursor_column(inner: Rect, text: &str, cursor: usize) -> u16 {
    const PROMPT_WIDTH: u16 = 2;
    let typed = UnicodeWidthStr::width(&text[..cursor.min(text.len())]);
    let typed = u16::try_from(typed).unwrap_or(u16::MAX);
    inner
        .x
        .saturating_add(PROMPT_WIDTH)
        .saturating_add(typed)
        .min(inner.right().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_after_prompt_and_typed_text() {
        let inner = Rect::new(3, 10, 40, 1);
        assert_eq!(cursor_column(inner, "", 0), 5);
        assert_eq!(cursor_column(inner, "look north", 4), 9);
    }

    #[test]
    fn test_cursor_clamped_for_very_long_line() {
        let inner = Rect::new(3, 10, 40, 1);
        let pasted = "x".repeat(100_000);
        assert_eq!(cursor_column(inner, &pasted, pasted.len()), inner.right() - 1);

        let edge = Rect::new(u16::MAX - 10, 0, 10, 1);
        assert_eq!(cursor_column(edge, &pasted, pasted.len()), edge.right() - 1);
    }
}
