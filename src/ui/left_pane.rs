//! Character panel: who and where the player is.

use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .title(" Character ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .style(theme.secondary());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(inner);

    let (status_text, status_style) = match state.connection {
        ConnectionStatus::Connected => ("online", Theme::connected()),
        ConnectionStatus::Connecting => ("connecting", Theme::connecting()),
        ConnectionStatus::Disconnected => ("offline", Theme::disconnected()),
    };
    let info = vec![
        Line::from(Span::styled(
            state.character_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            state.room.clone().unwrap_or_else(|| "—".to_string()),
            Style::default().fg(Theme::TEXT_MUTED),
        )),
        Line::from(Span::styled(status_text, status_style)),
    ];
    frame.render_widget(Paragraph::new(info), chunks[0]);

    if let Some(vitals) = state.vitals {
        frame.render_widget(
            gauge("HP", vitals.hp, vitals.max_hp, vitals.hp_ratio(), Theme::HP),
            chunks[1],
        );
        frame.render_widget(
            gauge("MP", vitals.mp, vitals.max_mp, vitals.mp_ratio(), Theme::MP),
            chunks[2],
        );
    }
}

fn gauge(label: &str, value: u32, max: u32, ratio: f64, color: Color) -> Gauge<'static> {
    Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(ratio)
        .label(format!("{} {}/{}", label, value, max))
}
