//! Skill list with hotkeys, and key help.

use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

const HELP: &[(&str, &str)] = &[
    ("Tab", "switch focus"),
    ("F1-F12", "use skill"),
    ("←/→ Enter", "skills bar"),
    ("PgUp/PgDn", "scroll"),
    ("/connect", "reconnect"),
    ("/quit", "exit"),
];

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let chunks = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(HELP.len() as u16 + 2),
    ])
    .split(area);

    let selected = state.selected_skill_index();
    let mut items: Vec<ListItem> = state
        .character_skills
        .iter()
        .enumerate()
        .map(|(i, skill)| {
            let hotkey = if i < 12 {
                format!("F{:<3}", i + 1)
            } else {
                "    ".to_string()
            };
            let style = if selected == Some(i) {
                Style::default().fg(Theme::ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(hotkey, Style::default().fg(Theme::TEXT_MUTED)),
                Span::styled(skill.name.clone(), style),
            ]))
        })
        .collect();

    if items.is_empty() {
        items.push(ListItem::new(Span::styled(
            " —",
            Style::default().fg(Theme::TEXT_MUTED),
        )));
    }

    let title = match state.character_skills.len() {
        0 => " Skills ".to_string(),
        n => format!(" Skills ({}) ", n),
    };
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .style(theme.secondary()),
    );
    frame.render_widget(list, chunks[0]);

    let help: Vec<Line> = HELP
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("{:<10}", key), Style::default().fg(Theme::ACCENT)),
                Span::styled(*what, Style::default().fg(Theme::TEXT_MUTED)),
            ])
        })
        .collect();
    let help = Paragraph::new(help).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Keys ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .style(theme.secondary()),
    );
    frame.render_widget(help, chunks[1]);
}
