//! The skill action bar.
//!
//! A pure projection of `AppState::character_skills`: one button per skill,
//! in order, spread across the bar with the free space between them.
//! Activating a button yields exactly one [`Action`]; rendering never does.

use crate::app::action::{send, Action};
use crate::app::state::{AppState, FocusPanel, Skill};
use crate::ui::theme::Theme;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Position};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

const MIN_BUTTON_WIDTH: u16 = 7;

/// What the bar reads from the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionBarProps<'a> {
    pub character_skills: &'a [Skill],
    pub selected: Option<usize>,
    pub focused: bool,
}

pub fn select(state: &AppState) -> ActionBarProps<'_> {
    ActionBarProps {
        character_skills: &state.character_skills,
        selected: state.selected_skill_index(),
        focused: state.focus == FocusPanel::ActionBar,
    }
}

/// Label plus a cell of padding and a border on each side.
pub fn button_width(skill: &Skill) -> u16 {
    let label = UnicodeWidthStr::width(skill.name.as_str()).min(u16::MAX as usize - 4) as u16;
    (label + 4).max(MIN_BUTTON_WIDTH)
}

/// Width of the "+k" marker shown when `hidden` skills do not fit.
fn overflow_width(hidden: usize) -> u16 {
    format!("+{}", hidden).len() as u16 + 2
}

/// How many leading skills fit at full width, leaving room for the overflow
/// marker when some do not.
fn visible_count(area_width: u16, skills: &[Skill]) -> usize {
    let total: u32 = skills.iter().map(|s| u32::from(button_width(s))).sum();
    if total <= u32::from(area_width) {
        return skills.len();
    }
    let mut used = 0u32;
    let mut count = 0;
    for (i, skill) in skills.iter().enumerate() {
        let next = used + u32::from(button_width(skill));
        let marker = u32::from(overflow_width(skills.len() - i - 1));
        if next + marker > u32::from(area_width) {
            break;
        }
        used = next;
        count = i + 1;
    }
    count
}

/// Button rects for the skills that fit, plus the overflow marker rect when
/// some skills are left out. Buttons are never narrower than their label.
fn bar_layout(area: Rect, skills: &[Skill]) -> (Vec<Rect>, Option<(Rect, usize)>) {
    if skills.is_empty() {
        return (Vec::new(), None);
    }
    let shown = visible_count(area.width, skills);
    let hidden = skills.len() - shown;

    let mut constraints: Vec<Constraint> = skills[..shown]
        .iter()
        .map(|s| Constraint::Length(button_width(s)))
        .collect();
    if hidden > 0 {
        constraints.push(Constraint::Length(overflow_width(hidden)));
    }

    let mut rects = Layout::horizontal(constraints)
        .flex(Flex::SpaceBetween)
        .split(area)
        .to_vec();
    let marker = if hidden > 0 {
        rects.pop().map(|rect| (rect, hidden))
    } else {
        None
    };
    (rects, marker)
}

/// One rect per visible skill, in skill order. Skills that do not fit after
/// the last visible button get no rect and cannot be clicked.
pub fn button_rects(area: Rect, skills: &[Skill]) -> Vec<Rect> {
    bar_layout(area, skills).0
}

/// Index of the button under a terminal cell.
pub fn button_at(area: Rect, skills: &[Skill], column: u16, row: u16) -> Option<usize> {
    button_rects(area, skills)
        .iter()
        .position(|rect| rect.contains(Position::new(column, row)))
}

pub fn on_activate(skill: &Skill) -> Action {
    send(skill.command())
}

pub fn render(frame: &mut Frame, area: Rect, props: &ActionBarProps) {
    let (rects, overflow) = bar_layout(area, props.character_skills);
    for (i, (skill, rect)) in props.character_skills.iter().zip(rects).enumerate() {
        let highlighted = props.focused && props.selected == Some(i);
        let (style, border_style, border_type) = if highlighted {
            (Theme::button_selected(), Theme::button_selected(), BorderType::Thick)
        } else {
            (Theme::button(), Theme::button_border(), BorderType::Rounded)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style)
            .style(style);

        let label = Paragraph::new(skill.name.as_str())
            .alignment(Alignment::Center)
            .style(style)
            .block(block);
        frame.render_widget(label, rect);
    }

    if let Some((rect, hidden)) = overflow {
        let row = Rect::new(rect.x, rect.y + rect.height / 2, rect.width, rect.height.min(1));
        let marker = Paragraph::new(format!("+{}", hidden))
            .alignment(Alignment::Center)
            .style(Theme::border());
        frame.render_widget(marker, row);
    }
}
