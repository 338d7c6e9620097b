use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

/// Rows used by the player HUD: one vitals line over a row of bordered buttons.
pub const HUD_HEIGHT: u16 = 4;

pub struct GameLayout {
    pub left: Rect,
    pub middle: Rect,
    pub right: Rect,
    pub left_inner: Rect,
    pub right_inner: Rect,
    pub output: Rect,
    pub vitals: Rect,
    pub action_bar: Rect,
    pub input_box: Rect,
    pub status_bar: Rect,
}

/// Three columns: flexible left and right panes share whatever the fixed
/// middle pane leaves over. Side panes are padded, the middle is not.
pub fn compute_layout(area: Rect, middle_width: u16) -> GameLayout {
    // Main vertical split: game row | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let row = main_chunks[0];
    let status_bar = main_chunks[1];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(middle_width.min(row.width)),
            Constraint::Fill(1),
        ])
        .split(row);

    let left = columns[0];
    let middle = columns[1];
    let right = columns[2];

    let padding = Margin {
        horizontal: 2,
        vertical: 1,
    };

    // Middle column: output | HUD | input
    let middle_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(HUD_HEIGHT),
            Constraint::Length(3),
        ])
        .split(middle);

    let hud = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(middle_chunks[1]);

    GameLayout {
        left,
        middle,
        right,
        left_inner: left.inner(padding),
        right_inner: right.inner(padding),
        output: middle_chunks[0],
        vitals: hud[0],
        action_bar: hud[1],
        input_box: middle_chunks[2],
        status_bar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_is_fixed_and_sides_share_the_rest() {
        let layout = compute_layout(Rect::new(0, 0, 120, 40), 80);
        assert_eq!(layout.middle.width, 80);
        assert_eq!(layout.left.width, 20);
        assert_eq!(layout.right.width, 20);
        assert_eq!(layout.left.x, 0);
        assert_eq!(layout.middle.x, 20);
        assert_eq!(layout.right.x, 100);
        assert_eq!(layout.middle.height, 39);
        assert_eq!(layout.status_bar, Rect::new(0, 39, 120, 1));

        let wide = compute_layout(Rect::new(0, 0, 200, 40), 80);
        assert_eq!(wide.middle.width, 80);
        assert_eq!(wide.left.width, 60);
        assert_eq!(wide.right.width, 60);
    }

    #[test]
    fn test_side_panes_are_padded() {
        let layout = compute_layout(Rect::new(0, 0, 120, 40), 80);
        assert_eq!(layout.left_inner, Rect::new(2, 1, 16, 37));
        assert_eq!(layout.right_inner, Rect::new(102, 1, 16, 37));
    }

    #[test]
    fn test_middle_column_stack() {
        let layout = compute_layout(Rect::new(0, 0, 120, 40), 80);
        assert_eq!(layout.input_box.height, 3);
        assert_eq!(layout.vitals.height, 1);
        assert_eq!(layout.action_bar.height, HUD_HEIGHT - 1);
        assert_eq!(layout.output.height, 39 - HUD_HEIGHT - 3);
        assert_eq!(layout.action_bar.width, 80);
        assert_eq!(layout.action_bar.y + layout.action_bar.height, layout.input_box.y);
    }

    #[test]
    fn test_narrow_terminal_gives_everything_to_middle() {
        let layout = compute_layout(Rect::new(0, 0, 60, 20), 80);
        assert_eq!(layout.middle.width, 60);
        assert_eq!(layout.left.width, 0);
        assert_eq!(layout.right.width, 0);
    }
}
