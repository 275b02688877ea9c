use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use super::transactions::render_pane;
use crate::models::Kind;
use crate::ui::app::App;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (i, &kind) in Kind::expenses().iter().enumerate() {
        render_pane(f, panes[i], app, kind, app.pane == i);
    }
}
