use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::transactions::render_pane;
use crate::finance::format_rate;
use crate::models::Kind;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    for (i, &kind) in Kind::income().iter().enumerate() {
        render_pane(f, panes[i], app, kind, app.pane == i);
    }

    render_preview_line(f, chunks[1], app);
}

/// What the selected income item contributes to each allocation bucket.
fn render_preview_line(f: &mut Frame, area: Rect, app: &App) {
    let rates = &app.summary.rates;
    let line = match (app.selected_transaction(), app.selection_preview) {
        (Some(txn), Some(preview)) => Line::from(vec![
            Span::styled(
                format!(" {}: ", truncate(&txn.description, 24)),
                theme::normal_style(),
            ),
            Span::styled(
                format!(
                    "Savings ({}) {}   Debt ({}) {}   Investment ({}) {}",
                    format_rate(rates.savings),
                    format_amount(preview.savings),
                    format_rate(rates.debt),
                    format_amount(preview.debt),
                    format_rate(rates.investment),
                    format_amount(preview.investment),
                ),
                theme::allocation_style(),
            ),
        ]),
        _ => Line::from(Span::styled(
            " Select an income item to see its allocation",
            theme::dim_style(),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}
