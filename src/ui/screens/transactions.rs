use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::Kind;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

/// One kind's transactions for the displayed month, newest first.
pub(crate) fn render_pane(f: &mut Frame, area: Rect, app: &App, kind: Kind, focused: bool) {
    let txns = app.summary.transactions(kind);
    let subtotal = app.summary.subtotal(kind);
    let amount_style = if kind.is_income() {
        theme::income_style()
    } else {
        theme::expense_style()
    };

    let title = Line::from(vec![
        Span::styled(
            format!(" {} ({}) ", kind.label(), txns.len()),
            Style::default()
                .fg(if focused { theme::ACCENT } else { theme::TEXT_DIM })
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{} ", format_amount(subtotal)), amount_style),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::pane_border(focused))
        .title(title);

    if txns.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("Nothing this month", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled("Press a to add one", theme::dim_style())),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header = Row::new(
        ["Date", "Description", "Category", "Amount"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    )
    .height(1);

    let selected = app.selected_index(kind);
    let desc_width = area.width.saturating_sub(8 + 16 + 14 + 6).max(8) as usize;

    let rows: Vec<Row> = txns
        .iter()
        .enumerate()
        .skip(app.scroll_offset(kind))
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let style = if focused && i == selected {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(txn.created_at.format("%b %d").to_string()),
                Cell::from(truncate(&txn.description, desc_width)),
                Cell::from(truncate(&txn.category, 16)),
                Cell::from(Span::styled(format_amount(txn.amount), amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Min(8),
        Constraint::Length(16),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
