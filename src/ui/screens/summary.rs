use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::finance::format_rate;
use crate::models::Kind;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Income
            Constraint::Length(5), // Expenses
            Constraint::Length(5), // Allocation
            Constraint::Length(5), // Final balance
            Constraint::Min(0),
        ])
        .split(area);

    render_income_row(f, rows[0], app);
    render_expense_row(f, rows[1], app);
    render_allocation_row(f, rows[2], app);
    render_balance(f, rows[3], app);
}

fn columns(area: Rect, n: u32) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..n).map(|_| Constraint::Ratio(1, n)))
        .split(area)
}

fn render_income_row(f: &mut Frame, area: Rect, app: &App) {
    let cards = columns(area, 3);
    let s = &app.summary;
    for (i, &kind) in Kind::income().iter().enumerate() {
        render_card(
            f,
            cards[i],
            kind.label(),
            s.subtotal(kind),
            theme::GREEN,
            Some(format!("{} items", s.transactions(kind).len())),
        );
    }
    render_card(f, cards[2], "Total Income (A)", s.total_income, theme::GREEN, None);
}

fn render_expense_row(f: &mut Frame, area: Rect, app: &App) {
    let cards = columns(area, 4);
    let s = &app.summary;
    for (i, &kind) in Kind::expenses().iter().enumerate() {
        render_card(
            f,
            cards[i],
            kind.label(),
            s.subtotal(kind),
            theme::RED,
            Some(format!("{} items", s.transactions(kind).len())),
        );
    }
    render_card(f, cards[3], "Total Expenses (C)", s.total_expenses, theme::RED, None);
}

fn render_allocation_row(f: &mut Frame, area: Rect, app: &App) {
    let cards = columns(area, 4);
    let s = &app.summary;
    let buckets = [
        ("Savings", s.rates.savings, s.allocation.savings),
        ("Debt Payment", s.rates.debt, s.allocation.debt),
        ("Investment", s.rates.investment, s.allocation.investment),
    ];
    for (i, (name, rate, amount)) in buckets.into_iter().enumerate() {
        render_card(
            f,
            cards[i],
            &format!("{name} ({})", format_rate(rate)),
            amount,
            theme::MAUVE,
            None,
        );
    }
    render_card(
        f,
        cards[3],
        "Total Allocation (B)",
        s.allocation.total(),
        theme::MAUVE,
        Some(format!("{} of income", format_rate(s.rates.total()))),
    );
}

fn render_balance(f: &mut Frame, area: Rect, app: &App) {
    let balance = app.summary.final_balance;
    render_card(
        f,
        area,
        "Final Balance (A - B - C)",
        balance,
        theme::balance_color(balance >= Decimal::ZERO),
        None,
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle.unwrap_or_default(), theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}
