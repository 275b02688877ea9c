use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::app::{AddForm, FormField};
use crate::ui::render::centered;
use crate::ui::theme;
use crate::ui::util::format_amount;

const LABEL_WIDTH: usize = 13;

pub(crate) fn render(f: &mut Frame, area: Rect, form: &AddForm) {
    let mut lines = vec![Line::from("")];

    for &field in FormField::all() {
        let focused = field == form.field;
        let marker = if focused { "▸ " } else { "  " };
        let value_style = if focused {
            Style::default()
                .fg(theme::TEXT)
                .bg(theme::SURFACE)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::normal_style()
        };
        let cursor = if focused { "▏" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme::ACCENT)),
            Span::styled(
                format!("{:<LABEL_WIDTH$}", field.label()),
                theme::dim_style(),
            ),
            Span::styled(format!("{}{cursor}", form.value(field)), value_style),
        ]));
    }

    lines.push(Line::from(""));
    let hint = if form.field == FormField::Category {
        format!(
            "  Up/Down: {}",
            form.kind.suggested_categories().join(", ")
        )
    } else {
        "  Tab to move, Enter to save, Esc to cancel".to_string()
    };
    lines.push(Line::from(Span::styled(hint, theme::dim_style())));

    if let Some(preview) = form.preview {
        lines.push(Line::from(Span::styled(
            format!(
                "  Savings {}   Debt {}   Investment {}",
                format_amount(preview.savings),
                format_amount(preview.debt),
                format_amount(preview.investment)
            ),
            theme::allocation_style(),
        )));
    }

    if let Some(err) = &form.error {
        lines.push(Line::from(Span::styled(
            format!("  {err}"),
            theme::expense_style(),
        )));
    }

    let popup = centered(area, 64, lines.len() as u16 + 2);
    f.render_widget(Clear, popup);
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(Span::styled(
                format!(" Add {} ", form.kind.label()),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(widget, popup);
}
