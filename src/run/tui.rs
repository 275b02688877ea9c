use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::ui::app::{App, AppLedger, FormField, InputMode, Screen};
use crate::ui::commands;

pub(crate) fn as_tui(ledger: &mut AppLedger) -> Result<()> {
    let mut app = App::new(ledger)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ledger);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "tui aborted");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ledger: &mut AppLedger,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab bar, status bar, command bar, pane borders and header
            let content_height = f.area().height.saturating_sub(7) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, ledger)?,
                InputMode::Command => handle_command_input(key, app, ledger)?,
                InputMode::Form => handle_form_input(key, app, ledger)?,
                InputMode::Confirm => handle_confirm_input(key, app, ledger)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, ledger: &mut AppLedger) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('1') => switch_screen(app, ledger, Screen::Summary)?,
        KeyCode::Char('2') => switch_screen(app, ledger, Screen::Income)?,
        KeyCode::Char('3') => switch_screen(app, ledger, Screen::Expenses)?,
        KeyCode::Tab => {
            app.cycle_screen(true);
            app.refresh_preview(ledger)?;
        }
        KeyCode::BackTab => {
            app.cycle_screen(false);
            app.refresh_preview(ledger)?;
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.move_pane(true);
            app.refresh_preview(ledger)?;
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.move_pane(false);
            app.refresh_preview(ledger)?;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            app.refresh_preview(ledger)?;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            app.refresh_preview(ledger)?;
        }
        KeyCode::Char('g') => {
            app.move_top();
            app.refresh_preview(ledger)?;
        }
        KeyCode::Char('G') => {
            app.move_bottom();
            app.refresh_preview(ledger)?;
        }
        KeyCode::Char('H') => commands::handle_command("prev-month", app, ledger)?,
        KeyCode::Char('L') => commands::handle_command("next-month", app, ledger)?,
        KeyCode::Char('a') => match app.focused_kind() {
            Some(kind) => app.open_form(kind),
            None => app.set_status("Switch to Income or Expenses to add"),
        },
        KeyCode::Char('D') => commands::handle_command("delete", app, ledger)?,
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App, ledger: &mut AppLedger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            commands::handle_command(&input, app, ledger)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_form_input(key: KeyEvent, app: &mut App, ledger: &mut AppLedger) -> Result<()> {
    match key.code {
        KeyCode::Enter => return app.submit_form(ledger),
        KeyCode::Esc => {
            app.close_form();
            app.set_status("Add cancelled");
            return Ok(());
        }
        _ => {}
    }

    let Some(form) = app.form.as_mut() else {
        app.input_mode = InputMode::Normal;
        return Ok(());
    };
    match key.code {
        KeyCode::Tab => form.next_field(true),
        KeyCode::BackTab => form.next_field(false),
        KeyCode::Up if form.field == FormField::Category => form.cycle_category(false),
        KeyCode::Down if form.field == FormField::Category => form.cycle_category(true),
        KeyCode::Up => form.next_field(false),
        KeyCode::Down => form.next_field(true),
        KeyCode::Backspace => form.pop(),
        KeyCode::Char(c) => form.push(c),
        _ => {}
    }
    form.error = None;
    app.refresh_form_preview(ledger)
}

fn handle_confirm_input(key: KeyEvent, app: &mut App, ledger: &mut AppLedger) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_pending(ledger),
        _ => {
            // Any other key = cancel
            app.cancel_pending();
            Ok(())
        }
    }
}

fn switch_screen(app: &mut App, ledger: &AppLedger, screen: Screen) -> Result<()> {
    app.switch_screen(screen);
    app.refresh_preview(ledger)
}
