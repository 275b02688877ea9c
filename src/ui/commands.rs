use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use super::app::{App, AppLedger, PendingAction, Screen};
use crate::error::{Error, ValidationError};
use crate::export::export_period;
use crate::finance::{format_rate, AllocationRates};
use crate::models::{Direction, Kind, NewTransaction, Period};
use crate::ui::util::format_amount;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut AppLedger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Coiner", cmd_quit, r);
    register_command!("quit", "Quit Coiner", cmd_quit, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("s", "Go to Summary", cmd_summary, r);
    register_command!("summary", "Go to Summary", cmd_summary, r);
    register_command!("i", "Go to Income", cmd_income, r);
    register_command!("income", "Go to Income", cmd_income, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!("m", "Show month (e.g. :m 2025-09)", cmd_month, r);
    register_command!("month", "Show month (e.g. :month 2025-09)", cmd_month, r);
    register_command!(
        "a",
        "Add transaction (e.g. :a fixed 1000000 Allowance | Parents)",
        cmd_add,
        r
    );
    register_command!(
        "add",
        "Add transaction (e.g. :add unnecessary 50000 Pizza | Eating out)",
        cmd_add,
        r
    );
    register_command!("d", "Delete selected transaction", cmd_delete, r);
    register_command!("delete", "Delete selected transaction", cmd_delete, r);
    register_command!(
        "rates",
        "Set this month's rates (e.g. :rates 10 5 10)",
        cmd_rates,
        r
    );
    register_command!(
        "export",
        "Export this month to CSV (e.g. :export ~/september.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    ledger: &mut AppLedger,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, ledger)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

pub(crate) fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Parse `<kind> <amount> <description> | <category>`.
pub(crate) fn parse_add_args(args: &str) -> Result<NewTransaction, ValidationError> {
    let mut parts = args.trim().splitn(3, char::is_whitespace);
    let kind_str = parts.next().unwrap_or("");
    if kind_str.is_empty() {
        return Err(ValidationError::UnknownKind(String::new()));
    }
    let kind: Kind = kind_str.parse()?;
    let amount = parts.next().unwrap_or("");
    let rest = parts.next().unwrap_or("");
    let (description, category) = rest.split_once('|').unwrap_or((rest, ""));
    NewTransaction::parse(kind, amount, description, category)
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &mut AppLedger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &mut AppLedger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_summary(_args: &str, app: &mut App, _ledger: &mut AppLedger) -> anyhow::Result<()> {
    app.switch_screen(Screen::Summary);
    Ok(())
}

fn cmd_income(_args: &str, app: &mut App, ledger: &mut AppLedger) -> anyhow::Result<()> {
    app.switch_screen(Screen::Income);
    app.refresh_preview(ledger)
}

fn cmd_expenses(_args: &str, app: &mut App, ledger: &mut AppLedger) -> anyhow::Result<()> {
    app.switch_screen(Screen::Expenses);
    app.refresh_preview(ledger)
}

fn cmd_next_month(_args: &str, app: &mut App, ledger: &mut AppLedger) -> anyhow::Result<()> {
    step_month(app, ledger, Direction::Forward)
}

fn cmd_prev_month(_args: &str, app: &mut App, ledger: &mut AppLedger) -> anyhow::Result<()> {
    step_month(app, ledger, Direction::Backward)
}

fn step_month(app: &mut App, ledger: &mut AppLedger, direction: Direction) -> anyhow::Result<()> {
    let (_, label) = ledger.navigate(direction);
    app.refresh(ledger)?;
    app.set_status(format!("Month: {label}"));
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, ledger: &mut AppLedger) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!("Month: {}", ledger.display_label()));
        return Ok(());
    }

    let parsed = Period::parse(args, ledger.period().year()).map_err(Error::from);
    if let Some(period) = app.report(parsed)? {
        let (_, label) = ledger.jump_to(period);
        app.refresh(ledger)?;
        app.set_status(format!("Month: {label}"));
    }
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, ledger: &mut AppLedger) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :add <kind> <amount> <description> | <category>");
        return Ok(());
    }

    let Some(txn) = app.report(parse_add_args(args).map_err(Error::from))? else {
        return Ok(());
    };
    ledger.add_transaction(&txn)?;
    app.refresh(ledger)?;
    app.set_status(format!(
        "Added {} {}: {} to {}",
        txn.kind().label(),
        format_amount(txn.amount()),
        txn.description(),
        app.month_label
    ));
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _ledger: &mut AppLedger) -> anyhow::Result<()> {
    let Some(txn) = app.selected_transaction() else {
        app.set_status("Select a transaction on Income or Expenses first");
        return Ok(());
    };

    let id = txn.id;
    let description = txn.description.clone();
    let message = format!("Delete '{description}' ({})?", format_amount(txn.amount));
    app.request_confirm(PendingAction::DeleteTransaction { id, description }, message);
    Ok(())
}

fn cmd_rates(args: &str, app: &mut App, ledger: &mut AppLedger) -> anyhow::Result<()> {
    if args.is_empty() {
        let rates = ledger.rates_for(ledger.period())?;
        app.set_status(format!(
            "Rates for {}: savings {}, debt {}, investment {}",
            app.month_label,
            format_rate(rates.savings),
            format_rate(rates.debt),
            format_rate(rates.investment)
        ));
        return Ok(());
    }

    let parsed = AllocationRates::parse_percentages(args).map_err(Error::from);
    if let Some(rates) = app.report(parsed)? {
        ledger.set_rates(rates)?;
        app.refresh(ledger)?;
        app.set_status(format!(
            "Rates for {} set to {} / {} / {}",
            app.month_label,
            format_rate(rates.savings),
            format_rate(rates.debt),
            format_rate(rates.investment)
        ));
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, ledger: &mut AppLedger) -> anyhow::Result<()> {
    let period = ledger.period();
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/coiner-export-{period}.csv")
    } else {
        crate::run::shellexpand(args)
    };

    let result = export_period(ledger.store(), period, Path::new(&path));
    let message = export_status(result, &path, &app.month_label)?;
    app.set_status(message);
    Ok(())
}

/// Status line for an export attempt. File and CSV failures are reported;
/// store failures propagate.
pub(crate) fn export_status(
    result: anyhow::Result<usize>,
    path: &str,
    month_label: &str,
) -> anyhow::Result<String> {
    match result {
        Ok(0) => Ok(format!("No transactions for {month_label}")),
        Ok(count) => Ok(format!("Exported {count} transactions to {path}")),
        Err(e) if e.downcast_ref::<Error>().is_some_and(|err| !err.is_recoverable()) => Err(e),
        Err(e) => Ok(format!("Export failed: {e:#}")),
    }
}
