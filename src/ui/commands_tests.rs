#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::app::{App, AppLedger, InputMode, PendingAction, Screen};
use super::commands::*;
use crate::db::Database;
use crate::error::{Error, ValidationError};
use crate::finance::AllocationRates;
use crate::models::{Kind, MonthCursor, Period};
use crate::store::BudgetStore;

fn setup() -> (App, AppLedger) {
    let ledger = AppLedger::new(
        Database::open_in_memory().unwrap(),
        MonthCursor::new(Period::new(9, 2025).unwrap()),
        AllocationRates::default(),
    );
    let app = App::new(&ledger).unwrap();
    (app, ledger)
}

fn run(input: &str, app: &mut App, ledger: &mut AppLedger) {
    handle_command(input, app, ledger).unwrap();
}

// ── Parsing ───────────────────────────────────────────────────

#[test]
fn test_parse_add_args() {
    let txn = parse_add_args("unnecessary 50000 Pizza night | Eating out").unwrap();
    assert_eq!(txn.kind(), Kind::UnnecessaryExpense);
    assert_eq!(txn.amount(), dec!(50000));
    assert_eq!(txn.description(), "Pizza night");
    assert_eq!(txn.category(), "Eating out");
}

#[test]
fn test_parse_add_args_accepts_tags() {
    let txn = parse_add_args("income_fixed 1,000,000 Parents | Parents").unwrap();
    assert_eq!(txn.kind(), Kind::FixedIncome);
    assert_eq!(txn.amount(), dec!(1000000));
}

#[test]
fn test_parse_add_args_errors() {
    assert_eq!(
        parse_add_args("salary 10 x | y").err(),
        Some(ValidationError::UnknownKind("salary".into()))
    );
    assert_eq!(
        parse_add_args("fixed").err(),
        Some(ValidationError::MissingAmount)
    );
    assert_eq!(
        parse_add_args("fixed 10 | Parents").err(),
        Some(ValidationError::EmptyDescription)
    );
    assert_eq!(
        parse_add_args("fixed 10 Allowance").err(),
        Some(ValidationError::MissingCategory)
    );
    assert_eq!(
        parse_add_args("fixed -10 Allowance | Parents").err(),
        Some(ValidationError::NegativeAmount)
    );
}

#[test]
fn test_find_closest() {
    assert_eq!(find_closest("expnses"), "expenses");
    assert_eq!(find_closest("next-mnth"), "next-month");
    assert_eq!(find_closest("rate"), "rates");
}

#[test]
fn test_every_command_has_description() {
    assert!(COMMANDS.values().all(|c| !c.description.is_empty()));
    for name in ["q", "help", "summary", "income", "expenses", "add", "delete", "rates", "export"] {
        assert!(COMMANDS.contains_key(name), "missing :{name}");
    }
}

// ── Dispatch ──────────────────────────────────────────────────

#[test]
fn test_unknown_command_suggests() {
    let (mut app, mut ledger) = setup();
    run("sumary", &mut app, &mut ledger);
    assert_eq!(
        app.status_message,
        "Unknown command: :sumary. Did you mean :summary?"
    );
}

#[test]
fn test_quit_and_help() {
    let (mut app, mut ledger) = setup();
    run("help", &mut app, &mut ledger);
    assert!(app.show_help);
    run("q", &mut app, &mut ledger);
    assert!(!app.running);
}

#[test]
fn test_screen_commands() {
    let (mut app, mut ledger) = setup();
    run("income", &mut app, &mut ledger);
    assert_eq!(app.screen, Screen::Income);
    run("e", &mut app, &mut ledger);
    assert_eq!(app.screen, Screen::Expenses);
    run("s", &mut app, &mut ledger);
    assert_eq!(app.screen, Screen::Summary);
}

#[test]
fn test_month_navigation_commands() {
    let (mut app, mut ledger) = setup();
    run("next-month", &mut app, &mut ledger);
    assert_eq!(app.month_label, "October 2025");
    assert_eq!(app.status_message, "Month: October 2025");

    run("month 2024-12", &mut app, &mut ledger);
    assert_eq!(ledger.period(), Period::new(12, 2024).unwrap());
    run("next-month", &mut app, &mut ledger);
    assert_eq!(app.month_label, "January 2025");
    run("prev-month", &mut app, &mut ledger);
    assert_eq!(app.month_label, "December 2024");
}

#[test]
fn test_month_command_rejects_garbage() {
    let (mut app, mut ledger) = setup();
    run("month someday", &mut app, &mut ledger);
    assert_eq!(ledger.period(), Period::new(9, 2025).unwrap());
    assert!(app.status_message.starts_with("invalid month"));
}

#[test]
fn test_reference_month_through_commands() {
    let (mut app, mut ledger) = setup();
    run("add fixed 1000000 Allowance | Parents", &mut app, &mut ledger);
    run("add unnecessary 50000 Pizza | Eating out", &mut app, &mut ledger);

    assert_eq!(app.summary.total_income, dec!(1000000));
    assert_eq!(app.summary.total_expenses, dec!(50000));
    assert_eq!(app.summary.final_balance, dec!(700000));
    assert_eq!(app.transaction_count, 2);
}

#[test]
fn test_add_validation_error_in_status() {
    let (mut app, mut ledger) = setup();
    run("add necessary ten Gym | Gym", &mut app, &mut ledger);
    assert_eq!(app.status_message, "invalid amount: ten");
    assert_eq!(app.summary.transaction_count(), 0);
}

#[test]
fn test_delete_requires_selection() {
    let (mut app, mut ledger) = setup();
    run("delete", &mut app, &mut ledger);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending_action.is_none());
}

#[test]
fn test_delete_asks_for_confirmation() {
    let (mut app, mut ledger) = setup();
    run("add unnecessary 50000 Pizza | Eating out", &mut app, &mut ledger);
    run("expenses", &mut app, &mut ledger);
    app.move_pane(false);
    run("delete", &mut app, &mut ledger);

    assert_eq!(app.input_mode, InputMode::Confirm);
    assert!(matches!(
        app.pending_action,
        Some(PendingAction::DeleteTransaction { ref description, .. }) if description == "Pizza"
    ));
    assert_eq!(app.confirm_message, "Delete 'Pizza' ($50,000)?");

    app.confirm_pending(&mut ledger).unwrap();
    assert_eq!(app.summary.transaction_count(), 0);
}

#[test]
fn test_rates_command() {
    let (mut app, mut ledger) = setup();
    run("add fixed 1000 Allowance | Parents", &mut app, &mut ledger);
    run("rates 20 0 5", &mut app, &mut ledger);

    assert_eq!(app.summary.allocation.savings, dec!(200));
    assert_eq!(app.summary.allocation.debt, dec!(0));
    assert_eq!(app.summary.allocation.investment, dec!(50));
    assert_eq!(app.summary.final_balance, dec!(750));
    assert!(ledger.store().monthly_budget(ledger.period()).unwrap().is_some());

    run("rates", &mut app, &mut ledger);
    assert_eq!(
        app.status_message,
        "Rates for September 2025: savings 20%, debt 0%, investment 5%"
    );
}

#[test]
fn test_rates_command_rejects_overflow() {
    let (mut app, mut ledger) = setup();
    run("rates 50 40 20", &mut app, &mut ledger);
    assert_eq!(app.status_message, "allocation rates add up to more than 100%");
    assert_eq!(app.summary.rates, AllocationRates::default());
}

#[test]
fn test_export_command() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("september.csv");
    let (mut app, mut ledger) = setup();
    run("add fixed 1000 Allowance | Parents", &mut app, &mut ledger);
    run(&format!("export {}", path.display()), &mut app, &mut ledger);

    assert_eq!(
        app.status_message,
        format!("Exported 1 transactions to {}", path.display())
    );
    assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);
}

#[test]
fn test_export_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.csv");
    let (mut app, mut ledger) = setup();
    run("add fixed 1 x | y", &mut app, &mut ledger);
    run(&format!("export {}", path.display()), &mut app, &mut ledger);
    assert!(app.status_message.starts_with("Export failed"));
}

#[test]
fn test_export_status_reports_file_errors() {
    let io_error = anyhow::Error::new(std::io::Error::other("disk full"));
    let message = export_status(Err(io_error), "out.csv", "September 2025").unwrap();
    assert_eq!(message, "Export failed: disk full");
    assert_eq!(
        export_status(Ok(0), "out.csv", "September 2025").unwrap(),
        "No transactions for September 2025"
    );
}

#[test]
fn test_export_status_propagates_store_errors() {
    let store_error = Error::Store(rusqlite::Error::InvalidQuery);
    let result = export_status(
        Err(anyhow::Error::new(store_error).context("exporting September 2025")),
        "out.csv",
        "September 2025",
    );
    let err = result.unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Store(_))));
}
