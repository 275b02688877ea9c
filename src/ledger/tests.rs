#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::db::Database;
use crate::models::{Kind, MAX_AMOUNT};

fn ledger_at(month: u32, year: i32) -> Ledger<Database> {
    Ledger::new(
        Database::open_in_memory().unwrap(),
        MonthCursor::new(Period::new(month, year).unwrap()),
        AllocationRates::default(),
    )
}

fn txn(kind: Kind, amount: &str) -> NewTransaction {
    NewTransaction::parse(kind, amount, "item", "Other").unwrap()
}

#[test]
fn test_end_to_end_september_2025() {
    let mut ledger = ledger_at(9, 2025);
    ledger
        .add_transaction(
            &NewTransaction::parse(Kind::FixedIncome, "1000000", "Parents", "Parents").unwrap(),
        )
        .unwrap();
    ledger
        .add_transaction(
            &NewTransaction::parse(Kind::UnnecessaryExpense, "50000", "Pizza", "Eating out")
                .unwrap(),
        )
        .unwrap();

    let s = ledger.get_summary(Period::new(9, 2025).unwrap()).unwrap();
    assert_eq!(s.total_income, dec!(1000000));
    assert_eq!(s.total_expenses, dec!(50000));
    assert_eq!(s.allocation.savings, dec!(100000));
    assert_eq!(s.allocation.debt, dec!(50000));
    assert_eq!(s.allocation.investment, dec!(100000));
    assert_eq!(s.final_balance, dec!(700000));
    assert_eq!(ledger.current_summary().unwrap(), s);
}

#[test]
fn test_largest_amounts_summarize_without_overflow() {
    let mut ledger = ledger_at(9, 2025);
    let max = MAX_AMOUNT.to_string();
    for kind in [Kind::FixedIncome, Kind::FixedIncome, Kind::VariableIncome] {
        ledger.add_transaction(&txn(kind, &max)).unwrap();
    }
    ledger.add_transaction(&txn(Kind::NecessaryExpense, &max)).unwrap();

    let s = ledger.current_summary().unwrap();
    assert_eq!(s.total_income, MAX_AMOUNT * dec!(3));
    assert_eq!(s.total_expenses, MAX_AMOUNT);
    assert_eq!(s.final_balance, MAX_AMOUNT * dec!(3) * dec!(0.75) - MAX_AMOUNT);
}

#[test]
fn test_add_files_under_displayed_month() {
    let mut ledger = ledger_at(10, 2025);
    let id = ledger.add_transaction(&txn(Kind::FixedIncome, "10")).unwrap();

    let stored = ledger.store().get(id).unwrap().unwrap();
    assert_eq!(stored.period, Period::new(10, 2025).unwrap());
    assert_eq!(
        ledger.get_summary(Period::new(9, 2025).unwrap()).unwrap().total_income,
        Decimal::ZERO
    );
}

#[test]
fn test_delete_removes_from_summary_and_repeats_as_not_found() {
    let mut ledger = ledger_at(9, 2025);
    let id = ledger.add_transaction(&txn(Kind::NecessaryExpense, "300")).unwrap();
    assert_eq!(ledger.current_summary().unwrap().total_expenses, dec!(300));

    let removed = ledger.delete_transaction(id).unwrap();
    assert_eq!(removed.id, id);
    assert_eq!(ledger.current_summary().unwrap().total_expenses, Decimal::ZERO);

    let err = ledger.delete_transaction(id).unwrap_err();
    assert!(matches!(err, Error::NotFound(missing) if missing == id));
}

#[test]
fn test_delete_from_other_month() {
    let mut ledger = ledger_at(9, 2025);
    let id = ledger.add_transaction(&txn(Kind::FixedIncome, "50")).unwrap();
    ledger.navigate(Direction::Forward);

    let removed = ledger.delete_transaction(id).unwrap();
    assert_eq!(removed.period, Period::new(9, 2025).unwrap());
}

#[test]
fn test_navigate_returns_period_and_label() {
    let mut ledger = ledger_at(12, 2025);
    let (period, label) = ledger.navigate(Direction::Forward);
    assert_eq!(period, Period::new(1, 2026).unwrap());
    assert_eq!(label, "January 2026");

    let (period, label) = ledger.navigate(Direction::Backward);
    assert_eq!(period, Period::new(12, 2025).unwrap());
    assert_eq!(label, "December 2025");
}

#[test]
fn test_navigation_changes_summary() {
    let mut ledger = ledger_at(9, 2025);
    ledger.add_transaction(&txn(Kind::FixedIncome, "100")).unwrap();
    ledger.navigate(Direction::Forward);
    assert_eq!(ledger.current_summary().unwrap().total_income, Decimal::ZERO);
    ledger.navigate(Direction::Backward);
    assert_eq!(ledger.current_summary().unwrap().total_income, dec!(100));
}

#[test]
fn test_jump_to() {
    let mut ledger = ledger_at(1, 2020);
    let target = Period::new(7, 2031).unwrap();
    let (period, label) = ledger.jump_to(target);
    assert_eq!(period, target);
    assert_eq!(label, "July 2031");
    assert_eq!(ledger.period(), target);
}

#[test]
fn test_preview_allocation_single_item() {
    let ledger = ledger_at(9, 2025);
    let a = ledger.preview_allocation(dec!(32761)).unwrap();
    assert_eq!(a.savings, dec!(3276.1));
    assert_eq!(a.debt, dec!(1638.05));
    assert_eq!(a.investment, dec!(3276.1));
}

#[test]
fn test_preview_does_not_depend_on_month_totals() {
    let mut ledger = ledger_at(9, 2025);
    ledger.add_transaction(&txn(Kind::FixedIncome, "1000000")).unwrap();
    let a = ledger.preview_allocation(dec!(200)).unwrap();
    assert_eq!(a.total(), dec!(50));
}

#[test]
fn test_defaults_apply_without_budget_row() {
    let ledger = ledger_at(9, 2025);
    assert!(ledger
        .store()
        .monthly_budget(ledger.period())
        .unwrap()
        .is_none());
    assert_eq!(
        ledger.rates_for(ledger.period()).unwrap(),
        AllocationRates::default()
    );
}

#[test]
fn test_configured_default_rates() {
    let rates = AllocationRates::from_percentages(dec!(20), dec!(10), dec!(0)).unwrap();
    let mut ledger = Ledger::new(
        Database::open_in_memory().unwrap(),
        MonthCursor::new(Period::new(9, 2025).unwrap()),
        rates,
    );
    ledger.add_transaction(&txn(Kind::FixedIncome, "1000")).unwrap();
    let s = ledger.current_summary().unwrap();
    assert_eq!(s.allocation.savings, dec!(200));
    assert_eq!(s.allocation.debt, dec!(100));
    assert_eq!(s.allocation.investment, Decimal::ZERO);
    assert_eq!(s.final_balance, dec!(700));
}

#[test]
fn test_set_rates_applies_to_that_month_only() {
    let mut ledger = ledger_at(9, 2025);
    ledger.add_transaction(&txn(Kind::FixedIncome, "1000")).unwrap();
    let rates = AllocationRates::from_percentages(dec!(30), dec!(0), dec!(0)).unwrap();
    ledger.set_rates(rates).unwrap();

    let s = ledger.current_summary().unwrap();
    assert_eq!(s.rates, rates);
    assert_eq!(s.allocation.savings, dec!(300));
    assert_eq!(s.final_balance, dec!(700));

    let budget = ledger.store().monthly_budget(ledger.period()).unwrap().unwrap();
    assert_eq!(budget.total_income, dec!(1000));

    ledger.navigate(Direction::Forward);
    assert_eq!(
        ledger.rates_for(ledger.period()).unwrap(),
        AllocationRates::default()
    );
}

#[test]
fn test_budget_snapshot_follows_mutations() {
    let mut ledger = ledger_at(9, 2025);
    ledger.set_rates(AllocationRates::default()).unwrap();

    let id = ledger.add_transaction(&txn(Kind::VariableIncome, "400")).unwrap();
    let snapshot = |l: &Ledger<Database>| {
        l.store()
            .monthly_budget(l.period())
            .unwrap()
            .unwrap()
            .total_income
    };
    assert_eq!(snapshot(&ledger), dec!(400));

    ledger.delete_transaction(id).unwrap();
    assert_eq!(snapshot(&ledger), Decimal::ZERO);
}

#[test]
fn test_mutation_without_budget_row_creates_none() {
    let mut ledger = ledger_at(9, 2025);
    ledger.add_transaction(&txn(Kind::FixedIncome, "1")).unwrap();
    assert!(ledger
        .store()
        .monthly_budget(ledger.period())
        .unwrap()
        .is_none());
}
