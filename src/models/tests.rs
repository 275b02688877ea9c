#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::error::ValidationError;

// ── Kind ──────────────────────────────────────────────────────

#[test]
fn test_kind_parse_tags() {
    assert_eq!(Kind::parse("income_fixed"), Some(Kind::FixedIncome));
    assert_eq!(Kind::parse("income_variable"), Some(Kind::VariableIncome));
    assert_eq!(
        Kind::parse("expense_indispensable"),
        Some(Kind::IndispensableExpense)
    );
    assert_eq!(Kind::parse("expense_necessary"), Some(Kind::NecessaryExpense));
    assert_eq!(
        Kind::parse("expense_unnecessary"),
        Some(Kind::UnnecessaryExpense)
    );
}

#[test]
fn test_kind_parse_aliases() {
    assert_eq!(Kind::parse("FIXED"), Some(Kind::FixedIncome));
    assert_eq!(Kind::parse(" variable "), Some(Kind::VariableIncome));
    assert_eq!(Kind::parse("Unnecessary"), Some(Kind::UnnecessaryExpense));
}

#[test]
fn test_kind_parse_unknown() {
    assert_eq!(Kind::parse("expense_necesarios"), None);
    assert_eq!(Kind::parse(""), None);
    assert_eq!(
        "bonus".parse::<Kind>(),
        Err(ValidationError::UnknownKind("bonus".into()))
    );
}

#[test]
fn test_kind_roundtrip() {
    for kind in Kind::all() {
        assert_eq!(Kind::parse(kind.as_str()), Some(*kind), "{kind}");
    }
}

#[test]
fn test_kind_income_expense_split() {
    assert_eq!(Kind::all().len(), 5);
    assert!(Kind::income().iter().all(|k| k.is_income()));
    assert!(Kind::expenses().iter().all(|k| !k.is_income()));
    assert_eq!(Kind::income().len() + Kind::expenses().len(), Kind::all().len());
}

#[test]
fn test_kind_suggestions_end_with_other() {
    for kind in Kind::all() {
        assert_eq!(kind.suggested_categories().last(), Some(&"Other"));
    }
}

// ── Period ────────────────────────────────────────────────────

#[test]
fn test_period_new_bounds() {
    assert!(Period::new(0, 2025).is_none());
    assert!(Period::new(13, 2025).is_none());
    assert!(Period::new(1, 2025).is_some());
    assert!(Period::new(12, -40).is_some());
}

#[test]
fn test_period_display_and_label() {
    let p = Period::new(9, 2025).unwrap();
    assert_eq!(p.to_string(), "2025-09");
    assert_eq!(p.label(), "September 2025");
    assert_eq!(Period::new(1, 2024).unwrap().label(), "January 2024");
    assert_eq!(Period::new(12, 2024).unwrap().month_name(), "December");
}

#[test]
fn test_period_parse_formats() {
    let sept = Period::new(9, 2025).unwrap();
    assert_eq!(Period::parse("2025-09", 1999).unwrap(), sept);
    assert_eq!(Period::parse("2025-9", 1999).unwrap(), sept);
    assert_eq!(Period::parse("09/2025", 1999).unwrap(), sept);
    assert_eq!(Period::parse(" 9 ", 2025).unwrap(), sept);
}

#[test]
fn test_period_negative_year_reads_back() {
    let p = Period::new(3, -5).unwrap();
    assert_eq!(p.to_string(), "-005-03");
    assert_eq!(Period::parse(&p.to_string(), 2025).unwrap(), p);
    assert_eq!(Period::parse("-1-12", 2025).unwrap(), Period::new(12, -1).unwrap());
    assert_eq!(Period::parse("0000-01", 2025).unwrap(), Period::new(1, 0).unwrap());
}

#[test]
fn test_period_parse_invalid() {
    for bad in ["2025-13", "2025-00", "sept", "", "2025-xx", "13", "-3", "2025--09"] {
        assert!(
            matches!(Period::parse(bad, 2025), Err(ValidationError::InvalidPeriod(_))),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_period_ordering() {
    let dec_2024 = Period::new(12, 2024).unwrap();
    let jan_2025 = Period::new(1, 2025).unwrap();
    assert!(dec_2024 < jan_2025);
}

// ── MonthCursor ───────────────────────────────────────────────

#[test]
fn test_cursor_advance_within_year() {
    let mut cursor = MonthCursor::new(Period::new(3, 2025).unwrap());
    cursor.advance();
    assert_eq!(cursor.period(), Period::new(4, 2025).unwrap());
}

#[test]
fn test_cursor_year_rollover_forward() {
    let mut cursor = MonthCursor::new(Period::new(12, 2025).unwrap());
    cursor.advance();
    assert_eq!(cursor.period(), Period::new(1, 2026).unwrap());
}

#[test]
fn test_cursor_year_rollover_backward() {
    let mut cursor = MonthCursor::new(Period::new(1, 2025).unwrap());
    cursor.retreat();
    assert_eq!(cursor.period(), Period::new(12, 2024).unwrap());
}

#[test]
fn test_cursor_round_trip_every_month() {
    for year in [-1, 0, 2025] {
        for month in 1..=12 {
            let start = Period::new(month, year).unwrap();
            let mut cursor = MonthCursor::new(start);
            cursor.advance();
            cursor.retreat();
            assert_eq!(cursor.period(), start);
            cursor.retreat();
            cursor.advance();
            assert_eq!(cursor.period(), start);
        }
    }
}

#[test]
fn test_cursor_year_unbounded() {
    let mut cursor = MonthCursor::new(Period::new(1, 0).unwrap());
    cursor.retreat();
    assert_eq!(cursor.period(), Period::new(12, -1).unwrap());
}

#[test]
fn test_cursor_step_and_label() {
    let mut cursor = MonthCursor::new(Period::new(9, 2025).unwrap());
    cursor.step(Direction::Forward);
    assert_eq!(cursor.display_label(), "October 2025");
    cursor.step(Direction::Backward);
    cursor.step(Direction::Backward);
    assert_eq!(cursor.display_label(), "August 2025");
}

#[test]
fn test_cursor_full_year_cycle() {
    let start = Period::new(5, 2025).unwrap();
    let mut cursor = MonthCursor::new(start);
    for _ in 0..12 {
        cursor.advance();
    }
    assert_eq!(cursor.period(), Period::new(5, 2026).unwrap());
}

#[test]
fn test_cursor_today_and_jump() {
    let mut cursor = MonthCursor::today();
    assert_eq!(cursor.period(), Period::current());

    let target = Period::new(2, 1999).unwrap();
    cursor.jump_to(target);
    assert_eq!(cursor.period(), target);
    assert_eq!(cursor.display_label(), "February 1999");
}

// ── NewTransaction validation ─────────────────────────────────

#[test]
fn test_new_transaction_valid() {
    let txn =
        NewTransaction::parse(Kind::FixedIncome, "1000000", " Parents ", " Parents ").unwrap();
    assert_eq!(txn.kind(), Kind::FixedIncome);
    assert_eq!(txn.amount(), dec!(1000000));
    assert_eq!(txn.description(), "Parents");
    assert_eq!(txn.category(), "Parents");
}

#[test]
fn test_new_transaction_empty_description() {
    assert_eq!(
        NewTransaction::parse(Kind::FixedIncome, "10", "   ", "Salary"),
        Err(ValidationError::EmptyDescription)
    );
}

#[test]
fn test_new_transaction_missing_category() {
    assert_eq!(
        NewTransaction::parse(Kind::FixedIncome, "10", "Pay", ""),
        Err(ValidationError::MissingCategory)
    );
}

#[test]
fn test_new_transaction_amount_checked_first() {
    assert_eq!(
        NewTransaction::parse(Kind::FixedIncome, "", "", ""),
        Err(ValidationError::MissingAmount)
    );
}

#[test]
fn test_parse_amount_accepts_currency_formatting() {
    assert_eq!(parse_amount("$1,000,000").unwrap(), dec!(1000000));
    assert_eq!(parse_amount("32761").unwrap(), dec!(32761));
    assert_eq!(parse_amount("12.50").unwrap(), dec!(12.50));
    assert_eq!(parse_amount("0").unwrap(), Decimal::ZERO);
}

#[test]
fn test_parse_amount_rejects() {
    assert_eq!(parse_amount(" "), Err(ValidationError::MissingAmount));
    assert_eq!(parse_amount("-5"), Err(ValidationError::NegativeAmount));
    assert_eq!(
        parse_amount("ten"),
        Err(ValidationError::InvalidAmount("ten".into()))
    );
    assert!(matches!(parse_amount("1.2.3"), Err(ValidationError::InvalidAmount(_))));
}

#[test]
fn test_parse_amount_upper_bound() {
    assert_eq!(parse_amount("1,000,000,000,000,000").unwrap(), MAX_AMOUNT);
    assert_eq!(
        parse_amount("1000000000000000.01"),
        Err(ValidationError::AmountTooLarge)
    );
    assert_eq!(
        NewTransaction::parse(
            Kind::FixedIncome,
            "50000000000000000000000000000",
            "Windfall",
            "Other"
        ),
        Err(ValidationError::AmountTooLarge)
    );
}
