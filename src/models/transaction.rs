use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::{Kind, Period};
use crate::error::ValidationError;

pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Largest accepted amount. Keeps month totals far from `Decimal::MAX`.
// 1_000_000_000_000_000 (10^15) with scale 0; `Decimal::new` is not const.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Transaction {
    pub(crate) id: i64,
    pub(crate) kind: Kind,
    pub(crate) amount: Decimal,
    pub(crate) description: String,
    pub(crate) category: String,
    pub(crate) period: Period,
    pub(crate) created_at: NaiveDateTime,
}

impl Transaction {
    pub(crate) fn is_income(&self) -> bool {
        self.kind.is_income()
    }
}

/// A transaction that passed input validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewTransaction {
    kind: Kind,
    amount: Decimal,
    description: String,
    category: String,
}

impl NewTransaction {
    /// Validate raw form input. Nothing is written on failure.
    pub(crate) fn parse(
        kind: Kind,
        amount: &str,
        description: &str,
        category: &str,
    ) -> Result<Self, ValidationError> {
        let amount = parse_amount(amount)?;

        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        let category = category.trim();
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }

        Ok(Self {
            kind,
            amount,
            description: description.to_string(),
            category: category.to_string(),
        })
    }

    pub(crate) fn kind(&self) -> Kind {
        self.kind
    }

    pub(crate) fn amount(&self) -> Decimal {
        self.amount
    }

    pub(crate) fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn category(&self) -> &str {
        &self.category
    }
}

/// Parse a user-entered amount. `$` and thousands separators are ignored.
pub(crate) fn parse_amount(s: &str) -> Result<Decimal, ValidationError> {
    let cleaned: String = s.trim().replace(['$', ','], "");
    if cleaned.is_empty() {
        return Err(ValidationError::MissingAmount);
    }
    let amount = Decimal::from_str(&cleaned)
        .map_err(|_| ValidationError::InvalidAmount(s.trim().to_string()))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::NegativeAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(amount)
}
