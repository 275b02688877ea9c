use rust_decimal::Decimal;

use super::Period;
use crate::finance::AllocationRates;

/// Per-month allocation parameters plus a snapshot of that month's income.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthlyBudget {
    pub(crate) period: Period,
    pub(crate) total_income: Decimal,
    pub(crate) rates: AllocationRates,
}

impl MonthlyBudget {
    pub(crate) fn new(period: Period, total_income: Decimal, rates: AllocationRates) -> Self {
        Self {
            period,
            total_income,
            rates,
        }
    }
}
