use rust_decimal::Decimal;

use super::allocation::{allocate, Allocation, AllocationRates};
use crate::error::Result;
use crate::models::{Kind, Period, Transaction};
use crate::store::TransactionStore;

/// One kind's transactions for a month and their sum.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategorySummary {
    pub(crate) kind: Kind,
    /// Newest first, as returned by the store.
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) subtotal: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthlySummary {
    pub(crate) period: Period,
    /// One entry per kind, in `Kind::all()` order.
    pub(crate) categories: Vec<CategorySummary>,
    pub(crate) total_income: Decimal,
    pub(crate) total_expenses: Decimal,
    pub(crate) rates: AllocationRates,
    pub(crate) allocation: Allocation,
    pub(crate) final_balance: Decimal,
}

impl MonthlySummary {
    pub(crate) fn category(&self, kind: Kind) -> Option<&CategorySummary> {
        self.categories.iter().find(|c| c.kind == kind)
    }

    pub(crate) fn subtotal(&self, kind: Kind) -> Decimal {
        self.category(kind).map_or(Decimal::ZERO, |c| c.subtotal)
    }

    pub(crate) fn transactions(&self, kind: Kind) -> &[Transaction] {
        self.category(kind)
            .map(|c| c.transactions.as_slice())
            .unwrap_or_default()
    }

    pub(crate) fn transaction_count(&self) -> usize {
        self.categories.iter().map(|c| c.transactions.len()).sum()
    }
}

/// Build the summary of `period` from whatever the store holds for it.
/// An empty month yields an all-zero summary.
pub(crate) fn summarize<S: TransactionStore + ?Sized>(
    store: &S,
    period: Period,
    rates: &AllocationRates,
) -> Result<MonthlySummary> {
    let mut categories = Vec::with_capacity(Kind::all().len());
    for &kind in Kind::all() {
        let transactions = store.query(kind, period)?;
        let subtotal = transactions.iter().map(|t| t.amount).sum();
        categories.push(CategorySummary {
            kind,
            transactions,
            subtotal,
        });
    }

    let sum_of = |kinds: &[Kind]| -> Decimal {
        categories
            .iter()
            .filter(|c| kinds.contains(&c.kind))
            .map(|c| c.subtotal)
            .sum()
    };
    let total_income = sum_of(Kind::income());
    let total_expenses = sum_of(Kind::expenses());

    let allocation = allocate(total_income, rates);
    let final_balance = total_income - allocation.total() - total_expenses;

    tracing::debug!(
        %period,
        %total_income,
        %total_expenses,
        %final_balance,
        "summarized month"
    );

    Ok(MonthlySummary {
        period,
        categories,
        total_income,
        total_expenses,
        rates: *rates,
        allocation,
        final_balance,
    })
}
