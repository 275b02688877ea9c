//! The operations the front ends call: summaries, previews, navigation and
//! mutations of the displayed month.

use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::finance::{allocate, summarize, Allocation, AllocationRates, MonthlySummary};
use crate::models::{Direction, MonthCursor, MonthlyBudget, NewTransaction, Period, Transaction};
use crate::store::{BudgetStore, TransactionStore};

pub(crate) struct Ledger<S> {
    store: S,
    cursor: MonthCursor,
    default_rates: AllocationRates,
}

impl<S: TransactionStore + BudgetStore> Ledger<S> {
    pub(crate) fn new(store: S, cursor: MonthCursor, default_rates: AllocationRates) -> Self {
        Self {
            store,
            cursor,
            default_rates,
        }
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn period(&self) -> Period {
        self.cursor.period()
    }

    pub(crate) fn display_label(&self) -> String {
        self.cursor.display_label()
    }

    /// Rates stored for `period`, falling back to the configured defaults.
    pub(crate) fn rates_for(&self, period: Period) -> Result<AllocationRates> {
        Ok(self
            .store
            .monthly_budget(period)?
            .map_or(self.default_rates, |b| b.rates))
    }

    pub(crate) fn get_summary(&self, period: Period) -> Result<MonthlySummary> {
        let rates = self.rates_for(period)?;
        summarize(&self.store, period, &rates)
    }

    pub(crate) fn current_summary(&self) -> Result<MonthlySummary> {
        self.get_summary(self.period())
    }

    /// What one income item would contribute under the displayed month's
    /// rates. Independent of the month's aggregate allocation.
    pub(crate) fn preview_allocation(&self, amount: Decimal) -> Result<Allocation> {
        let rates = self.rates_for(self.period())?;
        Ok(allocate(amount, &rates))
    }

    pub(crate) fn navigate(&mut self, direction: Direction) -> (Period, String) {
        self.cursor.step(direction);
        tracing::debug!(period = %self.period(), ?direction, "navigated");
        (self.period(), self.display_label())
    }

    pub(crate) fn jump_to(&mut self, period: Period) -> (Period, String) {
        self.cursor.jump_to(period);
        tracing::debug!(%period, "jumped to month");
        (period, self.display_label())
    }

    /// Record a transaction in the displayed month, stamped with the local
    /// time.
    pub(crate) fn add_transaction(&mut self, txn: &NewTransaction) -> Result<i64> {
        let period = self.period();
        let now = chrono::Local::now().naive_local();
        let id = self.store.insert(txn, period, now)?;
        tracing::info!(
            id,
            kind = txn.kind().as_str(),
            amount = %txn.amount(),
            %period,
            "added transaction"
        );
        self.refresh_budget_snapshot(period)?;
        Ok(id)
    }

    /// Delete by id from any month. Returns the removed transaction.
    pub(crate) fn delete_transaction(&mut self, id: i64) -> Result<Transaction> {
        let Some(txn) = self.store.get(id)? else {
            tracing::warn!(id, "delete of unknown transaction");
            return Err(Error::NotFound(id));
        };
        self.store.delete(id)?;
        tracing::info!(id, period = %txn.period, "deleted transaction");
        self.refresh_budget_snapshot(txn.period)?;
        Ok(txn)
    }

    /// Store custom rates for the displayed month along with its current
    /// income.
    pub(crate) fn set_rates(&mut self, rates: AllocationRates) -> Result<()> {
        let period = self.period();
        let summary = summarize(&self.store, period, &rates)?;
        self.store
            .upsert_monthly_budget(&MonthlyBudget::new(period, summary.total_income, rates))?;
        tracing::info!(
            %period,
            savings = %rates.savings,
            debt = %rates.debt,
            investment = %rates.investment,
            "set allocation rates"
        );
        Ok(())
    }

    /// Keep an existing budget row's income snapshot current. Months without
    /// a row are left alone.
    fn refresh_budget_snapshot(&mut self, period: Period) -> Result<()> {
        if let Some(mut budget) = self.store.monthly_budget(period)? {
            budget.total_income = summarize(&self.store, period, &budget.rates)?.total_income;
            self.store.upsert_monthly_budget(&budget)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
