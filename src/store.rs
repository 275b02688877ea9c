//! The persistence seams the ledger core is written against.

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::models::{Kind, MonthlyBudget, NewTransaction, Period, Transaction};

/// Inserts, deletes and queries transactions.
///
/// Writes must be visible to the very next query.
pub(crate) trait TransactionStore {
    /// Store a validated transaction under `period` and return its new id.
    fn insert(
        &mut self,
        txn: &NewTransaction,
        period: Period,
        created_at: NaiveDateTime,
    ) -> Result<i64>;

    fn get(&self, id: i64) -> Result<Option<Transaction>>;

    /// Remove a transaction. Returns [`crate::error::Error::NotFound`] if no
    /// row has that id.
    fn delete(&mut self, id: i64) -> Result<()>;

    /// All transactions of `kind` in `period`, newest first.
    fn query(&self, kind: Kind, period: Period) -> Result<Vec<Transaction>>;
}

/// Optional per-month allocation parameters.
pub(crate) trait BudgetStore {
    fn monthly_budget(&self, period: Period) -> Result<Option<MonthlyBudget>>;

    fn upsert_monthly_budget(&mut self, budget: &MonthlyBudget) -> Result<()>;
}
