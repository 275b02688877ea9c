mod kind;
mod monthly_budget;
mod period;
mod transaction;

pub(crate) use kind::Kind;
pub(crate) use monthly_budget::MonthlyBudget;
pub(crate) use period::{Direction, MonthCursor, Period};
pub(crate) use transaction::{
    parse_amount, NewTransaction, Transaction, MAX_AMOUNT, TIMESTAMP_FORMAT,
};

#[cfg(test)]
mod tests;
