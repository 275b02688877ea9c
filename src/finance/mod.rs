mod allocation;
mod summary;

pub(crate) use allocation::{allocate, format_rate, Allocation, AllocationRates};
pub(crate) use summary::{summarize, CategorySummary, MonthlySummary};
