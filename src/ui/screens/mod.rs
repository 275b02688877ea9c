pub(crate) mod expenses;
pub(crate) mod form;
pub(crate) mod income;
pub(crate) mod summary;
pub(crate) mod transactions;
