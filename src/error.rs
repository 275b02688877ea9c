use thiserror::Error;

/// Errors raised by the ledger core and the transaction store.
#[derive(Debug, Error)]
pub(crate) enum Error {
    /// User input was rejected before anything reached the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A delete targeted an id that is not in the store.
    #[error("no transaction with id {0}")]
    NotFound(i64),

    /// The database could not be opened, read or written.
    #[error("store unavailable: {0}")]
    Store(#[from] rusqlite::Error),
}

impl Error {
    /// Validation and not-found errors are reported to the user and the app
    /// keeps running. Store errors abort the operation.
    pub(crate) fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ValidationError {
    #[error("amount is required")]
    MissingAmount,
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("amount cannot be negative")]
    NegativeAmount,
    #[error("amount cannot exceed 1,000,000,000,000,000")]
    AmountTooLarge,
    #[error("description is required")]
    EmptyDescription,
    #[error("category is required")]
    MissingCategory,
    #[error("unknown kind: {0}")]
    UnknownKind(String),
    #[error("invalid month: {0} (use YYYY-MM)")]
    InvalidPeriod(String),
    #[error("invalid rate: {0}")]
    InvalidRate(String),
    #[error("allocation rates add up to more than 100%")]
    RatesExceedIncome,
}

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;
