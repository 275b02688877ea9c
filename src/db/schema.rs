pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS transactions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    kind        TEXT NOT NULL CHECK (kind IN (
                    'income_fixed', 'income_variable',
                    'expense_indispensable', 'expense_necessary', 'expense_unnecessary')),
    amount      TEXT NOT NULL,
    description TEXT NOT NULL,
    category    TEXT NOT NULL,
    month       INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    year        INTEGER NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_transactions_period ON transactions(kind, year, month);

CREATE TABLE IF NOT EXISTS monthly_budgets (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    month           INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    year            INTEGER NOT NULL,
    total_income    TEXT NOT NULL DEFAULT '0',
    savings_rate    TEXT NOT NULL DEFAULT '0.10',
    debt_rate       TEXT NOT NULL DEFAULT '0.05',
    investment_rate TEXT NOT NULL DEFAULT '0.10',
    UNIQUE(month, year)
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

