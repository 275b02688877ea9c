mod schema;

use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::finance::AllocationRates;
use crate::models::*;
use crate::store::{BudgetStore, TransactionStore};

const TRANSACTION_COLUMNS: &str =
    "id, kind, amount, description, category, month, year, created_at";

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let mut db = Self { conn };
        db.ensure_schema()?;
        tracing::info!(path = %path.display(), "opened database");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.ensure_schema()?;
        Ok(db)
    }

    /// Create the schema on a fresh file, otherwise require the version this
    /// build writes.
    fn ensure_schema(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::info!(version = schema::CURRENT_VERSION, "created schema");
            return Ok(());
        }

        let stored: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })?;
        if stored != schema::CURRENT_VERSION {
            tracing::error!(
                stored,
                expected = schema::CURRENT_VERSION,
                "unsupported schema version"
            );
            return Err(Error::Store(rusqlite::Error::FromSqlConversionFailure(
                0,
                Type::Integer,
                format!(
                    "unsupported schema version {stored} (expected {})",
                    schema::CURRENT_VERSION
                )
                .into(),
            )));
        }
        Ok(())
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn get_transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }
}

impl TransactionStore for Database {
    fn insert(
        &mut self,
        txn: &NewTransaction,
        period: Period,
        created_at: NaiveDateTime,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO transactions (kind, amount, description, category, month, year, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                txn.kind().as_str(),
                txn.amount().to_string(),
                txn.description(),
                txn.category(),
                period.month(),
                period.year(),
                created_at.format(TIMESTAMP_FORMAT).to_string(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get(&self, id: i64) -> Result<Option<Transaction>> {
        let result = self.conn.query_row(
            &format!("SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = ?1"),
            params![id],
            transaction_from_row,
        );
        match result {
            Ok(t) => Ok(Some(t)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    fn query(&self, kind: Kind, period: Period) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions
             WHERE kind = ?1 AND month = ?2 AND year = ?3
             ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map(
            params![kind.as_str(), period.month(), period.year()],
            transaction_from_row,
        )?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}

impl BudgetStore for Database {
    fn monthly_budget(&self, period: Period) -> Result<Option<MonthlyBudget>> {
        let result = self.conn.query_row(
            "SELECT total_income, savings_rate, debt_rate, investment_rate
             FROM monthly_budgets WHERE month = ?1 AND year = ?2",
            params![period.month(), period.year()],
            |row| {
                Ok(MonthlyBudget::new(
                    period,
                    decimal_column(row, 0)?,
                    AllocationRates {
                        savings: decimal_column(row, 1)?,
                        debt: decimal_column(row, 2)?,
                        investment: decimal_column(row, 3)?,
                    },
                ))
            },
        );
        match result {
            Ok(b) => Ok(Some(b)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn upsert_monthly_budget(&mut self, budget: &MonthlyBudget) -> Result<()> {
        self.conn.execute(
            "INSERT INTO monthly_budgets (month, year, total_income, savings_rate, debt_rate, investment_rate)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(month, year) DO UPDATE SET
                total_income = ?3, savings_rate = ?4, debt_rate = ?5, investment_rate = ?6",
            params![
                budget.period.month(),
                budget.period.year(),
                budget.total_income.to_string(),
                budget.rates.savings.to_string(),
                budget.rates.debt.to_string(),
                budget.rates.investment.to_string(),
            ],
        )?;
        Ok(())
    }
}

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let kind_tag: String = row.get(1)?;
    let kind = Kind::parse(&kind_tag).ok_or_else(|| conversion_error(1, &kind_tag))?;
    let month: u32 = row.get(5)?;
    let year: i32 = row.get(6)?;
    let period = Period::new(month, year).ok_or_else(|| conversion_error(5, &month))?;
    let created_str: String = row.get(7)?;
    let created_at = NaiveDateTime::parse_from_str(&created_str, TIMESTAMP_FORMAT)
        .map_err(|_| conversion_error(7, &created_str))?;
    let amount = decimal_column(row, 2)?;
    if amount < Decimal::ZERO || amount > MAX_AMOUNT {
        return Err(conversion_error(2, &amount));
    }

    Ok(Transaction {
        id: row.get(0)?,
        kind,
        amount,
        description: row.get(3)?,
        category: row.get(4)?,
        period,
        created_at,
    })
}

fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text).map_err(|_| conversion_error(idx, &text))
}

fn conversion_error(idx: usize, value: &dyn std::fmt::Display) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        Type::Text,
        format!("unexpected value: {value}").into(),
    )
}
