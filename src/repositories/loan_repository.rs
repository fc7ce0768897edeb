// src/repositories/loan_repository.rs
//
// Loan persistence. Loans are never deleted; closed loans are the reader's
// borrowing history and feed the special-edition eligibility count.

use std::sync::Arc;

use chrono::NaiveDate;
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::Loan;
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait LoanRepository: Send + Sync {
    fn save(&self, loan: &Loan) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Loan>>;
    fn list_all(&self) -> AppResult<Vec<Loan>>;
    fn list_active(&self) -> AppResult<Vec<Loan>>;
    fn list_by_reader(&self, reader_id: Uuid) -> AppResult<Vec<Loan>>;
    fn count_closed_for_reader(&self, reader_id: Uuid) -> AppResult<i64>;
}

pub struct SqliteLoanRepository {
    pool: Arc<ConnectionPool>,
}

const LOAN_COLUMNS: &str = "id, reader_id, book_id, loan_date, due_date, active";
const DATE_FORMAT: &str = "%Y-%m-%d";

impl SqliteLoanRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_loan(row: &Row) -> Result<Loan, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let reader_str: String = row.get("reader_id")?;
        let reader_id = Uuid::parse_str(&reader_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let book_str: String = row.get("book_id")?;
        let book_id = Uuid::parse_str(&book_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let loan_date_str: String = row.get("loan_date")?;
        let loan_date = NaiveDate::parse_from_str(&loan_date_str, DATE_FORMAT)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let due_date_str: String = row.get("due_date")?;
        let due_date = NaiveDate::parse_from_str(&due_date_str, DATE_FORMAT)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(Loan {
            id,
            reader_id,
            book_id,
            loan_date,
            due_date,
            active: row.get("active")?,
        })
    }
}

impl LoanRepository for SqliteLoanRepository {
    fn save(&self, loan: &Loan) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR REPLACE INTO loans (id, reader_id, book_id, loan_date, due_date, active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                loan.id.to_string(),
                loan.reader_id.to_string(),
                loan.book_id.to_string(),
                loan.loan_date.format(DATE_FORMAT).to_string(),
                loan.due_date.format(DATE_FORMAT).to_string(),
                loan.active,
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Loan>> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare(&format!("SELECT {} FROM loans WHERE id = ?1", LOAN_COLUMNS))?;

        match stmt.query_row(params![id.to_string()], Self::row_to_loan) {
            Ok(loan) => Ok(Some(loan)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Loan>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM loans ORDER BY loan_date, id",
            LOAN_COLUMNS
        ))?;

        let loans: Vec<Loan> = stmt
            .query_map([], Self::row_to_loan)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(loans)
    }

    fn list_active(&self) -> AppResult<Vec<Loan>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM loans WHERE active = 1 ORDER BY loan_date, id",
            LOAN_COLUMNS
        ))?;

        let loans: Vec<Loan> = stmt
            .query_map([], Self::row_to_loan)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(loans)
    }

    fn list_by_reader(&self, reader_id: Uuid) -> AppResult<Vec<Loan>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM loans WHERE reader_id = ?1 ORDER BY loan_date, id",
            LOAN_COLUMNS
        ))?;

        let loans: Vec<Loan> = stmt
            .query_map(params![reader_id.to_string()], Self::row_to_loan)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(loans)
    }

    fn count_closed_for_reader(&self, reader_id: Uuid) -> AppResult<i64> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM loans WHERE reader_id = ?1 AND active = 0",
            params![reader_id.to_string()],
            |row| row.get(0),
        )?;

        Ok(count)
    }
}
