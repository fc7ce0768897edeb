// src/repositories/reader_repository.rs
//
// Reader persistence.
//
// The borrowed-books list is not stored here; it is rebuilt from the active
// loans when the catalog is hydrated.

use std::sync::Arc;

use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::Reader;
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait ReaderRepository: Send + Sync {
    fn save(&self, reader: &Reader) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Reader>>;
    fn get_by_card_number(&self, card_number: u32) -> AppResult<Option<Reader>>;
    fn list_all(&self) -> AppResult<Vec<Reader>>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
    fn count(&self) -> AppResult<i64>;
}

pub struct SqliteReaderRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteReaderRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_reader(row: &Row) -> Result<Reader, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let card_number: i64 = row.get("card_number")?;

        Ok(Reader {
            id,
            given_name: row.get("given_name")?,
            family_name: row.get("family_name")?,
            card_number: card_number as u32,
            credential: row.get("credential")?,
            borrowed_books: Vec::new(),
        })
    }
}

impl ReaderRepository for SqliteReaderRepository {
    fn save(&self, reader: &Reader) -> AppResult<()> {
        let conn = self.pool.get()?;

        // Upsert keyed on id only, so a card-number clash between two
        // different readers surfaces as a constraint error instead of
        // silently replacing the other reader's row.
        conn.execute(
            "INSERT INTO readers (id, given_name, family_name, card_number, credential)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                given_name = excluded.given_name,
                family_name = excluded.family_name,
                card_number = excluded.card_number,
                credential = excluded.credential",
            params![
                reader.id.to_string(),
                reader.given_name,
                reader.family_name,
                reader.card_number as i64,
                reader.credential,
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Reader>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, given_name, family_name, card_number, credential
             FROM readers WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], Self::row_to_reader) {
            Ok(reader) => Ok(Some(reader)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn get_by_card_number(&self, card_number: u32) -> AppResult<Option<Reader>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, given_name, family_name, card_number, credential
             FROM readers WHERE card_number = ?1",
        )?;

        match stmt.query_row(params![card_number as i64], Self::row_to_reader) {
            Ok(reader) => Ok(Some(reader)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Reader>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, given_name, family_name, card_number, credential
             FROM readers ORDER BY card_number",
        )?;

        let readers: Vec<Reader> = stmt
            .query_map([], Self::row_to_reader)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(readers)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected =
            conn.execute("DELETE FROM readers WHERE id = ?1", params![id.to_string()])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn count(&self) -> AppResult<i64> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM readers", [], |row| row.get(0))?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::test_pool;

    #[test]
    fn test_save_and_lookup_by_card() {
        let (_dir, pool) = test_pool();
        let repo = SqliteReaderRepository::new(pool);

        let reader = Reader::new("Andrei", "Popescu", 7, "parola").unwrap();
        repo.save(&reader).unwrap();

        let loaded = repo.get_by_card_number(7).unwrap().unwrap();
        assert_eq!(loaded.id, reader.id);
        assert!(loaded.borrowed_books.is_empty());
        assert!(repo.get_by_card_number(8).unwrap().is_none());
    }

    #[test]
    fn test_card_number_unique_constraint() {
        let (_dir, pool) = test_pool();
        let repo = SqliteReaderRepository::new(pool);

        repo.save(&Reader::new("Andrei", "Popescu", 1, "parola").unwrap())
            .unwrap();
        let clash = Reader::new("Maria", "Ionescu", 1, "parola").unwrap();
        assert!(repo.save(&clash).is_err());
    }

    #[test]
    fn test_list_all_orders_by_card() {
        let (_dir, pool) = test_pool();
        let repo = SqliteReaderRepository::new(pool);

        repo.save(&Reader::new("Maria", "Ionescu", 2, "parola").unwrap())
            .unwrap();
        repo.save(&Reader::new("Andrei", "Popescu", 1, "parola").unwrap())
            .unwrap();

        let all = repo.list_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].card_number, 1);
        assert_eq!(repo.count().unwrap(), 2);
    }
}
