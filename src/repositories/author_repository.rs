// src/repositories/author_repository.rs
//
// Author persistence

use std::sync::Arc;

use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::Author;
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait AuthorRepository: Send + Sync {
    fn save(&self, author: &Author) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Author>>;
    fn list_all(&self) -> AppResult<Vec<Author>>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
    fn exists(&self, id: Uuid) -> AppResult<bool>;
}

pub struct SqliteAuthorRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteAuthorRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_author(row: &Row) -> Result<Author, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(Author {
            id,
            given_name: row.get("given_name")?,
            family_name: row.get("family_name")?,
            nationality: row.get("nationality")?,
        })
    }
}

impl AuthorRepository for SqliteAuthorRepository {
    fn save(&self, author: &Author) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR REPLACE INTO authors (id, given_name, family_name, nationality)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                author.id.to_string(),
                author.given_name,
                author.family_name,
                author.nationality,
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, given_name, family_name, nationality FROM authors WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], Self::row_to_author) {
            Ok(author) => Ok(Some(author)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Author>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, given_name, family_name, nationality FROM authors
             ORDER BY family_name, given_name",
        )?;

        let authors: Vec<Author> = stmt
            .query_map([], Self::row_to_author)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(authors)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected =
            conn.execute("DELETE FROM authors WHERE id = ?1", params![id.to_string()])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn exists(&self, id: Uuid) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM authors WHERE id = ?1",
            params![id.to_string()],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}
