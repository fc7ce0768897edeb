// src/repositories/section_repository.rs
//
// Section persistence

use std::sync::Arc;

use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::Section;
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait SectionRepository: Send + Sync {
    fn save(&self, section: &Section) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Section>>;
    fn list_all(&self) -> AppResult<Vec<Section>>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct SqliteSectionRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteSectionRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_section(row: &Row) -> Result<Section, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(Section {
            id,
            name: row.get("name")?,
            location: row.get("location")?,
        })
    }
}

impl SectionRepository for SqliteSectionRepository {
    fn save(&self, section: &Section) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR REPLACE INTO sections (id, name, location) VALUES (?1, ?2, ?3)",
            params![section.id.to_string(), section.name, section.location],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Section>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, name, location FROM sections WHERE id = ?1")?;

        match stmt.query_row(params![id.to_string()], Self::row_to_section) {
            Ok(section) => Ok(Some(section)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Section>> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare("SELECT id, name, location FROM sections ORDER BY name, location")?;

        let sections: Vec<Section> = stmt
            .query_map([], Self::row_to_section)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sections)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected =
            conn.execute("DELETE FROM sections WHERE id = ?1", params![id.to_string()])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::test_pool;

    #[test]
    fn test_save_and_reload() {
        let (_dir, pool) = test_pool();
        let repo = SqliteSectionRepository::new(pool);

        let section = Section::new("Poetry", "Floor 1").unwrap();
        repo.save(&section).unwrap();

        let loaded = repo.get_by_id(section.id).unwrap().unwrap();
        assert_eq!(loaded, section);
    }

    #[test]
    fn test_list_all() {
        let (_dir, pool) = test_pool();
        let repo = SqliteSectionRepository::new(pool);

        repo.save(&Section::new("Prose", "Floor 2").unwrap()).unwrap();
        repo.save(&Section::new("Poetry", "Floor 1").unwrap()).unwrap();

        let all = repo.list_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Poetry");
    }
}
