//! Teacher records

use rusqlite::{params, Connection, Row};

use sprout_common::error::{Error, Result};
use sprout_common::types::{NewTeacher, Teacher, TeacherPatch};

use crate::store::{map_sqlite_err, SproutStore};

fn from_row(row: &Row) -> rusqlite::Result<Teacher> {
    Ok(Teacher {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
    })
}

fn fetch(conn: &Connection, id: i64) -> Result<Teacher> {
    conn.query_row(
        "SELECT id, full_name, email, phone FROM teachers WHERE id = ?1",
        [id],
        from_row,
    )
    .map_err(map_sqlite_err)
}

impl SproutStore {
    pub fn list_teachers(&self) -> Result<Vec<Teacher>> {
        let conn = self.lock();
        let mut stmt = conn
            .prepare("SELECT id, full_name, email, phone FROM teachers ORDER BY id")
            .map_err(map_sqlite_err)?;
        let rows = stmt
            .query_map([], from_row)
            .map_err(map_sqlite_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_sqlite_err)?;
        Ok(rows)
    }

    pub fn get_teacher(&self, id: i64) -> Result<Teacher> {
        fetch(&self.lock(), id)
    }

    pub fn create_teacher(&self, new: NewTeacher) -> Result<Teacher> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO teachers (full_name, email, phone) VALUES (?1, ?2, ?3)",
            params![new.full_name, new.email, new.phone],
        )
        .map_err(map_sqlite_err)?;
        fetch(&conn, conn.last_insert_rowid())
    }

    /// Partial update: only fields present in the patch change
    pub fn update_teacher(&self, id: i64, patch: TeacherPatch) -> Result<Teacher> {
        let mut conn = self.lock();
        let tx = conn.transaction().map_err(map_sqlite_err)?;

        let mut teacher = fetch(&tx, id)?;
        if let Some(v) = patch.full_name {
            teacher.full_name = v;
        }
        if let Some(v) = patch.email {
            teacher.email = v;
        }
        if let Some(v) = patch.phone {
            teacher.phone = v;
        }

        tx.execute(
            "UPDATE teachers SET full_name = ?1, email = ?2, phone = ?3 WHERE id = ?4",
            params![teacher.full_name, teacher.email, teacher.phone, id],
        )
        .map_err(map_sqlite_err)?;
        tx.commit().map_err(map_sqlite_err)?;

        Ok(teacher)
    }

    pub fn delete_teacher(&self, id: i64) -> Result<()> {
        let conn = self.lock();
        let n = conn
            .execute("DELETE FROM teachers WHERE id = ?1", [id])
            .map_err(map_sqlite_err)?;
        if n == 0 {
            Err(Error::NotFound)
        } else {
            Ok(())
        }
    }
}
