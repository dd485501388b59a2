//! Class records

use rusqlite::{params, Connection, Row};

use sprout_common::error::{Error, Result};
use sprout_common::types::{ClassRoom, ClassRoomPatch, NewClassRoom};

use crate::store::{map_sqlite_err, SproutStore};

fn from_row(row: &Row) -> rusqlite::Result<ClassRoom> {
    Ok(ClassRoom {
        id: row.get(0)?,
        name: row.get(1)?,
        schedule: row.get(2)?,
        teacher_id: row.get(3)?,
    })
}

fn fetch(conn: &Connection, id: i64) -> Result<ClassRoom> {
    conn.query_row(
        "SELECT id, name, schedule, teacher_id FROM classes WHERE id = ?1",
        [id],
        from_row,
    )
    .map_err(map_sqlite_err)
}

impl SproutStore {
    pub fn list_classes(&self) -> Result<Vec<ClassRoom>> {
        let conn = self.lock();
        let mut stmt = conn
            .prepare("SELECT id, name, schedule, teacher_id FROM classes ORDER BY id")
            .map_err(map_sqlite_err)?;
        let rows = stmt
            .query_map([], from_row)
            .map_err(map_sqlite_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_sqlite_err)?;
        Ok(rows)
    }

    pub fn get_class(&self, id: i64) -> Result<ClassRoom> {
        fetch(&self.lock(), id)
    }

    pub fn create_class(&self, new: NewClassRoom) -> Result<ClassRoom> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO classes (name, schedule, teacher_id) VALUES (?1, ?2, ?3)",
            params![new.name, new.schedule, new.teacher_id],
        )
        .map_err(map_sqlite_err)?;
        fetch(&conn, conn.last_insert_rowid())
    }

    pub fn update_class(&self, id: i64, patch: ClassRoomPatch) -> Result<ClassRoom> {
        let mut conn = self.lock();
        let tx = conn.transaction().map_err(map_sqlite_err)?;

        let mut class = fetch(&tx, id)?;
        if let Some(v) = patch.name {
            class.name = v;
        }
        if let Some(v) = patch.schedule {
            class.schedule = v;
        }
        if let Some(v) = patch.teacher_id {
            class.teacher_id = v;
        }

        tx.execute(
            "UPDATE classes SET name = ?1, schedule = ?2, teacher_id = ?3 WHERE id = ?4",
            params![class.name, class.schedule, class.teacher_id, id],
        )
        .map_err(map_sqlite_err)?;
        tx.commit().map_err(map_sqlite_err)?;

        Ok(class)
    }

    pub fn delete_class(&self, id: i64) -> Result<()> {
        let conn = self.lock();
        let n = conn
            .execute("DELETE FROM classes WHERE id = ?1", [id])
            .map_err(map_sqlite_err)?;
        if n == 0 {
            Err(Error::NotFound)
        } else {
            Ok(())
        }
    }
}
