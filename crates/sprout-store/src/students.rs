//! Student records

use rusqlite::{params, Connection, Row};

use sprout_common::error::{Error, Result};
use sprout_common::types::{NewStudent, Student, StudentPatch};

use crate::store::{map_sqlite_err, SproutStore};

const COLUMNS: &str =
    "id, full_name, birth_date, class_id, guardian_name, guardian_phone, guardian_email, notes";

pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        full_name: row.get(1)?,
        birth_date: row.get(2)?,
        class_id: row.get(3)?,
        guardian_name: row.get(4)?,
        guardian_phone: row.get(5)?,
        guardian_email: row.get(6)?,
        notes: row.get(7)?,
    })
}

fn fetch(conn: &Connection, id: i64) -> Result<Student> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM students WHERE id = ?1"),
        [id],
        from_row,
    )
    .map_err(map_sqlite_err)
}

impl SproutStore {
    pub fn list_students(&self) -> Result<Vec<Student>> {
        let conn = self.lock();
        let mut stmt = conn
            .prepare(&format!("SELECT {COLUMNS} FROM students ORDER BY id"))
            .map_err(map_sqlite_err)?;
        let rows = stmt
            .query_map([], from_row)
            .map_err(map_sqlite_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_sqlite_err)?;
        Ok(rows)
    }

    pub fn get_student(&self, id: i64) -> Result<Student> {
        fetch(&self.lock(), id)
    }

    pub fn create_student(&self, new: NewStudent) -> Result<Student> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO students
             (full_name, birth_date, class_id, guardian_name, guardian_phone, guardian_email, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                new.full_name,
                new.birth_date,
                new.class_id,
                new.guardian_name,
                new.guardian_phone,
                new.guardian_email,
                new.notes
            ],
        )
        .map_err(map_sqlite_err)?;
        fetch(&conn, conn.last_insert_rowid())
    }

    pub fn update_student(&self, id: i64, patch: StudentPatch) -> Result<Student> {
        let mut conn = self.lock();
        let tx = conn.transaction().map_err(map_sqlite_err)?;

        let mut student = fetch(&tx, id)?;
        if let Some(v) = patch.full_name {
            student.full_name = v;
        }
        if let Some(v) = patch.birth_date {
            student.birth_date = v;
        }
        if let Some(v) = patch.class_id {
            student.class_id = v;
        }
        if let Some(v) = patch.guardian_name {
            student.guardian_name = v;
        }
        if let Some(v) = patch.guardian_phone {
            student.guardian_phone = v;
        }
        if let Some(v) = patch.guardian_email {
            student.guardian_email = v;
        }
        if let Some(v) = patch.notes {
            student.notes = v;
        }

        tx.execute(
            "UPDATE students SET full_name = ?1, birth_date = ?2, class_id = ?3,
             guardian_name = ?4, guardian_phone = ?5, guardian_email = ?6, notes = ?7
             WHERE id = ?8",
            params![
                student.full_name,
                student.birth_date,
                student.class_id,
                student.guardian_name,
                student.guardian_phone,
                student.guardian_email,
                student.notes,
                id
            ],
        )
        .map_err(map_sqlite_err)?;
        tx.commit().map_err(map_sqlite_err)?;

        Ok(student)
    }

    /// Delete a student and their activity enrollments.
    ///
    /// Payments and attendance referencing the student are NOT removed; the
    /// foreign key surfaces as an error instead.
    pub fn delete_student(&self, id: i64) -> Result<()> {
        let mut conn = self.lock();
        let tx = conn.transaction().map_err(map_sqlite_err)?;

        tx.execute("DELETE FROM activity_students WHERE student_id = ?1", [id])
            .map_err(map_sqlite_err)?;
        let n = tx
            .execute("DELETE FROM students WHERE id = ?1", [id])
            .map_err(map_sqlite_err)?;
        if n == 0 {
            return Err(Error::NotFound);
        }
        tx.commit().map_err(map_sqlite_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub(crate) fn sample() -> NewStudent {
        NewStudent {
            full_name: "Bruno Lima".into(),
            birth_date: NaiveDate::from_ymd_opt(2021, 3, 14),
            class_id: None,
            guardian_name: Some("Carla Lima".into()),
            guardian_phone: Some("555-0303".into()),
            guardian_email: None,
            notes: Some("naps after lunch".into()),
        }
    }

    #[test]
    fn test_round_trip() {
        let store = SproutStore::open_in_memory().unwrap();
        let created = store.create_student(sample()).unwrap();
        let fetched = store.get_student(created.id).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.birth_date, NaiveDate::from_ymd_opt(2021, 3, 14));
    }

    #[test]
    fn test_partial_update() {
        let store = SproutStore::open_in_memory().unwrap();
        let created = store.create_student(sample()).unwrap();

        let updated = store
            .update_student(
                created.id,
                StudentPatch {
                    notes: Some(Some("allergic to peanuts".into())),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.notes.as_deref(), Some("allergic to peanuts"));
        assert_eq!(updated.guardian_name, created.guardian_name);
        assert_eq!(updated.birth_date, created.birth_date);
    }

    #[test]
    fn test_unknown_class_rejected() {
        let store = SproutStore::open_in_memory().unwrap();
        let created = store.create_student(sample()).unwrap();
        let result = store.update_student(
            created.id,
            StudentPatch {
                class_id: Some(Some(77)),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(Error::ForeignKeyViolation(_))));
        // Failed update rolled back
        assert_eq!(store.get_student(created.id).unwrap().class_id, None);
    }
}
