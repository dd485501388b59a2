//! Attendance records

use rusqlite::{params, Connection, Row};

use sprout_common::error::{Error, Result};
use sprout_common::types::{Attendance, AttendancePatch, NewAttendance};

use crate::store::{map_sqlite_err, SproutStore};

fn from_row(row: &Row) -> rusqlite::Result<Attendance> {
    Ok(Attendance {
        id: row.get(0)?,
        student_id: row.get(1)?,
        day: row.get(2)?,
        present: row.get(3)?,
    })
}

fn fetch(conn: &Connection, id: i64) -> Result<Attendance> {
    conn.query_row(
        "SELECT id, student_id, day, present FROM attendance WHERE id = ?1",
        [id],
        from_row,
    )
    .map_err(map_sqlite_err)
}

impl SproutStore {
    pub fn list_attendance(&self) -> Result<Vec<Attendance>> {
        let conn = self.lock();
        let mut stmt = conn
            .prepare("SELECT id, student_id, day, present FROM attendance ORDER BY id")
            .map_err(map_sqlite_err)?;
        let rows = stmt
            .query_map([], from_row)
            .map_err(map_sqlite_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_sqlite_err)?;
        Ok(rows)
    }

    /// Attendance for one student, newest first
    pub fn student_attendance(&self, student_id: i64) -> Result<Vec<Attendance>> {
        let conn = self.lock();
        let mut stmt = conn
            .prepare(
                "SELECT id, student_id, day, present FROM attendance
                 WHERE student_id = ?1 ORDER BY day DESC, id DESC",
            )
            .map_err(map_sqlite_err)?;
        let rows = stmt
            .query_map([student_id], from_row)
            .map_err(map_sqlite_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_sqlite_err)?;
        Ok(rows)
    }

    pub fn get_attendance(&self, id: i64) -> Result<Attendance> {
        fetch(&self.lock(), id)
    }

    pub fn create_attendance(&self, new: NewAttendance) -> Result<Attendance> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO attendance (student_id, day, present) VALUES (?1, ?2, ?3)",
            params![new.student_id, new.day, new.present],
        )
        .map_err(map_sqlite_err)?;
        fetch(&conn, conn.last_insert_rowid())
    }

    pub fn update_attendance(&self, id: i64, patch: AttendancePatch) -> Result<Attendance> {
        let mut conn = self.lock();
        let tx = conn.transaction().map_err(map_sqlite_err)?;

        let mut record = fetch(&tx, id)?;
        if let Some(v) = patch.student_id {
            record.student_id = v;
        }
        if let Some(v) = patch.day {
            record.day = v;
        }
        if let Some(v) = patch.present {
            record.present = v;
        }

        tx.execute(
            "UPDATE attendance SET student_id = ?1, day = ?2, present = ?3 WHERE id = ?4",
            params![record.student_id, record.day, record.present, id],
        )
        .map_err(map_sqlite_err)?;
        tx.commit().map_err(map_sqlite_err)?;

        Ok(record)
    }

    pub fn delete_attendance(&self, id: i64) -> Result<()> {
        let conn = self.lock();
        let n = conn
            .execute("DELETE FROM attendance WHERE id = ?1", [id])
            .map_err(map_sqlite_err)?;
        if n == 0 {
            Err(Error::NotFound)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sprout_common::types::NewStudent;

    fn store_with_student() -> (SproutStore, i64) {
        let store = SproutStore::open_in_memory().unwrap();
        let student = store
            .create_student(NewStudent {
                full_name: "Bruno Lima".into(),
                birth_date: None,
                class_id: None,
                guardian_name: None,
                guardian_phone: None,
                guardian_email: None,
                notes: None,
            })
            .unwrap();
        (store, student.id)
    }

    #[test]
    fn test_round_trip_present_flag() {
        let (store, student_id) = store_with_student();
        let day = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();

        let record = store
            .create_attendance(NewAttendance {
                student_id,
                day,
                present: false,
            })
            .unwrap();
        assert!(!record.present);

        let updated = store
            .update_attendance(
                record.id,
                AttendancePatch {
                    present: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(updated.present);
        assert_eq!(updated.day, day);
    }

    #[test]
    fn test_same_day_twice_allowed() {
        // No uniqueness constraint on (student, day)
        let (store, student_id) = store_with_student();
        let day = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        for present in [true, false] {
            store
                .create_attendance(NewAttendance {
                    student_id,
                    day,
                    present,
                })
                .unwrap();
        }
        assert_eq!(store.student_attendance(student_id).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_missing() {
        let store = SproutStore::open_in_memory().unwrap();
        assert!(matches!(store.delete_attendance(5), Err(Error::NotFound)));
    }
}
