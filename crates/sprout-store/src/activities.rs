//! Activity records and the activity/student association

use rusqlite::{params, Connection, Row};

use sprout_common::error::{Error, Result};
use sprout_common::types::{Activity, ActivityPatch, NewActivity, Student};

use crate::store::{map_sqlite_err, SproutStore};
use crate::students;

fn from_row(row: &Row) -> rusqlite::Result<Activity> {
    Ok(Activity {
        id: row.get(0)?,
        description: row.get(1)?,
        scheduled_on: row.get(2)?,
    })
}

fn fetch(conn: &Connection, id: i64) -> Result<Activity> {
    conn.query_row(
        "SELECT id, description, scheduled_on FROM activities WHERE id = ?1",
        [id],
        from_row,
    )
    .map_err(map_sqlite_err)
}

impl SproutStore {
    pub fn list_activities(&self) -> Result<Vec<Activity>> {
        let conn = self.lock();
        let mut stmt = conn
            .prepare("SELECT id, description, scheduled_on FROM activities ORDER BY id")
            .map_err(map_sqlite_err)?;
        let rows = stmt
            .query_map([], from_row)
            .map_err(map_sqlite_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_sqlite_err)?;
        Ok(rows)
    }

    pub fn get_activity(&self, id: i64) -> Result<Activity> {
        fetch(&self.lock(), id)
    }

    pub fn create_activity(&self, new: NewActivity) -> Result<Activity> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO activities (description, scheduled_on) VALUES (?1, ?2)",
            params![new.description, new.scheduled_on],
        )
        .map_err(map_sqlite_err)?;
        fetch(&conn, conn.last_insert_rowid())
    }

    pub fn update_activity(&self, id: i64, patch: ActivityPatch) -> Result<Activity> {
        let mut conn = self.lock();
        let tx = conn.transaction().map_err(map_sqlite_err)?;

        let mut activity = fetch(&tx, id)?;
        if let Some(v) = patch.description {
            activity.description = v;
        }
        if let Some(v) = patch.scheduled_on {
            activity.scheduled_on = v;
        }

        tx.execute(
            "UPDATE activities SET description = ?1, scheduled_on = ?2 WHERE id = ?3",
            params![activity.description, activity.scheduled_on, id],
        )
        .map_err(map_sqlite_err)?;
        tx.commit().map_err(map_sqlite_err)?;

        Ok(activity)
    }

    /// Delete an activity and its enrollments
    pub fn delete_activity(&self, id: i64) -> Result<()> {
        let mut conn = self.lock();
        let tx = conn.transaction().map_err(map_sqlite_err)?;

        tx.execute("DELETE FROM activity_students WHERE activity_id = ?1", [id])
            .map_err(map_sqlite_err)?;
        let n = tx
            .execute("DELETE FROM activities WHERE id = ?1", [id])
            .map_err(map_sqlite_err)?;
        if n == 0 {
            return Err(Error::NotFound);
        }
        tx.commit().map_err(map_sqlite_err)?;
        Ok(())
    }

    // ========================================================================
    // Enrollment (activity_students association)
    // ========================================================================

    /// Enroll a student in an activity. The pair is a set member: enrolling
    /// twice fails with `AlreadyEnrolled`.
    pub fn enroll(&self, activity_id: i64, student_id: i64) -> Result<()> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO activity_students (activity_id, student_id) VALUES (?1, ?2)",
            params![activity_id, student_id],
        )
        .map_err(map_sqlite_err)?;
        Ok(())
    }

    pub fn unenroll(&self, activity_id: i64, student_id: i64) -> Result<()> {
        let conn = self.lock();
        let n = conn
            .execute(
                "DELETE FROM activity_students WHERE activity_id = ?1 AND student_id = ?2",
                params![activity_id, student_id],
            )
            .map_err(map_sqlite_err)?;
        if n == 0 {
            Err(Error::NotFound)
        } else {
            Ok(())
        }
    }

    /// Students enrolled in an activity
    pub fn activity_roster(&self, activity_id: i64) -> Result<Vec<Student>> {
        let conn = self.lock();
        // Missing activity is a 404, not an empty roster
        fetch(&conn, activity_id)?;
        let mut stmt = conn
            .prepare(
                "SELECT s.id, s.full_name, s.birth_date, s.class_id, s.guardian_name,
                        s.guardian_phone, s.guardian_email, s.notes
                 FROM students s
                 JOIN activity_students a ON a.student_id = s.id
                 WHERE a.activity_id = ?1 ORDER BY s.id",
            )
            .map_err(map_sqlite_err)?;
        let rows = stmt
            .query_map([activity_id], students::from_row)
            .map_err(map_sqlite_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_sqlite_err)?;
        Ok(rows)
    }

    /// Activities a student is enrolled in
    pub fn student_activities(&self, student_id: i64) -> Result<Vec<Activity>> {
        let conn = self.lock();
        conn.query_row("SELECT id FROM students WHERE id = ?1", [student_id], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(map_sqlite_err)?;
        let mut stmt = conn
            .prepare(
                "SELECT act.id, act.description, act.scheduled_on
                 FROM activities act
                 JOIN activity_students a ON a.activity_id = act.id
                 WHERE a.student_id = ?1 ORDER BY act.id",
            )
            .map_err(map_sqlite_err)?;
        let rows = stmt
            .query_map([student_id], from_row)
            .map_err(map_sqlite_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_sqlite_err)?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sprout_common::types::NewStudent;

    fn setup() -> (SproutStore, i64, i64) {
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
        let activity = store
            .create_activity(NewActivity {
                description: "Painting".into(),
                scheduled_on: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            })
            .unwrap();
        (store, activity.id, student.id)
    }

    #[test]
    fn test_enroll_and_roster() {
        let (store, activity_id, student_id) = setup();
        store.enroll(activity_id, student_id).unwrap();

        let roster = store.activity_roster(activity_id).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id, student_id);

        let activities = store.student_activities(student_id).unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].description, "Painting");
    }

    #[test]
    fn test_duplicate_enrollment_rejected() {
        let (store, activity_id, student_id) = setup();
        store.enroll(activity_id, student_id).unwrap();
        assert!(matches!(
            store.enroll(activity_id, student_id),
            Err(Error::AlreadyEnrolled)
        ));
        // Still a single pair
        assert_eq!(store.activity_roster(activity_id).unwrap().len(), 1);
    }

    #[test]
    fn test_enroll_unknown_student() {
        let (store, activity_id, _) = setup();
        assert!(matches!(
            store.enroll(activity_id, 999),
            Err(Error::ForeignKeyViolation(_))
        ));
    }

    #[test]
    fn test_unenroll() {
        let (store, activity_id, student_id) = setup();
        store.enroll(activity_id, student_id).unwrap();
        store.unenroll(activity_id, student_id).unwrap();
        assert!(store.activity_roster(activity_id).unwrap().is_empty());
        assert!(matches!(
            store.unenroll(activity_id, student_id),
            Err(Error::NotFound)
        ));
    }

    #[test]
    fn test_roster_of_missing_activity() {
        let (store, _, _) = setup();
        assert!(matches!(store.activity_roster(404), Err(Error::NotFound)));
    }

    #[test]
    fn test_deleting_activity_clears_enrollments() {
        let (store, activity_id, student_id) = setup();
        store.enroll(activity_id, student_id).unwrap();
        store.delete_activity(activity_id).unwrap();

        // Student survives with no enrollments
        assert!(store.student_activities(student_id).unwrap().is_empty());
    }

    #[test]
    fn test_deleting_student_clears_enrollments() {
        let (store, activity_id, student_id) = setup();
        store.enroll(activity_id, student_id).unwrap();
        store.delete_student(student_id).unwrap();
        assert!(store.activity_roster(activity_id).unwrap().is_empty());
    }
}
