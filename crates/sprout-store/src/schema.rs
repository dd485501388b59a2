//! Schema definition
//!
//! Runs idempotently at open. The association table carries a UNIQUE pair
//! constraint: activity participation is a set.

use rusqlite::Connection;
use sprout_common::error::Result;

use crate::store::map_sqlite_err;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS teachers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT NOT NULL,
    email TEXT,
    phone TEXT
);

CREATE TABLE IF NOT EXISTS classes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    schedule TEXT,
    teacher_id INTEGER REFERENCES teachers(id)
);

CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT NOT NULL,
    birth_date TEXT,
    class_id INTEGER REFERENCES classes(id),
    guardian_name TEXT,
    guardian_phone TEXT,
    guardian_email TEXT,
    notes TEXT
);

CREATE TABLE IF NOT EXISTS payments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id INTEGER NOT NULL REFERENCES students(id),
    paid_on TEXT NOT NULL,
    amount REAL NOT NULL,
    method TEXT,
    reference TEXT,
    status TEXT NOT NULL DEFAULT 'pending'
);

CREATE TABLE IF NOT EXISTS attendance (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id INTEGER NOT NULL REFERENCES students(id),
    day TEXT NOT NULL,
    present INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS activities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    scheduled_on TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS activity_students (
    activity_id INTEGER NOT NULL REFERENCES activities(id),
    student_id INTEGER NOT NULL REFERENCES students(id),
    UNIQUE (activity_id, student_id)
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    login TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    access_level TEXT NOT NULL DEFAULT 'staff',
    teacher_id INTEGER REFERENCES teachers(id)
);
";

/// Create all tables if they do not exist yet
pub fn init(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA).map_err(map_sqlite_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        init(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name NOT LIKE 'sqlite_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 8);
    }
}
