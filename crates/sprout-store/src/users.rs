//! Backend user records
//!
//! The store persists password hashes; hashing itself happens at the auth
//! layer so plaintext never crosses this boundary.

use rusqlite::{params, Connection, Row};

use sprout_common::error::{Error, Result};
use sprout_common::types::{NewUser, User, UserPatch, ACCESS_STAFF};

use crate::store::{map_sqlite_err, SproutStore};

/// Internal user representation with password hash
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub user: User,
    pub password_hash: String,
}

fn from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        login: row.get(1)?,
        access_level: row.get(2)?,
        teacher_id: row.get(3)?,
    })
}

fn fetch(conn: &Connection, id: i64) -> Result<User> {
    conn.query_row(
        "SELECT id, login, access_level, teacher_id FROM users WHERE id = ?1",
        [id],
        from_row,
    )
    .map_err(map_sqlite_err)
}

impl SproutStore {
    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.lock();
        let mut stmt = conn
            .prepare("SELECT id, login, access_level, teacher_id FROM users ORDER BY id")
            .map_err(map_sqlite_err)?;
        let rows = stmt
            .query_map([], from_row)
            .map_err(map_sqlite_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_sqlite_err)?;
        Ok(rows)
    }

    pub fn get_user(&self, id: i64) -> Result<User> {
        fetch(&self.lock(), id)
    }

    /// Look up a user for authentication, hash included
    pub fn find_user_by_login(&self, login: &str) -> Result<StoredUser> {
        let conn = self.lock();
        conn.query_row(
            "SELECT id, login, access_level, teacher_id, password_hash
             FROM users WHERE login = ?1",
            [login],
            |row| {
                Ok(StoredUser {
                    user: User {
                        id: row.get(0)?,
                        login: row.get(1)?,
                        access_level: row.get(2)?,
                        teacher_id: row.get(3)?,
                    },
                    password_hash: row.get(4)?,
                })
            },
        )
        .map_err(map_sqlite_err)
    }

    /// Create a user from an already-hashed password.
    ///
    /// A duplicate login fails with `LoginTaken`.
    pub fn create_user(&self, new: &NewUser, password_hash: &str) -> Result<User> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO users (login, password_hash, access_level, teacher_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                new.login,
                password_hash,
                new.access_level.as_deref().unwrap_or(ACCESS_STAFF),
                new.teacher_id
            ],
        )
        .map_err(map_sqlite_err)?;
        fetch(&conn, conn.last_insert_rowid())
    }

    /// Partial update; `new_password_hash` replaces the stored hash when set.
    /// The plaintext `password` field of the patch is ignored here.
    pub fn update_user(
        &self,
        id: i64,
        patch: UserPatch,
        new_password_hash: Option<String>,
    ) -> Result<User> {
        let mut conn = self.lock();
        let tx = conn.transaction().map_err(map_sqlite_err)?;

        let mut user = fetch(&tx, id)?;
        if let Some(v) = patch.login {
            user.login = v;
        }
        if let Some(v) = patch.access_level {
            user.access_level = v;
        }
        if let Some(v) = patch.teacher_id {
            user.teacher_id = v;
        }

        tx.execute(
            "UPDATE users SET login = ?1, access_level = ?2, teacher_id = ?3 WHERE id = ?4",
            params![user.login, user.access_level, user.teacher_id, id],
        )
        .map_err(map_sqlite_err)?;
        if let Some(hash) = new_password_hash {
            tx.execute(
                "UPDATE users SET password_hash = ?1 WHERE id = ?2",
                params![hash, id],
            )
            .map_err(map_sqlite_err)?;
        }
        tx.commit().map_err(map_sqlite_err)?;

        Ok(user)
    }

    pub fn delete_user(&self, id: i64) -> Result<()> {
        let conn = self.lock();
        let n = conn
            .execute("DELETE FROM users WHERE id = ?1", [id])
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
    use sprout_common::types::ACCESS_ADMIN;

    fn new_user(login: &str) -> NewUser {
        NewUser {
            login: login.into(),
            password: "unused-here".into(),
            access_level: None,
            teacher_id: None,
        }
    }

    #[test]
    fn test_create_defaults_to_staff() {
        let store = SproutStore::open_in_memory().unwrap();
        let user = store.create_user(&new_user("ana"), "hash-a").unwrap();
        assert_eq!(user.access_level, ACCESS_STAFF);
    }

    #[test]
    fn test_duplicate_login_rejected() {
        let store = SproutStore::open_in_memory().unwrap();
        store.create_user(&new_user("ana"), "hash-a").unwrap();
        assert!(matches!(
            store.create_user(&new_user("ana"), "hash-b"),
            Err(Error::LoginTaken)
        ));
    }

    #[test]
    fn test_find_by_login_carries_hash() {
        let store = SproutStore::open_in_memory().unwrap();
        let created = store.create_user(&new_user("ana"), "hash-a").unwrap();
        let stored = store.find_user_by_login("ana").unwrap();
        assert_eq!(stored.user, created);
        assert_eq!(stored.password_hash, "hash-a");
    }

    #[test]
    fn test_update_access_level_and_password() {
        let store = SproutStore::open_in_memory().unwrap();
        let created = store.create_user(&new_user("ana"), "hash-a").unwrap();

        let updated = store
            .update_user(
                created.id,
                UserPatch {
                    access_level: Some(ACCESS_ADMIN.into()),
                    ..Default::default()
                },
                Some("hash-b".into()),
            )
            .unwrap();
        assert_eq!(updated.access_level, ACCESS_ADMIN);
        assert_eq!(updated.login, "ana");

        let stored = store.find_user_by_login("ana").unwrap();
        assert_eq!(stored.password_hash, "hash-b");
    }

    #[test]
    fn test_unknown_login() {
        let store = SproutStore::open_in_memory().unwrap();
        assert!(matches!(
            store.find_user_by_login("ghost"),
            Err(Error::NotFound)
        ));
    }
}
