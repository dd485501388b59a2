//! Payment records

use rusqlite::{params, Connection, Row};

use sprout_common::error::{Error, Result};
use sprout_common::types::{NewPayment, Payment, PaymentPatch};

use crate::store::{map_sqlite_err, SproutStore};

const COLUMNS: &str = "id, student_id, paid_on, amount, method, reference, status";

fn from_row(row: &Row) -> rusqlite::Result<Payment> {
    Ok(Payment {
        id: row.get(0)?,
        student_id: row.get(1)?,
        paid_on: row.get(2)?,
        amount: row.get(3)?,
        method: row.get(4)?,
        reference: row.get(5)?,
        status: row.get(6)?,
    })
}

fn fetch(conn: &Connection, id: i64) -> Result<Payment> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM payments WHERE id = ?1"),
        [id],
        from_row,
    )
    .map_err(map_sqlite_err)
}

impl SproutStore {
    pub fn list_payments(&self) -> Result<Vec<Payment>> {
        let conn = self.lock();
        let mut stmt = conn
            .prepare(&format!("SELECT {COLUMNS} FROM payments ORDER BY id"))
            .map_err(map_sqlite_err)?;
        let rows = stmt
            .query_map([], from_row)
            .map_err(map_sqlite_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_sqlite_err)?;
        Ok(rows)
    }

    /// Payments for one student, newest first
    pub fn student_payments(&self, student_id: i64) -> Result<Vec<Payment>> {
        let conn = self.lock();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {COLUMNS} FROM payments WHERE student_id = ?1 ORDER BY paid_on DESC, id DESC"
            ))
            .map_err(map_sqlite_err)?;
        let rows = stmt
            .query_map([student_id], from_row)
            .map_err(map_sqlite_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_sqlite_err)?;
        Ok(rows)
    }

    pub fn get_payment(&self, id: i64) -> Result<Payment> {
        fetch(&self.lock(), id)
    }

    pub fn create_payment(&self, new: NewPayment) -> Result<Payment> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO payments (student_id, paid_on, amount, method, reference, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.student_id,
                new.paid_on,
                new.amount,
                new.method,
                new.reference,
                new.status.unwrap_or_else(|| "pending".to_string()),
            ],
        )
        .map_err(map_sqlite_err)?;
        fetch(&conn, conn.last_insert_rowid())
    }

    pub fn update_payment(&self, id: i64, patch: PaymentPatch) -> Result<Payment> {
        let mut conn = self.lock();
        let tx = conn.transaction().map_err(map_sqlite_err)?;

        let mut payment = fetch(&tx, id)?;
        if let Some(v) = patch.student_id {
            payment.student_id = v;
        }
        if let Some(v) = patch.paid_on {
            payment.paid_on = v;
        }
        if let Some(v) = patch.amount {
            payment.amount = v;
        }
        if let Some(v) = patch.method {
            payment.method = v;
        }
        if let Some(v) = patch.reference {
            payment.reference = v;
        }
        if let Some(v) = patch.status {
            payment.status = v;
        }

        tx.execute(
            "UPDATE payments SET student_id = ?1, paid_on = ?2, amount = ?3,
             method = ?4, reference = ?5, status = ?6 WHERE id = ?7",
            params![
                payment.student_id,
                payment.paid_on,
                payment.amount,
                payment.method,
                payment.reference,
                payment.status,
                id
            ],
        )
        .map_err(map_sqlite_err)?;
        tx.commit().map_err(map_sqlite_err)?;

        Ok(payment)
    }

    pub fn delete_payment(&self, id: i64) -> Result<()> {
        let conn = self.lock();
        let n = conn
            .execute("DELETE FROM payments WHERE id = ?1", [id])
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
    fn test_create_defaults_status() {
        let (store, student_id) = store_with_student();
        let payment = store
            .create_payment(NewPayment {
                student_id,
                paid_on: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
                amount: 350.0,
                method: Some("pix".into()),
                reference: None,
                status: None,
            })
            .unwrap();
        assert_eq!(payment.status, "pending");
        assert_eq!(payment.amount, 350.0);
    }

    #[test]
    fn test_requires_existing_student() {
        let store = SproutStore::open_in_memory().unwrap();
        let result = store.create_payment(NewPayment {
            student_id: 12,
            paid_on: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
            amount: 350.0,
            method: None,
            reference: None,
            status: None,
        });
        assert!(matches!(result, Err(Error::ForeignKeyViolation(_))));
    }

    #[test]
    fn test_student_payments_ordering() {
        let (store, student_id) = store_with_student();
        for (day, amount) in [(3, 100.0), (7, 200.0), (5, 150.0)] {
            store
                .create_payment(NewPayment {
                    student_id,
                    paid_on: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                    amount,
                    method: None,
                    reference: None,
                    status: Some("paid".into()),
                })
                .unwrap();
        }
        let rows = store.student_payments(student_id).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].amount, 200.0);
        assert_eq!(rows[2].amount, 100.0);
    }

    #[test]
    fn test_student_with_payments_blocks_delete() {
        let (store, student_id) = store_with_student();
        store
            .create_payment(NewPayment {
                student_id,
                paid_on: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
                amount: 350.0,
                method: None,
                reference: None,
                status: None,
            })
            .unwrap();
        assert!(matches!(
            store.delete_student(student_id),
            Err(Error::ForeignKeyViolation(_))
        ));
    }

    #[test]
    fn test_update_status() {
        let (store, student_id) = store_with_student();
        let payment = store
            .create_payment(NewPayment {
                student_id,
                paid_on: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
                amount: 350.0,
                method: None,
                reference: Some("2024-02".into()),
                status: None,
            })
            .unwrap();

        let updated = store
            .update_payment(
                payment.id,
                PaymentPatch {
                    status: Some("paid".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, "paid");
        assert_eq!(updated.reference.as_deref(), Some("2024-02"));
        assert_eq!(updated.amount, payment.amount);
    }
}
