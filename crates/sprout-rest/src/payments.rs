//! HTTP handlers for payment endpoints

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::info;

use sprout_common::types::{NewPayment, PaymentPatch};
use sprout_store::SproutStore;

use crate::respond::error_response;

/// GET /payments
pub async fn list(store: web::Data<Arc<SproutStore>>) -> HttpResponse {
    match store.list_payments() {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(e),
    }
}

/// GET /payments/{id}
pub async fn get(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    match store.get_payment(path.into_inner()) {
        Ok(payment) => HttpResponse::Ok().json(payment),
        Err(e) => error_response(e),
    }
}

/// POST /payments
pub async fn create(
    store: web::Data<Arc<SproutStore>>,
    body: web::Json<NewPayment>,
) -> HttpResponse {
    match store.create_payment(body.into_inner()) {
        Ok(payment) => {
            info!("Created payment {} for student {}", payment.id, payment.student_id);
            HttpResponse::Created().json(payment)
        }
        Err(e) => error_response(e),
    }
}

/// PUT /payments/{id}
pub async fn update(
    store: web::Data<Arc<SproutStore>>,
    path: web::Path<i64>,
    body: web::Json<PaymentPatch>,
) -> HttpResponse {
    match store.update_payment(path.into_inner(), body.into_inner()) {
        Ok(payment) => HttpResponse::Ok().json(payment),
        Err(e) => error_response(e),
    }
}

/// DELETE /payments/{id}
pub async fn delete(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    match store.delete_payment(id) {
        Ok(()) => {
            info!("Deleted payment {}", id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sprout_common::types::NewStudent;

    #[tokio::test]
    async fn test_payment_for_unknown_student_is_422() {
        let store = web::Data::new(Arc::new(SproutStore::open_in_memory().unwrap()));
        let resp = create(
            store,
            web::Json(NewPayment {
                student_id: 3,
                paid_on: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
                amount: 350.0,
                method: None,
                reference: None,
                status: None,
            }),
        )
        .await;
        assert_eq!(resp.status(), 422);
    }

    #[tokio::test]
    async fn test_payment_round_trip() {
        let store = web::Data::new(Arc::new(SproutStore::open_in_memory().unwrap()));
        store
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

        let resp = create(
            store.clone(),
            web::Json(NewPayment {
                student_id: 1,
                paid_on: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
                amount: 350.0,
                method: Some("pix".into()),
                reference: None,
                status: None,
            }),
        )
        .await;
        assert_eq!(resp.status(), 201);

        let resp = get(store, web::Path::from(1)).await;
        assert_eq!(resp.status(), 200);
    }
}
