//! HTTP handlers for attendance endpoints

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::info;

use sprout_common::types::{AttendancePatch, NewAttendance};
use sprout_store::SproutStore;

use crate::respond::error_response;

/// GET /attendance
pub async fn list(store: web::Data<Arc<SproutStore>>) -> HttpResponse {
    match store.list_attendance() {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(e),
    }
}

/// GET /attendance/{id}
pub async fn get(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    match store.get_attendance(path.into_inner()) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => error_response(e),
    }
}

/// POST /attendance
pub async fn create(
    store: web::Data<Arc<SproutStore>>,
    body: web::Json<NewAttendance>,
) -> HttpResponse {
    match store.create_attendance(body.into_inner()) {
        Ok(record) => {
            info!("Recorded attendance {} for student {}", record.id, record.student_id);
            HttpResponse::Created().json(record)
        }
        Err(e) => error_response(e),
    }
}

/// PUT /attendance/{id}
pub async fn update(
    store: web::Data<Arc<SproutStore>>,
    path: web::Path<i64>,
    body: web::Json<AttendancePatch>,
) -> HttpResponse {
    match store.update_attendance(path.into_inner(), body.into_inner()) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => error_response(e),
    }
}

/// DELETE /attendance/{id}
pub async fn delete(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    match store.delete_attendance(id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}
