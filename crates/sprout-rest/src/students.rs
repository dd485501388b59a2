//! HTTP handlers for student endpoints

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::info;

use sprout_common::types::{NewStudent, StudentPatch};
use sprout_store::SproutStore;

use crate::respond::error_response;

/// GET /students
pub async fn list(store: web::Data<Arc<SproutStore>>) -> HttpResponse {
    match store.list_students() {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(e),
    }
}

/// GET /students/{id}
pub async fn get(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    match store.get_student(path.into_inner()) {
        Ok(student) => HttpResponse::Ok().json(student),
        Err(e) => error_response(e),
    }
}

/// POST /students
pub async fn create(
    store: web::Data<Arc<SproutStore>>,
    body: web::Json<NewStudent>,
) -> HttpResponse {
    match store.create_student(body.into_inner()) {
        Ok(student) => {
            info!("Created student {}", student.id);
            HttpResponse::Created().json(student)
        }
        Err(e) => error_response(e),
    }
}

/// PUT /students/{id}
pub async fn update(
    store: web::Data<Arc<SproutStore>>,
    path: web::Path<i64>,
    body: web::Json<StudentPatch>,
) -> HttpResponse {
    match store.update_student(path.into_inner(), body.into_inner()) {
        Ok(student) => HttpResponse::Ok().json(student),
        Err(e) => error_response(e),
    }
}

/// DELETE /students/{id}
pub async fn delete(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    match store.delete_student(id) {
        Ok(()) => {
            info!("Deleted student {}", id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(e),
    }
}

/// GET /students/{id}/payments
pub async fn payments(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    if let Err(e) = store.get_student(id) {
        return error_response(e);
    }
    match store.student_payments(id) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(e),
    }
}

/// GET /students/{id}/attendance
pub async fn attendance(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    if let Err(e) = store.get_student(id) {
        return error_response(e);
    }
    match store.student_attendance(id) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(e),
    }
}

/// GET /students/{id}/activities
pub async fn activities(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    match store.student_activities(path.into_inner()) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(e),
    }
}
