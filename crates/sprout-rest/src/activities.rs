//! HTTP handlers for activity endpoints and enrollment

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::info;

use sprout_common::types::{ActivityPatch, NewActivity};
use sprout_store::SproutStore;

use crate::respond::error_response;

/// GET /activities
pub async fn list(store: web::Data<Arc<SproutStore>>) -> HttpResponse {
    match store.list_activities() {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(e),
    }
}

/// GET /activities/{id}
pub async fn get(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    match store.get_activity(path.into_inner()) {
        Ok(activity) => HttpResponse::Ok().json(activity),
        Err(e) => error_response(e),
    }
}

/// POST /activities
pub async fn create(
    store: web::Data<Arc<SproutStore>>,
    body: web::Json<NewActivity>,
) -> HttpResponse {
    match store.create_activity(body.into_inner()) {
        Ok(activity) => {
            info!("Created activity {}", activity.id);
            HttpResponse::Created().json(activity)
        }
        Err(e) => error_response(e),
    }
}

/// PUT /activities/{id}
pub async fn update(
    store: web::Data<Arc<SproutStore>>,
    path: web::Path<i64>,
    body: web::Json<ActivityPatch>,
) -> HttpResponse {
    match store.update_activity(path.into_inner(), body.into_inner()) {
        Ok(activity) => HttpResponse::Ok().json(activity),
        Err(e) => error_response(e),
    }
}

/// DELETE /activities/{id}
pub async fn delete(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    match store.delete_activity(id) {
        Ok(()) => {
            info!("Deleted activity {}", id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(e),
    }
}

/// GET /activities/{id}/students
pub async fn roster(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    match store.activity_roster(path.into_inner()) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(e),
    }
}

/// POST /activities/{id}/students/{student_id}
pub async fn enroll(
    store: web::Data<Arc<SproutStore>>,
    path: web::Path<(i64, i64)>,
) -> HttpResponse {
    let (activity_id, student_id) = path.into_inner();
    // Missing records are a 404; the unique pair violation stays a 409
    if let Err(e) = store.get_activity(activity_id) {
        return error_response(e);
    }
    if let Err(e) = store.get_student(student_id) {
        return error_response(e);
    }
    match store.enroll(activity_id, student_id) {
        Ok(()) => {
            info!("Enrolled student {} in activity {}", student_id, activity_id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(e),
    }
}

/// DELETE /activities/{id}/students/{student_id}
pub async fn unenroll(
    store: web::Data<Arc<SproutStore>>,
    path: web::Path<(i64, i64)>,
) -> HttpResponse {
    let (activity_id, student_id) = path.into_inner();
    match store.unenroll(activity_id, student_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}
