//! HTTP handlers for class endpoints

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::info;

use sprout_common::types::{ClassRoomPatch, NewClassRoom};
use sprout_store::SproutStore;

use crate::respond::error_response;

/// GET /classes
pub async fn list(store: web::Data<Arc<SproutStore>>) -> HttpResponse {
    match store.list_classes() {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(e),
    }
}

/// GET /classes/{id}
pub async fn get(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    match store.get_class(path.into_inner()) {
        Ok(class) => HttpResponse::Ok().json(class),
        Err(e) => error_response(e),
    }
}

/// POST /classes
pub async fn create(
    store: web::Data<Arc<SproutStore>>,
    body: web::Json<NewClassRoom>,
) -> HttpResponse {
    match store.create_class(body.into_inner()) {
        Ok(class) => {
            info!("Created class {}", class.id);
            HttpResponse::Created().json(class)
        }
        Err(e) => error_response(e),
    }
}

/// PUT /classes/{id}
pub async fn update(
    store: web::Data<Arc<SproutStore>>,
    path: web::Path<i64>,
    body: web::Json<ClassRoomPatch>,
) -> HttpResponse {
    match store.update_class(path.into_inner(), body.into_inner()) {
        Ok(class) => HttpResponse::Ok().json(class),
        Err(e) => error_response(e),
    }
}

/// DELETE /classes/{id}
pub async fn delete(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    match store.delete_class(id) {
        Ok(()) => {
            info!("Deleted class {}", id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_with_unknown_teacher_is_422() {
        let store = web::Data::new(Arc::new(SproutStore::open_in_memory().unwrap()));
        let resp = create(
            store,
            web::Json(NewClassRoom {
                name: "Toddlers A".into(),
                schedule: None,
                teacher_id: Some(99),
            }),
        )
        .await;
        assert_eq!(resp.status(), 422);
    }
}
