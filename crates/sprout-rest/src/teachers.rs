//! HTTP handlers for teacher endpoints

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::info;

use sprout_common::types::{NewTeacher, TeacherPatch};
use sprout_store::SproutStore;

use crate::respond::error_response;

/// GET /teachers
pub async fn list(store: web::Data<Arc<SproutStore>>) -> HttpResponse {
    match store.list_teachers() {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(e),
    }
}

/// GET /teachers/{id}
pub async fn get(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    match store.get_teacher(path.into_inner()) {
        Ok(teacher) => HttpResponse::Ok().json(teacher),
        Err(e) => error_response(e),
    }
}

/// POST /teachers
pub async fn create(
    store: web::Data<Arc<SproutStore>>,
    body: web::Json<NewTeacher>,
) -> HttpResponse {
    match store.create_teacher(body.into_inner()) {
        Ok(teacher) => {
            info!("Created teacher {}", teacher.id);
            HttpResponse::Created().json(teacher)
        }
        Err(e) => error_response(e),
    }
}

/// PUT /teachers/{id}
pub async fn update(
    store: web::Data<Arc<SproutStore>>,
    path: web::Path<i64>,
    body: web::Json<TeacherPatch>,
) -> HttpResponse {
    match store.update_teacher(path.into_inner(), body.into_inner()) {
        Ok(teacher) => HttpResponse::Ok().json(teacher),
        Err(e) => error_response(e),
    }
}

/// DELETE /teachers/{id}
pub async fn delete(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    match store.delete_teacher(id) {
        Ok(()) => {
            info!("Deleted teacher {}", id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> web::Data<Arc<SproutStore>> {
        web::Data::new(Arc::new(SproutStore::open_in_memory().unwrap()))
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = data();
        let resp = create(
            store.clone(),
            web::Json(NewTeacher {
                full_name: "Ana Souza".into(),
                email: None,
                phone: None,
            }),
        )
        .await;
        assert_eq!(resp.status(), 201);

        let resp = get(store.clone(), web::Path::from(1)).await;
        assert_eq!(resp.status(), 200);

        let resp = list(store).await;
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn test_get_missing_is_404() {
        let resp = get(data(), web::Path::from(42)).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_update_missing_is_404() {
        let resp = update(data(), web::Path::from(42), web::Json(TeacherPatch::default())).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = data();
        create(
            store.clone(),
            web::Json(NewTeacher {
                full_name: "Ana Souza".into(),
                email: None,
                phone: None,
            }),
        )
        .await;

        let resp = delete(store.clone(), web::Path::from(1)).await;
        assert_eq!(resp.status(), 204);
        let resp = delete(store, web::Path::from(1)).await;
        assert_eq!(resp.status(), 404);
    }
}
