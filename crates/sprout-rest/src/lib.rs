//! JSON REST API for the Sprout backend
//!
//! One handler module per entity, each following the same pattern: look the
//! row up by primary key, apply the payload, and serialize the record back.
//! Routes follow `/<entity-plural>` and `/<entity-plural>/{id}`.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod activities;
pub mod attendance;
pub mod classes;
pub mod payments;
pub mod respond;
pub mod students;
pub mod teachers;
pub mod users;

use actix_web::{web, HttpResponse};

/// Health check
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "sprout",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Register the REST routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));

    cfg.service(
        web::scope("/teachers")
            .route("", web::get().to(teachers::list))
            .route("", web::post().to(teachers::create))
            .route("/{id}", web::get().to(teachers::get))
            .route("/{id}", web::put().to(teachers::update))
            .route("/{id}", web::delete().to(teachers::delete)),
    );

    cfg.service(
        web::scope("/classes")
            .route("", web::get().to(classes::list))
            .route("", web::post().to(classes::create))
            .route("/{id}", web::get().to(classes::get))
            .route("/{id}", web::put().to(classes::update))
            .route("/{id}", web::delete().to(classes::delete)),
    );

    cfg.service(
        web::scope("/students")
            .route("", web::get().to(students::list))
            .route("", web::post().to(students::create))
            .route("/{id}", web::get().to(students::get))
            .route("/{id}", web::put().to(students::update))
            .route("/{id}", web::delete().to(students::delete))
            .route("/{id}/payments", web::get().to(students::payments))
            .route("/{id}/attendance", web::get().to(students::attendance))
            .route("/{id}/activities", web::get().to(students::activities)),
    );

    cfg.service(
        web::scope("/payments")
            .route("", web::get().to(payments::list))
            .route("", web::post().to(payments::create))
            .route("/{id}", web::get().to(payments::get))
            .route("/{id}", web::put().to(payments::update))
            .route("/{id}", web::delete().to(payments::delete)),
    );

    cfg.service(
        web::scope("/attendance")
            .route("", web::get().to(attendance::list))
            .route("", web::post().to(attendance::create))
            .route("/{id}", web::get().to(attendance::get))
            .route("/{id}", web::put().to(attendance::update))
            .route("/{id}", web::delete().to(attendance::delete)),
    );

    cfg.service(
        web::scope("/activities")
            .route("", web::get().to(activities::list))
            .route("", web::post().to(activities::create))
            .route("/{id}", web::get().to(activities::get))
            .route("/{id}", web::put().to(activities::update))
            .route("/{id}", web::delete().to(activities::delete))
            .route("/{id}/students", web::get().to(activities::roster))
            .route(
                "/{id}/students/{student_id}",
                web::post().to(activities::enroll),
            )
            .route(
                "/{id}/students/{student_id}",
                web::delete().to(activities::unenroll),
            ),
    );

    cfg.service(
        web::scope("/users")
            .route("", web::get().to(users::list))
            .route("", web::post().to(users::create))
            .route("/{id}", web::get().to(users::get))
            .route("/{id}", web::put().to(users::update))
            .route("/{id}", web::delete().to(users::delete)),
    );
}
