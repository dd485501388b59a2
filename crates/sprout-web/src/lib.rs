//! Server-rendered admin pages for the Sprout backend
//!
//! Parallel to the JSON API: every mutation available over REST is also
//! reachable from a plain HTML form under `/admin`. Pages are rendered with
//! the small string-building helpers in [`html`]; mutations answer with a
//! 303 redirect back to the listing.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod html;

mod activities;
mod attendance;
mod classes;
mod payments;
mod students;
mod teachers;

use actix_web::{web, HttpResponse};

use sprout_common::error::Error;

/// Register the admin routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("", web::get().to(index))
            .route("/teachers", web::get().to(teachers::list_page))
            .route("/teachers", web::post().to(teachers::create))
            .route("/teachers/{id}", web::get().to(teachers::edit_page))
            .route("/teachers/{id}", web::post().to(teachers::update))
            .route("/teachers/{id}/delete", web::post().to(teachers::delete))
            .route("/classes", web::get().to(classes::list_page))
            .route("/classes", web::post().to(classes::create))
            .route("/classes/{id}", web::get().to(classes::edit_page))
            .route("/classes/{id}", web::post().to(classes::update))
            .route("/classes/{id}/delete", web::post().to(classes::delete))
            .route("/students", web::get().to(students::list_page))
            .route("/students", web::post().to(students::create))
            .route("/students/{id}", web::get().to(students::edit_page))
            .route("/students/{id}", web::post().to(students::update))
            .route("/students/{id}/delete", web::post().to(students::delete))
            .route("/payments", web::get().to(payments::list_page))
            .route("/payments", web::post().to(payments::create))
            .route("/payments/{id}", web::get().to(payments::edit_page))
            .route("/payments/{id}", web::post().to(payments::update))
            .route("/payments/{id}/delete", web::post().to(payments::delete))
            .route("/attendance", web::get().to(attendance::list_page))
            .route("/attendance", web::post().to(attendance::create))
            .route("/attendance/{id}", web::get().to(attendance::edit_page))
            .route("/attendance/{id}", web::post().to(attendance::update))
            .route("/attendance/{id}/delete", web::post().to(attendance::delete))
            .route("/activities", web::get().to(activities::list_page))
            .route("/activities", web::post().to(activities::create))
            .route("/activities/{id}", web::get().to(activities::edit_page))
            .route("/activities/{id}", web::post().to(activities::update))
            .route("/activities/{id}/delete", web::post().to(activities::delete))
            .route("/activities/{id}/enroll", web::post().to(activities::enroll))
            .route(
                "/activities/{id}/unenroll/{student_id}",
                web::post().to(activities::unenroll),
            ),
    );
}

/// GET /admin
async fn index() -> HttpResponse {
    let body = "<ul>\
        <li><a href=\"/admin/teachers\">Teachers</a></li>\
        <li><a href=\"/admin/classes\">Classes</a></li>\
        <li><a href=\"/admin/students\">Students</a></li>\
        <li><a href=\"/admin/payments\">Payments</a></li>\
        <li><a href=\"/admin/attendance\">Attendance</a></li>\
        <li><a href=\"/admin/activities\">Activities</a></li>\
        </ul>";
    html::page_response("Sprout admin", body)
}

/// 303 back to a listing after a mutation
pub(crate) fn redirect(to: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", to))
        .finish()
}

/// Render an error as a minimal HTML page with the matching status
pub(crate) fn error_page(error: &Error) -> HttpResponse {
    if error.status_code() >= 500 {
        tracing::error!("Admin page failure: {}", error);
    }
    let body = format!("<p class=\"error\">{}</p>", html::escape(&error.to_string()));
    let page = html::page("Error", &body);
    match error.status_code() {
        404 => HttpResponse::NotFound(),
        409 => HttpResponse::Conflict(),
        422 => HttpResponse::UnprocessableEntity(),
        400 => HttpResponse::BadRequest(),
        _ => HttpResponse::InternalServerError(),
    }
    .content_type("text/html; charset=utf-8")
    .body(page)
}
