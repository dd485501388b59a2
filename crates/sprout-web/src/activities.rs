//! Admin pages for activities and enrollment

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use sprout_common::error::Error;
use sprout_common::types::{ActivityPatch, NewActivity};
use sprout_store::SproutStore;

use crate::html;
use crate::{error_page, redirect};

#[derive(Debug, Deserialize)]
pub struct ActivityForm {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub scheduled_on: String,
}

#[derive(Debug, Deserialize)]
pub struct EnrollForm {
    #[serde(default)]
    pub student_id: String,
}

fn form_fields(description: &str, scheduled_on: Option<chrono::NaiveDate>) -> String {
    let mut out = String::new();
    out.push_str(&html::text_input("description", "Description", description));
    out.push_str(&html::date_input("scheduled_on", "Scheduled on", scheduled_on));
    out
}

/// GET /admin/activities
pub async fn list_page(store: web::Data<Arc<SproutStore>>) -> HttpResponse {
    let activities = match store.list_activities() {
        Ok(rows) => rows,
        Err(e) => return error_page(&e),
    };

    let mut body = String::from(
        "<table><tr><th>ID</th><th>Description</th><th>Scheduled on</th><th></th></tr>\n",
    );
    for a in &activities {
        body.push_str(&format!(
            "<tr><td>{id}</td><td><a href=\"/admin/activities/{id}\">{desc}</a></td>\
             <td>{day}</td><td>{del}</td></tr>\n",
            id = a.id,
            desc = html::escape(&a.description),
            day = a.scheduled_on,
            del = html::delete_button(&format!("/admin/activities/{}/delete", a.id)),
        ));
    }
    body.push_str("</table>\n<h2>New activity</h2>\n");
    body.push_str("<form method=\"post\" action=\"/admin/activities\">\n");
    body.push_str(&form_fields("", None));
    body.push_str("<button type=\"submit\">Create</button>\n</form>");

    html::page_response("Activities", &body)
}

/// POST /admin/activities
pub async fn create(
    store: web::Data<Arc<SproutStore>>,
    form: web::Form<ActivityForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let Some(scheduled_on) = html::opt_date(&form.scheduled_on) else {
        return error_page(&Error::InvalidField("scheduled_on is required".into()));
    };

    let new = NewActivity {
        description: form.description.trim().to_string(),
        scheduled_on,
    };
    match store.create_activity(new) {
        Ok(_) => redirect("/admin/activities"),
        Err(e) => error_page(&e),
    }
}

/// GET /admin/activities/{id}
///
/// The edit page also shows the roster with enroll/unenroll controls.
pub async fn edit_page(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    let activity = match store.get_activity(id) {
        Ok(a) => a,
        Err(e) => return error_page(&e),
    };
    let roster = match store.activity_roster(id) {
        Ok(r) => r,
        Err(e) => return error_page(&e),
    };

    let mut body = format!(
        "<form method=\"post\" action=\"/admin/activities/{}\">\n",
        activity.id
    );
    body.push_str(&form_fields(&activity.description, Some(activity.scheduled_on)));
    body.push_str("<button type=\"submit\">Save</button>\n</form>\n");

    body.push_str("<h2>Enrolled students</h2>\n<table>\n");
    for s in &roster {
        body.push_str(&format!(
            "<tr><td>{id}</td><td>{name}</td><td>\
             <form class=\"inline\" method=\"post\" action=\"/admin/activities/{aid}/unenroll/{id}\">\
             <button type=\"submit\">remove</button></form></td></tr>\n",
            id = s.id,
            name = html::escape(&s.full_name),
            aid = activity.id,
        ));
    }
    body.push_str("</table>\n");
    body.push_str(&format!(
        "<form method=\"post\" action=\"/admin/activities/{}/enroll\">\n",
        activity.id
    ));
    body.push_str(&html::text_input("student_id", "Student ID", ""));
    body.push_str("<button type=\"submit\">Enroll</button>\n</form>");

    html::page_response("Edit activity", &body)
}

/// POST /admin/activities/{id}
pub async fn update(
    store: web::Data<Arc<SproutStore>>,
    path: web::Path<i64>,
    form: web::Form<ActivityForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let patch = ActivityPatch {
        description: html::opt_text(&form.description),
        scheduled_on: html::opt_date(&form.scheduled_on),
    };
    match store.update_activity(path.into_inner(), patch) {
        Ok(_) => redirect("/admin/activities"),
        Err(e) => error_page(&e),
    }
}

/// POST /admin/activities/{id}/delete
pub async fn delete(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    match store.delete_activity(path.into_inner()) {
        Ok(()) => redirect("/admin/activities"),
        Err(e) => error_page(&e),
    }
}

/// POST /admin/activities/{id}/enroll
pub async fn enroll(
    store: web::Data<Arc<SproutStore>>,
    path: web::Path<i64>,
    form: web::Form<EnrollForm>,
) -> HttpResponse {
    let activity_id = path.into_inner();
    let Some(student_id) = html::opt_id(&form.student_id) else {
        return error_page(&Error::InvalidField("student_id is required".into()));
    };
    match store.enroll(activity_id, student_id) {
        Ok(()) => redirect(&format!("/admin/activities/{activity_id}")),
        Err(e) => error_page(&e),
    }
}

/// POST /admin/activities/{id}/unenroll/{student_id}
pub async fn unenroll(
    store: web::Data<Arc<SproutStore>>,
    path: web::Path<(i64, i64)>,
) -> HttpResponse {
    let (activity_id, student_id) = path.into_inner();
    match store.unenroll(activity_id, student_id) {
        Ok(()) => redirect(&format!("/admin/activities/{activity_id}")),
        Err(e) => error_page(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_common::types::NewStudent;

    #[tokio::test]
    async fn test_enroll_flow() {
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
            web::Form(ActivityForm {
                description: "Painting".into(),
                scheduled_on: "2024-05-10".into(),
            }),
        )
        .await;
        assert_eq!(resp.status(), 303);

        let resp = enroll(
            store.clone(),
            web::Path::from(1),
            web::Form(EnrollForm {
                student_id: "1".into(),
            }),
        )
        .await;
        assert_eq!(resp.status(), 303);

        // Second enroll hits the unique pair
        let resp = enroll(
            store.clone(),
            web::Path::from(1),
            web::Form(EnrollForm {
                student_id: "1".into(),
            }),
        )
        .await;
        assert_eq!(resp.status(), 409);

        let resp = unenroll(store, web::Path::from((1, 1))).await;
        assert_eq!(resp.status(), 303);
    }
}
