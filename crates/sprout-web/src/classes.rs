//! Admin pages for classes

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use sprout_common::types::{ClassRoomPatch, NewClassRoom};
use sprout_store::SproutStore;

use crate::html;
use crate::{error_page, redirect};

#[derive(Debug, Deserialize)]
pub struct ClassForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub schedule: String,
    /// Teacher id as typed; blank leaves the class unassigned
    #[serde(default)]
    pub teacher_id: String,
}

fn form_fields(name: &str, schedule: &str, teacher_id: &str) -> String {
    let mut out = String::new();
    out.push_str(&html::text_input("name", "Name", name));
    out.push_str(&html::text_input("schedule", "Schedule", schedule));
    out.push_str(&html::text_input("teacher_id", "Teacher ID", teacher_id));
    out
}

/// GET /admin/classes
pub async fn list_page(store: web::Data<Arc<SproutStore>>) -> HttpResponse {
    let classes = match store.list_classes() {
        Ok(rows) => rows,
        Err(e) => return error_page(&e),
    };

    let mut body = String::from(
        "<table><tr><th>ID</th><th>Name</th><th>Schedule</th><th>Teacher</th><th></th></tr>\n",
    );
    for c in &classes {
        body.push_str(&format!(
            "<tr><td>{id}</td><td><a href=\"/admin/classes/{id}\">{name}</a></td>\
             <td>{schedule}</td><td>{teacher}</td><td>{del}</td></tr>\n",
            id = c.id,
            name = html::escape(&c.name),
            schedule = html::escape(c.schedule.as_deref().unwrap_or("")),
            teacher = c.teacher_id.map(|t| t.to_string()).unwrap_or_default(),
            del = html::delete_button(&format!("/admin/classes/{}/delete", c.id)),
        ));
    }
    body.push_str("</table>\n<h2>New class</h2>\n");
    body.push_str("<form method=\"post\" action=\"/admin/classes\">\n");
    body.push_str(&form_fields("", "", ""));
    body.push_str("<button type=\"submit\">Create</button>\n</form>");

    html::page_response("Classes", &body)
}

/// POST /admin/classes
pub async fn create(store: web::Data<Arc<SproutStore>>, form: web::Form<ClassForm>) -> HttpResponse {
    let form = form.into_inner();
    let new = NewClassRoom {
        name: form.name.trim().to_string(),
        schedule: html::opt_text(&form.schedule),
        teacher_id: html::opt_id(&form.teacher_id),
    };
    match store.create_class(new) {
        Ok(_) => redirect("/admin/classes"),
        Err(e) => error_page(&e),
    }
}

/// GET /admin/classes/{id}
pub async fn edit_page(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    let class = match store.get_class(path.into_inner()) {
        Ok(c) => c,
        Err(e) => return error_page(&e),
    };

    let mut body = format!("<form method=\"post\" action=\"/admin/classes/{}\">\n", class.id);
    body.push_str(&form_fields(
        &class.name,
        class.schedule.as_deref().unwrap_or(""),
        &class.teacher_id.map(|t| t.to_string()).unwrap_or_default(),
    ));
    body.push_str("<button type=\"submit\">Save</button>\n</form>");

    html::page_response("Edit class", &body)
}

/// POST /admin/classes/{id}
pub async fn update(
    store: web::Data<Arc<SproutStore>>,
    path: web::Path<i64>,
    form: web::Form<ClassForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let patch = ClassRoomPatch {
        name: html::opt_text(&form.name),
        schedule: Some(html::opt_text(&form.schedule)),
        teacher_id: Some(html::opt_id(&form.teacher_id)),
    };
    match store.update_class(path.into_inner(), patch) {
        Ok(_) => redirect("/admin/classes"),
        Err(e) => error_page(&e),
    }
}

/// POST /admin/classes/{id}/delete
pub async fn delete(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    match store.delete_class(path.into_inner()) {
        Ok(()) => redirect("/admin/classes"),
        Err(e) => error_page(&e),
    }
}
