//! Admin pages for teachers

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use sprout_common::types::{NewTeacher, TeacherPatch};
use sprout_store::SproutStore;

use crate::html;
use crate::{error_page, redirect};

#[derive(Debug, Deserialize)]
pub struct TeacherForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

fn form_fields(full_name: &str, email: &str, phone: &str) -> String {
    let mut out = String::new();
    out.push_str(&html::text_input("full_name", "Full name", full_name));
    out.push_str(&html::text_input("email", "Email", email));
    out.push_str(&html::text_input("phone", "Phone", phone));
    out
}

/// GET /admin/teachers
pub async fn list_page(store: web::Data<Arc<SproutStore>>) -> HttpResponse {
    let teachers = match store.list_teachers() {
        Ok(rows) => rows,
        Err(e) => return error_page(&e),
    };

    let mut body = String::from(
        "<table><tr><th>ID</th><th>Name</th><th>Email</th><th>Phone</th><th></th></tr>\n",
    );
    for t in &teachers {
        body.push_str(&format!(
            "<tr><td>{id}</td><td><a href=\"/admin/teachers/{id}\">{name}</a></td>\
             <td>{email}</td><td>{phone}</td><td>{del}</td></tr>\n",
            id = t.id,
            name = html::escape(&t.full_name),
            email = html::escape(t.email.as_deref().unwrap_or("")),
            phone = html::escape(t.phone.as_deref().unwrap_or("")),
            del = html::delete_button(&format!("/admin/teachers/{}/delete", t.id)),
        ));
    }
    body.push_str("</table>\n<h2>New teacher</h2>\n");
    body.push_str("<form method=\"post\" action=\"/admin/teachers\">\n");
    body.push_str(&form_fields("", "", ""));
    body.push_str("<button type=\"submit\">Create</button>\n</form>");

    html::page_response("Teachers", &body)
}

/// POST /admin/teachers
pub async fn create(
    store: web::Data<Arc<SproutStore>>,
    form: web::Form<TeacherForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let new = NewTeacher {
        full_name: form.full_name.trim().to_string(),
        email: html::opt_text(&form.email),
        phone: html::opt_text(&form.phone),
    };
    match store.create_teacher(new) {
        Ok(_) => redirect("/admin/teachers"),
        Err(e) => error_page(&e),
    }
}

/// GET /admin/teachers/{id}
pub async fn edit_page(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    let teacher = match store.get_teacher(path.into_inner()) {
        Ok(t) => t,
        Err(e) => return error_page(&e),
    };

    let mut body = format!(
        "<form method=\"post\" action=\"/admin/teachers/{}\">\n",
        teacher.id
    );
    body.push_str(&form_fields(
        &teacher.full_name,
        teacher.email.as_deref().unwrap_or(""),
        teacher.phone.as_deref().unwrap_or(""),
    ));
    body.push_str("<button type=\"submit\">Save</button>\n</form>");

    html::page_response("Edit teacher", &body)
}

/// POST /admin/teachers/{id}
pub async fn update(
    store: web::Data<Arc<SproutStore>>,
    path: web::Path<i64>,
    form: web::Form<TeacherForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let patch = TeacherPatch {
        full_name: html::opt_text(&form.full_name),
        email: Some(html::opt_text(&form.email)),
        phone: Some(html::opt_text(&form.phone)),
    };
    match store.update_teacher(path.into_inner(), patch) {
        Ok(_) => redirect("/admin/teachers"),
        Err(e) => error_page(&e),
    }
}

/// POST /admin/teachers/{id}/delete
pub async fn delete(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    match store.delete_teacher(path.into_inner()) {
        Ok(()) => redirect("/admin/teachers"),
        Err(e) => error_page(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> web::Data<Arc<SproutStore>> {
        web::Data::new(Arc::new(SproutStore::open_in_memory().unwrap()))
    }

    #[tokio::test]
    async fn test_create_redirects_to_listing() {
        let store = data();
        let resp = create(
            store.clone(),
            web::Form(TeacherForm {
                full_name: "Ana Souza".into(),
                email: "ana@example.com".into(),
                phone: String::new(),
            }),
        )
        .await;
        assert_eq!(resp.status(), 303);

        let teacher = store.get_teacher(1).unwrap();
        assert_eq!(teacher.full_name, "Ana Souza");
        // Blank form fields land as NULL, not empty strings
        assert_eq!(teacher.phone, None);
    }

    #[tokio::test]
    async fn test_edit_page_for_missing_teacher_is_404() {
        let resp = edit_page(data(), web::Path::from(9)).await;
        assert_eq!(resp.status(), 404);
    }
}
