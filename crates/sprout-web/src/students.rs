//! Admin pages for students

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use sprout_common::types::{NewStudent, StudentPatch};
use sprout_store::SproutStore;

use crate::html;
use crate::{error_page, redirect};

#[derive(Debug, Deserialize)]
pub struct StudentForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub class_id: String,
    #[serde(default)]
    pub guardian_name: String,
    #[serde(default)]
    pub guardian_phone: String,
    #[serde(default)]
    pub guardian_email: String,
    #[serde(default)]
    pub notes: String,
}

fn form_fields(student: Option<&sprout_common::types::Student>) -> String {
    let blank = String::new();
    let (full_name, class_id, guardian_name, guardian_phone, guardian_email, notes) = match student
    {
        Some(s) => (
            s.full_name.clone(),
            s.class_id.map(|c| c.to_string()).unwrap_or_default(),
            s.guardian_name.clone().unwrap_or_default(),
            s.guardian_phone.clone().unwrap_or_default(),
            s.guardian_email.clone().unwrap_or_default(),
            s.notes.clone().unwrap_or_default(),
        ),
        None => (
            blank.clone(),
            blank.clone(),
            blank.clone(),
            blank.clone(),
            blank.clone(),
            blank,
        ),
    };

    let mut out = String::new();
    out.push_str(&html::text_input("full_name", "Full name", &full_name));
    out.push_str(&html::date_input(
        "birth_date",
        "Birth date",
        student.and_then(|s| s.birth_date),
    ));
    out.push_str(&html::text_input("class_id", "Class ID", &class_id));
    out.push_str(&html::text_input("guardian_name", "Guardian name", &guardian_name));
    out.push_str(&html::text_input("guardian_phone", "Guardian phone", &guardian_phone));
    out.push_str(&html::text_input("guardian_email", "Guardian email", &guardian_email));
    out.push_str(&html::text_input("notes", "Notes", &notes));
    out
}

/// GET /admin/students
pub async fn list_page(store: web::Data<Arc<SproutStore>>) -> HttpResponse {
    let students = match store.list_students() {
        Ok(rows) => rows,
        Err(e) => return error_page(&e),
    };

    let mut body = String::from(
        "<table><tr><th>ID</th><th>Name</th><th>Birth date</th><th>Class</th>\
         <th>Guardian</th><th></th></tr>\n",
    );
    for s in &students {
        body.push_str(&format!(
            "<tr><td>{id}</td><td><a href=\"/admin/students/{id}\">{name}</a></td>\
             <td>{birth}</td><td>{class}</td><td>{guardian}</td><td>{del}</td></tr>\n",
            id = s.id,
            name = html::escape(&s.full_name),
            birth = s.birth_date.map(|d| d.to_string()).unwrap_or_default(),
            class = s.class_id.map(|c| c.to_string()).unwrap_or_default(),
            guardian = html::escape(s.guardian_name.as_deref().unwrap_or("")),
            del = html::delete_button(&format!("/admin/students/{}/delete", s.id)),
        ));
    }
    body.push_str("</table>\n<h2>New student</h2>\n");
    body.push_str("<form method=\"post\" action=\"/admin/students\">\n");
    body.push_str(&form_fields(None));
    body.push_str("<button type=\"submit\">Create</button>\n</form>");

    html::page_response("Students", &body)
}

/// POST /admin/students
pub async fn create(
    store: web::Data<Arc<SproutStore>>,
    form: web::Form<StudentForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let new = NewStudent {
        full_name: form.full_name.trim().to_string(),
        birth_date: html::opt_date(&form.birth_date),
        class_id: html::opt_id(&form.class_id),
        guardian_name: html::opt_text(&form.guardian_name),
        guardian_phone: html::opt_text(&form.guardian_phone),
        guardian_email: html::opt_text(&form.guardian_email),
        notes: html::opt_text(&form.notes),
    };
    match store.create_student(new) {
        Ok(_) => redirect("/admin/students"),
        Err(e) => error_page(&e),
    }
}

/// GET /admin/students/{id}
pub async fn edit_page(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    let student = match store.get_student(path.into_inner()) {
        Ok(s) => s,
        Err(e) => return error_page(&e),
    };

    let mut body = format!(
        "<form method=\"post\" action=\"/admin/students/{}\">\n",
        student.id
    );
    body.push_str(&form_fields(Some(&student)));
    body.push_str("<button type=\"submit\">Save</button>\n</form>");

    // Read-only context for the operator
    if let Ok(activities) = store.student_activities(student.id) {
        if !activities.is_empty() {
            body.push_str("<h2>Activities</h2>\n<ul>\n");
            for a in &activities {
                body.push_str(&format!(
                    "<li>{} ({})</li>\n",
                    html::escape(&a.description),
                    a.scheduled_on
                ));
            }
            body.push_str("</ul>\n");
        }
    }

    html::page_response("Edit student", &body)
}

/// POST /admin/students/{id}
pub async fn update(
    store: web::Data<Arc<SproutStore>>,
    path: web::Path<i64>,
    form: web::Form<StudentForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let patch = StudentPatch {
        full_name: html::opt_text(&form.full_name),
        birth_date: Some(html::opt_date(&form.birth_date)),
        class_id: Some(html::opt_id(&form.class_id)),
        guardian_name: Some(html::opt_text(&form.guardian_name)),
        guardian_phone: Some(html::opt_text(&form.guardian_phone)),
        guardian_email: Some(html::opt_text(&form.guardian_email)),
        notes: Some(html::opt_text(&form.notes)),
    };
    match store.update_student(path.into_inner(), patch) {
        Ok(_) => redirect("/admin/students"),
        Err(e) => error_page(&e),
    }
}

/// POST /admin/students/{id}/delete
pub async fn delete(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    match store.delete_student(path.into_inner()) {
        Ok(()) => redirect("/admin/students"),
        Err(e) => error_page(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_parses_date_and_blank_class() {
        let store = web::Data::new(Arc::new(SproutStore::open_in_memory().unwrap()));
        let resp = create(
            store.clone(),
            web::Form(StudentForm {
                full_name: "Bruno Lima".into(),
                birth_date: "2021-03-14".into(),
                class_id: String::new(),
                guardian_name: "Carla Lima".into(),
                guardian_phone: String::new(),
                guardian_email: String::new(),
                notes: String::new(),
            }),
        )
        .await;
        assert_eq!(resp.status(), 303);

        let student = store.get_student(1).unwrap();
        assert_eq!(
            student.birth_date,
            chrono::NaiveDate::from_ymd_opt(2021, 3, 14)
        );
        assert_eq!(student.class_id, None);
    }
}
