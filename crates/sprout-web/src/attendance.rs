//! Admin pages for attendance

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use sprout_common::error::Error;
use sprout_common::types::{AttendancePatch, NewAttendance};
use sprout_store::SproutStore;

use crate::html;
use crate::{error_page, redirect};

#[derive(Debug, Deserialize)]
pub struct AttendanceForm {
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub day: String,
    /// Checkbox: present when the field is submitted at all
    #[serde(default)]
    pub present: Option<String>,
}

fn form_fields(student_id: &str, day: Option<chrono::NaiveDate>, present: bool) -> String {
    let mut out = String::new();
    out.push_str(&html::text_input("student_id", "Student ID", student_id));
    out.push_str(&html::date_input("day", "Day", day));
    out.push_str(&format!(
        "<label>Present <input type=\"checkbox\" name=\"present\" value=\"on\"{}></label><br>\n",
        if present { " checked" } else { "" }
    ));
    out
}

/// GET /admin/attendance
pub async fn list_page(store: web::Data<Arc<SproutStore>>) -> HttpResponse {
    let records = match store.list_attendance() {
        Ok(rows) => rows,
        Err(e) => return error_page(&e),
    };

    let mut body = String::from(
        "<table><tr><th>ID</th><th>Student</th><th>Day</th><th>Present</th><th></th></tr>\n",
    );
    for r in &records {
        body.push_str(&format!(
            "<tr><td><a href=\"/admin/attendance/{id}\">{id}</a></td><td>{student}</td>\
             <td>{day}</td><td>{present}</td><td>{del}</td></tr>\n",
            id = r.id,
            student = r.student_id,
            day = r.day,
            present = if r.present { "yes" } else { "no" },
            del = html::delete_button(&format!("/admin/attendance/{}/delete", r.id)),
        ));
    }
    body.push_str("</table>\n<h2>New record</h2>\n");
    body.push_str("<form method=\"post\" action=\"/admin/attendance\">\n");
    body.push_str(&form_fields("", None, true));
    body.push_str("<button type=\"submit\">Create</button>\n</form>");

    html::page_response("Attendance", &body)
}

/// POST /admin/attendance
pub async fn create(
    store: web::Data<Arc<SproutStore>>,
    form: web::Form<AttendanceForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let (Some(student_id), Some(day)) = (html::opt_id(&form.student_id), html::opt_date(&form.day))
    else {
        return error_page(&Error::InvalidField("student_id and day are required".into()));
    };

    let new = NewAttendance {
        student_id,
        day,
        present: form.present.is_some(),
    };
    match store.create_attendance(new) {
        Ok(_) => redirect("/admin/attendance"),
        Err(e) => error_page(&e),
    }
}

/// GET /admin/attendance/{id}
pub async fn edit_page(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    let record = match store.get_attendance(path.into_inner()) {
        Ok(r) => r,
        Err(e) => return error_page(&e),
    };

    let mut body = format!(
        "<form method=\"post\" action=\"/admin/attendance/{}\">\n",
        record.id
    );
    body.push_str(&form_fields(
        &record.student_id.to_string(),
        Some(record.day),
        record.present,
    ));
    body.push_str("<button type=\"submit\">Save</button>\n</form>");

    html::page_response("Edit attendance", &body)
}

/// POST /admin/attendance/{id}
pub async fn update(
    store: web::Data<Arc<SproutStore>>,
    path: web::Path<i64>,
    form: web::Form<AttendanceForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let patch = AttendancePatch {
        student_id: html::opt_id(&form.student_id),
        day: html::opt_date(&form.day),
        // Checkboxes are absent when unchecked, so the form always decides
        present: Some(form.present.is_some()),
    };
    match store.update_attendance(path.into_inner(), patch) {
        Ok(_) => redirect("/admin/attendance"),
        Err(e) => error_page(&e),
    }
}

/// POST /admin/attendance/{id}/delete
pub async fn delete(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    match store.delete_attendance(path.into_inner()) {
        Ok(()) => redirect("/admin/attendance"),
        Err(e) => error_page(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_common::types::NewStudent;

    #[tokio::test]
    async fn test_checkbox_semantics() {
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
            web::Form(AttendanceForm {
                student_id: "1".into(),
                day: "2024-04-02".into(),
                present: None,
            }),
        )
        .await;
        assert_eq!(resp.status(), 303);
        assert!(!store.get_attendance(1).unwrap().present);

        let resp = update(
            store.clone(),
            web::Path::from(1),
            web::Form(AttendanceForm {
                student_id: "1".into(),
                day: "2024-04-02".into(),
                present: Some("on".into()),
            }),
        )
        .await;
        assert_eq!(resp.status(), 303);
        assert!(store.get_attendance(1).unwrap().present);
    }
}
