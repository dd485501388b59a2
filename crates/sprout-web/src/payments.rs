//! Admin pages for payments

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use sprout_common::error::Error;
use sprout_common::types::{NewPayment, PaymentPatch};
use sprout_store::SproutStore;

use crate::html;
use crate::{error_page, redirect};

#[derive(Debug, Deserialize)]
pub struct PaymentForm {
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub paid_on: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub status: String,
}

fn form_fields(
    student_id: &str,
    paid_on: Option<chrono::NaiveDate>,
    amount: &str,
    method: &str,
    reference: &str,
    status: &str,
) -> String {
    let mut out = String::new();
    out.push_str(&html::text_input("student_id", "Student ID", student_id));
    out.push_str(&html::date_input("paid_on", "Paid on", paid_on));
    out.push_str(&html::text_input("amount", "Amount", amount));
    out.push_str(&html::text_input("method", "Method", method));
    out.push_str(&html::text_input("reference", "Reference", reference));
    out.push_str(&html::text_input("status", "Status", status));
    out
}

/// GET /admin/payments
pub async fn list_page(store: web::Data<Arc<SproutStore>>) -> HttpResponse {
    let payments = match store.list_payments() {
        Ok(rows) => rows,
        Err(e) => return error_page(&e),
    };

    let mut body = String::from(
        "<table><tr><th>ID</th><th>Student</th><th>Paid on</th><th>Amount</th>\
         <th>Method</th><th>Status</th><th></th></tr>\n",
    );
    for p in &payments {
        body.push_str(&format!(
            "<tr><td><a href=\"/admin/payments/{id}\">{id}</a></td><td>{student}</td>\
             <td>{paid_on}</td><td>{amount:.2}</td><td>{method}</td><td>{status}</td>\
             <td>{del}</td></tr>\n",
            id = p.id,
            student = p.student_id,
            paid_on = p.paid_on,
            amount = p.amount,
            method = html::escape(p.method.as_deref().unwrap_or("")),
            status = html::escape(&p.status),
            del = html::delete_button(&format!("/admin/payments/{}/delete", p.id)),
        ));
    }
    body.push_str("</table>\n<h2>New payment</h2>\n");
    body.push_str("<form method=\"post\" action=\"/admin/payments\">\n");
    body.push_str(&form_fields("", None, "", "", "", ""));
    body.push_str("<button type=\"submit\">Create</button>\n</form>");

    html::page_response("Payments", &body)
}

/// POST /admin/payments
pub async fn create(
    store: web::Data<Arc<SproutStore>>,
    form: web::Form<PaymentForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let (Some(student_id), Some(paid_on), Some(amount)) = (
        html::opt_id(&form.student_id),
        html::opt_date(&form.paid_on),
        form.amount.trim().parse::<f64>().ok(),
    ) else {
        return error_page(&Error::InvalidField(
            "student_id, paid_on and amount are required".into(),
        ));
    };

    let new = NewPayment {
        student_id,
        paid_on,
        amount,
        method: html::opt_text(&form.method),
        reference: html::opt_text(&form.reference),
        status: html::opt_text(&form.status),
    };
    match store.create_payment(new) {
        Ok(_) => redirect("/admin/payments"),
        Err(e) => error_page(&e),
    }
}

/// GET /admin/payments/{id}
pub async fn edit_page(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    let payment = match store.get_payment(path.into_inner()) {
        Ok(p) => p,
        Err(e) => return error_page(&e),
    };

    let mut body = format!(
        "<form method=\"post\" action=\"/admin/payments/{}\">\n",
        payment.id
    );
    body.push_str(&form_fields(
        &payment.student_id.to_string(),
        Some(payment.paid_on),
        &format!("{:.2}", payment.amount),
        payment.method.as_deref().unwrap_or(""),
        payment.reference.as_deref().unwrap_or(""),
        &payment.status,
    ));
    body.push_str("<button type=\"submit\">Save</button>\n</form>");

    html::page_response("Edit payment", &body)
}

/// POST /admin/payments/{id}
pub async fn update(
    store: web::Data<Arc<SproutStore>>,
    path: web::Path<i64>,
    form: web::Form<PaymentForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let patch = PaymentPatch {
        student_id: html::opt_id(&form.student_id),
        paid_on: html::opt_date(&form.paid_on),
        amount: form.amount.trim().parse().ok(),
        method: Some(html::opt_text(&form.method)),
        reference: Some(html::opt_text(&form.reference)),
        status: html::opt_text(&form.status),
    };
    match store.update_payment(path.into_inner(), patch) {
        Ok(_) => redirect("/admin/payments"),
        Err(e) => error_page(&e),
    }
}

/// POST /admin/payments/{id}/delete
pub async fn delete(store: web::Data<Arc<SproutStore>>, path: web::Path<i64>) -> HttpResponse {
    match store.delete_payment(path.into_inner()) {
        Ok(()) => redirect("/admin/payments"),
        Err(e) => error_page(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_requires_core_fields() {
        let store = web::Data::new(Arc::new(SproutStore::open_in_memory().unwrap()));
        let resp = create(
            store,
            web::Form(PaymentForm {
                student_id: String::new(),
                paid_on: String::new(),
                amount: String::new(),
                method: String::new(),
                reference: String::new(),
                status: String::new(),
            }),
        )
        .await;
        assert_eq!(resp.status(), 400);
    }
}
