//! Minimal HTML rendering helpers
//!
//! The admin pages are small enough that a page shell plus an escaper covers
//! them; there is deliberately no template engine.

use actix_web::HttpResponse;
use chrono::NaiveDate;

/// Escape text for safe interpolation into HTML
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a body fragment in the shared page shell
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} - Sprout</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2rem; }}\n\
         table {{ border-collapse: collapse; }}\n\
         td, th {{ border: 1px solid #ccc; padding: 0.3rem 0.6rem; }}\n\
         form.inline {{ display: inline; }}\n\
         .error {{ color: #b00; }}\n\
         </style>\n</head>\n<body>\n\
         <nav><a href=\"/admin\">Home</a></nav>\n\
         <h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = escape(title),
        body = body,
    )
}

/// Render a full page as a 200 response
pub fn page_response(title: &str, body: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page(title, body))
}

/// A labelled text input, pre-filled when editing
pub fn text_input(name: &str, label: &str, value: &str) -> String {
    format!(
        "<label>{label} <input name=\"{name}\" value=\"{value}\"></label><br>\n",
        label = escape(label),
        name = name,
        value = escape(value),
    )
}

/// A labelled date input (expects ISO dates)
pub fn date_input(name: &str, label: &str, value: Option<NaiveDate>) -> String {
    format!(
        "<label>{label} <input type=\"date\" name=\"{name}\" value=\"{value}\"></label><br>\n",
        label = escape(label),
        name = name,
        value = value.map(|d| d.to_string()).unwrap_or_default(),
    )
}

/// An inline delete-button form
pub fn delete_button(action: &str) -> String {
    format!(
        "<form class=\"inline\" method=\"post\" action=\"{action}\">\
         <button type=\"submit\">delete</button></form>",
    )
}

// ============================================================================
// Form field parsing
// ============================================================================

/// Empty or whitespace-only form fields mean "no value"
pub fn opt_text(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse an optional record id from a form field
pub fn opt_id(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

/// Parse an optional ISO date from a form field
pub fn opt_date(s: &str) -> Option<NaiveDate> {
    s.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_page_contains_escaped_title() {
        let page = page("Tots & Co", "<p>x</p>");
        assert!(page.contains("Tots &amp; Co"));
        assert!(page.contains("<p>x</p>"));
    }

    #[test]
    fn test_opt_parsers() {
        assert_eq!(opt_text("  "), None);
        assert_eq!(opt_text(" ana "), Some("ana".to_string()));
        assert_eq!(opt_id("7"), Some(7));
        assert_eq!(opt_id(""), None);
        assert_eq!(opt_date("2024-03-01"), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(opt_date("not-a-date"), None);
    }
}
