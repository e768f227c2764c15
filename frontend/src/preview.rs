use log::{debug, error};
use serde_json::Value;
use shared::{PreviewPayload, PreviewResponse};
use std::borrow::Cow;

use crate::api::datasets::get_dataset_preview;

pub const NULL_PLACEHOLDER: &str = r#"<span class="text-muted">null</span>"#;

pub fn render_loading() -> String {
    r#"<div class="text-center py-5"><div class="loading-spinner"></div><p class="mt-3">Loading data preview...</p></div>"#
        .to_string()
}

pub fn render_error(message: &str) -> String {
    format!(r#"<div class="alert alert-danger">{}</div>"#, message)
}

/// Alert shown when the request itself failed.
pub fn render_failure(message: &str) -> String {
    render_error(&format!("Failed to load preview: {}", message))
}

/// Cell text of a preview value. Strings are inserted as-is; the server
/// owns their content.
fn format_cell(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(NULL_PLACEHOLDER),
        Some(Value::String(text)) => Cow::Borrowed(text.as_str()),
        Some(Value::Bool(flag)) => Cow::Borrowed(if *flag { "true" } else { "false" }),
        Some(Value::Number(number)) => Cow::Owned(format_number(number)),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

// Integral floats print without a fraction, as the page scripts always did.
fn format_number(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() && float.is_finite() && float.fract() == 0.0 => {
            format!("{}", float)
        }
        _ => number.to_string(),
    }
}

pub fn render_table(payload: &PreviewPayload) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        r#"<p class="text-muted">Showing the first {} rows of {} rows</p>"#,
        payload.shown_rows(),
        payload.total_rows
    ));

    html.push_str(r#"<div class="table-responsive"><table class="table table-sm table-hover"><thead><tr>"#);
    for column in &payload.columns {
        html.push_str(&format!("<th>{}</th>", column));
    }
    html.push_str("</tr></thead><tbody>");

    for row in &payload.data {
        html.push_str("<tr>");
        for column in &payload.columns {
            html.push_str(&format!("<td>{}</td>", format_cell(row.get(column))));
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table></div>");
    html
}

pub fn render_response(response: &PreviewResponse) -> String {
    match response {
        PreviewResponse::Failed(failure) => render_error(&failure.error),
        PreviewResponse::Table(payload) => render_table(payload),
    }
}

/// Shows a loading indicator in `#container_id`, then replaces it with the
/// dataset's preview table or an error alert.
///
/// Calls are not ordered: two overlapping calls for one container both
/// write to it, and whichever response arrives last is shown.
pub async fn load_dataset_preview(dataset_id: &str, container_id: &str) {
    let Some(container) = gloo_utils::document().get_element_by_id(container_id) else {
        return;
    };
    container.set_inner_html(&render_loading());

    let html = match get_dataset_preview(dataset_id).await {
        Ok(response) => {
            debug!("Rendering preview of dataset {} into #{}", dataset_id, container_id);
            render_response(&response)
        }
        Err(e) => {
            error!("Dataset preview for {} failed: {}", dataset_id, e);
            render_failure(&e)
        }
    };
    container.set_inner_html(&html);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn payload(body: Value) -> PreviewPayload {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_table_with_null_cell_and_caption() {
        let html = render_table(&payload(json!({
            "columns": ["x", "y"],
            "data": [{"x": 1, "y": null}],
            "total_rows": 5
        })));

        assert!(html.starts_with(
            r#"<p class="text-muted">Showing the first 1 rows of 5 rows</p>"#
        ));
        assert!(html.contains("<th>x</th><th>y</th>"));
        assert!(html.contains(&format!("<tr><td>1</td><td>{}</td></tr>", NULL_PLACEHOLDER)));
        assert_eq!(html.matches("<tr>").count(), 2);
    }

    #[test]
    fn test_cells_follow_column_order() {
        let html = render_table(&payload(json!({
            "columns": ["b", "a", "missing"],
            "data": [{"a": "left", "b": 2.5}],
            "total_rows": 1
        })));

        assert!(html.contains(&format!(
            "<tr><td>2.5</td><td>left</td><td>{}</td></tr>",
            NULL_PLACEHOLDER
        )));
    }

    #[test]
    fn test_cell_formatting() {
        assert_eq!(format_cell(Some(&json!(3.0))), "3");
        assert_eq!(format_cell(Some(&json!(-7))), "-7");
        assert_eq!(format_cell(Some(&json!(0.25))), "0.25");
        assert_eq!(format_cell(Some(&json!(true))), "true");
        assert_eq!(format_cell(Some(&json!("<b>raw</b>"))), "<b>raw</b>");
        assert_eq!(format_cell(Some(&json!([1, 2]))), "[1,2]");
        assert_eq!(format_cell(Some(&Value::Null)), NULL_PLACEHOLDER);
    }

    #[test]
    fn test_error_response_renders_single_alert() {
        let response: PreviewResponse = serde_json::from_value(json!({"error": "not found"})).unwrap();
        let html = render_response(&response);

        assert_eq!(html, r#"<div class="alert alert-danger">not found</div>"#);
        assert_eq!(html.matches("alert-danger").count(), 1);
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_failure_message() {
        assert_eq!(
            render_failure("Failed to fetch dataset preview: offline"),
            r#"<div class="alert alert-danger">Failed to load preview: Failed to fetch dataset preview: offline</div>"#
        );
    }

    #[test]
    fn test_empty_sample() {
        let html = render_table(&payload(json!({
            "columns": ["x"],
            "data": [],
            "total_rows": 0
        })));

        assert!(html.contains("Showing the first 0 rows of 0 rows"));
        assert!(html.contains("<tbody></tbody>"));
    }
}
