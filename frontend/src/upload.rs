use gloo::events::EventListener;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, HtmlInputElement};

use crate::error::js_error_message;
use crate::format::file_type_icon;

pub const NO_FILE_LABEL: &str = "No file selected";

/// Mirrors the selected file of the page's upload input into
/// `.custom-file-label` and `#fileTypeIcon`.
pub fn init_file_upload_preview() {
    let document = gloo_utils::document();
    let Some(input) = document
        .query_selector(r#"input[type="file"]"#)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };

    // Bound for the page's lifetime.
    EventListener::new(&input, "change", on_file_change).forget();
    debug!("File upload preview bound");
}

fn on_file_change(event: &Event) {
    let Some(input) = event
        .target()
        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    let file_name = input.files().and_then(|files| files.get(0)).map(|file| file.name());
    let document = gloo_utils::document();

    if let Some(label) = document.query_selector(".custom-file-label").ok().flatten() {
        label.set_text_content(Some(file_name.as_deref().unwrap_or(NO_FILE_LABEL)));
    }

    let (Some(name), Some(icon)) = (file_name, document.get_element_by_id("fileTypeIcon")) else {
        return;
    };
    icon.set_class_name(file_type_icon(&name));
    if let Ok(icon) = icon.dyn_into::<HtmlElement>() {
        if let Err(e) = icon.style().set_property("display", "inline-block") {
            debug!("Failed to show file type icon: {}", js_error_message(&e));
        }
    }
}
