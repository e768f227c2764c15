const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
const SIZE_STEP: f64 = 1024.0;

/// Human readable size with base-1024 units, rounded to two decimals.
///
/// `0 -> "0 Bytes"`, `1536 -> "1.5 KB"`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= SIZE_STEP && unit < SIZE_UNITS.len() - 1 {
        size /= SIZE_STEP;
        unit += 1;
    }

    let rounded = (size * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

/// Font Awesome class for an uploaded file, chosen by the text after its last
/// dot. A name without a dot is matched as a whole.
pub fn file_type_icon(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    match extension.as_str() {
        "csv" => "fas fa-file-csv",
        "xls" | "xlsx" => "fas fa-file-excel",
        "json" => "fas fa-file-code",
        _ => "fas fa-file",
    }
}
