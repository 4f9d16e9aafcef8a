use tracing::debug;

use crate::document::{Document, DocumentError};
use crate::viewer_html::{DATA_ASSIGNMENT, DATA_PLACEHOLDER, VIEWER_TEMPLATE};

pub const EXPORT_FILE_NAME: &str = "exported_map.html";
pub const EXPORT_MEDIA_TYPE: &str = "text/html";

/// Makes serialized JSON safe to inline in a `<script>` element.
pub fn escape_script_payload(json: &str) -> String {
    json.replace("</", "<\\/")
}

/// Self-contained read-only viewer page with `doc` inlined.
pub fn render_standalone_html(doc: &Document) -> Result<String, DocumentError> {
    let payload = escape_script_payload(&doc.to_json_string()?);
    debug!(bytes = payload.len(), "rendering standalone viewer");
    Ok(VIEWER_TEMPLATE.replacen(DATA_PLACEHOLDER, &payload, 1))
}

/// Pulls the inlined document back out of a page built by
/// [`render_standalone_html`].
pub fn extract_embedded_document(html: &str) -> Option<Result<Document, DocumentError>> {
    let start = html.find(DATA_ASSIGNMENT)? + DATA_ASSIGNMENT.len();
    let line = html[start..].lines().next()?;
    let payload = line.strip_suffix(';')?.replace("<\\/", "</");
    Some(Document::from_json_str(&payload))
}
