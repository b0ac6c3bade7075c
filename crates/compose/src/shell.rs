//! Standalone email document shell.

use html_escape::encode_double_quoted_attribute;

const HEAD: &str = r#"<head><meta charset="UTF-8"><meta http-equiv="X-UA-Compatible" content="IE=edge"><meta name="viewport" content="width=device-width, initial-scale=1.0"></head>"#;

/// Wraps composed body markup in a complete HTML document.
///
/// The body is centered, capped at 600px, and painted with `background_color`.
pub fn wrap_document(markup: &str, background_color: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="en">{HEAD}<body style="max-width: 600px; background-color: {}; margin-left: auto; margin-right: auto; padding-top:20px;">{markup}</body></html>"#,
        encode_double_quoted_attribute(background_color),
    )
}
