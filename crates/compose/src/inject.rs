//! Content kinds and the markup injected for each.

use html_escape::{encode_double_quoted_attribute, encode_text};

const IMAGE_STYLE: &str = "width: 100%; display: block; margin-left: auto; margin-right: auto;";
const LINK_STYLE: &str = "display: block; color: rgb(52, 73, 94); font-size: 12pt; font-family: arial, helvetica, sans-serif;";

/// How a cell value is injected, decided by the bound column's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnContentKind {
    /// Value becomes element text.
    Text,
    /// Value is an image URL.
    Image,
    /// Value is a link target.
    Link,
}

impl ColumnContentKind {
    /// Classifies a column label.
    ///
    /// ASCII case-insensitive substring test, so `headshotImage` is an image;
    /// `"image"` wins over `"link"`. Ignoring case is deliberate: camelCase
    /// labels such as `headshotImage` and `signupLink` must classify, which a
    /// case-sensitive match on the lowercase trigger words would miss.
    ///
    /// # Examples
    ///
    /// ```
    /// use sheetmail_compose::ColumnContentKind;
    ///
    /// assert_eq!(ColumnContentKind::classify("headshotImage"), ColumnContentKind::Image);
    /// assert_eq!(ColumnContentKind::classify("signupLink"), ColumnContentKind::Link);
    /// assert_eq!(ColumnContentKind::classify("firstName"), ColumnContentKind::Text);
    /// ```
    pub fn classify(column_name: &str) -> Self {
        let label = column_name.to_ascii_lowercase();
        if label.contains("image") {
            ColumnContentKind::Image
        } else if label.contains("link") {
            ColumnContentKind::Link
        } else {
            ColumnContentKind::Text
        }
    }
}

/// Block image followed by a line break.
pub fn image_markup(src: &str, alt: &str) -> String {
    format!(
        r#"<img src="{}" alt="{}" style="{IMAGE_STYLE}"><br />"#,
        encode_double_quoted_attribute(src),
        encode_double_quoted_attribute(alt),
    )
}

/// Block link opening in a new tab, labelled with `title`, followed by a line break.
pub fn link_markup(href: &str, title: &str) -> String {
    format!(
        r#"<a href="{}" title="{}" target="_blank" rel="noopener" aria-invalid="true" style="{LINK_STYLE}">{}</a><br />"#,
        encode_double_quoted_attribute(href),
        encode_double_quoted_attribute(title),
        encode_text(title),
    )
}
