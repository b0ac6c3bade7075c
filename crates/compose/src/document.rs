//! Template markup addressed by field identifier.
//!
//! Each operation is one lol_html streaming pass over the current markup.
//! Only the first element carrying a given identifier is ever touched, which
//! mirrors `getElementById` on documents with duplicate ids.

use crate::error::ComposeError;
use lol_html::html_content::{ContentType, Element, EndTag, TextChunk};
use lol_html::{ElementContentHandlers, HandlerResult, RewriteStrSettings, Selector, rewrite_str};
use sheetmail_core::{DocumentAdapter, SLOT_ATTRIBUTE};
use std::borrow::Cow;
use std::cell::Cell;
use std::rc::Rc;

/// HTML template body whose fields are elements with a matching `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateDocument {
    markup: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CapturePhase {
    Pending,
    Inside,
    Done,
}

impl TemplateDocument {
    /// Wraps template markup. Parsing is deferred to each operation.
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    /// Current markup.
    pub fn as_str(&self) -> &str {
        &self.markup
    }

    /// Consumes the document, returning its markup.
    pub fn into_markup(self) -> String {
        self.markup
    }

    /// Returns true if some element carries `slot_id`.
    pub fn contains_slot(&self, slot_id: &str) -> Result<bool, ComposeError> {
        let selector = slot_selector(slot_id)?;
        let mut found = false;
        rewrite_str(
            &self.markup,
            RewriteStrSettings {
                element_content_handlers: vec![(
                    Cow::Owned(selector),
                    ElementContentHandlers::default().element(
                        |_: &mut Element<'_, '_>| -> HandlerResult {
                            found = true;
                            Ok(())
                        },
                    ),
                )],
                ..RewriteStrSettings::new()
            },
        )?;
        Ok(found)
    }

    /// Field identifiers present in the markup, in document order.
    ///
    /// Used to rebuild a registry from a stored template.
    pub fn field_ids(&self) -> Result<Vec<String>, ComposeError> {
        let selector = parse_selector(format!("[{SLOT_ATTRIBUTE}]"))?;
        let mut ids = Vec::new();
        rewrite_str(
            &self.markup,
            RewriteStrSettings {
                element_content_handlers: vec![(
                    Cow::Owned(selector),
                    ElementContentHandlers::default().element(
                        |el: &mut Element<'_, '_>| -> HandlerResult {
                            if let Some(id) = el.get_attribute(SLOT_ATTRIBUTE) {
                                ids.push(id);
                            }
                            Ok(())
                        },
                    ),
                )],
                ..RewriteStrSettings::new()
            },
        )?;
        Ok(ids)
    }

    /// Text content of the element carrying `slot_id`, entities decoded.
    ///
    /// Returns `None` when no element carries the identifier.
    pub fn text_content(&self, slot_id: &str) -> Result<Option<String>, ComposeError> {
        let selector = slot_selector(slot_id)?;
        let phase = Rc::new(Cell::new(CapturePhase::Pending));
        let mut raw = String::new();

        let handlers = ElementContentHandlers::default()
            .element(|el: &mut Element<'_, '_>| -> HandlerResult {
                if phase.get() != CapturePhase::Pending {
                    return Ok(());
                }
                phase.set(CapturePhase::Inside);
                match el.end_tag_handlers() {
                    Some(end_handlers) => {
                        let phase = Rc::clone(&phase);
                        end_handlers.push(Box::new(
                            move |_: &mut EndTag<'_>| -> HandlerResult {
                                phase.set(CapturePhase::Done);
                                Ok(())
                            },
                        ));
                    }
                    // Void elements have no content.
                    None => phase.set(CapturePhase::Done),
                }
                Ok(())
            })
            .text(|chunk: &mut TextChunk<'_>| -> HandlerResult {
                if phase.get() == CapturePhase::Inside {
                    raw.push_str(chunk.as_str());
                }
                Ok(())
            });

        rewrite_str(
            &self.markup,
            RewriteStrSettings {
                element_content_handlers: vec![(Cow::Owned(selector), handlers)],
                ..RewriteStrSettings::new()
            },
        )?;

        if phase.get() == CapturePhase::Pending {
            return Ok(None);
        }
        Ok(Some(html_escape::decode_html_entities(&raw).into_owned()))
    }

    /// Replaces the children of the element carrying `slot_id` with `text`.
    ///
    /// `text` is escaped. Returns `false` when no element carries the identifier.
    pub fn set_text(&mut self, slot_id: &str, text: &str) -> Result<bool, ComposeError> {
        let selector = slot_selector(slot_id)?;
        self.edit_first(selector, |el| {
            el.set_inner_content(text, ContentType::Text);
            Ok(())
        })
    }

    /// Appends raw `html` as the last children of the element carrying `slot_id`.
    pub fn append_html(&mut self, slot_id: &str, html: &str) -> Result<bool, ComposeError> {
        let selector = slot_selector(slot_id)?;
        self.edit_first(selector, |el| {
            el.append(html, ContentType::Html);
            Ok(())
        })
    }

    /// Identifier carried by the first element matching the CSS `selector`.
    ///
    /// `None` when nothing matches or the match has no identifier.
    pub fn field_id_at(&self, selector: &str) -> Result<Option<String>, ComposeError> {
        let selector = parse_selector(selector.to_string())?;
        let mut matched = false;
        let mut id = None;
        rewrite_str(
            &self.markup,
            RewriteStrSettings {
                element_content_handlers: vec![(
                    Cow::Owned(selector),
                    ElementContentHandlers::default().element(
                        |el: &mut Element<'_, '_>| -> HandlerResult {
                            if !matched {
                                matched = true;
                                id = el.get_attribute(SLOT_ATTRIBUTE);
                            }
                            Ok(())
                        },
                    ),
                )],
                ..RewriteStrSettings::new()
            },
        )?;
        Ok(id)
    }

    /// Marks the first element matching the CSS `selector` as field `id`.
    ///
    /// Returns `false` when nothing matches.
    pub fn mark_field(&mut self, selector: &str, id: &str) -> Result<bool, ComposeError> {
        let selector = parse_selector(selector.to_string())?;
        self.edit_first(selector, |el| {
            el.set_attribute(SLOT_ATTRIBUTE, id)?;
            Ok(())
        })
    }

    fn edit_first(
        &mut self,
        selector: Selector,
        mut edit: impl FnMut(&mut Element<'_, '_>) -> HandlerResult,
    ) -> Result<bool, ComposeError> {
        let mut matched = false;
        let output = rewrite_str(
            &self.markup,
            RewriteStrSettings {
                element_content_handlers: vec![(
                    Cow::Owned(selector),
                    ElementContentHandlers::default().element(
                        |el: &mut Element<'_, '_>| -> HandlerResult {
                            if matched {
                                return Ok(());
                            }
                            matched = true;
                            edit(el)
                        },
                    ),
                )],
                ..RewriteStrSettings::new()
            },
        )?;
        if matched {
            self.markup = output;
        }
        Ok(matched)
    }
}

impl DocumentAdapter for TemplateDocument {
    type Error = ComposeError;

    fn set_attribute(
        &mut self,
        element_id: &str,
        attr: &str,
        value: &str,
    ) -> Result<bool, Self::Error> {
        let selector = slot_selector(element_id)?;
        self.edit_first(selector, |el| {
            el.set_attribute(attr, value)?;
            Ok(())
        })
    }

    fn remove_attribute(&mut self, element_id: &str, attr: &str) -> Result<bool, Self::Error> {
        let selector = slot_selector(element_id)?;
        self.edit_first(selector, |el| {
            el.remove_attribute(attr);
            Ok(())
        })
    }
}

/// Attribute selector matching `id="<slot_id>"` exactly.
fn slot_selector(slot_id: &str) -> Result<Selector, ComposeError> {
    let escaped = slot_id.replace('\\', "\\\\").replace('"', "\\\"");
    parse_selector(format!("[{SLOT_ATTRIBUTE}=\"{escaped}\"]"))
}

fn parse_selector(selector: String) -> Result<Selector, ComposeError> {
    selector
        .parse::<Selector>()
        .map_err(|source| ComposeError::Selector { selector, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetmail_core::FieldRegistry;

    #[test]
    fn finds_slots_by_exact_id() {
        let doc = TemplateDocument::new(r#"<p id="greeting"></p><p id="greeting-2"></p>"#);
        assert!(doc.contains_slot("greeting").unwrap());
        assert!(doc.contains_slot("greeting-2").unwrap());
        assert!(!doc.contains_slot("Greeting").unwrap());
        assert!(!doc.contains_slot("greet").unwrap());
    }

    #[test]
    fn odd_identifiers_are_escaped() {
        let doc = TemplateDocument::new(r#"<p id="plain">x</p>"#);
        assert!(!doc.contains_slot("a\"b").unwrap());
        assert!(!doc.contains_slot("back\\slash").unwrap());
    }

    #[test]
    fn text_content_includes_descendants() {
        let doc = TemplateDocument::new(
            r#"<div id="intro">Hello <b>dear</b> reader &amp; friend</div><p>outside</p>"#,
        );
        assert_eq!(
            doc.text_content("intro").unwrap().as_deref(),
            Some("Hello dear reader & friend")
        );
        assert_eq!(doc.text_content("missing").unwrap(), None);
    }

    #[test]
    fn text_content_of_empty_element_is_empty() {
        let doc = TemplateDocument::new(r#"<p id="greeting"></p>"#);
        assert_eq!(doc.text_content("greeting").unwrap().as_deref(), Some(""));
    }

    #[test]
    fn only_first_duplicate_is_read_and_edited() {
        let mut doc = TemplateDocument::new(r#"<p id="x">one</p><p id="x">two</p>"#);
        assert_eq!(doc.text_content("x").unwrap().as_deref(), Some("one"));
        assert!(doc.set_text("x", "1").unwrap());
        assert_eq!(doc.as_str(), r#"<p id="x">1</p><p id="x">two</p>"#);
    }

    #[test]
    fn set_text_escapes_markup() {
        let mut doc = TemplateDocument::new(r#"<p id="x"><i>old</i></p>"#);
        doc.set_text("x", "<b>&").unwrap();
        assert_eq!(doc.as_str(), r#"<p id="x">&lt;b&gt;&amp;</p>"#);
    }

    #[test]
    fn append_html_keeps_existing_children() {
        let mut doc = TemplateDocument::new(r#"<div id="x"><span>a</span></div>"#);
        assert!(doc.append_html("x", "<br />").unwrap());
        assert_eq!(doc.as_str(), r#"<div id="x"><span>a</span><br /></div>"#);
    }

    #[test]
    fn edits_on_missing_slot_leave_markup_untouched() {
        let mut doc = TemplateDocument::new("<p>plain</p>");
        assert!(!doc.set_text("x", "y").unwrap());
        assert!(!doc.append_html("x", "<br />").unwrap());
        assert_eq!(doc.as_str(), "<p>plain</p>");
    }

    #[test]
    fn mark_field_tags_first_match() {
        let mut doc = TemplateDocument::new("<h1>Hi</h1><p>a</p><p>b</p>");
        assert!(doc.mark_field("p", "body").unwrap());
        assert_eq!(doc.as_str(), r#"<h1>Hi</h1><p id="body">a</p><p>b</p>"#);
        assert_eq!(doc.field_ids().unwrap(), vec!["body"]);
        assert!(!doc.mark_field("table", "grid").unwrap());
    }

    #[test]
    fn field_id_at_reads_first_match() {
        let doc = TemplateDocument::new(r#"<h1>Hi</h1><p id="a">x</p><p id="b">y</p>"#);
        assert_eq!(doc.field_id_at("p").unwrap().as_deref(), Some("a"));
        assert_eq!(doc.field_id_at("h1").unwrap(), None);
        assert_eq!(doc.field_id_at("table").unwrap(), None);
    }

    #[test]
    fn mark_field_rejects_bad_selector() {
        let mut doc = TemplateDocument::new("<p>a</p>");
        let err = doc.mark_field("p[", "body").unwrap_err();
        assert!(matches!(err, ComposeError::Selector { .. }));
    }

    #[test]
    fn registry_rename_and_removal_reach_markup() {
        let mut doc = TemplateDocument::new(r#"<p id="title">T</p><p id="body">B</p>"#);
        let registry = FieldRegistry::from_ids(doc.field_ids().unwrap());

        let renamed = registry.add_or_rename(Some("title"), "headline");
        assert!(renamed.sync_document(&mut doc).unwrap());
        assert_eq!(doc.as_str(), r#"<p id="headline">T</p><p id="body">B</p>"#);

        let removed = renamed.registry.remove("body");
        assert!(removed.sync_document(&mut doc).unwrap());
        assert_eq!(doc.as_str(), r#"<p id="headline">T</p><p>B</p>"#);
        assert_eq!(removed.registry.as_slice(), ["headline".to_string()]);
    }
}
