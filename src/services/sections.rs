//! Section-bounded text extraction.
//!
//! Profile pages often mark sections only with a heading, with no closing
//! element. A section here is everything between a heading and the next
//! sibling heading with the same tag.

use scraper::{ElementRef, Html, Selector};

use crate::utils::normalize_whitespace;

/// Tags whose text counts as a paragraph of a section.
pub const PARAGRAPH_TAGS: &[&str] = &[
    "p",
    "div",
    "ul",
    "ol",
    "li",
    "blockquote",
    "section",
    "pre",
    "span",
    "table",
    "dl",
];

/// Find the first heading matching `heading_selector` whose normalized text is `title`.
pub fn find_heading<'a>(
    document: &'a Html,
    heading_selector: &Selector,
    title: &str,
) -> Option<ElementRef<'a>> {
    let wanted = normalize_whitespace(title);
    document
        .select(heading_selector)
        .find(|heading| normalize_whitespace(&element_text(*heading)) == wanted)
}

/// Sibling elements after `heading` up to the next heading with the same tag.
pub fn section_elements(heading: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    let tag = heading.value().name().to_string();
    heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(move |el| el.value().name() != tag)
}

/// Non-empty paragraph texts of a section, in document order.
pub fn section_paragraphs(heading: ElementRef<'_>) -> Vec<String> {
    section_elements(heading)
        .filter(|el| PARAGRAPH_TAGS.contains(&el.value().name()))
        .map(|el| normalize_whitespace(&element_text(el)))
        .filter(|text| !text.is_empty())
        .collect()
}

/// Paragraph texts of a section joined by newlines.
///
/// A section with no paragraphs yields `placeholder` rather than an empty string.
pub fn section_text(heading: ElementRef<'_>, placeholder: &str) -> String {
    let paragraphs = section_paragraphs(heading);
    if paragraphs.is_empty() {
        placeholder.to_string()
    } else {
        paragraphs.join("\n")
    }
}

/// First element of the section under `heading` matching `selector`.
///
/// The search stops at the next heading with the same tag.
pub fn section_match<'a>(heading: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    section_elements(heading).find(|el| selector.matches(el))
}

/// All descendant text of an element concatenated.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
