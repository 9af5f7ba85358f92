//! Display-name formatting strategies.

use crate::models::NameFormat;
use crate::utils::normalize_whitespace;
use crate::utils::url::last_path_segment;

/// Turn a hyphen-joined URL slug into a display name (`jane-q-doe` -> `Jane Q Doe`).
pub fn name_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reorder a `Last, First` heading (`Doe, Jane Q` -> `Jane Q Doe`).
///
/// Headings without a comma are returned whitespace-normalized.
pub fn name_from_last_first(heading: &str) -> String {
    let heading = normalize_whitespace(heading);
    match heading.split_once(',') {
        Some((last, first)) => {
            let (last, first) = (last.trim(), first.trim());
            if first.is_empty() {
                last.to_string()
            } else {
                format!("{first} {last}")
            }
        }
        None => heading,
    }
}

/// Derive a display name for a profile.
///
/// `heading` is the text of the site's name heading, if the page has one.
pub fn format_name(format: NameFormat, profile_url: &str, heading: Option<&str>) -> Option<String> {
    let name = match format {
        NameFormat::Slug => last_path_segment(profile_url).map(|slug| name_from_slug(&slug)),
        NameFormat::LastFirst => heading.map(name_from_last_first),
        NameFormat::Heading => heading.map(normalize_whitespace),
    };
    name.filter(|n| !n.is_empty())
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
