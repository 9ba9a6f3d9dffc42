use std::fmt::Write as _;

use gallery_model::{Fault, GalleryConfig, GalleryIdentity, PhotoReference};
use serde::Deserialize;

/// How the empty-state text is escaped before it is placed in the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EscapeMode {
    /// Escape only the first `&`, then the first `<`, then the first `>`.
    /// Repeated characters pass through unescaped.
    #[default]
    FirstOccurrence,
    /// Escape every `&`, `<` and `>`.
    All,
}

/// Builds the contents of the gallery container.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupBuilder {
    escape: EscapeMode,
}

impl MarkupBuilder {
    pub fn new(escape: EscapeMode) -> Self {
        Self { escape }
    }

    /// The photo grid, or the escaped empty text when the gallery has no photos.
    pub fn render(&self, config: &GalleryConfig) -> Result<String, Fault> {
        if config.metadata.is_empty() {
            return Ok(escape_html(config.identity.empty_text(), self.escape));
        }
        render_photos(&config.identity, &config.photo_references()?)
    }
}

/// One photobox per photo, concatenated in order.
///
/// # Errors
/// Faults at `render_photos:10` when `photos` is empty.
pub fn render_photos(identity: &GalleryIdentity, photos: &[PhotoReference]) -> Result<String, Fault> {
    if photos.is_empty() {
        return Err(Fault::new("render_photos", 10, "no photos to render"));
    }
    let prefix = identity.photo_path();
    let mut code = String::new();
    for photo in photos {
        write!(
            &mut code,
            "<div class=\"photobox\"><div class=\"photoframe\"><a href=\"{}\"><img src=\"{}\"/></a></div><div class=\"capframe\">{}</div></div>",
            photo.full_uri(prefix),
            photo.thumb_uri(prefix),
            photo.caption()
        )
        .ok();
    }
    Ok(code)
}

pub fn escape_html(text: &str, mode: EscapeMode) -> String {
    match mode {
        // `&` goes first so the entities added afterwards are not escaped again
        EscapeMode::FirstOccurrence => text
            .replacen('&', "&amp;", 1)
            .replacen('<', "&lt;", 1)
            .replacen('>', "&gt;", 1),
        EscapeMode::All => text
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_leaves_repeats_raw() {
        assert_eq!(
            escape_html("a & b & <c> <d>", EscapeMode::FirstOccurrence),
            "a &amp; b & &lt;c&gt; <d>"
        );
    }

    #[test]
    fn ampersand_is_escaped_before_brackets() {
        assert_eq!(escape_html("<&>", EscapeMode::FirstOccurrence), "&lt;&amp;&gt;");
        assert_eq!(escape_html("<&>", EscapeMode::All), "&lt;&amp;&gt;");
    }

    #[test]
    fn escape_all_covers_every_occurrence() {
        assert_eq!(
            escape_html("a & b & <c> <d>", EscapeMode::All),
            "a &amp; b &amp; &lt;c&gt; &lt;d&gt;"
        );
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_html("No photos", EscapeMode::FirstOccurrence), "No photos");
        assert_eq!(escape_html("", EscapeMode::All), "");
    }
}
