use gallery_render::markup::{EscapeMode, MarkupBuilder, render_photos};
use gallery_render::model::{GalleryConfig, GalleryIdentity, GalleryMetadata, PhotoReference};
use serde_json::json;

fn config(empty_text: &str, photos: &[u32]) -> GalleryConfig {
    GalleryConfig {
        identity: GalleryIdentity::from_json(json!({
            "galleryuid": 123456,
            "photopath": "/p/",
            "emptytext": empty_text
        }))
        .unwrap(),
        metadata: GalleryMetadata::from_json(json!({
            "gname": "X",
            "gdesc": "Y",
            "photos": photos
        }))
        .unwrap(),
    }
}

#[test]
fn empty_gallery_renders_escaped_empty_text() {
    let out = MarkupBuilder::default()
        .render(&config("Nothing <here> & nothing <there>", &[]))
        .unwrap();
    assert_eq!(out, "Nothing &lt;here&gt; &amp; nothing <there>");
}

#[test]
fn empty_gallery_can_escape_everything() {
    let out = MarkupBuilder::new(EscapeMode::All)
        .render(&config("a<b<c", &[]))
        .unwrap();
    assert_eq!(out, "a&lt;b&lt;c");
}

#[test]
fn two_photo_scenario() {
    let out = MarkupBuilder::default()
        .render(&config("No photos", &[1500, 7000]))
        .unwrap();
    let expected = concat!(
        "<div class=\"photobox\"><div class=\"photoframe\">",
        "<a href=\"/p/1234561500\"><img src=\"/p/1234561500\"/></a></div>",
        "<div class=\"capframe\">123456-1500</div></div>",
        "<div class=\"photobox\"><div class=\"photoframe\">",
        "<a href=\"/p/1234567000\"><img src=\"/p/1234561000\"/></a></div>",
        "<div class=\"capframe\">123456-7000</div></div>",
    );
    assert_eq!(out, expected);
}

#[test]
fn one_fragment_per_photo_in_input_order() {
    let photos = [8999, 1000, 3000, 5000, 2999, 6999];
    let out = MarkupBuilder::default()
        .render(&config("", &photos))
        .unwrap();
    assert_eq!(out.matches("class=\"photobox\"").count(), photos.len());

    let mut cursor = 0;
    for full in photos {
        let caption = format!(">123456-{full}<");
        let at = out[cursor..]
            .find(&caption)
            .unwrap_or_else(|| panic!("caption for {full} missing or out of order"));
        cursor += at + caption.len();
    }
}

#[test]
fn thumbnails_use_band_strides() {
    let out = MarkupBuilder::default()
        .render(&config("", &[3500, 5500, 7500]))
        .unwrap();
    assert!(out.contains("<img src=\"/p/1234561500\"/>"));
    assert!(out.contains("<a href=\"/p/1234563500\">"));
    assert!(out.contains("<a href=\"/p/1234565500\">"));
    assert!(out.contains("<a href=\"/p/1234567500\">"));
    assert_eq!(out.matches("<img src=\"/p/1234561500\"/>").count(), 3);
}

#[test]
fn render_photos_requires_at_least_one_photo() {
    let cfg = config("", &[]);
    let err = render_photos(&cfg.identity, &[]).unwrap_err();
    assert!(err.is_at("render_photos", 10), "got {err}");
}

#[test]
fn render_photos_accepts_resolved_references() {
    let cfg = config("", &[]);
    let photo = PhotoReference::new(123_456, 2000).unwrap();
    let out = render_photos(&cfg.identity, &[photo]).unwrap();
    assert!(out.ends_with("<div class=\"capframe\">123456-2000</div></div>"));
}
