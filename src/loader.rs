use gallery_model::{Fault, GalleryConfig, GalleryIdentity, GalleryMetadata};
use serde_json::Value;
use tracing::debug;

use crate::config::RenderSettings;
use crate::document::Document;

const LOAD_CONFIG: &str = "load_config";

/// Read and validate both configuration blocks of `document`.
///
/// The identity block is fully validated before the metadata block is looked
/// at. Nothing is returned unless both pass.
///
/// # Errors
/// Faults at `load_config:110` for a missing block, `load_config:10` for a
/// block that is not JSON, and at the `decode_identity`/`decode_metadata` sites
/// for a block of the wrong shape.
pub fn load_config(
    document: &Document,
    settings: &RenderSettings,
) -> Result<GalleryConfig, Fault> {
    let identity = GalleryIdentity::from_json(parse_block(document, &settings.identity_block)?)?;
    debug!(
        gallery_uid = identity.gallery_uid(),
        photo_path = identity.photo_path(),
        "identity block validated"
    );
    let metadata = GalleryMetadata::from_json(parse_block(document, &settings.metadata_block)?)?;
    debug!(
        name = metadata.name(),
        photos = metadata.photo_indices().len(),
        "metadata block validated"
    );
    Ok(GalleryConfig { identity, metadata })
}

fn parse_block(document: &Document, id: &str) -> Result<Value, Fault> {
    let text = document.json_block(id).ok_or_else(|| {
        Fault::new(LOAD_CONFIG, 110, format!("no <script> block with id `{id}`"))
    })?;
    serde_json::from_str(&text)
        .map_err(|err| Fault::new(LOAD_CONFIG, 10, format!("block `{id}` is not valid JSON: {err}")))
}
