use std::ops::RangeInclusive;

use serde::Deserialize;
use serde_json::{Number, Value};
use thiserror::Error;

pub use band::{Band, thumbnail_for};
pub use fault::Fault;
pub use gallery::{
    GALLERY_UID_RANGE, GalleryConfig, GalleryIdentity, GalleryMetadata, IDENTITY_KEYS,
    METADATA_KEYS, PHOTO_INDEX_RANGE, PhotoReference,
};

mod fault {
    use super::*;

    /// The only error signal of the gallery model.
    ///
    /// A fault names the operation that detected the violated precondition and
    /// a numeric site within it. Faults are never recovered from; the render
    /// attempt that raised one is abandoned.
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    #[error("fault at {operation}:{site}: {message}")]
    pub struct Fault {
        pub operation: &'static str,
        pub site: u32,
        pub message: String,
    }

    impl Fault {
        pub fn new(operation: &'static str, site: u32, message: impl Into<String>) -> Self {
            Self {
                operation,
                site,
                message: message.into(),
            }
        }

        pub fn is_at(&self, operation: &str, site: u32) -> bool {
            self.operation == operation && self.site == site
        }
    }
}

mod band {
    use super::*;

    /// Resolution class of an attachment index.
    ///
    /// Every higher tier stores its thumbnail in the [`Band::Thumbnail`] band,
    /// offset by the tier's stride.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub enum Band {
        Thumbnail,
        Tier1,
        Tier2,
        Tier3,
    }

    impl Band {
        pub const ALL: [Self; 4] = [Self::Thumbnail, Self::Tier1, Self::Tier2, Self::Tier3];

        pub const fn range(self) -> RangeInclusive<u32> {
            match self {
                Self::Thumbnail => RangeInclusive::new(1000, 2999),
                Self::Tier1 => RangeInclusive::new(3000, 4999),
                Self::Tier2 => RangeInclusive::new(5000, 6999),
                Self::Tier3 => RangeInclusive::new(7000, 8999),
            }
        }

        pub const fn stride(self) -> u32 {
            match self {
                Self::Thumbnail => 0,
                Self::Tier1 => 2000,
                Self::Tier2 => 4000,
                Self::Tier3 => 6000,
            }
        }

        pub const fn as_str(self) -> &'static str {
            match self {
                Self::Thumbnail => "thumbnail",
                Self::Tier1 => "tier-1",
                Self::Tier2 => "tier-2",
                Self::Tier3 => "tier-3",
            }
        }

        #[must_use]
        pub fn of(index: u32) -> Option<Self> {
            Self::ALL
                .into_iter()
                .find(|band| band.range().contains(&index))
        }
    }

    impl std::fmt::Display for Band {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// Map a full-resolution attachment index to its thumbnail attachment index.
    ///
    /// # Errors
    /// Faults at `thumbnail_for:20` when `full` lies outside every band.
    pub fn thumbnail_for(full: u32) -> Result<u32, Fault> {
        match Band::of(full) {
            Some(band) => Ok(full - band.stride()),
            None => Err(Fault::new(
                "thumbnail_for",
                20,
                format!("attachment index {full} is outside every band"),
            )),
        }
    }
}

mod gallery {
    use super::*;

    pub const GALLERY_UID_RANGE: RangeInclusive<u32> = RangeInclusive::new(100_000, 999_999);
    pub const PHOTO_INDEX_RANGE: RangeInclusive<u32> = RangeInclusive::new(1000, 8999);

    pub const IDENTITY_KEYS: &[&str] = &["galleryuid", "photopath", "emptytext"];
    pub const METADATA_KEYS: &[&str] = &["gname", "gdesc", "photos"];

    const DECODE_IDENTITY: &str = "decode_identity";
    const DECODE_METADATA: &str = "decode_metadata";

    #[derive(Debug, Deserialize)]
    struct IdentityShape {
        galleryuid: Number,
        photopath: String,
        emptytext: String,
    }

    #[derive(Debug, Deserialize)]
    struct MetadataShape {
        gname: String,
        gdesc: String,
        photos: Vec<Value>,
    }

    /// Which gallery is shown and where its attachments live.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct GalleryIdentity {
        gallery_uid: u32,
        photo_path: String,
        empty_text: String,
    }

    /// Display name, description and photo list of a gallery.
    ///
    /// `name` and `description` are trusted and kept unescaped.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct GalleryMetadata {
        name: String,
        description: String,
        photo_indices: Vec<u32>,
    }

    /// Both validated configuration blocks of one page.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct GalleryConfig {
        pub identity: GalleryIdentity,
        pub metadata: GalleryMetadata,
    }

    /// One photo of a gallery, resolved to its full and thumbnail attachments.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PhotoReference {
        pub gallery_uid: u32,
        pub full_index: u32,
        pub thumb_index: u32,
    }

    impl GalleryIdentity {
        /// Decode the identity block.
        ///
        /// # Errors
        /// Faults at `decode_identity` sites 1000 (not an object), 1100 (missing
        /// key), 1200 (wrong type), 1300 (non-integral uid) and 1400 (uid out of
        /// range).
        pub fn from_json(value: Value) -> Result<Self, Fault> {
            require_keys(&value, IDENTITY_KEYS, DECODE_IDENTITY, 1000, 1100)?;
            let shape: IdentityShape = serde_json::from_value(value)
                .map_err(|err| Fault::new(DECODE_IDENTITY, 1200, err.to_string()))?;
            Self::from_shape(shape)
        }

        pub fn gallery_uid(&self) -> u32 {
            self.gallery_uid
        }

        pub fn photo_path(&self) -> &str {
            &self.photo_path
        }

        pub fn empty_text(&self) -> &str {
            &self.empty_text
        }

        fn from_shape(shape: IdentityShape) -> Result<Self, Fault> {
            let uid = integral_value(&shape.galleryuid).ok_or_else(|| {
                Fault::new(
                    DECODE_IDENTITY,
                    1300,
                    format!("galleryuid {} is not an integer", shape.galleryuid),
                )
            })?;
            let gallery_uid = within(uid, &GALLERY_UID_RANGE).ok_or_else(|| {
                Fault::new(
                    DECODE_IDENTITY,
                    1400,
                    format!("galleryuid {uid} is outside {GALLERY_UID_RANGE:?}"),
                )
            })?;
            Ok(Self {
                gallery_uid,
                photo_path: shape.photopath,
                empty_text: shape.emptytext,
            })
        }
    }

    impl GalleryMetadata {
        /// Decode the metadata block.
        ///
        /// # Errors
        /// Faults at `decode_metadata` sites 2000 (not an object), 2100 (missing
        /// key), 2200 (wrong type), 2300 (photo entry not a number), 2400 (photo
        /// entry non-integral) and 2500 (photo entry out of range).
        pub fn from_json(value: Value) -> Result<Self, Fault> {
            require_keys(&value, METADATA_KEYS, DECODE_METADATA, 2000, 2100)?;
            let shape: MetadataShape = serde_json::from_value(value)
                .map_err(|err| Fault::new(DECODE_METADATA, 2200, err.to_string()))?;
            Self::from_shape(shape)
        }

        pub fn name(&self) -> &str {
            &self.name
        }

        pub fn description(&self) -> &str {
            &self.description
        }

        pub fn photo_indices(&self) -> &[u32] {
            &self.photo_indices
        }

        pub fn is_empty(&self) -> bool {
            self.photo_indices.is_empty()
        }

        fn from_shape(shape: MetadataShape) -> Result<Self, Fault> {
            let mut photo_indices = Vec::with_capacity(shape.photos.len());
            for (position, entry) in shape.photos.iter().enumerate() {
                let Value::Number(number) = entry else {
                    return Err(Fault::new(
                        DECODE_METADATA,
                        2300,
                        format!("photos[{position}] is not a number: {entry}"),
                    ));
                };
                let index = integral_value(number).ok_or_else(|| {
                    Fault::new(
                        DECODE_METADATA,
                        2400,
                        format!("photos[{position}] = {number} is not an integer"),
                    )
                })?;
                let index = within(index, &PHOTO_INDEX_RANGE).ok_or_else(|| {
                    Fault::new(
                        DECODE_METADATA,
                        2500,
                        format!("photos[{position}] = {index} is outside {PHOTO_INDEX_RANGE:?}"),
                    )
                })?;
                photo_indices.push(index);
            }
            Ok(Self {
                name: shape.gname,
                description: shape.gdesc,
                photo_indices,
            })
        }
    }

    impl GalleryConfig {
        /// Resolve every photo of the gallery, in display order.
        ///
        /// # Errors
        /// Propagates the [`thumbnail_for`] fault for an index outside every band.
        pub fn photo_references(&self) -> Result<Vec<PhotoReference>, Fault> {
            self.metadata
                .photo_indices
                .iter()
                .map(|&full| PhotoReference::new(self.identity.gallery_uid, full))
                .collect()
        }
    }

    impl PhotoReference {
        pub fn new(gallery_uid: u32, full_index: u32) -> Result<Self, Fault> {
            Ok(Self {
                gallery_uid,
                full_index,
                thumb_index: thumbnail_for(full_index)?,
            })
        }

        pub fn band(&self) -> Option<Band> {
            Band::of(self.full_index)
        }

        pub fn full_uri(&self, photo_path: &str) -> String {
            format!("{photo_path}{}{}", self.gallery_uid, self.full_index)
        }

        pub fn thumb_uri(&self, photo_path: &str) -> String {
            format!("{photo_path}{}{}", self.gallery_uid, self.thumb_index)
        }

        /// Identifier unique across all galleries.
        pub fn caption(&self) -> String {
            format!("{}-{}", self.gallery_uid, self.full_index)
        }
    }

    fn require_keys(
        value: &Value,
        keys: &[&str],
        operation: &'static str,
        not_object_site: u32,
        missing_key_site: u32,
    ) -> Result<(), Fault> {
        let Some(object) = value.as_object() else {
            return Err(Fault::new(
                operation,
                not_object_site,
                format!("expected a JSON object, found {}", json_kind(value)),
            ));
        };
        match keys.iter().find(|key| !object.contains_key(**key)) {
            Some(key) => Err(Fault::new(
                operation,
                missing_key_site,
                format!("missing required key `{key}`"),
            )),
            None => Ok(()),
        }
    }

    // floor(x) == x, so 123456.0 counts as integral
    fn integral_value(number: &Number) -> Option<f64> {
        let value = number.as_f64()?;
        (value.is_finite() && value.floor() == value).then_some(value)
    }

    fn within(value: f64, range: &RangeInclusive<u32>) -> Option<u32> {
        (value >= f64::from(*range.start()) && value <= f64::from(*range.end()))
            .then_some(value as u32)
    }

    fn json_kind(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        }
    }
}
