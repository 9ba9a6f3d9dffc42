use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::markup::EscapeMode;

/// Where the renderer looks inside a page, and how it escapes the empty text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RenderSettings {
    /// Id of the `<script>` block carrying `galleryuid`, `photopath`, `emptytext`.
    pub identity_block: String,
    /// Id of the `<script>` block carrying `gname`, `gdesc`, `photos`.
    pub metadata_block: String,
    /// Id of the element whose contents are replaced by the rendered gallery.
    pub container: String,
    /// Escaping applied to the empty-state text.
    pub empty_text_escape: EscapeMode,
}

impl RenderSettings {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Reject layouts that can never locate their blocks unambiguously.
    pub fn validated(self) -> Result<Self, Error> {
        for (key, value) in [
            ("identity-block", &self.identity_block),
            ("metadata-block", &self.metadata_block),
            ("container", &self.container),
        ] {
            if value.trim().is_empty() {
                return Err(Error::InvalidSettings(format!("{key} must not be empty")));
            }
            if value.contains('"') || value.contains('\'') {
                return Err(Error::InvalidSettings(format!(
                    "{key} must not contain quote characters"
                )));
            }
        }
        if self.identity_block == self.metadata_block {
            return Err(Error::InvalidSettings(
                "identity-block and metadata-block must differ".into(),
            ));
        }
        Ok(self)
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            identity_block: "gconfigjson".into(),
            metadata_block: "galleryjson".into(),
            container: "galdiv".into(),
            empty_text_escape: EscapeMode::default(),
        }
    }
}
