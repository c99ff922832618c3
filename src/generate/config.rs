use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;

use crate::foundation::core::{ItemIndex, LAYER_EXTENSION, Probability};
use crate::foundation::error::{ForgeError, ForgeResult};

/// Upper bound on items per batch.
pub const MAX_ITEM_COUNT: u32 = 10_000;

/// Default number of preview images.
pub const DEFAULT_PREVIEW_COUNT: usize = 5;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Collection identity used for item names, metadata and archive file names.
pub struct CollectionInfo {
    /// Prefix of the metadata `name` (`"PRIMO"` -> `"PRIMO #0007"`).
    pub name_prefix: String,
    /// Prefix of archive file names (`"PRIMO"` -> `"PRIMO_0007.png"`).
    pub file_prefix: String,
    /// Metadata `description`.
    pub description: String,
    /// Metadata `external_url`.
    pub external_url: String,
}

impl Default for CollectionInfo {
    fn default() -> Self {
        Self {
            name_prefix: "PRIMO".to_string(),
            file_prefix: "PRIMO".to_string(),
            description: "Primo from the stone age collection".to_string(),
            external_url: "https://your-nft-site.com".to_string(),
        }
    }
}

impl CollectionInfo {
    /// Display name of item `index`.
    pub fn item_name(&self, index: ItemIndex) -> String {
        format!("{} #{index}", self.name_prefix)
    }

    /// Shared file stem of the item's image and metadata files.
    pub fn file_stem(&self, index: ItemIndex) -> String {
        format!("{}_{index}", self.file_prefix)
    }

    /// Archive name of the item's PNG.
    pub fn image_file_name(&self, index: ItemIndex) -> String {
        format!("{}{LAYER_EXTENSION}", self.file_stem(index))
    }

    /// Archive name of the item's metadata document.
    pub fn metadata_file_name(&self, index: ItemIndex) -> String {
        format!("{}.json", self.file_stem(index))
    }

    pub(crate) fn validate(&self) -> ForgeResult<()> {
        if self.name_prefix.trim().is_empty() {
            return Err(ForgeError::validation("collection name_prefix must be non-empty"));
        }
        if self.file_prefix.trim().is_empty() {
            return Err(ForgeError::validation("collection file_prefix must be non-empty"));
        }
        if self.file_prefix.contains(['/', '\\']) {
            return Err(ForgeError::validation(format!(
                "collection file_prefix must not contain path separators, got '{}'",
                self.file_prefix
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Parameters for one generation run.
pub struct GenerationConfig {
    /// Number of items; indices run `0..count`.
    pub count: u32,
    /// Chance that an item attempts full-set resolution.
    pub full_set_probability: Probability,
    /// Chance that an item's weapon is rendered shiny (when a variant exists).
    pub shiny_probability: Probability,
    /// Random seed; a fresh one is drawn and logged when absent.
    pub seed: Option<u64>,
    /// Number of leading items written as previews.
    pub preview_count: usize,
    /// Naming and metadata identity.
    pub collection: CollectionInfo,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            count: 10,
            full_set_probability: Probability::new_unchecked(0.05),
            shiny_probability: Probability::new_unchecked(0.069),
            seed: None,
            preview_count: DEFAULT_PREVIEW_COUNT,
            collection: CollectionInfo::default(),
        }
    }
}

impl GenerationConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> ForgeResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|err| {
            ForgeError::serde(format!("parse config '{}': {err}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check count bounds and collection naming.
    pub fn validate(&self) -> ForgeResult<()> {
        if self.count > MAX_ITEM_COUNT {
            return Err(ForgeError::validation(format!(
                "count must be at most {MAX_ITEM_COUNT}, got {}",
                self.count
            )));
        }
        self.collection.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/config.rs"]
mod tests;
