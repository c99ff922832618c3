use std::collections::{BTreeMap, BTreeSet};

use crate::{
    assets::decode::{LayerImage, decode_image},
    assets::uploads::{AssetUploads, UploadedFile},
    foundation::core::{TraitCategory, set_name},
    foundation::error::{ForgeError, ForgeResult},
};

/// Layer key (uploaded file name) to decoded image.
pub type LayerMap = BTreeMap<String, LayerImage>;

const SHINY_SLOT: &str = "shiny_weapon";

#[derive(Clone, Debug, PartialEq, Eq)]
/// A multi-file upload that failed to decode and was left out of its category.
pub struct RejectedAsset {
    /// Slot the file was uploaded to (`"boots"`, `"shiny_weapon"`, ...).
    pub slot: String,
    /// Uploaded file name.
    pub file: String,
    /// Decoder message.
    pub reason: String,
}

/// Result of [`AssetRegistry::build`]: the registry plus every excluded file.
#[derive(Debug)]
pub struct RegistryBuild {
    /// Ready-to-use registry.
    pub registry: AssetRegistry,
    /// Files that failed to decode and were skipped.
    pub rejected: Vec<RejectedAsset>,
}

/// Immutable, decoded layer images for one generation run.
///
/// Invariants: background and body are present and every trait category holds at
/// least one layer. Maps are ordered by key so seeded selection is reproducible.
#[derive(Clone, Debug)]
pub struct AssetRegistry {
    background: LayerImage,
    body: LayerImage,
    traits: BTreeMap<TraitCategory, LayerMap>,
    shiny_weapon: LayerMap,
    available_sets: BTreeSet<String>,
}

impl AssetRegistry {
    /// Decode `uploads` into a registry.
    ///
    /// Missing slots are reported together before anything is decoded. A background
    /// or body that fails to decode aborts the build; a failing trait or shiny file is
    /// recorded in [`RegistryBuild::rejected`] and skipped, unless that leaves its
    /// category empty.
    #[tracing::instrument(skip(uploads))]
    pub fn build(uploads: &AssetUploads) -> ForgeResult<RegistryBuild> {
        let mut missing = Vec::new();
        if uploads.background.is_none() {
            missing.push("background".to_string());
        }
        if uploads.body.is_none() {
            missing.push("body".to_string());
        }
        for category in TraitCategory::ALL {
            if uploads.trait_files(category).is_empty() {
                missing.push(category.as_str().to_string());
            }
        }
        let (Some(background), Some(body)) = (&uploads.background, &uploads.body) else {
            return Err(ForgeError::MissingAssets(missing));
        };
        if !missing.is_empty() {
            return Err(ForgeError::MissingAssets(missing));
        }

        let background = decode_required("background", background)?;
        let body = decode_required("body", body)?;

        let mut rejected = Vec::new();
        let mut traits = BTreeMap::new();
        for category in TraitCategory::ALL {
            let layers = decode_many(
                category.as_str(),
                uploads.trait_files(category),
                &mut rejected,
            );
            traits.insert(category, layers);
        }
        let shiny_weapon = decode_many(SHINY_SLOT, &uploads.shiny_weapon, &mut rejected);

        let registry = Self::from_layers(background, body, traits, shiny_weapon).map_err(
            |err| match err {
                ForgeError::MissingAssets(slots) => ForgeError::MissingAssets(
                    slots
                        .into_iter()
                        .map(|s| format!("{s} (no decodable files)"))
                        .collect(),
                ),
                other => other,
            },
        )?;

        tracing::info!(
            layers = registry.traits.values().map(LayerMap::len).sum::<usize>(),
            shiny = registry.shiny_weapon.len(),
            sets = registry.available_sets.len(),
            rejected = rejected.len(),
            "asset registry built"
        );
        Ok(RegistryBuild { registry, rejected })
    }

    /// Assemble a registry from already decoded layers.
    ///
    /// Fails with [`ForgeError::MissingAssets`] when a trait category is absent or empty.
    pub fn from_layers(
        background: LayerImage,
        body: LayerImage,
        traits: BTreeMap<TraitCategory, LayerMap>,
        shiny_weapon: LayerMap,
    ) -> ForgeResult<Self> {
        let missing: Vec<String> = TraitCategory::ALL
            .into_iter()
            .filter(|c| traits.get(c).is_none_or(BTreeMap::is_empty))
            .map(|c| c.as_str().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ForgeError::MissingAssets(missing));
        }

        let canvas = background.dimensions();
        let mismatched = std::iter::once(&body)
            .chain(traits.values().flat_map(LayerMap::values))
            .chain(shiny_weapon.values())
            .filter(|img| img.dimensions() != canvas)
            .count();
        if mismatched > 0 {
            tracing::warn!(
                mismatched,
                width = canvas.0,
                height = canvas.1,
                "layers differ in size from the background; they are pasted at the origin"
            );
        }

        let available_sets = intersect_set_names(&traits);
        Ok(Self {
            background,
            body,
            traits,
            shiny_weapon,
            available_sets,
        })
    }

    /// Background layer; also the canvas.
    pub fn background(&self) -> &LayerImage {
        &self.background
    }

    /// Body layer.
    pub fn body(&self) -> &LayerImage {
        &self.body
    }

    /// Canvas `(width, height)`, i.e. the background dimensions.
    pub fn canvas_size(&self) -> (u32, u32) {
        self.background.dimensions()
    }

    /// All layers of `category`. Never empty.
    pub fn layers(&self, category: TraitCategory) -> &LayerMap {
        // `from_layers` guarantees every category is present.
        &self.traits[&category]
    }

    /// Layer `key` of `category`, if present.
    pub fn layer(&self, category: TraitCategory, key: &str) -> Option<&LayerImage> {
        self.traits.get(&category).and_then(|layers| layers.get(key))
    }

    /// Shiny weapon variants keyed like their base weapon.
    pub fn shiny_weapons(&self) -> &LayerMap {
        &self.shiny_weapon
    }

    /// Shiny variant of weapon `key`, if one was uploaded.
    pub fn shiny_weapon(&self, key: &str) -> Option<&LayerImage> {
        self.shiny_weapon.get(key)
    }

    /// Set names that have at least one layer in every trait category.
    pub fn available_sets(&self) -> &BTreeSet<String> {
        &self.available_sets
    }
}

fn decode_required(slot: &str, file: &UploadedFile) -> ForgeResult<LayerImage> {
    decode_image(&file.bytes).map_err(|err| {
        ForgeError::asset(format!("failed to decode {slot} '{}': {err}", file.name))
    })
}

fn decode_many(slot: &str, files: &[UploadedFile], rejected: &mut Vec<RejectedAsset>) -> LayerMap {
    let mut layers = LayerMap::new();
    for file in files {
        match decode_image(&file.bytes) {
            Ok(img) => {
                if layers.insert(file.name.clone(), img).is_some() {
                    tracing::warn!(slot, file = %file.name, "duplicate layer name; keeping the later upload");
                }
            }
            Err(err) => {
                tracing::warn!(slot, file = %file.name, error = %err, "skipping undecodable layer");
                rejected.push(RejectedAsset {
                    slot: slot.to_string(),
                    file: file.name.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }
    layers
}

fn intersect_set_names(traits: &BTreeMap<TraitCategory, LayerMap>) -> BTreeSet<String> {
    let mut available: Option<BTreeSet<String>> = None;
    for category in TraitCategory::ALL {
        let names: BTreeSet<String> = traits
            .get(&category)
            .into_iter()
            .flat_map(|layers| layers.keys())
            .filter_map(|key| set_name(key))
            .collect();
        available = Some(match available {
            None => names,
            Some(acc) => acc.intersection(&names).cloned().collect(),
        });
    }
    available.unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/registry.rs"]
mod tests;
