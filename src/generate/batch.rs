use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{
    assets::decode::LayerImage,
    assets::registry::AssetRegistry,
    encode::png::encode_png,
    foundation::core::ItemIndex,
    foundation::error::{ForgeError, ForgeResult},
    generate::config::GenerationConfig,
    generate::metadata::{Metadata, build_metadata},
    generate::select::{TraitSelection, select_traits},
    render::composite::composite,
};

#[derive(Clone)]
/// One finished item: selection, pixels, encoded PNG and metadata.
pub struct GeneratedItem {
    /// Zero-based position in the batch.
    pub index: ItemIndex,
    /// Selected traits and flags.
    pub selection: TraitSelection,
    /// Flattened composite.
    pub image: LayerImage,
    /// `image` encoded as PNG.
    pub png: Vec<u8>,
    /// Metadata record.
    pub metadata: Metadata,
    /// `metadata` serialized with 4-space indentation.
    pub metadata_json: String,
}

impl std::fmt::Debug for GeneratedItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedItem")
            .field("index", &self.index)
            .field("selection", &self.selection)
            .field("dimensions", &self.image.dimensions())
            .field("png_len", &self.png.len())
            .finish()
    }
}

#[derive(Clone, Debug)]
/// All items of one run, in index order.
pub struct GeneratedBatch {
    items: Vec<GeneratedItem>,
    seed: Option<u64>,
}

impl GeneratedBatch {
    /// Wrap already generated items.
    pub fn new(items: Vec<GeneratedItem>, seed: Option<u64>) -> Self {
        Self { items, seed }
    }

    /// Items in index order.
    pub fn items(&self) -> &[GeneratedItem] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` for a zero-item batch.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Seed that produced the batch, when it was seeded internally.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// First `min(n, len)` items.
    pub fn preview(&self, n: usize) -> &[GeneratedItem] {
        &self.items[..n.min(self.items.len())]
    }

    /// Items resolved as full sets.
    pub fn rare_count(&self) -> usize {
        self.items.iter().filter(|i| i.selection.is_full_set).count()
    }

    /// Items with a shiny weapon.
    pub fn shiny_count(&self) -> usize {
        self.items.iter().filter(|i| i.selection.is_shiny).count()
    }
}

/// Produce item `index`: select, composite, encode, describe.
///
/// Every failure is reported as [`ForgeError::Generation`] carrying `index`.
pub fn generate_item<R: Rng + ?Sized>(
    index: ItemIndex,
    registry: &AssetRegistry,
    config: &GenerationConfig,
    rng: &mut R,
) -> ForgeResult<GeneratedItem> {
    let with_index = |err| at_item(index, err);

    config.collection.validate().map_err(with_index)?;
    let selection = select_traits(
        registry,
        config.full_set_probability,
        config.shiny_probability,
        rng,
    )
    .map_err(with_index)?;
    let image = composite(registry, &selection);
    let png = encode_png(&image).map_err(with_index)?;
    let metadata = build_metadata(index, &selection, &config.collection);
    let metadata_json = metadata.to_json_pretty().map_err(with_index)?;

    tracing::debug!(
        index = index.0,
        rarity = selection.rarity().as_str(),
        shiny = selection.is_shiny,
        "generated item"
    );
    Ok(GeneratedItem {
        index,
        selection,
        image,
        png,
        metadata,
        metadata_json,
    })
}

fn at_item(index: ItemIndex, err: ForgeError) -> ForgeError {
    match err {
        e @ ForgeError::Generation { .. } => e,
        other => ForgeError::generation(index.0, other.to_string()),
    }
}

/// Generate `config.count` items with a `StdRng` seeded from `config.seed`.
///
/// Without a configured seed a fresh one is drawn; it is logged and kept on the
/// batch so the run can be reproduced.
#[tracing::instrument(skip(registry, config), fields(count = config.count))]
pub fn generate_batch(
    registry: &AssetRegistry,
    config: &GenerationConfig,
) -> ForgeResult<GeneratedBatch> {
    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "seeding generator");
    let mut rng = StdRng::seed_from_u64(seed);
    let items = generate_batch_with_rng(registry, config, &mut rng)?;
    Ok(GeneratedBatch::new(items, Some(seed)))
}

/// Generate `config.count` items from an external random source.
///
/// Strictly sequential and fail-fast: the first failing item aborts the run and
/// the items produced so far are dropped.
pub fn generate_batch_with_rng<R: Rng + ?Sized>(
    registry: &AssetRegistry,
    config: &GenerationConfig,
    rng: &mut R,
) -> ForgeResult<Vec<GeneratedItem>> {
    config.validate()?;

    let mut items = Vec::with_capacity(config.count as usize);
    for i in 0..config.count {
        items.push(generate_item(ItemIndex(i), registry, config, rng)?);
    }

    tracing::info!(
        items = items.len(),
        rare = items.iter().filter(|i| i.selection.is_full_set).count(),
        shiny = items.iter().filter(|i| i.selection.is_shiny).count(),
        "batch generated"
    );
    Ok(items)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/batch.rs"]
mod tests;
