//! nftforge assembles batches of layered generative-art images.
//!
//! A run turns a set of uploaded layer images into composite PNGs, a metadata
//! document per image, and a zip archive bundling both.
//!
//! # Pipeline overview
//!
//! 1. **Register**: `AssetUploads -> AssetRegistry` (decode, index by file name, find shared sets)
//! 2. **Select**: `AssetRegistry + Rng -> TraitSelection` (full-set and shiny rules)
//! 3. **Composite**: `TraitSelection -> RgbaImage` (weapon, body, then five overlays)
//! 4. **Describe**: `TraitSelection -> Metadata` (rarity, traits, shiny, full set)
//! 5. **Package**: `GeneratedBatch -> ItemSink` (zip archive, directory, memory)
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-seed**: randomness is injected; a seeded run is reproducible
//!   down to the PNG bytes.
//! - **Fail fast**: a missing asset stops the run before decoding, and a failing item
//!   discards the whole batch so no partial archive is ever written.
//! - **Straight RGBA8** end-to-end, matching the uploaded PNGs.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod encode;
mod foundation;
mod generate;
mod render;

pub use assets::decode::{LayerImage, decode_image};
pub use assets::registry::{AssetRegistry, LayerMap, RegistryBuild, RejectedAsset};
pub use assets::uploads::{
    AssetUploads, BACKGROUND_FILE, BODY_FILE, SHINY_WEAPON_DIR, UploadedFile,
};
pub use encode::archive::{ZipSink, archive_to_bytes};
pub use encode::png::encode_png;
pub use encode::sink::{
    DirSink, InMemorySink, ItemSink, ensure_parent_dir, write_batch, write_previews,
};
pub use foundation::core::{
    ItemIndex, LAYER_EXTENSION, Probability, SET_SEPARATOR, TraitCategory, expected_set_key,
    set_name, split_extension, strip_extension,
};
pub use foundation::error::{ForgeError, ForgeResult};
pub use generate::batch::{
    GeneratedBatch, GeneratedItem, generate_batch, generate_batch_with_rng, generate_item,
};
pub use generate::config::{
    CollectionInfo, DEFAULT_PREVIEW_COUNT, GenerationConfig, MAX_ITEM_COUNT,
};
pub use generate::metadata::{
    ATTRIBUTE_COUNT, Attribute, AttributeValue, DisplayType, Metadata, build_metadata,
};
pub use generate::select::{Rarity, TraitSelection, select_traits};
pub use render::composite::{LayerSlot, StackedLayer, composite, layer_stack, paste_masked};
