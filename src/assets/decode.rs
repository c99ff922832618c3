use anyhow::Context;

use crate::foundation::error::ForgeResult;

/// Straight-alpha RGBA8 layer image.
pub type LayerImage = image::RgbaImage;

/// Decode encoded image bytes and convert to straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> ForgeResult<LayerImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
