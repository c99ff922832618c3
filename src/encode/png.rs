use std::io::Cursor;

use anyhow::Context;

use crate::{assets::decode::LayerImage, foundation::error::ForgeResult};

/// Encode an RGBA8 image as PNG bytes.
pub fn encode_png(img: &LayerImage) -> ForgeResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}
