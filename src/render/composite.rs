use crate::{
    assets::decode::LayerImage,
    assets::registry::AssetRegistry,
    foundation::core::TraitCategory,
    generate::select::TraitSelection,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which asset a stacked layer came from.
pub enum LayerSlot {
    /// Weapon, beneath the body; `shiny` when the variant was substituted.
    Weapon {
        /// Shiny variant drawn instead of the base weapon.
        shiny: bool,
    },
    /// The fixed body layer.
    Body,
    /// A trait drawn above the body.
    Trait(TraitCategory),
}

#[derive(Clone, Copy, Debug)]
/// One layer to paste onto the background, bottom to top.
pub struct StackedLayer<'a> {
    /// Origin of the layer.
    pub slot: LayerSlot,
    /// Pixels to paste.
    pub image: &'a LayerImage,
}

/// Layers pasted over the background for `selection`, bottom to top.
///
/// Order: weapon, body, helmet, eyes, boots, clothing, gloves. Keys that do not
/// resolve in the registry are left out.
pub fn layer_stack<'a>(
    registry: &'a AssetRegistry,
    selection: &TraitSelection,
) -> Vec<StackedLayer<'a>> {
    let mut stack = Vec::with_capacity(2 + TraitCategory::OVERLAY_ORDER.len());

    if let Some(key) = selection.key(TraitCategory::Weapon)
        && let Some(base) = registry.layer(TraitCategory::Weapon, key)
    {
        let shiny = selection
            .is_shiny
            .then(|| registry.shiny_weapon(key))
            .flatten();
        stack.push(StackedLayer {
            slot: LayerSlot::Weapon {
                shiny: shiny.is_some(),
            },
            image: shiny.unwrap_or(base),
        });
    }

    stack.push(StackedLayer {
        slot: LayerSlot::Body,
        image: registry.body(),
    });

    for category in TraitCategory::OVERLAY_ORDER {
        let Some(image) = selection
            .key(category)
            .and_then(|key| registry.layer(category, key))
        else {
            tracing::debug!(%category, "selected layer not in registry; skipped");
            continue;
        };
        stack.push(StackedLayer {
            slot: LayerSlot::Trait(category),
            image,
        });
    }

    stack
}

/// Flatten `selection` onto a copy of the registry background.
pub fn composite(registry: &AssetRegistry, selection: &TraitSelection) -> LayerImage {
    let mut canvas = registry.background().clone();
    for layer in layer_stack(registry, selection) {
        paste_masked(&mut canvas, layer.image);
    }
    canvas
}

/// Paste `src` at the origin using its own alpha as the mask.
///
/// Every channel, alpha included, becomes `src * m + dst * (1 - m)` with
/// `m = src_alpha / 255`. Pixels outside the overlap of both images are untouched.
pub fn paste_masked(dst: &mut LayerImage, src: &LayerImage) {
    let width = dst.width().min(src.width());
    let height = dst.height().min(src.height());

    for y in 0..height {
        for x in 0..width {
            let s = src.get_pixel(x, y).0;
            let mask = s[3];
            if mask == 0 {
                continue;
            }
            let d = &mut dst.get_pixel_mut(x, y).0;
            if mask == 255 {
                *d = s;
                continue;
            }
            for (dc, sc) in d.iter_mut().zip(s) {
                *dc = blend_channel(sc, *dc, mask);
            }
        }
    }
}

fn blend_channel(src: u8, dst: u8, mask: u8) -> u8 {
    let m = u32::from(mask);
    ((u32::from(src) * m + u32::from(dst) * (255 - m) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
