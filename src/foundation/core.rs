use std::fmt;

use crate::foundation::error::{ForgeError, ForgeResult};

/// File extension appended to conventionally named set layers.
pub const LAYER_EXTENSION: &str = ".png";

/// Separator between a layer's set name and the rest of its key.
pub const SET_SEPARATOR: char = '_';

/// One of the six trait layer groups composited onto the body.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TraitCategory {
    /// Footwear layer.
    Boots,
    /// Body armor layer, displayed as "Armor".
    Clothing,
    /// Eyes layer.
    Eyes,
    /// Gloves layer.
    Gloves,
    /// Headgear layer.
    Helmet,
    /// Weapon layer, drawn beneath the body.
    Weapon,
}

impl TraitCategory {
    /// Every category in metadata/selection order.
    pub const ALL: [TraitCategory; 6] = [
        TraitCategory::Boots,
        TraitCategory::Clothing,
        TraitCategory::Eyes,
        TraitCategory::Gloves,
        TraitCategory::Helmet,
        TraitCategory::Weapon,
    ];

    /// Categories drawn above the body, bottom to top.
    pub const OVERLAY_ORDER: [TraitCategory; 5] = [
        TraitCategory::Helmet,
        TraitCategory::Eyes,
        TraitCategory::Boots,
        TraitCategory::Clothing,
        TraitCategory::Gloves,
    ];

    /// Lower-case identifier, also used as the asset subdirectory name.
    pub fn as_str(self) -> &'static str {
        match self {
            TraitCategory::Boots => "boots",
            TraitCategory::Clothing => "clothing",
            TraitCategory::Eyes => "eyes",
            TraitCategory::Gloves => "gloves",
            TraitCategory::Helmet => "helmet",
            TraitCategory::Weapon => "weapon",
        }
    }

    /// `trait_type` written to metadata.
    pub fn display_name(self) -> &'static str {
        match self {
            TraitCategory::Boots => "Boots",
            TraitCategory::Clothing => "Armor",
            TraitCategory::Eyes => "Eyes",
            TraitCategory::Gloves => "Gloves",
            TraitCategory::Helmet => "Helmet",
            TraitCategory::Weapon => "Weapon",
        }
    }

    /// Upper-case suffix used by `<SET>_<SUFFIX>.png` layer names.
    pub fn set_suffix(self) -> &'static str {
        match self {
            TraitCategory::Boots => "BOOTS",
            TraitCategory::Clothing => "ARMOR",
            TraitCategory::Eyes => "EYES",
            TraitCategory::Gloves => "GLOVES",
            TraitCategory::Helmet => "HELMET",
            TraitCategory::Weapon => "WEAPON",
        }
    }
}

impl fmt::Display for TraitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero-based position of an item within a batch.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ItemIndex(pub u32);

impl ItemIndex {
    /// Index zero-padded to width 4 (`7` -> `"0007"`).
    pub fn padded(self) -> String {
        format!("{:04}", self.0)
    }
}

impl fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Probability in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Probability(f64);

impl Probability {
    /// Never fires.
    pub const NEVER: Probability = Probability(0.0);
    /// Always fires.
    pub const ALWAYS: Probability = Probability(1.0);

    /// Validate `p`; NaN and values outside `0.0..=1.0` are rejected.
    pub fn new(p: f64) -> ForgeResult<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(ForgeError::validation(format!(
                "probability must be within 0.0..=1.0, got {p}"
            )));
        }
        Ok(Self(p))
    }

    /// Wrap a value already known to be in range.
    pub(crate) const fn new_unchecked(p: f64) -> Self {
        Self(p)
    }

    /// Raw value.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Probability {
    type Error = ForgeError;

    fn try_from(p: f64) -> ForgeResult<Self> {
        Self::new(p)
    }
}

impl From<Probability> for f64 {
    fn from(p: Probability) -> f64 {
        p.0
    }
}

/// Lower-cased prefix before the first [`SET_SEPARATOR`], if the key has one.
pub fn set_name(key: &str) -> Option<String> {
    key.split_once(SET_SEPARATOR)
        .map(|(prefix, _)| prefix.to_lowercase())
}

/// Split `key` into stem and final extension (including the dot).
///
/// A leading dot is not treated as an extension, so `".png"` has none.
pub fn split_extension(key: &str) -> (&str, Option<&str>) {
    match key.rfind('.') {
        Some(dot) if dot > 0 => (&key[..dot], Some(&key[dot..])),
        _ => (key, None),
    }
}

/// Key with its final extension removed.
pub fn strip_extension(key: &str) -> &str {
    split_extension(key).0
}

/// Conventional key of `set`'s layer in `category`, e.g. `DESERT_ARMOR.png`.
pub fn expected_set_key(set: &str, category: TraitCategory) -> String {
    format!(
        "{}{SET_SEPARATOR}{}{LAYER_EXTENSION}",
        set.to_uppercase(),
        category.set_suffix()
    )
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
