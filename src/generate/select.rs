use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::IteratorRandom;

use crate::{
    assets::registry::{AssetRegistry, LayerMap},
    foundation::core::{Probability, TraitCategory, expected_set_key},
    foundation::error::{ForgeError, ForgeResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Rarity tag written to metadata.
pub enum Rarity {
    /// Independently rolled traits.
    Common,
    /// Full matching set.
    Rare,
}

impl Rarity {
    /// Metadata value (`"common"` / `"rare"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Outcome of [`select_traits`] for one item.
pub struct TraitSelection {
    /// Chosen layer key per category; always holds all six categories.
    pub traits: BTreeMap<TraitCategory, String>,
    /// Set name the item was resolved from, when full-set resolution ran.
    pub set_name: Option<String>,
    /// Whether full-set resolution ran.
    pub is_full_set: bool,
    /// Whether the weapon is drawn with its shiny variant.
    pub is_shiny: bool,
}

impl TraitSelection {
    /// Selected key for `category`.
    pub fn key(&self, category: TraitCategory) -> Option<&str> {
        self.traits.get(&category).map(String::as_str)
    }

    /// `Rare` for full sets, `Common` otherwise.
    pub fn rarity(&self) -> Rarity {
        if self.is_full_set {
            Rarity::Rare
        } else {
            Rarity::Common
        }
    }
}

/// Pick one layer per trait category.
///
/// Draw order: full-set roll, set name (when rolled and the registry has shared
/// sets), one pick per category in [`TraitCategory::ALL`] order, shiny roll. A
/// successful full-set roll with no shared sets degrades to independent picks and
/// the item stays common. Inside a full set, a category lacking the conventional
/// `<SET>_<SUFFIX>.png` layer gets a random layer instead.
pub fn select_traits<R: Rng + ?Sized>(
    registry: &AssetRegistry,
    full_set_probability: Probability,
    shiny_probability: Probability,
    rng: &mut R,
) -> ForgeResult<TraitSelection> {
    let set_name = if rng.gen_bool(full_set_probability.get()) {
        registry.available_sets().iter().choose(rng).cloned()
    } else {
        None
    };

    let mut traits = BTreeMap::new();
    for category in TraitCategory::ALL {
        let layers = registry.layers(category);
        let key = match &set_name {
            Some(set) => {
                let expected = expected_set_key(set, category);
                if layers.contains_key(&expected) {
                    expected
                } else {
                    tracing::debug!(%category, %expected, "set layer missing; picking at random");
                    random_key(category, layers, rng)?
                }
            }
            None => random_key(category, layers, rng)?,
        };
        traits.insert(category, key);
    }

    let shiny_roll = rng.gen_bool(shiny_probability.get());
    let is_shiny = shiny_roll
        && traits
            .get(&TraitCategory::Weapon)
            .is_some_and(|key| registry.shiny_weapon(key).is_some());

    Ok(TraitSelection {
        traits,
        is_full_set: set_name.is_some(),
        set_name,
        is_shiny,
    })
}

fn random_key<R: Rng + ?Sized>(
    category: TraitCategory,
    layers: &LayerMap,
    rng: &mut R,
) -> ForgeResult<String> {
    layers
        .keys()
        .choose(rng)
        .cloned()
        .ok_or_else(|| ForgeError::validation(format!("no layers available for {category}")))
}

#[cfg(test)]
#[path = "../../tests/unit/generate/select.rs"]
mod tests;
