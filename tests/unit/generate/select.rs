use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

fn layer() -> image::RgbaImage {
    image::RgbaImage::new(1, 1)
}

fn registry_with(keys: impl Fn(TraitCategory) -> Vec<String>, shiny: &[&str]) -> AssetRegistry {
    let traits = TraitCategory::ALL
        .into_iter()
        .map(|c| {
            let layers: LayerMap = keys(c).into_iter().map(|k| (k, layer())).collect();
            (c, layers)
        })
        .collect();
    let shiny = shiny.iter().map(|k| (k.to_string(), layer())).collect();
    AssetRegistry::from_layers(layer(), layer(), traits, shiny).unwrap()
}

fn desert_registry(shiny: &[&str]) -> AssetRegistry {
    registry_with(
        |c| {
            vec![
                format!("DESERT_{}.png", c.set_suffix()),
                format!("{}1.png", c.as_str()),
                format!("{}2.png", c.as_str()),
            ]
        },
        shiny,
    )
}

#[test]
fn every_category_gets_an_existing_key() {
    let registry = desert_registry(&[]);
    let half = Probability::new(0.5).unwrap();
    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let sel = select_traits(&registry, half, half, &mut rng).unwrap();
        assert_eq!(sel.traits.len(), 6);
        for category in TraitCategory::ALL {
            let key = sel.key(category).unwrap();
            assert!(registry.layer(category, key).is_some(), "{category}: {key}");
        }
    }
}

#[test]
fn forced_full_set_picks_the_desert_layers() {
    let registry = desert_registry(&[]);
    assert_eq!(
        registry.available_sets().iter().collect::<Vec<_>>(),
        ["desert"]
    );

    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let sel = select_traits(&registry, Probability::ALWAYS, Probability::NEVER, &mut rng)
            .unwrap();
        assert!(sel.is_full_set);
        assert_eq!(sel.rarity(), Rarity::Rare);
        assert_eq!(sel.set_name.as_deref(), Some("desert"));
        assert_eq!(sel.key(TraitCategory::Boots), Some("DESERT_BOOTS.png"));
        assert_eq!(sel.key(TraitCategory::Clothing), Some("DESERT_ARMOR.png"));
        assert_eq!(sel.key(TraitCategory::Eyes), Some("DESERT_EYES.png"));
        assert_eq!(sel.key(TraitCategory::Gloves), Some("DESERT_GLOVES.png"));
        assert_eq!(sel.key(TraitCategory::Helmet), Some("DESERT_HELMET.png"));
        assert_eq!(sel.key(TraitCategory::Weapon), Some("DESERT_WEAPON.png"));
    }
}

#[test]
fn no_separator_means_every_item_is_common() {
    let registry = registry_with(|c| vec![format!("{}a.png", c.as_str())], &[]);
    assert!(registry.available_sets().is_empty());

    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let sel = select_traits(&registry, Probability::ALWAYS, Probability::NEVER, &mut rng)
            .unwrap();
        assert!(!sel.is_full_set);
        assert!(sel.set_name.is_none());
        assert_eq!(sel.rarity(), Rarity::Common);
    }
}

#[test]
fn missing_conventional_key_falls_back_but_stays_full_set() {
    // Clothing carries the set name but not the `_ARMOR` suffix.
    let registry = registry_with(
        |c| match c {
            TraitCategory::Clothing => vec!["DESERT_CLOTHING.png".to_string()],
            _ => vec![format!("DESERT_{}.png", c.set_suffix())],
        },
        &[],
    );

    let mut rng = StdRng::seed_from_u64(3);
    let sel =
        select_traits(&registry, Probability::ALWAYS, Probability::NEVER, &mut rng).unwrap();
    assert!(sel.is_full_set);
    assert_eq!(sel.key(TraitCategory::Clothing), Some("DESERT_CLOTHING.png"));
    assert_eq!(sel.key(TraitCategory::Helmet), Some("DESERT_HELMET.png"));
}

#[test]
fn never_full_set_is_always_common() {
    let registry = desert_registry(&[]);
    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let sel = select_traits(&registry, Probability::NEVER, Probability::NEVER, &mut rng)
            .unwrap();
        assert_eq!(sel.rarity(), Rarity::Common);
    }
}

#[test]
fn shiny_requires_a_variant_for_the_selected_weapon() {
    let registry = desert_registry(&["DESERT_WEAPON.png"]);
    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let sel = select_traits(
            &registry,
            Probability::new(0.5).unwrap(),
            Probability::ALWAYS,
            &mut rng,
        )
        .unwrap();
        let weapon = sel.key(TraitCategory::Weapon).unwrap();
        assert_eq!(sel.is_shiny, weapon == "DESERT_WEAPON.png");
    }
}

#[test]
fn shiny_keeps_the_weapon_key() {
    let registry = desert_registry(&["DESERT_WEAPON.png"]);
    let mut rng = StdRng::seed_from_u64(11);
    let sel =
        select_traits(&registry, Probability::ALWAYS, Probability::ALWAYS, &mut rng).unwrap();
    assert!(sel.is_shiny);
    assert_eq!(sel.key(TraitCategory::Weapon), Some("DESERT_WEAPON.png"));
}

#[test]
fn never_shiny_even_with_variants() {
    let registry = desert_registry(&["DESERT_WEAPON.png", "weapon1.png", "weapon2.png"]);
    let mut rng = StdRng::seed_from_u64(5);
    let sel =
        select_traits(&registry, Probability::ALWAYS, Probability::NEVER, &mut rng).unwrap();
    assert!(!sel.is_shiny);
}

#[test]
fn same_seed_same_selection() {
    let registry = desert_registry(&["weapon1.png"]);
    let half = Probability::new(0.5).unwrap();
    let a = select_traits(&registry, half, half, &mut StdRng::seed_from_u64(99)).unwrap();
    let b = select_traits(&registry, half, half, &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rarity_strings() {
    assert_eq!(Rarity::Rare.as_str(), "rare");
    assert_eq!(Rarity::Common.as_str(), "common");
}
