use super::*;

#[test]
fn item_index_pads_to_four_digits() {
    assert_eq!(ItemIndex(0).padded(), "0000");
    assert_eq!(ItemIndex(42).to_string(), "0042");
    assert_eq!(ItemIndex(12345).padded(), "12345");
}

#[test]
fn clothing_is_displayed_as_armor() {
    assert_eq!(TraitCategory::Clothing.display_name(), "Armor");
    assert_eq!(TraitCategory::Clothing.set_suffix(), "ARMOR");
    assert_eq!(TraitCategory::Clothing.as_str(), "clothing");
    assert_eq!(TraitCategory::Helmet.set_suffix(), "HELMET");
}

#[test]
fn category_serializes_as_snake_case() {
    let json = serde_json::to_string(&TraitCategory::Weapon).unwrap();
    assert_eq!(json, "\"weapon\"");
}

#[test]
fn probability_bounds() {
    assert!(Probability::new(0.0).is_ok());
    assert!(Probability::new(1.0).is_ok());
    assert!(Probability::new(-0.01).is_err());
    assert!(Probability::new(1.01).is_err());
    assert!(Probability::new(f64::NAN).is_err());
}

#[test]
fn probability_deserializes_from_number() {
    let p: Probability = serde_json::from_str("0.25").unwrap();
    assert_eq!(p.get(), 0.25);
    assert!(serde_json::from_str::<Probability>("2.0").is_err());
}

#[test]
fn set_name_is_lowercased_prefix_before_first_separator() {
    assert_eq!(set_name("DESERT_BOOTS.png").as_deref(), Some("desert"));
    assert_eq!(set_name("Ice_Age_HELMET.png").as_deref(), Some("ice"));
    assert_eq!(set_name("plainboots.png"), None);
}

#[test]
fn strip_then_reappend_extension_round_trips() {
    for key in ["DESERT_BOOTS.png", "a.b.png", "noext", ".png", "x."] {
        let (stem, ext) = split_extension(key);
        assert_eq!(format!("{stem}{}", ext.unwrap_or("")), key);
    }
    assert_eq!(strip_extension("DESERT_WEAPON.png"), "DESERT_WEAPON");
    assert_eq!(strip_extension("a.b.png"), "a.b");
}

#[test]
fn expected_set_key_uses_category_suffix() {
    assert_eq!(
        expected_set_key("desert", TraitCategory::Clothing),
        "DESERT_ARMOR.png"
    );
    assert_eq!(
        expected_set_key("desert", TraitCategory::Boots),
        "DESERT_BOOTS.png"
    );
}
