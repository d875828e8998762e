//! Catalog and item model tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeMap;

use enchguard_core::catalog::Enchant;
use enchguard_core::error::RejectCode;
use enchguard_core::item::{Item, ItemKind};

#[test]
fn catalog_parse_roundtrips_keys() {
    for &enchant in Enchant::all() {
        assert_eq!(Enchant::parse(enchant.key()).unwrap(), enchant);
        assert!(enchant.vanilla_max() >= 1);
    }
}

#[test]
fn catalog_parse_is_case_insensitive() {
    assert_eq!(Enchant::parse("SHARPNESS").unwrap(), Enchant::Sharpness);
    assert_eq!(Enchant::parse("Fire_Aspect").unwrap(), Enchant::FireAspect);
}

#[test]
fn catalog_rejects_unknown_keys() {
    let err = Enchant::parse("super_sharpness").unwrap_err();
    assert_eq!(err.reject_code(), RejectCode::UnknownEnchant);
}

#[test]
fn enchant_serde_uses_snake_case_keys() {
    let json = serde_json::to_string(&Enchant::BaneOfArthropods).unwrap();
    assert_eq!(json, "\"bane_of_arthropods\"");
    let back: Enchant = serde_json::from_str("\"quick_charge\"").unwrap();
    assert_eq!(back, Enchant::QuickCharge);
}

#[test]
fn storage_kind_gets_stored_representation() {
    let book = Item::new(ItemKind::enchanted_book());
    assert!(book.is_stored());
    assert!(book.kind().is_storage());

    let sword = Item::new(ItemKind::new("diamond_sword"));
    assert!(!sword.is_stored());
    assert!(!sword.kind().is_storage());

    let plain = Item::new(ItemKind::book());
    assert!(plain.kind().is_plain_book());
    assert!(!plain.is_stored());
}

#[test]
fn both_representations_share_one_mutation_surface() {
    for kind in [ItemKind::enchanted_book(), ItemKind::new("diamond_pickaxe")] {
        let mut item = Item::new(kind);
        assert!(!item.has_bindings());

        item.set_binding(Enchant::Efficiency, 5);
        item.set_binding(Enchant::Unbreaking, 3);
        assert_eq!(item.level(Enchant::Efficiency), Some(5));
        assert_eq!(item.bindings().len(), 2);

        assert!(item.remove_binding(Enchant::Efficiency));
        assert!(!item.remove_binding(Enchant::Efficiency));
        assert_eq!(item.level(Enchant::Efficiency), None);

        item.clear_bindings();
        assert!(!item.has_bindings());
    }
}

#[test]
fn with_bindings_drops_level_zero_entries() {
    let mut proposed = BTreeMap::new();
    proposed.insert(Enchant::Sharpness, 5);
    proposed.insert(Enchant::Looting, 0);

    let item = Item::with_bindings(ItemKind::new("iron_sword"), proposed);
    assert_eq!(item.level(Enchant::Sharpness), Some(5));
    assert_eq!(item.level(Enchant::Looting), None);
    assert_eq!(item.bindings().len(), 1);
}

#[test]
fn storage_with_builds_enchanted_book() {
    let mut stored = BTreeMap::new();
    stored.insert(Enchant::Mending, 1);

    let book = Item::storage_with(stored);
    assert!(book.is_stored());
    assert_eq!(book.kind().as_str(), ItemKind::ENCHANTED_BOOK);
    assert_eq!(book.level(Enchant::Mending), Some(1));
}
