//! Limit resolution vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use serde::Deserialize;

use enchguard_core::catalog::Enchant;
use enchguard_core::item::{ActorId, ItemKind};

mod support;
use support::fixture;

#[derive(Debug, Deserialize)]
struct ResolveVector {
    description: String,
    config: String,
    capabilities: Vec<String>,
    enchant: Option<String>,
    item_kind: Option<String>,
    expect: u32,
}

fn load(name: &str) -> ResolveVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

#[test]
fn resolve_vectors() {
    let files = [
        "base_only.json",
        "tier_raises.json",
        "item_override_tightens.json",
        "absolute_caps.json",
        "general_display_skips_item_stage.json",
        "override_zero_forbids.json",
        "tier_below_base_never_lowers.json",
        "override_cannot_loosen.json",
    ];

    for f in files {
        let v = load(f);
        let fx = fixture(&v.config);
        let actor = ActorId::new("vector-actor");
        for cap in &v.capabilities {
            fx.caps.grant(&actor, cap);
        }

        let enchant = v.enchant.as_deref().map(|k| Enchant::parse(k).unwrap());
        let item_kind = v.item_kind.as_deref().map(ItemKind::new);

        let got = fx
            .engine
            .resolve(&actor, enchant, item_kind.as_ref())
            .expect("resolve must succeed");
        assert_eq!(got, v.expect, "vector={}", v.description);
    }
}

#[test]
fn resolve_is_monotonic_in_tier() {
    let cfg = "version: 1\nlimits: { base_max_level: 10, absolute_max_level: 1000 }";
    let kind = ItemKind::new("diamond_sword");

    let fx = fixture(cfg);
    let actor = ActorId::new("climber");
    let before = fx
        .engine
        .resolve(&actor, Some(Enchant::Sharpness), Some(&kind))
        .unwrap();

    fx.caps.grant(&actor, "enchguard.tier.100");
    fx.engine.end_session(&actor); // drop the cached tier 0
    let after = fx
        .engine
        .resolve(&actor, Some(Enchant::Sharpness), Some(&kind))
        .unwrap();

    assert!(before <= after);
    assert_eq!(after, 100);
}

#[test]
fn resolve_never_exceeds_absolute_ceiling() {
    let cfg = "version: 1\nlimits: { base_max_level: 10, absolute_max_level: 30 }";
    let fx = fixture(cfg);
    let actor = ActorId::new("capped");
    fx.caps.grant(&actor, "enchguard.tier.1000");

    for enchant in [None, Some(Enchant::Sharpness)] {
        let kind = enchant.map(|_| ItemKind::new("diamond_sword"));
        let got = fx.engine.resolve(&actor, enchant, kind.as_ref()).unwrap();
        assert!(got <= 30);
    }
}

#[test]
fn first_ladder_match_wins() {
    let cfg = r#"
version: 1
limits: { base_max_level: 10, absolute_max_level: 1000 }
tiers:
  enabled: true
  ladder:
    - { capability: "enchguard.tier.500", level: 500 }
    - { capability: "enchguard.tier.100", level: 100 }
"#;
    let fx = fixture(cfg);
    let actor = ActorId::new("multi");
    fx.caps.grant(&actor, "enchguard.tier.500");
    fx.caps.grant(&actor, "enchguard.tier.100");

    assert_eq!(fx.engine.resolve(&actor, None, None).unwrap(), 500);
}

#[test]
fn tiers_disabled_ignores_capabilities() {
    let cfg = r#"
version: 1
limits: { base_max_level: 10, absolute_max_level: 1000 }
tiers: { enabled: false, ladder: [] }
"#;
    let fx = fixture(cfg);
    let actor = ActorId::new("no-tiers");
    fx.caps.grant(&actor, "enchguard.tier.1000");

    assert_eq!(fx.engine.resolve(&actor, None, None).unwrap(), 10);
}

#[test]
fn resolve_propagates_collaborator_fault() {
    let cfg = "version: 1";
    let fx = fixture(cfg);
    let actor = ActorId::new("unlucky");
    fx.caps.set_available(false);

    let err = fx.engine.resolve(&actor, None, None).expect_err("must fail");
    assert_eq!(err.reject_code().as_str(), "UNAVAILABLE");

    // Once the collaborator is back, resolution recovers (no poisoned cache).
    fx.caps.set_available(true);
    assert_eq!(fx.engine.resolve(&actor, None, None).unwrap(), 10);
}
