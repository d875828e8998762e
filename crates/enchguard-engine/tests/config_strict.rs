#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use enchguard_engine::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
limits:
  base_max_level: 10
  absolut_max_level: 100 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.reject_code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.limits.base_max_level, 10);
    assert_eq!(cfg.limits.absolute_max_level, 1000);
    assert!(cfg.tiers.enabled);
    assert!(!cfg.item_overrides.enabled);
    assert!(cfg.messages.enabled);
    assert_eq!(cfg.grant.catalyst_per_use, 3);
    assert_eq!(cfg.sweep.settle_delay_ms, 1000);
}

#[test]
fn default_ladder_is_strictly_descending() {
    let cfg = config::load_from_str("version: 1").expect("must parse");
    let levels: Vec<u32> = cfg.tiers.ladder.iter().map(|r| r.level).collect();
    assert_eq!(levels, vec![1000, 500, 255, 100, 50, 20, 10, 5, 1]);
    assert_eq!(cfg.tiers.ladder[0].capability, "enchguard.tier.1000");
}

#[test]
fn rejects_unsupported_version() {
    let err = config::load_from_str("version: 2").expect_err("must fail");
    assert_eq!(err.reject_code().as_str(), "BAD_CONFIG");
}

#[test]
fn rejects_base_above_absolute() {
    let bad = r#"
version: 1
limits:
  base_max_level: 2000
  absolute_max_level: 1000
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("base_max_level"));
}

#[test]
fn rejects_out_of_range_levels() {
    let bad = "version: 1\nlimits: { base_max_level: 0 }";
    config::load_from_str(bad).expect_err("zero base must fail");

    let bad = "version: 1\nlimits: { base_max_level: 10, absolute_max_level: 40000 }";
    config::load_from_str(bad).expect_err("oversized absolute must fail");
}

#[test]
fn rejects_unknown_enchant_keys() {
    let bad = "version: 1\ndisabled_enchants: [mending, sharpness_ultra]";
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("sharpness_ultra"));

    let bad = r#"
version: 1
item_overrides:
  enabled: true
  items:
    diamond_sword: { sharpnes: 50 }
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("sharpnes"));
}

#[test]
fn rejects_non_descending_ladder() {
    let bad = r#"
version: 1
tiers:
  enabled: true
  ladder:
    - { capability: "enchguard.tier.100", level: 100 }
    - { capability: "enchguard.tier.500", level: 500 }
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("descending"));
}

#[test]
fn rejects_invalid_grant_and_sweep_ranges() {
    config::load_from_str("version: 1\ngrant: { catalyst_per_use: 0 }")
        .expect_err("zero catalyst must fail");
    config::load_from_str("version: 1\nsweep: { settle_delay_ms: 120000 }")
        .expect_err("oversized settle delay must fail");
}
