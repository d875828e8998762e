//! The enchant catalog: the finite vocabulary of enchant kinds.
//!
//! Each enchant has a stable snake_case key (the form used in config files
//! and host-facing messages) and a *vanilla max* level. The vanilla max is
//! informational only — display code shows it next to the resolved limit —
//! and is never used as an enforced ceiling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EnchGuardError, Result};

/// One enchant kind from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Enchant {
    Protection,
    FireProtection,
    FeatherFalling,
    BlastProtection,
    ProjectileProtection,
    Respiration,
    AquaAffinity,
    Thorns,
    DepthStrider,
    FrostWalker,
    Sharpness,
    Smite,
    BaneOfArthropods,
    Knockback,
    FireAspect,
    Looting,
    Sweeping,
    Efficiency,
    SilkTouch,
    Unbreaking,
    Fortune,
    Power,
    Punch,
    Flame,
    Infinity,
    Mending,
    Channeling,
    Riptide,
    Loyalty,
    Impaling,
    Multishot,
    Piercing,
    QuickCharge,
}

/// Every catalog entry, in display order.
const CATALOG: [Enchant; 33] = [
    Enchant::Protection,
    Enchant::FireProtection,
    Enchant::FeatherFalling,
    Enchant::BlastProtection,
    Enchant::ProjectileProtection,
    Enchant::Respiration,
    Enchant::AquaAffinity,
    Enchant::Thorns,
    Enchant::DepthStrider,
    Enchant::FrostWalker,
    Enchant::Sharpness,
    Enchant::Smite,
    Enchant::BaneOfArthropods,
    Enchant::Knockback,
    Enchant::FireAspect,
    Enchant::Looting,
    Enchant::Sweeping,
    Enchant::Efficiency,
    Enchant::SilkTouch,
    Enchant::Unbreaking,
    Enchant::Fortune,
    Enchant::Power,
    Enchant::Punch,
    Enchant::Flame,
    Enchant::Infinity,
    Enchant::Mending,
    Enchant::Channeling,
    Enchant::Riptide,
    Enchant::Loyalty,
    Enchant::Impaling,
    Enchant::Multishot,
    Enchant::Piercing,
    Enchant::QuickCharge,
];

impl Enchant {
    /// Stable snake_case key (config / message form).
    pub const fn key(self) -> &'static str {
        match self {
            Enchant::Protection => "protection",
            Enchant::FireProtection => "fire_protection",
            Enchant::FeatherFalling => "feather_falling",
            Enchant::BlastProtection => "blast_protection",
            Enchant::ProjectileProtection => "projectile_protection",
            Enchant::Respiration => "respiration",
            Enchant::AquaAffinity => "aqua_affinity",
            Enchant::Thorns => "thorns",
            Enchant::DepthStrider => "depth_strider",
            Enchant::FrostWalker => "frost_walker",
            Enchant::Sharpness => "sharpness",
            Enchant::Smite => "smite",
            Enchant::BaneOfArthropods => "bane_of_arthropods",
            Enchant::Knockback => "knockback",
            Enchant::FireAspect => "fire_aspect",
            Enchant::Looting => "looting",
            Enchant::Sweeping => "sweeping",
            Enchant::Efficiency => "efficiency",
            Enchant::SilkTouch => "silk_touch",
            Enchant::Unbreaking => "unbreaking",
            Enchant::Fortune => "fortune",
            Enchant::Power => "power",
            Enchant::Punch => "punch",
            Enchant::Flame => "flame",
            Enchant::Infinity => "infinity",
            Enchant::Mending => "mending",
            Enchant::Channeling => "channeling",
            Enchant::Riptide => "riptide",
            Enchant::Loyalty => "loyalty",
            Enchant::Impaling => "impaling",
            Enchant::Multishot => "multishot",
            Enchant::Piercing => "piercing",
            Enchant::QuickCharge => "quick_charge",
        }
    }

    /// Intrinsic maximum level in the unmodified game. Display only.
    pub const fn vanilla_max(self) -> u32 {
        match self {
            Enchant::Protection => 4,
            Enchant::FireProtection => 4,
            Enchant::FeatherFalling => 4,
            Enchant::BlastProtection => 4,
            Enchant::ProjectileProtection => 4,
            Enchant::Respiration => 3,
            Enchant::AquaAffinity => 1,
            Enchant::Thorns => 3,
            Enchant::DepthStrider => 3,
            Enchant::FrostWalker => 2,
            Enchant::Sharpness => 5,
            Enchant::Smite => 5,
            Enchant::BaneOfArthropods => 5,
            Enchant::Knockback => 2,
            Enchant::FireAspect => 2,
            Enchant::Looting => 3,
            Enchant::Sweeping => 3,
            Enchant::Efficiency => 5,
            Enchant::SilkTouch => 1,
            Enchant::Unbreaking => 3,
            Enchant::Fortune => 3,
            Enchant::Power => 5,
            Enchant::Punch => 2,
            Enchant::Flame => 1,
            Enchant::Infinity => 1,
            Enchant::Mending => 1,
            Enchant::Channeling => 1,
            Enchant::Riptide => 3,
            Enchant::Loyalty => 3,
            Enchant::Impaling => 5,
            Enchant::Multishot => 1,
            Enchant::Piercing => 4,
            Enchant::QuickCharge => 3,
        }
    }

    /// Every enchant in the catalog.
    pub fn all() -> &'static [Enchant] {
        &CATALOG
    }

    /// Parse a key (case-insensitive). Unknown keys are a user-visible rejection.
    pub fn parse(s: &str) -> Result<Enchant> {
        let key = s.to_ascii_lowercase();
        CATALOG
            .iter()
            .copied()
            .find(|e| e.key() == key)
            .ok_or(EnchGuardError::UnknownEnchant(key))
    }
}

impl fmt::Display for Enchant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
