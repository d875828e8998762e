use std::collections::HashMap;

use serde::Deserialize;

use enchguard_core::catalog::Enchant;
use enchguard_core::error::{EnchGuardError, Result};

/// Hard cap on any configurable level value (host item format limit).
pub const LEVEL_CEILING: u32 = 32767;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitConfig {
    pub version: u32,

    #[serde(default)]
    pub limits: LimitsSection,

    #[serde(default)]
    pub tiers: TiersSection,

    #[serde(default)]
    pub item_overrides: ItemOverridesSection,

    /// Enchant keys that are stripped on sight unless the actor holds the
    /// bypass capability.
    #[serde(default)]
    pub disabled_enchants: Vec<String>,

    #[serde(default)]
    pub messages: MessagesSection,

    #[serde(default)]
    pub grant: GrantSection,

    #[serde(default)]
    pub sweep: SweepSection,

    #[serde(default)]
    pub audit: AuditSection,
}

impl LimitConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(EnchGuardError::BadConfig(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.limits.validate()?;
        self.tiers.validate()?;
        self.item_overrides.validate()?;
        self.grant.validate()?;
        self.sweep.validate()?;

        for key in &self.disabled_enchants {
            Enchant::parse(key).map_err(|_| {
                EnchGuardError::BadConfig(format!("disabled_enchants: unknown enchant: {key}"))
            })?;
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsSection {
    #[serde(default = "default_base_max_level")]
    pub base_max_level: u32,

    /// Hard upper bound applied after every other stage; nothing raises it.
    #[serde(default = "default_absolute_max_level")]
    pub absolute_max_level: u32,
}

impl Default for LimitsSection {
    fn default() -> Self {
        Self {
            base_max_level: default_base_max_level(),
            absolute_max_level: default_absolute_max_level(),
        }
    }
}

impl LimitsSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=LEVEL_CEILING).contains(&self.base_max_level) {
            return Err(EnchGuardError::BadConfig(format!(
                "limits.base_max_level must be between 1 and {LEVEL_CEILING}"
            )));
        }
        if !(1..=LEVEL_CEILING).contains(&self.absolute_max_level) {
            return Err(EnchGuardError::BadConfig(format!(
                "limits.absolute_max_level must be between 1 and {LEVEL_CEILING}"
            )));
        }
        if self.base_max_level > self.absolute_max_level {
            return Err(EnchGuardError::BadConfig(
                "limits.base_max_level must not exceed limits.absolute_max_level".into(),
            ));
        }
        Ok(())
    }
}

fn default_base_max_level() -> u32 {
    10
}
fn default_absolute_max_level() -> u32 {
    1000
}

/// One rung of the tier ladder: holding `capability` grants tier `level`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierRungConfig {
    pub capability: String,
    pub level: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TiersSection {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Checked top-down; the first capability the actor holds wins.
    #[serde(default = "default_ladder")]
    pub ladder: Vec<TierRungConfig>,
}

impl Default for TiersSection {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            ladder: default_ladder(),
        }
    }
}

impl TiersSection {
    pub fn validate(&self) -> Result<()> {
        let mut prev: Option<u32> = None;
        for rung in &self.ladder {
            if rung.capability.is_empty() {
                return Err(EnchGuardError::BadConfig(
                    "tiers.ladder: capability must not be empty".into(),
                ));
            }
            if !(1..=LEVEL_CEILING).contains(&rung.level) {
                return Err(EnchGuardError::BadConfig(format!(
                    "tiers.ladder: level must be between 1 and {LEVEL_CEILING}"
                )));
            }
            if let Some(p) = prev {
                if rung.level >= p {
                    return Err(EnchGuardError::BadConfig(
                        "tiers.ladder: levels must be strictly descending".into(),
                    ));
                }
            }
            prev = Some(rung.level);
        }
        Ok(())
    }
}

fn default_ladder() -> Vec<TierRungConfig> {
    [1000, 500, 255, 100, 50, 20, 10, 5, 1]
        .into_iter()
        .map(|level| TierRungConfig {
            capability: format!("enchguard.tier.{level}"),
            level,
        })
        .collect()
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemOverridesSection {
    #[serde(default)]
    pub enabled: bool,

    /// item kind -> enchant key -> ceiling. An override can only tighten the
    /// resolved limit; 0 forbids the enchant on that item kind.
    #[serde(default)]
    pub items: HashMap<String, HashMap<String, u32>>,
}

impl ItemOverridesSection {
    pub fn validate(&self) -> Result<()> {
        for (kind, overrides) in &self.items {
            if kind.is_empty() {
                return Err(EnchGuardError::BadConfig(
                    "item_overrides.items: item kind must not be empty".into(),
                ));
            }
            for (key, ceiling) in overrides {
                Enchant::parse(key).map_err(|_| {
                    EnchGuardError::BadConfig(format!(
                        "item_overrides.items.{kind}: unknown enchant: {key}"
                    ))
                })?;
                if *ceiling > LEVEL_CEILING {
                    return Err(EnchGuardError::BadConfig(format!(
                        "item_overrides.items.{kind}.{key} must not exceed {LEVEL_CEILING}"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessagesSection {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for MessagesSection {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrantSection {
    /// Convert a plain book into the storage kind when a grant is enforced.
    #[serde(default = "default_true")]
    pub convert_plain_storage: bool,

    /// Deduct catalyst/energy when the engine replaces a suppressed grant.
    #[serde(default = "default_true")]
    pub consume_resources: bool,

    /// Catalyst consumed per grant, capped by what is actually available.
    #[serde(default = "default_catalyst_per_use")]
    pub catalyst_per_use: u32,
}

impl Default for GrantSection {
    fn default() -> Self {
        Self {
            convert_plain_storage: default_true(),
            consume_resources: default_true(),
            catalyst_per_use: default_catalyst_per_use(),
        }
    }
}

impl GrantSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=64).contains(&self.catalyst_per_use) {
            return Err(EnchGuardError::BadConfig(
                "grant.catalyst_per_use must be between 1 and 64".into(),
            ));
        }
        Ok(())
    }
}

fn default_catalyst_per_use() -> u32 {
    3
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepSection {
    /// Delay before the session-start sweep, letting holdings finish loading.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Default for SweepSection {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

impl SweepSection {
    pub fn validate(&self) -> Result<()> {
        if self.settle_delay_ms > 60_000 {
            return Err(EnchGuardError::BadConfig(
                "sweep.settle_delay_ms must not exceed 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_settle_delay_ms() -> u64 {
    1000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditSection {
    /// Emit an info-level audit line for enforced grants and combines.
    #[serde(default = "default_true")]
    pub log_activities: bool,
}

impl Default for AuditSection {
    fn default() -> Self {
        Self {
            log_activities: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}
