//! Compiled policy runtime.
//!
//! The raw config schema is compiled once into an immutable `PolicyRuntime`
//! (parsed enchant keys, tier ladder, override maps) so resolution never
//! touches string keys on the hot path. `PolicyHandle` hands out snapshots
//! and swaps in a new runtime on reload.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use enchguard_core::catalog::Enchant;
use enchguard_core::error::Result;
use enchguard_core::item::ItemKind;

use crate::config::LimitConfig;

/// One compiled tier rung.
#[derive(Debug, Clone)]
pub struct TierRung {
    pub capability: String,
    pub level: u32,
}

/// Grant-trigger behavior knobs.
#[derive(Debug, Clone, Copy)]
pub struct GrantPolicy {
    pub convert_plain_storage: bool,
    pub consume_resources: bool,
    pub catalyst_per_use: u32,
}

/// Immutable, compiled view of the limit policy.
/// Construct via [`PolicyRuntime::compile`], then share via Arc.
#[derive(Debug)]
pub struct PolicyRuntime {
    pub base_max_level: u32,
    pub absolute_max_level: u32,

    pub tiers_enabled: bool,
    /// Checked top-down; validated strictly descending.
    pub ladder: Vec<TierRung>,

    pub item_overrides_enabled: bool,
    item_overrides: HashMap<String, BTreeMap<Enchant, u32>>,

    disabled: BTreeSet<Enchant>,

    pub messages_enabled: bool,
    pub grant: GrantPolicy,
    pub sweep_settle_delay: Duration,
    pub log_activities: bool,
}

impl PolicyRuntime {
    /// Compile a validated config into the runtime form.
    pub fn compile(cfg: &LimitConfig) -> Result<Self> {
        cfg.validate()?;

        let mut disabled = BTreeSet::new();
        for key in &cfg.disabled_enchants {
            disabled.insert(Enchant::parse(key)?);
        }

        let mut item_overrides: HashMap<String, BTreeMap<Enchant, u32>> = HashMap::new();
        for (kind, overrides) in &cfg.item_overrides.items {
            let mut compiled = BTreeMap::new();
            for (key, ceiling) in overrides {
                compiled.insert(Enchant::parse(key)?, *ceiling);
            }
            item_overrides.insert(kind.clone(), compiled);
        }

        Ok(Self {
            base_max_level: cfg.limits.base_max_level,
            absolute_max_level: cfg.limits.absolute_max_level,
            tiers_enabled: cfg.tiers.enabled,
            ladder: cfg
                .tiers
                .ladder
                .iter()
                .map(|r| TierRung {
                    capability: r.capability.clone(),
                    level: r.level,
                })
                .collect(),
            item_overrides_enabled: cfg.item_overrides.enabled,
            item_overrides,
            disabled,
            messages_enabled: cfg.messages.enabled,
            grant: GrantPolicy {
                convert_plain_storage: cfg.grant.convert_plain_storage,
                consume_resources: cfg.grant.consume_resources,
                catalyst_per_use: cfg.grant.catalyst_per_use,
            },
            sweep_settle_delay: Duration::from_millis(cfg.sweep.settle_delay_ms),
            log_activities: cfg.audit.log_activities,
        })
    }

    /// Per-item ceiling for (kind, enchant), if one is declared.
    pub fn item_override(&self, kind: &ItemKind, enchant: Enchant) -> Option<u32> {
        self.item_overrides
            .get(kind.as_str())
            .and_then(|m| m.get(&enchant).copied())
    }

    pub fn is_disabled(&self, enchant: Enchant) -> bool {
        self.disabled.contains(&enchant)
    }
}

/// Reloadable handle to the current policy runtime.
///
/// Readers take a cheap snapshot per request; `swap` installs a freshly
/// compiled runtime on reload. Tier cache invalidation on reload is the
/// engine's responsibility, not the handle's.
pub struct PolicyHandle {
    current: RwLock<Arc<PolicyRuntime>>,
}

impl PolicyHandle {
    pub fn new(runtime: PolicyRuntime) -> Self {
        Self {
            current: RwLock::new(Arc::new(runtime)),
        }
    }

    /// Current runtime snapshot.
    pub fn snapshot(&self) -> Arc<PolicyRuntime> {
        // Poisoned lock means a reader panicked mid-swap; the stored Arc is
        // still the last consistent runtime, so serve it instead of panicking.
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Install a new runtime.
    pub fn swap(&self, runtime: PolicyRuntime) {
        match self.current.write() {
            Ok(mut guard) => *guard = Arc::new(runtime),
            Err(poisoned) => *poisoned.into_inner() = Arc::new(runtime),
        }
    }
}
