//! Single-item mutation and inspection primitives for the admin surface.
//!
//! The command parser, tab completion, and cooldown bookkeeping live in the
//! host adapter; these primitives enforce the same policy the passive
//! triggers do, but reject loudly instead of auto-correcting.

use enchguard_core::catalog::Enchant;
use enchguard_core::error::{EnchGuardError, Result};
use enchguard_core::item::{ActorId, Item, ItemKind};

use crate::host::caps;

use super::Interceptor;

/// One binding on an item together with the actor's resolved ceiling for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingReport {
    pub enchant: Enchant,
    pub level: u32,
    pub max: u32,
}

/// Inspection view of an item for the admin `info` surface.
#[derive(Debug, Clone)]
pub struct ItemReport {
    pub kind: ItemKind,
    /// Whether bindings are in the stored (transfer) representation.
    pub stored: bool,
    pub bindings: Vec<BindingReport>,
    /// The actor's general ceiling (no per-item stage).
    pub general_max: u32,
    pub tier: u32,
    pub absolute_max: u32,
}

/// Catalog availability of one enchant for an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnchantStatus {
    Enabled,
    Disabled,
    /// Disabled, but the actor holds the bypass capability.
    DisabledBypassed,
}

/// One row of the admin `list` surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub enchant: Enchant,
    /// Informational only, never enforced.
    pub vanilla_max: u32,
    pub your_max: u32,
    pub status: EnchantStatus,
}

impl Interceptor {
    /// Write a binding onto a copy of the item, subject to the full policy.
    /// Rejects rather than clamps: level 0, disabled-without-bypass, and
    /// over-limit requests are user-visible errors with no state change.
    pub fn add_enchant(
        &self,
        actor: &ActorId,
        item: &Item,
        enchant: Enchant,
        level: u32,
    ) -> Result<Item> {
        if level == 0 {
            return Err(EnchGuardError::InvalidLevel(
                "level must be greater than 0".into(),
            ));
        }

        let policy = self.policy.snapshot();
        if policy.is_disabled(enchant)
            && !self.caps.has_capability(actor, caps::BYPASS_DISABLED)?
        {
            return Err(EnchGuardError::Disabled(enchant.key().to_string()));
        }

        let max = self
            .resolver
            .resolve_with(&policy, actor, Some(enchant), Some(item.kind()))?;
        if level > max {
            return Err(EnchGuardError::LimitExceeded {
                enchant: enchant.key().to_string(),
                level,
                max,
            });
        }

        let mut out = item.clone();
        out.set_binding(enchant, level);
        tracing::debug!(actor = %actor, %enchant, level, kind = %item.kind(), "admin add");
        Ok(out)
    }

    /// Remove a binding from a copy of the item.
    pub fn remove_enchant(&self, item: &Item, enchant: Enchant) -> Result<Item> {
        let mut out = item.clone();
        if !out.remove_binding(enchant) {
            return Err(EnchGuardError::NotFound(format!(
                "{enchant} is not on this item"
            )));
        }
        Ok(out)
    }

    /// Strip every binding from a copy of the item.
    pub fn clear_enchants(&self, item: &Item) -> Item {
        let mut out = item.clone();
        out.clear_bindings();
        out
    }

    /// Inspection view: every binding with its resolved ceiling, plus the
    /// actor's general max, tier, and the absolute ceiling.
    pub fn item_report(&self, actor: &ActorId, item: &Item) -> Result<ItemReport> {
        let policy = self.policy.snapshot();

        let mut bindings = Vec::with_capacity(item.bindings().len());
        for (&enchant, &level) in item.bindings() {
            let max = self
                .resolver
                .resolve_with(&policy, actor, Some(enchant), Some(item.kind()))?;
            bindings.push(BindingReport {
                enchant,
                level,
                max,
            });
        }

        Ok(ItemReport {
            kind: item.kind().clone(),
            stored: item.is_stored(),
            bindings,
            general_max: self.resolver.resolve_with(&policy, actor, None, None)?,
            tier: self.resolver.tier(actor)?,
            absolute_max: policy.absolute_max_level,
        })
    }

    /// Catalog view: every enchant with its vanilla max, the actor's general
    /// max, and disabled/bypassed status.
    pub fn catalog_listing(&self, actor: &ActorId) -> Result<Vec<CatalogRow>> {
        let policy = self.policy.snapshot();
        let your_max = self.resolver.resolve_with(&policy, actor, None, None)?;
        let bypass = self.caps.has_capability(actor, caps::BYPASS_DISABLED)?;

        Ok(Enchant::all()
            .iter()
            .map(|&enchant| CatalogRow {
                enchant,
                vanilla_max: enchant.vanilla_max(),
                your_max,
                status: if policy.is_disabled(enchant) {
                    if bypass {
                        EnchantStatus::DisabledBypassed
                    } else {
                        EnchantStatus::Disabled
                    }
                } else {
                    EnchantStatus::Enabled
                },
            })
            .collect())
    }
}
