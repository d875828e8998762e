//! Limit resolution: one effective ceiling from four policy stages.

pub mod tiers;

use std::sync::Arc;

use enchguard_core::catalog::Enchant;
use enchguard_core::error::Result;
use enchguard_core::item::{ActorId, ItemKind};

use crate::host::CapabilityResolver;
use crate::policy::{PolicyHandle, PolicyRuntime, TierRung};

pub use tiers::TierCache;

/// Resolves the effective enchant ceiling for an actor.
///
/// Pure apart from tier-cache population; safe to call concurrently for
/// different actors.
pub struct LimitResolver {
    policy: Arc<PolicyHandle>,
    tiers: Arc<TierCache>,
    caps: Arc<dyn CapabilityResolver>,
}

impl LimitResolver {
    pub fn new(
        policy: Arc<PolicyHandle>,
        tiers: Arc<TierCache>,
        caps: Arc<dyn CapabilityResolver>,
    ) -> Self {
        Self {
            policy,
            tiers,
            caps,
        }
    }

    /// Effective ceiling for (actor, enchant?, item kind?).
    ///
    /// Omit enchant/item kind for the general "your max" value (the per-item
    /// stage is skipped). A capability fault propagates as `Unavailable` so
    /// the caller can fail closed without mutating anything.
    pub fn resolve(
        &self,
        actor: &ActorId,
        enchant: Option<Enchant>,
        item_kind: Option<&ItemKind>,
    ) -> Result<u32> {
        let policy = self.policy.snapshot();
        self.resolve_with(&policy, actor, enchant, item_kind)
    }

    /// Same as [`resolve`](Self::resolve) against an already-taken snapshot,
    /// so a multi-binding pass sees one coherent policy.
    pub fn resolve_with(
        &self,
        policy: &PolicyRuntime,
        actor: &ActorId,
        enchant: Option<Enchant>,
        item_kind: Option<&ItemKind>,
    ) -> Result<u32> {
        // Stage 1: base ceiling.
        let mut max = policy.base_max_level;
        tracing::debug!(actor = %actor, base = max, "resolve: base ceiling");

        // Stage 2: a tier can only raise, never lower below the base.
        if policy.tiers_enabled {
            let tier = self.tier_with(policy, actor)?;
            if tier > 0 && tier > max {
                max = tier;
                tracing::debug!(actor = %actor, tier, max, "resolve: raised by tier");
            }
        }

        // Stage 3: a per-item override can only tighten.
        if policy.item_overrides_enabled {
            if let (Some(enchant), Some(kind)) = (enchant, item_kind) {
                if let Some(ceiling) = policy.item_override(kind, enchant) {
                    if ceiling < max {
                        max = ceiling;
                        tracing::debug!(
                            actor = %actor,
                            %enchant,
                            kind = %kind,
                            max,
                            "resolve: tightened by item override"
                        );
                    }
                }
            }
        }

        // Stage 4: the absolute ceiling is never overridable.
        let max = max.min(policy.absolute_max_level);
        tracing::debug!(actor = %actor, max, "resolve: final");
        Ok(max)
    }

    /// The actor's tier (0 when tiers are disabled or no rung matches).
    pub fn tier(&self, actor: &ActorId) -> Result<u32> {
        let policy = self.policy.snapshot();
        if !policy.tiers_enabled {
            return Ok(0);
        }
        self.tier_with(&policy, actor)
    }

    fn tier_with(&self, policy: &PolicyRuntime, actor: &ActorId) -> Result<u32> {
        self.tiers
            .get_or_compute(actor, || walk_ladder(&*self.caps, actor, &policy.ladder))
    }
}

/// First rung the actor holds wins; holding none means tier 0.
fn walk_ladder(
    caps: &dyn CapabilityResolver,
    actor: &ActorId,
    ladder: &[TierRung],
) -> Result<u32> {
    for rung in ladder {
        if caps.has_capability(actor, &rung.capability)? {
            tracing::debug!(actor = %actor, capability = %rung.capability, tier = rung.level, "ladder match");
            return Ok(rung.level);
        }
    }
    Ok(0)
}
