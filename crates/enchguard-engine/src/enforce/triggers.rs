//! The five trigger adapters.
//!
//! Grant, combine, and pickup run synchronously on the host's dispatch
//! context. The post-transfer correction and the session-start sweep are
//! fire-and-forget tasks: no result is reported back, and a disconnected
//! actor makes them no-op through the holdings host.

use std::collections::BTreeMap;

use enchguard_core::catalog::Enchant;
use enchguard_core::error::Result;
use enchguard_core::item::{ActorId, Item, ItemKind};

use crate::host::{caps, Notice, SlotRef};
use crate::policy::PolicyRuntime;

use super::Interceptor;

/// A grant ritual about to complete, as reported by the host.
#[derive(Debug, Clone)]
pub struct GrantRequest {
    pub actor: ActorId,
    /// The item sitting in the ritual slot.
    pub item: Item,
    /// Bindings the vanilla grant would add.
    pub proposed: BTreeMap<Enchant, u32>,
    /// Energy the vanilla grant would cost.
    pub energy_cost: u32,
    /// Catalyst currently available in the ritual slot.
    pub catalyst_available: u32,
}

/// Resources the host must deduct when the engine replaces a grant,
/// matching exactly what the suppressed vanilla path would have taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrantCosts {
    pub energy: u32,
    pub catalyst: u32,
}

/// Outcome of the grant trigger.
#[derive(Debug, Clone)]
pub enum GrantDecision {
    /// Nothing to correct (or enforcement does not apply): let the vanilla
    /// grant proceed unmodified.
    AllowVanilla,
    /// Suppress the vanilla grant and install `item` instead, deducting `costs`.
    Replace { item: Item, costs: GrantCosts },
}

impl Interceptor {
    /// Grant trigger: screen the proposed bindings; when any would be
    /// rejected or clamped, suppress the vanilla grant and synthesize the
    /// result (converting a plain book into the storage kind).
    pub fn on_grant(&self, req: &GrantRequest) -> GrantDecision {
        let policy = self.policy.snapshot();
        match self.try_grant(&policy, req) {
            Ok(decision) => decision,
            Err(e) => {
                tracing::warn!(actor = %req.actor, error = %e, "grant enforcement skipped: collaborator unavailable");
                GrantDecision::AllowVanilla
            }
        }
    }

    fn try_grant(&self, policy: &PolicyRuntime, req: &GrantRequest) -> Result<GrantDecision> {
        if !self.enforcement_applies(&req.actor)? {
            return Ok(GrantDecision::AllowVanilla);
        }
        if req.item.kind().is_plain_book() && !policy.grant.convert_plain_storage {
            tracing::debug!(actor = %req.actor, "plain-book conversion disabled, vanilla grant proceeds");
            return Ok(GrantDecision::AllowVanilla);
        }

        let target_kind = if req.item.kind().is_plain_book() {
            ItemKind::enchanted_book()
        } else {
            req.item.kind().clone()
        };

        let mut bypass_disabled: Option<bool> = None;

        // Screening pass: an entirely compliant proposal stays vanilla. This
        // is an optimization, not a correctness requirement — normalize would
        // converge on the same end state either way.
        let mut needs_modification = false;
        for (&enchant, &level) in &req.proposed {
            if policy.is_disabled(enchant) && !self.bypass(&mut bypass_disabled, &req.actor)? {
                needs_modification = true;
                break;
            }
            let limit = self
                .resolver
                .resolve_with(policy, &req.actor, Some(enchant), Some(&target_kind))?;
            if level > limit {
                needs_modification = true;
                break;
            }
        }
        if !needs_modification {
            tracing::debug!(actor = %req.actor, "grant compliant, vanilla grant proceeds");
            return Ok(GrantDecision::AllowVanilla);
        }

        // Synthesize the result the vanilla path would have produced, minus
        // disabled bindings and with over-limit levels clamped.
        let mut target = if req.item.kind().is_plain_book() {
            Item::new(ItemKind::enchanted_book())
        } else {
            req.item.clone()
        };
        let mut notes = Vec::new();

        for (&enchant, &proposed_level) in &req.proposed {
            if policy.is_disabled(enchant) && !self.bypass(&mut bypass_disabled, &req.actor)? {
                notes.push(Notice::GrantDisabledSkipped { enchant });
                continue;
            }
            let limit = self
                .resolver
                .resolve_with(policy, &req.actor, Some(enchant), Some(target.kind()))?;
            let level = if proposed_level > limit {
                notes.push(Notice::GrantLevelLimited {
                    enchant,
                    level: limit,
                });
                limit
            } else {
                proposed_level
            };
            if level == 0 {
                continue;
            }
            target.set_binding(enchant, level);
        }
        notes.push(Notice::GrantApplied);

        // Deduct exactly what the suppressed vanilla path would have.
        let costs = if policy.grant.consume_resources {
            GrantCosts {
                energy: req.energy_cost,
                catalyst: req.catalyst_available.min(policy.grant.catalyst_per_use),
            }
        } else {
            GrantCosts {
                energy: 0,
                catalyst: 0,
            }
        };

        self.emit(&req.actor, &notes);
        if policy.log_activities {
            tracing::info!(
                actor = %req.actor,
                from = %req.item.kind(),
                to = %target.kind(),
                "grant enforced with limits"
            );
        }

        Ok(GrantDecision::Replace {
            item: target,
            costs,
        })
    }

    fn bypass(&self, cached: &mut Option<bool>, actor: &ActorId) -> Result<bool> {
        match *cached {
            Some(b) => Ok(b),
            None => {
                let b = self.caps.has_capability(actor, caps::BYPASS_DISABLED)?;
                *cached = Some(b);
                Ok(b)
            }
        }
    }

    /// Combine trigger: normalize a defensive copy of the proposed result.
    /// Returns the corrected result only when something changed; the caller's
    /// proposed item is never mutated in place, since the surrounding system
    /// may reuse it if the interaction is cancelled for unrelated reasons.
    pub fn on_combine(&self, actor: &ActorId, proposed: &Item) -> Option<Item> {
        match self.enforcement_applies(actor) {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => {
                tracing::warn!(actor = %actor, error = %e, "combine enforcement skipped: collaborator unavailable");
                return None;
            }
        }

        let pass = self.normalize(actor, proposed);
        if !pass.changed {
            return None;
        }
        self.emit(actor, &pass.notes);
        if self.policy.snapshot().log_activities {
            tracing::info!(actor = %actor, kind = %pass.item.kind(), "combine result corrected");
        }
        Some(pass.item)
    }

    /// Container-transfer trigger: correct the touched slots after the
    /// transfer completes so its own bookkeeping is not disturbed.
    /// Fire-and-forget.
    pub fn on_container_transfer(&self, actor: ActorId, slots: Vec<SlotRef>) {
        let this = self.clone();
        tokio::spawn(async move {
            match this.enforcement_applies(&actor) {
                Ok(true) => {}
                Ok(false) => return,
                Err(e) => {
                    tracing::warn!(actor = %actor, error = %e, "transfer enforcement skipped: collaborator unavailable");
                    return;
                }
            }

            for slot in slots {
                let Some(item) = this.host.read_slot(&actor, slot).await else {
                    continue;
                };
                let pass = this.normalize(&actor, &item);
                if pass.changed && this.host.write_slot(&actor, slot, pass.item).await {
                    this.emit(&actor, &pass.notes);
                    tracing::debug!(actor = %actor, ?slot, "corrected transferred item");
                }
            }
        });
    }

    /// Ground-pickup trigger: normalize synchronously before the item merges
    /// into the actor's holdings; the return value is the item actually received.
    pub fn on_pickup(&self, actor: &ActorId, item: Item) -> Item {
        match self.enforcement_applies(actor) {
            Ok(true) => {}
            Ok(false) => return item,
            Err(e) => {
                tracing::warn!(actor = %actor, error = %e, "pickup enforcement skipped: collaborator unavailable");
                return item;
            }
        }

        let pass = self.normalize(actor, &item);
        if !pass.changed {
            return item;
        }
        self.emit(actor, &pass.notes);
        tracing::debug!(actor = %actor, kind = %pass.item.kind(), "corrected picked-up item");
        pass.item
    }

    /// Session-start trigger: schedule a full-holdings sweep after the
    /// settling delay. Fire-and-forget.
    pub fn on_session_start(&self, actor: ActorId) {
        let this = self.clone();
        tokio::spawn(async move {
            let delay = this.policy.snapshot().sweep_settle_delay;
            tokio::time::sleep(delay).await;
            this.sweep_holdings(&actor).await;
        });
    }

    /// Sweep every item the actor currently holds, reporting a single
    /// aggregate notice if anything changed.
    pub async fn sweep_holdings(&self, actor: &ActorId) {
        match self.enforcement_applies(actor) {
            Ok(true) => {}
            Ok(false) => return,
            Err(e) => {
                tracing::warn!(actor = %actor, error = %e, "sweep skipped: collaborator unavailable");
                return;
            }
        }

        let Some(slots) = self.host.holdings(actor).await else {
            tracing::debug!(actor = %actor, "sweep skipped: actor gone");
            return;
        };

        let mut any_changed = false;
        for (slot, item) in slots {
            let pass = self.normalize(actor, &item);
            if pass.changed && self.host.write_slot(actor, slot, pass.item).await {
                any_changed = true;
            }
        }

        if any_changed {
            tracing::debug!(actor = %actor, "sweep corrected holdings");
            self.emit(actor, &[Notice::HoldingsAdjusted]);
        }
    }
}
