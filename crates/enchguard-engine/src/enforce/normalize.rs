//! The shared normalize-and-correct pass.

use enchguard_core::error::Result;
use enchguard_core::item::{ActorId, Item};

use crate::host::{caps, Notice};
use crate::policy::PolicyRuntime;

use super::{Interceptor, NormalizePass};

impl Interceptor {
    /// Normalize every binding on an item against the actor's limits.
    ///
    /// Disabled enchants are stripped (unless the actor holds the bypass),
    /// over-limit levels are clamped (removed when the limit is 0), and
    /// compliant bindings are left untouched. Idempotent: a second pass over
    /// the corrected item reports `changed == false`.
    ///
    /// Never errors. An item with no bindings is a no-op; a collaborator
    /// fault returns the item unchanged — failing to a zero ceiling would
    /// destructively strip everything on a transient fault.
    pub fn normalize(&self, actor: &ActorId, item: &Item) -> NormalizePass {
        let policy = self.policy.snapshot();
        match self.try_normalize(&policy, actor, item) {
            Ok(pass) => pass,
            Err(e) => {
                tracing::warn!(actor = %actor, error = %e, "normalize skipped: collaborator unavailable");
                NormalizePass::unchanged(item.clone())
            }
        }
    }

    fn try_normalize(
        &self,
        policy: &PolicyRuntime,
        actor: &ActorId,
        item: &Item,
    ) -> Result<NormalizePass> {
        if !item.has_bindings() {
            return Ok(NormalizePass::unchanged(item.clone()));
        }

        let mut out = item.clone();
        let mut changed = false;
        let mut notes = Vec::new();
        // Bypass is looked up at most once per pass.
        let mut bypass_disabled: Option<bool> = None;

        for (&enchant, &level) in item.bindings() {
            if policy.is_disabled(enchant) {
                let bypass = match bypass_disabled {
                    Some(b) => b,
                    None => {
                        let b = self.caps.has_capability(actor, caps::BYPASS_DISABLED)?;
                        bypass_disabled = Some(b);
                        b
                    }
                };
                if !bypass {
                    out.remove_binding(enchant);
                    changed = true;
                    notes.push(Notice::DisabledRemoved {
                        enchant,
                        item_kind: item.kind().clone(),
                    });
                    tracing::debug!(actor = %actor, %enchant, kind = %item.kind(), "stripped disabled enchant");
                    continue;
                }
            }

            let limit = self
                .resolver
                .resolve_with(policy, actor, Some(enchant), Some(item.kind()))?;
            if level > limit {
                // set_binding removes the binding when the limit is 0.
                out.set_binding(enchant, limit);
                changed = true;
                notes.push(Notice::LevelReduced {
                    enchant,
                    item_kind: item.kind().clone(),
                    from: level,
                    to: limit,
                });
                tracing::debug!(
                    actor = %actor,
                    %enchant,
                    kind = %item.kind(),
                    from = level,
                    to = limit,
                    "clamped enchant level"
                );
            }
        }

        Ok(NormalizePass {
            item: out,
            changed,
            notes,
        })
    }
}
