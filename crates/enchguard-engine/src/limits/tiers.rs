use dashmap::DashMap;

use enchguard_core::error::Result;
use enchguard_core::item::ActorId;

/// Process-wide memoization of an actor's highest granted tier.
///
/// No TTL: correctness depends entirely on explicit invalidation —
/// `invalidate_all` on policy reload (capability grants may have changed
/// meaning), `invalidate` on session end so a rejoining actor is recomputed.
#[derive(Default)]
pub struct TierCache {
    map: DashMap<ActorId, u32>,
}

impl TierCache {
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }

    /// Cached tier, or compute-and-store on miss. A compute error is not cached.
    pub fn get_or_compute<F>(&self, actor: &ActorId, compute: F) -> Result<u32>
    where
        F: FnOnce() -> Result<u32>,
    {
        if let Some(tier) = self.map.get(actor) {
            return Ok(*tier);
        }
        let tier = compute()?;
        self.map.insert(actor.clone(), tier);
        tracing::debug!(actor = %actor, tier, "tier cached");
        Ok(tier)
    }

    pub fn invalidate(&self, actor: &ActorId) {
        self.map.remove(actor);
    }

    pub fn invalidate_all(&self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
