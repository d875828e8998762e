//! Engine wiring: compile the policy, build the cache/resolver/interceptor,
//! and expose the reload and session-lifecycle invalidation hooks.

use std::sync::Arc;

use enchguard_core::catalog::Enchant;
use enchguard_core::error::Result;
use enchguard_core::item::{ActorId, ItemKind};

use crate::config::LimitConfig;
use crate::enforce::Interceptor;
use crate::host::{CapabilityResolver, HoldingsHost, NotificationSink};
use crate::limits::{LimitResolver, TierCache};
use crate::policy::{PolicyHandle, PolicyRuntime};

/// The assembled enforcement engine.
///
/// All state is constructor-injected and instance-owned — no globals — so
/// tests can run isolated engines side by side.
pub struct EnchGuard {
    policy: Arc<PolicyHandle>,
    tiers: Arc<TierCache>,
    resolver: Arc<LimitResolver>,
    interceptor: Interceptor,
}

impl EnchGuard {
    /// Build the engine from a config and the host collaborators.
    /// Returns Result so the host can handle a bad config gracefully.
    pub fn new(
        cfg: &LimitConfig,
        caps: Arc<dyn CapabilityResolver>,
        notifier: Arc<dyn NotificationSink>,
        host: Arc<dyn HoldingsHost>,
    ) -> Result<Self> {
        let runtime = PolicyRuntime::compile(cfg)?;
        tracing::info!(
            base_max = runtime.base_max_level,
            absolute_max = runtime.absolute_max_level,
            tiers_enabled = runtime.tiers_enabled,
            item_overrides_enabled = runtime.item_overrides_enabled,
            "enchguard starting"
        );

        let policy = Arc::new(PolicyHandle::new(runtime));
        let tiers = Arc::new(TierCache::new());
        let resolver = Arc::new(LimitResolver::new(
            Arc::clone(&policy),
            Arc::clone(&tiers),
            Arc::clone(&caps),
        ));
        let interceptor = Interceptor::new(
            Arc::clone(&policy),
            Arc::clone(&resolver),
            caps,
            notifier,
            host,
        );

        Ok(Self {
            policy,
            tiers,
            resolver,
            interceptor,
        })
    }

    pub fn resolver(&self) -> &LimitResolver {
        &self.resolver
    }

    pub fn interceptor(&self) -> &Interceptor {
        &self.interceptor
    }

    pub fn policy(&self) -> &PolicyHandle {
        &self.policy
    }

    /// Effective ceiling passthrough (see [`LimitResolver::resolve`]).
    pub fn resolve(
        &self,
        actor: &ActorId,
        enchant: Option<Enchant>,
        item_kind: Option<&ItemKind>,
    ) -> Result<u32> {
        self.resolver.resolve(actor, enchant, item_kind)
    }

    /// Recompile and install a new config. The whole tier cache is dropped:
    /// capability grants may have changed meaning under the new ladder.
    pub fn reload(&self, cfg: &LimitConfig) -> Result<()> {
        let runtime = PolicyRuntime::compile(cfg)?;
        self.policy.swap(runtime);
        self.tiers.invalidate_all();
        tracing::info!("configuration reloaded");
        Ok(())
    }

    /// Session-end hook: drop the actor's cached tier so a rejoin recomputes it.
    pub fn end_session(&self, actor: &ActorId) {
        self.tiers.invalidate(actor);
        tracing::debug!(actor = %actor, "tier cache entry dropped");
    }
}
