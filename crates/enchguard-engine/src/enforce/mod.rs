//! Enforcement interceptor: detect, normalize, and correct out-of-policy
//! enchant state at every pathway an item can acquire or change bindings.
//!
//! Five triggers (grant, combine, container transfer, pickup, session sweep)
//! are thin adapters over one shared `normalize` pass; the limit resolver is
//! their sole source of truth for "is this level allowed".

mod normalize;
mod ops;
mod triggers;

use std::sync::Arc;

use enchguard_core::error::Result;
use enchguard_core::item::{ActorId, Item};

use crate::host::{caps, CapabilityResolver, HoldingsHost, Notice, NotificationSink};
use crate::limits::LimitResolver;
use crate::policy::PolicyHandle;

pub use ops::{BindingReport, CatalogRow, EnchantStatus, ItemReport};
pub use triggers::{GrantCosts, GrantDecision, GrantRequest};

/// Result of one normalize pass over one item.
#[derive(Debug, Clone)]
pub struct NormalizePass {
    /// The corrected item (identical to the input when `changed` is false).
    pub item: Item,
    pub changed: bool,
    /// Notifications queued during the pass; emission is the trigger's call.
    pub notes: Vec<Notice>,
}

impl NormalizePass {
    fn unchanged(item: Item) -> Self {
        Self {
            item,
            changed: false,
            notes: Vec::new(),
        }
    }
}

/// The enforcement interceptor. Cheap to clone; the deferred triggers clone
/// it into spawned tasks.
#[derive(Clone)]
pub struct Interceptor {
    policy: Arc<PolicyHandle>,
    resolver: Arc<LimitResolver>,
    caps: Arc<dyn CapabilityResolver>,
    notifier: Arc<dyn NotificationSink>,
    host: Arc<dyn HoldingsHost>,
}

impl Interceptor {
    pub fn new(
        policy: Arc<PolicyHandle>,
        resolver: Arc<LimitResolver>,
        caps: Arc<dyn CapabilityResolver>,
        notifier: Arc<dyn NotificationSink>,
        host: Arc<dyn HoldingsHost>,
    ) -> Self {
        Self {
            policy,
            resolver,
            caps,
            notifier,
            host,
        }
    }

    /// Whether passive enforcement applies to this actor.
    fn enforcement_applies(&self, actor: &ActorId) -> Result<bool> {
        self.caps.has_capability(actor, caps::USE)
    }

    /// Forward queued notices when messaging is enabled.
    fn emit(&self, actor: &ActorId, notes: &[Notice]) {
        if notes.is_empty() || !self.policy.snapshot().messages_enabled {
            return;
        }
        for note in notes {
            self.notifier.notify(actor, note);
        }
    }
}
