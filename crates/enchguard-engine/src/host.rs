//! Host-facing collaborator interfaces.
//!
//! The engine never owns actors, permissions, inventories, or chat — it
//! reaches them through these traits. Implementations live in the host
//! adapter; tests use in-memory fakes.

use async_trait::async_trait;

use enchguard_core::catalog::Enchant;
use enchguard_core::error::Result;
use enchguard_core::item::{ActorId, Item, ItemKind};

/// Well-known capability names.
pub mod caps {
    /// Enforcement applies only to actors holding this.
    pub const USE: &str = "enchguard.use";
    /// Holders keep enchants on the disabled list.
    pub const BYPASS_DISABLED: &str = "enchguard.bypass.disabled";
}

/// Answers "does this actor hold capability X".
///
/// `Err` models collaborator unavailability: the engine fails closed by
/// skipping enforcement for that call, never by assuming a zero ceiling.
pub trait CapabilityResolver: Send + Sync {
    fn has_capability(&self, actor: &ActorId, capability: &str) -> Result<bool>;
}

/// Structured player-facing notification. Template selection, prefixing, and
/// rendering are the host's responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A disabled enchant was stripped from an item the actor holds.
    DisabledRemoved { enchant: Enchant, item_kind: ItemKind },
    /// An over-limit binding was clamped; `to == 0` means it was removed.
    LevelReduced {
        enchant: Enchant,
        item_kind: ItemKind,
        from: u32,
        to: u32,
    },
    /// A proposed grant binding was skipped because the enchant is disabled.
    GrantDisabledSkipped { enchant: Enchant },
    /// A proposed grant binding was clamped to the actor's limit.
    GrantLevelLimited { enchant: Enchant, level: u32 },
    /// The engine applied a (possibly clamped) grant in place of the vanilla one.
    GrantApplied,
    /// Aggregate notice for the session-start sweep.
    HoldingsAdjusted,
}

/// Fire-and-forget notification sink.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, actor: &ActorId, notice: &Notice);
}

/// Addressable slot in an actor's holdings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotRef {
    /// Main holdings by index.
    Main(u32),
    /// Equipped gear slot by index.
    Gear(u32),
    /// The off-hand slot.
    OffHand,
    /// The item currently under the action cursor.
    Cursor,
}

/// Slot-addressed access to an actor's current holdings, used by the deferred
/// passes (post-transfer correction, session-start sweep).
///
/// Every method tolerates a disconnected actor: `None`/`false` makes the
/// deferred task no-op gracefully instead of faulting.
#[async_trait]
pub trait HoldingsHost: Send + Sync {
    /// Read one slot; `None` when the actor is gone or the slot is empty.
    async fn read_slot(&self, actor: &ActorId, slot: SlotRef) -> Option<Item>;

    /// Write a corrected item back; `false` when the actor is gone.
    async fn write_slot(&self, actor: &ActorId, slot: SlotRef, item: Item) -> bool;

    /// Every occupied slot (main, gear, off-hand); `None` when the actor is gone.
    async fn holdings(&self, actor: &ActorId) -> Option<Vec<(SlotRef, Item)>>;
}
