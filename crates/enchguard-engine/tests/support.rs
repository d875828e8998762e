//! In-memory fakes for the host collaborators, shared by the integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use enchguard_core::error::{EnchGuardError, Result};
use enchguard_core::item::{ActorId, Item};
use enchguard_engine::config;
use enchguard_engine::host::{
    CapabilityResolver, HoldingsHost, Notice, NotificationSink, SlotRef,
};
use enchguard_engine::EnchGuard;

/// Capability resolver backed by a static grant set. Flipping `available`
/// off simulates the permission collaborator being unreachable.
#[derive(Default)]
pub struct StaticCaps {
    granted: Mutex<BTreeSet<(ActorId, String)>>,
    unavailable: AtomicBool,
}

impl StaticCaps {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn grant(&self, actor: &ActorId, capability: &str) {
        self.granted
            .lock()
            .unwrap()
            .insert((actor.clone(), capability.to_string()));
    }

    pub fn revoke(&self, actor: &ActorId, capability: &str) {
        self.granted
            .lock()
            .unwrap()
            .remove(&(actor.clone(), capability.to_string()));
    }

    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }
}

impl CapabilityResolver for StaticCaps {
    fn has_capability(&self, actor: &ActorId, capability: &str) -> Result<bool> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(EnchGuardError::Unavailable("permission backend offline".into()));
        }
        Ok(self
            .granted
            .lock()
            .unwrap()
            .contains(&(actor.clone(), capability.to_string())))
    }
}

/// Notification sink that records everything it is asked to send.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<(ActorId, Notice)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<(ActorId, Notice)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, actor: &ActorId, notice: &Notice) {
        self.sent.lock().unwrap().push((actor.clone(), notice.clone()));
    }
}

/// Holdings host backed by a slot map per connected actor. An actor absent
/// from the map models a disconnect.
#[derive(Default)]
pub struct MapHost {
    actors: Mutex<HashMap<ActorId, HashMap<SlotRef, Item>>>,
}

impl MapHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn connect(&self, actor: &ActorId) {
        self.actors
            .lock()
            .unwrap()
            .entry(actor.clone())
            .or_default();
    }

    pub fn disconnect(&self, actor: &ActorId) {
        self.actors.lock().unwrap().remove(actor);
    }

    pub fn put(&self, actor: &ActorId, slot: SlotRef, item: Item) {
        self.actors
            .lock()
            .unwrap()
            .entry(actor.clone())
            .or_default()
            .insert(slot, item);
    }

    pub fn get(&self, actor: &ActorId, slot: SlotRef) -> Option<Item> {
        self.actors
            .lock()
            .unwrap()
            .get(actor)
            .and_then(|slots| slots.get(&slot).cloned())
    }
}

#[async_trait]
impl HoldingsHost for MapHost {
    async fn read_slot(&self, actor: &ActorId, slot: SlotRef) -> Option<Item> {
        self.get(actor, slot)
    }

    async fn write_slot(&self, actor: &ActorId, slot: SlotRef, item: Item) -> bool {
        let mut actors = self.actors.lock().unwrap();
        match actors.get_mut(actor) {
            Some(slots) => {
                slots.insert(slot, item);
                true
            }
            None => false,
        }
    }

    async fn holdings(&self, actor: &ActorId) -> Option<Vec<(SlotRef, Item)>> {
        self.actors
            .lock()
            .unwrap()
            .get(actor)
            .map(|slots| slots.iter().map(|(s, i)| (*s, i.clone())).collect())
    }
}

/// Everything a test needs wired together.
pub struct Fixture {
    pub engine: EnchGuard,
    pub caps: Arc<StaticCaps>,
    pub sink: Arc<RecordingSink>,
    pub host: Arc<MapHost>,
}

pub fn fixture(cfg_yaml: &str) -> Fixture {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let caps = StaticCaps::new();
    let sink = RecordingSink::new();
    let host = MapHost::new();
    let cfg = config::load_from_str(cfg_yaml).expect("fixture config must parse");
    let engine = EnchGuard::new(
        &cfg,
        caps.clone(),
        sink.clone(),
        host.clone(),
    )
    .expect("fixture engine must build");

    Fixture {
        engine,
        caps,
        sink,
        host,
    }
}
