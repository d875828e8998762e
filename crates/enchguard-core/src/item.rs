//! Items, actors, and the two binding representations.
//!
//! An item either bears enchant bindings directly (tools, armor, weapons) or
//! *stores* them for later transfer onto another item (the enchanted-book
//! kind). Both representations expose the same accessor/mutator surface so
//! the enforcement pass has a single code path; only construction and the
//! plain-to-storage conversion care about the difference.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Enchant;

/// Opaque, stable actor identity. The core never interprets it beyond
/// equality; capability and tier lookups key off it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Item kind: an open string vocabulary owned by the host. Two kinds are
/// well-known to the engine: the plain book and the enchanted (storage) book.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKind(String);

impl ItemKind {
    /// Key of the plain, unenchanted book kind.
    pub const BOOK: &'static str = "book";
    /// Key of the storage kind that carries bindings for later transfer.
    pub const ENCHANTED_BOOK: &'static str = "enchanted_book";

    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn book() -> Self {
        Self(Self::BOOK.to_string())
    }

    pub fn enchanted_book() -> Self {
        Self(Self::ENCHANTED_BOOK.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether items of this kind store bindings rather than bear them.
    pub fn is_storage(&self) -> bool {
        self.0 == Self::ENCHANTED_BOOK
    }

    /// Whether this is the plain kind a grant may convert into storage.
    pub fn is_plain_book(&self) -> bool {
        self.0 == Self::BOOK
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How an item carries its bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingStore {
    /// Bindings attached to the item instance itself.
    Direct(BTreeMap<Enchant, u32>),
    /// Bindings held for later transfer (storage kind).
    Stored(BTreeMap<Enchant, u32>),
}

impl BindingStore {
    fn map(&self) -> &BTreeMap<Enchant, u32> {
        match self {
            BindingStore::Direct(m) | BindingStore::Stored(m) => m,
        }
    }

    fn map_mut(&mut self) -> &mut BTreeMap<Enchant, u32> {
        match self {
            BindingStore::Direct(m) | BindingStore::Stored(m) => m,
        }
    }
}

/// A typed item with zero or more enchant bindings.
///
/// Invariant: a binding is never stored at level 0 — `set_binding(e, 0)`
/// removes the binding instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    kind: ItemKind,
    store: BindingStore,
}

impl Item {
    /// New empty item; the representation follows the kind.
    pub fn new(kind: ItemKind) -> Self {
        let store = if kind.is_storage() {
            BindingStore::Stored(BTreeMap::new())
        } else {
            BindingStore::Direct(BTreeMap::new())
        };
        Self { kind, store }
    }

    /// New item pre-populated with bindings (level-0 entries are dropped).
    pub fn with_bindings(kind: ItemKind, bindings: BTreeMap<Enchant, u32>) -> Self {
        let mut item = Self::new(kind);
        for (enchant, level) in bindings {
            item.set_binding(enchant, level);
        }
        item
    }

    /// New storage item carrying the given stored bindings.
    pub fn storage_with(bindings: BTreeMap<Enchant, u32>) -> Self {
        Self::with_bindings(ItemKind::enchanted_book(), bindings)
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Whether bindings are in the stored (transfer) representation.
    pub fn is_stored(&self) -> bool {
        matches!(self.store, BindingStore::Stored(_))
    }

    /// Uniform view over the bindings, regardless of representation.
    pub fn bindings(&self) -> &BTreeMap<Enchant, u32> {
        self.store.map()
    }

    pub fn level(&self, enchant: Enchant) -> Option<u32> {
        self.store.map().get(&enchant).copied()
    }

    pub fn has_bindings(&self) -> bool {
        !self.store.map().is_empty()
    }

    /// Write a binding; level 0 removes it.
    pub fn set_binding(&mut self, enchant: Enchant, level: u32) {
        if level == 0 {
            self.store.map_mut().remove(&enchant);
        } else {
            self.store.map_mut().insert(enchant, level);
        }
    }

    /// Remove a binding. Returns whether it was present.
    pub fn remove_binding(&mut self, enchant: Enchant) -> bool {
        self.store.map_mut().remove(&enchant).is_some()
    }

    pub fn clear_bindings(&mut self) {
        self.store.map_mut().clear();
    }
}
