//! Identity-keyed memoization of entity keys.
//!
//! Every declaration and type is keyed by its arena id, so two structurally equal
//! types with different ids get different keys. A key is recorded *before* the
//! entity's body is encoded; when the encoder meets the entity again further down
//! the same recursion (a named type reached through its own method signature) it
//! gets the recorded key back and the recursion stops there.

use rustc_hash::FxHashMap;
use typegraph_model::{ObjectId, TypeId};
use uuid::Uuid;

use crate::config::IdStrategy;
use crate::keys::Key;

/// Outcome of [`Registry::resolve_object`] and [`Registry::resolve_type`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Seen before; its body is already staged (or stored).
    Known(Key),
    /// A built-in entity, keyed by name. It has no body.
    Builtin(Key),
    /// Freshly minted. The caller must encode and stage the body under this key.
    Minted(Key),
}

impl Resolution {
    pub fn key(&self) -> &Key {
        match self {
            Resolution::Known(key) | Resolution::Builtin(key) | Resolution::Minted(key) => key,
        }
    }

    pub fn into_key(self) -> Key {
        match self {
            Resolution::Known(key) | Resolution::Builtin(key) | Resolution::Minted(key) => key,
        }
    }

    pub fn needs_body(&self) -> bool {
        matches!(self, Resolution::Minted(_))
    }
}

#[derive(Debug, Clone, Copy)]
enum Registered {
    Object(ObjectId),
    Type(TypeId),
}

/// Counters reported in the ingestion logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub objects: usize,
    pub types: usize,
    pub builtins: usize,
}

/// The two identity tables, plus a journal of what the current pass registered
/// so that a pass whose batch never reached storage can be undone.
#[derive(Debug)]
pub struct Registry {
    objects: FxHashMap<ObjectId, Key>,
    types: FxHashMap<TypeId, Key>,
    journal: Vec<Registered>,
    ids: IdStrategy,
    next_id: u128,
    stats: RegistryStats,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(IdStrategy::Random)
    }
}

impl Registry {
    pub fn new(ids: IdStrategy) -> Self {
        Registry {
            objects: FxHashMap::default(),
            types: FxHashMap::default(),
            journal: Vec::new(),
            ids,
            next_id: 0,
            stats: RegistryStats::default(),
        }
    }

    fn mint(&mut self) -> Uuid {
        match self.ids {
            IdStrategy::Random => Uuid::new_v4(),
            IdStrategy::Sequential => {
                self.next_id += 1;
                Uuid::from_u128(self.next_id)
            }
        }
    }

    /// A fresh id for a scope node. Scopes are never shared, so they are not memoized.
    pub fn mint_scope(&mut self, package: &str) -> Key {
        let id = self.mint();
        Key::scope(package, id)
    }

    /// Resolves the key of a declaration named `name`, owned by the package at
    /// `package` (`None` for built-ins).
    pub fn resolve_object(&mut self, id: ObjectId, name: &str, package: Option<&str>) -> Resolution {
        if let Some(key) = self.objects.get(&id) {
            return Resolution::Known(key.clone());
        }
        match package {
            None => {
                let key = Key::builtin(name);
                self.objects.insert(id, key.clone());
                self.journal.push(Registered::Object(id));
                self.stats.builtins += 1;
                Resolution::Builtin(key)
            }
            Some(package) => {
                let uuid = self.mint();
                let key = Key::object(package, uuid);
                self.objects.insert(id, key.clone());
                self.journal.push(Registered::Object(id));
                self.stats.objects += 1;
                log::trace!("minted {key} for object {id} ({name})");
                Resolution::Minted(key)
            }
        }
    }

    /// Resolves the key of a type. `basic` carries the name of an atomic type.
    pub fn resolve_type(&mut self, id: TypeId, basic: Option<&str>) -> Resolution {
        if let Some(key) = self.types.get(&id) {
            return Resolution::Known(key.clone());
        }
        match basic {
            Some(name) => {
                let key = Key::builtin(name);
                self.types.insert(id, key.clone());
                self.journal.push(Registered::Type(id));
                self.stats.builtins += 1;
                Resolution::Builtin(key)
            }
            None => {
                let uuid = self.mint();
                let key = Key::type_(uuid);
                self.types.insert(id, key.clone());
                self.journal.push(Registered::Type(id));
                self.stats.types += 1;
                log::trace!("minted {key} for type {id}");
                Resolution::Minted(key)
            }
        }
    }

    pub fn object_key(&self, id: ObjectId) -> Option<&Key> {
        self.objects.get(&id)
    }

    pub fn type_key(&self, id: TypeId) -> Option<&Key> {
        self.types.get(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len() + self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.types.is_empty()
    }

    pub fn stats(&self) -> RegistryStats {
        self.stats
    }

    /// Number of entities registered since the last commit or rollback.
    pub fn pending(&self) -> usize {
        self.journal.len()
    }

    /// Keeps everything registered in the current pass.
    pub fn commit(&mut self) {
        self.journal.clear();
    }

    /// Forgets everything registered in the current pass, returning how many
    /// entries were dropped. Their bodies never reached storage, so the next pass
    /// must encode them again. The counters are taken back as well.
    pub fn rollback(&mut self) -> usize {
        let dropped = self.journal.len();
        for entry in self.journal.drain(..) {
            let (removed, counter) = match entry {
                Registered::Object(id) => (self.objects.remove(&id), &mut self.stats.objects),
                Registered::Type(id) => (self.types.remove(&id), &mut self.stats.types),
            };
            match removed {
                Some(key) if key.is_builtin() => {
                    self.stats.builtins = self.stats.builtins.saturating_sub(1);
                }
                Some(_) => *counter = counter.saturating_sub(1),
                None => {}
            }
        }
        dropped
    }
}
