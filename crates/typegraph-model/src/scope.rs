use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ids::{ObjectId, PackageId, ScopeId};

/// A lexical scope: name bindings plus nested child scopes.
///
/// Bindings keep the order in which the checker inserted them, which is the
/// order the encoder enumerates them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    #[serde(default)]
    pub bindings: IndexMap<String, ObjectId>,
    #[serde(default)]
    pub children: Vec<ScopeId>,
}

impl Scope {
    pub fn lookup(&self, name: &str) -> Option<ObjectId> {
        self.bindings.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// A compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Import path, unique within a universe.
    pub path: String,
    /// Declared package name.
    pub name: String,
    /// Directly imported packages.
    #[serde(default)]
    pub imports: Vec<PackageId>,
    /// Root lexical scope.
    pub scope: ScopeId,
}
