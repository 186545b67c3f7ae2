//! Recursive encoding of declarations, types and scopes into staged writes.
//!
//! [`Encoder`] borrows the universe being encoded, the graph's [`Registry`] and the
//! [`WriteBatch`] of the current pass. Every `object`/`ty` call goes through the
//! registry first; only a freshly minted key leads to the body being encoded.

mod objects;
mod scopes;
mod types;

use typegraph_model::{Object, ObjectId, Scope, ScopeId, Type, TypeId, Universe};

use crate::batch::WriteBatch;
use crate::error::{GraphError, GraphResult};
use crate::keys::Key;
use crate::registry::Registry;

pub use objects::{encode_constant, ValueKind};

/// One-byte tag leading every framed declaration and composite type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
    Func = 0,
    Var = 1,
    TypeName = 2,
    Const = 3,
    PkgName = 4,

    Signature = 5,
    Named = 6,
    Slice = 7,
    Pointer = 8,
    Interface = 9,
    Array = 10,
    Struct = 11,
    Tuple = 12,
    Map = 13,
    Chan = 14,
}

impl Kind {
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Kind> {
        use Kind::*;
        const ALL: [Kind; 15] = [
            Func, Var, TypeName, Const, PkgName, Signature, Named, Slice, Pointer, Interface,
            Array, Struct, Tuple, Map, Chan,
        ];
        ALL.get(tag as usize).copied()
    }
}

pub struct Encoder<'a> {
    universe: &'a Universe,
    registry: &'a mut Registry,
    batch: &'a mut WriteBatch,
}

impl<'a> Encoder<'a> {
    pub fn new(universe: &'a Universe, registry: &'a mut Registry, batch: &'a mut WriteBatch) -> Self {
        Encoder {
            universe,
            registry,
            batch,
        }
    }

    /// The key of declaration `id`, encoding and staging it on first sight.
    pub fn object(&mut self, id: ObjectId) -> GraphResult<Key> {
        let universe = self.universe;
        let obj = self.lookup_object(id)?;
        let package = match obj.package {
            Some(pkg) => Some(
                universe
                    .package(pkg)
                    .ok_or_else(|| dangling("package", pkg))?
                    .path
                    .as_str(),
            ),
            None => None,
        };
        let resolution = self.registry.resolve_object(id, &obj.name, package);
        if resolution.needs_body() {
            let key = resolution.key().clone();
            let body = self.object_body(obj)?;
            self.batch.set(key, body);
        }
        Ok(resolution.into_key())
    }

    /// The key of type `id`, encoding and staging it on first sight.
    pub fn ty(&mut self, id: TypeId) -> GraphResult<Key> {
        let ty = self.lookup_type(id)?;
        let basic = match ty {
            Type::Basic { name } => Some(name.as_str()),
            _ => None,
        };
        let resolution = self.registry.resolve_type(id, basic);
        if resolution.needs_body() {
            let key = resolution.key().clone();
            let body = self.type_body(id, ty)?;
            self.batch.set(key, body);
        }
        Ok(resolution.into_key())
    }

    /// Encodes the scope tree rooted at `id` for the package at `package`,
    /// returning the root node's key.
    pub fn scope(&mut self, package: &str, id: ScopeId) -> GraphResult<Key> {
        self.scope_tree(package, id)
    }

    fn lookup_object(&self, id: ObjectId) -> GraphResult<&'a Object> {
        let universe: &'a Universe = self.universe;
        universe.object(id).ok_or_else(|| dangling("object", id))
    }

    fn lookup_type(&self, id: TypeId) -> GraphResult<&'a Type> {
        let universe: &'a Universe = self.universe;
        universe.ty(id).ok_or_else(|| dangling("type", id))
    }

    fn lookup_scope(&self, id: ScopeId) -> GraphResult<&'a Scope> {
        let universe: &'a Universe = self.universe;
        universe.scope(id).ok_or_else(|| dangling("scope", id))
    }
}

fn dangling(entity: &'static str, id: impl ToString) -> GraphError {
    GraphError::DanglingReference {
        entity,
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_round_trip() {
        for tag in 0..15u8 {
            assert_eq!(Kind::from_tag(tag).map(Kind::tag), Some(tag));
        }
        assert_eq!(Kind::from_tag(15), None);
        assert_eq!(Kind::Chan.tag(), 14);
    }
}
