//! The checked semantic graph of a program: declarations (objects), their types,
//! lexical scopes and packages.
//!
//! The type checker builds a [`Universe`] and hands it to the encoder read-only.
//! Every entity is stored in an arena and addressed by an opaque id, so identity
//! is the id and never structural equality. Cycles (a named type whose methods
//! mention the named type itself) are expressed by ids pointing back into the arena.

pub mod constant;
pub mod error;
pub mod ids;
pub mod objects;
pub mod scope;
pub mod source;
pub mod types;
pub mod universe;

pub use constant::{ConstValue, Rational};
pub use error::{SourceError, SourceResult};
pub use ids::{ObjectId, PackageId, ScopeId, TypeId};
pub use objects::{Object, ObjectKind};
pub use scope::{Package, Scope};
pub use source::PackageSource;
pub use types::{ChanDir, Field, Type};
pub use universe::Universe;
