use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Identity of a declaration inside a [`crate::Universe`].
    ObjectId, "o"
);
arena_id!(
    /// Identity of a type instance. Two structurally equal types with different
    /// ids are distinct entities.
    TypeId, "t"
);
arena_id!(
    /// Identity of a lexical scope node.
    ScopeId, "s"
);
arena_id!(
    /// Identity of a package.
    PackageId, "p"
);
