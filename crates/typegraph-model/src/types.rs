use serde::{Deserialize, Serialize};

use crate::ids::{ObjectId, TypeId};

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChanDir {
    SendRecv,
    SendOnly,
    RecvOnly,
}

impl ChanDir {
    pub fn as_byte(self) -> u8 {
        match self {
            ChanDir::SendRecv => 0,
            ChanDir::SendOnly => 1,
            ChanDir::RecvOnly => 2,
        }
    }
}

/// A struct field together with its tag string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// The field's `Var` declaration.
    pub var: ObjectId,
    #[serde(default)]
    pub tag: String,
}

/// A type produced by the checker.
///
/// `Basic` types are atomic and identified by name alone. Every other variant is
/// composite and refers to its components by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    Basic {
        name: String,
    },
    Signature {
        /// A `Tuple` type.
        params: TypeId,
        /// A `Tuple` type.
        results: TypeId,
        recv: Option<ObjectId>,
        variadic: bool,
    },
    /// A defined type. The underlying type is `None` only while the checker is
    /// still building the cycle; a finished graph always has it set.
    Named {
        underlying: Option<TypeId>,
        obj: ObjectId,
        methods: Vec<ObjectId>,
    },
    Slice {
        elem: TypeId,
    },
    Pointer {
        elem: TypeId,
    },
    Interface {
        methods: Vec<ObjectId>,
        embeddeds: Vec<TypeId>,
    },
    Array {
        elem: TypeId,
        len: u64,
    },
    Struct {
        fields: Vec<Field>,
    },
    /// Ordered `Var` declarations, used for parameter and result lists.
    Tuple {
        vars: Vec<ObjectId>,
    },
    Map {
        key: TypeId,
        elem: TypeId,
    },
    Chan {
        elem: TypeId,
        dir: ChanDir,
    },
}

impl Type {
    pub fn is_basic(&self) -> bool {
        matches!(self, Type::Basic { .. })
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Type::Basic { .. } => "basic",
            Type::Signature { .. } => "signature",
            Type::Named { .. } => "named",
            Type::Slice { .. } => "slice",
            Type::Pointer { .. } => "pointer",
            Type::Interface { .. } => "interface",
            Type::Array { .. } => "array",
            Type::Struct { .. } => "struct",
            Type::Tuple { .. } => "tuple",
            Type::Map { .. } => "map",
            Type::Chan { .. } => "chan",
        }
    }
}
