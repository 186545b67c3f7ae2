//! Persists the checked semantic graph of a program into a sorted key-value store.
//!
//! Declarations, types and scopes reference each other freely, including cycles
//! through named types. The encoder flattens that web into key-value pairs with
//! no duplication: every entity is keyed by identity through the [`Registry`],
//! which hands out a key *before* the entity's body is encoded, so a cycle comes
//! back to an existing key instead of recursing forever. Values are framed with
//! the length-prefixed format in [`frame`].
//!
//! [`Graph`] drives the whole thing one package at a time and writes each package
//! as a single atomic batch.

pub mod batch;
pub mod config;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod graph;
pub mod keys;
pub mod registry;

pub use batch::WriteBatch;
pub use config::{GraphConfig, IdStrategy, IngestConfig, StoreConfig};
pub use encoder::{Encoder, Kind, ValueKind};
pub use error::{ConfigError, FrameError, FrameResult, GraphError, GraphResult};
pub use frame::{frame, unframe, Framer};
pub use graph::{Graph, PackageState};
pub use keys::Key;
pub use registry::{Registry, Resolution};
