//! Machine-level operator catalog for the anvil compiler backend.
//!
//! The operators built here are machine-level but machine-independent:
//! they form the vocabulary a lowered IR graph is built from, together
//! with the algebraic and effect properties the optimizer consults to
//! decide whether two nodes may be merged, reordered, or eliminated.
//! Property assignments are safety-critical; see [`operator::Properties`].

pub mod arena;
pub mod builder;
pub mod opcode;
pub mod operator;
pub mod rep;

pub use arena::{OperatorArena, OperatorRef};
pub use builder::{CATALOG, MachineOperatorBuilder, OpSignature};
pub use opcode::Opcode;
pub use operator::{OperatorData, Parameter, Properties};
pub use rep::{MachineRepresentation, StoreRepresentation, WriteBarrierKind};
