//! Machine-level storage representations.

use derive_more::Display;

/// Storage representation of a value at the machine level.
///
/// Words are uninterpreted bits of a fixed size, normally allocated to
/// general purpose registers and ignored by the garbage collector. Floats
/// live in floating point registers and are likewise untracked. `Tagged`
/// values are the size of a heap reference and are tracked precisely by
/// the collector.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum MachineRepresentation {
    #[display("Word8")]
    Word8,
    #[display("Word16")]
    Word16,
    #[display("Word32")]
    Word32,
    #[display("Word64")]
    Word64,
    #[display("Float64")]
    Float64,
    #[display("Tagged")]
    Tagged,
}

impl MachineRepresentation {
    /// Every representation, in declaration order.
    pub const ALL: [MachineRepresentation; 6] = [
        MachineRepresentation::Word8,
        MachineRepresentation::Word16,
        MachineRepresentation::Word32,
        MachineRepresentation::Word64,
        MachineRepresentation::Float64,
        MachineRepresentation::Tagged,
    ];

    /// Whether the garbage collector must track values of this
    /// representation.
    pub const fn is_tagged(self) -> bool {
        matches!(self, MachineRepresentation::Tagged)
    }
}

/// Whether a store must notify the garbage collector of a potential new
/// reference.
///
/// Only meaningful together with [`MachineRepresentation::Tagged`]. The
/// combination is a documented contract between the backend and the
/// collector, not one the type system enforces.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum WriteBarrierKind {
    #[display("NoWriteBarrier")]
    NoWriteBarrier,
    #[display("FullWriteBarrier")]
    FullWriteBarrier,
}

/// Representation and barrier requirement of a store.
///
/// Bundled because a store's legality and cost depend on both together:
/// the representation selects the machine instruction, the barrier kind
/// selects the collector bookkeeping emitted around it.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
#[display("{rep}, {write_barrier_kind}")]
pub struct StoreRepresentation {
    pub rep: MachineRepresentation,
    pub write_barrier_kind: WriteBarrierKind,
}

impl StoreRepresentation {
    pub const fn new(rep: MachineRepresentation, write_barrier_kind: WriteBarrierKind) -> Self {
        Self {
            rep,
            write_barrier_kind,
        }
    }

    /// Store without collector bookkeeping, the common case for untagged
    /// representations.
    pub const fn no_barrier(rep: MachineRepresentation) -> Self {
        Self::new(rep, WriteBarrierKind::NoWriteBarrier)
    }
}
