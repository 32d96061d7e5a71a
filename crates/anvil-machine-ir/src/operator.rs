//! Operator descriptors and their algebraic/effect properties.

use std::fmt;

use bitflags::bitflags;

use crate::opcode::Opcode;
use crate::rep::{MachineRepresentation, StoreRepresentation};

bitflags! {
    /// Algebraic and effect properties of an operator.
    ///
    /// Each bit licenses a specific optimizer transformation, so the
    /// assignments in the catalog are safety-critical: a spurious `PURE`
    /// lets the optimizer drop a required memory write, a spurious
    /// `COMMUTATIVE` lets it reorder operands unsoundly.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Properties: u8 {
        /// No observable side effect and deterministic in its inputs.
        /// Safe to hoist, deduplicate, or drop when unused.
        const PURE = 0b0000_0001;
        /// Operand order does not affect the result, so operands may be
        /// canonicalized for CSE matching.
        const COMMUTATIVE = 0b0000_0010;
        /// Chains of the same operator may be re-associated. Only ever set
        /// together with `COMMUTATIVE` in this catalog.
        const ASSOCIATIVE = 0b0000_0100;
        /// Does not read ambient memory. The value a store writes is an
        /// explicit input, not a read of ambient state.
        const NO_READ = 0b0000_1000;
        /// Does not write ambient memory.
        const NO_WRITE = 0b0001_0000;
        /// Cannot raise a machine-level fault, so the surrounding graph
        /// needs no exception edge for it.
        const NO_THROW = 0b0010_0000;
        // Higher bits are reserved for future effect kinds.
    }
}

/// Typed payload of a parameterized operator.
///
/// The parameter is part of the operator's identity: two `Load`s denote
/// the same operator iff their representations match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parameter {
    Representation(MachineRepresentation),
    Store(StoreRepresentation),
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Representation(rep) => write!(f, "{rep}"),
            Parameter::Store(store) => write!(f, "{store}"),
        }
    }
}

/// Immutable descriptor of one machine-level operation.
///
/// A descriptor is a plain value: constructing it is a pure function of
/// its fields, and two descriptors are interchangeable for
/// common-subexpression purposes iff opcode, properties, arity, and
/// parameter all compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OperatorData {
    pub opcode: Opcode,
    pub properties: Properties,
    /// Number of value inputs the operation consumes.
    pub inputs: u8,
    /// Number of value outputs the operation produces.
    pub outputs: u8,
    /// Diagnostic name; always the opcode's mnemonic.
    pub mnemonic: &'static str,
    pub parameter: Option<Parameter>,
}

impl OperatorData {
    /// Descriptor for an unparameterized operator.
    pub const fn simple(opcode: Opcode, properties: Properties, inputs: u8, outputs: u8) -> Self {
        Self {
            opcode,
            properties,
            inputs,
            outputs,
            mnemonic: opcode.mnemonic(),
            parameter: None,
        }
    }

    /// Descriptor for an operator whose identity includes a typed
    /// parameter.
    pub const fn with_parameter(
        opcode: Opcode,
        properties: Properties,
        inputs: u8,
        outputs: u8,
        parameter: Parameter,
    ) -> Self {
        Self {
            opcode,
            properties,
            inputs,
            outputs,
            mnemonic: opcode.mnemonic(),
            parameter: Some(parameter),
        }
    }

    pub fn is_pure(&self) -> bool {
        self.properties.contains(Properties::PURE)
    }

    pub fn is_commutative(&self) -> bool {
        self.properties.contains(Properties::COMMUTATIVE)
    }

    pub fn is_associative(&self) -> bool {
        self.properties.contains(Properties::ASSOCIATIVE)
    }

    /// Whether the scheduler must assume this operation reads ambient
    /// memory. Pure operations touch no ambient state at all.
    pub fn may_read_memory(&self) -> bool {
        !self.is_pure() && !self.properties.contains(Properties::NO_READ)
    }

    /// Whether the scheduler must assume this operation writes ambient
    /// memory.
    pub fn may_write_memory(&self) -> bool {
        !self.is_pure() && !self.properties.contains(Properties::NO_WRITE)
    }

    /// Whether an unused result makes the whole operation removable.
    pub fn is_eliminable(&self) -> bool {
        self.is_pure()
    }
}

impl fmt::Display for OperatorData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameter {
            None => f.write_str(self.mnemonic),
            Some(param) => write!(f, "{}[{}]", self.mnemonic, param),
        }
    }
}
