//! Machine operator builder and the catalog signature table.
//!
//! The builder is a per-compilation factory: it borrows the descriptor
//! arena, is configured once with the target word width, and exposes one
//! named constructor per catalog entry. Because the arena interns,
//! repeated requests for the same operator return the same handle.

use anvil_core::WordWidth;

use crate::arena::{OperatorArena, OperatorRef};
use crate::opcode::Opcode;
use crate::operator::{OperatorData, Parameter, Properties};
use crate::rep::{MachineRepresentation, StoreRepresentation, WriteBarrierKind};

/// Signature of one unparameterized catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpSignature {
    pub opcode: Opcode,
    pub properties: Properties,
    pub inputs: u8,
    pub outputs: u8,
}

const PURE: Properties = Properties::PURE;
const PURE_C: Properties = Properties::PURE.union(Properties::COMMUTATIVE);
const PURE_AC: Properties = PURE_C.union(Properties::ASSOCIATIVE);

/// Declares the unparameterized portion of the catalog as one table and
/// generates the per-operator constructors from it, so arity and property
/// pairings exist in exactly one place.
macro_rules! catalog {
    ($($method:ident => $opcode:ident($props:expr, $inputs:literal, $outputs:literal);)*) => {
        /// The unparameterized catalog as data, in declaration order.
        pub const CATALOG: &[OpSignature] = &[
            $(OpSignature {
                opcode: Opcode::$opcode,
                properties: $props,
                inputs: $inputs,
                outputs: $outputs,
            },)*
        ];

        impl<'a> MachineOperatorBuilder<'a> {
            $(
                #[doc = concat!("`", stringify!($opcode), "` operator.")]
                pub fn $method(&mut self) -> OperatorRef {
                    self.simple(Opcode::$opcode)
                }
            )*
        }
    };
}

/// Builds machine-level operators: machine-level but machine-independent,
/// a vocabulary suitable for generating code on any of the supported
/// register widths.
pub struct MachineOperatorBuilder<'a> {
    arena: &'a mut OperatorArena,
    word: WordWidth,
}

impl<'a> MachineOperatorBuilder<'a> {
    /// Create a builder for the given target word width.
    ///
    /// Widths outside {32, 64} are unrepresentable in [`WordWidth`];
    /// configuration from a raw bit count goes through
    /// [`WordWidth::from_bits`], which is fatal on anything else.
    pub fn new(arena: &'a mut OperatorArena, word: WordWidth) -> Self {
        Self { arena, word }
    }

    /// Create a builder configured for the host platform's word width.
    pub fn host(arena: &'a mut OperatorArena) -> Self {
        Self::new(arena, WordWidth::host())
    }

    /// The configured word width.
    pub fn word(&self) -> WordWidth {
        self.word
    }

    fn simple(&mut self, opcode: Opcode) -> OperatorRef {
        let sig = signature(opcode);
        self.arena.intern(OperatorData::simple(
            sig.opcode,
            sig.properties,
            sig.inputs,
            sig.outputs,
        ))
    }

    /// `Load` operator: reads `[base + index]` in the given representation.
    pub fn load(&mut self, rep: MachineRepresentation) -> OperatorRef {
        self.arena.intern(OperatorData::with_parameter(
            Opcode::Load,
            Properties::NO_WRITE,
            2,
            1,
            Parameter::Representation(rep),
        ))
    }

    /// `Store` operator: writes `value` to `[base + index]`, performing
    /// the requested write barrier.
    pub fn store(&mut self, rep: MachineRepresentation, kind: WriteBarrierKind) -> OperatorRef {
        self.arena.intern(OperatorData::with_parameter(
            Opcode::Store,
            Properties::NO_READ,
            3,
            0,
            Parameter::Store(StoreRepresentation::new(rep, kind)),
        ))
    }

    // === Word-size generic operators ===
    // Each dispatches on the configured width. The match is exhaustive
    // over the two legal widths, so no per-call validation is needed.

    pub fn word_and(&mut self) -> OperatorRef {
        match self.word {
            WordWidth::W32 => self.word32_and(),
            WordWidth::W64 => self.word64_and(),
        }
    }

    pub fn word_or(&mut self) -> OperatorRef {
        match self.word {
            WordWidth::W32 => self.word32_or(),
            WordWidth::W64 => self.word64_or(),
        }
    }

    pub fn word_xor(&mut self) -> OperatorRef {
        match self.word {
            WordWidth::W32 => self.word32_xor(),
            WordWidth::W64 => self.word64_xor(),
        }
    }

    pub fn word_shl(&mut self) -> OperatorRef {
        match self.word {
            WordWidth::W32 => self.word32_shl(),
            WordWidth::W64 => self.word64_shl(),
        }
    }

    pub fn word_shr(&mut self) -> OperatorRef {
        match self.word {
            WordWidth::W32 => self.word32_shr(),
            WordWidth::W64 => self.word64_shr(),
        }
    }

    pub fn word_sar(&mut self) -> OperatorRef {
        match self.word {
            WordWidth::W32 => self.word32_sar(),
            WordWidth::W64 => self.word64_sar(),
        }
    }

    pub fn word_equal(&mut self) -> OperatorRef {
        match self.word {
            WordWidth::W32 => self.word32_equal(),
            WordWidth::W64 => self.word64_equal(),
        }
    }
}

/// Signature of an unparameterized opcode.
///
/// Panics for `Load` and `Store`: those carry a parameter and must be
/// built through their dedicated constructors.
fn signature(opcode: Opcode) -> OpSignature {
    match CATALOG.iter().find(|sig| sig.opcode == opcode) {
        Some(&sig) => sig,
        None => panic!("{} is not a simple machine operator", opcode.mnemonic()),
    }
}

catalog! {
    // Bitwise operators re-associate freely; shifts are order dependent.
    word32_and => Word32And(PURE_AC, 2, 1);
    word32_or => Word32Or(PURE_AC, 2, 1);
    word32_xor => Word32Xor(PURE_AC, 2, 1);
    word32_shl => Word32Shl(PURE, 2, 1);
    word32_shr => Word32Shr(PURE, 2, 1);
    word32_sar => Word32Sar(PURE, 2, 1);
    word32_equal => Word32Equal(PURE_C, 2, 1);

    word64_and => Word64And(PURE_AC, 2, 1);
    word64_or => Word64Or(PURE_AC, 2, 1);
    word64_xor => Word64Xor(PURE_AC, 2, 1);
    word64_shl => Word64Shl(PURE, 2, 1);
    word64_shr => Word64Shr(PURE, 2, 1);
    word64_sar => Word64Sar(PURE, 2, 1);
    word64_equal => Word64Equal(PURE_C, 2, 1);

    // Division and modulus may fault on a zero divisor in the generated
    // code; that is a backend concern, so they stay pure at this level.
    int32_add => Int32Add(PURE_AC, 2, 1);
    int32_sub => Int32Sub(PURE, 2, 1);
    int32_mul => Int32Mul(PURE_AC, 2, 1);
    int32_div => Int32Div(PURE, 2, 1);
    int32_udiv => Int32UDiv(PURE, 2, 1);
    int32_mod => Int32Mod(PURE, 2, 1);
    int32_umod => Int32UMod(PURE, 2, 1);
    int32_less_than => Int32LessThan(PURE, 2, 1);
    int32_less_than_or_equal => Int32LessThanOrEqual(PURE, 2, 1);
    uint32_less_than => Uint32LessThan(PURE, 2, 1);
    uint32_less_than_or_equal => Uint32LessThanOrEqual(PURE, 2, 1);

    int64_add => Int64Add(PURE_AC, 2, 1);
    int64_sub => Int64Sub(PURE, 2, 1);
    int64_mul => Int64Mul(PURE_AC, 2, 1);
    int64_div => Int64Div(PURE, 2, 1);
    int64_udiv => Int64UDiv(PURE, 2, 1);
    int64_mod => Int64Mod(PURE, 2, 1);
    int64_umod => Int64UMod(PURE, 2, 1);
    int64_less_than => Int64LessThan(PURE, 2, 1);
    int64_less_than_or_equal => Int64LessThanOrEqual(PURE, 2, 1);
    uint64_less_than => Uint64LessThan(PURE, 2, 1);
    uint64_less_than_or_equal => Uint64LessThanOrEqual(PURE, 2, 1);

    // Float-to-integer conversions truncate toward zero.
    convert_int32_to_int64 => ConvertInt32ToInt64(PURE, 1, 1);
    convert_int64_to_int32 => ConvertInt64ToInt32(PURE, 1, 1);
    convert_int32_to_float64 => ConvertInt32ToFloat64(PURE, 1, 1);
    convert_uint32_to_float64 => ConvertUint32ToFloat64(PURE, 1, 1);
    convert_float64_to_int32 => ConvertFloat64ToInt32(PURE, 1, 1);
    convert_float64_to_uint32 => ConvertFloat64ToUint32(PURE, 1, 1);

    // Float addition and multiplication commute, but IEEE-754 rounding
    // makes them non-associative, so they never get the ASSOCIATIVE bit.
    float64_add => Float64Add(PURE_C, 2, 1);
    float64_sub => Float64Sub(PURE, 2, 1);
    float64_mul => Float64Mul(PURE_C, 2, 1);
    float64_div => Float64Div(PURE, 2, 1);
    float64_mod => Float64Mod(PURE, 2, 1);
    float64_equal => Float64Equal(PURE_C, 2, 1);
    float64_less_than => Float64LessThan(PURE, 2, 1);
    float64_less_than_or_equal => Float64LessThanOrEqual(PURE, 2, 1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_every_unparameterized_opcode() {
        assert_eq!(CATALOG.len(), Opcode::ALL.len() - 2);
        let mut seen = std::collections::HashSet::new();
        for sig in CATALOG {
            assert!(!sig.opcode.is_parameterized());
            assert!(seen.insert(sig.opcode), "duplicate entry for {}", sig.opcode);
        }
    }

    #[test]
    fn every_catalog_entry_is_pure_with_one_output() {
        for sig in CATALOG {
            assert!(sig.properties.contains(Properties::PURE), "{}", sig.opcode);
            assert_eq!(sig.outputs, 1, "{}", sig.opcode);
            assert!(sig.inputs == 1 || sig.inputs == 2, "{}", sig.opcode);
        }
    }

    #[test]
    fn associative_entries_are_also_commutative() {
        for sig in CATALOG {
            if sig.properties.contains(Properties::ASSOCIATIVE) {
                assert!(
                    sig.properties.contains(Properties::COMMUTATIVE),
                    "{} is associative but not commutative",
                    sig.opcode,
                );
            }
        }
    }

    #[test]
    fn word_dispatch_selects_32bit_variants() {
        let mut arena = OperatorArena::new();
        let mut m = MachineOperatorBuilder::new(&mut arena, WordWidth::W32);
        assert_eq!(m.word_and(), m.word32_and());
        assert_eq!(m.word_or(), m.word32_or());
        assert_eq!(m.word_xor(), m.word32_xor());
        assert_eq!(m.word_shl(), m.word32_shl());
        assert_eq!(m.word_shr(), m.word32_shr());
        assert_eq!(m.word_sar(), m.word32_sar());
        assert_eq!(m.word_equal(), m.word32_equal());
    }

    #[test]
    fn word_dispatch_selects_64bit_variants() {
        let mut arena = OperatorArena::new();
        let mut m = MachineOperatorBuilder::new(&mut arena, WordWidth::W64);
        assert_eq!(m.word_and(), m.word64_and());
        assert_eq!(m.word_or(), m.word64_or());
        assert_eq!(m.word_xor(), m.word64_xor());
        assert_eq!(m.word_shl(), m.word64_shl());
        assert_eq!(m.word_shr(), m.word64_shr());
        assert_eq!(m.word_sar(), m.word64_sar());
        assert_eq!(m.word_equal(), m.word64_equal());
    }

    #[test]
    fn repeated_requests_intern_to_one_descriptor() {
        let mut arena = OperatorArena::new();
        {
            let mut m = MachineOperatorBuilder::new(&mut arena, WordWidth::W64);
            let a = m.int32_add();
            let b = m.int32_add();
            assert_eq!(a, b);
            let l1 = m.load(MachineRepresentation::Float64);
            let l2 = m.load(MachineRepresentation::Float64);
            assert_eq!(l1, l2);
            let l3 = m.load(MachineRepresentation::Word64);
            assert_ne!(l1, l3);
        }
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn builder_keeps_its_configured_width() {
        let mut arena = OperatorArena::new();
        let m = MachineOperatorBuilder::new(&mut arena, WordWidth::W32);
        assert_eq!(m.word(), WordWidth::W32);
    }

    #[test]
    fn host_builder_uses_host_width() {
        let mut arena = OperatorArena::new();
        let m = MachineOperatorBuilder::host(&mut arena);
        assert_eq!(m.word(), WordWidth::host());
    }

    #[test]
    #[should_panic(expected = "not a simple machine operator")]
    fn parameterized_opcodes_have_no_simple_signature() {
        let _ = signature(Opcode::Load);
    }
}
