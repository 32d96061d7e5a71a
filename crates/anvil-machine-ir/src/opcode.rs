//! The closed opcode space of the machine operator catalog.

use std::fmt;

macro_rules! opcodes {
    ($($name:ident,)*) => {
        /// Opcode of a machine-level operator.
        ///
        /// The set is closed: every operator the builder can produce draws
        /// its identity from this enumeration and nowhere else.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Opcode {
            $($name,)*
        }

        impl Opcode {
            /// Every opcode, in catalog order.
            pub const ALL: &'static [Opcode] = &[$(Opcode::$name,)*];

            /// Human-readable mnemonic used in diagnostics and IR dumps.
            pub const fn mnemonic(self) -> &'static str {
                match self {
                    $(Opcode::$name => stringify!($name),)*
                }
            }
        }
    };
}

opcodes! {
    // Memory.
    Load,
    Store,

    // Fixed-width bitwise, shifts, and word equality.
    Word32And,
    Word32Or,
    Word32Xor,
    Word32Shl,
    Word32Shr,
    Word32Sar,
    Word32Equal,
    Word64And,
    Word64Or,
    Word64Xor,
    Word64Shl,
    Word64Shr,
    Word64Sar,
    Word64Equal,

    // Integer arithmetic and comparisons.
    Int32Add,
    Int32Sub,
    Int32Mul,
    Int32Div,
    Int32UDiv,
    Int32Mod,
    Int32UMod,
    Int32LessThan,
    Int32LessThanOrEqual,
    Uint32LessThan,
    Uint32LessThanOrEqual,
    Int64Add,
    Int64Sub,
    Int64Mul,
    Int64Div,
    Int64UDiv,
    Int64Mod,
    Int64UMod,
    Int64LessThan,
    Int64LessThanOrEqual,
    Uint64LessThan,
    Uint64LessThanOrEqual,

    // Conversions.
    ConvertInt32ToInt64,
    ConvertInt64ToInt32,
    ConvertInt32ToFloat64,
    ConvertUint32ToFloat64,
    ConvertFloat64ToInt32,
    ConvertFloat64ToUint32,

    // Floating point arithmetic and comparisons.
    Float64Add,
    Float64Sub,
    Float64Mul,
    Float64Div,
    Float64Mod,
    Float64Equal,
    Float64LessThan,
    Float64LessThanOrEqual,
}

impl Opcode {
    /// Whether this opcode carries a typed parameter as part of its
    /// identity.
    pub const fn is_parameterized(self) -> bool {
        matches!(self, Opcode::Load | Opcode::Store)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
