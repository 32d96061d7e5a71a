//! Target word-width configuration.
//!
//! The operator layer only needs to know whether the target's general
//! purpose registers are 32 or 64 bits wide. Encoding the width as a closed
//! enum enforces the legality check once, at the configuration boundary,
//! instead of in every operator constructor.

use derive_more::Display;
use target_lexicon::{PointerWidth, Triple};

/// Width of the target's native machine word.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum WordWidth {
    /// 32-bit general purpose registers.
    #[display("w32")]
    W32,
    /// 64-bit general purpose registers.
    #[display("w64")]
    W64,
}

impl WordWidth {
    /// Convert a raw bit count into a word width.
    ///
    /// Panics on anything other than 32 or 64. An unsupported width means
    /// the compiler itself was misconfigured, which is not recoverable and
    /// must not be reported as an error in the program being compiled.
    pub fn from_bits(bits: u32) -> Self {
        match bits {
            32 => WordWidth::W32,
            64 => WordWidth::W64,
            _ => panic!("unsupported machine word width: {bits} (expected 32 or 64)"),
        }
    }

    /// Word width of the given target triple.
    pub fn from_triple(triple: &Triple) -> Self {
        match triple.pointer_width() {
            Ok(PointerWidth::U32) => WordWidth::W32,
            Ok(PointerWidth::U64) => WordWidth::W64,
            // 16-bit and unknown targets are not supported by this backend;
            // default to 64-bit like the rest of the toolchain.
            _ => WordWidth::W64,
        }
    }

    /// Word width of the host platform.
    pub fn host() -> Self {
        Self::from_triple(&Triple::host())
    }

    /// Number of bits in the machine word.
    pub const fn bits(self) -> u32 {
        match self {
            WordWidth::W32 => 32,
            WordWidth::W64 => 64,
        }
    }

    /// Number of bytes in the machine word.
    pub const fn bytes(self) -> u32 {
        self.bits() / 8
    }

    pub const fn is_32(self) -> bool {
        matches!(self, WordWidth::W32)
    }

    pub const fn is_64(self) -> bool {
        matches!(self, WordWidth::W64)
    }
}
