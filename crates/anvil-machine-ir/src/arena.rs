//! Interning arena for operator descriptors.
//!
//! Descriptors live for the whole compilation unit and are never freed
//! individually; the arena drops them en masse. Interning means a handle
//! comparison is equivalent to the structural equality the node layer
//! relies on for deduplication.

use std::collections::HashMap;

use cranelift_entity::{PrimaryMap, entity_impl};

use crate::operator::OperatorData;

/// Reference to an interned operator descriptor.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperatorRef(u32);
entity_impl!(OperatorRef, "op");

/// Deduplicating descriptor arena. Same `OperatorData` always yields the
/// same `OperatorRef`.
///
/// The intern table is private to one arena, which is used by exactly one
/// compilation at a time; nothing here is shared across threads.
pub struct OperatorArena {
    ops: PrimaryMap<OperatorRef, OperatorData>,
    dedup: HashMap<OperatorData, OperatorRef>,
}

impl OperatorArena {
    pub fn new() -> Self {
        Self {
            ops: PrimaryMap::new(),
            dedup: HashMap::new(),
        }
    }

    /// Intern a descriptor, returning an existing ref if the data matches.
    pub fn intern(&mut self, data: OperatorData) -> OperatorRef {
        if let Some(&existing) = self.dedup.get(&data) {
            return existing;
        }
        let r = self.ops.push(data.clone());
        self.dedup.insert(data, r);
        r
    }

    /// Look up descriptor data by reference.
    pub fn get(&self, r: OperatorRef) -> &OperatorData {
        &self.ops[r]
    }

    /// Number of distinct descriptors allocated so far.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl Default for OperatorArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::Opcode;
    use crate::operator::Properties;

    #[test]
    fn operator_interner_dedup() {
        let mut arena = OperatorArena::new();
        let data = OperatorData::simple(Opcode::Word32And, Properties::PURE, 2, 1);
        let r1 = arena.intern(data.clone());
        let r2 = arena.intern(data);
        assert_eq!(r1, r2, "same OperatorData must yield same OperatorRef");
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn distinct_data_gets_distinct_refs() {
        let mut arena = OperatorArena::new();
        let r1 = arena.intern(OperatorData::simple(Opcode::Int32Add, Properties::PURE, 2, 1));
        let r2 = arena.intern(OperatorData::simple(Opcode::Int64Add, Properties::PURE, 2, 1));
        assert_ne!(r1, r2);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(r1).opcode, Opcode::Int32Add);
        assert_eq!(arena.get(r2).opcode, Opcode::Int64Add);
    }

    #[test]
    fn empty_arena() {
        let arena = OperatorArena::new();
        assert!(arena.is_empty());
        assert_eq!(arena.len(), 0);
    }
}
