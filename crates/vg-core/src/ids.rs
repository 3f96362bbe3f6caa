use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable slot index used by the node arena.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Id>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Largest index an `Id` can carry.
    pub const MAX_INDEX: u32 = u32::MAX - 1;

    /// Create an Id from a 0-based index by storing index+1.
    ///
    /// Indices above [`Id::MAX_INDEX`] saturate; callers bound their slot count.
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Non-owning handle to an arena slot.
///
/// Carries the generation the slot had when the handle was issued. Once the
/// slot is freed its generation moves on and the handle stops resolving.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId {
    id: Id,
    generation: u32,
}

impl SlotId {
    pub fn new(id: Id, generation: u32) -> Self {
        Self { id, generation }
    }

    pub fn id(self) -> Id {
        self.id
    }

    /// 0-based slot index.
    pub fn index(self) -> usize {
        self.id.index() as usize
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotId({}v{})", self.id.index(), self.generation)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.id.index(), self.generation)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn index_survives_any_value(i in 0..=Id::MAX_INDEX) {
            prop_assert_eq!(Id::from_index(i).index(), i);
        }
    }
}
