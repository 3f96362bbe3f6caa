//! Contract between the genealogy and the client's entity type.

use core::fmt::Debug;

/// An entity stored at a genealogy node.
///
/// A virus is built from its id and reports that same id back for as long as
/// it lives. The id type must be cheap to clone and totally ordered; the
/// genealogy keeps its lookup tables sorted by it.
pub trait Virus {
    type Id: Clone + Ord + Debug;

    /// Construct the virus identified by `id`.
    fn new(id: &Self::Id) -> Self;

    /// The id this virus was constructed from.
    fn id(&self) -> Self::Id;
}
