//! vg-core: shared foundation for the virus genealogy.
//!
//! Contains:
//! - ids (compact arena slot handles with generations)
//! - virus (the entity contract clients implement)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod virus;

pub use error::{VgError, VgResult};
pub use ids::*;
pub use virus::Virus;
