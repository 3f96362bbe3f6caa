//! vg-graph: the virus genealogy.
//!
//! Provides:
//! - `VirusGenealogy`, a rooted multi-parent graph keyed by virus id
//! - A generational node arena standing in for shared ownership
//! - Transactional edge linking and structural validation
//!
//! # Example
//!
//! ```
//! use vg_graph::{Virus, VirusGenealogy};
//!
//! struct Flu(String);
//!
//! impl Virus for Flu {
//!     type Id = String;
//!     fn new(id: &String) -> Self {
//!         Flu(id.clone())
//!     }
//!     fn id(&self) -> String {
//!         self.0.clone()
//!     }
//! }
//!
//! let mut genealogy: VirusGenealogy<Flu> = VirusGenealogy::new(&"A".to_string());
//! genealogy.create(&"B".to_string(), &"A".to_string()).unwrap();
//! genealogy.create_multi(&"C".to_string(), &["A".to_string(), "B".to_string()]).unwrap();
//!
//! genealogy.remove(&"B".to_string()).unwrap();
//! assert_eq!(genealogy.parents_of(&"C".to_string()).unwrap(), vec!["A".to_string()]);
//! ```

pub mod arena;
pub mod error;
pub mod genealogy;
pub(crate) mod link;
pub(crate) mod node;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use arena::Arena;
pub use error::GraphError;
pub use genealogy::VirusGenealogy;
pub use vg_core::{VgError, VgResult, Virus};
