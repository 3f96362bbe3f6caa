use thiserror::Error;

pub type VgResult<T> = Result<T, VgError>;

/// Failures raised by genealogy operations.
///
/// Virus ids are carried in their `Debug` rendering so the error type does not
/// depend on the client's id type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VgError {
    #[error("Virus already created: {id}")]
    AlreadyExists { id: String },

    #[error("Virus not found: {id}")]
    NotFound { id: String },

    #[error("Tried to remove stem virus: {id}")]
    CannotRemoveStem { id: String },

    #[error("Stem virus {id} cannot be given a parent")]
    StemParent { id: String },

    #[error("Virus {id} must be created with at least one parent")]
    NoParents { id: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}

impl VgError {
    pub fn already_exists(id: &impl core::fmt::Debug) -> Self {
        VgError::AlreadyExists {
            id: format!("{:?}", id),
        }
    }

    pub fn not_found(id: &impl core::fmt::Debug) -> Self {
        VgError::NotFound {
            id: format!("{:?}", id),
        }
    }

    pub fn cannot_remove_stem(id: &impl core::fmt::Debug) -> Self {
        VgError::CannotRemoveStem {
            id: format!("{:?}", id),
        }
    }

    pub fn stem_parent(id: &impl core::fmt::Debug) -> Self {
        VgError::StemParent {
            id: format!("{:?}", id),
        }
    }

    pub fn no_parents(id: &impl core::fmt::Debug) -> Self {
        VgError::NoParents {
            id: format!("{:?}", id),
        }
    }

    pub fn invariant(what: impl Into<String>) -> Self {
        VgError::Invariant { what: what.into() }
    }
}
