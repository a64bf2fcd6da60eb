use xorn_types::{ObjectId, ValidationError};

/// Errors from store operations.
///
/// A failed operation never leaves a partial change behind: the revision is
/// exactly as it was before the call and remains usable.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// Mutation attempted on a finalized revision.
    #[error("revision is not transient")]
    RevisionNotTransient,

    /// The referenced object is not present in this revision.
    #[error("object does not exist: {0}")]
    ObjectDoesntExist(ObjectId),

    /// The attach target is not present in this revision.
    #[error("parent does not exist: {0}")]
    ParentDoesntExist(ObjectId),

    /// The attach target would create a cycle or is not a component.
    #[error("invalid parent: {0}")]
    InvalidParent(ObjectId),

    /// The insert-before object is not a child of the intended parent.
    #[error("successor is not a sibling: {0}")]
    SuccessorNotSibling(ObjectId),

    /// The payload failed validation.
    #[error("invalid object data: {0}")]
    InvalidObjectData(#[from] ValidationError),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
