//! Transactional, versioned object store for schematic documents.
//!
//! A document is a sequence of [`Revision`]s. Each revision maps stable
//! [`ObjectId`]s to an immutable, reference-counted [`ObState`] plus a
//! location (parent and position among siblings). Revisions are created as
//! *transient* children of a previous revision, edited, and then finalized;
//! a finalized revision never changes again and can be read concurrently
//! while its children are being edited.
//!
//! # Design Rules
//!
//! 1. Every operation either fully succeeds or leaves the revision exactly as
//!    it was. All checks run before the first write.
//! 2. Payloads are validated, then normalized, then installed. The store owns
//!    its copy; callers' values are moved in, never aliased.
//! 3. A forked revision shares its parent's object table until its first
//!    write; unchanged objects keep sharing the same obstate forever.
//! 4. Only components may have attached children. An object can never be
//!    attached below itself.
//! 5. Deleting an object deletes everything attached to it.
//!
//! # Modules
//!
//! - [`obstate`]: validated, normalized payload snapshots
//! - [`table`]: the copy-on-write object table and sibling ordering
//! - [`relocate`]: placement checks for attach, detach and reorder
//! - [`revision`]: the public read/write API
//! - [`selection`]: immutable sets of objects
//! - [`diff`]: added/removed/modified objects between revisions

pub mod diff;
pub mod error;
pub mod obstate;
pub mod relocate;
pub mod revision;
pub mod selection;
pub mod table;

pub use diff::{get_added_objects, get_modified_objects, get_removed_objects};
pub use error::{StoreError, StoreResult};
pub use obstate::ObState;
pub use revision::Revision;
pub use selection::Selection;
pub use xorn_types::{ObjectData, ObjectId, ObjectType};
