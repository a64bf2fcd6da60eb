//! Revisions: ordered snapshots of the object table.
//!
//! A [`Revision`] is either transient (editable) or finalized (frozen). New
//! revisions start empty or as a fork of an existing revision; a fork shares
//! the parent's table until its first write, after which it owns a private
//! copy whose entries still point at the parent's obstates.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};
use xorn_types::{ObjectData, ObjectId, ObjectType, Payload};

use crate::error::{StoreError, StoreResult};
use crate::obstate::ObState;
use crate::relocate::{self, check_placement, Placement};
use crate::selection::Selection;
use crate::table::ObjectTable;

pub struct Revision {
    table: Arc<ObjectTable>,
    transient: bool,
}

impl Revision {
    /// Create an empty transient revision.
    pub fn new() -> Self {
        Self {
            table: Arc::new(ObjectTable::new()),
            transient: true,
        }
    }

    /// Create a transient revision holding the current contents of `parent`.
    ///
    /// `parent` may be finalized or transient. Later changes to either
    /// revision are invisible to the other.
    pub fn from_parent(parent: &Revision) -> Self {
        debug!(objects = parent.len(), "forked revision");
        Self {
            table: Arc::clone(&parent.table),
            transient: true,
        }
    }

    pub fn is_transient(&self) -> bool {
        self.transient
    }

    /// Freeze this revision. Every later mutation fails with
    /// [`StoreError::RevisionNotTransient`]. Finalizing twice is harmless.
    pub fn finalize(&mut self) {
        if self.transient {
            debug!(objects = self.len(), "finalized revision");
        }
        self.transient = false;
    }

    /// Number of objects in this revision.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    // ---------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------

    pub fn object_exists(&self, id: &ObjectId) -> bool {
        self.table.contains(id)
    }

    pub fn get_object_type(&self, id: &ObjectId) -> Option<ObjectType> {
        self.table.get(id).map(|entry| entry.object_type())
    }

    pub fn get_object_data(&self, id: &ObjectId) -> Option<&ObjectData> {
        self.table.get(id).map(|entry| entry.state.data())
    }

    /// Payload of `id` as `T`, or `None` if the object is absent or of a
    /// different type.
    pub fn get_data<T: Payload>(&self, id: &ObjectId) -> Option<&T> {
        self.table.get(id).and_then(|entry| entry.state.get::<T>())
    }

    /// The shared obstate currently installed for `id`.
    pub fn get_obstate(&self, id: &ObjectId) -> Option<&Arc<ObState>> {
        self.table.get(id).map(|entry| &entry.state)
    }

    /// Parent of `id` (or `None` at top level) and its index among siblings.
    pub fn get_object_location(&self, id: &ObjectId) -> StoreResult<(Option<ObjectId>, usize)> {
        let entry = self
            .table
            .get(id)
            .ok_or(StoreError::ObjectDoesntExist(*id))?;
        let position = self
            .table
            .position(id)
            .ok_or(StoreError::ObjectDoesntExist(*id))?;
        Ok((entry.parent, position))
    }

    /// Every object, each top-level object followed by its attached
    /// children (recursively).
    pub fn get_objects(&self) -> Vec<ObjectId> {
        self.table.preorder()
    }

    /// Objects directly attached to `parent` (top-level objects for `None`),
    /// in order.
    pub fn get_objects_attached_to(&self, parent: Option<ObjectId>) -> Vec<ObjectId> {
        self.table.siblings(parent).to_vec()
    }

    /// Objects of `sel` present in this revision, in [`get_objects`] order.
    ///
    /// [`get_objects`]: Revision::get_objects
    pub fn get_selected_objects(&self, sel: &Selection) -> Vec<ObjectId> {
        self.table
            .preorder()
            .into_iter()
            .filter(|id| sel.contains(id))
            .collect()
    }

    // ---------------------------------------------------------------
    // Writes
    // ---------------------------------------------------------------

    /// Add an object at the end of the top level.
    pub fn add_object(&mut self, data: impl Into<ObjectData>) -> StoreResult<ObjectId> {
        self.add_object_at(data, None, None)
    }

    /// Add an object attached to `attach_to` (or at top level), before
    /// `insert_before` (or at the end).
    pub fn add_object_at(
        &mut self,
        data: impl Into<ObjectData>,
        attach_to: Option<ObjectId>,
        insert_before: Option<ObjectId>,
    ) -> StoreResult<ObjectId> {
        self.ensure_transient()?;
        let placement = Placement::new(attach_to, insert_before);
        check_placement(&self.table, None, placement)?;
        let state = ObState::create(data)?;

        let id = ObjectId::new();
        let ty = state.object_type();
        self.table_mut().insert(id, state, attach_to, insert_before);
        debug!(object = %id.short_id(), %ty, "added object");
        Ok(id)
    }

    /// Replace the payload of an existing object.
    ///
    /// The type may change, except that an object with attached children
    /// must remain a container. If the normalized payload equals the stored
    /// one, the existing obstate is kept.
    pub fn set_object_data(&mut self, id: ObjectId, data: impl Into<ObjectData>) -> StoreResult<()> {
        self.set_objects_data(vec![(id, data.into())])
    }

    /// Replace the payloads of several objects at once. Either every payload
    /// is installed or none is.
    pub fn set_objects_data(&mut self, updates: Vec<(ObjectId, ObjectData)>) -> StoreResult<()> {
        self.ensure_transient()?;

        let mut staged = Vec::with_capacity(updates.len());
        for (id, data) in updates {
            let entry = self
                .table
                .get(&id)
                .ok_or(StoreError::ObjectDoesntExist(id))?;
            if !data.object_type().is_container() && self.table.has_children(&id) {
                return Err(StoreError::InvalidParent(id));
            }
            let state = ObState::create(data)?;
            if *state == *entry.state {
                continue;
            }
            staged.push((id, state));
        }

        if staged.is_empty() {
            return Ok(());
        }
        let table = self.table_mut();
        for (id, state) in staged {
            table.set_state(&id, state);
            debug!(object = %id.short_id(), "modified object");
        }
        Ok(())
    }

    /// Delete an object together with everything attached to it.
    pub fn delete_object(&mut self, id: ObjectId) -> StoreResult<()> {
        self.ensure_transient()?;
        if !self.table.contains(&id) {
            return Err(StoreError::ObjectDoesntExist(id));
        }
        let removed = self.table_mut().remove_subtree(&id);
        debug!(object = %id.short_id(), count = removed.len(), "deleted object");
        Ok(())
    }

    /// Delete every selected object present in this revision, with their
    /// attached children. Objects absent from the revision are ignored.
    pub fn delete_objects(&mut self, sel: &Selection) -> StoreResult<()> {
        self.ensure_transient()?;
        let targets = self.get_selected_objects(sel);
        if targets.is_empty() {
            return Ok(());
        }
        let table = self.table_mut();
        let mut count = 0;
        for id in targets {
            count += table.remove_subtree(&id).len();
        }
        debug!(count, "deleted selected objects");
        Ok(())
    }

    /// Move `id` to be a child of `attach_to` (or to the top level),
    /// immediately before `insert_before` (or at the end).
    pub fn relocate_object(
        &mut self,
        id: ObjectId,
        attach_to: Option<ObjectId>,
        insert_before: Option<ObjectId>,
    ) -> StoreResult<()> {
        self.ensure_transient()?;
        let placement = Placement::new(attach_to, insert_before);
        check_placement(&self.table, Some(id), placement)?;
        relocate::apply(self.table_mut(), id, placement);
        debug!(object = %id.short_id(), "relocated object");
        Ok(())
    }

    /// Copy `id` and its attached children from `src` to the end of this
    /// revision's top level. The copies share their obstates with `src`.
    pub fn copy_object(&mut self, src: &Revision, id: ObjectId) -> StoreResult<ObjectId> {
        self.ensure_transient()?;
        if !src.table.contains(&id) {
            return Err(StoreError::ObjectDoesntExist(id));
        }
        let new_id = copy_subtree(self.table_mut(), &src.table, id);
        debug!(from = %id.short_id(), to = %new_id.short_id(), "copied object");
        Ok(new_id)
    }

    /// Copy every selected object of `src` (with attached children) to the
    /// end of this revision's top level. Objects whose ancestor is also
    /// selected are copied only as part of that ancestor. Returns the new
    /// top-level copies.
    pub fn copy_objects(&mut self, src: &Revision, sel: &Selection) -> StoreResult<Selection> {
        self.ensure_transient()?;
        let roots: Vec<ObjectId> = src
            .get_selected_objects(sel)
            .into_iter()
            .filter(|id| !has_selected_ancestor(&src.table, sel, id))
            .collect();
        if roots.is_empty() {
            return Ok(Selection::none());
        }
        let table = self.table_mut();
        let copies: Selection = roots
            .into_iter()
            .map(|id| copy_subtree(table, &src.table, id))
            .collect();
        debug!(count = copies.len(), "copied selected objects");
        Ok(copies)
    }

    fn ensure_transient(&self) -> StoreResult<()> {
        if self.transient {
            Ok(())
        } else {
            Err(StoreError::RevisionNotTransient)
        }
    }

    /// Unique access to the table, copying it first if it is still shared
    /// with another revision.
    fn table_mut(&mut self) -> &mut ObjectTable {
        if Arc::strong_count(&self.table) > 1 {
            trace!(objects = self.table.len(), "copying shared object table");
        }
        Arc::make_mut(&mut self.table)
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Revision")
            .field("transient", &self.transient)
            .field("object_count", &self.len())
            .finish()
    }
}

fn has_selected_ancestor(table: &ObjectTable, sel: &Selection, id: &ObjectId) -> bool {
    let mut current = table.get(id).and_then(|e| e.parent);
    while let Some(parent) = current {
        if sel.contains(&parent) {
            return true;
        }
        current = table.get(&parent).and_then(|e| e.parent);
    }
    false
}

/// Copy the subtree rooted at `root` from `src` into `dest` at the end of
/// the top level, minting fresh identities. `root` must exist in `src`.
fn copy_subtree(dest: &mut ObjectTable, src: &ObjectTable, root: ObjectId) -> ObjectId {
    let mut mapping: HashMap<ObjectId, ObjectId> = HashMap::new();
    for old in src.subtree(&root) {
        let Some(entry) = src.get(&old) else {
            continue;
        };
        let new = ObjectId::new();
        let parent = if old == root {
            None
        } else {
            entry.parent.and_then(|p| mapping.get(&p).copied())
        };
        dest.insert(new, Arc::clone(&entry.state), parent, None);
        mapping.insert(old, new);
    }
    mapping.get(&root).copied().unwrap_or(root)
}
