//! The object table: identity → (obstate, location).
//!
//! A table is plain data. Revisions hold it behind an `Arc` and clone it on
//! their first write, which gives each revision its own table while every
//! entry still shares its obstate with the table it was copied from.
//!
//! # Invariants
//!
//! - Every entry's parent, if any, is itself an entry.
//! - Every entry appears exactly once in exactly one sibling list: the list
//!   of its parent, or the top-level list.
//! - Sibling lists contain no identities absent from `entries`.

use std::collections::HashMap;
use std::sync::Arc;

use xorn_types::{ObjectId, ObjectType};

use crate::obstate::ObState;

/// One object in one table.
#[derive(Clone, Debug)]
pub struct Entry {
    pub state: Arc<ObState>,
    pub parent: Option<ObjectId>,
}

impl Entry {
    pub fn object_type(&self) -> ObjectType {
        self.state.object_type()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ObjectTable {
    entries: HashMap<ObjectId, Entry>,
    /// Ordered children per parent; the `None` key is the top level.
    children: HashMap<Option<ObjectId>, Vec<ObjectId>>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &ObjectId) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ObjectId> {
        self.entries.keys()
    }

    // ---------------------------------------------------------------
    // Ordering
    // ---------------------------------------------------------------

    /// Ordered children of `parent`, or the top-level objects for `None`.
    pub fn siblings(&self, parent: Option<ObjectId>) -> &[ObjectId] {
        self.children
            .get(&parent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `id` has at least one attached child.
    pub fn has_children(&self, id: &ObjectId) -> bool {
        !self.siblings(Some(*id)).is_empty()
    }

    /// Index of `id` among its siblings.
    pub fn position(&self, id: &ObjectId) -> Option<usize> {
        let entry = self.entries.get(id)?;
        self.siblings(entry.parent).iter().position(|s| s == id)
    }

    /// Whether `ancestor` is `id` itself or one of its (transitive) parents.
    pub fn is_ancestor_or_self(&self, ancestor: &ObjectId, id: &ObjectId) -> bool {
        let mut current = Some(*id);
        while let Some(cur) = current {
            if cur == *ancestor {
                return true;
            }
            current = self.entries.get(&cur).and_then(|e| e.parent);
        }
        false
    }

    /// All objects in pre-order: each top-level object followed by its
    /// attached children, recursively.
    pub fn preorder(&self) -> Vec<ObjectId> {
        let mut out = Vec::with_capacity(self.entries.len());
        for id in self.siblings(None) {
            self.collect_subtree(id, &mut out);
        }
        out
    }

    /// `id` followed by all of its descendants, in pre-order.
    pub fn subtree(&self, id: &ObjectId) -> Vec<ObjectId> {
        let mut out = Vec::new();
        if self.contains(id) {
            self.collect_subtree(id, &mut out);
        }
        out
    }

    fn collect_subtree(&self, id: &ObjectId, out: &mut Vec<ObjectId>) {
        out.push(*id);
        for child in self.siblings(Some(*id)) {
            self.collect_subtree(child, out);
        }
    }

    // ---------------------------------------------------------------
    // Mutation
    //
    // These primitives do not check placement rules; callers run the
    // checks in `relocate` first.
    // ---------------------------------------------------------------

    /// Insert a new entry at the given location.
    pub fn insert(
        &mut self,
        id: ObjectId,
        state: Arc<ObState>,
        parent: Option<ObjectId>,
        insert_before: Option<ObjectId>,
    ) {
        self.entries.insert(id, Entry { state, parent });
        self.link(id, parent, insert_before);
    }

    /// Replace the obstate of an existing entry, returning the old one.
    pub fn set_state(&mut self, id: &ObjectId, state: Arc<ObState>) -> Option<Arc<ObState>> {
        self.entries
            .get_mut(id)
            .map(|entry| std::mem::replace(&mut entry.state, state))
    }

    /// Move an existing entry to a new location.
    pub fn relink(
        &mut self,
        id: ObjectId,
        parent: Option<ObjectId>,
        insert_before: Option<ObjectId>,
    ) {
        self.unlink(&id);
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.parent = parent;
        }
        self.link(id, parent, insert_before);
    }

    /// Remove `id` and everything attached below it. Returns the removed
    /// identities in pre-order.
    pub fn remove_subtree(&mut self, id: &ObjectId) -> Vec<ObjectId> {
        let removed = self.subtree(id);
        if removed.is_empty() {
            return removed;
        }
        self.unlink(id);
        for gone in &removed {
            self.entries.remove(gone);
            self.children.remove(&Some(*gone));
        }
        removed
    }

    fn unlink(&mut self, id: &ObjectId) {
        let Some(parent) = self.entries.get(id).map(|e| e.parent) else {
            return;
        };
        if let Some(list) = self.children.get_mut(&parent) {
            list.retain(|s| s != id);
            if list.is_empty() {
                self.children.remove(&parent);
            }
        }
    }

    fn link(&mut self, id: ObjectId, parent: Option<ObjectId>, insert_before: Option<ObjectId>) {
        let list = self.children.entry(parent).or_default();
        let index = insert_before
            .and_then(|succ| list.iter().position(|s| *s == succ))
            .unwrap_or(list.len());
        list.insert(index, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xorn_types::{SchComponent, SchText};

    fn text() -> Arc<ObState> {
        ObState::create(SchText::default()).unwrap()
    }

    fn component() -> Arc<ObState> {
        ObState::create(SchComponent::default()).unwrap()
    }

    #[test]
    fn insert_appends_or_precedes() {
        let mut table = ObjectTable::new();
        let (a, b, c) = (ObjectId::new(), ObjectId::new(), ObjectId::new());
        table.insert(a, text(), None, None);
        table.insert(b, text(), None, None);
        table.insert(c, text(), None, Some(b));
        assert_eq!(table.siblings(None), &[a, c, b]);
        assert_eq!(table.position(&b), Some(2));
    }

    #[test]
    fn preorder_visits_children_after_parent() {
        let mut table = ObjectTable::new();
        let (p, x, y, z) = (ObjectId::new(), ObjectId::new(), ObjectId::new(), ObjectId::new());
        table.insert(p, component(), None, None);
        table.insert(z, text(), None, None);
        table.insert(x, text(), Some(p), None);
        table.insert(y, text(), Some(p), None);
        assert_eq!(table.preorder(), vec![p, x, y, z]);
        assert_eq!(table.subtree(&p), vec![p, x, y]);
        assert!(table.has_children(&p));
        assert!(!table.has_children(&z));
    }

    #[test]
    fn ancestry() {
        let mut table = ObjectTable::new();
        let (p, q, x) = (ObjectId::new(), ObjectId::new(), ObjectId::new());
        table.insert(p, component(), None, None);
        table.insert(q, component(), Some(p), None);
        table.insert(x, text(), Some(q), None);
        assert!(table.is_ancestor_or_self(&p, &x));
        assert!(table.is_ancestor_or_self(&x, &x));
        assert!(!table.is_ancestor_or_self(&x, &p));
    }

    #[test]
    fn remove_subtree_cleans_up_lists() {
        let mut table = ObjectTable::new();
        let (p, x, y) = (ObjectId::new(), ObjectId::new(), ObjectId::new());
        table.insert(p, component(), None, None);
        table.insert(x, text(), Some(p), None);
        table.insert(y, text(), None, None);

        let removed = table.remove_subtree(&p);
        assert_eq!(removed, vec![p, x]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.siblings(None), &[y]);
        assert!(table.siblings(Some(p)).is_empty());
        assert!(table.remove_subtree(&p).is_empty());
    }

    #[test]
    fn relink_moves_between_lists() {
        let mut table = ObjectTable::new();
        let (p, x) = (ObjectId::new(), ObjectId::new());
        table.insert(p, component(), None, None);
        table.insert(x, text(), None, None);
        table.relink(x, Some(p), None);
        assert_eq!(table.siblings(None), &[p]);
        assert_eq!(table.siblings(Some(p)), &[x]);
        assert_eq!(table.get(&x).unwrap().parent, Some(p));
    }

    #[test]
    fn cloned_table_shares_obstates() {
        let mut table = ObjectTable::new();
        let a = ObjectId::new();
        table.insert(a, text(), None, None);
        let copy = table.clone();
        assert!(Arc::ptr_eq(
            &table.get(&a).unwrap().state,
            &copy.get(&a).unwrap().state
        ));
    }
}
