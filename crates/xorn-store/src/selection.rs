//! Immutable sets of objects.
//!
//! A selection is not tied to a revision: it may name objects that do not
//! exist in the revision it is later applied to, and those are ignored.

use std::collections::BTreeSet;

use xorn_types::ObjectId;

use crate::revision::Revision;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<ObjectId>,
}

impl Selection {
    /// The empty selection.
    pub fn none() -> Self {
        Self::default()
    }

    /// A selection holding exactly `id`.
    pub fn object(id: ObjectId) -> Self {
        Self {
            ids: BTreeSet::from([id]),
        }
    }

    /// Every object directly attached to `parent`, or every top-level
    /// object for `None`.
    pub fn attached_to(rev: &Revision, parent: Option<ObjectId>) -> Self {
        rev.get_objects_attached_to(parent).into_iter().collect()
    }

    /// Every object in `rev`.
    pub fn all(rev: &Revision) -> Self {
        rev.get_objects().into_iter().collect()
    }

    /// Every object in `rev` that is not in `sel`.
    pub fn all_except(rev: &Revision, sel: &Selection) -> Self {
        rev.get_objects()
            .into_iter()
            .filter(|id| !sel.contains(id))
            .collect()
    }

    /// This selection plus `id`.
    pub fn including(&self, id: ObjectId) -> Self {
        let mut ids = self.ids.clone();
        ids.insert(id);
        Self { ids }
    }

    /// This selection without `id`.
    pub fn excluding(&self, id: ObjectId) -> Self {
        let mut ids = self.ids.clone();
        ids.remove(&id);
        Self { ids }
    }

    pub fn union(&self, other: &Selection) -> Self {
        self.ids.union(&other.ids).copied().collect()
    }

    pub fn intersection(&self, other: &Selection) -> Self {
        self.ids.intersection(&other.ids).copied().collect()
    }

    pub fn difference(&self, other: &Selection) -> Self {
        self.ids.difference(&other.ids).copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectId> {
        self.ids.iter()
    }
}

impl FromIterator<ObjectId> for Selection {
    fn from_iter<I: IntoIterator<Item = ObjectId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
