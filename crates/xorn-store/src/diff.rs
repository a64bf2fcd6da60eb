//! Object-level differences between two revisions.
//!
//! Used by undo/redo and by views that refresh only what changed. An object
//! is *modified* when it is present in both revisions and either its obstate
//! instance or its location differs.

use std::sync::Arc;

use xorn_types::ObjectId;

use crate::revision::Revision;

/// Objects present in `to` but not in `from`, in `to` order.
pub fn get_added_objects(from: &Revision, to: &Revision) -> Vec<ObjectId> {
    to.get_objects()
        .into_iter()
        .filter(|id| !from.object_exists(id))
        .collect()
}

/// Objects present in `from` but not in `to`, in `from` order.
pub fn get_removed_objects(from: &Revision, to: &Revision) -> Vec<ObjectId> {
    from.get_objects()
        .into_iter()
        .filter(|id| !to.object_exists(id))
        .collect()
}

/// Objects present in both revisions whose payload or location changed,
/// in `to` order.
pub fn get_modified_objects(from: &Revision, to: &Revision) -> Vec<ObjectId> {
    to.get_objects()
        .into_iter()
        .filter(|id| is_modified(from, to, id))
        .collect()
}

fn is_modified(from: &Revision, to: &Revision, id: &ObjectId) -> bool {
    let (Some(old), Some(new)) = (from.get_obstate(id), to.get_obstate(id)) else {
        return false;
    };
    if !Arc::ptr_eq(old, new) {
        return true;
    }
    from.get_object_location(id).ok() != to.get_object_location(id).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use xorn_types::{SchComponent, SchLine, SchText};

    #[test]
    fn added_removed_modified() {
        let mut base = Revision::new();
        let kept = base.add_object(SchLine::default()).unwrap();
        let edited = base.add_object(SchLine::default()).unwrap();
        let removed = base.add_object(SchLine::default()).unwrap();
        base.finalize();

        let mut next = Revision::from_parent(&base);
        next.set_object_data(
            edited,
            SchLine {
                color: 3,
                ..Default::default()
            },
        )
        .unwrap();
        next.delete_object(removed).unwrap();
        let added = next.add_object(SchText::default()).unwrap();

        assert_eq!(get_added_objects(&base, &next), vec![added]);
        assert_eq!(get_removed_objects(&base, &next), vec![removed]);
        assert_eq!(get_modified_objects(&base, &next), vec![edited]);
        assert!(!get_modified_objects(&base, &next).contains(&kept));
    }

    #[test]
    fn relocation_counts_as_modification() {
        let mut base = Revision::new();
        let comp = base.add_object(SchComponent::default()).unwrap();
        let attr = base.add_object(SchText::default()).unwrap();
        base.finalize();

        let mut next = Revision::from_parent(&base);
        next.relocate_object(attr, Some(comp), None).unwrap();
        assert_eq!(get_modified_objects(&base, &next), vec![attr]);
    }

    #[test]
    fn identical_revisions_have_no_changes() {
        let mut base = Revision::new();
        base.add_object(SchLine::default()).unwrap();
        let same = Revision::from_parent(&base);
        assert!(get_added_objects(&base, &same).is_empty());
        assert!(get_removed_objects(&base, &same).is_empty());
        assert!(get_modified_objects(&base, &same).is_empty());
    }
}
