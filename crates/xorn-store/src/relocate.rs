//! Placement rules for attaching, detaching and reordering objects.
//!
//! The checks run in a fixed order so that the reported error is
//! deterministic: existence first, then parent validity (cycles and
//! container type), then sibling order. There is no shortcut for moves that
//! would leave the object where it is; they pass or fail by the same rules.

use xorn_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::table::ObjectTable;

/// A target location: a parent (or the top level) and an optional successor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Placement {
    pub attach_to: Option<ObjectId>,
    pub insert_before: Option<ObjectId>,
}

impl Placement {
    /// End of the top level.
    pub const fn top_level() -> Self {
        Self {
            attach_to: None,
            insert_before: None,
        }
    }

    pub const fn new(attach_to: Option<ObjectId>, insert_before: Option<ObjectId>) -> Self {
        Self {
            attach_to,
            insert_before,
        }
    }
}

/// Check that `object` (or a new object, for `None`) may be placed at
/// `placement` in `table`.
pub fn check_placement(
    table: &ObjectTable,
    object: Option<ObjectId>,
    placement: Placement,
) -> StoreResult<()> {
    if let Some(id) = object {
        if !table.contains(&id) {
            return Err(StoreError::ObjectDoesntExist(id));
        }
    }
    if let Some(parent) = placement.attach_to {
        if !table.contains(&parent) {
            return Err(StoreError::ParentDoesntExist(parent));
        }
    }
    if let Some(succ) = placement.insert_before {
        if !table.contains(&succ) {
            return Err(StoreError::ObjectDoesntExist(succ));
        }
    }

    if let Some(parent) = placement.attach_to {
        if let Some(id) = object {
            if table.is_ancestor_or_self(&id, &parent) {
                return Err(StoreError::InvalidParent(parent));
            }
        }
        let is_container = table
            .get(&parent)
            .is_some_and(|entry| entry.object_type().is_container());
        if !is_container {
            return Err(StoreError::InvalidParent(parent));
        }
    }

    if let Some(succ) = placement.insert_before {
        let succ_parent = table.get(&succ).and_then(|entry| entry.parent);
        if succ_parent != placement.attach_to {
            return Err(StoreError::SuccessorNotSibling(succ));
        }
    }

    Ok(())
}

/// Check and apply a relocation of an existing object.
///
/// Never touches the object's obstate.
pub fn relocate(table: &mut ObjectTable, id: ObjectId, placement: Placement) -> StoreResult<()> {
    check_placement(table, Some(id), placement)?;
    apply(table, id, placement);
    Ok(())
}

/// Apply a relocation that [`check_placement`] has already accepted.
pub fn apply(table: &mut ObjectTable, id: ObjectId, placement: Placement) {
    // Inserting an object before itself keeps it in place: anchor on the
    // sibling that currently follows it instead.
    let insert_before = if placement.insert_before == Some(id) {
        let siblings = table.siblings(placement.attach_to);
        table
            .position(&id)
            .and_then(|index| siblings.get(index + 1))
            .copied()
    } else {
        placement.insert_before
    };

    table.relink(id, placement.attach_to, insert_before);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstate::ObState;
    use xorn_types::{SchComponent, SchNet, SchText};

    struct Fixture {
        table: ObjectTable,
        comp: ObjectId,
        net: ObjectId,
        text: ObjectId,
    }

    /// A component, a net and a text, all at top level in that order.
    fn fixture() -> Fixture {
        let mut table = ObjectTable::new();
        let (comp, net, text) = (ObjectId::new(), ObjectId::new(), ObjectId::new());
        table.insert(comp, ObState::create(SchComponent::default()).unwrap(), None, None);
        table.insert(net, ObState::create(SchNet::default()).unwrap(), None, None);
        table.insert(text, ObState::create(SchText::default()).unwrap(), None, None);
        Fixture {
            table,
            comp,
            net,
            text,
        }
    }

    #[test]
    fn missing_references() {
        let f = fixture();
        let ghost = ObjectId::new();
        assert_eq!(
            check_placement(&f.table, Some(ghost), Placement::top_level()),
            Err(StoreError::ObjectDoesntExist(ghost))
        );
        assert_eq!(
            check_placement(&f.table, Some(f.text), Placement::new(Some(ghost), None)),
            Err(StoreError::ParentDoesntExist(ghost))
        );
        assert_eq!(
            check_placement(&f.table, Some(f.text), Placement::new(None, Some(ghost))),
            Err(StoreError::ObjectDoesntExist(ghost))
        );
    }

    #[test]
    fn self_attach_is_invalid_parent() {
        let mut f = fixture();
        let err = relocate(&mut f.table, f.comp, Placement::new(Some(f.comp), Some(f.comp)));
        assert_eq!(err, Err(StoreError::InvalidParent(f.comp)));
        let err = relocate(&mut f.table, f.comp, Placement::new(Some(f.comp), None));
        assert_eq!(err, Err(StoreError::InvalidParent(f.comp)));
    }

    #[test]
    fn non_container_parent_is_invalid() {
        let mut f = fixture();
        assert_eq!(
            relocate(&mut f.table, f.text, Placement::new(Some(f.net), None)),
            Err(StoreError::InvalidParent(f.net))
        );
    }

    #[test]
    fn cycle_is_invalid_parent() {
        let mut f = fixture();
        let inner = ObjectId::new();
        f.table.insert(
            inner,
            ObState::create(SchComponent::default()).unwrap(),
            Some(f.comp),
            None,
        );
        assert_eq!(
            relocate(&mut f.table, f.comp, Placement::new(Some(inner), None)),
            Err(StoreError::InvalidParent(inner))
        );
    }

    #[test]
    fn parent_checks_precede_sibling_checks() {
        let mut f = fixture();
        // text is not a child of net, but net is not a container either
        assert_eq!(
            relocate(&mut f.table, f.comp, Placement::new(Some(f.net), Some(f.text))),
            Err(StoreError::InvalidParent(f.net))
        );
    }

    #[test]
    fn successor_must_share_parent() {
        let mut f = fixture();
        assert_eq!(
            relocate(&mut f.table, f.text, Placement::new(Some(f.comp), Some(f.comp))),
            Err(StoreError::SuccessorNotSibling(f.comp))
        );
        assert_eq!(
            relocate(&mut f.table, f.text, Placement::new(Some(f.comp), Some(f.net))),
            Err(StoreError::SuccessorNotSibling(f.net))
        );
    }

    #[test]
    fn reorder_top_level() {
        let mut f = fixture();
        relocate(&mut f.table, f.comp, Placement::top_level()).unwrap();
        assert_eq!(f.table.siblings(None), &[f.net, f.text, f.comp]);
        relocate(&mut f.table, f.comp, Placement::new(None, Some(f.net))).unwrap();
        assert_eq!(f.table.siblings(None), &[f.comp, f.net, f.text]);
    }

    #[test]
    fn insert_before_self_keeps_position() {
        let mut f = fixture();
        relocate(&mut f.table, f.net, Placement::new(None, Some(f.net))).unwrap();
        assert_eq!(f.table.siblings(None), &[f.comp, f.net, f.text]);
        relocate(&mut f.table, f.text, Placement::new(None, Some(f.text))).unwrap();
        assert_eq!(f.table.siblings(None), &[f.comp, f.net, f.text]);
    }

    #[test]
    fn attach_and_detach() {
        let mut f = fixture();
        relocate(&mut f.table, f.text, Placement::new(Some(f.comp), None)).unwrap();
        assert_eq!(f.table.preorder(), vec![f.comp, f.text, f.net]);
        relocate(&mut f.table, f.net, Placement::new(Some(f.comp), Some(f.text))).unwrap();
        assert_eq!(f.table.siblings(Some(f.comp)), &[f.net, f.text]);
        relocate(&mut f.table, f.text, Placement::top_level()).unwrap();
        assert_eq!(f.table.preorder(), vec![f.comp, f.net, f.text]);
        assert_eq!(f.table.get(&f.text).unwrap().parent, None);
    }

    /// Pre-order after a successful move of `id` within a table whose
    /// objects all start at top level.
    fn expected_order(
        before: &[ObjectId],
        id: ObjectId,
        attach_to: Option<ObjectId>,
        insert_before: Option<ObjectId>,
    ) -> Vec<ObjectId> {
        if attach_to.is_none() && insert_before == Some(id) {
            return before.to_vec();
        }
        let mut order: Vec<ObjectId> = before.iter().copied().filter(|o| *o != id).collect();
        let index = match (attach_to, insert_before) {
            (Some(parent), _) => order.iter().position(|o| *o == parent).map(|i| i + 1),
            (None, Some(succ)) => order.iter().position(|o| *o == succ),
            (None, None) => None,
        };
        order.insert(index.unwrap_or(order.len()), id);
        order
    }

    #[test]
    fn every_triple_over_fixture() {
        let f = fixture();
        let ids = [f.comp, f.net, f.text];
        for &id in &ids {
            for attach_to in std::iter::once(None).chain(ids.iter().copied().map(Some)) {
                for insert_before in std::iter::once(None).chain(ids.iter().copied().map(Some)) {
                    let mut table = f.table.clone();
                    let before = table.preorder();
                    let result = relocate(&mut table, id, Placement::new(attach_to, insert_before));

                    let expected = match attach_to {
                        Some(p) if p == id || p != f.comp => Err(StoreError::InvalidParent(p)),
                        _ => match insert_before {
                            Some(s) if attach_to.is_some() => {
                                Err(StoreError::SuccessorNotSibling(s))
                            }
                            _ => Ok(()),
                        },
                    };
                    assert_eq!(result, expected, "{id:?} {attach_to:?} {insert_before:?}");
                    if result.is_err() {
                        assert_eq!(table.preorder(), before);
                    } else {
                        assert_eq!(table.get(&id).unwrap().parent, attach_to);
                        assert_eq!(table.len(), 3);
                        assert_eq!(
                            table.preorder(),
                            expected_order(&before, id, attach_to, insert_before),
                            "{id:?} {attach_to:?} {insert_before:?}"
                        );
                    }
                }
            }
        }
    }

    // ---------------------------------------------------------------
    // Random move sequences
    // ---------------------------------------------------------------

    use proptest::prelude::*;

    fn assert_consistent(table: &ObjectTable) {
        let order = table.preorder();
        assert_eq!(order.len(), table.len());
        for id in table.ids() {
            assert_eq!(order.iter().filter(|o| *o == id).count(), 1);
            let parent = table.get(id).unwrap().parent;
            let index = table.position(id).unwrap();
            assert_eq!(table.siblings(parent)[index], *id);
            if let Some(parent) = parent {
                assert!(table.get(&parent).unwrap().object_type().is_container());
            }
        }
    }

    proptest! {
        #[test]
        fn moves_keep_tree_consistent(
            moves in prop::collection::vec((0..4usize, 0..5usize, 0..5usize), 1..40)
        ) {
            let mut f = fixture();
            let outer = ObjectId::new();
            f.table.insert(outer, ObState::create(SchComponent::default()).unwrap(), None, None);
            let ids = [f.comp, f.net, f.text, outer];
            let pick = |i: usize| ids.get(i).copied();

            for (id, attach_to, insert_before) in moves {
                let before = f.table.preorder();
                let placement = Placement::new(pick(attach_to), pick(insert_before));
                if relocate(&mut f.table, ids[id], placement).is_err() {
                    prop_assert_eq!(f.table.preorder(), before);
                }
                assert_consistent(&f.table);
            }
        }
    }
}
