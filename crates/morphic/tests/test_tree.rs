//! Tree structure invariants under arbitrary sequences of edits.

#[cfg(test)]
mod tests {
    use morphic::{
        Core, Morph, NodeId,
        error::{Error, Result},
        geom::{Point, Rect},
        preferences::Preferences,
        widgets::Plain,
    };
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize, usize),
        Detach(usize),
        Destroy(usize),
        Copy(usize),
        Create,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..32, 0usize..32).prop_map(|(a, b)| Op::Add(a, b)),
            (0usize..32).prop_map(Op::Detach),
            (0usize..32).prop_map(Op::Destroy),
            (0usize..32).prop_map(Op::Copy),
            Just(Op::Create),
        ]
    }

    fn new_core() -> (Core, Vec<NodeId>) {
        let mut core = Core::new(Point::new(300.0, 300.0), Preferences::default());
        let mut ids = vec![core.world()];
        for i in 0..4 {
            let x = f64::from(i) * 20.0;
            ids.push(core.create(Morph::new(Plain).bounds(Rect::from_xywh(x, x, 30.0, 30.0))));
        }
        (core, ids)
    }

    fn apply(core: &mut Core, ids: &mut Vec<NodeId>, op: &Op) {
        let pick = |i: usize| ids[i % ids.len()];
        match op {
            Op::Add(p, c) => {
                let (parent, child) = (pick(*p), pick(*c));
                let out = core.add(parent, child);
                if child == core.world() && core.contains(parent) {
                    assert_eq!(out, Err(Error::World("reparented")));
                } else if core.contains(parent) && core.contains(child) && out.is_ok() {
                    assert_eq!(core.parent_of(child), Some(parent));
                }
            }
            Op::Detach(i) => {
                let id = pick(*i);
                if id != core.world() && core.detach(id).is_ok() {
                    assert_eq!(core.parent_of(id), None);
                }
            }
            Op::Destroy(i) => {
                let id = pick(*i);
                if id != core.world() {
                    assert!(core.destroy(id).is_ok());
                    assert!(!core.contains(id));
                }
            }
            Op::Copy(i) => {
                let id = pick(*i);
                if id != core.world() && core.contains(id) {
                    if let Ok(copy) = core.full_copy(id) {
                        assert_eq!(core.parent_of(copy), None);
                        assert_eq!(core.all_children(copy).len(), core.all_children(id).len());
                        ids.push(copy);
                    }
                }
            }
            Op::Create => ids.push(core.create(Plain)),
        }
    }

    proptest! {
        #[test]
        fn edits_keep_the_tree_consistent(ops in prop::collection::vec(op(), 1..80)) {
            let (mut core, mut ids) = new_core();
            for op in &ops {
                apply(&mut core, &mut ids, op);
                prop_assert!(core.validate_tree().is_ok());
                for id in ids.iter().filter(|id| core.contains(**id)) {
                    let listed = core
                        .node(*id)
                        .into_iter()
                        .flat_map(|n| n.children().to_vec())
                        .all(|c| core.parent_of(c) == Some(*id));
                    prop_assert!(listed);
                }
            }
        }
    }

    #[test]
    fn a_morph_has_one_parent() -> Result<()> {
        let (mut core, ids) = new_core();
        let (a, b, c) = (ids[1], ids[2], ids[3]);
        core.add(core.world(), a)?;
        core.add(core.world(), b)?;
        core.add(a, c)?;
        core.add(b, c)?;
        assert!(!core.children_of(a).contains(&c));
        assert_eq!(core.children_of(b), vec![c]);
        assert_eq!(core.all_parents(c), vec![c, b, core.world()]);
        assert_eq!(core.world_of(c), Some(core.world()));
        core.detach(b)?;
        assert_eq!(core.world_of(c), None);
        assert_eq!(core.root_of(c), b);
        Ok(())
    }

    #[test]
    fn cycles_are_refused() -> Result<()> {
        let (mut core, ids) = new_core();
        let (a, b) = (ids[1], ids[2]);
        core.add(a, b)?;
        assert!(matches!(core.add(b, a), Err(Error::Cycle(_))));
        assert!(matches!(core.add(a, a), Err(Error::Cycle(_))));
        assert_eq!(core.parent_of(a), None);
        core.validate_tree()
    }

    #[test]
    fn destroying_clears_focus() -> Result<()> {
        let (mut core, ids) = new_core();
        let (a, b) = (ids[1], ids[2]);
        core.add(core.world(), a)?;
        core.add(a, b)?;
        core.set_keyboard_focus(Some(b));
        core.destroy(a)?;
        assert_eq!(core.keyboard_focus(), None);
        assert!(!core.contains(b));
        assert_eq!(core.destroy(core.world()), Err(Error::World("destroyed")));
        Ok(())
    }
}
