use pretty_assertions::assert_eq;

use crate::instr::MirOp;
use crate::source::SourceInfo;
use crate::test_helpers::{block, cfg_body, i, jump, l, t, trivial_body, v};

use super::*;

fn labels(map: &BlockMap) -> Vec<&str> {
    map.labels().map(BlockLabel::as_str).collect()
}

// Block map

#[test]
fn insertion_order_is_iteration_order() {
    let map: BlockMap = ["entry", "b3", "b1", "exit"]
        .into_iter()
        .map(|name| block(name, vec![]))
        .collect();
    assert_eq!(labels(&map), vec!["entry", "b3", "b1", "exit"]);
    assert_eq!(map.len(), 4);
    assert_eq!(map.index_of(&l("b1")), Some(2));
}

#[test]
fn insert_existing_label_replaces_in_place() {
    let mut map: BlockMap = ["entry", "mid", "exit"]
        .into_iter()
        .map(|name| block(name, vec![]))
        .collect();
    let old = map.insert(block("mid", vec![jump("exit")]));
    assert_eq!(old.map(|b| b.len()), Some(0));
    assert_eq!(labels(&map), vec!["entry", "mid", "exit"]);
    assert_eq!(map.get(&l("mid")).map(MirBlock::len), Some(1));
}

#[test]
fn remove_keeps_remaining_order_and_index() {
    let mut map: BlockMap = ["a", "b", "c", "d"]
        .into_iter()
        .map(|name| block(name, vec![]))
        .collect();
    assert!(map.remove(&l("b")).is_some());
    assert!(map.remove(&l("b")).is_none());
    assert_eq!(labels(&map), vec!["a", "c", "d"]);
    assert_eq!(map.index_of(&l("d")), Some(2));
    assert_eq!(map.get(&l("d")).map(|b| b.label().as_str()), Some("d"));
    assert!(!map.contains(&l("b")));
}

#[test]
fn ops_mut_edits_instruction_list() {
    let mut map: BlockMap = std::iter::once(block("entry", vec![])).collect();
    if let Some(ops) = map.ops_mut(&l("entry")) {
        ops.clear();
        ops.push(i(jump("exit")));
    }
    assert_eq!(map.get(&l("entry")).map(MirBlock::len), Some(1));
    for (_, ops) in map.iter_mut() {
        ops.pop();
    }
    assert!(map.iter().all(MirBlock::is_empty));
    assert!(map.ops_mut(&l("ghost")).is_none());
}

#[test]
fn mutable_access_keeps_labels_indexed() {
    let mut map: BlockMap = ["entry", "a", "exit"]
        .into_iter()
        .map(|name| block(name, vec![]))
        .collect();
    for (label, ops) in map.iter_mut() {
        if label.as_str() == "a" {
            ops.push(i(jump("exit")));
        }
    }
    // Replacing a block goes through `insert`, which keeps the index.
    map.insert(block("a", vec![jump("entry")]));
    map.insert(block("z", vec![]));

    assert_eq!(labels(&map), vec!["entry", "a", "exit", "z"]);
    for (idx, label) in ["entry", "a", "exit", "z"].into_iter().enumerate() {
        assert!(map.contains(&l(label)));
        assert_eq!(map.index_of(&l(label)), Some(idx));
        assert_eq!(map.get(&l(label)).map(|b| b.label().as_str()), Some(label));
    }
}

#[test]
fn empty_map() {
    let map = BlockMap::new();
    assert!(map.is_empty());
    assert!(map.get(&l("entry")).is_none());
    assert!(map.get_index(0).is_none());
}

// Body

#[test]
fn primitive_body_has_no_blocks() {
    let mut body = MirBody::new_primitive(
        "core.ori",
        SourceInfo::at(3, 1),
        vec!["this".to_owned()],
        "list_size",
    );
    assert!(body.is_primitive());
    assert!(body.blocks().is_none());
    assert!(body.blocks_mut().is_none());
    assert_eq!(body.payload(), &MirPayload::Primitive("list_size".into()));
    assert_eq!(body.max_temp_id(), None);
}

#[test]
fn cfg_body_accessors() {
    let body = MirBody::new_blocks(
        "main.ori",
        SourceInfo::at(10, 5),
        vec!["y".to_owned(), "x".to_owned(), "y".to_owned()],
        vec![block("entry", vec![jump("exit")]), block("exit", vec![])],
    );
    assert!(!body.is_primitive());
    assert_eq!(body.file(), "main.ori");
    assert_eq!(body.sinfo().line, 10);
    let names: Vec<&str> = body.var_names().iter().map(String::as_str).collect();
    assert_eq!(names, vec!["x", "y"]);
    assert_eq!(body.blocks().map(BlockMap::len), Some(2));
}

#[test]
fn duplicate_labels_collapse_at_construction() {
    let body = cfg_body(vec![
        block("entry", vec![]),
        block("exit", vec![]),
        block("entry", vec![jump("exit")]),
    ]);
    let map = body.blocks().cloned().unwrap_or_default();
    assert_eq!(labels(&map), vec!["entry", "exit"]);
    assert_eq!(map.get(&l("entry")).map(MirBlock::len), Some(1));
}

#[test]
fn payload_mut_swaps_to_primitive() {
    let mut body = trivial_body();
    *body.payload_mut() = MirPayload::Primitive("native".into());
    assert!(body.is_primitive());
}

#[test]
fn temp_allocator_resumes_after_max() {
    let body = cfg_body(vec![
        block(
            "entry",
            vec![
                MirOp::RegAssign {
                    src: v(3),
                    trgt: t(5),
                },
                jump("exit"),
            ],
        ),
        block("exit", vec![MirOp::ReturnAssign { src: v(7) }]),
    ]);
    assert_eq!(body.max_temp_id(), Some(t(7)));
    let mut alloc = body.temp_allocator();
    assert_eq!(alloc.fresh(), Some(t(8)));
    assert_eq!(trivial_body().temp_allocator().fresh(), Some(t(0)));
}

#[test]
fn temp_allocator_on_max_temp_body_is_exhausted() {
    let body = cfg_body(vec![
        block(
            "entry",
            vec![
                MirOp::LoadConst {
                    src: crate::arg::MirConstant::True,
                    trgt: t(u32::MAX),
                },
                jump("exit"),
            ],
        ),
        block("exit", vec![]),
    ]);
    assert_eq!(body.max_temp_id(), Some(t(u32::MAX)));
    let mut alloc = body.temp_allocator();
    assert!(alloc.is_exhausted());
    assert_eq!(alloc.fresh(), None);
}
