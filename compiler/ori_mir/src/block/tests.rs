use pretty_assertions::assert_eq;

use crate::arg::MirArgument;
use crate::instr::MirOp;
use crate::keys::ResolvedTypeKey;
use crate::test_helpers::{at, block, cjump, jump, l, t, v};

use super::*;

fn lifetime_end(name: &str) -> MirOp {
    MirOp::VarLifetimeEnd { name: name.into() }
}

#[test]
fn empty_block_has_no_terminator() {
    let b = MirBlock::empty(l("exit"));
    assert!(b.is_empty());
    assert_eq!(b.first_line(), None);
    assert!(b.terminator().is_none());
    assert!(b.successors().is_empty());
}

#[test]
fn terminator_is_final_jump() {
    let b = block(
        "entry",
        vec![
            MirOp::RegAssign {
                src: MirArgument::bool(true),
                trgt: t(0),
            },
            cjump(v(0), "then", "else"),
        ],
    );
    let term = b.terminator().map(|instr| instr.tag());
    assert_eq!(term, Some(crate::instr::MirOpTag::JumpCond));
    let succ: Vec<&str> = b.successors().iter().map(|s| s.as_str()).collect();
    assert_eq!(succ, vec!["then", "else"]);
}

#[test]
fn trailing_lifetime_markers_are_skipped() {
    let b = block(
        "body",
        vec![
            MirOp::VarLifetimeStart {
                name: "x".into(),
                rtype: ResolvedTypeKey::new("Int"),
            },
            jump("exit"),
            lifetime_end("x"),
            lifetime_end("y"),
        ],
    );
    assert_eq!(b.control_position(), Some(1));
    assert!(b.terminator().is_some());
    assert_eq!(b.successors().len(), 1);
}

#[test]
fn value_instruction_last_is_unterminated() {
    let b = block(
        "entry",
        vec![MirOp::LoadConst {
            src: crate::arg::MirConstant::True,
            trgt: t(0),
        }],
    );
    assert!(b.terminator().is_none());
}

#[test]
fn markers_only_block() {
    let b = block("exit", vec![lifetime_end("x")]);
    assert_eq!(b.control_position(), None);
    assert!(b.terminator().is_none());
}

#[test]
fn first_line_reads_first_instruction() {
    let b = MirBlock::new(l("entry"), vec![at(7, jump("exit")), at(3, jump("exit"))]);
    assert_eq!(b.first_line(), Some(7));
}

#[test]
fn max_temp_covers_defs_and_uses() {
    let b = block(
        "entry",
        vec![
            MirOp::RegAssign {
                src: v(9),
                trgt: t(2),
            },
            cjump(v(4), "a", "b"),
        ],
    );
    assert_eq!(b.max_temp_id(), Some(t(9)));
    assert_eq!(MirBlock::empty(l("x")).max_temp_id(), None);
}

#[test]
fn push_and_mutate_in_place() {
    let mut b = MirBlock::empty(l("entry"));
    b.push(at(1, MirOp::ReturnAssign { src: v(0) }));
    b.push(at(2, jump("exit")));
    assert_eq!(b.len(), 2);
    b.ops[0].op.substitute_arg(&v(0), &MirArgument::none());
    assert_eq!(
        b.to_string(),
        "entry:\n  _return_ = none\n  jump exit\n"
    );
}
