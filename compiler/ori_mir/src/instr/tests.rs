use std::collections::BTreeSet;

use pretty_assertions::assert_eq;

use crate::arg::{MirArgument, MirConstant};
use crate::keys::{
    ConstKey, FieldKey, FunctionKey, GlobalKey, LambdaKey, MethodKey, ResolvedTypeKey, StaticKey,
    TypeKey, VirtualMethodKey,
};
use crate::ops::{BinOp, CmpOp, EqOp, PrefixOp};
use crate::test_helpers::{i, l, t, v};

use super::*;

/// One instance of every instruction kind, with its canonical text.
fn catalogue() -> Vec<(MirOp, &'static str)> {
    let list = || TypeKey::new("ns::List<Int>");
    vec![
        (
            MirOp::LoadConst {
                src: MirConstant::Int("42".into()),
                trgt: t(0),
            },
            "#tmp_0 = 42",
        ),
        (
            MirOp::LoadConstTypedString {
                ivalue: "\"abc\"".into(),
                tkey: TypeKey::new("ns::Zip"),
                tskey: ResolvedTypeKey::new("ns::Zip"),
                trgt: t(0),
            },
            "#tmp_0 = \"abc\"#ns::Zip",
        ),
        (
            MirOp::AccessNamespaceConstant {
                gkey: GlobalKey::new("ns::pi"),
                trgt: t(0),
            },
            "#tmp_0 = ns::pi",
        ),
        (
            MirOp::AccessConstField {
                ckey: ConstKey::new("ns::Foo::max"),
                trgt: t(0),
            },
            "#tmp_0 = ns::Foo::max",
        ),
        (
            MirOp::LoadFieldDefaultValue {
                fkey: FieldKey::new("ns::Foo::f"),
                trgt: t(0),
            },
            "#tmp_0 = default(ns::Foo::f)",
        ),
        (
            MirOp::AccessCapturedVariable {
                name: "c".into(),
                trgt: t(0),
            },
            "#tmp_0 = c",
        ),
        (
            MirOp::AccessArgVariable {
                name: "p".into(),
                trgt: t(0),
            },
            "#tmp_0 = p",
        ),
        (
            MirOp::AccessLocalVariable {
                name: "x".into(),
                trgt: t(0),
            },
            "#tmp_0 = x",
        ),
        (
            MirOp::ConstructorPrimary {
                tkey: TypeKey::new("ns::Foo"),
                args: vec![v(1), MirArgument::local("x")],
                trgt: t(0),
            },
            "#tmp_0 = ns::Foo@(#tmp_1, x)",
        ),
        (
            MirOp::ConstructorPrimaryCollectionEmpty {
                tkey: list(),
                trgt: t(0),
            },
            "#tmp_0 = ns::List<Int>@{}",
        ),
        (
            MirOp::ConstructorPrimaryCollectionSingletons {
                tkey: list(),
                args: vec![v(1), MirArgument::int("2")],
                trgt: t(0),
            },
            "#tmp_0 = ns::List<Int>@{#tmp_1, 2}",
        ),
        (
            MirOp::ConstructorPrimaryCollectionCopies {
                tkey: list(),
                args: vec![v(1), v(2)],
                trgt: t(0),
            },
            "#tmp_0 = ns::List<Int>@{expand(#tmp_1), expand(#tmp_2)}",
        ),
        (
            MirOp::ConstructorPrimaryCollectionMixed {
                tkey: list(),
                args: vec![
                    CollectionElement::plain(v(1)),
                    CollectionElement::expand(v(2)),
                ],
                trgt: t(0),
            },
            "#tmp_0 = ns::List<Int>@{#tmp_1, expand(#tmp_2)}",
        ),
        (
            MirOp::ConstructorTuple {
                args: vec![v(1), MirArgument::none()],
                trgt: t(0),
            },
            "#tmp_0 = @[#tmp_1, none]",
        ),
        (
            MirOp::ConstructorRecord {
                args: vec![("f".into(), v(1)), ("g".into(), v(2))],
                trgt: t(0),
            },
            "#tmp_0 = @{f=#tmp_1, g=#tmp_2}",
        ),
        (
            MirOp::ConstructorLambda {
                lkey: LambdaKey::new("ns::main$3$7"),
                lsigkey: ResolvedTypeKey::new("fn(Int) -> Int"),
                captured: vec!["c".into(), "d".into()],
                trgt: t(0),
            },
            "#tmp_0 = fn(ns::main$3$7)",
        ),
        (
            MirOp::CallNamespaceFunction {
                fkey: FunctionKey::new("ns::f"),
                args: vec![v(1), v(2)],
                trgt: t(0),
            },
            "#tmp_0 = ns::f(#tmp_1, #tmp_2)",
        ),
        (
            MirOp::CallStaticFunction {
                skey: StaticKey::new("ns::Foo::make"),
                args: vec![MirArgument::parameter("p")],
                trgt: t(0),
            },
            "#tmp_0 = ns::Foo::make(p)",
        ),
        (
            MirOp::InvokeKnownTarget {
                mkey: MethodKey::new("ns::Foo::m"),
                args: vec![v(1), v(2)],
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1->::ns::Foo::m::(#tmp_2)",
        ),
        (
            MirOp::InvokeVirtualTarget {
                vresolve: VirtualMethodKey::new("m"),
                args: vec![v(1), v(2)],
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1->m(#tmp_2)",
        ),
        (
            MirOp::CallLambda {
                lambda: MirArgument::captured("k"),
                args: vec![v(2)],
                trgt: t(0),
            },
            "#tmp_0 = k(#tmp_2)",
        ),
        (
            MirOp::AccessFromIndex {
                arg: v(1),
                idx: 2,
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1[2]",
        ),
        (
            MirOp::ProjectFromIndices {
                arg: v(1),
                indices: vec![0, 2],
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1@[0, 2]",
        ),
        (
            MirOp::AccessFromProperty {
                arg: v(1),
                property: "p".into(),
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1.p",
        ),
        (
            MirOp::ProjectFromProperties {
                arg: v(1),
                properties: vec!["p".into(), "q".into()],
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1@{p, q}",
        ),
        (
            MirOp::AccessFromField {
                arg: v(1),
                field: "f".into(),
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1.f",
        ),
        (
            MirOp::ProjectFromFields {
                arg: v(1),
                fields: vec!["f".into(), "g".into()],
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1@{f, g}",
        ),
        (
            MirOp::ProjectFromTypeTuple {
                arg: v(1),
                ptype: ResolvedTypeKey::new("[Int, Bool]"),
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1#[Int, Bool]",
        ),
        (
            MirOp::ProjectFromTypeRecord {
                arg: v(1),
                ptype: ResolvedTypeKey::new("{f: Int}"),
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1#{f: Int}",
        ),
        (
            MirOp::ProjectFromTypeConcept {
                arg: v(1),
                ctypes: vec![TypeKey::new("ns::A"), TypeKey::new("ns::B")],
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1#ns::A&ns::B",
        ),
        (
            MirOp::ModifyWithIndices {
                arg: v(1),
                updates: vec![(0, v(2)), (1, v(3))],
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1<~(0=#tmp_2, 1=#tmp_3)",
        ),
        (
            MirOp::ModifyWithProperties {
                arg: v(1),
                updates: vec![("p".into(), v(2))],
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1<~(p=#tmp_2)",
        ),
        (
            MirOp::ModifyWithFields {
                arg: v(1),
                updates: vec![("f".into(), MirArgument::bool(true))],
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1<~(f=true)",
        ),
        (
            MirOp::StructuredExtendTuple {
                arg: v(1),
                update: v(2),
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1<+(#tmp_2)",
        ),
        (
            MirOp::StructuredExtendRecord {
                arg: v(1),
                update: v(2),
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1<+(#tmp_2)",
        ),
        (
            MirOp::StructuredExtendObject {
                arg: v(1),
                update: v(2),
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1<+(#tmp_2)",
        ),
        (
            MirOp::PrefixOp {
                op: PrefixOp::Neg,
                arg: v(1),
                trgt: t(0),
            },
            "#tmp_0 = -#tmp_1",
        ),
        (
            MirOp::BinOp {
                lhs: v(1),
                op: BinOp::Add,
                rhs: v(2),
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1+#tmp_2",
        ),
        (
            MirOp::BinEq {
                lhs: v(1),
                op: EqOp::Ne,
                rhs: MirArgument::int("0"),
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1!=0",
        ),
        (
            MirOp::BinCmp {
                lhs: v(1),
                op: CmpOp::Le,
                rhs: v(2),
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1<=#tmp_2",
        ),
        (
            MirOp::RegAssign {
                src: v(1),
                trgt: t(0),
            },
            "#tmp_0 = #tmp_1",
        ),
        (
            MirOp::TruthyConvert {
                src: v(1),
                trgt: t(0),
            },
            "#tmp_0 = truthy(#tmp_1)",
        ),
        (
            MirOp::VarStore {
                src: v(1),
                name: "x".into(),
            },
            "x = #tmp_1",
        ),
        (MirOp::ReturnAssign { src: v(1) }, "_return_ = #tmp_1"),
        (MirOp::Assert { cond: v(1) }, "assert #tmp_1"),
        (MirOp::Check { cond: v(1) }, "check #tmp_1"),
        (MirOp::Debug { value: Some(v(1)) }, "_debug #tmp_1"),
        (MirOp::Jump { target: l("exit") }, "jump exit"),
        (
            MirOp::JumpCond {
                arg: v(1),
                true_block: l("then"),
                false_block: l("else"),
            },
            "cjump #tmp_1 then else",
        ),
        (
            MirOp::JumpNone {
                arg: v(1),
                none_block: l("none"),
                some_block: l("some"),
            },
            "njump #tmp_1 none some",
        ),
        (
            MirOp::VarLifetimeStart {
                name: "x".into(),
                rtype: ResolvedTypeKey::new("Int"),
            },
            "v-begin x",
        ),
        (MirOp::VarLifetimeEnd { name: "x".into() }, "v-end x"),
    ]
}

fn id_set(args: &[MirArgument]) -> BTreeSet<String> {
    args.iter().map(MirArgument::name_id).collect()
}

// Catalogue coverage

#[test]
fn catalogue_covers_every_tag_once() {
    let mut tags: Vec<MirOpTag> = catalogue().iter().map(|(op, _)| op.tag()).collect();
    tags.sort();
    let mut all = MirOpTag::ALL.to_vec();
    all.sort();
    assert_eq!(tags, all);
}

#[test]
fn tag_names_are_distinct() {
    let names: BTreeSet<&str> = MirOpTag::ALL.iter().map(|t| t.name()).collect();
    assert_eq!(names.len(), MirOpTag::ALL.len());
    assert_eq!(MirOpTag::AccessConstField.to_string(), "AccessConstField");
}

// Footprint soundness

#[test]
fn operands_equal_used_union_modified() {
    for (op, _) in catalogue() {
        let mut footprint = op.used();
        footprint.extend(op.modified());
        assert_eq!(
            id_set(&op.operands()),
            id_set(&footprint),
            "footprint mismatch for {}",
            op.tag()
        );
    }
}

#[test]
fn value_instructions_modify_exactly_their_target() {
    for (op, _) in catalogue() {
        if op.category() == OpCategory::Value {
            assert_eq!(op.modified(), vec![v(0)], "{}", op.tag());
            assert_eq!(op.defined_temp(), Some(t(0)), "{}", op.tag());
        }
    }
}

#[test]
fn literal_loads_use_nothing() {
    for (op, _) in catalogue().into_iter().take(5) {
        assert!(op.used().is_empty(), "{}", op.tag());
    }
}

#[test]
fn named_variable_reads_use_their_slot() {
    let ops = catalogue();
    assert_eq!(ops[5].0.used(), vec![MirArgument::captured("c")]);
    assert_eq!(ops[6].0.used(), vec![MirArgument::parameter("p")]);
    assert_eq!(ops[7].0.used(), vec![MirArgument::local("x")]);
}

#[test]
fn lambda_uses_captured_variables() {
    let op = MirOp::ConstructorLambda {
        lkey: LambdaKey::new("ns::f$1$1"),
        lsigkey: ResolvedTypeKey::new("fn() -> Int"),
        captured: vec!["a".into(), "b".into()],
        trgt: t(4),
    };
    assert_eq!(
        op.used(),
        vec![MirArgument::captured("a"), MirArgument::captured("b")]
    );
    assert_eq!(op.modified(), vec![v(4)]);
}

#[test]
fn var_store_modifies_named_local() {
    let op = MirOp::VarStore {
        src: v(3),
        name: "x".into(),
    };
    assert_eq!(op.used(), vec![v(3)]);
    assert_eq!(op.modified(), vec![MirArgument::local("x")]);
    assert_eq!(op.defined_temp(), None);
}

#[test]
fn flow_without_definitions() {
    for op in [
        MirOp::ReturnAssign { src: v(1) },
        MirOp::Assert { cond: v(1) },
        MirOp::Check { cond: v(1) },
        MirOp::Debug { value: None },
    ] {
        assert!(op.modified().is_empty(), "{}", op.tag());
        assert_eq!(op.category(), OpCategory::Flow);
    }
}

#[test]
fn debug_break_has_no_operands() {
    let op = MirOp::Debug { value: None };
    assert!(op.used().is_empty());
    assert!(op.operands().is_empty());
    assert_eq!(op.to_string(), "_debug break");
}

#[test]
fn invoke_receiver_is_first_use() {
    let op = MirOp::InvokeVirtualTarget {
        vresolve: VirtualMethodKey::new("size"),
        args: vec![MirArgument::local("self"), v(5)],
        trgt: t(6),
    };
    assert_eq!(op.used()[0], MirArgument::local("self"));
    assert_eq!(op.to_string(), "#tmp_6 = self->size(#tmp_5)");
}

// Categories

#[test]
fn lifetime_markers_are_not_terminators() {
    assert_eq!(MirOpTag::VarLifetimeStart.category(), OpCategory::Lifetime);
    assert_eq!(MirOpTag::VarLifetimeEnd.category(), OpCategory::Lifetime);
    assert!(!MirOpTag::VarLifetimeStart.is_terminator());
    assert!(!MirOpTag::VarLifetimeEnd.is_terminator());
    assert!(MirOpTag::VarLifetimeEnd.is_lifetime_marker());
}

#[test]
fn only_jumps_terminate() {
    let terminators: Vec<MirOpTag> = MirOpTag::ALL
        .iter()
        .copied()
        .filter(|t| t.is_terminator())
        .collect();
    assert_eq!(
        terminators,
        vec![MirOpTag::Jump, MirOpTag::JumpCond, MirOpTag::JumpNone]
    );
}

#[test]
fn contracts() {
    assert!(MirOpTag::Assert.is_contract());
    assert!(MirOpTag::Check.is_contract());
    assert!(!MirOpTag::Debug.is_contract());
}

#[test]
fn successors() {
    let ops = catalogue();
    for (op, _) in &ops {
        let succ: Vec<&str> = op.successors().iter().map(|s| s.as_str()).collect();
        match op.tag() {
            MirOpTag::Jump => assert_eq!(succ, vec!["exit"]),
            MirOpTag::JumpCond => assert_eq!(succ, vec!["then", "else"]),
            MirOpTag::JumpNone => assert_eq!(succ, vec!["none", "some"]),
            _ => assert!(succ.is_empty(), "{}", op.tag()),
        }
    }
}

// Canonical text

#[test]
fn canonical_text_for_every_kind() {
    for (op, expected) in catalogue() {
        assert_eq!(op.to_string(), expected, "{}", op.tag());
    }
}

#[test]
fn positioned_instruction_displays_op() {
    let instr = i(MirOp::Check { cond: v(9) });
    assert_eq!(instr.to_string(), "check #tmp_9");
    assert_eq!(instr.sinfo().line, 1);
    assert_eq!(instr.tag(), MirOpTag::Check);
}

// Collection literals with spread elements

#[test]
fn mixed_collection_elements() {
    let x = MirArgument::local("x");
    let y = MirArgument::local("y");
    let op = MirOp::ConstructorPrimaryCollectionMixed {
        tkey: TypeKey::new("ns::List<Int>"),
        args: vec![(false, x.clone()).into(), (true, y.clone()).into()],
        trgt: t(0),
    };
    assert_eq!(op.used(), vec![x, y]);
    assert_eq!(op.to_string(), "#tmp_0 = ns::List<Int>@{x, expand(y)}");
}

// Constant identity across instructions

#[test]
fn equal_constants_disjoint_targets() {
    let a = MirOp::LoadConst {
        src: MirConstant::Int("42".into()),
        trgt: t(0),
    };
    let b = MirOp::LoadConst {
        src: MirConstant::Int("42".into()),
        trgt: t(1),
    };
    let (MirOp::LoadConst { src: sa, .. }, MirOp::LoadConst { src: sb, .. }) = (&a, &b) else {
        panic!("expected LoadConst");
    };
    assert_eq!(sa.name_id(), sb.name_id());
    assert!(id_set(&a.modified()).is_disjoint(&id_set(&b.modified())));
}

// In-place rewriting

#[test]
fn substitute_rewrites_reads_only() {
    let mut op = MirOp::BinOp {
        lhs: v(1),
        op: BinOp::Mul,
        rhs: v(1),
        trgt: t(1),
    };
    let n = op.substitute_arg(&v(1), &MirArgument::int("3"));
    assert_eq!(n, 2);
    assert_eq!(op.to_string(), "#tmp_1 = 3*3");
    assert_eq!(op.defined_temp(), Some(t(1)));
}

#[test]
fn substitute_reaches_nested_payloads() {
    let mut op = MirOp::ModifyWithProperties {
        arg: v(1),
        updates: vec![("p".into(), v(2)), ("q".into(), v(1))],
        trgt: t(3),
    };
    assert_eq!(op.substitute_arg(&v(1), &v(7)), 2);
    assert_eq!(op.used(), vec![v(7), v(2), v(7)]);
}

#[test]
fn substitute_misses_leave_instruction_untouched() {
    let mut op = MirOp::Jump { target: l("exit") };
    let before = op.clone();
    assert_eq!(op.substitute_arg(&v(1), &v(2)), 0);
    assert_eq!(op, before);
}

#[test]
fn for_each_used_mut_visits_every_use() {
    for (mut op, _) in catalogue() {
        let expected = op.used();
        let mut visited = Vec::new();
        op.for_each_used_mut(|arg| visited.push(arg.clone()));
        // Name-keyed reads are slots, not rewritable operands.
        if matches!(
            op.tag(),
            MirOpTag::AccessCapturedVariable
                | MirOpTag::AccessArgVariable
                | MirOpTag::AccessLocalVariable
                | MirOpTag::ConstructorLambda
        ) {
            assert!(visited.is_empty(), "{}", op.tag());
        } else {
            assert_eq!(visited, expected, "{}", op.tag());
        }
    }
}
