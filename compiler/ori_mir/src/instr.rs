//! MIR instruction set.
//!
//! A closed set of instruction kinds, one [`MirOp`] variant each, grouped by
//! [`OpCategory`]:
//!
//! - **Value**: defines exactly one fresh temp register.
//! - **Flow**: non-terminating; may define a register or a named local,
//!   or nothing (assert/check/debug).
//! - **Jump**: terminates a block by naming successor labels.
//! - **Lifetime**: variable live-range markers. These name no successor
//!   and never terminate a block.
//!
//! Every instruction exposes [`used`](MirOp::used) and
//! [`modified`](MirOp::modified); together they are its complete dataflow
//! footprint. Passes that rewrite operands mutate the `MirArgument` fields
//! in place (see [`MirOp::for_each_used_mut`]) instead of rebuilding the
//! instruction.
//!
//! Construction is total. Arity, operand types, and key resolution are the
//! producer's responsibility and are never checked here.

use std::fmt;

use smallvec::{smallvec, SmallVec};

use crate::arg::{MirArgument, MirConstant, TempRegister};
use crate::keys::{
    BlockLabel, ConstKey, FieldKey, FunctionKey, GlobalKey, LambdaKey, MethodKey,
    ResolvedTypeKey, StaticKey, TypeKey, VirtualMethodKey,
};
use crate::ops::{BinOp, CmpOp, EqOp, PrefixOp};
use crate::source::SourceInfo;

// ── Tags & categories ───────────────────────────────────────────────

/// Structural category of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpCategory {
    Value,
    Flow,
    Jump,
    Lifetime,
}

/// Kind tag, one per [`MirOp`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MirOpTag {
    LoadConst,
    LoadConstTypedString,
    AccessNamespaceConstant,
    AccessConstField,
    LoadFieldDefaultValue,
    AccessCapturedVariable,
    AccessArgVariable,
    AccessLocalVariable,
    ConstructorPrimary,
    ConstructorPrimaryCollectionEmpty,
    ConstructorPrimaryCollectionSingletons,
    ConstructorPrimaryCollectionCopies,
    ConstructorPrimaryCollectionMixed,
    ConstructorTuple,
    ConstructorRecord,
    ConstructorLambda,
    CallNamespaceFunction,
    CallStaticFunction,
    AccessFromIndex,
    ProjectFromIndices,
    AccessFromProperty,
    ProjectFromProperties,
    AccessFromField,
    ProjectFromFields,
    ProjectFromTypeTuple,
    ProjectFromTypeRecord,
    ProjectFromTypeConcept,
    ModifyWithIndices,
    ModifyWithProperties,
    ModifyWithFields,
    StructuredExtendTuple,
    StructuredExtendRecord,
    StructuredExtendObject,
    InvokeKnownTarget,
    InvokeVirtualTarget,
    CallLambda,
    PrefixOp,
    BinOp,
    BinEq,
    BinCmp,
    RegAssign,
    TruthyConvert,
    VarStore,
    ReturnAssign,
    Assert,
    Check,
    Debug,
    Jump,
    JumpCond,
    JumpNone,
    VarLifetimeStart,
    VarLifetimeEnd,
}

impl MirOpTag {
    /// Every tag, in declaration order.
    pub const ALL: [MirOpTag; 52] = [
        MirOpTag::LoadConst,
        MirOpTag::LoadConstTypedString,
        MirOpTag::AccessNamespaceConstant,
        MirOpTag::AccessConstField,
        MirOpTag::LoadFieldDefaultValue,
        MirOpTag::AccessCapturedVariable,
        MirOpTag::AccessArgVariable,
        MirOpTag::AccessLocalVariable,
        MirOpTag::ConstructorPrimary,
        MirOpTag::ConstructorPrimaryCollectionEmpty,
        MirOpTag::ConstructorPrimaryCollectionSingletons,
        MirOpTag::ConstructorPrimaryCollectionCopies,
        MirOpTag::ConstructorPrimaryCollectionMixed,
        MirOpTag::ConstructorTuple,
        MirOpTag::ConstructorRecord,
        MirOpTag::ConstructorLambda,
        MirOpTag::CallNamespaceFunction,
        MirOpTag::CallStaticFunction,
        MirOpTag::AccessFromIndex,
        MirOpTag::ProjectFromIndices,
        MirOpTag::AccessFromProperty,
        MirOpTag::ProjectFromProperties,
        MirOpTag::AccessFromField,
        MirOpTag::ProjectFromFields,
        MirOpTag::ProjectFromTypeTuple,
        MirOpTag::ProjectFromTypeRecord,
        MirOpTag::ProjectFromTypeConcept,
        MirOpTag::ModifyWithIndices,
        MirOpTag::ModifyWithProperties,
        MirOpTag::ModifyWithFields,
        MirOpTag::StructuredExtendTuple,
        MirOpTag::StructuredExtendRecord,
        MirOpTag::StructuredExtendObject,
        MirOpTag::InvokeKnownTarget,
        MirOpTag::InvokeVirtualTarget,
        MirOpTag::CallLambda,
        MirOpTag::PrefixOp,
        MirOpTag::BinOp,
        MirOpTag::BinEq,
        MirOpTag::BinCmp,
        MirOpTag::RegAssign,
        MirOpTag::TruthyConvert,
        MirOpTag::VarStore,
        MirOpTag::ReturnAssign,
        MirOpTag::Assert,
        MirOpTag::Check,
        MirOpTag::Debug,
        MirOpTag::Jump,
        MirOpTag::JumpCond,
        MirOpTag::JumpNone,
        MirOpTag::VarLifetimeStart,
        MirOpTag::VarLifetimeEnd,
    ];

    /// Stable tag name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            MirOpTag::LoadConst => "LoadConst",
            MirOpTag::LoadConstTypedString => "LoadConstTypedString",
            MirOpTag::AccessNamespaceConstant => "AccessNamespaceConstant",
            MirOpTag::AccessConstField => "AccessConstField",
            MirOpTag::LoadFieldDefaultValue => "LoadFieldDefaultValue",
            MirOpTag::AccessCapturedVariable => "AccessCapturedVariable",
            MirOpTag::AccessArgVariable => "AccessArgVariable",
            MirOpTag::AccessLocalVariable => "AccessLocalVariable",
            MirOpTag::ConstructorPrimary => "ConstructorPrimary",
            MirOpTag::ConstructorPrimaryCollectionEmpty => "ConstructorPrimaryCollectionEmpty",
            MirOpTag::ConstructorPrimaryCollectionSingletons => {
                "ConstructorPrimaryCollectionSingletons"
            }
            MirOpTag::ConstructorPrimaryCollectionCopies => "ConstructorPrimaryCollectionCopies",
            MirOpTag::ConstructorPrimaryCollectionMixed => "ConstructorPrimaryCollectionMixed",
            MirOpTag::ConstructorTuple => "ConstructorTuple",
            MirOpTag::ConstructorRecord => "ConstructorRecord",
            MirOpTag::ConstructorLambda => "ConstructorLambda",
            MirOpTag::CallNamespaceFunction => "CallNamespaceFunction",
            MirOpTag::CallStaticFunction => "CallStaticFunction",
            MirOpTag::AccessFromIndex => "AccessFromIndex",
            MirOpTag::ProjectFromIndices => "ProjectFromIndices",
            MirOpTag::AccessFromProperty => "AccessFromProperty",
            MirOpTag::ProjectFromProperties => "ProjectFromProperties",
            MirOpTag::AccessFromField => "AccessFromField",
            MirOpTag::ProjectFromFields => "ProjectFromFields",
            MirOpTag::ProjectFromTypeTuple => "ProjectFromTypeTuple",
            MirOpTag::ProjectFromTypeRecord => "ProjectFromTypeRecord",
            MirOpTag::ProjectFromTypeConcept => "ProjectFromTypeConcept",
            MirOpTag::ModifyWithIndices => "ModifyWithIndices",
            MirOpTag::ModifyWithProperties => "ModifyWithProperties",
            MirOpTag::ModifyWithFields => "ModifyWithFields",
            MirOpTag::StructuredExtendTuple => "StructuredExtendTuple",
            MirOpTag::StructuredExtendRecord => "StructuredExtendRecord",
            MirOpTag::StructuredExtendObject => "StructuredExtendObject",
            MirOpTag::InvokeKnownTarget => "InvokeKnownTarget",
            MirOpTag::InvokeVirtualTarget => "InvokeVirtualTarget",
            MirOpTag::CallLambda => "CallLambda",
            MirOpTag::PrefixOp => "PrefixOp",
            MirOpTag::BinOp => "BinOp",
            MirOpTag::BinEq => "BinEq",
            MirOpTag::BinCmp => "BinCmp",
            MirOpTag::RegAssign => "RegAssign",
            MirOpTag::TruthyConvert => "TruthyConvert",
            MirOpTag::VarStore => "VarStore",
            MirOpTag::ReturnAssign => "ReturnAssign",
            MirOpTag::Assert => "Assert",
            MirOpTag::Check => "Check",
            MirOpTag::Debug => "Debug",
            MirOpTag::Jump => "Jump",
            MirOpTag::JumpCond => "JumpCond",
            MirOpTag::JumpNone => "JumpNone",
            MirOpTag::VarLifetimeStart => "VarLifetimeStart",
            MirOpTag::VarLifetimeEnd => "VarLifetimeEnd",
        }
    }

    pub const fn category(self) -> OpCategory {
        match self {
            MirOpTag::RegAssign
            | MirOpTag::TruthyConvert
            | MirOpTag::VarStore
            | MirOpTag::ReturnAssign
            | MirOpTag::Assert
            | MirOpTag::Check
            | MirOpTag::Debug => OpCategory::Flow,
            MirOpTag::Jump | MirOpTag::JumpCond | MirOpTag::JumpNone => OpCategory::Jump,
            MirOpTag::VarLifetimeStart | MirOpTag::VarLifetimeEnd => OpCategory::Lifetime,
            _ => OpCategory::Value,
        }
    }

    /// Returns `true` for instructions that end a block.
    ///
    /// Lifetime markers are never terminators.
    pub const fn is_terminator(self) -> bool {
        matches!(self.category(), OpCategory::Jump)
    }

    pub const fn is_lifetime_marker(self) -> bool {
        matches!(self.category(), OpCategory::Lifetime)
    }

    /// Returns `true` for `Assert` and `Check`.
    ///
    /// The two are structurally identical. Whether either is stripped in a
    /// given build is decided by the consuming phase.
    pub const fn is_contract(self) -> bool {
        matches!(self, MirOpTag::Assert | MirOpTag::Check)
    }
}

impl fmt::Display for MirOpTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Payload helpers ─────────────────────────────────────────────────

/// One element of a mixed collection literal: either a plain element or a
/// collection whose elements are spread in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CollectionElement {
    pub expand: bool,
    pub arg: MirArgument,
}

impl CollectionElement {
    pub fn plain(arg: MirArgument) -> Self {
        Self { expand: false, arg }
    }

    pub fn expand(arg: MirArgument) -> Self {
        Self { expand: true, arg }
    }
}

impl From<(bool, MirArgument)> for CollectionElement {
    fn from((expand, arg): (bool, MirArgument)) -> Self {
        Self { expand, arg }
    }
}

// ── Instructions ────────────────────────────────────────────────────

/// Instruction payload, one variant per kind.
///
/// Fields typed [`MirArgument`] are operand slots and may be rewritten in
/// place. Keys, labels, names, and index/property lists are fixed by the
/// producer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MirOp {
    // ── Constant / storage loads ────────────────────────────────
    /// `trgt = src`. The literal is payload, not an operand.
    LoadConst {
        src: MirConstant,
        trgt: TempRegister,
    },
    /// `trgt = ivalue#tkey`: a string literal of a typed-string type.
    LoadConstTypedString {
        ivalue: String,
        tkey: TypeKey,
        tskey: ResolvedTypeKey,
        trgt: TempRegister,
    },
    AccessNamespaceConstant {
        gkey: GlobalKey,
        trgt: TempRegister,
    },
    AccessConstField {
        ckey: ConstKey,
        trgt: TempRegister,
    },
    /// `trgt = default(fkey)`: a field's declared default value.
    LoadFieldDefaultValue {
        fkey: FieldKey,
        trgt: TempRegister,
    },
    AccessCapturedVariable {
        name: String,
        trgt: TempRegister,
    },
    AccessArgVariable {
        name: String,
        trgt: TempRegister,
    },
    AccessLocalVariable {
        name: String,
        trgt: TempRegister,
    },

    // ── Aggregate construction ──────────────────────────────────
    /// Nominal-type instance from positional arguments.
    ConstructorPrimary {
        tkey: TypeKey,
        args: Vec<MirArgument>,
        trgt: TempRegister,
    },
    ConstructorPrimaryCollectionEmpty {
        tkey: TypeKey,
        trgt: TempRegister,
    },
    /// Collection built from individual elements.
    ConstructorPrimaryCollectionSingletons {
        tkey: TypeKey,
        args: Vec<MirArgument>,
        trgt: TempRegister,
    },
    /// Collection built by spreading other collections.
    ConstructorPrimaryCollectionCopies {
        tkey: TypeKey,
        args: Vec<MirArgument>,
        trgt: TempRegister,
    },
    ConstructorPrimaryCollectionMixed {
        tkey: TypeKey,
        args: Vec<CollectionElement>,
        trgt: TempRegister,
    },
    ConstructorTuple {
        args: Vec<MirArgument>,
        trgt: TempRegister,
    },
    ConstructorRecord {
        args: Vec<(String, MirArgument)>,
        trgt: TempRegister,
    },
    /// Closure value capturing the named variables by value.
    ConstructorLambda {
        lkey: LambdaKey,
        lsigkey: ResolvedTypeKey,
        captured: Vec<String>,
        trgt: TempRegister,
    },

    // ── Calls ───────────────────────────────────────────────────
    CallNamespaceFunction {
        fkey: FunctionKey,
        args: Vec<MirArgument>,
        trgt: TempRegister,
    },
    CallStaticFunction {
        skey: StaticKey,
        args: Vec<MirArgument>,
        trgt: TempRegister,
    },
    /// Method call with a statically known target. `args[0]` is the receiver.
    InvokeKnownTarget {
        mkey: MethodKey,
        args: Vec<MirArgument>,
        trgt: TempRegister,
    },
    /// Virtually dispatched method call. `args[0]` is the receiver.
    InvokeVirtualTarget {
        vresolve: VirtualMethodKey,
        args: Vec<MirArgument>,
        trgt: TempRegister,
    },
    CallLambda {
        lambda: MirArgument,
        args: Vec<MirArgument>,
        trgt: TempRegister,
    },

    // ── Structural access / update ──────────────────────────────
    AccessFromIndex {
        arg: MirArgument,
        idx: usize,
        trgt: TempRegister,
    },
    ProjectFromIndices {
        arg: MirArgument,
        indices: Vec<usize>,
        trgt: TempRegister,
    },
    AccessFromProperty {
        arg: MirArgument,
        property: String,
        trgt: TempRegister,
    },
    ProjectFromProperties {
        arg: MirArgument,
        properties: Vec<String>,
        trgt: TempRegister,
    },
    AccessFromField {
        arg: MirArgument,
        field: String,
        trgt: TempRegister,
    },
    ProjectFromFields {
        arg: MirArgument,
        fields: Vec<String>,
        trgt: TempRegister,
    },
    ProjectFromTypeTuple {
        arg: MirArgument,
        ptype: ResolvedTypeKey,
        trgt: TempRegister,
    },
    ProjectFromTypeRecord {
        arg: MirArgument,
        ptype: ResolvedTypeKey,
        trgt: TempRegister,
    },
    ProjectFromTypeConcept {
        arg: MirArgument,
        ctypes: Vec<TypeKey>,
        trgt: TempRegister,
    },
    /// Functional update; `arg` itself is left unmodified.
    ModifyWithIndices {
        arg: MirArgument,
        updates: Vec<(usize, MirArgument)>,
        trgt: TempRegister,
    },
    ModifyWithProperties {
        arg: MirArgument,
        updates: Vec<(String, MirArgument)>,
        trgt: TempRegister,
    },
    ModifyWithFields {
        arg: MirArgument,
        updates: Vec<(String, MirArgument)>,
        trgt: TempRegister,
    },
    StructuredExtendTuple {
        arg: MirArgument,
        update: MirArgument,
        trgt: TempRegister,
    },
    StructuredExtendRecord {
        arg: MirArgument,
        update: MirArgument,
        trgt: TempRegister,
    },
    StructuredExtendObject {
        arg: MirArgument,
        update: MirArgument,
        trgt: TempRegister,
    },

    // ── Operators ───────────────────────────────────────────────
    PrefixOp {
        op: PrefixOp,
        arg: MirArgument,
        trgt: TempRegister,
    },
    BinOp {
        lhs: MirArgument,
        op: BinOp,
        rhs: MirArgument,
        trgt: TempRegister,
    },
    BinEq {
        lhs: MirArgument,
        op: EqOp,
        rhs: MirArgument,
        trgt: TempRegister,
    },
    BinCmp {
        lhs: MirArgument,
        op: CmpOp,
        rhs: MirArgument,
        trgt: TempRegister,
    },

    // ── Register / variable flow ────────────────────────────────
    RegAssign {
        src: MirArgument,
        trgt: TempRegister,
    },
    TruthyConvert {
        src: MirArgument,
        trgt: TempRegister,
    },
    /// Store into the named local variable.
    VarStore {
        src: MirArgument,
        name: String,
    },
    /// Set the implicit return slot.
    ReturnAssign {
        src: MirArgument,
    },

    // ── Contracts / diagnostics ─────────────────────────────────
    Assert {
        cond: MirArgument,
    },
    Check {
        cond: MirArgument,
    },
    /// Trace with a value, or a breakpoint when `value` is `None`.
    Debug {
        value: Option<MirArgument>,
    },

    // ── Control transfer ────────────────────────────────────────
    Jump {
        target: BlockLabel,
    },
    JumpCond {
        arg: MirArgument,
        true_block: BlockLabel,
        false_block: BlockLabel,
    },
    /// Branch on the none-ness of an optional-typed operand.
    JumpNone {
        arg: MirArgument,
        none_block: BlockLabel,
        some_block: BlockLabel,
    },

    // ── Lifetime markers ────────────────────────────────────────
    VarLifetimeStart {
        name: String,
        rtype: ResolvedTypeKey,
    },
    VarLifetimeEnd {
        name: String,
    },
}

impl MirOp {
    pub fn tag(&self) -> MirOpTag {
        match self {
            MirOp::LoadConst { .. } => MirOpTag::LoadConst,
            MirOp::LoadConstTypedString { .. } => MirOpTag::LoadConstTypedString,
            MirOp::AccessNamespaceConstant { .. } => MirOpTag::AccessNamespaceConstant,
            MirOp::AccessConstField { .. } => MirOpTag::AccessConstField,
            MirOp::LoadFieldDefaultValue { .. } => MirOpTag::LoadFieldDefaultValue,
            MirOp::AccessCapturedVariable { .. } => MirOpTag::AccessCapturedVariable,
            MirOp::AccessArgVariable { .. } => MirOpTag::AccessArgVariable,
            MirOp::AccessLocalVariable { .. } => MirOpTag::AccessLocalVariable,
            MirOp::ConstructorPrimary { .. } => MirOpTag::ConstructorPrimary,
            MirOp::ConstructorPrimaryCollectionEmpty { .. } => {
                MirOpTag::ConstructorPrimaryCollectionEmpty
            }
            MirOp::ConstructorPrimaryCollectionSingletons { .. } => {
                MirOpTag::ConstructorPrimaryCollectionSingletons
            }
            MirOp::ConstructorPrimaryCollectionCopies { .. } => {
                MirOpTag::ConstructorPrimaryCollectionCopies
            }
            MirOp::ConstructorPrimaryCollectionMixed { .. } => {
                MirOpTag::ConstructorPrimaryCollectionMixed
            }
            MirOp::ConstructorTuple { .. } => MirOpTag::ConstructorTuple,
            MirOp::ConstructorRecord { .. } => MirOpTag::ConstructorRecord,
            MirOp::ConstructorLambda { .. } => MirOpTag::ConstructorLambda,
            MirOp::CallNamespaceFunction { .. } => MirOpTag::CallNamespaceFunction,
            MirOp::CallStaticFunction { .. } => MirOpTag::CallStaticFunction,
            MirOp::InvokeKnownTarget { .. } => MirOpTag::InvokeKnownTarget,
            MirOp::InvokeVirtualTarget { .. } => MirOpTag::InvokeVirtualTarget,
            MirOp::CallLambda { .. } => MirOpTag::CallLambda,
            MirOp::AccessFromIndex { .. } => MirOpTag::AccessFromIndex,
            MirOp::ProjectFromIndices { .. } => MirOpTag::ProjectFromIndices,
            MirOp::AccessFromProperty { .. } => MirOpTag::AccessFromProperty,
            MirOp::ProjectFromProperties { .. } => MirOpTag::ProjectFromProperties,
            MirOp::AccessFromField { .. } => MirOpTag::AccessFromField,
            MirOp::ProjectFromFields { .. } => MirOpTag::ProjectFromFields,
            MirOp::ProjectFromTypeTuple { .. } => MirOpTag::ProjectFromTypeTuple,
            MirOp::ProjectFromTypeRecord { .. } => MirOpTag::ProjectFromTypeRecord,
            MirOp::ProjectFromTypeConcept { .. } => MirOpTag::ProjectFromTypeConcept,
            MirOp::ModifyWithIndices { .. } => MirOpTag::ModifyWithIndices,
            MirOp::ModifyWithProperties { .. } => MirOpTag::ModifyWithProperties,
            MirOp::ModifyWithFields { .. } => MirOpTag::ModifyWithFields,
            MirOp::StructuredExtendTuple { .. } => MirOpTag::StructuredExtendTuple,
            MirOp::StructuredExtendRecord { .. } => MirOpTag::StructuredExtendRecord,
            MirOp::StructuredExtendObject { .. } => MirOpTag::StructuredExtendObject,
            MirOp::PrefixOp { .. } => MirOpTag::PrefixOp,
            MirOp::BinOp { .. } => MirOpTag::BinOp,
            MirOp::BinEq { .. } => MirOpTag::BinEq,
            MirOp::BinCmp { .. } => MirOpTag::BinCmp,
            MirOp::RegAssign { .. } => MirOpTag::RegAssign,
            MirOp::TruthyConvert { .. } => MirOpTag::TruthyConvert,
            MirOp::VarStore { .. } => MirOpTag::VarStore,
            MirOp::ReturnAssign { .. } => MirOpTag::ReturnAssign,
            MirOp::Assert { .. } => MirOpTag::Assert,
            MirOp::Check { .. } => MirOpTag::Check,
            MirOp::Debug { .. } => MirOpTag::Debug,
            MirOp::Jump { .. } => MirOpTag::Jump,
            MirOp::JumpCond { .. } => MirOpTag::JumpCond,
            MirOp::JumpNone { .. } => MirOpTag::JumpNone,
            MirOp::VarLifetimeStart { .. } => MirOpTag::VarLifetimeStart,
            MirOp::VarLifetimeEnd { .. } => MirOpTag::VarLifetimeEnd,
        }
    }

    #[inline]
    pub fn category(&self) -> OpCategory {
        self.tag().category()
    }

    #[inline]
    pub fn is_terminator(&self) -> bool {
        self.tag().is_terminator()
    }

    /// Returns the temp register written by this instruction, if any.
    ///
    /// Every value instruction plus `RegAssign` and `TruthyConvert`
    /// return `Some(trgt)`. `VarStore` writes a named local, not a temp.
    pub fn defined_temp(&self) -> Option<TempRegister> {
        match self {
            MirOp::LoadConst { trgt, .. }
            | MirOp::LoadConstTypedString { trgt, .. }
            | MirOp::AccessNamespaceConstant { trgt, .. }
            | MirOp::AccessConstField { trgt, .. }
            | MirOp::LoadFieldDefaultValue { trgt, .. }
            | MirOp::AccessCapturedVariable { trgt, .. }
            | MirOp::AccessArgVariable { trgt, .. }
            | MirOp::AccessLocalVariable { trgt, .. }
            | MirOp::ConstructorPrimary { trgt, .. }
            | MirOp::ConstructorPrimaryCollectionEmpty { trgt, .. }
            | MirOp::ConstructorPrimaryCollectionSingletons { trgt, .. }
            | MirOp::ConstructorPrimaryCollectionCopies { trgt, .. }
            | MirOp::ConstructorPrimaryCollectionMixed { trgt, .. }
            | MirOp::ConstructorTuple { trgt, .. }
            | MirOp::ConstructorRecord { trgt, .. }
            | MirOp::ConstructorLambda { trgt, .. }
            | MirOp::CallNamespaceFunction { trgt, .. }
            | MirOp::CallStaticFunction { trgt, .. }
            | MirOp::InvokeKnownTarget { trgt, .. }
            | MirOp::InvokeVirtualTarget { trgt, .. }
            | MirOp::CallLambda { trgt, .. }
            | MirOp::AccessFromIndex { trgt, .. }
            | MirOp::ProjectFromIndices { trgt, .. }
            | MirOp::AccessFromProperty { trgt, .. }
            | MirOp::ProjectFromProperties { trgt, .. }
            | MirOp::AccessFromField { trgt, .. }
            | MirOp::ProjectFromFields { trgt, .. }
            | MirOp::ProjectFromTypeTuple { trgt, .. }
            | MirOp::ProjectFromTypeRecord { trgt, .. }
            | MirOp::ProjectFromTypeConcept { trgt, .. }
            | MirOp::ModifyWithIndices { trgt, .. }
            | MirOp::ModifyWithProperties { trgt, .. }
            | MirOp::ModifyWithFields { trgt, .. }
            | MirOp::StructuredExtendTuple { trgt, .. }
            | MirOp::StructuredExtendRecord { trgt, .. }
            | MirOp::StructuredExtendObject { trgt, .. }
            | MirOp::PrefixOp { trgt, .. }
            | MirOp::BinOp { trgt, .. }
            | MirOp::BinEq { trgt, .. }
            | MirOp::BinCmp { trgt, .. }
            | MirOp::RegAssign { trgt, .. }
            | MirOp::TruthyConvert { trgt, .. } => Some(*trgt),

            MirOp::VarStore { .. }
            | MirOp::ReturnAssign { .. }
            | MirOp::Assert { .. }
            | MirOp::Check { .. }
            | MirOp::Debug { .. }
            | MirOp::Jump { .. }
            | MirOp::JumpCond { .. }
            | MirOp::JumpNone { .. }
            | MirOp::VarLifetimeStart { .. }
            | MirOp::VarLifetimeEnd { .. } => None,
        }
    }

    /// Returns every argument read by this instruction.
    ///
    /// Variable reads by name (`AccessLocalVariable`, captures of
    /// `ConstructorLambda`, ...) are reported as the corresponding
    /// variable register. `LoadConst`'s literal is payload and is not a use.
    pub fn used(&self) -> Vec<MirArgument> {
        match self {
            MirOp::LoadConst { .. }
            | MirOp::LoadConstTypedString { .. }
            | MirOp::AccessNamespaceConstant { .. }
            | MirOp::AccessConstField { .. }
            | MirOp::LoadFieldDefaultValue { .. }
            | MirOp::ConstructorPrimaryCollectionEmpty { .. }
            | MirOp::Jump { .. }
            | MirOp::VarLifetimeStart { .. }
            | MirOp::VarLifetimeEnd { .. } => vec![],

            MirOp::AccessCapturedVariable { name, .. } => vec![MirArgument::captured(name.as_str())],
            MirOp::AccessArgVariable { name, .. } => vec![MirArgument::parameter(name.as_str())],
            MirOp::AccessLocalVariable { name, .. } => vec![MirArgument::local(name.as_str())],

            MirOp::ConstructorPrimary { args, .. }
            | MirOp::ConstructorPrimaryCollectionSingletons { args, .. }
            | MirOp::ConstructorPrimaryCollectionCopies { args, .. }
            | MirOp::ConstructorTuple { args, .. }
            | MirOp::CallNamespaceFunction { args, .. }
            | MirOp::CallStaticFunction { args, .. }
            | MirOp::InvokeKnownTarget { args, .. }
            | MirOp::InvokeVirtualTarget { args, .. } => args.clone(),

            MirOp::ConstructorPrimaryCollectionMixed { args, .. } => {
                args.iter().map(|el| el.arg.clone()).collect()
            }
            MirOp::ConstructorRecord { args, .. } => {
                args.iter().map(|(_, arg)| arg.clone()).collect()
            }
            MirOp::ConstructorLambda { captured, .. } => captured
                .iter()
                .map(|name| MirArgument::captured(name.as_str()))
                .collect(),

            MirOp::CallLambda { lambda, args, .. } => {
                let mut used = Vec::with_capacity(1 + args.len());
                used.push(lambda.clone());
                used.extend(args.iter().cloned());
                used
            }

            MirOp::AccessFromIndex { arg, .. }
            | MirOp::ProjectFromIndices { arg, .. }
            | MirOp::AccessFromProperty { arg, .. }
            | MirOp::ProjectFromProperties { arg, .. }
            | MirOp::AccessFromField { arg, .. }
            | MirOp::ProjectFromFields { arg, .. }
            | MirOp::ProjectFromTypeTuple { arg, .. }
            | MirOp::ProjectFromTypeRecord { arg, .. }
            | MirOp::ProjectFromTypeConcept { arg, .. }
            | MirOp::PrefixOp { arg, .. }
            | MirOp::JumpCond { arg, .. }
            | MirOp::JumpNone { arg, .. } => vec![arg.clone()],

            MirOp::ModifyWithIndices { arg, updates, .. } => {
                let mut used = Vec::with_capacity(1 + updates.len());
                used.push(arg.clone());
                used.extend(updates.iter().map(|(_, v)| v.clone()));
                used
            }
            MirOp::ModifyWithProperties { arg, updates, .. }
            | MirOp::ModifyWithFields { arg, updates, .. } => {
                let mut used = Vec::with_capacity(1 + updates.len());
                used.push(arg.clone());
                used.extend(updates.iter().map(|(_, v)| v.clone()));
                used
            }

            MirOp::StructuredExtendTuple { arg, update, .. }
            | MirOp::StructuredExtendRecord { arg, update, .. }
            | MirOp::StructuredExtendObject { arg, update, .. } => {
                vec![arg.clone(), update.clone()]
            }

            MirOp::BinOp { lhs, rhs, .. }
            | MirOp::BinEq { lhs, rhs, .. }
            | MirOp::BinCmp { lhs, rhs, .. } => vec![lhs.clone(), rhs.clone()],

            MirOp::RegAssign { src, .. }
            | MirOp::TruthyConvert { src, .. }
            | MirOp::VarStore { src, .. }
            | MirOp::ReturnAssign { src } => vec![src.clone()],

            MirOp::Assert { cond } | MirOp::Check { cond } => vec![cond.clone()],

            MirOp::Debug { value } => value.iter().cloned().collect(),
        }
    }

    /// Returns every argument written by this instruction.
    ///
    /// `ReturnAssign` writes the implicit return slot, which is not an
    /// argument, so its set is empty.
    pub fn modified(&self) -> Vec<MirArgument> {
        if let Some(trgt) = self.defined_temp() {
            return vec![MirArgument::from(trgt)];
        }
        match self {
            MirOp::VarStore { name, .. } => vec![MirArgument::local(name.as_str())],
            _ => vec![],
        }
    }

    /// Walks every operand-bearing field of this instruction.
    ///
    /// This is a field-level walk, independent of [`used`](Self::used) and
    /// [`modified`](Self::modified); the two must always cover exactly the
    /// same operands. Variable names that denote storage slots are reported
    /// as their variable register. Lifetime-marker names are metadata and
    /// are not operands.
    pub fn operands(&self) -> Vec<MirArgument> {
        let mut out = Vec::new();
        let mut push = |arg: &MirArgument| out.push(arg.clone());
        let trgt = match self {
            MirOp::LoadConst { trgt, .. }
            | MirOp::LoadConstTypedString { trgt, .. }
            | MirOp::AccessNamespaceConstant { trgt, .. }
            | MirOp::AccessConstField { trgt, .. }
            | MirOp::LoadFieldDefaultValue { trgt, .. }
            | MirOp::ConstructorPrimaryCollectionEmpty { trgt, .. } => Some(*trgt),
            MirOp::AccessCapturedVariable { name, trgt } => {
                push(&MirArgument::captured(name.as_str()));
                Some(*trgt)
            }
            MirOp::AccessArgVariable { name, trgt } => {
                push(&MirArgument::parameter(name.as_str()));
                Some(*trgt)
            }
            MirOp::AccessLocalVariable { name, trgt } => {
                push(&MirArgument::local(name.as_str()));
                Some(*trgt)
            }
            MirOp::ConstructorPrimary { args, trgt, .. }
            | MirOp::ConstructorPrimaryCollectionSingletons { args, trgt, .. }
            | MirOp::ConstructorPrimaryCollectionCopies { args, trgt, .. }
            | MirOp::ConstructorTuple { args, trgt }
            | MirOp::CallNamespaceFunction { args, trgt, .. }
            | MirOp::CallStaticFunction { args, trgt, .. }
            | MirOp::InvokeKnownTarget { args, trgt, .. }
            | MirOp::InvokeVirtualTarget { args, trgt, .. } => {
                args.iter().for_each(&mut push);
                Some(*trgt)
            }
            MirOp::ConstructorPrimaryCollectionMixed { args, trgt, .. } => {
                args.iter().for_each(|el| push(&el.arg));
                Some(*trgt)
            }
            MirOp::ConstructorRecord { args, trgt } => {
                args.iter().for_each(|(_, arg)| push(arg));
                Some(*trgt)
            }
            MirOp::ConstructorLambda { captured, trgt, .. } => {
                for name in captured {
                    push(&MirArgument::captured(name.as_str()));
                }
                Some(*trgt)
            }
            MirOp::CallLambda { lambda, args, trgt } => {
                push(lambda);
                args.iter().for_each(&mut push);
                Some(*trgt)
            }
            MirOp::AccessFromIndex { arg, trgt, .. }
            | MirOp::ProjectFromIndices { arg, trgt, .. }
            | MirOp::AccessFromProperty { arg, trgt, .. }
            | MirOp::ProjectFromProperties { arg, trgt, .. }
            | MirOp::AccessFromField { arg, trgt, .. }
            | MirOp::ProjectFromFields { arg, trgt, .. }
            | MirOp::ProjectFromTypeTuple { arg, trgt, .. }
            | MirOp::ProjectFromTypeRecord { arg, trgt, .. }
            | MirOp::ProjectFromTypeConcept { arg, trgt, .. }
            | MirOp::PrefixOp { arg, trgt, .. } => {
                push(arg);
                Some(*trgt)
            }
            MirOp::ModifyWithIndices { arg, updates, trgt } => {
                push(arg);
                updates.iter().for_each(|(_, v)| push(v));
                Some(*trgt)
            }
            MirOp::ModifyWithProperties { arg, updates, trgt }
            | MirOp::ModifyWithFields { arg, updates, trgt } => {
                push(arg);
                updates.iter().for_each(|(_, v)| push(v));
                Some(*trgt)
            }
            MirOp::StructuredExtendTuple { arg, update, trgt }
            | MirOp::StructuredExtendRecord { arg, update, trgt }
            | MirOp::StructuredExtendObject { arg, update, trgt } => {
                push(arg);
                push(update);
                Some(*trgt)
            }
            MirOp::BinOp { lhs, rhs, trgt, .. }
            | MirOp::BinEq { lhs, rhs, trgt, .. }
            | MirOp::BinCmp { lhs, rhs, trgt, .. } => {
                push(lhs);
                push(rhs);
                Some(*trgt)
            }
            MirOp::RegAssign { src, trgt } | MirOp::TruthyConvert { src, trgt } => {
                push(src);
                Some(*trgt)
            }
            MirOp::VarStore { src, name } => {
                push(src);
                push(&MirArgument::local(name.as_str()));
                None
            }
            MirOp::ReturnAssign { src } => {
                push(src);
                None
            }
            MirOp::Assert { cond } | MirOp::Check { cond } => {
                push(cond);
                None
            }
            MirOp::Debug { value } => {
                if let Some(value) = value {
                    push(value);
                }
                None
            }
            MirOp::JumpCond { arg, .. } | MirOp::JumpNone { arg, .. } => {
                push(arg);
                None
            }
            MirOp::Jump { .. } | MirOp::VarLifetimeStart { .. } | MirOp::VarLifetimeEnd { .. } => {
                None
            }
        };
        if let Some(trgt) = trgt {
            out.push(MirArgument::from(trgt));
        }
        out
    }

    /// Visit every argument in a read position, mutably.
    ///
    /// Destinations and name-keyed variable reads are not visited: they are
    /// storage slots, not operand values.
    pub fn for_each_used_mut(&mut self, mut f: impl FnMut(&mut MirArgument)) {
        match self {
            MirOp::LoadConst { .. }
            | MirOp::LoadConstTypedString { .. }
            | MirOp::AccessNamespaceConstant { .. }
            | MirOp::AccessConstField { .. }
            | MirOp::LoadFieldDefaultValue { .. }
            | MirOp::AccessCapturedVariable { .. }
            | MirOp::AccessArgVariable { .. }
            | MirOp::AccessLocalVariable { .. }
            | MirOp::ConstructorPrimaryCollectionEmpty { .. }
            | MirOp::ConstructorLambda { .. }
            | MirOp::Jump { .. }
            | MirOp::VarLifetimeStart { .. }
            | MirOp::VarLifetimeEnd { .. } => {}

            MirOp::ConstructorPrimary { args, .. }
            | MirOp::ConstructorPrimaryCollectionSingletons { args, .. }
            | MirOp::ConstructorPrimaryCollectionCopies { args, .. }
            | MirOp::ConstructorTuple { args, .. }
            | MirOp::CallNamespaceFunction { args, .. }
            | MirOp::CallStaticFunction { args, .. }
            | MirOp::InvokeKnownTarget { args, .. }
            | MirOp::InvokeVirtualTarget { args, .. } => args.iter_mut().for_each(f),

            MirOp::ConstructorPrimaryCollectionMixed { args, .. } => {
                args.iter_mut().for_each(|el| f(&mut el.arg));
            }
            MirOp::ConstructorRecord { args, .. } => {
                args.iter_mut().for_each(|(_, arg)| f(arg));
            }
            MirOp::CallLambda { lambda, args, .. } => {
                f(lambda);
                args.iter_mut().for_each(f);
            }

            MirOp::AccessFromIndex { arg, .. }
            | MirOp::ProjectFromIndices { arg, .. }
            | MirOp::AccessFromProperty { arg, .. }
            | MirOp::ProjectFromProperties { arg, .. }
            | MirOp::AccessFromField { arg, .. }
            | MirOp::ProjectFromFields { arg, .. }
            | MirOp::ProjectFromTypeTuple { arg, .. }
            | MirOp::ProjectFromTypeRecord { arg, .. }
            | MirOp::ProjectFromTypeConcept { arg, .. }
            | MirOp::PrefixOp { arg, .. }
            | MirOp::JumpCond { arg, .. }
            | MirOp::JumpNone { arg, .. } => f(arg),

            MirOp::ModifyWithIndices { arg, updates, .. } => {
                f(arg);
                updates.iter_mut().for_each(|(_, v)| f(v));
            }
            MirOp::ModifyWithProperties { arg, updates, .. }
            | MirOp::ModifyWithFields { arg, updates, .. } => {
                f(arg);
                updates.iter_mut().for_each(|(_, v)| f(v));
            }

            MirOp::StructuredExtendTuple { arg, update, .. }
            | MirOp::StructuredExtendRecord { arg, update, .. }
            | MirOp::StructuredExtendObject { arg, update, .. } => {
                f(arg);
                f(update);
            }

            MirOp::BinOp { lhs, rhs, .. }
            | MirOp::BinEq { lhs, rhs, .. }
            | MirOp::BinCmp { lhs, rhs, .. } => {
                f(lhs);
                f(rhs);
            }

            MirOp::RegAssign { src, .. }
            | MirOp::TruthyConvert { src, .. }
            | MirOp::VarStore { src, .. }
            | MirOp::ReturnAssign { src } => f(src),

            MirOp::Assert { cond } | MirOp::Check { cond } => f(cond),

            MirOp::Debug { value } => {
                if let Some(value) = value {
                    f(value);
                }
            }
        }
    }

    /// Replace every read of `old` with `new`, in place.
    ///
    /// Returns the number of operand slots rewritten. Destinations are
    /// never substituted. Used by copy propagation and operand forwarding.
    pub fn substitute_arg(&mut self, old: &MirArgument, new: &MirArgument) -> usize {
        let mut count = 0;
        self.for_each_used_mut(|arg| {
            if arg == old {
                *arg = new.clone();
                count += 1;
            }
        });
        count
    }

    /// Successor labels named by a control-transfer instruction.
    ///
    /// Empty for every non-jump instruction, lifetime markers included.
    pub fn successors(&self) -> SmallVec<[&BlockLabel; 2]> {
        match self {
            MirOp::Jump { target } => smallvec![target],
            MirOp::JumpCond {
                true_block,
                false_block,
                ..
            } => smallvec![true_block, false_block],
            MirOp::JumpNone {
                none_block,
                some_block,
                ..
            } => smallvec![none_block, some_block],
            _ => SmallVec::new(),
        }
    }
}

// ── Canonical text ──────────────────────────────────────────────────

/// Write `items` separated by `", "`, rendering each with `each`.
fn write_list<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    mut each: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        each(&mut *f, item)?;
    }
    Ok(())
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[MirArgument]) -> fmt::Result {
    write_list(f, args, |f, arg| write!(f, "{arg}"))
}

fn write_updates<K: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    updates: &[(K, MirArgument)],
) -> fmt::Result {
    write_list(f, updates, |f, (key, arg)| write!(f, "{key}={arg}"))
}

fn write_invoke(
    f: &mut fmt::Formatter<'_>,
    trgt: TempRegister,
    args: &[MirArgument],
    method: fmt::Arguments<'_>,
) -> fmt::Result {
    let (receiver, rest) = match args.split_first() {
        Some((receiver, rest)) => (Some(receiver), rest),
        None => (None, args),
    };
    write!(f, "{trgt} = ")?;
    if let Some(receiver) = receiver {
        write!(f, "{receiver}")?;
    }
    write!(f, "->{method}(")?;
    write_args(f, rest)?;
    f.write_str(")")
}

impl fmt::Display for MirOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirOp::LoadConst { src, trgt } => write!(f, "{trgt} = {src}"),
            MirOp::LoadConstTypedString {
                ivalue, tkey, trgt, ..
            } => write!(f, "{trgt} = {ivalue}#{tkey}"),
            MirOp::AccessNamespaceConstant { gkey, trgt } => write!(f, "{trgt} = {gkey}"),
            MirOp::AccessConstField { ckey, trgt } => write!(f, "{trgt} = {ckey}"),
            MirOp::LoadFieldDefaultValue { fkey, trgt } => write!(f, "{trgt} = default({fkey})"),
            MirOp::AccessCapturedVariable { name, trgt }
            | MirOp::AccessArgVariable { name, trgt }
            | MirOp::AccessLocalVariable { name, trgt } => write!(f, "{trgt} = {name}"),

            MirOp::ConstructorPrimary { tkey, args, trgt } => {
                write!(f, "{trgt} = {tkey}@(")?;
                write_args(f, args)?;
                f.write_str(")")
            }
            MirOp::ConstructorPrimaryCollectionEmpty { tkey, trgt } => {
                write!(f, "{trgt} = {tkey}@{{}}")
            }
            MirOp::ConstructorPrimaryCollectionSingletons { tkey, args, trgt } => {
                write!(f, "{trgt} = {tkey}@{{")?;
                write_args(f, args)?;
                f.write_str("}")
            }
            MirOp::ConstructorPrimaryCollectionCopies { tkey, args, trgt } => {
                write!(f, "{trgt} = {tkey}@{{")?;
                write_list(f, args, |f, arg| write!(f, "expand({arg})"))?;
                f.write_str("}")
            }
            MirOp::ConstructorPrimaryCollectionMixed { tkey, args, trgt } => {
                write!(f, "{trgt} = {tkey}@{{")?;
                write_list(f, args, |f, el| {
                    if el.expand {
                        write!(f, "expand({})", el.arg)
                    } else {
                        write!(f, "{}", el.arg)
                    }
                })?;
                f.write_str("}")
            }
            MirOp::ConstructorTuple { args, trgt } => {
                write!(f, "{trgt} = @[")?;
                write_args(f, args)?;
                f.write_str("]")
            }
            MirOp::ConstructorRecord { args, trgt } => {
                write!(f, "{trgt} = @{{")?;
                write_updates(f, args)?;
                f.write_str("}")
            }
            MirOp::ConstructorLambda { lkey, trgt, .. } => write!(f, "{trgt} = fn({lkey})"),

            MirOp::CallNamespaceFunction { fkey, args, trgt } => {
                write!(f, "{trgt} = {fkey}(")?;
                write_args(f, args)?;
                f.write_str(")")
            }
            MirOp::CallStaticFunction { skey, args, trgt } => {
                write!(f, "{trgt} = {skey}(")?;
                write_args(f, args)?;
                f.write_str(")")
            }
            MirOp::InvokeKnownTarget { mkey, args, trgt } => {
                write_invoke(f, *trgt, args, format_args!("::{mkey}::"))
            }
            MirOp::InvokeVirtualTarget {
                vresolve,
                args,
                trgt,
            } => write_invoke(f, *trgt, args, format_args!("{vresolve}")),
            MirOp::CallLambda { lambda, args, trgt } => {
                write!(f, "{trgt} = {lambda}(")?;
                write_args(f, args)?;
                f.write_str(")")
            }

            MirOp::AccessFromIndex { arg, idx, trgt } => write!(f, "{trgt} = {arg}[{idx}]"),
            MirOp::ProjectFromIndices { arg, indices, trgt } => {
                write!(f, "{trgt} = {arg}@[")?;
                write_list(f, indices, |f, i| write!(f, "{i}"))?;
                f.write_str("]")
            }
            MirOp::AccessFromProperty {
                arg,
                property: name,
                trgt,
            }
            | MirOp::AccessFromField {
                arg,
                field: name,
                trgt,
            } => write!(f, "{trgt} = {arg}.{name}"),
            MirOp::ProjectFromProperties {
                arg,
                properties: names,
                trgt,
            }
            | MirOp::ProjectFromFields {
                arg,
                fields: names,
                trgt,
            } => {
                write!(f, "{trgt} = {arg}@{{")?;
                write_list(f, names, |f, n| f.write_str(n))?;
                f.write_str("}")
            }
            MirOp::ProjectFromTypeTuple { arg, ptype, trgt }
            | MirOp::ProjectFromTypeRecord { arg, ptype, trgt } => {
                write!(f, "{trgt} = {arg}#{ptype}")
            }
            MirOp::ProjectFromTypeConcept { arg, ctypes, trgt } => {
                write!(f, "{trgt} = {arg}#")?;
                for (i, ty) in ctypes.iter().enumerate() {
                    if i > 0 {
                        f.write_str("&")?;
                    }
                    write!(f, "{ty}")?;
                }
                Ok(())
            }
            MirOp::ModifyWithIndices { arg, updates, trgt } => {
                write!(f, "{trgt} = {arg}<~(")?;
                write_updates(f, updates)?;
                f.write_str(")")
            }
            MirOp::ModifyWithProperties { arg, updates, trgt }
            | MirOp::ModifyWithFields { arg, updates, trgt } => {
                write!(f, "{trgt} = {arg}<~(")?;
                write_updates(f, updates)?;
                f.write_str(")")
            }
            MirOp::StructuredExtendTuple { arg, update, trgt }
            | MirOp::StructuredExtendRecord { arg, update, trgt }
            | MirOp::StructuredExtendObject { arg, update, trgt } => {
                write!(f, "{trgt} = {arg}<+({update})")
            }

            MirOp::PrefixOp { op, arg, trgt } => write!(f, "{trgt} = {op}{arg}"),
            MirOp::BinOp { lhs, op, rhs, trgt } => write!(f, "{trgt} = {lhs}{op}{rhs}"),
            MirOp::BinEq { lhs, op, rhs, trgt } => write!(f, "{trgt} = {lhs}{op}{rhs}"),
            MirOp::BinCmp { lhs, op, rhs, trgt } => write!(f, "{trgt} = {lhs}{op}{rhs}"),

            MirOp::RegAssign { src, trgt } => write!(f, "{trgt} = {src}"),
            MirOp::TruthyConvert { src, trgt } => write!(f, "{trgt} = truthy({src})"),
            MirOp::VarStore { src, name } => write!(f, "{name} = {src}"),
            MirOp::ReturnAssign { src } => write!(f, "_return_ = {src}"),

            MirOp::Assert { cond } => write!(f, "assert {cond}"),
            MirOp::Check { cond } => write!(f, "check {cond}"),
            MirOp::Debug { value: Some(value) } => write!(f, "_debug {value}"),
            MirOp::Debug { value: None } => f.write_str("_debug break"),

            MirOp::Jump { target } => write!(f, "jump {target}"),
            MirOp::JumpCond {
                arg,
                true_block,
                false_block,
            } => write!(f, "cjump {arg} {true_block} {false_block}"),
            MirOp::JumpNone {
                arg,
                none_block,
                some_block,
            } => write!(f, "njump {arg} {none_block} {some_block}"),

            MirOp::VarLifetimeStart { name, .. } => write!(f, "v-begin {name}"),
            MirOp::VarLifetimeEnd { name } => write!(f, "v-end {name}"),
        }
    }
}

// ── Positioned instruction ──────────────────────────────────────────

/// An instruction together with its source provenance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MirInstr {
    pub sinfo: SourceInfo,
    pub op: MirOp,
}

impl MirInstr {
    #[inline]
    pub fn new(sinfo: SourceInfo, op: MirOp) -> Self {
        Self { sinfo, op }
    }

    #[inline]
    pub fn tag(&self) -> MirOpTag {
        self.op.tag()
    }

    #[inline]
    pub fn sinfo(&self) -> SourceInfo {
        self.sinfo
    }

    #[inline]
    pub fn is_terminator(&self) -> bool {
        self.op.is_terminator()
    }

    #[inline]
    pub fn is_lifetime_marker(&self) -> bool {
        self.op.tag().is_lifetime_marker()
    }

    #[inline]
    pub fn used(&self) -> Vec<MirArgument> {
        self.op.used()
    }

    #[inline]
    pub fn modified(&self) -> Vec<MirArgument> {
        self.op.modified()
    }
}

impl fmt::Display for MirInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.op, f)
    }
}

#[cfg(test)]
mod tests;
