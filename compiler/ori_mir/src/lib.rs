//! Mid-level IR for the Ori compiler.
//!
//! This crate provides:
//!
//! - **Operands** ([`MirArgument`]): temp registers, captured/parameter/
//!   local variable slots, and literal constants, each with a stable
//!   identity string for keying dataflow tables.
//!
//! - **Instructions** ([`MirOp`], [`MirInstr`]): a closed set of kinds,
//!   each exposing its complete read set ([`MirOp::used`]) and write set
//!   ([`MirOp::modified`]). Operands are rewritten in place by passes.
//!
//! - **Blocks and bodies** ([`MirBlock`], [`MirBody`], [`BlockMap`]): a
//!   per-function CFG in an insertion-ordered label map, or an opaque
//!   marker for primitive bodies with no MIR.
//!
//! - **CFG queries** ([`graph`]), a **well-formedness checker**
//!   ([`validate_body`]), and **deterministic dumps** ([`BodyDump`]) for
//!   snapshot tests.
//!
//! # Design
//!
//! Construction is total: nothing validates arity, operand types, or key
//! resolution. The lowering pass that produces MIR is trusted, and the
//! checker is run separately between phases. A body is owned by one pass
//! at a time; parallelism happens across bodies, never within one.

mod arg;
mod block;
mod body;
pub mod dump;
pub mod graph;
mod instr;
mod keys;
mod ops;
mod source;
pub mod validate;

#[cfg(test)]
mod test_helpers;

pub use arg::{MirArgument, MirConstant, MirRegister, TempAllocator, TempRegister};
pub use block::MirBlock;
pub use body::{BlockMap, MirBody, MirPayload};
pub use dump::{BlockDump, BodyDump};
pub use instr::{CollectionElement, MirInstr, MirOp, MirOpTag, OpCategory};
pub use keys::{
    BlockLabel, ConstKey, FieldKey, FunctionKey, GlobalKey, LambdaKey, MethodKey,
    ResolvedTypeKey, StaticKey, TypeKey, VirtualMethodKey,
};
pub use ops::{BinOp, CmpOp, EqOp, PrefixOp};
pub use source::SourceInfo;
pub use validate::{check_body, validate_body, CheckConfig, MirError, MirErrors};
