//! Shared test utilities for MIR tests.
//!
//! Factory shorthands used across `instr`, `block`, `body`, `graph`,
//! `validate`, and `dump` tests. Only compiled in test builds.

use crate::arg::{MirArgument, TempRegister};
use crate::block::MirBlock;
use crate::body::MirBody;
use crate::instr::{MirInstr, MirOp};
use crate::keys::BlockLabel;
use crate::source::SourceInfo;

/// Shorthand for `TempRegister::new(n)`.
pub(crate) fn t(n: u32) -> TempRegister {
    TempRegister::new(n)
}

/// Shorthand for a temp-register argument.
pub(crate) fn v(n: u32) -> MirArgument {
    MirArgument::temp(n)
}

/// Shorthand for `BlockLabel::new(s)`.
pub(crate) fn l(s: &str) -> BlockLabel {
    BlockLabel::new(s)
}

/// Wrap an op at a fixed line.
pub(crate) fn at(line: u32, op: MirOp) -> MirInstr {
    MirInstr::new(SourceInfo::at(line, 1), op)
}

/// Wrap an op at line 1.
pub(crate) fn i(op: MirOp) -> MirInstr {
    at(1, op)
}

pub(crate) fn jump(target: &str) -> MirOp {
    MirOp::Jump { target: l(target) }
}

pub(crate) fn cjump(cond: MirArgument, then_block: &str, else_block: &str) -> MirOp {
    MirOp::JumpCond {
        arg: cond,
        true_block: l(then_block),
        false_block: l(else_block),
    }
}

/// A block whose instructions all sit at line 1.
pub(crate) fn block(label: &str, ops: Vec<MirOp>) -> MirBlock {
    MirBlock::new(l(label), ops.into_iter().map(i).collect())
}

/// A CFG body in `test.ori` with no declared variables.
pub(crate) fn cfg_body(blocks: Vec<MirBlock>) -> MirBody {
    MirBody::new_blocks(
        "test.ori",
        SourceInfo::at(1, 1),
        std::iter::empty::<String>(),
        blocks,
    )
}

/// `entry: jump exit` / `exit: <empty>`.
pub(crate) fn trivial_body() -> MirBody {
    cfg_body(vec![block("entry", vec![jump("exit")]), block("exit", vec![])])
}
