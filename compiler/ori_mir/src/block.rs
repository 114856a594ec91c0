//! Basic blocks.
//!
//! A block is a label plus an ordered instruction list. Lifetime markers
//! may trail the control transfer, so "the terminator" is the last
//! instruction that is not a lifetime marker, provided it is a jump.

use std::fmt;

use smallvec::SmallVec;

use crate::arg::TempRegister;
use crate::instr::MirInstr;
use crate::keys::BlockLabel;

/// A labeled, straight-line instruction sequence.
///
/// The label is fixed at construction because the owning
/// [`BlockMap`](crate::body::BlockMap) indexes blocks by it. The
/// instruction list is freely mutable by the pass that owns the body.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MirBlock {
    label: BlockLabel,
    pub ops: Vec<MirInstr>,
}

impl MirBlock {
    pub fn new(label: BlockLabel, ops: Vec<MirInstr>) -> Self {
        Self { label, ops }
    }

    /// A block with no instructions yet.
    pub fn empty(label: BlockLabel) -> Self {
        Self::new(label, Vec::new())
    }

    #[inline]
    pub fn label(&self) -> &BlockLabel {
        &self.label
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// The label alongside the editable instruction list.
    pub fn parts_mut(&mut self) -> (&BlockLabel, &mut Vec<MirInstr>) {
        (&self.label, &mut self.ops)
    }

    pub fn push(&mut self, instr: MirInstr) {
        self.ops.push(instr);
    }

    /// Source line of the first instruction, if any.
    pub fn first_line(&self) -> Option<u32> {
        self.ops.first().map(|instr| instr.sinfo.line)
    }

    /// Index of the last instruction that is not a lifetime marker.
    pub fn control_position(&self) -> Option<usize> {
        self.ops.iter().rposition(|instr| !instr.is_lifetime_marker())
    }

    /// The block's control transfer, skipping trailing lifetime markers.
    ///
    /// `None` if the block is empty, holds only markers, or ends in a
    /// non-jump instruction.
    pub fn terminator(&self) -> Option<&MirInstr> {
        self.control_position()
            .map(|idx| &self.ops[idx])
            .filter(|instr| instr.is_terminator())
    }

    /// Successor labels named by the terminator.
    pub fn successors(&self) -> SmallVec<[&BlockLabel; 2]> {
        self.terminator()
            .map(|instr| instr.op.successors())
            .unwrap_or_default()
    }

    /// Highest temp register defined or read in this block.
    pub fn max_temp_id(&self) -> Option<TempRegister> {
        self.ops
            .iter()
            .flat_map(|instr| {
                instr
                    .op
                    .defined_temp()
                    .into_iter()
                    .chain(instr.used().into_iter().filter_map(|arg| arg.as_temp()))
            })
            .max()
    }
}

impl fmt::Display for MirBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.label)?;
        for instr in &self.ops {
            writeln!(f, "  {instr}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
