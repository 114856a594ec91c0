//! Per-function MIR bodies.
//!
//! A body is either **primitive** (an opaque marker for an intrinsic with
//! no MIR) or a CFG of blocks held in an insertion-ordered [`BlockMap`].
//! Consumers must branch on [`MirPayload`] before touching blocks.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::arg::{TempAllocator, TempRegister};
use crate::block::MirBlock;
use crate::instr::MirInstr;
use crate::keys::BlockLabel;
use crate::source::SourceInfo;

// ── Block map ───────────────────────────────────────────────────────

/// Insertion-ordered label → block mapping.
///
/// Iteration order is the order labels were first inserted, which keeps
/// dumps deterministic. Replacing an existing label keeps its position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockMap {
    blocks: Vec<MirBlock>,
    index: FxHashMap<BlockLabel, usize>,
}

impl BlockMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a block under its own label.
    ///
    /// If the label is already present the old block is replaced in place
    /// and returned.
    pub fn insert(&mut self, block: MirBlock) -> Option<MirBlock> {
        if let Some(&idx) = self.index.get(block.label()) {
            debug!(label = %block.label(), "replacing existing MIR block");
            return Some(std::mem::replace(&mut self.blocks[idx], block));
        }
        self.index.insert(block.label().clone(), self.blocks.len());
        self.blocks.push(block);
        None
    }

    /// Remove a block, preserving the order of the rest.
    pub fn remove(&mut self, label: &BlockLabel) -> Option<MirBlock> {
        let idx = self.index.remove(label)?;
        let block = self.blocks.remove(idx);
        for slot in self.index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        Some(block)
    }

    pub fn get(&self, label: &BlockLabel) -> Option<&MirBlock> {
        self.index.get(label).map(|&idx| &self.blocks[idx])
    }

    /// Instruction list of `label`'s block, for in-place editing.
    ///
    /// Blocks themselves are never handed out mutably, so a label always
    /// matches its index entry. Replace a whole block with
    /// [`insert`](Self::insert).
    pub fn ops_mut(&mut self, label: &BlockLabel) -> Option<&mut Vec<MirInstr>> {
        let idx = *self.index.get(label)?;
        Some(&mut self.blocks[idx].ops)
    }

    #[inline]
    pub fn contains(&self, label: &BlockLabel) -> bool {
        self.index.contains_key(label)
    }

    /// Position of `label` in iteration order.
    #[inline]
    pub fn index_of(&self, label: &BlockLabel) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Block at a position in iteration order.
    #[inline]
    pub fn get_index(&self, idx: usize) -> Option<&MirBlock> {
        self.blocks.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MirBlock> {
        self.blocks.iter()
    }

    /// Every block's label with its editable instruction list.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&BlockLabel, &mut Vec<MirInstr>)> + '_ {
        self.blocks.iter_mut().map(MirBlock::parts_mut)
    }

    pub fn labels(&self) -> impl Iterator<Item = &BlockLabel> {
        self.blocks.iter().map(MirBlock::label)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl FromIterator<MirBlock> for BlockMap {
    fn from_iter<I: IntoIterator<Item = MirBlock>>(iter: I) -> Self {
        let mut map = BlockMap::new();
        for block in iter {
            map.insert(block);
        }
        map
    }
}

impl<'a> IntoIterator for &'a BlockMap {
    type Item = &'a MirBlock;
    type IntoIter = std::slice::Iter<'a, MirBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ── Body ────────────────────────────────────────────────────────────

/// What a body holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MirPayload {
    /// Opaque marker for a natively implemented body.
    Primitive(String),
    Blocks(BlockMap),
}

/// One function, method, or lambda body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MirBody {
    file: String,
    sinfo: SourceInfo,
    /// Every variable name appearing in the body. Ordered so slot
    /// allocation and dumps are deterministic.
    var_names: BTreeSet<String>,
    payload: MirPayload,
}

impl MirBody {
    /// A body with no MIR, carrying only an opaque marker.
    pub fn new_primitive(
        file: impl Into<String>,
        sinfo: SourceInfo,
        var_names: impl IntoIterator<Item = String>,
        marker: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            sinfo,
            var_names: var_names.into_iter().collect(),
            payload: MirPayload::Primitive(marker.into()),
        }
    }

    /// A CFG body. Blocks keep the given order; a repeated label replaces
    /// the earlier block in its original position.
    pub fn new_blocks(
        file: impl Into<String>,
        sinfo: SourceInfo,
        var_names: impl IntoIterator<Item = String>,
        blocks: impl IntoIterator<Item = MirBlock>,
    ) -> Self {
        Self {
            file: file.into(),
            sinfo,
            var_names: var_names.into_iter().collect(),
            payload: MirPayload::Blocks(blocks.into_iter().collect()),
        }
    }

    #[inline]
    pub fn file(&self) -> &str {
        &self.file
    }

    #[inline]
    pub fn sinfo(&self) -> SourceInfo {
        self.sinfo
    }

    #[inline]
    pub fn var_names(&self) -> &BTreeSet<String> {
        &self.var_names
    }

    /// Mutable access for passes that introduce or retire variables.
    #[inline]
    pub fn var_names_mut(&mut self) -> &mut BTreeSet<String> {
        &mut self.var_names
    }

    #[inline]
    pub fn payload(&self) -> &MirPayload {
        &self.payload
    }

    #[inline]
    pub fn payload_mut(&mut self) -> &mut MirPayload {
        &mut self.payload
    }

    #[inline]
    pub fn is_primitive(&self) -> bool {
        matches!(self.payload, MirPayload::Primitive(_))
    }

    pub fn blocks(&self) -> Option<&BlockMap> {
        match &self.payload {
            MirPayload::Blocks(blocks) => Some(blocks),
            MirPayload::Primitive(_) => None,
        }
    }

    pub fn blocks_mut(&mut self) -> Option<&mut BlockMap> {
        match &mut self.payload {
            MirPayload::Blocks(blocks) => Some(blocks),
            MirPayload::Primitive(_) => None,
        }
    }

    /// Highest temp register mentioned anywhere in the body.
    pub fn max_temp_id(&self) -> Option<TempRegister> {
        self.blocks()?.iter().filter_map(MirBlock::max_temp_id).max()
    }

    /// Allocator that continues numbering after every existing temp.
    ///
    /// Exhausted (never panics) when the body already uses `#tmp_4294967295`.
    pub fn temp_allocator(&self) -> TempAllocator {
        TempAllocator::after(self.max_temp_id())
    }
}

#[cfg(test)]
mod tests;
