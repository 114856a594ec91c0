//! Deterministic dumps of MIR bodies.
//!
//! [`BodyDump`] is the structured form test harnesses snapshot: one
//! record per block, in block-map order, each with the block's first
//! source line (`-1` when empty) and the canonical text of every
//! instruction. A primitive body dumps as its opaque marker.
//!
//! `Display for MirBody` gives the human-oriented listing used in
//! debug logs.

use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::block::MirBlock;
use crate::body::{MirBody, MirPayload};

/// Line reported for a block with no instructions.
pub const EMPTY_BLOCK_LINE: i64 = -1;

/// Structured dump of one block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlockDump {
    pub label: String,
    pub line: i64,
    pub ops: Vec<String>,
}

impl BlockDump {
    pub fn of(block: &MirBlock) -> Self {
        Self {
            label: block.label().to_string(),
            line: block.first_line().map_or(EMPTY_BLOCK_LINE, i64::from),
            ops: block.ops.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Structured dump of a body.
///
/// Serializes untagged: a primitive body is a bare string and a CFG body
/// is an array of block records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BodyDump {
    Primitive(String),
    Blocks(Vec<BlockDump>),
}

impl MirBody {
    /// Structured dump, stable across clones and runs.
    pub fn dump(&self) -> BodyDump {
        let dump = match self.payload() {
            MirPayload::Primitive(marker) => BodyDump::Primitive(marker.clone()),
            MirPayload::Blocks(blocks) => BodyDump::Blocks(blocks.iter().map(BlockDump::of).collect()),
        };
        trace!(file = self.file(), line = self.sinfo().line, "dumped MIR body");
        dump
    }
}

/// Pretty-printed JSON of [`MirBody::dump`].
pub fn to_json(body: &MirBody) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string_pretty(&body.dump())?;
    Ok(json)
}

impl fmt::Display for MirBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body {}:{}", self.file(), self.sinfo())?;
        match self.payload() {
            MirPayload::Primitive(marker) => writeln!(f, " = primitive {marker}"),
            MirPayload::Blocks(blocks) => {
                writeln!(f)?;
                if !self.var_names().is_empty() {
                    f.write_str("vars:")?;
                    for name in self.var_names() {
                        write!(f, " {name}")?;
                    }
                    writeln!(f)?;
                }
                for block in blocks {
                    write!(f, "{block}")?;
                }
                Ok(())
            }
        }
    }
}
