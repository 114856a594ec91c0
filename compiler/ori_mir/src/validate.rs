//! Well-formedness checking for MIR bodies.
//!
//! Construction never validates anything; this module is the separate
//! checker that producers and pass pipelines run between phases. It
//! collects every problem instead of stopping at the first, so one run
//! reports a whole broken body.
//!
//! Checked:
//! - the body is a CFG, with entry and exit blocks present
//! - every non-exit block is non-empty and ends in a control transfer
//!   (trailing lifetime markers are allowed after it)
//! - the exit block holds nothing but lifetime markers unless it too
//!   ends in a control transfer
//! - no control transfer appears before a block's end
//! - every jump target names a block in the body
//! - every block other than the exit is reachable from the entry
//!   (unless disabled in [`CheckConfig`])

use thiserror::Error;
use tracing::{debug, trace};

use crate::body::{BlockMap, MirBody};
use crate::graph;
use crate::instr::MirOpTag;
use crate::keys::BlockLabel;

// ── Configuration ───────────────────────────────────────────────────

/// Conventions the checker enforces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckConfig {
    /// Label control enters the body at.
    pub entry: BlockLabel,
    /// The fall-out block. It alone may be empty or hold only lifetime
    /// markers.
    pub exit: BlockLabel,
    /// Report blocks unreachable from `entry`.
    pub require_reachable: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            entry: BlockLabel::entry(),
            exit: BlockLabel::exit(),
            require_reachable: true,
        }
    }
}

impl CheckConfig {
    #[must_use]
    pub fn with_entry(mut self, entry: impl Into<BlockLabel>) -> Self {
        self.entry = entry.into();
        self
    }

    #[must_use]
    pub fn with_exit(mut self, exit: impl Into<BlockLabel>) -> Self {
        self.exit = exit.into();
        self
    }

    /// Tolerate unreachable blocks, e.g. before a cleanup pass has run.
    #[must_use]
    pub fn allow_unreachable(mut self) -> Self {
        self.require_reachable = false;
        self
    }
}

// ── Problems ────────────────────────────────────────────────────────

/// One well-formedness violation.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum MirError {
    #[error("body in `{file}` is primitive and has no blocks")]
    PrimitiveBody { file: String },

    #[error("entry block `{label}` is missing")]
    MissingEntry { label: BlockLabel },

    #[error("exit block `{label}` is missing")]
    MissingExit { label: BlockLabel },

    #[error("block `{label}` has no instructions")]
    EmptyBlock { label: BlockLabel },

    #[error("block `{label}` ends in `{last}` instead of a control transfer")]
    UnterminatedBlock { label: BlockLabel, last: MirOpTag },

    #[error("block `{label}` has `{tag}` at position {index}, before its end")]
    TerminatorNotLast {
        label: BlockLabel,
        index: usize,
        tag: MirOpTag,
    },

    #[error("block `{label}` jumps to missing block `{target}`")]
    DanglingTarget {
        label: BlockLabel,
        target: BlockLabel,
    },

    #[error("block `{label}` is unreachable from `{entry}`")]
    UnreachableBlock {
        label: BlockLabel,
        entry: BlockLabel,
    },
}

/// Every violation found in one body, in discovery order.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("ill-formed MIR body ({} problem(s)): {}", .0.len(), join_problems(.0))]
pub struct MirErrors(Vec<MirError>);

fn join_problems(problems: &[MirError]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl MirErrors {
    pub fn errors(&self) -> &[MirError] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<MirError> {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MirError> {
        self.0.iter()
    }
}

impl IntoIterator for MirErrors {
    type Item = MirError;
    type IntoIter = std::vec::IntoIter<MirError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// ── Checker ─────────────────────────────────────────────────────────

/// Collect every well-formedness problem in `body`.
pub fn check_body(body: &MirBody, config: &CheckConfig) -> Vec<MirError> {
    let Some(blocks) = body.blocks() else {
        let problem = MirError::PrimitiveBody {
            file: body.file().to_owned(),
        };
        trace!(%problem, "MIR problem");
        return vec![problem];
    };

    let mut problems = Vec::new();
    check_blocks(blocks, config, &mut problems);

    for problem in &problems {
        trace!(%problem, "MIR problem");
    }
    debug!(
        file = body.file(),
        blocks = blocks.len(),
        problems = problems.len(),
        "checked MIR body"
    );
    problems
}

/// Check `body`, failing with every problem found.
pub fn validate_body(body: &MirBody, config: &CheckConfig) -> Result<(), MirErrors> {
    let problems = check_body(body, config);
    if problems.is_empty() {
        Ok(())
    } else {
        Err(MirErrors(problems))
    }
}

fn check_blocks(blocks: &BlockMap, config: &CheckConfig, problems: &mut Vec<MirError>) {
    let has_entry = blocks.contains(&config.entry);
    if !has_entry {
        problems.push(MirError::MissingEntry {
            label: config.entry.clone(),
        });
    }
    if !blocks.contains(&config.exit) {
        problems.push(MirError::MissingExit {
            label: config.exit.clone(),
        });
    }

    for block in blocks {
        let label = block.label();
        let is_exit = *label == config.exit;

        match block.control_position() {
            None if block.is_empty() => {
                if !is_exit {
                    problems.push(MirError::EmptyBlock {
                        label: label.clone(),
                    });
                }
            }
            // Only lifetime markers.
            None => {
                if let (false, Some(last)) = (is_exit, block.ops.last()) {
                    problems.push(MirError::UnterminatedBlock {
                        label: label.clone(),
                        last: last.tag(),
                    });
                }
            }
            Some(end) => {
                for (index, instr) in block.ops[..end].iter().enumerate() {
                    if instr.is_terminator() {
                        problems.push(MirError::TerminatorNotLast {
                            label: label.clone(),
                            index,
                            tag: instr.tag(),
                        });
                    }
                }
                // The exit may fall out, but only past lifetime markers.
                let last = block.ops[end].tag();
                if !last.is_terminator() {
                    problems.push(MirError::UnterminatedBlock {
                        label: label.clone(),
                        last,
                    });
                }
            }
        }
    }

    for (label, target) in graph::dangling_targets(blocks) {
        problems.push(MirError::DanglingTarget { label, target });
    }

    if config.require_reachable && has_entry {
        for label in graph::unreachable_blocks(blocks, &config.entry) {
            if label != config.exit {
                problems.push(MirError::UnreachableBlock {
                    label,
                    entry: config.entry.clone(),
                });
            }
        }
    }
}
