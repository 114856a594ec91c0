//! Operands of MIR instructions.
//!
//! An argument is either a **register** (a numbered temporary or a named
//! captured/parameter/local variable) or a **constant** (`none`, `true`,
//! `false`, or literal text). Every argument has an identity string,
//! [`MirArgument::name_id`], that is stable per operand value or slot so it
//! can key dataflow tables. Identities carry a per-kind sigil, so a local
//! `x` and a parameter `x` never collide:
//!
//! | Kind      | Identity      | Text        |
//! |-----------|---------------|-------------|
//! | temp      | `#tmp_3`      | `#tmp_3`    |
//! | captured  | `^x`          | `x`         |
//! | parameter | `$x`          | `x`         |
//! | local     | `%x`          | `x`         |
//! | none      | `=none=`      | `none`      |
//! | true      | `=true=`      | `true`      |
//! | false     | `=false=`     | `false`     |
//! | int       | `=int=42`     | `42`        |
//! | string    | `=string="a"` | `"a"`       |
//!
//! Literal text is carried verbatim. Parsing and range checks belong to
//! the front end.

use std::fmt;

// ── Temp registers ──────────────────────────────────────────────────

/// A numbered temporary register within one MIR body.
///
/// Ids are handed out by a [`TempAllocator`] scoped to the enclosing body
/// and are dense and monotonically increasing from 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TempRegister(u32);

impl TempRegister {
    /// Create a register from a raw id.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw `u32` id.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the id as `usize` (for indexing into `Vec`s).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TempRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#tmp_{}", self.0)
    }
}

/// Monotonic temp-register counter for one body.
///
/// Passes that introduce fresh temporaries into an existing body start the
/// allocator past the body's highest id via [`TempAllocator::after`]. Once
/// `#tmp_4294967295` has been handed out (or already exists) the allocator
/// is exhausted and [`fresh`](Self::fresh) returns `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TempAllocator {
    next: Option<u32>,
}

impl Default for TempAllocator {
    fn default() -> Self {
        Self { next: Some(0) }
    }
}

impl TempAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator whose first register follows `last` (or starts at 0).
    pub fn after(last: Option<TempRegister>) -> Self {
        let next = match last {
            Some(reg) => reg.raw().checked_add(1),
            None => Some(0),
        };
        Self { next }
    }

    /// Allocate the next register, or `None` if the id space is used up.
    pub fn fresh(&mut self) -> Option<TempRegister> {
        let raw = self.next?;
        self.next = raw.checked_add(1);
        Some(TempRegister::new(raw))
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }

    /// Number of registers handed out so far (including any skipped by `after`).
    pub fn count(&self) -> u64 {
        self.next.map_or(1 << 32, u64::from)
    }
}

// ── Registers ───────────────────────────────────────────────────────

/// A register operand: a temporary or a named variable slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MirRegister {
    Temp(TempRegister),
    /// A variable captured by the enclosing lambda.
    Captured(String),
    /// A formal parameter of the body.
    Parameter(String),
    /// A local variable declared in the body.
    Local(String),
}

impl MirRegister {
    pub fn name_id(&self) -> String {
        match self {
            MirRegister::Temp(reg) => reg.to_string(),
            MirRegister::Captured(name) => format!("^{name}"),
            MirRegister::Parameter(name) => format!("${name}"),
            MirRegister::Local(name) => format!("%{name}"),
        }
    }

    /// The variable name, for the three named kinds.
    pub fn var_name(&self) -> Option<&str> {
        match self {
            MirRegister::Temp(_) => None,
            MirRegister::Captured(name)
            | MirRegister::Parameter(name)
            | MirRegister::Local(name) => Some(name),
        }
    }
}

impl fmt::Display for MirRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirRegister::Temp(reg) => fmt::Display::fmt(reg, f),
            MirRegister::Captured(name)
            | MirRegister::Parameter(name)
            | MirRegister::Local(name) => f.write_str(name),
        }
    }
}

// ── Constants ───────────────────────────────────────────────────────

/// A constant operand.
///
/// Identity is derived from the literal text, so two constants built from
/// equal text are interchangeable for analysis.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MirConstant {
    None,
    True,
    False,
    /// Integer literal text, verbatim.
    Int(String),
    /// String literal text, verbatim.
    String(String),
}

impl MirConstant {
    pub fn bool(value: bool) -> Self {
        if value {
            MirConstant::True
        } else {
            MirConstant::False
        }
    }

    pub fn name_id(&self) -> String {
        match self {
            MirConstant::None => "=none=".to_owned(),
            MirConstant::True => "=true=".to_owned(),
            MirConstant::False => "=false=".to_owned(),
            MirConstant::Int(text) => format!("=int={text}"),
            MirConstant::String(text) => format!("=string={text}"),
        }
    }
}

impl fmt::Display for MirConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirConstant::None => f.write_str("none"),
            MirConstant::True => f.write_str("true"),
            MirConstant::False => f.write_str("false"),
            MirConstant::Int(text) | MirConstant::String(text) => f.write_str(text),
        }
    }
}

// ── Arguments ───────────────────────────────────────────────────────

/// Any instruction operand.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MirArgument {
    Register(MirRegister),
    Constant(MirConstant),
}

impl MirArgument {
    pub fn temp(raw: u32) -> Self {
        MirArgument::Register(MirRegister::Temp(TempRegister::new(raw)))
    }

    pub fn captured(name: impl Into<String>) -> Self {
        MirArgument::Register(MirRegister::Captured(name.into()))
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        MirArgument::Register(MirRegister::Parameter(name.into()))
    }

    pub fn local(name: impl Into<String>) -> Self {
        MirArgument::Register(MirRegister::Local(name.into()))
    }

    pub fn none() -> Self {
        MirArgument::Constant(MirConstant::None)
    }

    pub fn bool(value: bool) -> Self {
        MirArgument::Constant(MirConstant::bool(value))
    }

    pub fn int(text: impl Into<String>) -> Self {
        MirArgument::Constant(MirConstant::Int(text.into()))
    }

    pub fn string(text: impl Into<String>) -> Self {
        MirArgument::Constant(MirConstant::String(text.into()))
    }

    /// Identity string, stable per operand value or slot.
    pub fn name_id(&self) -> String {
        match self {
            MirArgument::Register(reg) => reg.name_id(),
            MirArgument::Constant(c) => c.name_id(),
        }
    }

    pub fn is_register(&self) -> bool {
        matches!(self, MirArgument::Register(_))
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, MirArgument::Constant(_))
    }

    /// The temp register, if this argument is one.
    pub fn as_temp(&self) -> Option<TempRegister> {
        match self {
            MirArgument::Register(MirRegister::Temp(reg)) => Some(*reg),
            _ => None,
        }
    }
}

impl From<TempRegister> for MirArgument {
    fn from(reg: TempRegister) -> Self {
        MirArgument::Register(MirRegister::Temp(reg))
    }
}

impl From<MirRegister> for MirArgument {
    fn from(reg: MirRegister) -> Self {
        MirArgument::Register(reg)
    }
}

impl From<MirConstant> for MirArgument {
    fn from(c: MirConstant) -> Self {
        MirArgument::Constant(c)
    }
}

impl fmt::Display for MirArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirArgument::Register(reg) => fmt::Display::fmt(reg, f),
            MirArgument::Constant(c) => fmt::Display::fmt(c, f),
        }
    }
}
