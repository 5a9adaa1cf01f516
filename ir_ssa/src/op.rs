use std::fmt::{self, Display, Formatter};

/// Operation codes for values and terminators.
///
/// The declaration order is meaningful: value operations form one contiguous
/// run and terminator operations another, and [`Op::is_value`] /
/// [`Op::is_terminator`] are plain range comparisons over that order rather
/// than lookup tables. A new operation must be inserted into the run it
/// belongs to, or the classification breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Op {
    /// A global symbol. The value's identity is its entire meaning.
    GlobalSym,
    /// A local symbol. Identity-only, like `GlobalSym`.
    LocalSym,
    /// An unbound argument placeholder. Identity-only.
    Argument,
    /// A literal constant carried in the value's aux payload.
    AuxLiteral,
    /// The join of several possible source values at a block entry.
    Phi,
    Load,
    Store,
    Call,
    /// Internal: a reference to a basic block, used to encode the source
    /// block of each phi candidate. Frontends never construct this
    /// directly.
    BlockRef,

    Jump,
    Branch,
    Switch,
    Return,
    Yield,
    Await,
    Unreachable,
}

impl Op {
    /// Whether this operation belongs to the value run.
    pub fn is_value(self) -> bool {
        Op::GlobalSym <= self && self <= Op::BlockRef
    }

    /// Whether this operation belongs to the terminator run.
    pub fn is_terminator(self) -> bool {
        Op::Jump <= self && self <= Op::Unreachable
    }

    /// A short lowercase name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Op::GlobalSym => "global_sym",
            Op::LocalSym => "local_sym",
            Op::Argument => "argument",
            Op::AuxLiteral => "literal",
            Op::Phi => "phi",
            Op::Load => "load",
            Op::Store => "store",
            Op::Call => "call",
            Op::BlockRef => "block_ref",
            Op::Jump => "jump",
            Op::Branch => "branch",
            Op::Switch => "switch",
            Op::Return => "return",
            Op::Yield => "yield",
            Op::Await => "await",
            Op::Unreachable => "unreachable",
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
