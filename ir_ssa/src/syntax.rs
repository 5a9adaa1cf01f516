//! Syntax of the IR: values, terminators, basic blocks.

use std::fmt::{self, Display, Formatter};

use data_structure::index::{Idx, Indexable, IndexVec};
use data_structure::worklist::WorkStack;
use data_structure::FxHashSet;

use crate::Op;

/// Handle of a [`ValueData`] stored in a [`Function`].
///
/// Values are compared by handle, never by content. Two symbol values built
/// by separate factory calls are distinct, whatever their payloads; this is
/// what makes a symbol's identity its entire meaning.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Value(usize);

impl Idx for Value {
    fn new(idx: usize) -> Self {
        Self(idx)
    }

    fn index(self) -> usize {
        self.0
    }
}

/// Handle of a [`BasicBlockData`] stored in a [`Function`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct BasicBlock(usize);

impl Idx for BasicBlock {
    fn new(idx: usize) -> Self {
        Self(idx)
    }

    fn index(self) -> usize {
        self.0
    }
}

impl BasicBlock {
    /// The first block allocated in a function, by convention its entry.
    pub const ENTRY_BLOCK: Self = Self(0);
}

/// One SSA instruction or pseudo-value.
///
/// Built through the factory methods on [`Function`], which fix the argument
/// count and meaning per operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueData {
    op: Op,
    args: Vec<Value>,
    aux: Aux,
}

impl Indexable<Value> for ValueData {}

impl ValueData {
    pub fn op(&self) -> Op {
        self.op
    }

    /// The ordered arguments. Count and per-position meaning depend on the
    /// operation: a load takes `[place]`, a store `[value, place]`, a call
    /// `[callee, actuals...]`, a phi flattened `(block, value)` pairs.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn aux(&self) -> &Aux {
        &self.aux
    }
}

/// Operation-specific constant payload of a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Aux {
    None,
    /// The constant carried by an `AuxLiteral` value.
    Literal(LitKind),
    /// The source block carried by an internal `BlockRef` value.
    Block(BasicBlock),
}

/// A literal constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LitKind {
    Unit,
    Bool(bool),
    Int(i64),
    /// Bit pattern of an `f64`, stored as bits so literals stay `Eq`.
    Float(u64),
}

impl LitKind {
    pub fn float(value: f64) -> Self {
        Self::Float(value.to_bits())
    }
}

impl Display for LitKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LitKind::Unit => write!(f, "()"),
            LitKind::Bool(b) => write!(f, "{b}"),
            LitKind::Int(i) => write!(f, "{i}"),
            LitKind::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
        }
    }
}

/// A (block, value) pair: one phi candidate or one switch case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockValue {
    pub block: BasicBlock,
    pub value: Value,
}

/// The single exit point of a basic block.
///
/// The terminator is the sole source of control-flow edges: the block graph
/// has exactly the edges [`TerminatorKind::successors`] replays.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TerminatorKind {
    /// Unconditional jump.
    Jump(BasicBlock),

    /// Conditional branch on `condition`.
    Branch {
        condition: Value,
        /// Taken if the condition is true, then the fallback.
        targets: [BasicBlock; 2],
    },

    /// Multi-way dispatch on `input`.
    Switch {
        input: Value,
        default_target: BasicBlock,
        /// Each case pairs a comparison value with its target block.
        cases: Vec<BlockValue>,
    },

    /// Exit the function with the given value. No successors.
    Return(Value),

    /// Yield control to another routine; execution continues at `resume`
    /// once this routine is scheduled again. What yielding means is decided
    /// by the language runtime.
    Yield { resume: BasicBlock },

    /// Like `Yield`, but blocked on a language-defined event value
    /// (a promise or similar) that must complete before resuming.
    Await { event: Value, resume: BasicBlock },

    /// Control provably never reaches this point. No successors. Emit this
    /// only where the frontend can guarantee it, e.g. after a call known
    /// never to return.
    Unreachable,
}

impl TerminatorKind {
    /// The operation code of this terminator. Always in the terminator run.
    pub fn op(&self) -> Op {
        match self {
            Self::Jump(_) => Op::Jump,
            Self::Branch { .. } => Op::Branch,
            Self::Switch { .. } => Op::Switch,
            Self::Return(_) => Op::Return,
            Self::Yield { .. } => Op::Yield,
            Self::Await { .. } => Op::Await,
            Self::Unreachable => Op::Unreachable,
        }
    }

    /// The successor blocks, in the defined per-operation order: jump
    /// `[target]`; branch `[true, false]`; switch `[default, cases in
    /// declaration order]`; return and unreachable `[]`; yield and await
    /// `[resume]`.
    pub fn successors(&self) -> impl DoubleEndedIterator<Item = BasicBlock> + '_ {
        let (first, second, cases): (_, _, &[BlockValue]) = match self {
            Self::Jump(target) => (Some(*target), None, &[]),
            Self::Branch { targets, .. } => (Some(targets[0]), Some(targets[1]), &[]),
            Self::Switch {
                default_target,
                cases,
                ..
            } => (Some(*default_target), None, cases.as_slice()),
            Self::Return(_) | Self::Unreachable => (None, None, &[]),
            Self::Yield { resume } | Self::Await { resume, .. } => (Some(*resume), None, &[]),
        };
        first
            .into_iter()
            .chain(second)
            .chain(cases.iter().map(|case| case.block))
    }
}

/// A straight sequence of instructions that always runs as a unit, followed
/// by exactly one terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicBlockData {
    pub instructions: Vec<Value>,

    /// `None` only while the block is under construction. A block without a
    /// terminator is not yet a graph node as far as the analyses are
    /// concerned.
    pub(crate) terminator: Option<TerminatorKind>,
}

impl Indexable<BasicBlock> for BasicBlockData {}

impl BasicBlockData {
    pub fn terminator(&self) -> &TerminatorKind {
        self.terminator.as_ref().expect("terminator must be set")
    }

    pub fn is_terminated(&self) -> bool {
        self.terminator.is_some()
    }
}

/// Owner of one SSA graph: the value and block arenas.
///
/// Nodes are allocated once through the factory methods and immutable
/// afterwards, except that a block's instruction list may grow and its
/// terminator may be assigned exactly once. Derived tables (predecessors,
/// dominators) are valid only while the graph is unmodified; recomputing
/// after an edit is the caller's responsibility.
#[derive(Debug, Default)]
pub struct Function {
    pub values: IndexVec<Value, ValueData>,
    pub basic_blocks: IndexVec<BasicBlock, BasicBlockData>,
}

impl Function {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new, empty block with no terminator.
    pub fn new_block(&mut self) -> BasicBlock {
        self.basic_blocks.push(BasicBlockData {
            instructions: Vec::new(),
            terminator: None,
        })
    }

    /// Assigns the block's terminator, closing it. Panics if the block
    /// already has one.
    pub fn set_terminator(&mut self, block: BasicBlock, terminator: TerminatorKind) {
        let data = &mut self.basic_blocks[block];
        assert!(data.terminator.is_none(), "terminator already set");
        data.terminator = Some(terminator);
    }

    fn new_value(&mut self, op: Op, args: Vec<Value>, aux: Aux) -> Value {
        self.values.push(ValueData { op, args, aux })
    }

    /// A new global symbol. Its handle is its identity; it carries no data.
    pub fn global_sym(&mut self) -> Value {
        self.new_value(Op::GlobalSym, Vec::new(), Aux::None)
    }

    /// A new local symbol. Its handle is its identity; it carries no data.
    pub fn local_sym(&mut self) -> Value {
        self.new_value(Op::LocalSym, Vec::new(), Aux::None)
    }

    /// A new argument placeholder. Its handle is its identity.
    pub fn argument(&mut self) -> Value {
        self.new_value(Op::Argument, Vec::new(), Aux::None)
    }

    /// A new literal constant value.
    pub fn aux_literal(&mut self, literal: LitKind) -> Value {
        self.new_value(Op::AuxLiteral, Vec::new(), Aux::Literal(literal))
    }

    /// A new phi value joining the given candidates, one per predecessor
    /// block control may arrive from.
    pub fn phi(&mut self, candidates: &[BlockValue]) -> Value {
        let mut args = Vec::with_capacity(candidates.len() * 2);
        for candidate in candidates {
            let block_ref =
                self.new_value(Op::BlockRef, Vec::new(), Aux::Block(candidate.block));
            args.push(block_ref);
            args.push(candidate.value);
        }
        self.new_value(Op::Phi, args, Aux::None)
    }

    /// A new load from the memory object described by `place`.
    pub fn load(&mut self, place: Value) -> Value {
        self.new_value(Op::Load, vec![place], Aux::None)
    }

    /// A new store of `value` into the memory object described by `place`.
    pub fn store(&mut self, value: Value, place: Value) -> Value {
        self.new_value(Op::Store, vec![value, place], Aux::None)
    }

    /// A new call of `callee` with the given actual arguments.
    ///
    /// Besides user-defined functions, a call can represent a language's
    /// fundamental operations: the callee is then an `AuxLiteral` naming an
    /// operation the language could not otherwise express.
    pub fn call(&mut self, callee: Value, args: &[Value]) -> Value {
        let mut all = Vec::with_capacity(args.len() + 1);
        all.push(callee);
        all.extend_from_slice(args);
        self.new_value(Op::Call, all, Aux::None)
    }

    /// Decodes the (block, value) candidates of a phi.
    ///
    /// Panics if `phi` is not a phi value or its argument encoding is
    /// malformed; both indicate a bug in whatever constructed the graph.
    pub fn phi_sources(&self, phi: Value) -> impl Iterator<Item = BlockValue> + '_ {
        let data = &self.values[phi];
        assert!(data.op == Op::Phi, "phi_sources on a non-phi value");
        data.args.chunks_exact(2).map(|pair| {
            let block_ref = &self.values[pair[0]];
            match block_ref.aux {
                Aux::Block(block) if block_ref.op == Op::BlockRef => BlockValue {
                    block,
                    value: pair[1],
                },
                _ => panic!("malformed phi argument encoding"),
            }
        })
    }

    /// Adds to `to` the block `from` and everything reachable from it.
    ///
    /// Blocks already in the set are assumed to have been put there by a
    /// prior call, so their descendants are not visited again. Every block
    /// encountered must already be terminated.
    pub fn add_reachable(&self, from: BasicBlock, to: &mut FxHashSet<BasicBlock>) {
        let mut todo = WorkStack::with_capacity(4);
        todo.add(from);
        while let Some(block) = todo.next() {
            if !to.insert(block) {
                continue;
            }
            for succ in self.basic_blocks[block].terminator().successors() {
                todo.add(succ);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_identity_only() {
        let mut function = Function::new();
        let a = function.global_sym();
        let b = function.global_sym();
        assert_ne!(a, b);
        // same content, still different values
        assert_eq!(function.values[a], function.values[b]);
    }

    #[test]
    fn factories_fix_the_argument_shape() {
        let mut function = Function::new();
        let place = function.local_sym();
        let value = function.aux_literal(LitKind::Int(42));

        let load = function.load(place);
        assert_eq!(function.values[load].args(), [place]);

        let store = function.store(value, place);
        assert_eq!(function.values[store].args(), [value, place]);

        let callee = function.global_sym();
        let call = function.call(callee, &[value, place]);
        assert_eq!(function.values[call].args(), [callee, value, place]);
        assert_eq!(function.values[call].op(), Op::Call);
    }

    #[test]
    fn phi_candidates_round_trip() {
        let mut function = Function::new();
        let b0 = function.new_block();
        let b1 = function.new_block();
        let v0 = function.aux_literal(LitKind::Int(0));
        let v1 = function.aux_literal(LitKind::Int(1));

        let phi = function.phi(&[
            BlockValue { block: b0, value: v0 },
            BlockValue { block: b1, value: v1 },
        ]);

        let sources: Vec<_> = function.phi_sources(phi).collect();
        assert_eq!(
            sources,
            [
                BlockValue { block: b0, value: v0 },
                BlockValue { block: b1, value: v1 },
            ]
        );
    }

    #[test]
    #[should_panic(expected = "non-phi value")]
    fn phi_sources_rejects_other_ops() {
        let mut function = Function::new();
        let sym = function.local_sym();
        let _ = function.phi_sources(sym).count();
    }

    #[test]
    fn successor_order_follows_the_operation() {
        let mut function = Function::new();
        let b0 = function.new_block();
        let b1 = function.new_block();
        let b2 = function.new_block();
        let condition = function.aux_literal(LitKind::Bool(false));
        let input = function.aux_literal(LitKind::Int(3));
        let case_value = function.aux_literal(LitKind::Int(7));
        let ret = function.aux_literal(LitKind::Unit);

        let successors =
            |t: &TerminatorKind| t.successors().collect::<Vec<_>>();

        assert_eq!(successors(&TerminatorKind::Jump(b1)), [b1]);
        assert_eq!(
            successors(&TerminatorKind::Branch {
                condition,
                targets: [b1, b2],
            }),
            [b1, b2]
        );
        assert_eq!(
            successors(&TerminatorKind::Switch {
                input,
                default_target: b0,
                cases: vec![
                    BlockValue { block: b2, value: case_value },
                    BlockValue { block: b1, value: case_value },
                ],
            }),
            [b0, b2, b1]
        );
        assert!(successors(&TerminatorKind::Return(ret)).is_empty());
        assert!(successors(&TerminatorKind::Unreachable).is_empty());
        assert_eq!(successors(&TerminatorKind::Yield { resume: b2 }), [b2]);
        assert_eq!(
            successors(&TerminatorKind::Await { event: input, resume: b1 }),
            [b1]
        );
    }

    #[test]
    fn terminator_ops_classify_as_terminators() {
        let mut function = Function::new();
        let b0 = function.new_block();
        let unit = function.aux_literal(LitKind::Unit);
        let kinds = [
            TerminatorKind::Jump(b0),
            TerminatorKind::Branch { condition: unit, targets: [b0, b0] },
            TerminatorKind::Switch { input: unit, default_target: b0, cases: Vec::new() },
            TerminatorKind::Return(unit),
            TerminatorKind::Yield { resume: b0 },
            TerminatorKind::Await { event: unit, resume: b0 },
            TerminatorKind::Unreachable,
        ];
        for kind in kinds {
            assert!(kind.op().is_terminator());
        }
    }

    #[test]
    #[should_panic(expected = "terminator must be set")]
    fn open_blocks_are_not_graph_nodes() {
        let mut function = Function::new();
        let open = function.new_block();
        let _ = function.basic_blocks[open].terminator();
    }

    #[test]
    #[should_panic(expected = "terminator already set")]
    fn terminator_is_assigned_exactly_once() {
        let mut function = Function::new();
        let block = function.new_block();
        function.set_terminator(block, TerminatorKind::Unreachable);
        function.set_terminator(block, TerminatorKind::Unreachable);
    }

    #[test]
    fn add_reachable_collects_the_cone() {
        let mut function = Function::new();
        let a = function.new_block();
        let b = function.new_block();
        let c = function.new_block();
        let condition = function.aux_literal(LitKind::Bool(true));
        function.set_terminator(a, TerminatorKind::Branch { condition, targets: [b, c] });
        function.set_terminator(b, TerminatorKind::Jump(c));
        function.set_terminator(c, TerminatorKind::Unreachable);

        let mut reachable = FxHashSet::default();
        function.add_reachable(a, &mut reachable);
        assert_eq!(reachable, FxHashSet::from_iter([a, b, c]));
    }

    #[test]
    fn add_reachable_skips_descendants_of_present_blocks() {
        let mut function = Function::new();
        let a = function.new_block();
        let b = function.new_block();
        let c = function.new_block();
        function.set_terminator(a, TerminatorKind::Jump(b));
        function.set_terminator(b, TerminatorKind::Jump(c));
        function.set_terminator(c, TerminatorKind::Unreachable);

        // b was collected by an earlier call, so its descendants are assumed
        // collected too and c is never visited.
        let mut reachable = FxHashSet::from_iter([b]);
        function.add_reachable(a, &mut reachable);
        assert_eq!(reachable, FxHashSet::from_iter([a, b]));
    }
}
