//! Convenience layer for emitting code during intermediate code generation.

use crate::{BasicBlock, BlockValue, Function, LitKind, TerminatorKind, Value};

/// Appends instructions to one basic block at a time.
///
/// The builder wraps the factory methods on [`Function`] and, as a side
/// effect, records each emitted instruction in the targeted block, capturing
/// the order of operations. Once a terminator has been emitted the block is
/// closed: any further append to it panics. Retarget the builder with
/// [`set_block`](Builder::set_block) to continue in another block.
pub struct Builder<'a> {
    function: &'a mut Function,
    block: BasicBlock,
}

impl<'a> Builder<'a> {
    pub fn new(function: &'a mut Function, block: BasicBlock) -> Self {
        Self { function, block }
    }

    /// The block currently being appended to.
    pub fn block(&self) -> BasicBlock {
        self.block
    }

    /// Points the builder at a different block. Future appends apply there.
    pub fn set_block(&mut self, block: BasicBlock) {
        self.block = block;
    }

    /// Allocates a new, empty block without retargeting the builder.
    pub fn new_block(&mut self) -> BasicBlock {
        self.function.new_block()
    }

    /// Whether the current block still accepts instructions, i.e. has no
    /// terminator yet.
    pub fn is_open(&self) -> bool {
        !self.function.basic_blocks[self.block].is_terminated()
    }

    fn append(&mut self, value: Value) -> Value {
        assert!(self.is_open(), "append to closed block");
        self.function.basic_blocks[self.block].instructions.push(value);
        value
    }

    fn terminate(&mut self, terminator: TerminatorKind) {
        assert!(self.is_open(), "append to closed block");
        self.function.set_terminator(self.block, terminator);
    }

    /// Alias for [`Function::global_sym`]. Symbols have no side effects, so
    /// nothing is appended to the block.
    pub fn global_sym(&mut self) -> Value {
        self.function.global_sym()
    }

    /// Alias for [`Function::local_sym`]; does not append.
    pub fn local_sym(&mut self) -> Value {
        self.function.local_sym()
    }

    /// Alias for [`Function::argument`]; does not append.
    pub fn argument(&mut self) -> Value {
        self.function.argument()
    }

    /// Alias for [`Function::aux_literal`]. Literals have no side effects,
    /// so nothing is appended to the block.
    pub fn aux_literal(&mut self, literal: LitKind) -> Value {
        self.function.aux_literal(literal)
    }

    /// Emits a phi joining `candidates` into the current block.
    pub fn phi(&mut self, candidates: &[BlockValue]) -> Value {
        let value = self.function.phi(candidates);
        self.append(value)
    }

    /// Emits a load from `place` into the current block.
    pub fn load(&mut self, place: Value) -> Value {
        let value = self.function.load(place);
        self.append(value)
    }

    /// Emits a store of `value` into `place` into the current block.
    pub fn store(&mut self, value: Value, place: Value) -> Value {
        let value = self.function.store(value, place);
        self.append(value)
    }

    /// Emits a call of `callee` into the current block.
    pub fn call(&mut self, callee: Value, args: &[Value]) -> Value {
        let value = self.function.call(callee, args);
        self.append(value)
    }

    /// Closes the current block with an unconditional jump.
    pub fn jump(&mut self, target: BasicBlock) {
        self.terminate(TerminatorKind::Jump(target));
    }

    /// Closes the current block with a conditional branch.
    pub fn branch(
        &mut self,
        condition: Value,
        true_target: BasicBlock,
        false_target: BasicBlock,
    ) {
        self.terminate(TerminatorKind::Branch {
            condition,
            targets: [true_target, false_target],
        });
    }

    /// Closes the current block with a multi-way switch.
    pub fn switch(&mut self, input: Value, default_target: BasicBlock, cases: Vec<BlockValue>) {
        self.terminate(TerminatorKind::Switch {
            input,
            default_target,
            cases,
        });
    }

    /// Closes the current block with a return.
    pub fn ret(&mut self, value: Value) {
        self.terminate(TerminatorKind::Return(value));
    }

    /// Closes the current block with a yield point resuming at `resume`.
    pub fn yield_to(&mut self, resume: BasicBlock) {
        self.terminate(TerminatorKind::Yield { resume });
    }

    /// Closes the current block with an await on `event`, resuming at
    /// `resume`.
    pub fn await_event(&mut self, event: Value, resume: BasicBlock) {
        self.terminate(TerminatorKind::Await { event, resume });
    }

    /// Closes the current block as unreachable.
    pub fn unreachable(&mut self) {
        self.terminate(TerminatorKind::Unreachable);
    }
}
