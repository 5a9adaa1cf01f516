//! Human-readable rendering of functions, for diagnostics only. The output
//! format is not parseable and carries no stability promise.

use std::fmt::{self, Display, Formatter};

use data_structure::index::Idx;

use crate::{Aux, BasicBlock, Function, Op, TerminatorKind, Value};

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.index())
    }
}

impl Display for BasicBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "bb{}", self.index())
    }
}

struct FunctionPrinter<'a> {
    function: &'a Function,
}

impl FunctionPrinter<'_> {
    fn format_instruction(&self, f: &mut Formatter<'_>, value: Value) -> fmt::Result {
        let data = &self.function.values[value];
        write!(f, "\t{value} = {}", data.op())?;
        match data.op() {
            Op::AuxLiteral => {
                if let Aux::Literal(literal) = data.aux() {
                    write!(f, " {literal}")?;
                }
            }
            Op::Phi => {
                write!(f, " [")?;
                for (i, candidate) in self.function.phi_sources(value).enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", candidate.block, candidate.value)?;
                }
                write!(f, "]")?;
            }
            Op::Call => {
                let args = data.args();
                write!(f, " {}(", args[0])?;
                for (i, arg) in args[1..].iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")?;
            }
            _ => {
                for (i, arg) in data.args().iter().enumerate() {
                    write!(f, "{} {arg}", if i > 0 { "," } else { "" })?;
                }
            }
        }
        writeln!(f)
    }

    fn format_terminator(&self, f: &mut Formatter<'_>, terminator: &TerminatorKind) -> fmt::Result {
        write!(f, "\t{}", terminator.op())?;
        match terminator {
            TerminatorKind::Jump(target) => write!(f, " {target}")?,
            TerminatorKind::Branch { condition, targets } => {
                write!(f, " {condition}, {}, {}", targets[0], targets[1])?;
            }
            TerminatorKind::Switch {
                input,
                default_target,
                cases,
            } => {
                write!(f, " {input}, {default_target} [")?;
                for (i, case) in cases.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", case.value, case.block)?;
                }
                write!(f, "]")?;
            }
            TerminatorKind::Return(value) => write!(f, " {value}")?,
            TerminatorKind::Yield { resume } => write!(f, " {resume}")?,
            TerminatorKind::Await { event, resume } => write!(f, " {event}, {resume}")?,
            TerminatorKind::Unreachable => {}
        }
        writeln!(f)
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let printer = FunctionPrinter { function: self };
        for (block, data) in self.basic_blocks.iter_enumerated() {
            writeln!(f, "{block}:")?;
            for &value in &data.instructions {
                printer.format_instruction(f, value)?;
            }
            match &data.terminator {
                Some(terminator) => printer.format_terminator(f, terminator)?,
                None => writeln!(f, "\t<unterminated>")?,
            }
        }
        Ok(())
    }
}
