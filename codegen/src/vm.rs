// Accumulator machine operand and instruction definitions
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmOperand {
    Var(String),
    Temp(usize),
    /// Integer literal exactly as written in the source.
    Literal(String),
    Imm(i64),
}

impl fmt::Display for VmOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(name) => f.write_str(name),
            Self::Temp(n) => write!(f, "T{}", n),
            Self::Literal(text) => f.write_str(text),
            Self::Imm(i) => write!(f, "{}", i),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmInstr {
    Read(VmOperand),
    Write(VmOperand),
    Load(VmOperand),
    Store(VmOperand),
    Add(VmOperand),
    Sub(VmOperand),
    Mult(VmOperand),
    Div(VmOperand),
    Br(String),
    BrPos(String),
    BrNeg(String),
    BrZPos(String),
    BrZNeg(String),
    BrZero(String),
    /// Branch target: `label: NOOP`
    Noop(String),
    Stop,
}

impl VmInstr {
    pub fn opcode(&self) -> &'static str {
        match self {
            Self::Read(_) => "READ",
            Self::Write(_) => "WRITE",
            Self::Load(_) => "LOAD",
            Self::Store(_) => "STORE",
            Self::Add(_) => "ADD",
            Self::Sub(_) => "SUB",
            Self::Mult(_) => "MULT",
            Self::Div(_) => "DIV",
            Self::Br(_) => "BR",
            Self::BrPos(_) => "BRPOS",
            Self::BrNeg(_) => "BRNEG",
            Self::BrZPos(_) => "BRZPOS",
            Self::BrZNeg(_) => "BRZNEG",
            Self::BrZero(_) => "BRZERO",
            Self::Noop(_) => "NOOP",
            Self::Stop => "STOP",
        }
    }
}

/// emit_asm converts machine instructions to assembly text, one per line
pub fn emit_asm(instructions: &[VmInstr]) -> String {
    use fmt::Write;
    let mut s = String::new();
    for instr in instructions {
        match instr {
            VmInstr::Noop(label) => { let _ = writeln!(s, "{}: NOOP", label); }
            VmInstr::Stop => s.push_str("STOP\n"),
            VmInstr::Read(op)
            | VmInstr::Write(op)
            | VmInstr::Load(op)
            | VmInstr::Store(op)
            | VmInstr::Add(op)
            | VmInstr::Sub(op)
            | VmInstr::Mult(op)
            | VmInstr::Div(op) => { let _ = writeln!(s, "{} {}", instr.opcode(), op); }
            VmInstr::Br(target)
            | VmInstr::BrPos(target)
            | VmInstr::BrNeg(target)
            | VmInstr::BrZPos(target)
            | VmInstr::BrZNeg(target)
            | VmInstr::BrZero(target) => { let _ = writeln!(s, "{} {}", instr.opcode(), target); }
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operands_render_as_names_and_numbers() {
        assert_eq!(VmOperand::Var("x".into()).to_string(), "x");
        assert_eq!(VmOperand::Temp(3).to_string(), "T3");
        assert_eq!(VmOperand::Literal("007".into()).to_string(), "007");
        assert_eq!(VmOperand::Imm(-1).to_string(), "-1");
    }

    #[test]
    fn emit_one_instruction_per_line() {
        let asm = emit_asm(&[
            VmInstr::Noop("L0".into()),
            VmInstr::Load(VmOperand::Var("a".into())),
            VmInstr::Mult(VmOperand::Imm(-1)),
            VmInstr::BrZPos("L0".into()),
            VmInstr::Stop,
        ]);
        assert_eq!(asm, "L0: NOOP\nLOAD a\nMULT -1\nBRZPOS L0\nSTOP\n");
    }
}
