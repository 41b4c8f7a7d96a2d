use model::{Block, Condition, Declaration, Program, RelOp, Stat};
use tracing::{debug, trace};

use crate::context::CodeGenContext;
use crate::vm::{VmInstr, VmOperand};
use crate::Assembly;

/// Lowers a checked tree to accumulator machine code
pub struct CodeGenerator {
    pub asm: Vec<VmInstr>,
    pub(crate) ctx: CodeGenContext,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self {
            asm: Vec::new(),
            ctx: CodeGenContext::new(),
        }
    }

    pub fn gen_program(mut self, program: &Program) -> Assembly {
        self.gen_vars(&program.vars);
        self.gen_block(&program.block);
        self.asm.push(VmInstr::Stop);

        let declarations: Vec<(String, i64)> = self.ctx.into_declarations().into_iter().collect();
        debug!(
            instructions = self.asm.len(),
            declarations = declarations.len(),
            "generated program"
        );
        Assembly {
            instructions: self.asm,
            declarations,
        }
    }

    fn gen_vars(&mut self, vars: &[Declaration]) {
        for decl in vars {
            self.ctx.declare(&decl.name.lexeme, decl.initial);
        }
    }

    fn gen_block(&mut self, block: &Block) {
        self.gen_vars(&block.vars);
        for stat in &block.stats {
            self.gen_stat(stat);
        }
    }

    fn gen_stat(&mut self, stat: &Stat) {
        trace!(kind = %stat.kind(), "lowering statement");
        match stat {
            Stat::In(name) => {
                self.asm.push(VmInstr::Read(VmOperand::Var(name.lexeme.clone())));
            }
            Stat::Out(expr) => {
                self.gen_expr(expr);
                let t0 = self.ctx.reserved_temp();
                self.asm.push(VmInstr::Store(t0.clone()));
                self.asm.push(VmInstr::Write(t0));
                self.ctx.reset_temps();
            }
            Stat::Block(block) => self.gen_block(block),
            Stat::Iffy { cond, then_branch } => {
                let skip = self.ctx.new_label();
                self.gen_condition(cond, &skip);
                self.gen_stat(then_branch);
                self.asm.push(VmInstr::Noop(skip));
                self.ctx.reset_temps();
            }
            Stat::Loop { cond, body } => {
                let start = self.ctx.new_label();
                let exit = self.ctx.new_label();
                self.asm.push(VmInstr::Noop(start.clone()));
                self.gen_condition(cond, &exit);
                self.gen_stat(body);
                self.asm.push(VmInstr::Br(start));
                self.asm.push(VmInstr::Noop(exit));
                self.ctx.reset_temps();
            }
            Stat::Assign { target, value } => {
                self.gen_expr(value);
                self.asm.push(VmInstr::Store(VmOperand::Var(target.lexeme.clone())));
            }
            Stat::Label(name) => self.asm.push(VmInstr::Noop(name.lexeme.clone())),
            Stat::Goto(name) => self.asm.push(VmInstr::Br(name.lexeme.clone())),
        }
    }

    /// Leave `left - right` in the accumulator and branch to `skip` when the
    /// relation does not hold.
    fn gen_condition(&mut self, cond: &Condition, skip: &str) {
        self.gen_expr(&cond.right);
        let t0 = self.ctx.reserved_temp();
        self.asm.push(VmInstr::Store(t0.clone()));
        self.gen_expr(&cond.left);
        self.asm.push(VmInstr::Sub(t0));

        let target = skip.to_string();
        match cond.op.op {
            RelOp::LessEqual => self.asm.push(VmInstr::BrPos(target)),
            RelOp::NotEqual => self.asm.push(VmInstr::BrZero(target)),
            RelOp::Less => self.asm.push(VmInstr::BrZPos(target)),
            RelOp::GreaterEqual => self.asm.push(VmInstr::BrNeg(target)),
            RelOp::Greater => self.asm.push(VmInstr::BrZNeg(target)),
            RelOp::Equal => {
                self.asm.push(VmInstr::BrNeg(target.clone()));
                self.asm.push(VmInstr::BrPos(target));
            }
        }
    }
}
