// Expression lowering: each binary form evaluates its right operand first,
// parks it in a fresh temporary, then combines it with the left operand.

use model::{Expr, MulOp, Operand, Product, Sum, Unary};

use crate::generator::CodeGenerator;
use crate::vm::{VmInstr, VmOperand};

impl CodeGenerator {
    pub(crate) fn gen_expr(&mut self, expr: &Expr) {
        match &expr.rest {
            Some((_, right)) => {
                self.gen_expr(right);
                let t = self.spill();
                self.gen_product(&expr.left);
                self.asm.push(VmInstr::Sub(t));
            }
            None => self.gen_product(&expr.left),
        }
    }

    fn gen_product(&mut self, product: &Product) {
        match &product.rest {
            Some((op, _, right)) => {
                self.gen_product(right);
                let t = self.spill();
                self.gen_sum(&product.left);
                self.asm.push(match op {
                    MulOp::Mul => VmInstr::Mult(t),
                    MulOp::Div => VmInstr::Div(t),
                });
            }
            None => self.gen_sum(&product.left),
        }
    }

    fn gen_sum(&mut self, sum: &Sum) {
        match &sum.rest {
            Some((_, right)) => {
                self.gen_sum(right);
                let t = self.spill();
                self.gen_unary(&sum.left);
                self.asm.push(VmInstr::Add(t));
            }
            None => self.gen_unary(&sum.left),
        }
    }

    fn gen_unary(&mut self, unary: &Unary) {
        match unary {
            Unary::Negate { operand, .. } => {
                self.gen_unary(operand);
                self.asm.push(VmInstr::Mult(VmOperand::Imm(-1)));
            }
            Unary::Operand(Operand::Group(inner)) => self.gen_expr(inner),
            Unary::Operand(Operand::Identifier(name)) => {
                self.asm.push(VmInstr::Load(VmOperand::Var(name.lexeme.clone())));
            }
            Unary::Operand(Operand::Integer(literal)) => {
                self.asm.push(VmInstr::Load(VmOperand::Literal(literal.lexeme.clone())));
            }
        }
    }

    /// Store the accumulator into a fresh temporary and return it.
    fn spill(&mut self) -> VmOperand {
        let t = self.ctx.new_temp();
        self.asm.push(VmInstr::Store(t.clone()));
        t
    }
}
