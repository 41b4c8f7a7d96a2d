// Preorder parse tree printer
//
// Re-expands the Vec-based `vars` and statement lists into the grammar's
// right-recursive chains so the dump follows the productions one node per line.

use crate::{
    Block, Condition, Declaration, Expr, NodeKind, Operand, Program, Product, Stat, Sum, Token,
    Unary,
};
use std::fmt::Write;

/// Render the whole tree, one node per line, children indented with `|-`.
pub fn print_preorder(program: &Program) -> String {
    let mut printer = TreePrinter { out: String::new() };
    printer.out.push_str("Parse tree preorder traversal:\n");
    printer.program(program);
    printer.out
}

struct TreePrinter {
    out: String,
}

impl TreePrinter {
    fn node(&mut self, depth: usize, kind: NodeKind, tokens: &[&Token]) {
        self.out.push(' ');
        for _ in 0..depth {
            self.out.push_str("|-");
        }
        if depth > 0 {
            self.out.push(' ');
        }
        let _ = write!(self.out, "{}, tokens:", kind);
        if tokens.is_empty() {
            self.out.push_str(" <none>");
        }
        for tok in tokens {
            let _ = write!(self.out, " {}", tok.lexeme);
        }
        self.out.push('\n');
    }

    fn program(&mut self, program: &Program) {
        self.node(0, NodeKind::Program, &[]);
        self.vars(&program.vars, 1);
        self.block(&program.block, 1);
    }

    fn vars(&mut self, vars: &[Declaration], depth: usize) {
        if let Some((decl, rest)) = vars.split_first() {
            self.node(depth, NodeKind::Vars, &[&decl.name, &decl.value]);
            self.vars(rest, depth + 1);
        }
    }

    fn block(&mut self, block: &Block, depth: usize) {
        self.node(depth, NodeKind::Block, &[]);
        self.vars(&block.vars, depth + 1);
        if let Some((first, rest)) = block.stats.split_first() {
            self.node(depth + 1, NodeKind::Stats, &[]);
            self.stat(first, depth + 2);
            self.m_stat(rest, depth + 2);
        }
    }

    fn m_stat(&mut self, stats: &[Stat], depth: usize) {
        if let Some((first, rest)) = stats.split_first() {
            self.node(depth, NodeKind::MStat, &[]);
            self.stat(first, depth + 1);
            self.m_stat(rest, depth + 1);
        }
    }

    fn stat(&mut self, stat: &Stat, depth: usize) {
        self.node(depth, NodeKind::Stat, &[]);
        let depth = depth + 1;
        match stat {
            Stat::In(name) => self.node(depth, NodeKind::In, &[name]),
            Stat::Out(expr) => {
                self.node(depth, NodeKind::Out, &[]);
                self.expr(expr, depth + 1);
            }
            Stat::Block(block) => self.block(block, depth),
            Stat::Iffy { cond, then_branch } => {
                self.node(depth, NodeKind::Iffy, &[]);
                self.condition(cond, depth + 1);
                self.stat(then_branch, depth + 1);
            }
            Stat::Loop { cond, body } => {
                self.node(depth, NodeKind::Loop, &[]);
                self.condition(cond, depth + 1);
                self.stat(body, depth + 1);
            }
            Stat::Assign { target, value } => {
                self.node(depth, NodeKind::Assign, &[target]);
                self.expr(value, depth + 1);
            }
            Stat::Label(name) => self.node(depth, NodeKind::Label, &[name]),
            Stat::Goto(name) => self.node(depth, NodeKind::Goto, &[name]),
        }
    }

    fn condition(&mut self, cond: &Condition, depth: usize) {
        self.expr(&cond.left, depth);
        match &cond.op.second {
            Some(second) => self.node(depth, NodeKind::RelOp, &[&cond.op.first, second]),
            None => self.node(depth, NodeKind::RelOp, &[&cond.op.first]),
        }
        self.expr(&cond.right, depth);
    }

    fn expr(&mut self, expr: &Expr, depth: usize) {
        match &expr.rest {
            Some((minus, right)) => {
                self.node(depth, NodeKind::Expr, &[minus]);
                self.product(&expr.left, depth + 1);
                self.expr(right, depth + 1);
            }
            None => {
                self.node(depth, NodeKind::Expr, &[]);
                self.product(&expr.left, depth + 1);
            }
        }
    }

    fn product(&mut self, product: &Product, depth: usize) {
        match &product.rest {
            Some((_, op, right)) => {
                self.node(depth, NodeKind::N, &[op]);
                self.sum(&product.left, depth + 1);
                self.product(right, depth + 1);
            }
            None => {
                self.node(depth, NodeKind::N, &[]);
                self.sum(&product.left, depth + 1);
            }
        }
    }

    fn sum(&mut self, sum: &Sum, depth: usize) {
        match &sum.rest {
            Some((plus, right)) => {
                self.node(depth, NodeKind::A, &[plus]);
                self.unary(&sum.left, depth + 1);
                self.sum(right, depth + 1);
            }
            None => {
                self.node(depth, NodeKind::A, &[]);
                self.unary(&sum.left, depth + 1);
            }
        }
    }

    fn unary(&mut self, unary: &Unary, depth: usize) {
        match unary {
            Unary::Negate { star, operand } => {
                self.node(depth, NodeKind::M, &[star]);
                self.unary(operand, depth + 1);
            }
            Unary::Operand(operand) => {
                self.node(depth, NodeKind::M, &[]);
                self.operand(operand, depth + 1);
            }
        }
    }

    fn operand(&mut self, operand: &Operand, depth: usize) {
        match operand {
            Operand::Group(inner) => {
                self.node(depth, NodeKind::R, &[]);
                self.expr(inner, depth + 1);
            }
            Operand::Identifier(tok) | Operand::Integer(tok) => {
                self.node(depth, NodeKind::R, &[tok])
            }
        }
    }
}
