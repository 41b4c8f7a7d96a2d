use model::{Block, Condition, Declaration, Expr, Operand, Product, Program, Stat, Sum, Token, Unary};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("SEMANTICS ERROR: Identifier '{name}' on line {line} was already declared.\n  Original declaration of '{name}' occurs on line {original_line}.")]
    Redeclared {
        name: String,
        line: usize,
        original_line: usize,
    },
    #[error("SEMANTICS ERROR: Identifier '{name}' on line {line} has not been declared.")]
    Undeclared { name: String, line: usize },
}

impl SemanticError {
    pub fn line(&self) -> usize {
        match self {
            SemanticError::Redeclared { line, .. } | SemanticError::Undeclared { line, .. } => {
                *line
            }
        }
    }
}

/// Every diagnostic from one walk, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticErrors(pub Vec<SemanticError>);

impl SemanticErrors {
    pub fn iter(&self) -> impl Iterator<Item = &SemanticError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SemanticErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for SemanticErrors {}

/// Names and the line of their first declaration.
///
/// There is a single scope for the whole program: a name declared in two
/// sibling blocks is a redeclaration.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name`. On a duplicate, returns the line of the original.
    pub fn insert(&mut self, name: &str, line: usize) -> Result<(), usize> {
        if let Some(&original) = self.symbols.get(name) {
            return Err(original);
        }
        self.symbols.insert(name.to_string(), line);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.symbols.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

pub struct SemanticChecker {
    symbols: SymbolTable,
    errors: Vec<SemanticError>,
}

impl Default for SemanticChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticChecker {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            errors: Vec::new(),
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Walk the whole tree in preorder. Errors never stop the walk; they are
    /// all returned together at the end.
    pub fn check(&mut self, program: &Program) -> Result<(), SemanticErrors> {
        self.symbols = SymbolTable::new();
        self.errors.clear();

        self.check_vars(&program.vars);
        self.check_block(&program.block);

        debug!(
            symbols = self.symbols.len(),
            errors = self.errors.len(),
            "semantic check finished"
        );
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SemanticErrors(std::mem::take(&mut self.errors)))
        }
    }

    fn check_vars(&mut self, vars: &[Declaration]) {
        for decl in vars {
            let name = &decl.name;
            match self.symbols.insert(&name.lexeme, name.line) {
                Ok(()) => debug!(name = %name.lexeme, line = name.line, "declared"),
                Err(original_line) => self.report(SemanticError::Redeclared {
                    name: name.lexeme.clone(),
                    line: name.line,
                    original_line,
                }),
            }
        }
    }

    fn check_block(&mut self, block: &Block) {
        self.check_vars(&block.vars);
        for stat in &block.stats {
            self.check_stat(stat);
        }
    }

    fn check_stat(&mut self, stat: &Stat) {
        match stat {
            Stat::In(name) | Stat::Label(name) | Stat::Goto(name) => self.require_declared(name),
            Stat::Out(expr) => self.check_expr(expr),
            Stat::Block(block) => self.check_block(block),
            Stat::Iffy { cond, then_branch } => {
                self.check_condition(cond);
                self.check_stat(then_branch);
            }
            Stat::Loop { cond, body } => {
                self.check_condition(cond);
                self.check_stat(body);
            }
            Stat::Assign { target, value } => {
                self.require_declared(target);
                self.check_expr(value);
            }
        }
    }

    fn check_condition(&mut self, cond: &Condition) {
        self.check_expr(&cond.left);
        self.check_expr(&cond.right);
    }

    fn check_expr(&mut self, expr: &Expr) {
        self.check_product(&expr.left);
        if let Some((_, rest)) = &expr.rest {
            self.check_expr(rest);
        }
    }

    fn check_product(&mut self, product: &Product) {
        self.check_sum(&product.left);
        if let Some((_, _, rest)) = &product.rest {
            self.check_product(rest);
        }
    }

    fn check_sum(&mut self, sum: &Sum) {
        self.check_unary(&sum.left);
        if let Some((_, rest)) = &sum.rest {
            self.check_sum(rest);
        }
    }

    fn check_unary(&mut self, unary: &Unary) {
        match unary {
            Unary::Negate { operand, .. } => self.check_unary(operand),
            Unary::Operand(Operand::Group(inner)) => self.check_expr(inner),
            Unary::Operand(Operand::Identifier(name)) => self.require_declared(name),
            Unary::Operand(Operand::Integer(_)) => {}
        }
    }

    fn require_declared(&mut self, name: &Token) {
        if self.symbols.lookup(&name.lexeme).is_none() {
            self.report(SemanticError::Undeclared {
                name: name.lexeme.clone(),
                line: name.line,
            });
        }
    }

    fn report(&mut self, err: SemanticError) {
        debug!(line = err.line(), "{}", err);
        self.errors.push(err);
    }
}

/// Check a parsed program with a fresh symbol table.
pub fn check_program(program: &Program) -> Result<(), SemanticErrors> {
    SemanticChecker::new().check(program)
}
