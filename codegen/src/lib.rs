mod context;
mod expressions;
mod generator;
mod vm;

use model::Program;
use std::fmt;

pub use context::{CodeGenContext, RESERVED_TEMP, TEMP_BASELINE};
pub use generator::CodeGenerator;
pub use vm::{VmInstr, VmOperand, emit_asm};

/// Generated program: instructions ending in `STOP`, then storage sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub instructions: Vec<VmInstr>,
    pub declarations: Vec<(String, i64)>,
}

impl fmt::Display for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&emit_asm(&self.instructions))?;
        for (name, value) in &self.declarations {
            writeln!(f, "{} {}", name, value)?;
        }
        Ok(())
    }
}

/// Generate code for a program that already passed the semantic check.
pub fn generate(program: &Program) -> Assembly {
    CodeGenerator::new().gen_program(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(src: &str) -> String {
        let program = parser::parse_source(src).expect("program should parse");
        semantic::check_program(&program).expect("program should check");
        generate(&program).to_string()
    }

    #[test]
    fn out_of_declared_variable() {
        assert_eq!(
            compile("declare x := 5;\n{ out x; }"),
            "LOAD x\nSTORE T0\nWRITE T0\nSTOP\nT0 0\nx 5\n"
        );
    }

    #[test]
    fn strict_less_skips_on_zero_or_positive() {
        let asm = compile("declare a := 1; declare b := 2; { iffy [ a < b ] then out a; ; }");
        assert_eq!(
            asm,
            "LOAD b\nSTORE T0\nLOAD a\nSUB T0\nBRZPOS L0\n\
             LOAD a\nSTORE T0\nWRITE T0\nL0: NOOP\nSTOP\nT0 0\na 1\nb 2\n"
        );
    }

    #[test]
    fn skip_branch_per_relational_operator() {
        let cases = [
            ("<<", vec!["BRPOS L0"]),
            ("<>", vec!["BRZERO L0"]),
            ("<", vec!["BRZPOS L0"]),
            (">>", vec!["BRNEG L0"]),
            (">", vec!["BRZNEG L0"]),
            ("==", vec!["BRNEG L0", "BRPOS L0"]),
        ];
        for (op, expected) in cases {
            let src = format!("declare a := 0; {{ iffy [ a {} 1 ] then in a; ; }}", op);
            let asm = compile(&src);
            let branches: Vec<&str> = asm.lines().filter(|l| l.starts_with("BR")).collect();
            assert_eq!(branches, expected, "operator {}", op);
        }
    }

    #[test]
    fn loop_branches_back_to_start() {
        let asm = compile("declare i := 3; { loop [ i >> 1 ] i := i - 1; ; }");
        assert_eq!(
            asm,
            "L0: NOOP\nLOAD 1\nSTORE T0\nLOAD i\nSUB T0\nBRNEG L1\n\
             LOAD 1\nSTORE T2\nLOAD i\nSUB T2\nSTORE i\n\
             BR L0\nL1: NOOP\nSTOP\nT0 0\nT2 0\ni 3\n"
        );
    }

    #[test]
    fn right_operand_is_lowered_first() {
        let asm = compile("declare a := 1; declare b := 2; { a := a - b; }");
        assert_eq!(asm, "LOAD b\nSTORE T2\nLOAD a\nSUB T2\nSTORE a\nSTOP\nT2 0\na 1\nb 2\n");
    }

    #[test]
    fn nested_right_recursion_mints_inner_temps_first() {
        let asm = compile("declare a := 0; { a := 1 - 2 - 3; }");
        assert_eq!(
            asm,
            "LOAD 3\nSTORE T2\nLOAD 2\nSUB T2\nSTORE T3\nLOAD 1\nSUB T3\nSTORE a\nSTOP\nT2 0\nT3 0\na 0\n"
        );
    }

    #[test]
    fn multiply_divide_and_add() {
        let asm = compile("declare a := 0; { a := 2 * 3 + 4; a := 8 / a; }");
        assert_eq!(
            asm,
            "LOAD 4\nSTORE T2\nLOAD 3\nADD T2\nSTORE T3\nLOAD 2\nMULT T3\nSTORE a\n\
             LOAD a\nSTORE T4\nLOAD 8\nDIV T4\nSTORE a\n\
             STOP\nT2 0\nT3 0\nT4 0\na 0\n"
        );
    }

    #[test]
    fn assign_keeps_temp_counter_and_out_resets_it() {
        let asm = compile("declare x := 0; { x := 1 - 2; out 3 - 4; out 5 - 6; }");
        let stores: Vec<&str> = asm.lines().filter(|l| l.starts_with("STORE T")).collect();
        assert_eq!(
            stores,
            vec!["STORE T2", "STORE T3", "STORE T0", "STORE T2", "STORE T0"]
        );
    }

    #[test]
    fn star_prefix_negates() {
        assert_eq!(
            compile("{ out * 5; }"),
            "LOAD 5\nMULT -1\nSTORE T0\nWRITE T0\nSTOP\nT0 0\n"
        );
    }

    #[test]
    fn parenthesised_group_is_lowered_in_place() {
        let asm = compile("declare a := 0; { a := (a + 1) * 2; }");
        assert_eq!(
            asm,
            "LOAD 2\nSTORE T2\nLOAD 1\nSTORE T3\nLOAD a\nADD T3\nMULT T2\nSTORE a\nSTOP\nT2 0\nT3 0\na 0\n"
        );
    }

    #[test]
    fn input_labels_and_jumps() {
        assert_eq!(
            compile("declare x := 0; { in x; label x; goto x; }"),
            "READ x\nx: NOOP\nBR x\nSTOP\nx 0\n"
        );
    }

    #[test]
    fn integer_literals_are_emitted_verbatim() {
        assert!(compile("{ out 007; }").starts_with("LOAD 007\n"));
    }

    #[test]
    fn labels_are_unique_across_statements() {
        let asm = compile("declare a := 0; { iffy [ a == 0 ] then in a; ; loop [ a > 0 ] in a; ; }");
        let noops: Vec<&str> = asm.lines().filter(|l| l.ends_with(": NOOP")).collect();
        assert_eq!(noops, vec!["L0: NOOP", "L1: NOOP", "L2: NOOP"]);
    }

    #[test]
    fn block_declarations_are_collected() {
        let asm = compile("{ declare b := 7; { declare a := 0; in a; } in b; }");
        assert!(asm.ends_with("STOP\na 0\nb 7\n"));
    }

    #[test]
    fn generation_is_deterministic() {
        let src = "declare n := 4; declare f := 1;
        { loop [ n > 0 ] { f := f * n; n := n - 1; } ; out f; }";
        assert_eq!(compile(src), compile(src));
    }

    #[test]
    fn assembly_keeps_instruction_model() {
        let program = parser::parse_source("{ out 1; }").unwrap();
        let assembly = generate(&program);
        assert_eq!(assembly.instructions.last(), Some(&VmInstr::Stop));
        assert_eq!(assembly.declarations, vec![("T0".to_string(), 0)]);
    }
}
