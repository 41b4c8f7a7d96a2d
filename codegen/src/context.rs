use std::collections::BTreeMap;

use crate::vm::VmOperand;

/// Temporary that holds the value written by `out` and the right side of a comparison.
pub const RESERVED_TEMP: usize = 0;
/// First temporary minted inside a statement.
pub const TEMP_BASELINE: usize = 2;

/// Naming counters and pending storage for one compilation.
#[derive(Debug)]
pub struct CodeGenContext {
    temp_counter: usize,
    label_counter: usize,
    declarations: BTreeMap<String, i64>,
    reserved_temp_declared: bool,
}

impl Default for CodeGenContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenContext {
    pub fn new() -> Self {
        Self {
            temp_counter: TEMP_BASELINE,
            label_counter: 0,
            declarations: BTreeMap::new(),
            reserved_temp_declared: false,
        }
    }

    /// Record a user variable with its initial value.
    pub fn declare(&mut self, name: &str, value: i64) {
        self.declarations.insert(name.to_string(), value);
    }

    /// Mint the next scratch temporary and register it with value 0.
    pub fn new_temp(&mut self) -> VmOperand {
        let n = self.temp_counter;
        self.temp_counter += 1;
        self.declarations.entry(format!("T{}", n)).or_insert(0);
        VmOperand::Temp(n)
    }

    /// The reserved temporary, declared the first time it is asked for.
    pub fn reserved_temp(&mut self) -> VmOperand {
        if !self.reserved_temp_declared {
            self.declarations
                .entry(format!("T{}", RESERVED_TEMP))
                .or_insert(0);
            self.reserved_temp_declared = true;
        }
        VmOperand::Temp(RESERVED_TEMP)
    }

    /// Labels are unique across the whole program.
    pub fn new_label(&mut self) -> String {
        let label = format!("L{}", self.label_counter);
        self.label_counter += 1;
        label
    }

    pub fn reset_temps(&mut self) {
        self.temp_counter = TEMP_BASELINE;
    }

    /// Pending storage, ordered by name.
    pub fn declarations(&self) -> &BTreeMap<String, i64> {
        &self.declarations
    }

    pub fn into_declarations(self) -> BTreeMap<String, i64> {
        self.declarations
    }
}
