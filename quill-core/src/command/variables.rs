//! Numbered variables
//!
//! `#<n>=<value>` stores a value; `#<n>` in a word position reads it back.
//! Unset variables read as zero.

use heapless::FnvIndexMap;

/// Maximum number of distinct variables (must be a power of two)
pub const MAX_VARIABLES: usize = 32;

/// Variable storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VariableError {
    /// No room for another distinct variable
    TableFull,
}

/// Table of numbered variables
#[derive(Debug, Clone, Default)]
pub struct VariableTable {
    values: FnvIndexMap<u16, f32, MAX_VARIABLES>,
}

impl VariableTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            values: FnvIndexMap::new(),
        }
    }

    /// Read a variable; unset variables are zero
    pub fn get(&self, index: u16) -> f32 {
        self.values.get(&index).copied().unwrap_or(0.0)
    }

    /// Assign a variable, replacing any previous value
    pub fn set(&mut self, index: u16, value: f32) -> Result<(), VariableError> {
        self.values
            .insert(index, value)
            .map(|_| ())
            .map_err(|_| VariableError::TableFull)
    }
}
