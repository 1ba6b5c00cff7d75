//! Name-table binding recovery.
//!
//! A compiled type that exposes script-visible members carries nested
//! "name table" types (`MethodName`, `PropertyName`, `SignalName`) whose
//! static initializer assigns a string literal to one static field per
//! member:
//!
//! ```text
//! ldstr   "add_child"
//! call    StringName::op_Implicit(string)
//! stsfld  StringName MethodName::AddChild
//! ```
//!
//! Walking that initializer recovers ordered `(logical, field)` pairs. The
//! walk is abstracted behind [`BindingScanner`] so a different IR (or a
//! native symbol table) can be plugged in without touching the resolver.

pub mod cil;
pub mod opcodes;

pub use cil::CilBody;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// One decoded instruction, reduced to what binding recovery needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// Push of a string literal
    LoadString(String),
    /// Store into the named static field
    StoreStaticField(String),
    /// Anything else, by opcode value
    Other(u16),
}

/// Static initializer body in whichever form the module provides it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitializerBody {
    /// Already-decoded instruction stream
    Instructions(Vec<Instruction>),
    /// Raw CIL bytes plus token tables
    Cil(CilBody),
}

impl InitializerBody {
    pub fn instructions(&self) -> Result<std::borrow::Cow<'_, [Instruction]>, ScanError> {
        match self {
            Self::Instructions(list) => Ok(std::borrow::Cow::Borrowed(list)),
            Self::Cil(body) => body.decode().map(std::borrow::Cow::Owned),
        }
    }
}

/// A recovered `(logical name, bound field)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameBinding {
    pub logical_name: String,
    pub field_name: String,
}

impl NameBinding {
    pub fn new(logical_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            logical_name: logical_name.into(),
            field_name: field_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("unknown opcode 0x{opcode:04X} at offset {offset}")]
    UnknownOpcode { offset: usize, opcode: u16 },

    #[error("instruction stream truncated at offset {offset}")]
    Truncated { offset: usize },

    #[error("token 0x{token:08X} at offset {offset} does not resolve")]
    UnresolvedToken { offset: usize, token: u32 },

    #[error("invalid method header: {reason}")]
    InvalidHeader { reason: String },
}

/// Recovers name bindings from an initializer body.
pub trait BindingScanner {
    fn scan(&self, body: &InitializerBody) -> Result<Vec<NameBinding>, ScanError>;
}

/// Default scanner: pairs each `stsfld` with the most recent `ldstr`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralStoreScanner;

impl LiteralStoreScanner {
    /// Walk instructions in program order.
    ///
    /// The last literal loaded before a store wins; instructions in between
    /// do not clear it. A logical name seen a second time is ignored.
    pub fn scan_instructions(instructions: &[Instruction]) -> Vec<NameBinding> {
        let mut pending: Option<&str> = None;
        let mut seen = HashSet::new();
        let mut bindings = Vec::new();

        for instruction in instructions {
            match instruction {
                Instruction::LoadString(literal) => pending = Some(literal.as_str()),
                Instruction::StoreStaticField(field) => {
                    if let Some(literal) = pending.take() {
                        if seen.insert(literal) {
                            bindings.push(NameBinding::new(literal, field.as_str()));
                        }
                    }
                }
                Instruction::Other(_) => {}
            }
        }

        bindings
    }
}

impl BindingScanner for LiteralStoreScanner {
    fn scan(&self, body: &InitializerBody) -> Result<Vec<NameBinding>, ScanError> {
        let instructions = body.instructions()?;
        Ok(Self::scan_instructions(&instructions))
    }
}
