//! Raw CIL method body decoding.
//!
//! Turns the bytes of a static initializer into the [`Instruction`] stream
//! the binding scanner walks. `ldstr` operands are resolved through the
//! user-string table and `stsfld` operands through the field table; every
//! other opcode is stepped over by operand width.

use super::opcodes::{self, Operand};
use super::{Instruction, ScanError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const TINY_FORMAT: u8 = 0x2;
const FAT_FORMAT: u8 = 0x3;

/// Code bytes of one method plus the metadata needed to resolve its tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CilBody {
    /// Instruction bytes, header already stripped
    pub code: Vec<u8>,
    /// `#US` heap tokens (0x70xxxxxx) to literal text
    #[serde(default)]
    pub user_strings: BTreeMap<u32, String>,
    /// Field tokens (0x04xxxxxx or member refs) to field names
    #[serde(default)]
    pub fields: BTreeMap<u32, String>,
}

impl CilBody {
    pub fn new(code: Vec<u8>) -> Self {
        Self {
            code,
            ..Default::default()
        }
    }

    /// Build from a complete method body, header included. Both tiny and fat
    /// headers are accepted.
    pub fn from_method_body(raw: &[u8]) -> Result<Self, ScanError> {
        let first = *raw.first().ok_or(ScanError::InvalidHeader {
            reason: "empty method body".into(),
        })?;

        let (header_size, code_size) = match first & 0x3 {
            TINY_FORMAT => (1, usize::from(first >> 2)),
            FAT_FORMAT => {
                if raw.len() < 12 {
                    return Err(ScanError::InvalidHeader {
                        reason: format!("fat header needs 12 bytes, found {}", raw.len()),
                    });
                }
                let flags = u16::from_le_bytes([raw[0], raw[1]]);
                let header_size = usize::from(flags >> 12) * 4;
                let code_size = u32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]) as usize;
                (header_size, code_size)
            }
            other => {
                return Err(ScanError::InvalidHeader {
                    reason: format!("unknown header format 0x{other:X}"),
                })
            }
        };

        let code = raw
            .get(header_size..header_size + code_size)
            .ok_or(ScanError::Truncated {
                offset: raw.len(),
            })?;
        Ok(Self::new(code.to_vec()))
    }

    pub fn with_user_string(mut self, token: u32, text: impl Into<String>) -> Self {
        self.user_strings.insert(token, text.into());
        self
    }

    pub fn with_field(mut self, token: u32, name: impl Into<String>) -> Self {
        self.fields.insert(token, name.into());
        self
    }

    /// Decode the full instruction stream.
    pub fn decode(&self) -> Result<Vec<Instruction>, ScanError> {
        let mut reader = Reader {
            code: &self.code,
            pos: 0,
        };
        let mut instructions = Vec::new();

        while !reader.at_end() {
            let offset = reader.pos;
            let (opcode, operand) = reader.opcode()?;

            let instruction = match opcode {
                opcodes::LDSTR => {
                    let token = reader.u32()?;
                    let text = self
                        .user_strings
                        .get(&token)
                        .ok_or(ScanError::UnresolvedToken { offset, token })?;
                    Instruction::LoadString(text.clone())
                }
                opcodes::STSFLD => {
                    let token = reader.u32()?;
                    let field = self
                        .fields
                        .get(&token)
                        .ok_or(ScanError::UnresolvedToken { offset, token })?;
                    Instruction::StoreStaticField(field.clone())
                }
                _ => {
                    reader.skip_operand(operand)?;
                    Instruction::Other(opcode)
                }
            };
            instructions.push(instruction);
        }

        Ok(instructions)
    }
}

struct Reader<'a> {
    code: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn at_end(&self) -> bool {
        self.pos >= self.code.len()
    }

    fn take(&mut self, n: usize) -> Result<&[u8], ScanError> {
        let bytes = self
            .code
            .get(self.pos..self.pos + n)
            .ok_or(ScanError::Truncated { offset: self.pos })?;
        self.pos += n;
        Ok(bytes)
    }

    fn u8(&mut self) -> Result<u8, ScanError> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32, ScanError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn opcode(&mut self) -> Result<(u16, Operand), ScanError> {
        let offset = self.pos;
        let first = self.u8()?;
        if first == opcodes::PREFIX {
            let second = self.u8()?;
            let opcode = u16::from_be_bytes([first, second]);
            let operand = opcodes::prefixed_operand(second)
                .ok_or(ScanError::UnknownOpcode { offset, opcode })?;
            return Ok((opcode, operand));
        }
        let opcode = u16::from(first);
        let operand = opcodes::single_byte_operand(first)
            .ok_or(ScanError::UnknownOpcode { offset, opcode })?;
        Ok((opcode, operand))
    }

    fn skip_operand(&mut self, operand: Operand) -> Result<(), ScanError> {
        match operand.fixed_width() {
            Some(width) => {
                self.take(width)?;
            }
            None => {
                let targets = self.u32()? as usize;
                self.take(targets.saturating_mul(4))?;
            }
        }
        Ok(())
    }
}
