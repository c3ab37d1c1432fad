//! Errors produced while decoding words, encoding instructions and parsing assembly literals.

use thiserror::Error;

use crate::bytecode::{InstructionKind, OptionPayload, RawInstruction};

pub type Result<T> = std::result::Result<T, NewtonError>;

/// Every error is terminal for the input that caused it. The codec never retries; the caller
/// decides whether a malformed word ends its session or is simply dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewtonError {
  /// The opcode field of a word does not name a decodable kind, or its option bits are not a
  /// tag of the kind's option set.
  #[error("invalid instruction word (opcode {:#04X}, option {}, value {:#04X})",
    .raw.opcode, .raw.option, .raw.value)]
  InvalidInstruction {
    raw: RawInstruction
  },

  /// The option payload is not the one the instruction kind takes, e.g. a `Fill` carrying a
  /// time option. Encoding rejects such kind/payload mismatches instead of emitting a word.
  #[error("option {options:?} cannot be encoded for a {kind:?} instruction")]
  InvalidOptionForInstruction {
    kind: InstructionKind,
    options: OptionPayload
  },

  /// `Ignore` and `Exception` have tags wider than the opcode field and only exist in memory.
  #[error("{kind:?} is a sentinel and has no wire encoding")]
  UnencodableKind {
    kind: InstructionKind
  },

  /// A line of assembly text is not an instruction literal.
  #[error("line {line}: `{literal}` is not an instruction literal")]
  InvalidLiteral {
    line: usize,
    literal: String
  },
}
