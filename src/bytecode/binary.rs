/*!
  This module is responsible for the encoding and decoding of binary instructions.

*/
use std::convert::TryFrom;

use log::debug;
#[cfg(any(test, feature = "trace_codec"))]
use log::trace;

use super::{Instruction, InstructionKind};
use crate::error::{NewtonError, Result};

// If you change these you must also change `RawInstruction::from_word` and `to_word`.
pub type Word = u16;

pub const OPCODE_SHIFT : u32  = 10;
pub const OPCODE_MASK  : Word = 0xFC00;
pub const OPTION_SHIFT : u32  = 8;
pub const OPTION_MASK  : Word = 0x0300;
pub const VALUE_MASK   : Word = 0x00FF;

/// Largest opcode the six bit field can hold.
pub const MAX_OPCODE: u8 = (OPCODE_MASK >> OPCODE_SHIFT) as u8;

/// The three fields of a word, unvalidated.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct RawInstruction {
  pub opcode: u8,
  pub option: u8,
  pub value: u8,
}

impl RawInstruction {
  // [OpCode:6][Option:2][Value:8]
  pub fn from_word(word: Word) -> RawInstruction {
    RawInstruction {
      opcode: ((word & OPCODE_MASK) >> OPCODE_SHIFT) as u8,
      option: ((word & OPTION_MASK) >> OPTION_SHIFT) as u8,
      value:  (word & VALUE_MASK) as u8,
    }
  }

  /// Bits of `opcode` and `option` that do not fit their fields are dropped.
  pub fn to_word(&self) -> Word {
    (((self.opcode as Word) << OPCODE_SHIFT) & OPCODE_MASK)
      | (((self.option as Word) << OPTION_SHIFT) & OPTION_MASK)
      | ((self.value  as Word) & VALUE_MASK)
  }
}

impl From<Word> for RawInstruction {
  fn from(word: Word) -> Self {
    RawInstruction::from_word(word)
  }
}

impl From<RawInstruction> for Word {
  fn from(raw: RawInstruction) -> Self {
    raw.to_word()
  }
}

/**
  Decodes a single word. Fails if the opcode is not a decodable kind or if the option bits
  are not a tag of the kind's option set. Kinds that take no option ignore the option bits.
*/
pub fn decode_instruction(word: Word) -> Result<Instruction> {
  let raw = RawInstruction::from_word(word);
  let invalid = || {
    debug!("rejected word {:#06X}: {:?}", word, raw);
    NewtonError::InvalidInstruction { raw }
  };

  let kind = InstructionKind::try_from(raw.opcode).map_err(|_| invalid())?;
  if kind == InstructionKind::Exception {
    return Err(invalid());
  }

  let options = kind.option_family().payload(raw.option).ok_or_else(invalid)?;
  let instruction = Instruction { kind, options, value: raw.value };

  #[cfg(any(test, feature = "trace_codec"))]
  trace!("decoded {:#06X} -> {:?}", word, instruction);

  Ok(instruction)
}

/**
  Encodes the instruction into a word. The options must be the payload variant the kind
  takes, and the kind must fit the opcode field, which excludes the `Ignore` and `Exception`
  sentinels.
*/
pub fn encode_instruction(instruction: Instruction) -> Result<Word> {
  let Instruction { kind, options, value } = instruction;

  if kind.is_sentinel() {
    debug!("refused to encode sentinel {:?}", instruction);
    return Err(NewtonError::UnencodableKind { kind });
  }
  if !instruction.has_matching_options() {
    debug!("refused to encode {:?}: options do not belong to the kind", instruction);
    return Err(NewtonError::InvalidOptionForInstruction { kind, options });
  }

  let word = RawInstruction { opcode: kind.opcode(), option: options.tag(), value }.to_word();

  #[cfg(any(test, feature = "trace_codec"))]
  trace!("encoded {:?} -> {:#06X}", instruction, word);

  Ok(word)
}

impl TryFrom<Word> for Instruction {
  type Error = NewtonError;

  fn try_from(word: Word) -> Result<Self> {
    decode_instruction(word)
  }
}

impl TryFrom<Instruction> for Word {
  type Error = NewtonError;

  fn try_from(instruction: Instruction) -> Result<Self> {
    encode_instruction(instruction)
  }
}

/// Decodes a stream of words, stopping at the first malformed one.
pub fn decode_words(words: &[Word]) -> Result<Vec<Instruction>> {
  words.iter().map(|&word| decode_instruction(word)).collect()
}

/// Encodes a stream of instructions, stopping at the first one that cannot be encoded.
pub fn encode_instructions(instructions: &[Instruction]) -> Result<Vec<Word>> {
  instructions.iter().map(|&instruction| encode_instruction(instruction)).collect()
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::bytecode::options::*;

  fn assert_instruction(word: Word, instruction: Instruction) {
    assert_eq!(decode_instruction(word), Ok(instruction));
    assert_eq!(encode_instruction(instruction), Ok(word));
  }

  fn instr(kind: InstructionKind, options: OptionPayload, value: u8) -> Instruction {
    Instruction::new(kind, options, value)
  }

  #[test]
  fn field_layout() {
    let raw = RawInstruction::from_word(0b000111_10_00001010);
    assert_eq!(raw, RawInstruction { opcode: 7, option: 2, value: 10 });
    assert_eq!(raw.to_word(), 0b000111_10_00001010);
    assert_eq!(MAX_OPCODE, 63);
  }

  #[test]
  fn to_word_truncates_wide_fields() {
    let raw = RawInstruction { opcode: 0xFE, option: 0x07, value: 0x12 };
    assert_eq!(raw.to_word(), 0b111110_11_00010010);
  }

  #[test]
  fn control_instructions() {
    assert_instruction(0b000000_00_11111111, instr(InstructionKind::Update, OptionPayload::None, 0xFF));
    assert_instruction(0b000001_00_11111111, instr(InstructionKind::Clear, OptionPayload::None, 0xFF));
    assert_instruction(
      0b000111_01_11110000,
      instr(InstructionKind::Sleep, OptionPayload::Time(TimeOptions::Ms), 0xF0)
    );
    assert_instruction(
      0b000111_10_00001010,
      instr(InstructionKind::Sleep, OptionPayload::Time(TimeOptions::Sec), 10)
    );
    assert_instruction(
      0b000111_11_11110000,
      instr(InstructionKind::Sleep, OptionPayload::Time(TimeOptions::Min), 0xF0)
    );
  }

  #[test]
  fn selection_instructions() {
    assert_instruction(
      0b000010_00_10101010,
      instr(InstructionKind::Select, OptionPayload::Select(SelectOptions::Absolute), 0xAA)
    );
    assert_instruction(
      0b000010_01_10101010,
      instr(InstructionKind::Select, OptionPayload::Select(SelectOptions::Relative), 0xAA)
    );
    assert_instruction(
      0b000011_00_10101010,
      instr(InstructionKind::Range, OptionPayload::Range(RangeOptions::AbsoluteStart), 0xAA)
    );
    assert_instruction(
      0b000011_01_10101010,
      instr(InstructionKind::Range, OptionPayload::Range(RangeOptions::RelativeStart), 0xAA)
    );
    assert_instruction(
      0b000011_10_11111111,
      instr(InstructionKind::Range, OptionPayload::Range(RangeOptions::AbsoluteEnd), 0xFF)
    );
    assert_instruction(
      0b000011_11_11111111,
      instr(InstructionKind::Range, OptionPayload::Range(RangeOptions::RelativeEnd), 0xFF)
    );
  }

  #[test]
  fn buffer_and_effect_instructions() {
    assert_instruction(
      0b000100_00_11110000,
      instr(InstructionKind::Set, OptionPayload::Color(ColorOptions::Red), 0xF0)
    );
    assert_instruction(
      0b000100_10_11110000,
      instr(InstructionKind::Set, OptionPayload::Color(ColorOptions::Blue), 0xF0)
    );
    assert_instruction(
      0b000101_01_11110000,
      instr(InstructionKind::Fill, OptionPayload::Color(ColorOptions::Green), 0xF0)
    );
    assert_instruction(
      0b000101_10_11111111,
      instr(InstructionKind::Fill, OptionPayload::Color(ColorOptions::Blue), 0xFF)
    );
    assert_instruction(
      0b000110_00_11110000,
      instr(InstructionKind::Blur, OptionPayload::Effect(EffectOptions::ApplyAll), 0xF0)
    );
    assert_instruction(
      0b000110_01_11110000,
      instr(InstructionKind::Blur, OptionPayload::Effect(EffectOptions::ApplyRange), 0xF0)
    );
  }

  #[test]
  fn register_instructions() {
    assert_instruction(
      0b001000_00_00000001,
      instr(InstructionKind::LoadX, OptionPayload::Load(LoadOptions::Variable), 0x01)
    );
    assert_instruction(
      0b001000_01_11111111,
      instr(InstructionKind::LoadX, OptionPayload::Load(LoadOptions::Red), 0xFF)
    );
    assert_instruction(
      0b001001_10_11111111,
      instr(InstructionKind::LoadY, OptionPayload::Load(LoadOptions::Green), 0xFF)
    );
    assert_instruction(
      0b001001_11_11111111,
      instr(InstructionKind::LoadY, OptionPayload::Load(LoadOptions::Blue), 0xFF)
    );
  }

  #[test]
  fn option_bits_of_optionless_kinds_are_normalized() {
    let decoded = decode_instruction(0b000001_11_00000101).unwrap();
    assert_eq!(decoded, instr(InstructionKind::Clear, OptionPayload::None, 5));
    assert_eq!(encode_instruction(decoded), Ok(0b000001_00_00000101));
  }

  #[test]
  fn unknown_opcode() {
    let word = 0b111111_01_00000011;
    assert_eq!(
      decode_instruction(word),
      Err(NewtonError::InvalidInstruction {
        raw: RawInstruction { opcode: 0x3F, option: 1, value: 3 }
      })
    );
    assert!(decode_instruction(0b001010_00_00000000).is_err());
  }

  #[test]
  fn unassigned_option_tag() {
    // Sleep has no unit with tag 0.
    assert_eq!(
      decode_instruction(0b000111_00_00000001),
      Err(NewtonError::InvalidInstruction {
        raw: RawInstruction { opcode: 7, option: 0, value: 1 }
      })
    );
    assert!(decode_instruction(0b000101_11_00000000).is_err());
    assert!(decode_instruction(0b000010_10_00000000).is_err());
  }

  #[test]
  fn mismatched_options() {
    let fill = instr(InstructionKind::Fill, OptionPayload::Time(TimeOptions::Sec), 5);
    assert_eq!(
      encode_instruction(fill),
      Err(NewtonError::InvalidOptionForInstruction {
        kind: InstructionKind::Fill,
        options: OptionPayload::Time(TimeOptions::Sec)
      })
    );

    let update = instr(InstructionKind::Update, OptionPayload::Color(ColorOptions::Red), 0);
    assert!(encode_instruction(update).is_err());

    let blur = instr(InstructionKind::Blur, OptionPayload::None, 0);
    assert!(encode_instruction(blur).is_err());
  }

  #[test]
  fn sentinels_are_not_encoded() {
    assert_eq!(
      encode_instruction(Instruction::ignore()),
      Err(NewtonError::UnencodableKind { kind: InstructionKind::Ignore })
    );
    let exception = instr(InstructionKind::Exception, OptionPayload::None, 0);
    assert_eq!(
      encode_instruction(exception),
      Err(NewtonError::UnencodableKind { kind: InstructionKind::Exception })
    );
  }

  #[test]
  fn streams() {
    let words = vec![0b000010_00_00000011, 0b000101_00_11111111, 0b000000_00_00000000];
    let instructions = decode_words(&words).unwrap();
    assert_eq!(instructions.len(), 3);
    assert_eq!(encode_instructions(&instructions), Ok(words));

    assert!(decode_words(&[0x0000, 0xFFFF, 0x0000]).is_err());
  }

  #[test]
  fn stream_encoding_stops_at_first_bad_instruction() {
    let update = instr(InstructionKind::Update, OptionPayload::None, 0);
    let bad_fill = instr(InstructionKind::Fill, OptionPayload::Effect(EffectOptions::ApplyAll), 1);
    assert_eq!(
      encode_instructions(&[update, bad_fill, Instruction::ignore()]),
      Err(NewtonError::InvalidOptionForInstruction {
        kind: InstructionKind::Fill,
        options: OptionPayload::Effect(EffectOptions::ApplyAll)
      })
    );
    assert_eq!(
      encode_instructions(&[update, Instruction::ignore(), bad_fill]),
      Err(NewtonError::UnencodableKind { kind: InstructionKind::Ignore })
    );
    assert_eq!(encode_instructions(&[]), Ok(vec![]));
  }

  #[test]
  fn conversions() {
    let instruction = Instruction::try_from(0b000111_10_00001010u16).unwrap();
    assert_eq!(instruction.kind, InstructionKind::Sleep);
    assert_eq!(Word::try_from(instruction), Ok(0b000111_10_00001010));
    assert_eq!(Word::from(RawInstruction::from(0x1234u16)), 0x1234);
  }
}
