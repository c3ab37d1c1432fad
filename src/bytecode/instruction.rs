use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};
use num_enum::{IntoPrimitive, TryFromPrimitive};

use super::options::{OptionFamily, OptionPayload};

/**
  Instruction kinds understood by a Newton receiver.

  The discriminants are the wire tags and are not contiguous in the order the kinds are
  grouped below, so they must never be renumbered. `Ignore` and `Exception` are sentinels:
  their tags do not fit in the six bit opcode field, so neither can come out of a decoded
  word. The strum names are the assembly mnemonics.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,          Eq,         PartialEq, Debug,            Hash
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum InstructionKind {
  // Control //
  #[strum(serialize = "UPDT")]
  Update    = 0x00,
  #[strum(serialize = "CLR")]
  Clear     = 0x01,
  #[strum(serialize = "SLP")]
  Sleep     = 0x07,

  // Selection //
  #[strum(serialize = "SEL")]
  Select    = 0x02,
  #[strum(serialize = "RAN")]
  Range     = 0x03,

  // Buffer alteration //
  #[strum(serialize = "SET")]
  Set       = 0x04,
  #[strum(serialize = "FILL")]
  Fill      = 0x05,

  // Effects //
  #[strum(serialize = "EBLR")]
  Blur      = 0x06,

  // Registers //
  #[strum(serialize = "LDX")]
  LoadX     = 0x08,
  #[strum(serialize = "LDY")]
  LoadY     = 0x09,

  // Sentinels //
  #[strum(serialize = "NOP")]
  Ignore    = 0xFE,
  #[strum(serialize = "EXC")]
  Exception = 0xFF,
}

impl InstructionKind {
  pub fn opcode(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// The option payload variant every instruction of this kind must carry.
  pub fn option_family(&self) -> OptionFamily {
    match self {
      InstructionKind::Update
      | InstructionKind::Clear
      | InstructionKind::Ignore
      | InstructionKind::Exception => OptionFamily::None,
      InstructionKind::Sleep       => OptionFamily::Time,
      InstructionKind::Select      => OptionFamily::Select,
      InstructionKind::Range       => OptionFamily::Range,
      InstructionKind::Set
      | InstructionKind::Fill      => OptionFamily::Color,
      InstructionKind::Blur        => OptionFamily::Effect,
      InstructionKind::LoadX
      | InstructionKind::LoadY     => OptionFamily::Load,
    }
  }

  /// True for the in-memory only kinds, `Ignore` and `Exception`.
  pub fn is_sentinel(&self) -> bool {
    match self {
      InstructionKind::Ignore | InstructionKind::Exception => true,
      _ => false
    }
  }
}

/// A decoded instruction. Plain value; two instructions are the same if their fields are.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct Instruction {
  pub kind: InstructionKind,
  pub options: OptionPayload,
  pub value: u8,
}

impl Instruction {
  pub fn new(kind: InstructionKind, options: OptionPayload, value: u8) -> Instruction {
    Instruction { kind, options, value }
  }

  /// The `NOP` instruction. Assemblers drop it rather than emit a word.
  pub fn ignore() -> Instruction {
    Instruction {
      kind: InstructionKind::Ignore,
      options: OptionPayload::None,
      value: 0x00,
    }
  }

  /// Whether `options` is the payload variant `kind` takes.
  pub fn has_matching_options(&self) -> bool {
    self.options.family() == self.kind.option_family()
  }
}

impl Default for Instruction {
  fn default() -> Self {
    Instruction::ignore()
  }
}
