/*!
  Option sub-encodings. The two option bits of a word are read differently depending on the
  instruction kind, so each kind family gets its own small enum of tags and `OptionPayload`
  tags the family.
*/

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::EnumIter;

/// Whether `Select` addresses an LED directly or as a fraction of the strip.
#[derive(TryFromPrimitive, IntoPrimitive, EnumIter, Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[repr(u8)]
pub enum SelectOptions {
  Absolute = 0,
  Relative = 1,
}

/// Which bound of the range a `Range` instruction moves, and how.
#[derive(TryFromPrimitive, IntoPrimitive, EnumIter, Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[repr(u8)]
pub enum RangeOptions {
  AbsoluteStart = 0,
  RelativeStart = 1,
  AbsoluteEnd = 2,
  RelativeEnd = 3,
}

/// Color channel written by `Set` and `Fill`.
#[derive(TryFromPrimitive, IntoPrimitive, EnumIter, Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[repr(u8)]
pub enum ColorOptions {
  Red = 0,
  Green = 1,
  Blue = 2,
}

#[derive(TryFromPrimitive, IntoPrimitive, EnumIter, Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[repr(u8)]
pub enum EffectOptions {
  ApplyAll = 0,
  ApplyRange = 1,
}

/// Unit of a `Sleep` duration. Tag 0 is unassigned.
#[derive(TryFromPrimitive, IntoPrimitive, EnumIter, Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[repr(u8)]
pub enum TimeOptions {
  Ms = 1,
  Sec = 2,
  Min = 3,
}

/// Source of a register load: a device variable, or a channel of the selected LED.
#[derive(TryFromPrimitive, IntoPrimitive, EnumIter, Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[repr(u8)]
pub enum LoadOptions {
  Variable = 0,
  Red = 1,
  Green = 2,
  Blue = 3,
}

/// The shape of option an instruction kind takes, without the tag itself.
#[derive(EnumIter, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum OptionFamily {
  None,
  Time,
  Select,
  Range,
  Color,
  Effect,
  Load,
}

/// The decoded option bits of an instruction.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum OptionPayload {
  None,
  Time(TimeOptions),
  Select(SelectOptions),
  Range(RangeOptions),
  Color(ColorOptions),
  Effect(EffectOptions),
  Load(LoadOptions),
}

impl OptionPayload {
  /// The raw option bits. `None` is always written as zero.
  pub fn tag(&self) -> u8 {
    match *self {
      OptionPayload::None             => 0x00,
      OptionPayload::Time(option)     => option.into(),
      OptionPayload::Select(option)   => option.into(),
      OptionPayload::Range(option)    => option.into(),
      OptionPayload::Color(option)    => option.into(),
      OptionPayload::Effect(option)   => option.into(),
      OptionPayload::Load(option)     => option.into(),
    }
  }

  pub fn family(&self) -> OptionFamily {
    match self {
      OptionPayload::None       => OptionFamily::None,
      OptionPayload::Time(_)    => OptionFamily::Time,
      OptionPayload::Select(_)  => OptionFamily::Select,
      OptionPayload::Range(_)   => OptionFamily::Range,
      OptionPayload::Color(_)   => OptionFamily::Color,
      OptionPayload::Effect(_)  => OptionFamily::Effect,
      OptionPayload::Load(_)    => OptionFamily::Load,
    }
  }
}

impl OptionFamily {
  /**
    Reads a two bit option field as a tag of this family. Returns `None` when the family has
    no option with that tag. The `None` family takes no option, so any bits are accepted and
    dropped.
  */
  pub fn payload(&self, tag: u8) -> Option<OptionPayload> {
    match self {
      OptionFamily::None   => Some(OptionPayload::None),
      OptionFamily::Time   => TimeOptions::try_from(tag).ok().map(OptionPayload::Time),
      OptionFamily::Select => SelectOptions::try_from(tag).ok().map(OptionPayload::Select),
      OptionFamily::Range  => RangeOptions::try_from(tag).ok().map(OptionPayload::Range),
      OptionFamily::Color  => ColorOptions::try_from(tag).ok().map(OptionPayload::Color),
      OptionFamily::Effect => EffectOptions::try_from(tag).ok().map(OptionPayload::Effect),
      OptionFamily::Load   => LoadOptions::try_from(tag).ok().map(OptionPayload::Load),
    }
  }
}
