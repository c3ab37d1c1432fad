/*!
  The human readable textual form of Newton bytecode is called assembly. Each line holds one
  instruction literal: a mnemonic, an option token when the kind takes one, and the value in
  hexadecimal.

  ```text
  -- light up the first half of the strip in blue
  RAN # 00
  RAN %% 7F
  FILL B FF
  UPDT
  SLP SEC 02
  ```

  Kind mnemonics come from the `strum` derives on `InstructionKind`; option tokens live in one
  `BiMap` per option family, so the same table serves parsing and printing.
*/

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use bimap::BiMap;
use log::debug;
use nom::{
  IResult,
  bytes::complete::{tag, tag_no_case, take_while1, take_while_m_n},
  character::complete::{alphanumeric1, space0, space1},
  combinator::{all_consuming, map, map_opt, map_res, opt, rest, verify},
  sequence::{preceded, tuple},
};

use super::{Instruction, InstructionKind, OptionFamily, OptionPayload, Word, encode_instruction};
use super::options::*;
use crate::error::{NewtonError, Result};

pub const COMMENT_PREFIX: &str = "--";

type MnemonicTable = BiMap<&'static str, OptionPayload>;

fn mnemonic_table(entries: &[(&'static str, OptionPayload)]) -> MnemonicTable {
  entries.iter().cloned().collect()
}

lazy_static! {
  static ref OPTION_MNEMONICS: HashMap<OptionFamily, MnemonicTable> = {
    let mut tables = HashMap::new();
    tables.insert(OptionFamily::Time, mnemonic_table(&[
      ("MS",  OptionPayload::Time(TimeOptions::Ms)),
      ("SEC", OptionPayload::Time(TimeOptions::Sec)),
      ("MIN", OptionPayload::Time(TimeOptions::Min)),
    ]));
    tables.insert(OptionFamily::Select, mnemonic_table(&[
      ("#", OptionPayload::Select(SelectOptions::Absolute)),
      ("%", OptionPayload::Select(SelectOptions::Relative)),
    ]));
    tables.insert(OptionFamily::Range, mnemonic_table(&[
      ("#",  OptionPayload::Range(RangeOptions::AbsoluteStart)),
      ("%",  OptionPayload::Range(RangeOptions::RelativeStart)),
      ("##", OptionPayload::Range(RangeOptions::AbsoluteEnd)),
      ("%%", OptionPayload::Range(RangeOptions::RelativeEnd)),
    ]));
    tables.insert(OptionFamily::Color, mnemonic_table(&[
      ("R", OptionPayload::Color(ColorOptions::Red)),
      ("G", OptionPayload::Color(ColorOptions::Green)),
      ("B", OptionPayload::Color(ColorOptions::Blue)),
    ]));
    tables.insert(OptionFamily::Effect, mnemonic_table(&[
      ("ALL", OptionPayload::Effect(EffectOptions::ApplyAll)),
      ("RAN", OptionPayload::Effect(EffectOptions::ApplyRange)),
    ]));
    tables.insert(OptionFamily::Load, mnemonic_table(&[
      ("$", OptionPayload::Load(LoadOptions::Variable)),
      ("R", OptionPayload::Load(LoadOptions::Red)),
      ("G", OptionPayload::Load(LoadOptions::Green)),
      ("B", OptionPayload::Load(LoadOptions::Blue)),
    ]));
    tables
  };
}

/// Accepted when parsing, never printed.
const OPTION_ALIASES: &[(OptionFamily, &str, OptionPayload)] = &[
  (OptionFamily::Load, "VAR", OptionPayload::Load(LoadOptions::Variable)),
];

/// The token printed for an option, `None` for the payload of kinds without options.
pub fn option_mnemonic(options: &OptionPayload) -> Option<&'static str> {
  OPTION_MNEMONICS
    .get(&options.family())
    .and_then(|table| table.get_by_right(options))
    .copied()
}

/// Looks up an option token, case-insensitively, among the options of `family`.
pub fn option_from_mnemonic(family: OptionFamily, token: &str) -> Option<OptionPayload> {
  let token = token.to_ascii_uppercase();
  OPTION_MNEMONICS
    .get(&family)
    .and_then(|table| table.get_by_left(token.as_str()))
    .copied()
    .or_else(|| {
      OPTION_ALIASES
        .iter()
        .find(|(alias_family, alias, _)| *alias_family == family && *alias == token)
        .map(|&(_, _, payload)| payload)
    })
}

/**
  Prints the canonical literal, e.g. `SEL % 0A`. Parsing the output gives back the same
  instruction whenever the options belong to the kind and the kind is not `Exception`, which
  covers every instruction that decodes or encodes. A mismatched instruction such as
  `Fill` with a time option prints as `FILL SEC 05`, which is not a literal.
*/
impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match option_mnemonic(&self.options) {

      Some(option) => {
        write!(f, "{} {} {:02X}", self.kind, option, self.value)
      }

      // Option-less kinds only print a value when there is one.
      None if self.value == 0 => {
        write!(f, "{}", self.kind)
      }

      None => {
        write!(f, "{} {:02X}", self.kind, self.value)
      }

    }
  }
}

fn hex_value(input: &str) -> IResult<&str, u8> {
  preceded(
    opt(tag_no_case("0x")),
    map_res(
      take_while_m_n(1, 2, |c: char| c.is_ascii_hexdigit()),
      |digits: &str| u8::from_str_radix(digits, 16)
    )
  )(input)
}

fn option_token(input: &str) -> IResult<&str, &str> {
  take_while1(|c: char| c == '#' || c == '%' || c == '$' || c.is_ascii_alphabetic())(input)
}

fn comment(input: &str) -> IResult<&str, &str> {
  preceded(tag(COMMENT_PREFIX), rest)(input)
}

fn mnemonic(input: &str) -> IResult<&str, InstructionKind> {
  verify(
    map_res(alphanumeric1, InstructionKind::from_str),
    |kind: &InstructionKind| *kind != InstructionKind::Exception
  )(input)
}

fn literal(input: &str) -> IResult<&str, Instruction> {
  let (input, kind) = preceded(space0, mnemonic)(input)?;
  let family = kind.option_family();

  let (input, options, value) = match family {

    OptionFamily::None => {
      // [Mnemonic] [Value]?
      let (input, value) = map(opt(preceded(space1, hex_value)), Option::unwrap_or_default)(input)?;
      (input, OptionPayload::None, value)
    }

    family => {
      // [Mnemonic] [Option] [Value]
      let (input, (_, options, _, value)) = tuple((
        space1,
        map_opt(option_token, |token| option_from_mnemonic(family, token)),
        space1,
        hex_value
      ))(input)?;
      (input, options, value)
    }

  };

  let (input, _) = tuple((space0, opt(comment)))(input)?;
  Ok((input, Instruction { kind, options, value }))
}

fn parse_line(text: &str, line: usize) -> Result<Instruction> {
  match all_consuming(literal)(text) {
    Ok((_, instruction)) => Ok(instruction),
    Err(e) => {
      debug!("line {}: could not parse `{}`: {:?}", line, text, e);
      Err(NewtonError::InvalidLiteral { line, literal: text.to_string() })
    }
  }
}

/// Parses a single instruction literal, e.g. `SEL % 0A`.
pub fn parse_literal(text: &str) -> Result<Instruction> {
  parse_line(text, 1)
}

fn is_blank_or_comment(line: &str) -> bool {
  let trimmed = line.trim();
  trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX)
}

/**
  Parses assembly source, one literal per line. Blank and comment lines produce nothing.
  `NOP` lines are kept as `Ignore` instructions. Fails on the first malformed line, reporting
  its one-based line number.
*/
pub fn parse_assembly(text: &str) -> Result<Vec<Instruction>> {
  text
    .lines()
    .enumerate()
    .filter(|(_, line)| !is_blank_or_comment(line))
    .map(|(idx, line)| parse_line(line.trim_end(), idx + 1))
    .collect()
}

/// Parses and encodes assembly source into words. `NOP` lines emit nothing.
pub fn assemble(text: &str) -> Result<Vec<Word>> {
  parse_assembly(text)?
    .into_iter()
    .filter(|instruction| instruction.kind != InstructionKind::Ignore)
    .map(encode_instruction)
    .collect()
}

impl FromStr for Instruction {
  type Err = NewtonError;

  fn from_str(text: &str) -> Result<Self> {
    parse_literal(text)
  }
}
