//! Disassembly listings: one table row per word, with its byte offset, the raw word, and the
//! instruction literal.

use prettytable::{format as TableFormat, Table};

use newton::{decode_instruction, Word};

/// Shown in place of a literal for words that do not decode.
pub const INVALID_MARKER: &str = "<invalid>";

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

pub struct Listing {
  pub table: Table,
  pub invalid: usize,
}

/// Builds the listing. Malformed words get a row too, so offsets stay aligned with the input.
pub fn make_listing(words: &[Word]) -> Listing {
  let mut table = Table::new();
  let mut invalid = 0;

  table.set_format(*TABLE_DISPLAY_FORMAT);
  table.set_titles(row![ubr->"Offset", ubl->"Word", ubl->"Instruction"]);

  for (i, &word) in words.iter().enumerate() {
    let text = match decode_instruction(word) {
      Ok(instruction) => instruction.to_string(),
      Err(_) => {
        invalid += 1;
        INVALID_MARKER.to_string()
      }
    };
    table.add_row(row![r->format!("{:04X}", i * 2), format!("{:#06X}", word), text]);
  }

  Listing { table, invalid }
}
