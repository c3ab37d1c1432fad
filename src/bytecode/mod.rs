/*!

  A Newton instruction is a single 16 bit word. Reading the word most significant bit first,
  the sizes of instruction components are as follows:

    Opcode:   6 bits   (bits 15-10)
    Option:   2 bits   (bits  9-8)
    Value:    8 bits   (bits  7-0)

  The opcode selects an `InstructionKind`. How the option bits are read depends on the kind:
  a `Sleep` reads them as a time unit, a `Fill` as a color channel, and so on, while `Update`
  and `Clear` take no option at all and ignore them. The value is a plain operand (an LED
  index, a channel intensity, a duration) whose meaning is up to the receiver.

  The kind tags are not contiguous and two of them, `Ignore` (0xFE) and `Exception` (0xFF),
  are wider than the opcode field. Those two are sentinels that never appear on the wire: no
  word decodes to them and encoding them is an error.

  Words are only ever handled as `u16` values here. Byte order, framing and transport are the
  business of whoever moves the words around.

*/

mod assembly;
mod binary;
mod instruction;
mod options;

pub use assembly::{assemble, parse_assembly, parse_literal, option_mnemonic, option_from_mnemonic};
pub use binary::{decode_instruction, encode_instruction, decode_words, encode_instructions,
                 RawInstruction, Word, MAX_OPCODE};
pub use instruction::{Instruction, InstructionKind};
pub use options::{OptionFamily, OptionPayload, SelectOptions, RangeOptions, ColorOptions,
                  EffectOptions, TimeOptions, LoadOptions};
